//! End-to-end scenarios run through every driver.
//!
//! Each scenario fixes an input sequence and the exact live outputs and
//! drain it must produce, then checks the state machine, the iterator
//! adapter, the async stream adapter and the push pipeline against it.

use fmax_core::config::OperatorConfig;
use fmax_core::error::ConfigError;
use fmax_core::types::{Completion, OperatorState};
use fmax_operator::{
    CancelToken, FallingMax, FallingMaxSubscriber, TryFallingMaxExt, VecSink, publish,
};
use fmax_tests::helpers::{run_iter, run_operator, run_push, run_stream};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Assert every driver produces `live` followed by `drain`.
async fn check_all(step: i64, inputs: &[i64], live: &[i64], drain: &[i64]) {
    let (got_live, got_drain) = run_operator(step, inputs);
    assert_eq!(got_live, live, "operator live outputs");
    assert_eq!(got_drain, drain, "operator drain");

    let full: Vec<i64> = live.iter().chain(drain).copied().collect();
    assert_eq!(run_iter(step, inputs), full, "iterator adapter");
    assert_eq!(run_stream(step, inputs).await, full, "stream adapter");

    let (pushed, completion) = run_push(step, inputs);
    assert_eq!(pushed, full, "push pipeline");
    assert_eq!(completion, Some(Completion::Finished));
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn climbing_list() {
    check_all(
        1,
        &[1, 2, 3, 4, 5, 2, 2, 4, 7, 9],
        &[1, 2, 3, 4, 5, 4, 3, 4, 7, 9],
        &[8, 7, 6, 5, 4, 3, 2, 1, 0],
    )
    .await;
}

#[tokio::test]
async fn climbing_and_stop() {
    check_all(
        1,
        &[1, 2, 3, 4, 5, 1, 1, 1, 1, 1],
        &[1, 2, 3, 4, 5, 4, 3, 2, 1, 0],
        &[],
    )
    .await;
}

#[tokio::test]
async fn wont_go_negative() {
    check_all(
        1,
        &[1, 2, 3, -1, -1, -1, -1, -1],
        &[1, 2, 3, 2, 1, 0, 0, 0],
        &[],
    )
    .await;
}

#[tokio::test]
async fn single_value_falls_to_zero() {
    check_all(1, &[5], &[5], &[4, 3, 2, 1, 0]).await;
}

#[tokio::test]
async fn empty_input() {
    check_all(1, &[], &[], &[]).await;
}

#[tokio::test]
async fn wide_step_overshoots_to_zero() {
    check_all(4, &[10, 3, 12], &[10, 6, 12], &[8, 4, 0]).await;
}

#[tokio::test]
async fn all_negative_input_stays_at_zero() {
    check_all(2, &[-5, -1, -9], &[0, 0, 0], &[]).await;
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn non_positive_step_rejected_everywhere() {
    assert_eq!(FallingMax::<i64>::new(0).unwrap_err(), ConfigError::NonPositiveStep(0));
    assert_eq!(
        FallingMax::<i64>::from_config(&OperatorConfig::with_decay_step(-2)).unwrap_err(),
        ConfigError::NonPositiveStep(-2)
    );
}

#[test]
fn narrow_sample_type_rejects_wide_step() {
    let err = FallingMax::<i8>::from_config(&OperatorConfig::with_decay_step(200)).unwrap_err();
    assert_eq!(err, ConfigError::StepOutOfRange { step: 200, ty: "i8" });
}

// ---------------------------------------------------------------------------
// Failure and cancellation
// ---------------------------------------------------------------------------

#[test]
fn upstream_failure_skips_drain_in_every_driver() {
    let items: Vec<Result<i64, String>> = vec![Ok(7), Ok(3), Err("link down".into()), Ok(1)];

    let iter_out: Vec<_> = items.clone().into_iter().try_falling_max().collect();
    assert_eq!(iter_out, vec![Ok(7), Ok(6), Err("link down".to_string())]);

    let mut sink = VecSink::new();
    publish(
        items,
        FallingMaxSubscriber::new(FallingMax::with_unit_step(), &mut sink),
    );
    assert_eq!(sink.values(), &[7, 6]);
    assert_eq!(
        sink.completion(),
        Some(&Completion::Failed("link down".to_string()))
    );
}

#[test]
fn cancel_mid_stream_silences_everything() {
    let token = CancelToken::new();
    let mut sink = VecSink::<i64, String>::new();
    let mut pulled = 0usize;

    let remote = token.clone();
    let items = (1..=50i64).map(|v| {
        pulled += 1;
        if v == 4 {
            remote.cancel();
        }
        Ok::<i64, String>(v)
    });

    let sub = FallingMaxSubscriber::new(FallingMax::with_unit_step(), &mut sink)
        .with_cancel_token(token);
    publish(items, sub);

    assert_eq!(sink.values(), &[1, 2, 3]);
    assert_eq!(sink.completion(), None);
    assert_eq!(pulled, 4);
}

#[test]
fn direct_cancel_is_terminal() {
    let mut op = FallingMax::<i64>::with_unit_step();
    op.on_next(9);
    op.cancel();
    assert_eq!(op.state(), OperatorState::Cancelled);
    assert_eq!(op.on_next(10), None);
    assert_eq!(op.on_complete().count(), 0);
}
