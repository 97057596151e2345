//! Shared helpers for the integration tests.

use fmax_core::types::Completion;
use fmax_operator::{
    FallingMax, FallingMaxExt, FallingMaxStreamExt, FallingMaxSubscriber, VecSink, publish,
};
use futures_util::{StreamExt, stream};

/// Direct state-machine run: live outputs followed by the drain.
pub fn run_operator(step: i64, inputs: &[i64]) -> (Vec<i64>, Vec<i64>) {
    let mut op = FallingMax::new(step).expect("valid step");
    let live = inputs.iter().filter_map(|&v| op.on_next(v)).collect();
    let drained = op.on_complete().collect();
    (live, drained)
}

/// Iterator adapter run, drain included.
pub fn run_iter(step: i64, inputs: &[i64]) -> Vec<i64> {
    inputs
        .iter()
        .copied()
        .falling_max_with_step(step)
        .expect("valid step")
        .collect()
}

/// Async stream adapter run, drain included.
pub async fn run_stream(step: i64, inputs: &[i64]) -> Vec<i64> {
    stream::iter(inputs.to_vec())
        .falling_max_with_step(step)
        .expect("valid step")
        .collect()
        .await
}

/// Push pipeline run. Returns the values and the terminal signal.
pub fn run_push(step: i64, inputs: &[i64]) -> (Vec<i64>, Option<Completion<String>>) {
    let mut sink = VecSink::<i64, String>::new();
    publish(
        inputs.iter().copied().map(Ok::<i64, String>),
        FallingMaxSubscriber::new(FallingMax::new(step).expect("valid step"), &mut sink),
    );
    sink.into_parts()
}

/// Reference model: straightforward fold over the rules.
pub fn model(step: i64, inputs: &[i64]) -> Vec<i64> {
    let mut max = 0i64;
    let mut out = Vec::new();
    for &v in inputs {
        max = if v > max { v } else { (max - step).max(0) };
        out.push(max);
    }
    while max > 0 {
        max = (max - step).max(0);
        out.push(max);
    }
    out
}
