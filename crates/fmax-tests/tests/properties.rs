//! Property-based suite for the falling-max invariants.
//!
//! Each property uses at least 256 cases with proptest shrinking.
//!
//! Properties covered:
//! - Outputs are never negative
//! - New highs pass through unchanged
//! - Non-climbing inputs lower the maximum by exactly one step, floored at 0
//! - The drain is strictly decreasing and ends with a single zero
//! - Every driver agrees with a reference fold

use fmax_tests::helpers::{model, run_iter, run_operator, run_push, run_stream};
use proptest::prelude::*;

fn inputs() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-500i64..500, 0..120)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn never_negative(step in 1i64..40, xs in inputs()) {
        let (live, drain) = run_operator(step, &xs);
        prop_assert!(live.iter().chain(drain.iter()).all(|&v| v >= 0));
    }

    #[test]
    fn one_output_per_input(step in 1i64..40, xs in inputs()) {
        let (live, _) = run_operator(step, &xs);
        prop_assert_eq!(live.len(), xs.len());
    }

    #[test]
    fn climb_and_decay(step in 1i64..40, xs in inputs()) {
        let (live, _) = run_operator(step, &xs);
        let mut before = 0i64;
        for (i, &x) in xs.iter().enumerate() {
            if x > before {
                prop_assert_eq!(live[i], x, "new high at {}", i);
            } else {
                prop_assert_eq!(live[i], (before - step).max(0), "decay at {}", i);
            }
            before = live[i];
        }
    }

    #[test]
    fn drain_ends_with_single_zero(step in 1i64..40, xs in inputs()) {
        let (live, drain) = run_operator(step, &xs);
        let last = live.last().copied().unwrap_or(0);
        if last == 0 {
            prop_assert!(drain.is_empty());
        } else {
            prop_assert_eq!(drain.last().copied(), Some(0));
            prop_assert_eq!(drain.iter().filter(|&&v| v == 0).count(), 1);
            prop_assert!(drain.windows(2).all(|w| w[0] > w[1]));
            prop_assert_eq!(drain[0], (last - step).max(0));
        }
    }

    #[test]
    fn drivers_agree_with_model(step in 1i64..40, xs in inputs()) {
        let expected = model(step, &xs);
        prop_assert_eq!(&run_iter(step, &xs), &expected);

        let (pushed, _) = run_push(step, &xs);
        prop_assert_eq!(&pushed, &expected);

        let streamed = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(run_stream(step, &xs));
        prop_assert_eq!(&streamed, &expected);
    }
}
