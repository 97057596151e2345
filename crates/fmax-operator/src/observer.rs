//! Tracing-backed completion observer.

use fmax_core::traits::CompletionObserver;
use fmax_core::types::{CompletionEvent, CompletionKind};
use tracing::{debug, warn};

/// Records each session end as a `tracing` event under the `fmax` target.
///
/// Successful and cancelled sessions log at debug level; upstream failures
/// log at warn.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CompletionObserver for TracingObserver {
    fn on_completion(&self, event: &CompletionEvent) {
        match event.kind {
            CompletionKind::Failed => warn!(
                target: "fmax",
                kind = %event.kind,
                last_max = %event.last_max,
                inputs = event.inputs_seen,
                "falling max upstream failed, skipping drain"
            ),
            _ => debug!(
                target: "fmax",
                kind = %event.kind,
                last_max = %event.last_max,
                inputs = event.inputs_seen,
                "falling max completion"
            ),
        }
    }
}
