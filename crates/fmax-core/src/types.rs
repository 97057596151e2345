//! Core value types shared by the operator and its drivers.

use std::fmt::{Debug, Display};

use num_traits::PrimInt;
use serde::{Deserialize, Serialize};

/// Numeric element type the operator can run over.
///
/// Any primitive integer, signed or unsigned. The running maximum is held in
/// the same type as the input, so values are never narrowed.
pub trait Sample: PrimInt + Debug + Display + Send + 'static {
    /// Name of the concrete type, used in diagnostics.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<T> Sample for T where T: PrimInt + Debug + Display + Send + 'static {}

/// Number of further items a subscriber is willing to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Demand {
    /// No more items; the upstream should stop producing.
    None,
    /// Up to `n` more items.
    Max(usize),
}

impl Demand {
    /// Exactly one more item.
    pub const ONE: Demand = Demand::Max(1);

    /// Whether at least one more item is wanted.
    pub fn wants_more(&self) -> bool {
        matches!(self, Demand::Max(n) if *n > 0)
    }
}

/// Terminal signal of a stream: success or a forwarded upstream failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion<E> {
    Finished,
    Failed(E),
}

impl<E> Completion<E> {
    pub fn kind(&self) -> CompletionKind {
        match self {
            Completion::Finished => CompletionKind::Finished,
            Completion::Failed(_) => CompletionKind::Failed,
        }
    }
}

/// Lifecycle state of a single operator instance.
///
/// `Active` is initial. `Completed`, `Failed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorState {
    Active,
    Draining,
    Completed,
    Failed,
    Cancelled,
}

impl OperatorState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OperatorState::Completed | OperatorState::Failed | OperatorState::Cancelled
        )
    }
}

/// How a processing session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionKind {
    Finished,
    Failed,
    Cancelled,
}

impl Display for CompletionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CompletionKind::Finished => "finished",
            CompletionKind::Failed => "failed",
            CompletionKind::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Diagnostic record handed to a [`CompletionObserver`](crate::traits::CompletionObserver)
/// when a session ends.
///
/// `last_max` is the running maximum at the moment the terminal signal
/// arrived, before any drain. It is non-negative for every sample type, so
/// `u128` holds it losslessly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub kind: CompletionKind,
    pub last_max: u128,
    pub inputs_seen: u64,
}
