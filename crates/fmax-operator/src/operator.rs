//! Falling-maximum state machine.
//!
//! Holds the running maximum and the decay step. Every input either sets a
//! new high or lowers the maximum by one step, floored at zero. After the
//! upstream finishes, [`FallingMax::on_complete`] yields the remaining decay
//! down to zero.
//!
//! All arithmetic stays in the sample type `T` and never overflows: a new
//! high is an input value taken as is, and a decay only subtracts when the
//! current maximum is strictly greater than the step.

use fmax_core::config::OperatorConfig;
use fmax_core::error::ConfigError;
use fmax_core::types::{CompletionEvent, CompletionKind, OperatorState, Sample};

/// Running maximum that falls by a fixed step toward zero.
#[derive(Debug, Clone)]
pub struct FallingMax<T: Sample> {
    current: T,
    step: T,
    state: OperatorState,
    inputs_seen: u64,
}

impl<T: Sample> Default for FallingMax<T> {
    fn default() -> Self {
        Self::with_unit_step()
    }
}

impl<T: Sample> FallingMax<T> {
    /// Create an operator with the given decay step.
    ///
    /// Fails with [`ConfigError::NonPositiveStep`] if `step < 1`.
    pub fn new(step: T) -> Result<Self, ConfigError> {
        if step < T::one() {
            return Err(ConfigError::NonPositiveStep(step.to_i128().unwrap_or(i128::MIN)));
        }
        Ok(Self {
            current: T::zero(),
            step,
            state: OperatorState::Active,
            inputs_seen: 0,
        })
    }

    /// Create an operator that decays by one per tick.
    pub fn with_unit_step() -> Self {
        Self {
            current: T::zero(),
            step: T::one(),
            state: OperatorState::Active,
            inputs_seen: 0,
        }
    }

    pub fn from_config(config: &OperatorConfig) -> Result<Self, ConfigError> {
        Self::new(config.decay_step_as::<T>()?)
    }

    pub fn current(&self) -> T {
        self.current
    }

    pub fn step(&self) -> T {
        self.step
    }

    pub fn state(&self) -> OperatorState {
        self.state
    }

    /// Number of inputs accepted while active.
    pub fn inputs_seen(&self) -> u64 {
        self.inputs_seen
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Feed one upstream item and return the new running maximum.
    ///
    /// Returns `None` once the operator has left [`OperatorState::Active`];
    /// late items are dropped without touching the state.
    pub fn on_next(&mut self, input: T) -> Option<T> {
        if self.state != OperatorState::Active {
            return None;
        }
        self.inputs_seen += 1;
        if input > self.current {
            self.current = input;
        } else {
            self.current = self.decayed();
        }
        Some(self.current)
    }

    /// Signal successful end of input and return the drain sequence.
    ///
    /// The drain yields each decayed value down to and including zero, once.
    /// It is empty when the maximum is already zero, or when the operator was
    /// not active.
    pub fn on_complete(&mut self) -> Drain<'_, T> {
        self.complete();
        Drain { op: self }
    }

    /// Signal an upstream failure. The running maximum is discarded without
    /// draining.
    pub fn on_error(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.current = T::zero();
        self.state = OperatorState::Failed;
    }

    /// Stop immediately. Idempotent; also aborts a drain in progress.
    pub fn cancel(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.current = T::zero();
        self.state = OperatorState::Cancelled;
    }

    /// Snapshot for a [`CompletionObserver`](fmax_core::traits::CompletionObserver).
    pub fn completion_event(&self, kind: CompletionKind) -> CompletionEvent {
        CompletionEvent {
            kind,
            last_max: self.current.to_u128().unwrap_or(0),
            inputs_seen: self.inputs_seen,
        }
    }

    /// Move from active to draining without borrowing a [`Drain`].
    pub(crate) fn complete(&mut self) {
        if self.state != OperatorState::Active {
            return;
        }
        self.state = if self.current.is_zero() {
            OperatorState::Completed
        } else {
            OperatorState::Draining
        };
    }

    /// One drain tick. Returns `None` when not draining.
    pub(crate) fn drain_next(&mut self) -> Option<T> {
        if self.state != OperatorState::Draining {
            return None;
        }
        self.current = self.decayed();
        if self.current.is_zero() {
            self.state = OperatorState::Completed;
        }
        Some(self.current)
    }

    /// Ticks left in the drain: `ceil(current / step)`.
    pub(crate) fn drain_remaining(&self) -> Option<usize> {
        if self.state != OperatorState::Draining {
            return Some(0);
        }
        let full = self.current / self.step;
        let ticks = if (self.current % self.step).is_zero() {
            full
        } else {
            full + T::one()
        };
        ticks.to_usize()
    }

    fn decayed(&self) -> T {
        if self.current <= self.step {
            T::zero()
        } else {
            self.current - self.step
        }
    }
}

/// Lazy drain sequence returned by [`FallingMax::on_complete`].
///
/// Pull it to exhaustion to bring the operator to
/// [`OperatorState::Completed`].
#[derive(Debug)]
pub struct Drain<'a, T: Sample> {
    op: &'a mut FallingMax<T>,
}

impl<T: Sample> Drain<'_, T> {
    /// Stop the drain and cancel the operator.
    pub fn cancel(self) {
        self.op.cancel();
    }
}

impl<T: Sample> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.op.drain_next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.op.drain_remaining() {
            Some(n) => (n, Some(n)),
            None => (usize::MAX, None),
        }
    }
}

impl<T: Sample> std::iter::FusedIterator for Drain<'_, T> {}
