//! Push-based operator stage.
//!
//! [`FallingMaxSubscriber`] sits between an upstream source and a downstream
//! [`Subscriber`]. It receives items one at a time, forwards the running
//! maximum, and on successful completion pushes the whole drain before
//! forwarding the completion signal. Upstream failures are forwarded as is
//! and skip the drain.
//!
//! Demand is strictly one-in-one-out: one item is requested on subscription
//! and one more after each item. The downstream's own demand is not honored;
//! a downstream that wants to stop cancels through the [`CancelToken`].

use fmax_core::traits::{CompletionObserver, NoopObserver, Subscriber};
use fmax_core::types::{Completion, CompletionKind, Demand, OperatorState, Sample};

use crate::cancel::CancelToken;
use crate::operator::FallingMax;

pub struct FallingMaxSubscriber<T: Sample, D, O = NoopObserver> {
    op: FallingMax<T>,
    downstream: Option<D>,
    token: CancelToken,
    observer: O,
}

impl<T: Sample, D> FallingMaxSubscriber<T, D> {
    pub fn new(op: FallingMax<T>, downstream: D) -> Self {
        Self {
            op,
            downstream: Some(downstream),
            token: CancelToken::new(),
            observer: NoopObserver,
        }
    }
}

impl<T: Sample, D, O: CompletionObserver> FallingMaxSubscriber<T, D, O> {
    /// Share an existing token, e.g. one the downstream already holds.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.token = token;
        self
    }

    pub fn observe<O2: CompletionObserver>(self, observer: O2) -> FallingMaxSubscriber<T, D, O2> {
        FallingMaxSubscriber {
            op: self.op,
            downstream: self.downstream,
            token: self.token,
            observer,
        }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn operator(&self) -> &FallingMax<T> {
        &self.op
    }

    /// Whether the downstream is still attached.
    pub fn is_attached(&self) -> bool {
        self.downstream.is_some()
    }

    /// Cancel now: state is discarded and the downstream dropped.
    pub fn cancel(&mut self) {
        self.token.cancel();
        self.shut_down();
    }

    /// Applies a pending cancellation. Returns `true` if cancelled.
    fn poll_cancelled(&mut self) -> bool {
        if self.token.is_cancelled() {
            self.shut_down();
            return true;
        }
        false
    }

    fn shut_down(&mut self) {
        // A drain in progress has already reported `Finished`.
        if self.op.state() == OperatorState::Active {
            self.observer
                .on_completion(&self.op.completion_event(CompletionKind::Cancelled));
        }
        self.op.cancel();
        self.downstream = None;
    }
}

impl<T, E, D, O> Subscriber<T, E> for FallingMaxSubscriber<T, D, O>
where
    T: Sample,
    D: Subscriber<T, E>,
    O: CompletionObserver,
{
    fn on_subscribe(&mut self) -> Demand {
        if self.poll_cancelled() {
            return Demand::None;
        }
        if let Some(downstream) = self.downstream.as_mut() {
            downstream.on_subscribe();
        }
        Demand::ONE
    }

    fn on_next(&mut self, value: T) -> Demand {
        if self.poll_cancelled() {
            return Demand::None;
        }
        let Some(out) = self.op.on_next(value) else {
            return Demand::None;
        };
        if let Some(downstream) = self.downstream.as_mut() {
            downstream.on_next(out);
        }
        if self.poll_cancelled() {
            return Demand::None;
        }
        Demand::ONE
    }

    fn on_complete(&mut self, completion: Completion<E>) {
        if self.poll_cancelled() || self.op.state() != OperatorState::Active {
            return;
        }
        self.observer
            .on_completion(&self.op.completion_event(completion.kind()));
        match completion {
            Completion::Finished => {
                self.op.complete();
                while let Some(out) = self.op.drain_next() {
                    if let Some(downstream) = self.downstream.as_mut() {
                        downstream.on_next(out);
                    }
                    if self.poll_cancelled() {
                        return;
                    }
                }
                if let Some(mut downstream) = self.downstream.take() {
                    downstream.on_complete(Completion::Finished);
                }
            }
            Completion::Failed(e) => {
                self.op.on_error();
                if let Some(mut downstream) = self.downstream.take() {
                    downstream.on_complete(Completion::Failed(e));
                }
            }
        }
    }
}
