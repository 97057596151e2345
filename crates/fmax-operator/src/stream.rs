//! Async stream adapters.
//!
//! Same semantics as the iterator adapters in [`crate::iter`]. The upstream
//! is only polled when no drain output is pending, so at most one item is in
//! flight at a time.

use std::pin::Pin;
use std::task::{Context, Poll};

use fmax_core::error::ConfigError;
use fmax_core::traits::{CompletionObserver, NoopObserver};
use fmax_core::types::{CompletionKind, OperatorState, Sample};
use futures_util::Stream;
use pin_project::pin_project;

use crate::operator::FallingMax;

/// Stream returned by [`FallingMaxStreamExt::falling_max`].
#[pin_project]
#[derive(Debug)]
pub struct FallingMaxStream<S, T, O = NoopObserver>
where
    T: Sample,
{
    #[pin]
    input: S,
    op: FallingMax<T>,
    observer: O,
}

impl<S, T> FallingMaxStream<S, T>
where
    S: Stream<Item = T>,
    T: Sample,
{
    pub fn new(input: S, op: FallingMax<T>) -> Self {
        Self {
            input,
            op,
            observer: NoopObserver,
        }
    }
}

impl<S, T, O> FallingMaxStream<S, T, O>
where
    T: Sample,
    O: CompletionObserver,
{
    pub fn observe<O2: CompletionObserver>(self, observer: O2) -> FallingMaxStream<S, T, O2> {
        FallingMaxStream {
            input: self.input,
            op: self.op,
            observer,
        }
    }

    pub fn operator(&self) -> &FallingMax<T> {
        &self.op
    }

    /// Stop the stream. Subsequent polls return `None` without touching the
    /// upstream.
    pub fn cancel(self: Pin<&mut Self>) {
        let this = self.project();
        cancel_session(this.op, this.observer);
    }
}

impl<S, T, O> Stream for FallingMaxStream<S, T, O>
where
    S: Stream<Item = T>,
    T: Sample,
    O: CompletionObserver,
{
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let this = self.project();

        match this.op.state() {
            OperatorState::Active => {}
            OperatorState::Draining => return Poll::Ready(this.op.drain_next()),
            _ => return Poll::Ready(None),
        }

        match this.input.poll_next(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Some(input)) => Poll::Ready(this.op.on_next(input)),
            Poll::Ready(None) => {
                this.observer
                    .on_completion(&this.op.completion_event(CompletionKind::Finished));
                this.op.complete();
                Poll::Ready(this.op.drain_next())
            }
        }
    }
}

/// Stream returned by [`TryFallingMaxStreamExt::try_falling_max`].
#[pin_project]
#[derive(Debug)]
pub struct TryFallingMaxStream<S, T, O = NoopObserver>
where
    T: Sample,
{
    #[pin]
    input: S,
    op: FallingMax<T>,
    observer: O,
}

impl<S, T, E> TryFallingMaxStream<S, T>
where
    S: Stream<Item = Result<T, E>>,
    T: Sample,
{
    pub fn new(input: S, op: FallingMax<T>) -> Self {
        Self {
            input,
            op,
            observer: NoopObserver,
        }
    }
}

impl<S, T, O> TryFallingMaxStream<S, T, O>
where
    T: Sample,
    O: CompletionObserver,
{
    pub fn observe<O2: CompletionObserver>(self, observer: O2) -> TryFallingMaxStream<S, T, O2> {
        TryFallingMaxStream {
            input: self.input,
            op: self.op,
            observer,
        }
    }

    pub fn operator(&self) -> &FallingMax<T> {
        &self.op
    }

    /// Stop the stream. Subsequent polls return `None` without touching the
    /// upstream.
    pub fn cancel(self: Pin<&mut Self>) {
        let this = self.project();
        cancel_session(this.op, this.observer);
    }
}

/// Once draining, `Finished` has already been reported.
fn cancel_session<T: Sample, O: CompletionObserver>(op: &mut FallingMax<T>, observer: &O) {
    if op.state() == OperatorState::Active {
        observer.on_completion(&op.completion_event(CompletionKind::Cancelled));
    }
    op.cancel();
}

impl<S, T, E, O> Stream for TryFallingMaxStream<S, T, O>
where
    S: Stream<Item = Result<T, E>>,
    T: Sample,
    O: CompletionObserver,
{
    type Item = Result<T, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Result<T, E>>> {
        let this = self.project();

        match this.op.state() {
            OperatorState::Active => {}
            OperatorState::Draining => return Poll::Ready(this.op.drain_next().map(Ok)),
            _ => return Poll::Ready(None),
        }

        match this.input.poll_next(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Some(Ok(input))) => Poll::Ready(this.op.on_next(input).map(Ok)),
            Poll::Ready(Some(Err(e))) => {
                this.observer
                    .on_completion(&this.op.completion_event(CompletionKind::Failed));
                this.op.on_error();
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(None) => {
                this.observer
                    .on_completion(&this.op.completion_event(CompletionKind::Finished));
                this.op.complete();
                Poll::Ready(this.op.drain_next().map(Ok))
            }
        }
    }
}

/// Adds `.falling_max()` to every stream of samples.
pub trait FallingMaxStreamExt<T: Sample>: Stream<Item = T> + Sized {
    fn falling_max(self) -> FallingMaxStream<Self, T> {
        FallingMaxStream::new(self, FallingMax::with_unit_step())
    }

    fn falling_max_with_step(self, step: T) -> Result<FallingMaxStream<Self, T>, ConfigError> {
        Ok(FallingMaxStream::new(self, FallingMax::new(step)?))
    }
}

impl<S, T> FallingMaxStreamExt<T> for S
where
    S: Stream<Item = T>,
    T: Sample,
{
}

/// Adds `.try_falling_max()` to every stream of `Result<T, E>`.
pub trait TryFallingMaxStreamExt<T: Sample, E>: Stream<Item = Result<T, E>> + Sized {
    fn try_falling_max(self) -> TryFallingMaxStream<Self, T> {
        TryFallingMaxStream::new(self, FallingMax::with_unit_step())
    }

    fn try_falling_max_with_step(self, step: T) -> Result<TryFallingMaxStream<Self, T>, ConfigError> {
        Ok(TryFallingMaxStream::new(self, FallingMax::new(step)?))
    }
}

impl<S, T, E> TryFallingMaxStreamExt<T, E> for S
where
    S: Stream<Item = Result<T, E>>,
    T: Sample,
{
}
