//! Iterator adapters.
//!
//! [`FallingMaxExt`] turns any iterator of samples into its falling maximum,
//! followed by the drain to zero once the source is exhausted.
//! [`TryFallingMaxExt`] does the same over fallible items: the first error is
//! passed through unchanged and ends the sequence without a drain.

use std::iter::{Fuse, FusedIterator};

use fmax_core::error::ConfigError;
use fmax_core::traits::{CompletionObserver, NoopObserver};
use fmax_core::types::{CompletionKind, OperatorState, Sample};

use crate::operator::FallingMax;

/// Iterator returned by [`FallingMaxExt::falling_max`].
#[derive(Debug, Clone)]
pub struct FallingMaxIter<I, O = NoopObserver>
where
    I: Iterator,
    I::Item: Sample,
{
    iter: Fuse<I>,
    op: FallingMax<I::Item>,
    observer: O,
}

impl<I> FallingMaxIter<I>
where
    I: Iterator,
    I::Item: Sample,
{
    pub fn new(iter: I, op: FallingMax<I::Item>) -> Self {
        Self {
            iter: iter.fuse(),
            op,
            observer: NoopObserver,
        }
    }
}

impl<I, O> FallingMaxIter<I, O>
where
    I: Iterator,
    I::Item: Sample,
    O: CompletionObserver,
{
    /// Attach an observer notified when the source is exhausted.
    pub fn observe<O2: CompletionObserver>(self, observer: O2) -> FallingMaxIter<I, O2> {
        FallingMaxIter {
            iter: self.iter,
            op: self.op,
            observer,
        }
    }

    pub fn operator(&self) -> &FallingMax<I::Item> {
        &self.op
    }
}

impl<I, O> Iterator for FallingMaxIter<I, O>
where
    I: Iterator,
    I::Item: Sample,
    O: CompletionObserver,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        match self.op.state() {
            OperatorState::Active => match self.iter.next() {
                Some(input) => self.op.on_next(input),
                None => {
                    self.observer
                        .on_completion(&self.op.completion_event(CompletionKind::Finished));
                    self.op.complete();
                    self.op.drain_next()
                }
            },
            OperatorState::Draining => self.op.drain_next(),
            _ => None,
        }
    }
}

impl<I, O> FusedIterator for FallingMaxIter<I, O>
where
    I: Iterator,
    I::Item: Sample,
    O: CompletionObserver,
{
}

/// Adds `.falling_max()` to every iterator of samples.
pub trait FallingMaxExt: Iterator + Sized
where
    Self::Item: Sample,
{
    /// Falling maximum with a decay step of one.
    fn falling_max(self) -> FallingMaxIter<Self> {
        FallingMaxIter::new(self, FallingMax::with_unit_step())
    }

    /// Falling maximum with a custom decay step.
    fn falling_max_with_step(self, step: Self::Item) -> Result<FallingMaxIter<Self>, ConfigError> {
        Ok(FallingMaxIter::new(self, FallingMax::new(step)?))
    }
}

impl<I> FallingMaxExt for I
where
    I: Iterator,
    I::Item: Sample,
{
}

/// Iterator returned by [`TryFallingMaxExt::try_falling_max`].
#[derive(Debug, Clone)]
pub struct TryFallingMaxIter<I, T, O = NoopObserver>
where
    T: Sample,
{
    iter: I,
    op: FallingMax<T>,
    observer: O,
}

impl<I, T, E> TryFallingMaxIter<I, T>
where
    I: Iterator<Item = Result<T, E>>,
    T: Sample,
{
    pub fn new(iter: I, op: FallingMax<T>) -> Self {
        Self {
            iter,
            op,
            observer: NoopObserver,
        }
    }
}

impl<I, T, E, O> TryFallingMaxIter<I, T, O>
where
    I: Iterator<Item = Result<T, E>>,
    T: Sample,
    O: CompletionObserver,
{
    pub fn observe<O2: CompletionObserver>(self, observer: O2) -> TryFallingMaxIter<I, T, O2> {
        TryFallingMaxIter {
            iter: self.iter,
            op: self.op,
            observer,
        }
    }

    pub fn operator(&self) -> &FallingMax<T> {
        &self.op
    }
}

impl<I, T, E, O> Iterator for TryFallingMaxIter<I, T, O>
where
    I: Iterator<Item = Result<T, E>>,
    T: Sample,
    O: CompletionObserver,
{
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Result<T, E>> {
        match self.op.state() {
            OperatorState::Active => match self.iter.next() {
                Some(Ok(input)) => self.op.on_next(input).map(Ok),
                Some(Err(e)) => {
                    self.observer
                        .on_completion(&self.op.completion_event(CompletionKind::Failed));
                    self.op.on_error();
                    Some(Err(e))
                }
                None => {
                    self.observer
                        .on_completion(&self.op.completion_event(CompletionKind::Finished));
                    self.op.complete();
                    self.op.drain_next().map(Ok)
                }
            },
            OperatorState::Draining => self.op.drain_next().map(Ok),
            _ => None,
        }
    }
}

impl<I, T, E, O> FusedIterator for TryFallingMaxIter<I, T, O>
where
    I: Iterator<Item = Result<T, E>>,
    T: Sample,
    O: CompletionObserver,
{
}

/// Adds `.try_falling_max()` to every iterator of `Result<T, E>`.
pub trait TryFallingMaxExt<T, E>: Iterator<Item = Result<T, E>> + Sized
where
    T: Sample,
{
    fn try_falling_max(self) -> TryFallingMaxIter<Self, T> {
        TryFallingMaxIter::new(self, FallingMax::with_unit_step())
    }

    fn try_falling_max_with_step(self, step: T) -> Result<TryFallingMaxIter<Self, T>, ConfigError> {
        Ok(TryFallingMaxIter::new(self, FallingMax::new(step)?))
    }
}

impl<I, T, E> TryFallingMaxExt<T, E> for I
where
    I: Iterator<Item = Result<T, E>>,
    T: Sample,
{
}
