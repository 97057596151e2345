//! Downstream sinks.

use fmax_core::traits::Subscriber;
use fmax_core::types::{Completion, Demand};

/// Collects every value and the terminal signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VecSink<T, E> {
    values: Vec<T>,
    completion: Option<Completion<E>>,
}

impl<T, E> Default for VecSink<T, E> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            completion: None,
        }
    }
}

impl<T, E> VecSink<T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn completion(&self) -> Option<&Completion<E>> {
        self.completion.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.completion.is_some()
    }

    pub fn into_parts(self) -> (Vec<T>, Option<Completion<E>>) {
        (self.values, self.completion)
    }
}

impl<T, E> Subscriber<T, E> for VecSink<T, E> {
    fn on_next(&mut self, value: T) -> Demand {
        self.values.push(value);
        Demand::ONE
    }

    fn on_complete(&mut self, completion: Completion<E>) {
        self.completion = Some(completion);
    }
}

/// Hands each value to a closure and keeps the terminal signal.
pub struct FnSink<F, E> {
    on_value: F,
    completion: Option<Completion<E>>,
}

impl<F, E> FnSink<F, E> {
    pub fn new(on_value: F) -> Self {
        Self {
            on_value,
            completion: None,
        }
    }

    pub fn completion(&self) -> Option<&Completion<E>> {
        self.completion.as_ref()
    }

    pub fn into_completion(self) -> Option<Completion<E>> {
        self.completion
    }
}

impl<T, E, F> Subscriber<T, E> for FnSink<F, E>
where
    F: FnMut(T),
{
    fn on_next(&mut self, value: T) -> Demand {
        (self.on_value)(value);
        Demand::ONE
    }

    fn on_complete(&mut self, completion: Completion<E>) {
        self.completion = Some(completion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_collects() {
        let mut sink = VecSink::<i32, String>::new();
        assert_eq!(sink.on_next(1), Demand::ONE);
        sink.on_next(2);
        assert!(!sink.is_complete());
        sink.on_complete(Completion::Finished);
        assert_eq!(sink.values(), &[1, 2]);
        assert_eq!(sink.completion(), Some(&Completion::Finished));
        let (values, completion) = sink.into_parts();
        assert_eq!(values, vec![1, 2]);
        assert_eq!(completion, Some(Completion::Finished));
    }

    #[test]
    fn fn_sink_calls_closure() {
        let mut seen = Vec::new();
        let mut sink = FnSink::new(|v: u8| seen.push(v));
        Subscriber::<u8, ()>::on_next(&mut sink, 3);
        Subscriber::<u8, ()>::on_complete(&mut sink, Completion::Failed(()));
        assert_eq!(sink.into_completion(), Some(Completion::Failed(())));
        assert_eq!(seen, vec![3]);
    }
}
