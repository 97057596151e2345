//! Trait interfaces between the operator and its collaborators.
//!
//! - [`Subscriber`] — the push protocol spoken between an upstream source,
//!   the operator, and a downstream sink
//! - [`CompletionObserver`] — injected diagnostic hook fired when a session ends

use crate::types::{Completion, CompletionEvent, Demand};

/// Receiver side of a push-based stream.
///
/// Items arrive strictly one at a time. After [`on_complete`](Self::on_complete)
/// no further calls are made.
pub trait Subscriber<T, E> {
    /// Called once before any item. Returns the initial demand.
    ///
    /// Default requests a single item.
    fn on_subscribe(&mut self) -> Demand {
        Demand::ONE
    }

    /// Deliver one item. Returns the demand for further items.
    fn on_next(&mut self, value: T) -> Demand;

    /// Deliver the terminal signal.
    fn on_complete(&mut self, completion: Completion<E>);
}

impl<T, E, S> Subscriber<T, E> for &mut S
where
    S: Subscriber<T, E> + ?Sized,
{
    fn on_subscribe(&mut self) -> Demand {
        (**self).on_subscribe()
    }

    fn on_next(&mut self, value: T) -> Demand {
        (**self).on_next(value)
    }

    fn on_complete(&mut self, completion: Completion<E>) {
        (**self).on_complete(completion)
    }
}

/// Diagnostic hook notified when an operator session ends.
///
/// Keeps logging out of the operator itself. Closures taking a
/// `&CompletionEvent` implement this trait.
pub trait CompletionObserver {
    fn on_completion(&self, event: &CompletionEvent);
}

impl<F> CompletionObserver for F
where
    F: Fn(&CompletionEvent),
{
    fn on_completion(&self, event: &CompletionEvent) {
        self(event)
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CompletionObserver for NoopObserver {
    fn on_completion(&self, _event: &CompletionEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CompletionKind;
    use std::cell::RefCell;

    struct Recorder {
        values: Vec<i32>,
        done: Option<Completion<String>>,
    }

    impl Subscriber<i32, String> for Recorder {
        fn on_next(&mut self, value: i32) -> Demand {
            self.values.push(value);
            Demand::ONE
        }

        fn on_complete(&mut self, completion: Completion<String>) {
            self.done = Some(completion);
        }
    }

    fn feed<S: Subscriber<i32, String>>(mut sub: S, items: &[i32]) {
        let mut demand = sub.on_subscribe();
        for &item in items {
            if !demand.wants_more() {
                return;
            }
            demand = sub.on_next(item);
        }
        sub.on_complete(Completion::Finished);
    }

    #[test]
    fn mut_ref_forwards_to_subscriber() {
        let mut rec = Recorder {
            values: vec![],
            done: None,
        };
        feed(&mut rec, &[3, 4]);
        assert_eq!(rec.values, vec![3, 4]);
        assert_eq!(rec.done, Some(Completion::Finished));
    }

    #[test]
    fn closure_is_observer() {
        let seen = RefCell::new(Vec::new());
        let obs = |ev: &CompletionEvent| seen.borrow_mut().push(ev.kind);
        let ev = CompletionEvent {
            kind: CompletionKind::Failed,
            last_max: 0,
            inputs_seen: 0,
        };
        obs.on_completion(&ev);
        NoopObserver.on_completion(&ev);
        assert_eq!(*seen.borrow(), vec![CompletionKind::Failed]);
    }
}
