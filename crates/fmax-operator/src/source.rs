//! Synchronous upstream driver.
//!
//! [`publish`] feeds a fallible sequence into a [`Subscriber`], pulling the
//! next item only while the subscriber still has outstanding demand.

use fmax_core::traits::Subscriber;
use fmax_core::types::{Completion, Demand};

/// How a [`publish`] run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Source exhausted; `Completion::Finished` was delivered.
    Finished { delivered: u64 },
    /// Source yielded an error; `Completion::Failed` was delivered.
    Failed { delivered: u64 },
    /// Subscriber stopped requesting items. No terminal signal was sent.
    Stopped { delivered: u64 },
}

impl PublishOutcome {
    pub fn delivered(&self) -> u64 {
        match *self {
            PublishOutcome::Finished { delivered }
            | PublishOutcome::Failed { delivered }
            | PublishOutcome::Stopped { delivered } => delivered,
        }
    }
}

/// Drive `items` into `subscriber` one at a time.
///
/// Demand returned from `on_next` is additive: `Demand::Max(k)` asks for `k`
/// more on top of what is still outstanding, `Demand::None` adds nothing.
pub fn publish<T, E, I, S>(items: I, mut subscriber: S) -> PublishOutcome
where
    I: IntoIterator<Item = Result<T, E>>,
    S: Subscriber<T, E>,
{
    let mut outstanding = demand_count(subscriber.on_subscribe());
    let mut delivered = 0u64;
    let mut items = items.into_iter();

    loop {
        if outstanding == 0 {
            return PublishOutcome::Stopped { delivered };
        }
        match items.next() {
            Some(Ok(value)) => {
                outstanding -= 1;
                delivered += 1;
                let more = subscriber.on_next(value);
                outstanding = outstanding.saturating_add(demand_count(more));
            }
            Some(Err(e)) => {
                subscriber.on_complete(Completion::Failed(e));
                return PublishOutcome::Failed { delivered };
            }
            None => {
                subscriber.on_complete(Completion::Finished);
                return PublishOutcome::Finished { delivered };
            }
        }
    }
}

fn demand_count(demand: Demand) -> usize {
    match demand {
        Demand::None => 0,
        Demand::Max(n) => n,
    }
}
