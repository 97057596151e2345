//! # fmax-operator — Falling-maximum stream operator.
//!
//! The running maximum of a numeric sequence, lowered by a fixed step
//! whenever an input fails to set a new high and floored at zero. When the
//! input ends the maximum keeps falling until it reaches zero.
//!
//! The state machine lives in [`FallingMax`]. It is driven by:
//! - **Iterators**: [`FallingMaxExt`] and [`TryFallingMaxExt`]
//! - **Async streams**: [`FallingMaxStreamExt`] and [`TryFallingMaxStreamExt`]
//! - **Push protocol**: [`FallingMaxSubscriber`] fed by [`publish`], with
//!   cancellation through a shared [`CancelToken`]
//!
//! Session ends are reported to an injected
//! [`CompletionObserver`](fmax_core::traits::CompletionObserver);
//! [`TracingObserver`] forwards them to `tracing`.

pub mod cancel;
pub mod iter;
pub mod observer;
pub mod operator;
pub mod sink;
pub mod source;
pub mod stream;
pub mod subscriber;

pub use cancel::CancelToken;
pub use iter::{FallingMaxExt, FallingMaxIter, TryFallingMaxExt, TryFallingMaxIter};
pub use observer::TracingObserver;
pub use operator::{Drain, FallingMax};
pub use sink::{FnSink, VecSink};
pub use source::{PublishOutcome, publish};
pub use stream::{FallingMaxStream, FallingMaxStreamExt, TryFallingMaxStream, TryFallingMaxStreamExt};
pub use subscriber::FallingMaxSubscriber;
