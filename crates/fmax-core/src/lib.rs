//! # fmax-core
//! Foundation types and traits for the fmax falling-maximum operator.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::OperatorConfig;
pub use error::{ConfigError, FmaxError};
pub use traits::{CompletionObserver, NoopObserver, Subscriber};
pub use types::{Completion, CompletionEvent, CompletionKind, Demand, OperatorState, Sample};
