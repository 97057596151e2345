//! Error types for the fmax operator.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: decay step must be at least 1, got {0}")] NonPositiveStep(i128),
    #[error("decay step {step} is not representable as {ty}")] StepOutOfRange { step: i64, ty: &'static str },
    #[error("invalid value for {var}: {reason}")] Env { var: String, reason: String },
}

#[derive(Error, Debug)]
pub enum FmaxError {
    #[error(transparent)] Config(#[from] ConfigError),
    #[error("config file: {0}")] ConfigFile(String),
    #[error("io: {0}")] Io(#[from] std::io::Error),
}
