//! Operator configuration.
//!
//! Provides [`OperatorConfig`] with a default decay step of 1. The step can
//! be set programmatically, loaded from a JSON file, or overridden through
//! the `FMAX_DECAY_STEP` environment variable.

use std::path::Path;

use num_traits::NumCast;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, FmaxError};
use crate::types::Sample;

/// Environment variable overriding [`OperatorConfig::decay_step`].
pub const DECAY_STEP_ENV: &str = "FMAX_DECAY_STEP";

/// Default amount subtracted per non-climbing input or drain tick.
pub const DEFAULT_DECAY_STEP: i64 = 1;

/// Configuration for a falling-max operator instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    /// Amount the running maximum falls by when an input does not exceed it.
    pub decay_step: i64,
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            decay_step: DEFAULT_DECAY_STEP,
        }
    }
}

impl OperatorConfig {
    pub fn with_decay_step(decay_step: i64) -> Self {
        Self { decay_step }
    }

    /// Reject a non-positive step. The value is never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decay_step < 1 {
            return Err(ConfigError::NonPositiveStep(self.decay_step as i128));
        }
        Ok(())
    }

    /// The validated step converted into the operator's sample type.
    pub fn decay_step_as<T: Sample>(&self) -> Result<T, ConfigError> {
        self.validate()?;
        <T as NumCast>::from(self.decay_step).ok_or(ConfigError::StepOutOfRange {
            step: self.decay_step,
            ty: T::type_name(),
        })
    }

    /// Default configuration with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(DECAY_STEP_ENV) {
            self.decay_step = raw.trim().parse().map_err(|e| ConfigError::Env {
                var: DECAY_STEP_ENV.to_string(),
                reason: format!("{e}"),
            })?;
        }
        Ok(self)
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, FmaxError> {
        let raw = std::fs::read_to_string(path)?;
        let cfg: Self =
            serde_json::from_str(&raw).map_err(|e| FmaxError::ConfigFile(e.to_string()))?;
        Ok(cfg)
    }
}
