//! Driver configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating a [`DriverConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse driver config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Time scale must be finite and positive, got {0}")]
    InvalidTimeScale(f32),
}

/// Tunables for a [`Driver`](crate::driver::Driver).
///
/// Missing fields take their defaults when deserializing.
///
/// # Example
///
/// ```rust
/// use phasechain::driver::DriverConfig;
///
/// let config = DriverConfig::from_json(r#"{ "history_limit": 32 }"#).unwrap();
/// assert_eq!(config.history_limit, Some(32));
/// assert!(config.record_history);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Emit a debug event for each transition
    pub log_transitions: bool,
    /// Keep a [`ChainHistory`](crate::core::ChainHistory) of transitions
    pub record_history: bool,
    /// Maximum number of retained transitions
    pub history_limit: Option<usize>,
    /// Multiplier applied to every tick delta
    pub time_scale: f32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            log_transitions: true,
            record_history: true,
            history_limit: None,
            time_scale: 1.0,
        }
    }
}

impl DriverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log_transitions(mut self, enabled: bool) -> Self {
        self.log_transitions = enabled;
        self
    }

    pub fn record_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    pub fn time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale;
        self
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time_scale.is_finite() && self.time_scale > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidTimeScale(self.time_scale))
        }
    }
}
