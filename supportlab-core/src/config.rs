//! Serializable run configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

fn default_session_length() -> i64 {
    24
}

fn default_plausibility_ratio() -> f64 {
    0.5
}

/// Configuration for one evaluation run.
///
/// Everything the engine needs is passed in explicitly — there are no
/// module-level constants, so several configurations can run side by side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Local hour-of-day (0–23) that anchors session boundaries.
    pub anchor_hour: u32,
    /// Whole-hour shift from the source clock to the local clock.
    pub utc_offset_hours: i64,
    /// Session length in hours; pairs with any other spacing are dropped.
    #[serde(default = "default_session_length")]
    pub session_length_hours: i64,
    /// Plausibility filter width as a fraction of the reference price.
    #[serde(default = "default_plausibility_ratio")]
    pub plausibility_ratio: f64,
    /// Instruments to process, in output order.
    pub instruments: Vec<String>,
    /// Single-support backtest mode: the indicator to validate.
    #[serde(default)]
    pub indicator: Option<String>,
    /// Scan mode: explicit candidate list. When omitted, candidates are
    /// derived from the data's indicator columns by name classification.
    #[serde(default)]
    pub candidates: Option<Vec<String>>,
}

impl RunConfig {
    /// Check the configuration for values the engine cannot work with.
    ///
    /// Malformed configuration is the one class of problem that propagates
    /// as a hard failure; per-session data anomalies never do.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.anchor_hour > 23 {
            return Err(ConfigError::AnchorHourOutOfRange(self.anchor_hour));
        }
        if self.session_length_hours < 1 {
            return Err(ConfigError::SessionLengthTooShort(self.session_length_hours));
        }
        if !self.plausibility_ratio.is_finite() || self.plausibility_ratio <= 0.0 {
            return Err(ConfigError::BadPlausibilityRatio(self.plausibility_ratio));
        }
        if self.instruments.is_empty() {
            return Err(ConfigError::NoInstruments);
        }
        Ok(())
    }

    /// The configured session length as a `chrono::Duration`.
    pub fn session_length(&self) -> Duration {
        Duration::hours(self.session_length_hours)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("anchor_hour must be within 0..=23, got {0}")]
    AnchorHourOutOfRange(u32),

    #[error("session_length_hours must be at least 1, got {0}")]
    SessionLengthTooShort(i64),

    #[error("plausibility_ratio must be finite and positive, got {0}")]
    BadPlausibilityRatio(f64),

    #[error("instrument list is empty")]
    NoInstruments,
}
