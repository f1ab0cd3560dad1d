//! Alerting System
//!
//! Starts and stops the distraction alert as the study state changes,
//! with cooldown gating against repeated alerts.

mod controller;
mod cooldown;
mod dispatcher;

pub use controller::AlertController;
pub use cooldown::CooldownGate;
pub use dispatcher::{AlertDispatcher, LogDispatcher};

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors in alert configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlertError {
    #[error("{field} value {value} is out of range ({expected})")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// Alert configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Minimum seconds between two alerts (anti-spam)
    pub cooldown_seconds: f64,
    /// Playback volume (0.0 to 1.0)
    pub volume: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            cooldown_seconds: 60.0,
            volume: 0.8,
        }
    }
}

impl AlertConfig {
    pub fn validate(&self) -> Result<(), AlertError> {
        if !(self.cooldown_seconds.is_finite() && self.cooldown_seconds >= 0.0)
            || Duration::try_from_secs_f64(self.cooldown_seconds).is_err()
        {
            return Err(AlertError::InvalidConfig {
                field: "cooldown_seconds",
                value: self.cooldown_seconds,
                expected: "seconds >= 0 that fit in a Duration",
            });
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(AlertError::InvalidConfig {
                field: "volume",
                value: self.volume,
                expected: "0 <= volume <= 1",
            });
        }
        Ok(())
    }

    /// Cooldown window; saturates to `Duration::MAX` if out of range
    pub fn cooldown(&self) -> Duration {
        Duration::try_from_secs_f64(self.cooldown_seconds).unwrap_or(Duration::MAX)
    }
}
