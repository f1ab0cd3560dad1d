//! Decision engine configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::DecisionError;

/// EMA + state machine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// EMA weight of the newest ratio, in (0, 1] (higher = more reactive)
    pub ema_alpha: f64,

    /// Smoothed ratio at or above this counts as studying
    pub studying_threshold: f64,

    /// Seconds of sustained distraction before the alert fires
    pub distraction_timeout: f64,

    /// Seconds of good signal needed to leave DISTRACTED
    pub recovery_time: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            ema_alpha: 0.3,
            studying_threshold: 0.5,
            distraction_timeout: 30.0,
            recovery_time: 5.0,
        }
    }
}

impl DecisionConfig {
    /// Check every field, returning the first violation
    pub fn validate(&self) -> Result<(), DecisionError> {
        if !(self.ema_alpha > 0.0 && self.ema_alpha <= 1.0) {
            return Err(DecisionError::InvalidConfig {
                field: "ema_alpha",
                value: self.ema_alpha,
                expected: "0 < alpha <= 1",
            });
        }
        if !(0.0..=1.0).contains(&self.studying_threshold) {
            return Err(DecisionError::InvalidConfig {
                field: "studying_threshold",
                value: self.studying_threshold,
                expected: "0 <= threshold <= 1",
            });
        }
        for (field, value) in [
            ("distraction_timeout", self.distraction_timeout),
            ("recovery_time", self.recovery_time),
        ] {
            let representable = value >= 0.0 && Duration::try_from_secs_f64(value).is_ok();
            if !representable {
                return Err(DecisionError::InvalidConfig {
                    field,
                    value,
                    expected: "seconds >= 0 that fit in a Duration",
                });
            }
        }
        Ok(())
    }

    /// Values `validate` would reject saturate to `Duration::MAX`
    pub fn distraction_timeout(&self) -> Duration {
        seconds(self.distraction_timeout)
    }

    pub fn recovery_time(&self) -> Duration {
        seconds(self.recovery_time)
    }
}

fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(DecisionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_alpha_bounds() {
        let ok = DecisionConfig {
            ema_alpha: 1.0,
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        for alpha in [0.0, -0.1, 1.01, f64::NAN] {
            let config = DecisionConfig {
                ema_alpha: alpha,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(DecisionError::InvalidConfig { field: "ema_alpha", .. })
            ));
        }
    }

    #[test]
    fn test_threshold_bounds() {
        let config = DecisionConfig {
            studying_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_durations_rejected() {
        let config = DecisionConfig {
            recovery_time: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(DecisionError::InvalidConfig { field: "recovery_time", .. })
        ));

        let config = DecisionConfig {
            distraction_timeout: f64::INFINITY,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unrepresentable_duration_rejected() {
        for value in [1e20, f64::MAX] {
            let config = DecisionConfig {
                distraction_timeout: value,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(DecisionError::InvalidConfig { field: "distraction_timeout", .. })
            ));
            assert_eq!(config.distraction_timeout(), Duration::MAX);
        }

        let config = DecisionConfig {
            recovery_time: 1e20,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.recovery_time(), Duration::MAX);
    }

    #[test]
    fn test_durations() {
        let config = DecisionConfig::default();
        assert_eq!(config.distraction_timeout(), Duration::from_secs(30));
        assert_eq!(config.recovery_time(), Duration::from_secs(5));
    }
}
