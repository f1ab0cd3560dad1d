//! Study state machine transition table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::DecisionConfig;

/// Study monitor state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudyState {
    /// Smoothed signal says the subject is studying
    #[default]
    Studying,
    /// Below threshold; not yet long enough to alert, or recovering
    Distracted,
    /// Sustained distraction, alert should be running
    AlertActive,
}

impl StudyState {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            StudyState::Studying => "STUDYING",
            StudyState::Distracted => "DISTRACTED",
            StudyState::AlertActive => "ALERT_ACTIVE",
        }
    }
}

impl fmt::Display for StudyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Next state given the current one, whether the smoothed ratio counts as
/// studying, and how long the machine has been in `state`.
///
/// Entry into DISTRACTED and exit from ALERT_ACTIVE are immediate; leaving
/// DISTRACTED takes `recovery_time` of good signal (back to STUDYING) or
/// `distraction_timeout` of bad signal (on to ALERT_ACTIVE).
pub fn next_state(
    state: StudyState,
    is_studying: bool,
    elapsed: Duration,
    config: &DecisionConfig,
) -> StudyState {
    use StudyState::*;

    match (state, is_studying) {
        (Studying, false) => Distracted,
        (Studying, true) => Studying,
        (Distracted, true) if elapsed >= config.recovery_time() => Studying,
        (Distracted, true) => Distracted,
        (Distracted, false) if elapsed >= config.distraction_timeout() => AlertActive,
        (Distracted, false) => Distracted,
        (AlertActive, true) => Studying,
        (AlertActive, false) => AlertActive,
    }
}
