//! Study Decision Engine
//!
//! Converts the noisy per-frame signal into a stable behavioral state:
//! - Studying ratio from category scores
//! - EMA smoothing
//! - 3-state machine with time-based hysteresis
//! - Injectable clock and event observer

pub mod clock;
pub mod config;
pub mod engine;
pub mod events;
pub mod ratio;
pub mod shared;
pub mod smoother;
pub mod state;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::DecisionConfig;
pub use engine::{DecisionEngine, EngineSnapshot};
pub use events::{DecisionEvent, DecisionObserver, TracingObserver};
pub use ratio::studying_ratio;
pub use shared::SharedEngine;
pub use smoother::EmaSmoother;
pub use state::{next_state, StudyState};

use thiserror::Error;

/// Decision engine error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecisionError {
    #[error("{field} value {value} is out of range ({expected})")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}
