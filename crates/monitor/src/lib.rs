//! Study Monitor
//!
//! Drives one monitoring cycle per captured frame:
//! frame -> detector -> decision engine -> alert dispatch.

pub mod monitor;
pub mod settings;
pub mod source;

pub use monitor::{run_loop, CycleOutcome, Monitor, RunSummary};
pub use settings::{AppConfig, LogFormat, MockConfig, ScriptStep};
pub use source::{FrameSource, SyntheticSource};

use alerting::AlertError;
use decision::DecisionError;
use detection::DetectionError;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Monitor error types
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Detection(#[from] DetectionError),

    #[error(transparent)]
    Decision(#[from] DecisionError),

    #[error(transparent)]
    Alert(#[from] AlertError),

    #[error("Frame source failed: {0}")]
    Source(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<config::ConfigError> for MonitorError {
    fn from(e: config::ConfigError) -> Self {
        MonitorError::Config(e.to_string())
    }
}

/// Initialize logging
pub fn init_logging(level: &str, format: LogFormat) -> Result<(), MonitorError> {
    let level: Level = level
        .parse()
        .map_err(|_| MonitorError::Config(format!("unknown log level {:?}", level)))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = match format {
        LogFormat::Pretty => tracing::subscriber::set_global_default(builder.finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    };
    result.map_err(|e| MonitorError::Logging(e.to_string()))
}
