//! Application configuration

use alerting::AlertConfig;
use config::{Config, Environment, File, FileFormat};
use decision::DecisionConfig;
use detection::{CandidateCatalog, Category, CategoryCandidates};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::MonitorError;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "studywatch.toml";

/// Environment prefix, e.g. `STUDYWATCH__DECISION__EMA_ALPHA=0.5`
pub const ENV_PREFIX: &str = "STUDYWATCH";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// One block of the mock scorer's script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub category: Category,
    pub frames: usize,
}

/// Scripted behaviour for the mock scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    pub script: Vec<ScriptStep>,
}

impl Default for MockConfig {
    fn default() -> Self {
        let step = |category, frames| ScriptStep { category, frames };
        Self {
            script: vec![
                step(Category::Studying, 10),
                step(Category::NotStudying, 45),
                step(Category::Studying, 15),
                step(Category::Absent, 10),
            ],
        }
    }
}

impl MockConfig {
    /// Flatten the script into one category per frame
    pub fn expand(&self) -> Vec<Category> {
        self.script
            .iter()
            .flat_map(|step| std::iter::repeat(step.category).take(step.frames))
            .collect()
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seconds between analysed frames
    pub capture_interval: f64,
    /// Failed cycles in a row before the monitor gives up
    pub max_consecutive_failures: u32,
    /// Text candidates for zero-shot classification
    pub detector: CategoryCandidates,
    pub decision: DecisionConfig,
    pub alert: AlertConfig,
    pub mock: MockConfig,
    /// Logging level: TRACE, DEBUG, INFO, WARN, ERROR
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            capture_interval: 1.0,
            max_consecutive_failures: 30,
            detector: CategoryCandidates::default(),
            decision: DecisionConfig::default(),
            alert: AlertConfig::default(),
            mock: MockConfig::default(),
            log_level: "INFO".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Load defaults, then the TOML file, then `STUDYWATCH__*` variables.
    ///
    /// Without an explicit path, `./studywatch.toml` is used if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self, MonitorError> {
        let mut builder = Config::builder();

        match path {
            Some(path) => {
                info!("Loading config from {}", path.display());
                builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
            }
            None => {
                builder = builder.add_source(
                    File::from(Path::new(DEFAULT_CONFIG_FILE))
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section; run before any monitoring cycle
    pub fn validate(&self) -> Result<(), MonitorError> {
        if !(0.5..=30.0).contains(&self.capture_interval) {
            return Err(MonitorError::Config(format!(
                "capture_interval {} is out of range (0.5 to 30 seconds)",
                self.capture_interval
            )));
        }
        if self.max_consecutive_failures == 0 {
            return Err(MonitorError::Config(
                "max_consecutive_failures must be at least 1".to_string(),
            ));
        }
        CandidateCatalog::new(&self.detector)?;
        self.decision.validate()?;
        self.alert.validate()?;
        Ok(())
    }

    pub fn capture_interval(&self) -> Duration {
        Duration::from_secs_f64(self.capture_interval)
    }
}
