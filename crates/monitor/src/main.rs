//! StudyWatch - Main Entry Point

use alerting::{CooldownGate, LogDispatcher};
use decision::DecisionEngine;
use detection::{CandidateCatalog, Detector, MockScorer};
use monitor::{init_logging, run_loop, AppConfig, FrameSource, Monitor, SyntheticSource};
use std::path::PathBuf;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var_os("STUDYWATCH_CONFIG").map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;
    init_logging(&config.log_level, config.log_format)?;

    info!("=== StudyWatch v{} ===", env!("CARGO_PKG_VERSION"));

    let catalog = CandidateCatalog::new(&config.detector)?;
    let script = config.mock.expand();
    if script.is_empty() {
        warn!("Mock script is empty, every frame will read as studying");
    }
    let detector = Detector::new(MockScorer::new(script), catalog);

    let engine = DecisionEngine::new(config.decision.clone())?;
    let dispatcher = CooldownGate::new(LogDispatcher::new(config.alert.volume), &config.alert);
    let mut monitor = Monitor::new(detector, engine, dispatcher)?;

    let mut source = SyntheticSource::new(640, 480);
    info!("Using frame source: {}", source.describe());

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Could not listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let summary = run_loop(
        &mut monitor,
        &mut source,
        config.capture_interval(),
        config.max_consecutive_failures,
        shutdown,
    )
    .await;

    info!(
        "Stopped: {} ticks, {} failed, final state {}",
        summary.ticks,
        summary.failed,
        monitor.state()
    );
    match monitor.status_json() {
        Ok(status) => info!("Final status: {}", status),
        Err(e) => warn!("Could not serialize final status: {}", e),
    }
    if summary.gave_up {
        anyhow::bail!("too many consecutive failed cycles");
    }
    Ok(())
}
