//! Monitoring cycle driver

use alerting::{AlertController, AlertDispatcher};
use decision::{Clock, DecisionEngine, EngineSnapshot, MonotonicClock, StudyState};
use detection::{Detector, Scorer, VideoFrame};
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::{FrameSource, MonitorError};

/// What happened in one monitoring cycle
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// The engine was stepped
    Updated {
        previous: StudyState,
        state: StudyState,
        ema: f64,
    },
    /// Detection is paused; nothing was captured
    Paused,
    /// Capture or scoring failed; the engine was left untouched
    Failed(String),
}

impl CycleOutcome {
    /// Whether the cycle changed state
    pub fn transitioned(&self) -> bool {
        matches!(self, CycleOutcome::Updated { previous, state, .. } if previous != state)
    }
}

/// Single-subject study monitor
pub struct Monitor<S: Scorer, D: AlertDispatcher, C: Clock = MonotonicClock> {
    detector: Detector<S>,
    engine: DecisionEngine<C>,
    alerts: AlertController<D>,
    paused: bool,
    cycles: u64,
    consecutive_failures: u32,
}

impl<S: Scorer, D: AlertDispatcher, C: Clock> Monitor<S, D, C> {
    /// Assemble the monitor and prepare the detector's catalog
    pub fn new(
        mut detector: Detector<S>,
        engine: DecisionEngine<C>,
        dispatcher: D,
    ) -> Result<Self, MonitorError> {
        detector.prepare()?;
        Ok(Self {
            detector,
            engine,
            alerts: AlertController::new(dispatcher),
            paused: false,
            cycles: 0,
            consecutive_failures: 0,
        })
    }

    /// Capture one frame from `source` and process it
    pub fn run_cycle<F: FrameSource + ?Sized>(&mut self, source: &mut F) -> CycleOutcome {
        if self.paused {
            return CycleOutcome::Paused;
        }
        match source.next_frame() {
            Ok(frame) => self.process_frame(&frame),
            Err(e) => self.fail(e.to_string()),
        }
    }

    /// Run detection and decision on an already captured frame
    pub fn process_frame(&mut self, frame: &VideoFrame) -> CycleOutcome {
        if self.paused {
            return CycleOutcome::Paused;
        }

        let result = match self.detector.detect(frame) {
            Ok(result) => result,
            Err(e) => return self.fail(e.to_string()),
        };

        self.cycles += 1;
        self.consecutive_failures = 0;

        let previous = self.engine.state();
        let state = self.engine.update(result);
        self.alerts.on_transition(previous, state);

        CycleOutcome::Updated {
            previous,
            state,
            ema: self.engine.ema(),
        }
    }

    fn fail(&mut self, reason: String) -> CycleOutcome {
        self.consecutive_failures += 1;
        warn!(
            "Monitoring cycle skipped ({} in a row): {}",
            self.consecutive_failures, reason
        );
        CycleOutcome::Failed(reason)
    }

    /// Manual override: back to STUDYING, silence the alert and reopen
    /// any cooldown
    pub fn reset(&mut self) {
        self.engine.reset();
        self.alerts.reset();
        info!("Manual reset triggered");
    }

    /// The input changed (e.g. another camera); old history no longer applies
    pub fn on_source_changed(&mut self, description: &str) {
        self.engine.reset();
        self.alerts.force_stop();
        info!("Switched to source {}", description);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            info!("Detection {}", if paused { "PAUSED" } else { "RESUMED" });
        }
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop any running alert before exiting
    pub fn shutdown(&mut self) {
        self.alerts.force_stop();
        info!("Monitor stopped after {} cycles", self.cycles);
    }

    pub fn state(&self) -> StudyState {
        self.engine.state()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        self.engine.snapshot()
    }

    /// Current snapshot as a JSON document
    pub fn status_json(&self) -> Result<String, MonitorError> {
        Ok(serde_json::to_string(&self.engine.snapshot())?)
    }

    pub fn engine(&self) -> &DecisionEngine<C> {
        &self.engine
    }

    pub fn dispatcher(&self) -> &D {
        self.alerts.dispatcher()
    }

    /// Successful cycles so far
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }
}

/// How a `run_loop` ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub failed: u64,
    /// True if the loop ended because of repeated failures
    pub gave_up: bool,
}

/// Run one cycle per `period` until `shutdown` resolves or
/// `max_consecutive_failures` cycles fail in a row.
pub async fn run_loop<S, D, C, F, Fut>(
    monitor: &mut Monitor<S, D, C>,
    source: &mut F,
    period: Duration,
    max_consecutive_failures: u32,
    shutdown: Fut,
) -> RunSummary
where
    S: Scorer,
    D: AlertDispatcher,
    C: Clock,
    F: FrameSource + ?Sized,
    Fut: Future<Output = ()>,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut summary = RunSummary {
        ticks: 0,
        failed: 0,
        gave_up: false,
    };

    info!(
        "Main loop started on {} (every {:.1}s)",
        source.describe(),
        period.as_secs_f64()
    );

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
            _ = ticker.tick() => {
                summary.ticks += 1;
                let outcome = monitor.run_cycle(source);
                debug!("Cycle {}: {:?}", summary.ticks, outcome);
                if matches!(outcome, CycleOutcome::Failed(_)) {
                    summary.failed += 1;
                    if monitor.consecutive_failures() >= max_consecutive_failures {
                        error!(
                            "{} consecutive failed cycles, giving up",
                            monitor.consecutive_failures()
                        );
                        summary.gave_up = true;
                        break;
                    }
                }
            }
        }
    }

    monitor.shutdown();
    summary
}
