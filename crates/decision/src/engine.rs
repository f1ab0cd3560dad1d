//! EMA + FSM decision engine

use detection::DetectionResult;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::info;

use crate::{
    next_state, studying_ratio, Clock, DecisionConfig, DecisionError, DecisionEvent,
    DecisionObserver, EmaSmoother, MonotonicClock, StudyState, TracingObserver,
};

/// Everything an observer of the engine may want, read together
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSnapshot {
    pub state: StudyState,
    pub ema: f64,
    pub time_in_state: Duration,
    /// Remaining time before the alert fires, while distracted
    pub time_until_alert: Option<Duration>,
    pub last_result: Option<DetectionResult>,
}

/// Decision engine for one monitored subject.
///
/// Smooths the studying ratio with an EMA, then runs a state machine with
/// time-based hysteresis. Driven entirely by `update` calls; no timers.
pub struct DecisionEngine<C: Clock = MonotonicClock> {
    config: DecisionConfig,
    clock: C,
    smoother: EmaSmoother,
    state: StudyState,
    state_entered_at: Instant,
    last_result: Option<DetectionResult>,
    observer: Box<dyn DecisionObserver>,
}

impl DecisionEngine<MonotonicClock> {
    /// Create an engine on the real clock
    pub fn new(config: DecisionConfig) -> Result<Self, DecisionError> {
        Self::with_clock(config, MonotonicClock)
    }
}

impl<C: Clock> DecisionEngine<C> {
    /// Create an engine on a custom clock. Fails on invalid configuration.
    pub fn with_clock(config: DecisionConfig, clock: C) -> Result<Self, DecisionError> {
        config.validate()?;
        info!(
            "Creating decision engine (alpha={}, threshold={}, timeout={}s, recovery={}s)",
            config.ema_alpha,
            config.studying_threshold,
            config.distraction_timeout,
            config.recovery_time
        );
        let now = clock.now();
        Ok(Self {
            smoother: EmaSmoother::new(config.ema_alpha),
            config,
            clock,
            state: StudyState::Studying,
            state_entered_at: now,
            last_result: None,
            observer: Box::new(TracingObserver),
        })
    }

    /// Replace the event observer
    pub fn with_observer(mut self, observer: impl DecisionObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Process one detection and step the state machine
    pub fn update(&mut self, result: DetectionResult) -> StudyState {
        let ratio = studying_ratio(&result);
        let ema = self.smoother.update(ratio);
        let is_studying = ema >= self.config.studying_threshold;

        let now = self.clock.now();
        let time_in_state = now.saturating_duration_since(self.state_entered_at);

        self.observer.on_event(&DecisionEvent::Snapshot {
            status: result.status,
            ratio,
            ema,
            state: self.state,
        });
        self.last_result = Some(result);

        let next = next_state(self.state, is_studying, time_in_state, &self.config);
        if next != self.state {
            let from = self.state;
            self.state = next;
            self.state_entered_at = now;
            self.observer.on_event(&DecisionEvent::Transition {
                from,
                to: next,
                ema,
                time_in_previous: time_in_state,
            });
        }

        self.state
    }

    /// Drop all history and go back to STUDYING with the optimistic prior
    pub fn reset(&mut self) {
        let from = self.state;
        self.state = StudyState::Studying;
        self.smoother.reset();
        self.state_entered_at = self.clock.now();
        self.last_result = None;
        self.observer.on_event(&DecisionEvent::Reset { from });
    }

    pub fn state(&self) -> StudyState {
        self.state
    }

    /// Current smoothed studying ratio
    pub fn ema(&self) -> f64 {
        self.smoother.value()
    }

    pub fn time_in_state(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.state_entered_at)
    }

    pub fn last_result(&self) -> Option<&DetectionResult> {
        self.last_result.as_ref()
    }

    /// Time left before DISTRACTED escalates, if the signal stays bad.
    /// `None` outside DISTRACTED or while recovering.
    pub fn time_until_alert(&self) -> Option<Duration> {
        if self.state != StudyState::Distracted || self.ema() >= self.config.studying_threshold {
            return None;
        }
        Some(
            self.config
                .distraction_timeout()
                .saturating_sub(self.time_in_state()),
        )
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Consistent view of state, EMA, timing and last result
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            state: self.state,
            ema: self.ema(),
            time_in_state: self.time_in_state(),
            time_until_alert: self.time_until_alert(),
            last_result: self.last_result.clone(),
        }
    }
}
