//! Cooldown gating for repeated alerts

use decision::{Clock, MonotonicClock};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::{AlertConfig, AlertDispatcher};

/// Dispatcher wrapper that holds back a `play` arriving within the cooldown
/// of the previous accepted one. The held alert goes out on the first
/// `tick` after the cooldown expires, unless a `stop` cancels it first.
/// `stop` always passes through.
pub struct CooldownGate<D: AlertDispatcher, C: Clock = MonotonicClock> {
    inner: D,
    clock: C,
    cooldown: Duration,
    /// Last time an alert was let through
    last_fired: Option<Instant>,
    /// A `play` is waiting for the cooldown to expire
    pending: bool,
    /// Number of alerts let through
    fire_count: usize,
    /// Number of alerts dropped by the cooldown
    suppressed: usize,
}

impl<D: AlertDispatcher> CooldownGate<D, MonotonicClock> {
    pub fn new(inner: D, config: &AlertConfig) -> Self {
        Self::with_clock(inner, config, MonotonicClock)
    }
}

impl<D: AlertDispatcher, C: Clock> CooldownGate<D, C> {
    pub fn with_clock(inner: D, config: &AlertConfig, clock: C) -> Self {
        info!("Creating alert cooldown gate ({}s)", config.cooldown_seconds);
        Self {
            inner,
            clock,
            cooldown: config.cooldown(),
            last_fired: None,
            pending: false,
            fire_count: 0,
            suppressed: 0,
        }
    }

    /// Whether a `play` right now would go through
    pub fn should_fire(&self) -> bool {
        match self.last_fired {
            Some(at) => self.clock.now().saturating_duration_since(at) >= self.cooldown,
            None => true,
        }
    }

    pub fn fire_count(&self) -> usize {
        self.fire_count
    }

    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    /// Whether an alert is held back by the cooldown
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    fn fire(&mut self) {
        self.pending = false;
        self.last_fired = Some(self.clock.now());
        self.fire_count += 1;
        info!("Alert fired (count: {})", self.fire_count);
        self.inner.play();
    }
}

impl<D: AlertDispatcher, C: Clock> AlertDispatcher for CooldownGate<D, C> {
    fn play(&mut self) {
        if self.should_fire() {
            self.fire();
        } else if !self.pending {
            self.pending = true;
            self.suppressed += 1;
            debug!("Alert deferred: in cooldown period");
        }
    }

    fn stop(&mut self) {
        if self.pending {
            debug!("Deferred alert cancelled");
        }
        self.pending = false;
        self.inner.stop();
    }

    fn tick(&mut self) {
        if self.pending && self.should_fire() {
            self.fire();
        }
        self.inner.tick();
    }

    /// Forget the last alert time and any held alert
    fn reset(&mut self) {
        self.last_fired = None;
        self.pending = false;
        self.inner.reset();
    }
}
