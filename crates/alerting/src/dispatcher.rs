//! Alert dispatcher interface

use tracing::{info, warn};

/// Starts and stops the alert action (audio, notification, ...)
pub trait AlertDispatcher {
    /// Start the alert
    fn play(&mut self);

    /// Stop the alert if it is running; harmless otherwise
    fn stop(&mut self);

    /// Called on every cycle that stays in ALERT_ACTIVE
    fn tick(&mut self) {}

    /// Forget timing history (manual reset)
    fn reset(&mut self) {}
}

impl<D: AlertDispatcher + ?Sized> AlertDispatcher for Box<D> {
    fn play(&mut self) {
        (**self).play()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn tick(&mut self) {
        (**self).tick()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// Dispatcher that only reports through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LogDispatcher {
    volume: f64,
    playing: bool,
    plays: usize,
}

impl LogDispatcher {
    pub fn new(volume: f64) -> Self {
        Self {
            volume,
            playing: false,
            plays: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Number of alerts started so far
    pub fn plays(&self) -> usize {
        self.plays
    }
}

impl AlertDispatcher for LogDispatcher {
    fn play(&mut self) {
        self.playing = true;
        self.plays += 1;
        warn!("ALERT: distraction alert started (volume {:.0}%)", self.volume * 100.0);
    }

    fn stop(&mut self) {
        if self.playing {
            self.playing = false;
            info!("Distraction alert stopped");
        }
    }
}
