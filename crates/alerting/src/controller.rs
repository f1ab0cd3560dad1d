//! State transition -> dispatcher calls

use decision::StudyState;
use tracing::debug;

use crate::AlertDispatcher;

/// Applies the alert contract to state transitions:
/// entering ALERT_ACTIVE plays, entering STUDYING stops. Staying in
/// ALERT_ACTIVE ticks the dispatcher so a deferred alert can still go out.
pub struct AlertController<D: AlertDispatcher> {
    dispatcher: D,
}

impl<D: AlertDispatcher> AlertController<D> {
    pub fn new(dispatcher: D) -> Self {
        Self { dispatcher }
    }

    /// React to one engine step
    pub fn on_transition(&mut self, from: StudyState, to: StudyState) {
        if from == to {
            if to == StudyState::AlertActive {
                self.dispatcher.tick();
            }
            return;
        }
        match to {
            StudyState::AlertActive => {
                debug!("{} -> {}: play", from, to);
                self.dispatcher.play();
            }
            StudyState::Studying => {
                debug!("{} -> {}: stop", from, to);
                self.dispatcher.stop();
            }
            StudyState::Distracted => {}
        }
    }

    /// Stop regardless of state (manual reset, source change, shutdown)
    pub fn force_stop(&mut self) {
        self.dispatcher.stop();
    }

    /// Stop and drop the dispatcher's timing history
    pub fn reset(&mut self) {
        self.dispatcher.stop();
        self.dispatcher.reset();
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }
}
