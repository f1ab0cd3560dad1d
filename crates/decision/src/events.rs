//! Structured decision events and observers

use detection::Category;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::StudyState;

/// Something the decision engine reports about a cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DecisionEvent {
    /// Per-update score snapshot
    Snapshot {
        status: Category,
        ratio: f64,
        ema: f64,
        state: StudyState,
    },
    /// The state machine moved to a different state
    Transition {
        from: StudyState,
        to: StudyState,
        ema: f64,
        time_in_previous: Duration,
    },
    /// Manual reset to the baseline
    Reset { from: StudyState },
}

/// Receives decision events as they happen
pub trait DecisionObserver: Send {
    fn on_event(&mut self, event: &DecisionEvent);
}

/// Default observer: forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DecisionObserver for TracingObserver {
    fn on_event(&mut self, event: &DecisionEvent) {
        match event {
            DecisionEvent::Snapshot {
                status,
                ratio,
                ema,
                state,
            } => {
                debug!(
                    "Detection {} ratio={:.2} EMA={:.2} state={}",
                    status, ratio, ema, state
                );
            }
            DecisionEvent::Transition {
                from,
                to,
                ema,
                time_in_previous,
            } => {
                info!(
                    "State: {} -> {} (EMA={:.2}, after {:.1}s)",
                    from,
                    to,
                    ema,
                    time_in_previous.as_secs_f64()
                );
            }
            DecisionEvent::Reset { from } => {
                info!("Decision engine reset (was {})", from);
            }
        }
    }
}

impl<F> DecisionObserver for F
where
    F: FnMut(&DecisionEvent) + Send,
{
    fn on_event(&mut self, event: &DecisionEvent) {
        self(event)
    }
}
