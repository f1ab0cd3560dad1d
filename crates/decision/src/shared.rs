//! Thread-safe handle around a decision engine

use detection::DetectionResult;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{Clock, DecisionEngine, EngineSnapshot, MonotonicClock, StudyState};

/// Shared decision engine.
///
/// `update` and `reset` are serialised by one lock, and readers only get
/// whole snapshots, so a state is never paired with another call's EMA.
pub struct SharedEngine<C: Clock = MonotonicClock> {
    inner: Arc<Mutex<DecisionEngine<C>>>,
}

impl<C: Clock> Clone for SharedEngine<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> SharedEngine<C> {
    pub fn new(engine: DecisionEngine<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    // A panic inside update leaves no half-applied state worth refusing.
    fn lock(&self) -> MutexGuard<'_, DecisionEngine<C>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Step the engine and return the resulting snapshot atomically
    pub fn update(&self, result: DetectionResult) -> EngineSnapshot {
        let mut engine = self.lock();
        engine.update(result);
        engine.snapshot()
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    pub fn state(&self) -> StudyState {
        self.lock().state()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        self.lock().snapshot()
    }
}
