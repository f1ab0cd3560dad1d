//! Exponential moving average over the studying ratio

/// Optimistic prior: the subject is assumed to start out studying
pub const INITIAL_EMA: f64 = 1.0;

/// EMA filter: `ema = alpha * r + (1 - alpha) * ema`
#[derive(Debug, Clone, PartialEq)]
pub struct EmaSmoother {
    alpha: f64,
    value: f64,
}

impl EmaSmoother {
    /// Create a smoother; `alpha` must already be validated to (0, 1]
    pub fn new(alpha: f64) -> Self {
        debug_assert!(alpha > 0.0 && alpha <= 1.0, "alpha must be in (0, 1]");
        Self {
            alpha,
            value: INITIAL_EMA,
        }
    }

    /// Feed one sample and return the new smoothed value
    pub fn update(&mut self, sample: f64) -> f64 {
        self.value = self.alpha * sample + (1.0 - self.alpha) * self.value;
        self.value
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Back to the optimistic prior
    pub fn reset(&mut self) {
        self.value = INITIAL_EMA;
    }
}
