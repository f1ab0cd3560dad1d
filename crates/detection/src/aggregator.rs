//! Descriptor scores -> category scores

use std::collections::HashMap;
use tracing::warn;

use crate::{CandidateCatalog, Category, DetectionError, DetectionResult, FrameScores};

/// Groups per-descriptor probabilities into the three category scores.
///
/// A category scores the maximum of its descriptors, so one strong match is
/// enough evidence on its own.
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    catalog: CandidateCatalog,
}

impl ScoreAggregator {
    pub fn new(catalog: CandidateCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CandidateCatalog {
        &self.catalog
    }

    /// Aggregate one frame's scores.
    ///
    /// Values outside [0, 1] (and NaN) are clamped and logged rather than
    /// rejected; a score vector that does not cover the catalog is rejected.
    pub fn aggregate(&self, frame_scores: &FrameScores) -> Result<DetectionResult, DetectionError> {
        let raw = frame_scores.values();
        if raw.len() != self.catalog.len() {
            return Err(DetectionError::ScoreCountMismatch {
                expected: self.catalog.len(),
                actual: raw.len(),
            });
        }

        let clamped: Vec<f64> = raw
            .iter()
            .zip(self.catalog.descriptors())
            .map(|(&score, descriptor)| {
                let sanitized = sanitize(score);
                if sanitized != score {
                    warn!(
                        "Scorer returned {} for \"{}\", clamped to {}",
                        score, descriptor.text, sanitized
                    );
                }
                sanitized
            })
            .collect();

        let category_max = |category: Category| {
            self.catalog
                .indices(category)
                .iter()
                .map(|&i| clamped[i])
                .fold(0.0_f64, f64::max)
        };

        let scores: HashMap<String, f64> = self
            .catalog
            .texts()
            .zip(clamped.iter())
            .map(|(text, &score)| (text.to_string(), score))
            .collect();

        let mut result = DetectionResult::from_category_scores(
            category_max(Category::Studying),
            category_max(Category::NotStudying),
            category_max(Category::Absent),
        );
        result.scores = scores;
        Ok(result)
    }
}

fn sanitize(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}
