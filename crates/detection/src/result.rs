//! Per-cycle detection result

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::Category;

/// Result of classifying one frame.
///
/// Built fresh by the aggregator each cycle and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Winning category
    pub status: Category,
    /// Score of the winning category
    pub confidence: f64,
    /// Best match among studying descriptors (0-1)
    pub studying_score: f64,
    /// Best match among not-studying descriptors (0-1)
    pub not_studying_score: f64,
    /// Best match among absent descriptors (0-1)
    pub absent_score: f64,
    /// Score of every descriptor, keyed by descriptor text
    pub scores: HashMap<String, f64>,
    /// Time spent scoring the frame (milliseconds)
    pub inference_ms: f64,
}

impl DetectionResult {
    /// Build a result straight from category scores, with no descriptor detail.
    ///
    /// The label is picked with the same priority tie-break as the aggregator.
    pub fn from_category_scores(studying: f64, not_studying: f64, absent: f64) -> Self {
        let mut result = Self {
            status: Category::Studying,
            confidence: 0.0,
            studying_score: studying,
            not_studying_score: not_studying,
            absent_score: absent,
            scores: HashMap::new(),
            inference_ms: 0.0,
        };
        let (status, confidence) = result.winner();
        result.status = status;
        result.confidence = confidence;
        result
    }

    /// Aggregated score for a category
    pub fn category_score(&self, category: Category) -> f64 {
        match category {
            Category::Studying => self.studying_score,
            Category::NotStudying => self.not_studying_score,
            Category::Absent => self.absent_score,
        }
    }

    /// Highest-scoring category; exact ties resolve in `Category::PRIORITY` order
    pub(crate) fn winner(&self) -> (Category, f64) {
        let mut best = (Category::Studying, self.studying_score);
        for category in &Category::PRIORITY[1..] {
            let score = self.category_score(*category);
            if score > best.1 {
                best = (*category, score);
            }
        }
        best
    }
}
