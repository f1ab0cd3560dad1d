//! Frame -> DetectionResult pipeline around a scorer

use std::time::Instant;
use tracing::{debug, info};

use crate::{CandidateCatalog, DetectionError, DetectionResult, ScoreAggregator, Scorer, VideoFrame};

/// Activity detector: scorer plus aggregation over a fixed catalog
pub struct Detector<S: Scorer> {
    scorer: S,
    aggregator: ScoreAggregator,
    prepared: bool,
}

impl<S: Scorer> Detector<S> {
    /// Create a detector; the scorer is not touched until `prepare`
    pub fn new(scorer: S, catalog: CandidateCatalog) -> Self {
        info!("Creating detector with {} candidate descriptors", catalog.len());
        Self {
            scorer,
            aggregator: ScoreAggregator::new(catalog),
            prepared: false,
        }
    }

    /// Hand the catalog to the scorer. Safe to call more than once.
    pub fn prepare(&mut self) -> Result<(), DetectionError> {
        if self.prepared {
            debug!("Detector already prepared");
            return Ok(());
        }
        self.scorer.prepare_catalog(self.aggregator.catalog())?;
        self.prepared = true;
        info!("Candidate catalog prepared");
        Ok(())
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn catalog(&self) -> &CandidateCatalog {
        self.aggregator.catalog()
    }

    /// Classify one frame
    pub fn detect(&mut self, frame: &VideoFrame) -> Result<DetectionResult, DetectionError> {
        if !self.prepared {
            return Err(DetectionError::NotPrepared);
        }
        if !frame.is_well_formed() {
            return Err(DetectionError::InvalidFrame(format!(
                "frame #{} is {}x{} with {} bytes",
                frame.sequence,
                frame.width,
                frame.height,
                frame.data.len()
            )));
        }

        let start = Instant::now();
        let scores = self.scorer.score_frame(frame)?;
        let inference_ms = start.elapsed().as_secs_f64() * 1000.0;

        let mut result = self.aggregator.aggregate(&scores)?;
        result.inference_ms = inference_ms;

        debug!(
            "Frame #{}: {} (conf={:.2}, S={:.2} N={:.2} A={:.2}, {:.1}ms)",
            frame.sequence,
            result.status,
            result.confidence,
            result.studying_score,
            result.not_studying_score,
            result.absent_score,
            inference_ms
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, FrameScores, MockScorer};

    /// Scorer that counts how often the catalog was prepared
    struct CountingScorer {
        prepared: usize,
        values: Vec<f64>,
    }

    impl Scorer for CountingScorer {
        fn prepare_catalog(&mut self, _catalog: &CandidateCatalog) -> Result<(), DetectionError> {
            self.prepared += 1;
            Ok(())
        }

        fn score_frame(&mut self, _frame: &VideoFrame) -> Result<FrameScores, DetectionError> {
            Ok(FrameScores::new(self.values.clone()))
        }
    }

    fn frame() -> VideoFrame {
        VideoFrame::solid(4, 4, [0, 0, 0], 0, 7)
    }

    #[test]
    fn test_detect_before_prepare_fails() {
        let mut detector = Detector::new(MockScorer::constant(Category::Studying), CandidateCatalog::default());
        assert_eq!(detector.detect(&frame()), Err(DetectionError::NotPrepared));
    }

    #[test]
    fn test_prepare_runs_once() {
        let scorer = CountingScorer {
            prepared: 0,
            values: vec![0.0; 10],
        };
        let mut detector = Detector::new(scorer, CandidateCatalog::default());
        detector.prepare().unwrap();
        detector.prepare().unwrap();
        assert!(detector.is_prepared());
        assert_eq!(detector.scorer.prepared, 1);
    }

    #[test]
    fn test_detect_classifies() {
        let mut detector = Detector::new(MockScorer::constant(Category::Absent), CandidateCatalog::default());
        detector.prepare().unwrap();
        let result = detector.detect(&frame()).unwrap();
        assert_eq!(result.status, Category::Absent);
        assert_eq!(result.absent_score, 0.9);
        assert_eq!(result.scores.len(), 10);
        assert!(result.inference_ms >= 0.0);
    }

    #[test]
    fn test_short_score_vector_is_a_failed_cycle() {
        let scorer = CountingScorer {
            prepared: 0,
            values: vec![0.5; 3],
        };
        let mut detector = Detector::new(scorer, CandidateCatalog::default());
        detector.prepare().unwrap();
        assert!(matches!(
            detector.detect(&frame()),
            Err(DetectionError::ScoreCountMismatch { expected: 10, actual: 3 })
        ));
    }
}
