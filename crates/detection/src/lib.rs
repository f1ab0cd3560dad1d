//! Study Activity Detection
//!
//! Turns webcam frames into per-category evidence using a zero-shot scorer:
//! - Candidate catalog (text descriptors grouped by category)
//! - Pluggable scorer interface
//! - Max-per-category score aggregation
//! - Detection results consumed by the decision engine

pub mod aggregator;
pub mod catalog;
pub mod detector;
pub mod frame;
pub mod result;
pub mod scorer;

pub use aggregator::ScoreAggregator;
pub use catalog::{CandidateCatalog, Category, CategoryCandidates, Descriptor};
pub use detector::Detector;
pub use frame::VideoFrame;
pub use result::DetectionResult;
pub use scorer::{FrameScores, MockScorer, Scorer};

use thiserror::Error;

/// Detection error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionError {
    #[error("Category {0} has no candidate descriptors")]
    EmptyCategory(Category),

    #[error("Blank descriptor in category {0}")]
    BlankDescriptor(Category),

    #[error("Descriptor {0:?} appears more than once")]
    DuplicateDescriptor(String),

    #[error("Scorer used before the candidate catalog was prepared")]
    NotPrepared,

    #[error("Scorer returned {actual} scores, catalog has {expected} descriptors")]
    ScoreCountMismatch { expected: usize, actual: usize },

    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Scoring failed: {0}")]
    Scoring(String),
}
