//! Scorer interface and mock implementation

use tracing::{debug, info};

use crate::{CandidateCatalog, Category, DetectionError, VideoFrame};

/// Independent match probabilities, one per catalog descriptor, in catalog order
#[derive(Debug, Clone, PartialEq)]
pub struct FrameScores(Vec<f64>);

impl FrameScores {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }
}

/// Zero-shot frame scorer (e.g. a vision-language similarity model).
///
/// `prepare_catalog` must be called before `score_frame`; calling it again
/// with the same catalog must be harmless.
pub trait Scorer {
    /// Precompute whatever the scorer needs for the candidate texts
    fn prepare_catalog(&mut self, catalog: &CandidateCatalog) -> Result<(), DetectionError>;

    /// Score one frame against every descriptor of the prepared catalog
    fn score_frame(&mut self, frame: &VideoFrame) -> Result<FrameScores, DetectionError>;
}

impl<S: Scorer + ?Sized> Scorer for Box<S> {
    fn prepare_catalog(&mut self, catalog: &CandidateCatalog) -> Result<(), DetectionError> {
        (**self).prepare_catalog(catalog)
    }

    fn score_frame(&mut self, frame: &VideoFrame) -> Result<FrameScores, DetectionError> {
        (**self).score_frame(frame)
    }
}

/// Strong match given to descriptors of the scripted category
const MOCK_MATCH: f64 = 0.9;
/// Background score for every other descriptor
const MOCK_BACKGROUND: f64 = 0.1;

/// Scripted scorer for development and tests (no model).
///
/// Each frame is attributed to the next category of the script, cycling.
#[derive(Debug, Clone)]
pub struct MockScorer {
    script: Vec<Category>,
    cursor: usize,
    /// Category of each descriptor, set by `prepare_catalog`
    layout: Option<Vec<Category>>,
}

impl MockScorer {
    /// Create a scorer that cycles through `script`.
    /// An empty script behaves like `constant(Category::Studying)`.
    pub fn new(script: Vec<Category>) -> Self {
        let script = if script.is_empty() {
            vec![Category::Studying]
        } else {
            script
        };
        Self {
            script,
            cursor: 0,
            layout: None,
        }
    }

    /// Scorer that always reports the same category
    pub fn constant(category: Category) -> Self {
        Self::new(vec![category])
    }

    pub fn is_prepared(&self) -> bool {
        self.layout.is_some()
    }
}

impl Scorer for MockScorer {
    fn prepare_catalog(&mut self, catalog: &CandidateCatalog) -> Result<(), DetectionError> {
        if self.layout.is_some() {
            debug!("Mock scorer already prepared");
            return Ok(());
        }
        info!("Mock scorer prepared with {} descriptors", catalog.len());
        self.layout = Some(catalog.descriptors().iter().map(|d| d.category).collect());
        Ok(())
    }

    fn score_frame(&mut self, frame: &VideoFrame) -> Result<FrameScores, DetectionError> {
        let layout = self.layout.as_ref().ok_or(DetectionError::NotPrepared)?;
        if !frame.is_well_formed() {
            return Err(DetectionError::InvalidFrame(format!(
                "{}x{} frame with {} bytes",
                frame.width,
                frame.height,
                frame.data.len()
            )));
        }

        let target = self.script[self.cursor % self.script.len()];
        self.cursor = self.cursor.wrapping_add(1);

        let values = layout
            .iter()
            .map(|&category| {
                if category == target {
                    MOCK_MATCH
                } else {
                    MOCK_BACKGROUND
                }
            })
            .collect();
        Ok(FrameScores::new(values))
    }
}
