//! Candidate descriptors and their categories

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::DetectionError;

/// Behavioral category a descriptor belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Subject is studying / working
    Studying,
    /// Subject is present but not studying
    NotStudying,
    /// Nobody is in front of the camera
    Absent,
}

impl Category {
    /// Tie-break order: an exact tie goes to the category listed first
    pub const PRIORITY: [Category; 3] = [Category::Studying, Category::NotStudying, Category::Absent];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Studying => "studying",
            Category::NotStudying => "not_studying",
            Category::Absent => "absent",
        }
    }

    fn slot(&self) -> usize {
        match self {
            Category::Studying => 0,
            Category::NotStudying => 1,
            Category::Absent => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configured text candidates, one ordered list per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryCandidates {
    /// Descriptions that indicate studying
    pub studying: Vec<String>,
    /// Descriptions that indicate NOT studying
    pub not_studying: Vec<String>,
    /// Descriptions that indicate nobody is there
    pub absent: Vec<String>,
}

impl Default for CategoryCandidates {
    fn default() -> Self {
        Self {
            studying: vec![
                "a person reading a book at a desk".to_string(),
                "a person writing notes with a pen".to_string(),
                "a person focused on a laptop screen, working".to_string(),
                "a student studying at a desk".to_string(),
            ],
            not_studying: vec![
                "a person looking at a smartphone".to_string(),
                "a person sleeping with head on desk".to_string(),
                "a person yawning or stretching".to_string(),
                "a person turned away from the desk".to_string(),
            ],
            absent: vec![
                "an empty room with no people".to_string(),
                "an empty chair, nobody sitting".to_string(),
            ],
        }
    }
}

impl CategoryCandidates {
    fn list(&self, category: Category) -> &[String] {
        match category {
            Category::Studying => &self.studying,
            Category::NotStudying => &self.not_studying,
            Category::Absent => &self.absent,
        }
    }
}

/// A single text descriptor with its category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub text: String,
    pub category: Category,
}

/// Flattened, validated candidate catalog.
///
/// Descriptor order is studying, then not-studying, then absent, each in
/// configured order. Scorers must return scores in this order.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateCatalog {
    descriptors: Vec<Descriptor>,
    indices: [Vec<usize>; 3],
}

impl CandidateCatalog {
    /// Build the catalog, rejecting empty categories, blank descriptors and
    /// texts listed twice (scores are keyed by text)
    pub fn new(candidates: &CategoryCandidates) -> Result<Self, DetectionError> {
        let mut seen = HashSet::new();
        for category in Category::PRIORITY {
            let list = candidates.list(category);
            if list.is_empty() {
                return Err(DetectionError::EmptyCategory(category));
            }
            for text in list {
                if text.trim().is_empty() {
                    return Err(DetectionError::BlankDescriptor(category));
                }
                if !seen.insert(text.as_str()) {
                    return Err(DetectionError::DuplicateDescriptor(text.clone()));
                }
            }
        }
        Ok(Self::flatten(candidates))
    }

    fn flatten(candidates: &CategoryCandidates) -> Self {
        let mut descriptors = Vec::new();
        let mut indices: [Vec<usize>; 3] = Default::default();
        for category in Category::PRIORITY {
            for text in candidates.list(category) {
                indices[category.slot()].push(descriptors.len());
                descriptors.push(Descriptor {
                    text: text.clone(),
                    category,
                });
            }
        }
        Self { descriptors, indices }
    }

    /// All descriptors in scoring order
    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    /// Descriptor texts in scoring order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.text.as_str())
    }

    /// Indices of the descriptors belonging to `category`
    pub fn indices(&self, category: Category) -> &[usize] {
        &self.indices[category.slot()]
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl Default for CandidateCatalog {
    fn default() -> Self {
        Self::flatten(&CategoryCandidates::default())
    }
}
