//! Quality dimensions and their registration table.
//!
//! Each dimension is a plain function over a read-only [`AnalysisContext`]
//! that starts at 100 and deducts points, appending one issue per deduction.
//! Dimensions never see each other's results.

pub mod best_practices;
pub mod clarity;
pub mod examples;
pub mod maintainability;
pub mod structure;
pub mod triggers;

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

use super::frontmatter::Frontmatter;
use super::tree::SkillTree;

/// Score a dimension starts from before deductions.
pub const MAX_SCORE: u32 = 100;

/// Inputs shared by every dimension.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub frontmatter: Option<&'a Frontmatter>,
    pub body: &'a str,
    pub tree: &'a SkillTree,
}

impl<'a> AnalysisContext<'a> {
    #[must_use]
    pub const fn new(frontmatter: Option<&'a Frontmatter>, body: &'a str, tree: &'a SkillTree) -> Self {
        Self {
            frontmatter,
            body,
            tree,
        }
    }

    #[must_use]
    pub fn skill_path(&self) -> &Path {
        self.tree.root()
    }
}

/// Score and ordered findings for one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionResult {
    pub score: u32,
    pub issues: Vec<String>,
}

impl DimensionResult {
    #[must_use]
    pub const fn perfect() -> Self {
        Self {
            score: MAX_SCORE,
            issues: Vec::new(),
        }
    }

    /// A zero score carrying a single explanation.
    pub fn failed(issue: impl Into<String>) -> Self {
        Self {
            score: 0,
            issues: vec![issue.into()],
        }
    }

    /// Subtract `points` (never below zero) and record why.
    pub fn deduct(&mut self, points: u32, issue: impl Into<String>) {
        self.score = self.score.saturating_sub(points);
        self.issues.push(issue.into());
    }
}

impl Default for DimensionResult {
    fn default() -> Self {
        Self::perfect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionName {
    Clarity,
    Structure,
    Examples,
    TriggerDetection,
    BestPractices,
    Maintainability,
}

impl DimensionName {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clarity => "clarity",
            Self::Structure => "structure",
            Self::Examples => "examples",
            Self::TriggerDetection => "trigger_detection",
            Self::BestPractices => "best_practices",
            Self::Maintainability => "maintainability",
        }
    }
}

impl fmt::Display for DimensionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type AnalyzeFn = fn(&AnalysisContext<'_>) -> Result<DimensionResult>;

/// One row of the registration table.
#[derive(Clone, Copy)]
pub struct Dimension {
    pub name: DimensionName,
    /// Percentage contribution to the overall score.
    pub weight: u32,
    pub analyze: AnalyzeFn,
}

/// All dimensions, in report order. Weights sum to 100.
pub const DIMENSIONS: [Dimension; 6] = [
    Dimension {
        name: DimensionName::Clarity,
        weight: 20,
        analyze: clarity::analyze,
    },
    Dimension {
        name: DimensionName::Structure,
        weight: 20,
        analyze: structure::analyze,
    },
    Dimension {
        name: DimensionName::Examples,
        weight: 15,
        analyze: examples::analyze,
    },
    Dimension {
        name: DimensionName::TriggerDetection,
        weight: 15,
        analyze: triggers::analyze,
    },
    Dimension {
        name: DimensionName::BestPractices,
        weight: 15,
        analyze: best_practices::analyze,
    },
    Dimension {
        name: DimensionName::Maintainability,
        weight: 15,
        analyze: maintainability::analyze,
    },
];

/// Whether any markdown heading line (leading `#`) contains one of `labels`,
/// compared case-insensitively.
pub(crate) fn has_heading_containing(body: &str, labels: &[&str]) -> bool {
    let labels: Vec<String> = labels.iter().map(|label| label.to_lowercase()).collect();
    body.lines()
        .filter(|line| line.starts_with('#'))
        .map(str::to_lowercase)
        .any(|heading| labels.iter().any(|label| heading.contains(label.as_str())))
}
