//! Skill quality analysis.
//!
//! [`analyze_skill`] loads a skill directory, runs every dimension in
//! [`DIMENSIONS`] once, and folds the results into a [`QualityReport`].

pub mod dimensions;
pub mod frontmatter;
pub mod report;
pub mod tree;

pub use dimensions::{AnalysisContext, DIMENSIONS, Dimension, DimensionName, DimensionResult};
pub use frontmatter::{Frontmatter, SkillDocument, load_skill_md, split_frontmatter};
pub use report::{
    DEGRADED_MESSAGE, DegradedReport, DimensionReport, DimensionReports, QualityReport, SkillReport,
    aggregate, analyze_skill,
};
pub use tree::SkillTree;
