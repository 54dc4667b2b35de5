//! sqa - Skill Quality Analyzer
//!
//! Scores a skill bundle (a `SKILL.md` with YAML frontmatter, optional sample
//! files, and auxiliary docs) across six independent quality dimensions and
//! folds them into one weighted score with a flat issue list.

pub mod cli;
pub mod config;
pub mod error;
pub mod quality;
pub mod test_utils;

pub use error::{Result, SqaError};
