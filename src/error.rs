//! Error types for sqa.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqaError {
    #[error("Path {} does not exist", .0.display())]
    SkillPathNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SqaError>;
