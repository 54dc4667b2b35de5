//! Best practices: companion docs present, no build or OS leftovers.

use super::{AnalysisContext, DimensionResult};
use crate::error::Result;

pub const README: &str = "README.md";
pub const HOW_TO_USE: &str = "HOW_TO_USE.md";

pub fn analyze(ctx: &AnalysisContext<'_>) -> Result<DimensionResult> {
    let mut result = DimensionResult::perfect();

    for doc in [README, HOW_TO_USE] {
        if !ctx.tree.has_top_level(doc)? {
            result.deduct(10, format!("Missing {doc}"));
        }
    }

    let garbage = ctx.tree.garbage_entries().count();
    if garbage > 0 {
        result.deduct(5, format!("Found {garbage} garbage files (.pyc, .DS_Store)"));
    }

    Ok(result)
}
