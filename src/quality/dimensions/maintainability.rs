//! Maintainability: versioned metadata and a tidy file tree.

use super::{AnalysisContext, DimensionResult};
use crate::error::Result;

/// Entry count above which a bundle is considered cluttered.
pub const MAX_ENTRIES: usize = 20;

pub fn analyze(ctx: &AnalysisContext<'_>) -> Result<DimensionResult> {
    let mut result = DimensionResult::perfect();

    if ctx.frontmatter.is_some_and(|fm| !fm.contains_key("version")) {
        result.deduct(10, "Missing version in frontmatter");
    }
    if ctx.tree.entry_count() > MAX_ENTRIES {
        result.deduct(10, "High file count (>20), consider cleaning up");
    }

    Ok(result)
}
