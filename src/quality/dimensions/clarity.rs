//! Clarity: is the frontmatter description present, long enough, and specific?

use std::sync::LazyLock;

use regex::Regex;

use super::{AnalysisContext, DimensionResult};
use crate::error::Result;
use crate::quality::frontmatter::Frontmatter;

const MIN_DESCRIPTION_CHARS: usize = 20;

static VAGUE_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(helps|various|many|stuff|things)\b").expect("valid regex")
});

pub fn analyze(ctx: &AnalysisContext<'_>) -> Result<DimensionResult> {
    Ok(score_description(ctx.frontmatter))
}

fn score_description(frontmatter: Option<&Frontmatter>) -> DimensionResult {
    let mut result = DimensionResult::perfect();

    let Some(description) = frontmatter.and_then(|fm| fm.non_empty_text("description")) else {
        result.deduct(40, "Missing description in frontmatter");
        return result;
    };

    // Both checks apply independently.
    if description.chars().count() < MIN_DESCRIPTION_CHARS {
        result.deduct(20, "Description is too short (< 20 chars)");
    }
    if VAGUE_WORDS.is_match(&description) {
        result.deduct(10, "Description uses vague words");
    }

    result
}
