//! Examples: fenced code blocks in the body and sample I/O files on disk.

use std::sync::LazyLock;

use regex::Regex;

use super::{AnalysisContext, DimensionResult};
use crate::error::Result;

pub const SAMPLE_INPUT: &str = "sample_input.json";
pub const EXPECTED_OUTPUT: &str = "expected_output.json";

const MIN_CODE_BLOCKS: usize = 2;

static CODE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid regex"));

pub fn analyze(ctx: &AnalysisContext<'_>) -> Result<DimensionResult> {
    let mut result = DimensionResult::perfect();

    if count_code_blocks(ctx.body) < MIN_CODE_BLOCKS {
        result.deduct(20, "Few or no usage examples found in SKILL.md");
    }
    if !ctx.tree.has_top_level(SAMPLE_INPUT)? {
        result.deduct(15, format!("Missing {SAMPLE_INPUT}"));
    }
    if !ctx.tree.has_top_level(EXPECTED_OUTPUT)? {
        result.deduct(15, format!("Missing {EXPECTED_OUTPUT}"));
    }

    Ok(result)
}

/// Non-overlapping fenced blocks, each closed by the nearest following fence.
pub fn count_code_blocks(body: &str) -> usize {
    CODE_BLOCK.find_iter(body).count()
}
