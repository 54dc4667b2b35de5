//! Structure: frontmatter naming and the required markdown sections.

use std::sync::LazyLock;

use regex::Regex;

use super::{AnalysisContext, DimensionResult, has_heading_containing};
use crate::error::Result;
use crate::quality::frontmatter::Frontmatter;

/// Section labels every skill is expected to carry as headings.
pub const REQUIRED_SECTIONS: [&str; 3] = ["Capabilities", "Input Requirements", "How to Use"];

static KEBAB_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("valid regex"));

pub fn analyze(ctx: &AnalysisContext<'_>) -> Result<DimensionResult> {
    let Some(frontmatter) = ctx.frontmatter.filter(|fm| !fm.is_empty()) else {
        return Ok(DimensionResult::failed("Invalid or missing YAML frontmatter"));
    };
    Ok(score_structure(frontmatter, ctx.body))
}

/// A single trailing newline is tolerated, as left by a `|` block scalar.
fn is_kebab_case(name: &str) -> bool {
    KEBAB_NAME.is_match(name.strip_suffix('\n').unwrap_or(name))
}

fn score_structure(frontmatter: &Frontmatter, body: &str) -> DimensionResult {
    let mut result = DimensionResult::perfect();

    if !frontmatter.contains_key("name") {
        result.deduct(20, "Missing 'name' in frontmatter");
    } else if !frontmatter
        .text("name")
        .is_some_and(|name| is_kebab_case(&name))
    {
        result.deduct(10, "Skill name should be kebab-case");
    }

    for section in REQUIRED_SECTIONS {
        if !has_heading_containing(body, &[section]) {
            result.deduct(15, format!("Missing section: {section}"));
        }
    }

    result
}
