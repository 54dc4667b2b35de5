//! Trigger detection: can a reader tell when the skill should be used?

use tracing::trace;

use super::{AnalysisContext, DimensionResult, has_heading_containing};
use crate::error::Result;
use crate::quality::frontmatter::Frontmatter;

const USAGE_HEADINGS: [&str; 2] = ["How to Use", "When to Use"];
const TRIGGER_PHRASES: [&str; 4] = ["when", "use this", "trigger", "ask"];

pub fn analyze(ctx: &AnalysisContext<'_>) -> Result<DimensionResult> {
    let mut result = DimensionResult::perfect();

    if !has_heading_containing(ctx.body, &USAGE_HEADINGS) {
        result.deduct(20, "No clear 'How to Use' or 'When to Use' section");
    }

    // Informational only: trigger phrasing in the description is not scored.
    if let Some(found) = ctx.frontmatter.and_then(description_has_trigger_phrase) {
        trace!(found, "description trigger phrase check");
    }

    Ok(result)
}

/// `None` when there is no description to inspect.
fn description_has_trigger_phrase(frontmatter: &Frontmatter) -> Option<bool> {
    let description = frontmatter.text("description")?.to_lowercase();
    Some(TRIGGER_PHRASES.iter().any(|phrase| description.contains(phrase)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::SkillFixture;

    fn run(yaml: Option<&str>, body: &str) -> DimensionResult {
        let fixture = SkillFixture::new();
        let tree = fixture.tree();
        let fm = yaml.map(|y| Frontmatter::parse(y).expect("mapping"));
        analyze(&AnalysisContext::new(fm.as_ref(), body, &tree)).unwrap()
    }

    #[test]
    fn test_how_to_use_heading() {
        assert_eq!(run(None, "## How to Use\n"), DimensionResult::perfect());
    }

    #[test]
    fn test_when_to_use_heading() {
        assert_eq!(run(None, "# when to use\n").score, 100);
    }

    #[test]
    fn test_missing_usage_heading() {
        let result = run(None, "How to Use is mentioned but not as a heading\n");
        assert_eq!(result.score, 80);
        assert_eq!(result.issues, ["No clear 'How to Use' or 'When to Use' section"]);
    }

    #[test]
    fn test_trigger_phrase_has_no_effect_on_score() {
        let with = run(Some("description: Use this when the user asks\n"), "## How to Use\n");
        let without = run(Some("description: Formats tables\n"), "## How to Use\n");
        assert_eq!(with, without);
    }

    #[test]
    fn test_description_has_trigger_phrase() {
        let fm = Frontmatter::parse("description: TRIGGER on upload\n").expect("mapping");
        assert_eq!(description_has_trigger_phrase(&fm), Some(true));
        let fm = Frontmatter::parse("description: Formats tables\n").expect("mapping");
        assert_eq!(description_has_trigger_phrase(&fm), Some(false));
        let fm = Frontmatter::parse("name: x\n").expect("mapping");
        assert_eq!(description_has_trigger_phrase(&fm), None);
    }
}
