//! Aggregation of dimension results into a single report.

use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, info, warn};

use super::dimensions::{AnalysisContext, DIMENSIONS, DimensionName, DimensionResult};
use super::frontmatter::{Frontmatter, load_skill_md};
use super::tree::SkillTree;
use crate::error::Result;

pub const DEGRADED_MESSAGE: &str = "Could not parse SKILL.md or invalid YAML frontmatter";
const RECOMMENDATION_PREFIX: &str = "Fix: ";
const UNKNOWN_SKILL: &str = "unknown";

/// Outcome of analyzing one skill directory.
///
/// The two shapes serialize differently on purpose: a degraded report has no
/// skill name, uses `issues` instead of `all_issues`, and carries no
/// recommendations.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum QualityReport {
    Complete(SkillReport),
    Degraded(DegradedReport),
}

impl QualityReport {
    #[must_use]
    pub const fn overall_score(&self) -> u32 {
        match self {
            Self::Complete(report) => report.overall_score,
            Self::Degraded(report) => report.overall_score,
        }
    }

    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SkillReport {
    pub skill_name: String,
    pub overall_score: u32,
    pub dimensions: DimensionReports,
    pub all_issues: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DegradedReport {
    pub overall_score: u32,
    pub issues: Vec<String>,
    pub dimensions: DimensionReports,
}

impl DegradedReport {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            overall_score: 0,
            issues: vec![message.into()],
            dimensions: DimensionReports::default(),
        }
    }
}

/// A scored dimension as it appears in the report.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DimensionReport {
    #[serde(skip)]
    pub name: DimensionName,
    pub score: u32,
    pub weight: u32,
    pub issues: Vec<String>,
}

/// Dimension reports in evaluation order, serialized as a map keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimensionReports(Vec<DimensionReport>);

impl DimensionReports {
    #[must_use]
    pub fn get(&self, name: DimensionName) -> Option<&DimensionReport> {
        self.0.iter().find(|report| report.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DimensionReport> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for DimensionReports {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for report in &self.0 {
            map.serialize_entry(report.name.as_str(), report)?;
        }
        map.end()
    }
}

/// Load `SKILL.md` from `skill_path` and score every dimension.
///
/// A missing, unparsable, or empty header yields a degraded report. Filesystem
/// errors raised while scanning the directory are returned as-is.
pub fn analyze_skill(skill_path: &Path) -> Result<QualityReport> {
    let document = load_skill_md(skill_path);
    let Some(frontmatter) = document.usable_frontmatter() else {
        warn!(path = %skill_path.display(), "skill header missing or unparsable");
        return Ok(QualityReport::Degraded(DegradedReport::new(DEGRADED_MESSAGE)));
    };

    let tree = SkillTree::scan(skill_path)?;
    let ctx = AnalysisContext::new(Some(frontmatter), document.body_or_empty(), &tree);
    let report = aggregate(frontmatter, &ctx)?;
    info!(
        skill = %report.skill_name,
        overall_score = report.overall_score,
        issues = report.all_issues.len(),
        "skill analyzed"
    );
    Ok(QualityReport::Complete(report))
}

/// Run each registered dimension once, in order, and combine the results.
pub fn aggregate(frontmatter: &Frontmatter, ctx: &AnalysisContext<'_>) -> Result<SkillReport> {
    let mut dimensions = Vec::with_capacity(DIMENSIONS.len());
    for dimension in &DIMENSIONS {
        let DimensionResult { score, issues } = (dimension.analyze)(ctx)?;
        debug!(dimension = %dimension.name, score, issues = issues.len(), "dimension scored");
        dimensions.push(DimensionReport {
            name: dimension.name,
            score,
            weight: dimension.weight,
            issues,
        });
    }

    let overall_score = weighted_score(&dimensions);
    let all_issues: Vec<String> = dimensions
        .iter()
        .flat_map(|d| d.issues.iter().cloned())
        .collect();
    let recommendations = all_issues
        .iter()
        .map(|issue| format!("{RECOMMENDATION_PREFIX}{issue}"))
        .collect();

    Ok(SkillReport {
        skill_name: frontmatter
            .text("name")
            .unwrap_or_else(|| UNKNOWN_SKILL.to_string()),
        overall_score,
        dimensions: DimensionReports(dimensions),
        all_issues,
        recommendations,
    })
}

/// `floor(sum(score * weight) / 100)`, computed in integers.
fn weighted_score(dimensions: &[DimensionReport]) -> u32 {
    dimensions.iter().map(|d| d.score * d.weight).sum::<u32>() / 100
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::SkillFixture;

    fn complete(report: QualityReport) -> SkillReport {
        match report {
            QualityReport::Complete(report) => report,
            QualityReport::Degraded(report) => panic!("unexpected degraded report: {report:?}"),
        }
    }

    #[test]
    fn test_complete_bundle_scores_100() {
        let fixture = SkillFixture::complete();
        let report = complete(analyze_skill(fixture.path()).unwrap());
        assert_eq!(report.skill_name, "csv-to-json");
        assert_eq!(report.overall_score, 100);
        assert!(report.all_issues.is_empty());
        assert!(report.recommendations.is_empty());
        assert_eq!(report.dimensions.len(), 6);
    }

    #[test]
    fn test_missing_skill_md_degrades() {
        let fixture = SkillFixture::new();
        let report = analyze_skill(fixture.path()).unwrap();
        assert_eq!(report, QualityReport::Degraded(DegradedReport::new(DEGRADED_MESSAGE)));
        assert_eq!(report.overall_score(), 0);
    }

    #[test]
    fn test_empty_frontmatter_degrades() {
        let fixture = SkillFixture::new();
        fixture.write_skill_md("---\n---\n# Body\n");
        assert!(analyze_skill(fixture.path()).unwrap().is_degraded());
    }

    #[test]
    fn test_vague_skill_scenario() {
        let fixture = SkillFixture::new();
        fixture.write_skill_md("---\nname: my-skill\ndescription: Helps with various things.\n---\n");
        let report = complete(analyze_skill(fixture.path()).unwrap());

        let score = |name| report.dimensions.get(name).unwrap().score;
        assert_eq!(score(DimensionName::Clarity), 90);
        assert_eq!(score(DimensionName::Structure), 55);
        assert_eq!(score(DimensionName::Examples), 50);
        assert_eq!(score(DimensionName::TriggerDetection), 80);
        assert_eq!(score(DimensionName::BestPractices), 80);
        assert_eq!(score(DimensionName::Maintainability), 90);
        // (90*20 + 55*20 + 50*15 + 80*15 + 80*15 + 90*15) / 100 = 74.0
        assert_eq!(report.overall_score, 74);
    }

    #[test]
    fn test_issues_flatten_in_dimension_order() {
        let fixture = SkillFixture::new();
        fixture.write_skill_md("---\nname: my-skill\ndescription: Helps with various things.\n---\n");
        let report = complete(analyze_skill(fixture.path()).unwrap());

        let expected: Vec<String> = report
            .dimensions
            .iter()
            .flat_map(|d| d.issues.clone())
            .collect();
        assert_eq!(report.all_issues, expected);
        assert_eq!(report.all_issues[0], "Description uses vague words");
        assert_eq!(report.all_issues.last().unwrap(), "Missing version in frontmatter");
        assert_eq!(report.recommendations.len(), report.all_issues.len());
        for (rec, issue) in report.recommendations.iter().zip(&report.all_issues) {
            assert_eq!(rec, &format!("Fix: {issue}"));
        }
    }

    #[test]
    fn test_repeated_frontmatter_key_still_scores() {
        let fixture = SkillFixture::new();
        fixture.write_skill_md(
            "---\nname: my-skill\ndescription: draft\ndescription: Converts CSV exports into JSON records\n---\n",
        );
        let report = complete(analyze_skill(fixture.path()).unwrap());
        assert_eq!(report.skill_name, "my-skill");
        assert_eq!(report.dimensions.get(DimensionName::Clarity).unwrap().score, 100);
        assert!(report.overall_score > 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_filesystem_error_is_fatal() {
        let fixture = SkillFixture::complete();
        std::fs::remove_file(fixture.path().join("README.md")).unwrap();
        // Self-referencing link: existence checks fail with a loop error.
        std::os::unix::fs::symlink("README.md", fixture.path().join("README.md")).unwrap();
        let err = analyze_skill(fixture.path()).unwrap_err();
        assert!(matches!(err, crate::error::SqaError::Io(_)), "unexpected error: {err:?}");
    }

    #[test]
    fn test_unknown_skill_name() {
        let fixture = SkillFixture::new();
        fixture.write_skill_md("---\ndescription: A description that is long enough\n---\n");
        let report = complete(analyze_skill(fixture.path()).unwrap());
        assert_eq!(report.skill_name, "unknown");
    }

    #[test]
    fn test_weighted_score_truncates() {
        let reports: Vec<DimensionReport> = DIMENSIONS
            .iter()
            .map(|d| DimensionReport {
                name: d.name,
                score: 99,
                weight: d.weight,
                issues: Vec::new(),
            })
            .collect();
        assert_eq!(weighted_score(&reports), 99);

        let mut reports = reports;
        reports[2].score = 95; // 99*85 + 95*15 = 9840
        assert_eq!(weighted_score(&reports), 98);
    }

    #[test]
    fn test_serialized_shapes() {
        let degraded = serde_json::to_value(QualityReport::Degraded(DegradedReport::new("x"))).unwrap();
        assert_eq!(
            degraded,
            serde_json::json!({"overall_score": 0, "issues": ["x"], "dimensions": {}})
        );

        let fixture = SkillFixture::complete();
        let report = analyze_skill(fixture.path()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["skill_name"], "csv-to-json");
        assert_eq!(json["dimensions"]["trigger_detection"]["weight"], 15);
        assert_eq!(json["dimensions"]["clarity"]["score"], 100);
        assert!(json["dimensions"]["clarity"].get("name").is_none());

        let text = serde_json::to_string(&report).unwrap();
        let clarity = text.find("\"clarity\"").unwrap();
        let maintainability = text.find("\"maintainability\"").unwrap();
        assert!(clarity < maintainability);
    }

    #[test]
    fn test_idempotent() {
        let fixture = SkillFixture::new();
        fixture.write_skill_md("---\nname: My_Skill\n---\n## How to Use\n");
        fixture.create_file(".DS_Store", "");
        let first = analyze_skill(fixture.path()).unwrap();
        let second = analyze_skill(fixture.path()).unwrap();
        assert_eq!(first, second);
    }
}
