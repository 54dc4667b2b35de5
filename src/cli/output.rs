use console::style;
use serde::Serialize;

use crate::error::Result;
use crate::quality::QualityReport;

/// Print `value` to stdout as pretty JSON (2-space indent).
pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)?;
    println!("{payload}");
    Ok(())
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 18,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push(String::new());
        self
    }

    pub fn section(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push("-".repeat(text.len().max(3)));
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let key_style = style(key).dim().to_string();
        self.lines.push(format!(
            "{key_style:width$} {value}",
            width = self.key_width
        ));
        self
    }

    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("- {text}"));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

pub fn emit_human(layout: HumanLayout) {
    println!("{}", layout.build());
}

/// Lay out a report for terminal reading.
#[must_use]
pub fn render_report(report: &QualityReport) -> HumanLayout {
    let mut layout = HumanLayout::new();
    layout.title("Skill Quality");

    match report {
        QualityReport::Degraded(degraded) => {
            layout.kv("Overall", &degraded.overall_score.to_string());
            layout.blank().section("Issues");
            for issue in &degraded.issues {
                layout.bullet(issue);
            }
        }
        QualityReport::Complete(complete) => {
            layout
                .kv("Skill", &complete.skill_name)
                .kv("Overall", &format!("{}/100", complete.overall_score))
                .blank();

            for dimension in complete.dimensions.iter() {
                layout
                    .section(dimension.name.as_str())
                    .kv("Score", &dimension.score.to_string())
                    .kv("Weight", &format!("{}%", dimension.weight));
                for issue in &dimension.issues {
                    layout.bullet(issue);
                }
                layout.blank();
            }

            if !complete.recommendations.is_empty() {
                layout.section("Recommendations");
                for recommendation in &complete.recommendations {
                    layout.bullet(recommendation);
                }
            }
        }
    }

    layout
}
