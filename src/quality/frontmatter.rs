//! `SKILL.md` loading and YAML frontmatter extraction.
//!
//! Parsing never fails outward: a missing file, a missing delimiter pair, or
//! malformed YAML all surface as an absent [`Frontmatter`] so the caller can
//! decide how to degrade.

use std::fmt;
use std::path::Path;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_yaml::{Mapping, Number, Value};
use tracing::{debug, warn};

/// Primary document of a skill bundle.
pub const SKILL_FILE: &str = "SKILL.md";

const DELIMITER: &str = "---";

/// Key-value header parsed from the top of `SKILL.md`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    entries: Mapping,
}

impl Frontmatter {
    /// Parse a YAML header. Returns `None` for malformed YAML or any document
    /// that is not a mapping (including an empty document). A repeated key
    /// keeps its last value.
    #[must_use]
    pub fn parse(yaml: &str) -> Option<Self> {
        match serde_yaml::from_str::<LastWins>(yaml).map(|value| value.0) {
            Ok(Value::Mapping(entries)) => Some(Self { entries }),
            Ok(Value::Null) => None,
            Ok(other) => {
                warn!(kind = value_kind(&other), "frontmatter is not a mapping");
                None
            }
            Err(err) => {
                warn!(error = %err, "invalid YAML frontmatter");
                None
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the key is present at all, regardless of its value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Textual form of a scalar value.
    ///
    /// Strings are returned as-is, numbers and booleans by their YAML text.
    /// Null, sequences, and mappings have no text.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        match self.entries.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Like [`Self::text`], but empty text counts as absent.
    #[must_use]
    pub fn non_empty_text(&self, key: &str) -> Option<String> {
        self.text(key).filter(|text| !text.is_empty())
    }
}

/// YAML value whose mappings tolerate repeated keys, later entries replacing
/// earlier ones.
struct LastWins(Value);

impl<'de> Deserialize<'de> for LastWins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LastWinsVisitor).map(LastWins)
    }
}

struct LastWinsVisitor;

impl<'de> Visitor<'de> for LastWinsVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(Number::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(Number::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Number(Number::from(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        LastWins::deserialize(deserializer).map(|value| value.0)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(LastWins(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut entries = Mapping::new();
        while let Some((LastWins(key), LastWins(value))) = map.next_entry()? {
            entries.insert(key, value);
        }
        Ok(Value::Mapping(entries))
    }
}

/// A `SKILL.md` split into header and body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillDocument {
    pub frontmatter: Option<Frontmatter>,
    pub body: Option<String>,
}

impl SkillDocument {
    /// Frontmatter that is present and has at least one key.
    #[must_use]
    pub fn usable_frontmatter(&self) -> Option<&Frontmatter> {
        self.frontmatter.as_ref().filter(|fm| !fm.is_empty())
    }

    #[must_use]
    pub fn body_or_empty(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

/// Read `SKILL.md` from the skill directory and split it.
#[must_use]
pub fn load_skill_md(skill_path: &Path) -> SkillDocument {
    let skill_md = skill_path.join(SKILL_FILE);
    if !skill_md.is_file() {
        debug!(path = %skill_md.display(), "SKILL.md not found");
        return SkillDocument::default();
    }

    match std::fs::read_to_string(&skill_md) {
        Ok(content) => split_frontmatter(&content),
        Err(err) => {
            warn!(path = %skill_md.display(), error = %err, "failed to read SKILL.md");
            SkillDocument::default()
        }
    }
}

/// Split raw document text on the first two `---` markers.
///
/// The header is whatever lies between the first and second marker, wherever
/// they occur; the body is everything after the second.
#[must_use]
pub fn split_frontmatter(content: &str) -> SkillDocument {
    let Some(first) = content.find(DELIMITER) else {
        return raw_body(content);
    };
    let header_start = first + DELIMITER.len();
    let Some(offset) = content[header_start..].find(DELIMITER) else {
        return raw_body(content);
    };
    let header_end = header_start + offset;

    SkillDocument {
        frontmatter: Frontmatter::parse(&content[header_start..header_end]),
        body: Some(content[header_end + DELIMITER.len()..].to_string()),
    }
}

fn raw_body(content: &str) -> SkillDocument {
    debug!("no frontmatter delimiters found");
    SkillDocument {
        frontmatter: None,
        body: Some(content.to_string()),
    }
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::SkillFixture;

    #[test]
    fn test_split_basic_document() {
        let doc = split_frontmatter("---\nname: my-skill\nversion: 1.0.0\n---\n# Title\nBody\n");
        let fm = doc.frontmatter.expect("frontmatter");
        assert_eq!(fm.text("name").as_deref(), Some("my-skill"));
        assert_eq!(fm.text("version").as_deref(), Some("1.0.0"));
        assert_eq!(doc.body.as_deref(), Some("\n# Title\nBody\n"));
    }

    #[test]
    fn test_split_keeps_later_markers_in_body() {
        let doc = split_frontmatter("---\nname: a\n---\nintro\n---\noutro\n");
        assert!(doc.frontmatter.is_some());
        assert_eq!(doc.body.as_deref(), Some("\nintro\n---\noutro\n"));
    }

    #[test]
    fn test_split_single_marker_returns_raw_body() {
        let content = "---\nname: a\n# no closing marker\n";
        let doc = split_frontmatter(content);
        assert!(doc.frontmatter.is_none());
        assert_eq!(doc.body.as_deref(), Some(content));
    }

    #[test]
    fn test_split_invalid_yaml_keeps_body() {
        let doc = split_frontmatter("---\nname: [unclosed\n---\nbody");
        assert!(doc.frontmatter.is_none());
        assert_eq!(doc.body.as_deref(), Some("\nbody"));
    }

    #[test]
    fn test_repeated_key_keeps_last_value() {
        let doc = split_frontmatter("---\nname: a\nname: b\ndescription: x\n---\nbody");
        let fm = doc.frontmatter.expect("frontmatter");
        assert_eq!(fm.text("name").as_deref(), Some("b"));
        assert_eq!(fm.text("description").as_deref(), Some("x"));
        assert_eq!(fm.len(), 2);
    }

    #[test]
    fn test_repeated_key_in_nested_mapping() {
        let fm = Frontmatter::parse("name: a\nmeta:\n  owner: x\n  owner: y\ntags: [a, b]\n")
            .expect("mapping");
        assert_eq!(fm.text("name").as_deref(), Some("a"));
        assert!(fm.contains_key("meta"));
        assert!(fm.contains_key("tags"));
    }

    #[test]
    fn test_non_mapping_header_is_absent() {
        assert!(Frontmatter::parse("- a\n- b\n").is_none());
        assert!(Frontmatter::parse("just a string").is_none());
        assert!(Frontmatter::parse("").is_none());
    }

    #[test]
    fn test_text_rendering() {
        let fm = Frontmatter::parse("name: x\nversion: 2\nflag: true\nnothing: null\nlist: [1]\nempty: ''\n")
            .expect("mapping");
        assert_eq!(fm.text("version").as_deref(), Some("2"));
        assert_eq!(fm.text("flag").as_deref(), Some("true"));
        assert!(fm.text("nothing").is_none());
        assert!(fm.text("list").is_none());
        assert!(fm.contains_key("nothing"));
        assert_eq!(fm.text("empty").as_deref(), Some(""));
        assert!(fm.non_empty_text("empty").is_none());
        assert_eq!(fm.len(), 6);
    }

    #[test]
    fn test_usable_frontmatter_rejects_empty_mapping() {
        let doc = split_frontmatter("---\n{}\n---\nbody");
        assert!(doc.frontmatter.is_some());
        assert!(doc.usable_frontmatter().is_none());
    }

    #[test]
    fn test_load_missing_skill_md() {
        let fixture = SkillFixture::new();
        let doc = load_skill_md(fixture.path());
        assert_eq!(doc, SkillDocument::default());
    }

    #[test]
    fn test_load_skill_md_from_disk() {
        let fixture = SkillFixture::new();
        fixture.write_skill_md("---\nname: disk-skill\n---\n## How to Use\n");
        let doc = load_skill_md(fixture.path());
        let fm = doc.usable_frontmatter().expect("frontmatter");
        assert_eq!(fm.text("name").as_deref(), Some("disk-skill"));
        assert!(doc.body_or_empty().contains("How to Use"));
    }
}
