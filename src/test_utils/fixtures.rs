use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::quality::frontmatter::SKILL_FILE;
use crate::quality::tree::SkillTree;

/// Throwaway skill directory on disk.
pub struct SkillFixture {
    pub temp_dir: TempDir,
}

impl Default for SkillFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a file (and any parent directories) relative to the skill root.
    #[allow(clippy::must_use_candidate)]
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    #[allow(clippy::must_use_candidate)]
    pub fn write_skill_md(&self, content: &str) -> PathBuf {
        self.create_file(SKILL_FILE, content)
    }

    /// Snapshot of the directory as it is right now.
    #[must_use]
    pub fn tree(&self) -> SkillTree {
        SkillTree::scan(self.path()).expect("Failed to scan fixture")
    }

    /// A bundle that scores 100 on every dimension.
    #[must_use]
    pub fn complete() -> Self {
        let fixture = Self::new();
        fixture.write_skill_md(COMPLETE_SKILL_MD);
        fixture.create_file("README.md", "# csv-to-json\n");
        fixture.create_file("HOW_TO_USE.md", "Run it on a CSV file.\n");
        fixture.create_file("sample_input.json", "{\"csv\": \"a,b\\n1,2\"}\n");
        fixture.create_file("expected_output.json", "[{\"a\": 1, \"b\": 2}]\n");
        fixture
    }
}

pub const COMPLETE_SKILL_MD: &str = r#"---
name: csv-to-json
description: Converts CSV exports into normalized JSON records
version: 1.2.0
---
# CSV to JSON

## Capabilities
- Header detection

## Input Requirements
- A UTF-8 CSV file

## How to Use
```bash
csv-to-json input.csv
```

```json
[{"a": 1}]
```
"#;
