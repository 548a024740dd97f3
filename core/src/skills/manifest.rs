use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::ValidationError;

pub const MANIFEST_FILE: &str = "SKILL.md";

const DELIMITER: &str = "---";

/// Flat `key: value` header at the top of a `SKILL.md`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    fields: BTreeMap<String, String>,
}

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name")
    }

    pub fn description(&self) -> Option<&str> {
        self.get("description")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

pub fn read_manifest(skill_dir: &Path) -> Result<String, ValidationError> {
    let md_path = super::manifest_path(skill_dir);

    if !md_path.is_file() {
        return Err(ValidationError::ManifestNotFound);
    }

    match fs::read(&md_path) {
        Ok(bytes) => String::from_utf8(bytes)
            .map_err(|e| ValidationError::Read(io::Error::new(io::ErrorKind::InvalidData, e))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ValidationError::ManifestNotFound),
        Err(e) => Err(ValidationError::Read(e)),
    }
}

/// Extracts the delimited header block and scans it line by line.
///
/// Blank lines, `#` comments and lines without a colon are skipped. Each remaining line is split
/// at its first colon; a repeated key replaces the earlier value.
pub fn parse_frontmatter(content: &str) -> Result<Frontmatter, ValidationError> {
    if !content.starts_with(DELIMITER) {
        return Err(ValidationError::MissingFrontmatter);
    }

    let mut lines = content.lines();
    if lines.next() != Some(DELIMITER) {
        return Err(ValidationError::InvalidFrontmatter);
    }

    let mut fields = BTreeMap::new();
    for line in lines {
        if line == DELIMITER {
            return Ok(Frontmatter { fields });
        }

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            fields.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    Err(ValidationError::InvalidFrontmatter)
}

pub fn load_frontmatter(skill_dir: &Path) -> Result<Frontmatter, ValidationError> {
    let content = read_manifest(skill_dir)?;
    parse_frontmatter(&content)
}
