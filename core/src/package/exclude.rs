use serde::Deserialize;

pub const SKILL_EXTENSION: &str = "skill";

/// Decides which directories and files of a skill tree stay out of the archive.
///
/// Names starting with `.` are always excluded; the lists below add to that.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExclusionRules {
    /// Directory names whose whole subtree is pruned.
    pub dirs: Vec<String>,
    /// File name endings, e.g. `.pyc`.
    pub suffixes: Vec<String>,
    /// Exact file names, typically the packaging tools themselves.
    pub files: Vec<String>,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            dirs: vec!["__pycache__".to_string()],
            suffixes: vec![".pyc".to_string(), format!(".{SKILL_EXTENSION}")],
            files: vec![
                "package_skill.py".to_string(),
                "package_skill.ps1".to_string(),
                "quick_validate.py".to_string(),
            ],
        }
    }
}

impl ExclusionRules {
    pub fn none() -> Self {
        Self {
            dirs: Vec::new(),
            suffixes: Vec::new(),
            files: Vec::new(),
        }
    }

    pub fn with_dir(mut self, name: impl Into<String>) -> Self {
        self.dirs.push(name.into());
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffixes.push(suffix.into());
        self
    }

    pub fn with_file(mut self, name: impl Into<String>) -> Self {
        self.files.push(name.into());
        self
    }

    pub fn skips_dir(&self, name: &str) -> bool {
        is_hidden(name) || self.dirs.iter().any(|d| d == name)
    }

    pub fn skips_file(&self, name: &str) -> bool {
        is_hidden(name)
            || self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
            || self.files.iter().any(|f| f == name)
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}
