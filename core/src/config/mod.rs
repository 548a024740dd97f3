use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::package::ExclusionRules;

/// Per-skill config file. Hidden, so it is never packaged itself.
pub const SKILL_CONFIG_FILE: &str = ".skillpack.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    pub exclude: ExclusionRules,
}

pub fn skill_config_path(skill_dir: &Path) -> PathBuf {
    skill_dir.join(SKILL_CONFIG_FILE)
}

impl PackConfig {
    /// An explicit `path` must exist. Without one, `<skill_dir>/.skillpack.toml` is used when
    /// present, otherwise the defaults.
    pub fn resolve(path: Option<&Path>, skill_dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return load_config(path);
        }

        let local = skill_config_path(skill_dir);
        if local.is_file() {
            tracing::debug!(path = %local.display(), "Using skill-local config");
            load_config(&local)
        } else {
            Ok(Self::default())
        }
    }
}

pub fn load_config(path: &Path) -> Result<PackConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            anyhow::anyhow!("Config file not found: {}", path.display())
        } else {
            anyhow::anyhow!("Failed to read config from {}: {}", path.display(), e)
        }
    })?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", path.display()))
}
