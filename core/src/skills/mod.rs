pub mod manifest;
pub mod validate;

pub use manifest::{Frontmatter, MANIFEST_FILE, load_frontmatter, parse_frontmatter};
pub use validate::{MAX_DESCRIPTION_CHARS, VALID_MESSAGE, quick_validate, validate_skill};

use std::path::{Path, PathBuf};

pub fn manifest_path(skill_dir: &Path) -> PathBuf {
    skill_dir.join(MANIFEST_FILE)
}

pub fn has_manifest(dir: &Path) -> bool {
    manifest_path(dir).is_file()
}
