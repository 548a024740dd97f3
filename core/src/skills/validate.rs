use std::path::Path;

use super::manifest::{Frontmatter, load_frontmatter};
use crate::error::ValidationError;

pub const MAX_DESCRIPTION_CHARS: usize = 1024;

pub const VALID_MESSAGE: &str = "Skill is valid!";

/// Checks the `SKILL.md` header of `skill_dir` and returns it when the required fields hold.
pub fn validate_skill(skill_dir: &Path) -> Result<Frontmatter, ValidationError> {
    let frontmatter = load_frontmatter(skill_dir)?;
    check_required_fields(&frontmatter)?;

    tracing::debug!(path = %skill_dir.display(), fields = frontmatter.len(), "Skill is valid");
    Ok(frontmatter)
}

pub fn check_required_fields(frontmatter: &Frontmatter) -> Result<(), ValidationError> {
    let name = frontmatter
        .name()
        .ok_or(ValidationError::MissingField("name"))?;
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let description = frontmatter
        .description()
        .ok_or(ValidationError::MissingField("description"))?;
    let chars = description.chars().count();
    if chars > MAX_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooLong(chars));
    }

    Ok(())
}

/// Validator result as a `(valid, message)` pair, the shape the `validate` command prints.
pub fn quick_validate(skill_dir: &Path) -> (bool, String) {
    match validate_skill(skill_dir) {
        Ok(_) => (true, VALID_MESSAGE.to_string()),
        Err(e) => (false, e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::skills::MANIFEST_FILE;
    use std::fs;
    use tempfile::TempDir;

    fn skill_with_manifest(content: &str) -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(MANIFEST_FILE), content).unwrap();
        tmp
    }

    #[test]
    fn valid_skill() {
        let tmp = skill_with_manifest("---\nname: X\ndescription: Y\n---");
        assert_eq!(
            quick_validate(tmp.path()),
            (true, "Skill is valid!".to_string())
        );
    }

    #[test]
    fn missing_manifest() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            quick_validate(tmp.path()),
            (false, "SKILL.md not found".to_string())
        );
    }

    #[test]
    fn no_frontmatter() {
        let tmp = skill_with_manifest("# Title\nname: X\n");
        assert_eq!(
            quick_validate(tmp.path()),
            (
                false,
                "No YAML frontmatter found (must start with ---)".to_string()
            )
        );
    }

    #[test]
    fn unterminated_frontmatter() {
        let tmp = skill_with_manifest("---\nname: X\ndescription: Y\n");
        assert_eq!(
            quick_validate(tmp.path()),
            (false, "Invalid frontmatter format".to_string())
        );
    }

    #[test]
    fn missing_name() {
        let tmp = skill_with_manifest("---\ndescription: Y\n---\n");
        let err = validate_skill(tmp.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert_eq!(err.to_string(), "Missing 'name' in frontmatter");
    }

    #[test]
    fn empty_name() {
        let tmp = skill_with_manifest("---\nname:   \ndescription: Y\n---\n");
        assert_eq!(
            quick_validate(tmp.path()),
            (false, "Name cannot be empty".to_string())
        );
    }

    #[test]
    fn empty_name_reported_before_missing_description() {
        let tmp = skill_with_manifest("---\nname:\n---\n");
        assert_eq!(
            validate_skill(tmp.path()).unwrap_err().to_string(),
            "Name cannot be empty"
        );
    }

    #[test]
    fn missing_description() {
        let tmp = skill_with_manifest("---\nname: X\n---\n");
        assert_eq!(
            quick_validate(tmp.path()),
            (false, "Missing 'description' in frontmatter".to_string())
        );
    }

    #[test]
    fn empty_description_is_allowed() {
        let tmp = skill_with_manifest("---\nname: X\ndescription:\n---\n");
        assert!(validate_skill(tmp.path()).is_ok());
    }

    #[test]
    fn description_at_limit() {
        let content = format!("---\nname: X\ndescription: {}\n---\n", "d".repeat(1024));
        let tmp = skill_with_manifest(&content);
        assert!(quick_validate(tmp.path()).0);
    }

    #[test]
    fn description_too_long() {
        let content = format!("---\nname: X\ndescription: {}\n---\n", "d".repeat(1025));
        let tmp = skill_with_manifest(&content);
        let err = validate_skill(tmp.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
        assert_eq!(
            err.to_string(),
            "Description is too long (1025 chars). Max 1024."
        );
    }

    #[test]
    fn description_length_counts_chars_not_bytes() {
        let content = format!("---\nname: X\ndescription: {}\n---\n", "é".repeat(1000));
        let tmp = skill_with_manifest(&content);
        assert!(validate_skill(tmp.path()).is_ok());
    }

    #[test]
    fn returns_extra_fields() {
        let tmp = skill_with_manifest("---\nname: X\ndescription: a: b\nversion: 2\n---\n");
        let fm = validate_skill(tmp.path()).unwrap();
        assert_eq!(fm.description(), Some("a: b"));
        assert_eq!(fm.get("version"), Some("2"));
    }
}
