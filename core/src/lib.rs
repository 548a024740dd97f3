pub mod config;
pub mod error;
pub mod package;
pub mod skills;

pub use config::PackConfig;
pub use error::{ErrorKind, PackageError, ValidationError};
pub use package::{ExclusionRules, OutputLocation, PackagedSkill, SkillPackager, package_skill};
pub use skills::{Frontmatter, quick_validate, validate_skill};
