use std::path::PathBuf;

/// Coarse failure categories shared by validation and packaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NotADirectory,
    ReadError,
    FormatError,
    MissingField,
    ValidationError,
    PackagingError,
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("SKILL.md not found")]
    ManifestNotFound,

    #[error("Could not read SKILL.md: {0}")]
    Read(#[source] std::io::Error),

    #[error("No YAML frontmatter found (must start with ---)")]
    MissingFrontmatter,

    #[error("Invalid frontmatter format")]
    InvalidFrontmatter,

    #[error("Missing '{0}' in frontmatter")]
    MissingField(&'static str),

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Description is too long ({0} chars). Max 1024.")]
    DescriptionTooLong(usize),
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ManifestNotFound => ErrorKind::NotFound,
            Self::Read(_) => ErrorKind::ReadError,
            Self::MissingFrontmatter | Self::InvalidFrontmatter => ErrorKind::FormatError,
            Self::MissingField(_) | Self::EmptyName => ErrorKind::MissingField,
            Self::DescriptionTooLong(_) => ErrorKind::ValidationError,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("Skill folder not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Cannot derive a package name from {}", .0.display())]
    Unnamed(PathBuf),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Cannot use output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error creating {}: {source}", .archive.display())]
    Packaging {
        archive: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PackageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) | Self::Unnamed(_) => ErrorKind::NotFound,
            Self::NotADirectory(_) => ErrorKind::NotADirectory,
            Self::Validation(_) => ErrorKind::ValidationError,
            Self::OutputDir { .. } | Self::Packaging { .. } => ErrorKind::PackagingError,
        }
    }
}
