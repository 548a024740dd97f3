pub mod exclude;

pub use exclude::{ExclusionRules, SKILL_EXTENSION};

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use walkdir::{DirEntry, WalkDir};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::PackageError;
use crate::skills::{self, validate_skill};

/// Where the `.skill` archive is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputLocation {
    /// The process working directory at the time the packaging starts.
    #[default]
    CurrentDir,
    Dir(PathBuf),
}

impl OutputLocation {
    pub fn from_arg(dir: Option<impl Into<PathBuf>>) -> Self {
        dir.map_or(Self::CurrentDir, |d| Self::Dir(d.into()))
    }

    /// Absolute directory for the archive. Does not touch the filesystem beyond reading the cwd.
    pub fn resolve(&self) -> io::Result<PathBuf> {
        match self {
            Self::CurrentDir => std::env::current_dir(),
            Self::Dir(dir) => std::path::absolute(dir),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PackagedSkill {
    pub archive: PathBuf,
    /// Archive entry names, in the order they were written.
    pub entries: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SkillPackager {
    rules: ExclusionRules,
    output: OutputLocation,
}

impl SkillPackager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(mut self, rules: ExclusionRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_output(mut self, output: OutputLocation) -> Self {
        self.output = output;
        self
    }

    pub fn with_output_dir(self, dir: impl Into<PathBuf>) -> Self {
        self.with_output(OutputLocation::Dir(dir.into()))
    }

    /// Validates `skill_dir` and zips it into `<output>/<dir-name>.skill`.
    ///
    /// An existing archive at that path is overwritten. If writing fails midway the partial
    /// archive is left on disk.
    pub fn package(&self, skill_dir: &Path) -> Result<PackagedSkill, PackageError> {
        let output_dir = self
            .output
            .resolve()
            .map_err(|source| PackageError::OutputDir {
                path: output_hint(&self.output),
                source,
            })?;

        tracing::debug!(stage = "resolving", path = %skill_dir.display());
        let skill_dir = resolve_skill_dir(skill_dir)?;
        let (skill_name, parent) = match (skill_dir.file_name(), skill_dir.parent()) {
            (Some(name), Some(parent)) => (name.to_string_lossy().into_owned(), parent),
            _ => return Err(PackageError::Unnamed(skill_dir.clone())),
        };

        tracing::debug!(stage = "validating", path = %skill_dir.display());
        validate_skill(&skill_dir)?;

        let output_dir = fs::create_dir_all(&output_dir)
            .and_then(|_| fs::canonicalize(&output_dir))
            .map_err(|source| PackageError::OutputDir {
                path: output_dir.clone(),
                source,
            })?;
        let archive = output_dir.join(format!("{skill_name}.{SKILL_EXTENSION}"));

        let entries = self
            .write_archive(&skill_dir, parent, &archive)
            .map_err(|source| PackageError::Packaging {
                archive: archive.clone(),
                source,
            })?;

        tracing::info!(
            entries = entries.len(),
            archive = %archive.display(),
            "Skill packaged"
        );

        Ok(PackagedSkill { archive, entries })
    }

    fn write_archive(
        &self,
        skill_dir: &Path,
        parent: &Path,
        archive: &Path,
    ) -> io::Result<Vec<String>> {
        tracing::debug!(stage = "walking", path = %skill_dir.display());
        let mut files = self.collect_files(skill_dir)?;
        // An archive written into the skill tree must never be copied into itself.
        files.retain(|path| path != archive);

        tracing::debug!(stage = "writing", archive = %archive.display(), files = files.len());
        let mut zip = ZipWriter::new(BufWriter::new(File::create(archive)?));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut entries = Vec::with_capacity(files.len());
        for path in files {
            let name = entry_name(&path, parent)?;

            zip.start_file(name.as_str(), with_permissions(options, &path)?)?;
            let mut src = File::open(&path)?;
            io::copy(&mut src, &mut zip)?;

            tracing::debug!(entry = %name, "Added");
            entries.push(name);
        }

        zip.finish()?.flush()?;
        Ok(entries)
    }

    /// Files eligible for the archive, in file-name order per directory.
    pub fn collect_files(&self, skill_dir: &Path) -> io::Result<Vec<PathBuf>> {
        let walker = WalkDir::new(skill_dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.prunes(e));

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if self.rules.skips_file(&name) {
                tracing::debug!(path = %entry.path().display(), "Excluded");
                continue;
            }

            // Symlinked files are archived by content; a dangling link fails the walk.
            let is_file = if file_type.is_symlink() {
                fs::metadata(entry.path())
                    .map_err(|e| {
                        io::Error::new(e.kind(), format!("{}: {e}", entry.path().display()))
                    })?
                    .is_file()
            } else {
                file_type.is_file()
            };
            if !is_file {
                tracing::warn!(
                    path = %entry.path().display(),
                    "Skipping entry that is not a regular file"
                );
                continue;
            }

            files.push(entry.into_path());
        }

        Ok(files)
    }

    fn prunes(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self.rules.skips_dir(&entry.file_name().to_string_lossy())
    }
}

pub fn package_skill(
    skill_dir: &Path,
    output_dir: Option<&Path>,
) -> Result<PackagedSkill, PackageError> {
    SkillPackager::new()
        .with_output(OutputLocation::from_arg(output_dir))
        .package(skill_dir)
}

/// Picks the skill directory when none is given: the parent of a `scripts` working directory,
/// or the working directory itself when it holds a `SKILL.md`.
pub fn infer_skill_dir(cwd: &Path) -> Option<PathBuf> {
    if cwd.file_name().is_some_and(|n| n == "scripts") {
        return cwd.parent().map(Path::to_path_buf);
    }

    skills::has_manifest(cwd).then(|| cwd.to_path_buf())
}

fn resolve_skill_dir(path: &Path) -> Result<PathBuf, PackageError> {
    let absolute =
        std::path::absolute(path).map_err(|_| PackageError::NotFound(path.to_path_buf()))?;

    if !absolute.exists() {
        return Err(PackageError::NotFound(absolute));
    }
    if !absolute.is_dir() {
        return Err(PackageError::NotADirectory(absolute));
    }

    fs::canonicalize(&absolute).map_err(|_| PackageError::NotFound(absolute))
}

fn output_hint(output: &OutputLocation) -> PathBuf {
    match output {
        OutputLocation::CurrentDir => PathBuf::from("."),
        OutputLocation::Dir(dir) => dir.clone(),
    }
}

/// Zip entry name of `path` relative to `base`, always `/`-separated.
fn entry_name(path: &Path, base: &Path) -> io::Result<String> {
    let relative = path
        .strip_prefix(base)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    Ok(parts.join("/"))
}

#[cfg(unix)]
fn with_permissions(options: SimpleFileOptions, path: &Path) -> io::Result<SimpleFileOptions> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(path)?.permissions().mode();
    Ok(options.unix_permissions(mode))
}

#[cfg(not(unix))]
fn with_permissions(options: SimpleFileOptions, _path: &Path) -> io::Result<SimpleFileOptions> {
    Ok(options)
}
