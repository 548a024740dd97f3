use anyhow::{Context, Result};
use console::style;
use skillpack_core::package::{self, OutputLocation, SkillPackager};
use skillpack_core::{PackConfig, PackageError, skills};
use std::path::{Path, PathBuf};

/// Runs a command and reports whether it succeeded; `false` maps to a non-zero exit code.
pub fn handle_command(command: SkillsCommands) -> Result<bool> {
    match command {
        SkillsCommands::Validate { skill_dir } => Ok(validate_skill(&skill_dir)),
        SkillsCommands::Package {
            skill_dir,
            output_dir,
            config,
        } => package_skill(skill_dir, output_dir, config.as_deref()),
    }
}

fn validate_skill(skill_dir: &Path) -> bool {
    let (valid, message) = skills::quick_validate(skill_dir);
    println!("{}", message);
    valid
}

fn package_skill(
    skill_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    config: Option<&Path>,
) -> Result<bool> {
    let skill_dir = match skill_dir {
        Some(dir) => dir,
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            match package::infer_skill_dir(&cwd) {
                Some(dir) => dir,
                None => {
                    print_package_usage();
                    return Ok(false);
                }
            }
        }
    };

    let config = PackConfig::resolve(config, &skill_dir)?;
    let packager = SkillPackager::new()
        .with_rules(config.exclude)
        .with_output(OutputLocation::from_arg(output_dir));

    println!("{} Validating skill...", style("→").cyan());

    match packager.package(&skill_dir) {
        Ok(packaged) => {
            println!("{} {}", style("✓").green().bold(), skills::VALID_MESSAGE);
            println!();
            println!(
                "{} Created package at: {}",
                style("→").cyan(),
                packaged.archive.display()
            );
            for entry in &packaged.entries {
                println!("  Added: {}", entry);
            }
            println!();
            println!(
                "{} Successfully packaged skill to: {}",
                style("✓").green().bold(),
                packaged.archive.display()
            );
            Ok(true)
        }
        Err(PackageError::Validation(e)) => {
            println!("{} Validation failed: {}", style("✗").red().bold(), e);
            Ok(false)
        }
        Err(e) => {
            println!("{} Error: {}", style("✗").red().bold(), e);
            Ok(false)
        }
    }
}

fn print_package_usage() {
    println!("Usage: skillpack package <path/to/skill-folder> [output-directory]");
    println!();
    println!("Without a path, run it from a skill folder (one holding SKILL.md)");
    println!("or from that folder's scripts/ directory.");
}

#[derive(clap::Subcommand, Clone, Debug)]
pub enum SkillsCommands {
    /// Check the SKILL.md frontmatter of a skill directory
    Validate { skill_dir: PathBuf },
    /// Validate a skill directory and zip it into <name>.skill
    Package {
        skill_dir: Option<PathBuf>,
        output_dir: Option<PathBuf>,
        /// TOML file with [exclude] dirs/suffixes/files lists
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
