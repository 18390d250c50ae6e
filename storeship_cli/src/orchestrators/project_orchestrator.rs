//! Project inspection commands: repository status and build-config checks

use std::path::Path;

use anyhow::{Result, bail};
use colored::Colorize;

use crate::build_config::{BuildProfile, validate_custom_build_config};
use crate::git::GitClient;

/// Orchestrator for the `project` command family
#[derive(Default)]
pub struct ProjectOrchestrator {
    git: GitClient,
}

impl ProjectOrchestrator {
    /// `project status`: repository root, branch, and short status
    pub async fn status(&self) -> Result<()> {
        if !self.git.is_installed().await? {
            bail!("git is not installed; install it to use project commands");
        }
        if !self.git.repo_exists().await {
            bail!("The current directory is not inside a git repository");
        }

        let root = self.git.root_directory().await?;
        eprintln!("{} {}", "Repository:".bold(), root.display());

        match self.git.branch_name().await {
            Some(branch) => eprintln!("{} {}", "Branch:".bold(), branch.cyan()),
            None => eprintln!("{} {}", "Branch:".bold(), "(detached)".dimmed()),
        }

        let status = self.git.status(true).await?;
        if status.trim().is_empty() {
            eprintln!("{}", "Working tree clean.".green());
        } else {
            eprintln!("{}", "Uncommitted changes:".yellow());
            eprint!("{status}");
        }
        Ok(())
    }

    /// `project diff`: stream uncommitted changes to the terminal
    pub async fn diff(&self) -> Result<()> {
        if !self.git.repo_exists().await {
            bail!("The current directory is not inside a git repository");
        }
        self.git.diff().await
    }

    /// `project validate-config`: check a custom build configuration file
    pub fn validate_config(&self, project_dir: &Path, config_filename: Option<&str>) -> Result<()> {
        let profile = BuildProfile {
            config: config_filename.map(str::to_string),
        };
        match validate_custom_build_config(project_dir, &profile)? {
            None => eprintln!("No custom build configuration requested; nothing to validate."),
            Some(metadata) => {
                let name = metadata.workflow_name.as_deref().unwrap_or("(unnamed)");
                eprintln!(
                    "{} custom build configuration is valid (workflow: {})",
                    "✓".green(),
                    name.cyan()
                );
            }
        }
        Ok(())
    }
}
