//! Thin wrappers over the local git executable
//!
//! Every operation is a direct pass-through with a fixed argument list.
//! Presence checks distinguish "git is not installed" from real failures;
//! the branch lookup is advisory and never propagates an error.

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{Context, Result, bail};
use tokio::process::Command;

/// Handle to the git executable
#[derive(Debug, Clone)]
pub struct GitClient {
    program: String,
    cwd: Option<PathBuf>,
}

impl Default for GitClient {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            cwd: None,
        }
    }
}

impl GitClient {
    /// Use a different executable name. Intended for tests.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            cwd: None,
        }
    }

    /// Run against a repository other than the current directory
    pub fn in_dir(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        command
    }

    async fn run(&self, args: &[&str]) -> Result<std::process::Output> {
        let output = self
            .command()
            .args(args)
            .output()
            .await
            .with_context(|| format!("failed to run {} {}", self.program, args.join(" ")))?;
        if !output.status.success() {
            bail!(
                "{} {} failed: {}",
                self.program,
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(output)
    }

    /// `git status -s`, with or without untracked files
    pub async fn status(&self, show_untracked: bool) -> Result<String> {
        let untracked = if show_untracked { "-uall" } else { "-uno" };
        let output = self.run(&["status", "-s", untracked]).await?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// `git --no-pager diff`, streamed straight to the terminal
    pub async fn diff(&self) -> Result<()> {
        let status = self
            .command()
            .args(["--no-pager", "diff"])
            .stdin(Stdio::null())
            .status()
            .await
            .context("failed to run git diff")?;
        if !status.success() {
            bail!("git diff failed");
        }
        Ok(())
    }

    /// `git add [--intent-to-add] <file>`
    pub async fn add(&self, file: &str, intent_to_add: bool) -> Result<()> {
        if intent_to_add {
            self.run(&["add", "--intent-to-add", file]).await?;
        } else {
            self.run(&["add", file]).await?;
        }
        Ok(())
    }

    /// `git rev-parse --show-toplevel`
    pub async fn root_directory(&self) -> Result<PathBuf> {
        let output = self.run(&["rev-parse", "--show-toplevel"]).await?;
        Ok(PathBuf::from(
            String::from_utf8_lossy(&output.stdout).trim(),
        ))
    }

    /// Whether the working directory is inside a git repository
    pub async fn repo_exists(&self) -> bool {
        self.run(&["rev-parse", "--git-dir"]).await.is_ok()
    }

    /// Whether a usable git executable is on the PATH
    ///
    /// A missing executable is `false`; any other failure propagates.
    pub async fn is_installed(&self) -> Result<bool> {
        match self.command().arg("--help").output().await {
            Ok(output) if output.status.success() => Ok(true),
            Ok(output) => bail!(
                "git --help failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).context("failed to run git --help"),
        }
    }

    /// Current branch name, best effort; `None` on any failure
    pub async fn branch_name(&self) -> Option<String> {
        let output = self
            .run(&["rev-parse", "--abbrev-ref", "HEAD"])
            .await
            .ok()?;
        let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!name.is_empty()).then_some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOGUS_PROGRAM: &str = "storeship-no-such-git-a8f31";

    #[tokio::test]
    async fn test_is_installed_false_when_executable_is_absent() {
        let git = GitClient::with_program(BOGUS_PROGRAM);
        assert!(!git.is_installed().await.unwrap());
    }

    #[tokio::test]
    async fn test_branch_name_swallows_all_failures() {
        let git = GitClient::with_program(BOGUS_PROGRAM);
        assert_eq!(git.branch_name().await, None);
    }

    #[tokio::test]
    async fn test_repo_exists_false_when_executable_is_absent() {
        let git = GitClient::with_program(BOGUS_PROGRAM);
        assert!(!git.repo_exists().await);
    }
}
