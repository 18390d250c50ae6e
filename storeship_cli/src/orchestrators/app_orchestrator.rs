//! App-ensure command orchestrator

use anyhow::{Context, Result, bail};
use colored::Colorize;
use dialoguer::Input;
use log::debug;
use storeship_client_core::apps::{CreateAppOptions, ensure_app_store_app_exists};
use storeship_client_core::appstore::authenticate;

use crate::config::AppConfig;
use crate::git::GitClient;
use crate::terminal;

/// Arguments for `app ensure`
#[derive(Debug, Clone)]
pub struct EnsureAppArgs {
    pub bundle_identifier: String,
    pub app_name: Option<String>,
    pub language: Option<String>,
    pub company_name: Option<String>,
    pub sku: Option<String>,
}

/// Orchestrator for the `app` command family
pub struct AppOrchestrator {
    config: AppConfig,
}

impl AppOrchestrator {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Make sure the store app (and its bundle identifier) exists
    pub async fn ensure(&self, args: EnsureAppArgs) -> Result<()> {
        warn_on_dirty_worktree().await;

        let app_name = match args.app_name {
            Some(name) => name,
            None if terminal::is_interactive() => prompt_for_app_name()?,
            None => bail!("No app name given and no terminal to prompt on; pass --app-name"),
        };

        let auth = authenticate(&self.config.client)
            .await
            .context("Failed to authenticate with the store")?;

        let options = CreateAppOptions {
            app_name,
            bundle_identifier: args.bundle_identifier,
            language: args.language,
            company_name: args.company_name,
            sku: args.sku,
        };

        let result = ensure_app_store_app_exists(&auth, &options).await?;

        eprintln!();
        eprintln!(
            "{} app is ready on the store (id {})",
            "✓".green(),
            result.asc_app_id.cyan()
        );
        eprintln!("  signed in as {}", result.apple_id);
        Ok(())
    }
}

fn prompt_for_app_name() -> Result<String> {
    let name: String = Input::new()
        .with_prompt("What would you like to name your app?")
        .validate_with(|value: &String| {
            if value.trim().is_empty() {
                Err("App name cannot be empty!")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .context("Failed to read app name")?;
    Ok(name)
}

/// Advisory only: submission works from a dirty tree, but say so
async fn warn_on_dirty_worktree() {
    let git = GitClient::default();
    if !git.repo_exists().await {
        return;
    }
    if let Some(branch) = git.branch_name().await {
        debug!("submitting from branch {branch}");
    }
    match git.status(false).await {
        Ok(status) if !status.trim().is_empty() => {
            eprintln!(
                "{}",
                "Warning: you have uncommitted changes in this repository.".yellow()
            );
        }
        Ok(_) => {}
        Err(e) => debug!("git status unavailable: {e}"),
    }
}
