//! Provisioning-profile command orchestrator

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use base64::Engine;
use chrono::{DateTime, Utc};
use colored::Colorize;
use dialoguer::Password;
use log::debug;
use storeship_client_core::appstore::{AuthContext, SecretString, authenticate};
use storeship_client_core::provisioning::{
    DistributionCertificate, ProfileClass, ProfileService, ProvisioningProfile,
    ProvisioningProfileStoreInfo, select_backend,
};

use crate::config::AppConfig;
use crate::progress::SpinnerReporter;
use crate::terminal;

/// Output format for profile listings
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Orchestrator for the `profiles` command family
pub struct ProfileOrchestrator {
    config: AppConfig,
    service: ProfileService,
}

impl ProfileOrchestrator {
    pub fn new(config: AppConfig) -> Result<Self> {
        let backend = select_backend(&config.client)?;
        let spinner_enabled = config.output.progress_enabled && terminal::is_interactive();
        let service = ProfileService::new(backend)
            .with_reporter(Arc::new(SpinnerReporter::new(spinner_enabled)));
        Ok(Self { config, service })
    }

    async fn auth(&self) -> Result<AuthContext> {
        authenticate(&self.config.client)
            .await
            .context("Failed to authenticate with the store")
    }

    /// `profiles list`
    pub async fn list(
        &self,
        bundle_identifier: &str,
        class: ProfileClass,
        format: OutputFormat,
    ) -> Result<()> {
        let auth = self.auth().await?;
        let profiles = self
            .service
            .list_profiles(&auth, bundle_identifier, class)
            .await?;

        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&profiles)?),
            OutputFormat::Text => render_profiles(bundle_identifier, &profiles),
        }
        Ok(())
    }

    /// `profiles create`
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        bundle_identifier: &str,
        name: &str,
        cert_p12_path: &Path,
        cert_password: Option<String>,
        class: ProfileClass,
        output: Option<PathBuf>,
    ) -> Result<()> {
        let certificate = load_certificate(cert_p12_path, cert_password)?;
        let auth = self.auth().await?;
        let profile = self
            .service
            .create_profile(&auth, bundle_identifier, &certificate, name, class)
            .await?;
        finish_profile(&profile, output.as_deref())
    }

    /// `profiles use-existing`
    #[allow(clippy::too_many_arguments)]
    pub async fn use_existing(
        &self,
        bundle_identifier: &str,
        profile_id: &str,
        cert_p12_path: &Path,
        cert_password: Option<String>,
        class: ProfileClass,
        output: Option<PathBuf>,
    ) -> Result<()> {
        let certificate = load_certificate(cert_p12_path, cert_password)?;
        let auth = self.auth().await?;
        let existing = ProvisioningProfile {
            profile_id: profile_id.to_string(),
            content: None,
            team_id: auth.team.id.clone(),
            team_name: auth.team.name.clone(),
        };
        let profile = self
            .service
            .use_existing_profile(&auth, bundle_identifier, &existing, &certificate, class)
            .await?;
        finish_profile(&profile, output.as_deref())
    }

    /// `profiles revoke`
    pub async fn revoke(&self, bundle_identifier: &str, class: ProfileClass) -> Result<()> {
        let auth = self.auth().await?;
        self.service
            .revoke_profiles(&auth, bundle_identifier, class)
            .await?;
        eprintln!(
            "{}",
            format!("Revoked all matching profiles for {bundle_identifier}").green()
        );
        Ok(())
    }
}

/// Read the certificate blob and resolve its password
fn load_certificate(
    path: &Path,
    password: Option<String>,
) -> Result<DistributionCertificate> {
    let blob = std::fs::read(path)
        .with_context(|| format!("Failed to read certificate file {}", path.display()))?;
    let password = match password {
        Some(p) => p,
        None if terminal::is_interactive() => Password::new()
            .with_prompt("Certificate password")
            .interact()
            .context("Failed to read certificate password")?,
        None => bail!("No certificate password given and no terminal to prompt on"),
    };
    Ok(DistributionCertificate::new(
        blob,
        SecretString::new(password),
    ))
}

/// Print the result and optionally write the decoded profile to disk
fn finish_profile(profile: &ProvisioningProfile, output: Option<&Path>) -> Result<()> {
    eprintln!(
        "{} profile {} (team {} - {})",
        "✓".green(),
        profile.profile_id.cyan(),
        profile.team_id,
        profile.team_name
    );

    if let Some(path) = output {
        let content = profile
            .content
            .as_deref()
            .context("The store returned no profile content to save")?;
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(content)
            .context("Profile content is not valid base64")?;
        std::fs::write(path, decoded)
            .with_context(|| format!("Failed to write profile to {}", path.display()))?;
        eprintln!("Saved profile to {}", path.display());
    } else {
        debug!("no output path given, profile content not persisted");
    }
    Ok(())
}

fn render_profiles(bundle_identifier: &str, profiles: &[ProvisioningProfileStoreInfo]) {
    if profiles.is_empty() {
        eprintln!("{}", "No matching provisioning profiles found.".yellow());
        return;
    }

    eprintln!(
        "{}",
        format!("Provisioning profiles for {bundle_identifier}:")
            .bold()
            .cyan()
    );
    for profile in profiles {
        let expires = profile
            .expires
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let status = profile.status.as_deref().unwrap_or("UNKNOWN");
        let status_display = match status {
            "ACTIVE" => status.green(),
            "INVALID" => status.red(),
            other => other.normal(),
        };

        eprintln!();
        eprintln!("  {} ({})", profile.name.bold(), profile.profile_id);
        eprintln!(
            "    {} • expires {} • {}",
            status_display, expires, profile.distribution_method
        );
        if !profile.certificates.is_empty() {
            let serials: Vec<&str> = profile
                .certificates
                .iter()
                .map(|c| c.serial_number.as_str())
                .collect();
            eprintln!("    certificates: {}", serials.join(", ").dimmed());
        }
    }
}
