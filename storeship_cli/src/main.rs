use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use storeship_client_core::provisioning::ProfileClass;

mod build_config;
mod config;
mod git;
mod orchestrators;
mod progress;
mod terminal;

use crate::config::ConfigManager;
use crate::orchestrators::app_orchestrator::{AppOrchestrator, EnsureAppArgs};
use crate::orchestrators::profile_orchestrator::{OutputFormat, ProfileOrchestrator};
use crate::orchestrators::project_orchestrator::ProjectOrchestrator;

#[derive(Parser)]
#[command(name = "storeship")]
#[command(author, version, about = "App store credential and submission workflow automation", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage provisioning profiles
    Profiles {
        #[command(subcommand)]
        command: ProfilesCommand,
    },

    /// Manage the store app record
    App {
        #[command(subcommand)]
        command: AppCommand,
    },

    /// Inspect the local project
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ProfilesCommand {
    /// List provisioning profiles for a bundle identifier
    List {
        /// Bundle identifier of the app
        bundle_identifier: String,

        /// Profile class to list
        #[arg(long, value_enum, default_value = "general")]
        class: ClassArg,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: FormatArg,
    },

    /// Create a new provisioning profile
    Create {
        /// Bundle identifier of the app
        bundle_identifier: String,

        /// Name for the new profile
        #[arg(long)]
        name: String,

        /// Path to the distribution certificate (.p12)
        #[arg(long = "cert-p12", value_name = "PATH")]
        cert_p12: PathBuf,

        /// Password for the certificate; prompted when omitted
        #[arg(long = "cert-password")]
        cert_password: Option<String>,

        /// Profile class to create
        #[arg(long, value_enum, default_value = "general")]
        class: ClassArg,

        /// Write the signed profile to this path
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Re-issue an existing profile with a distribution certificate
    UseExisting {
        /// Bundle identifier of the app
        bundle_identifier: String,

        /// Id of the existing profile on the store
        #[arg(long = "profile-id")]
        profile_id: String,

        /// Path to the distribution certificate (.p12)
        #[arg(long = "cert-p12", value_name = "PATH")]
        cert_p12: PathBuf,

        /// Password for the certificate; prompted when omitted
        #[arg(long = "cert-password")]
        cert_password: Option<String>,

        /// Profile class to target
        #[arg(long, value_enum, default_value = "general")]
        class: ClassArg,

        /// Write the signed profile to this path
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Revoke all matching provisioning profiles
    Revoke {
        /// Bundle identifier of the app
        bundle_identifier: String,

        /// Profile class to revoke
        #[arg(long, value_enum, default_value = "general")]
        class: ClassArg,
    },
}

#[derive(Subcommand)]
enum AppCommand {
    /// Create the store app and bundle identifier when missing
    Ensure {
        /// Bundle identifier of the app
        #[arg(long = "bundle-id")]
        bundle_identifier: String,

        /// App name; prompted when omitted
        #[arg(long = "app-name")]
        app_name: Option<String>,

        /// Primary locale, e.g. en-US
        #[arg(long)]
        language: Option<String>,

        /// Company name shown on the store
        #[arg(long = "company-name")]
        company_name: Option<String>,

        /// Store SKU; defaults to the bundle identifier
        #[arg(long)]
        sku: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProjectCommand {
    /// Show repository root, branch, and uncommitted changes
    Status,

    /// Show the diff of uncommitted changes
    Diff,

    /// Validate a custom build configuration file
    ValidateConfig {
        /// Custom build config filename under .eas/build/
        #[arg(long)]
        config: Option<String>,

        /// Project root directory
        #[arg(long = "project-dir", default_value = ".")]
        project_dir: PathBuf,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., client.team_id)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., client.team_id)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration values
    List,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ClassArg {
    Adhoc,
    General,
}

impl From<ClassArg> for ProfileClass {
    fn from(arg: ClassArg) -> Self {
        match arg {
            ClassArg::Adhoc => ProfileClass::AdHoc,
            ClassArg::General => ProfileClass::General,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("storeship_client_core", log::LevelFilter::Debug)
            .filter_module("storeship_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let manager = ConfigManager::new();

    match cli.command {
        Commands::Profiles { command } => {
            let config = manager.load().context("Failed to load configuration")?;
            let orchestrator = ProfileOrchestrator::new(config)?;
            match command {
                ProfilesCommand::List {
                    bundle_identifier,
                    class,
                    format,
                } => {
                    orchestrator
                        .list(&bundle_identifier, class.into(), format.into())
                        .await?;
                }
                ProfilesCommand::Create {
                    bundle_identifier,
                    name,
                    cert_p12,
                    cert_password,
                    class,
                    output,
                } => {
                    orchestrator
                        .create(
                            &bundle_identifier,
                            &name,
                            &cert_p12,
                            cert_password,
                            class.into(),
                            output,
                        )
                        .await?;
                }
                ProfilesCommand::UseExisting {
                    bundle_identifier,
                    profile_id,
                    cert_p12,
                    cert_password,
                    class,
                    output,
                } => {
                    orchestrator
                        .use_existing(
                            &bundle_identifier,
                            &profile_id,
                            &cert_p12,
                            cert_password,
                            class.into(),
                            output,
                        )
                        .await?;
                }
                ProfilesCommand::Revoke {
                    bundle_identifier,
                    class,
                } => {
                    orchestrator.revoke(&bundle_identifier, class.into()).await?;
                }
            }
        }
        Commands::App { command } => {
            let config = manager.load().context("Failed to load configuration")?;
            let orchestrator = AppOrchestrator::new(config);
            match command {
                AppCommand::Ensure {
                    bundle_identifier,
                    app_name,
                    language,
                    company_name,
                    sku,
                } => {
                    orchestrator
                        .ensure(EnsureAppArgs {
                            bundle_identifier,
                            app_name,
                            language,
                            company_name,
                            sku,
                        })
                        .await?;
                }
            }
        }
        Commands::Project { command } => {
            let orchestrator = ProjectOrchestrator::default();
            match command {
                ProjectCommand::Status => orchestrator.status().await?,
                ProjectCommand::Diff => orchestrator.diff().await?,
                ProjectCommand::ValidateConfig {
                    config,
                    project_dir,
                } => orchestrator.validate_config(&project_dir, config.as_deref())?,
            }
        }
        Commands::Config { command } => match command {
            ConfigCommand::Get { key } => println!("{}", manager.get(&key)?),
            ConfigCommand::Set { key, value } => {
                manager.set(&key, &value)?;
                eprintln!("Set {key}");
            }
            ConfigCommand::List => print!("{}", manager.list()?),
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
        }
    }

    Ok(())
}
