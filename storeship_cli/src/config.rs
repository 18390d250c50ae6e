//! Layered CLI configuration
//!
//! Priority: defaults < config file < `STORESHIP_` environment variables.
//! The file lives at an XDG-compliant path and is plain TOML.

use anyhow::{Context, Result, bail};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use storeship_client_core::ClientConfig;

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub default_format: String,
    pub color_enabled: bool,
    pub progress_enabled: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            color_enabled: true,
            progress_enabled: true,
        }
    }
}

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with default XDG-compliant paths
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// Get the default XDG-compliant configuration path
    fn default_config_path() -> PathBuf {
        #[cfg(not(target_os = "windows"))]
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("storeship/config.toml");
        }

        #[cfg(target_os = "macos")]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("Library/Application Support/storeship/config.toml")
        }

        #[cfg(target_os = "windows")]
        {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("storeship\\config.toml")
        }

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config/storeship/config.toml")
        }
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        figment = figment.merge(Env::prefixed("STORESHIP_").split("__"));

        figment.extract().context("Failed to load configuration")
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.load()?;
        let value = toml::Value::try_from(&config)?;
        let mut current = &value;
        for segment in key.split('.') {
            current = current
                .get(segment)
                .with_context(|| format!("Unknown configuration key: {key}"))?;
        }
        Ok(render_value(key, current))
    }

    /// Set a configuration value by key (dot notation) in the config file
    pub fn set(&self, key: &str, raw: &str) -> Result<()> {
        let mut segments = key.split('.').collect::<Vec<_>>();
        let leaf = match segments.pop() {
            Some(leaf) if !segments.is_empty() => leaf,
            _ => bail!("Configuration keys use section.field notation, e.g. client.team_id"),
        };

        let mut root: toml::Value = if self.config_path.exists() {
            let text = fs::read_to_string(&self.config_path)?;
            toml::from_str(&text)
                .with_context(|| format!("Config file {} is not valid TOML", self.config_path.display()))?
        } else {
            toml::Value::Table(toml::map::Map::new())
        };

        let mut current = &mut root;
        for segment in &segments {
            let table = current
                .as_table_mut()
                .with_context(|| format!("Configuration key {key} does not name a field"))?;
            current = table
                .entry((*segment).to_string())
                .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
        }
        let table = current
            .as_table_mut()
            .with_context(|| format!("Configuration key {key} does not name a field"))?;
        table.insert(leaf.to_string(), parse_value(raw));

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.config_path, toml::to_string_pretty(&root)?)?;
        Ok(())
    }

    /// Render the full effective configuration, secrets redacted
    pub fn list(&self) -> Result<String> {
        let config = self.load()?;
        let value = toml::Value::try_from(&config)?;
        let mut out = String::new();
        flatten("", &value, &mut out);
        Ok(out)
    }
}

/// Interpret a raw CLI value as bool, integer, or string
fn parse_value(raw: &str) -> toml::Value {
    if let Ok(b) = raw.parse::<bool>() {
        return toml::Value::Boolean(b);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    toml::Value::String(raw.to_string())
}

fn is_secret(key: &str) -> bool {
    key.contains("password") || key.contains("private_key")
}

fn render_value(key: &str, value: &toml::Value) -> String {
    if is_secret(key) {
        let shown = match value {
            toml::Value::String(s) if s.is_empty() => "(unset)",
            _ => "********",
        };
        return shown.to_string();
    }
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn flatten(prefix: &str, value: &toml::Value, out: &mut String) {
    match value {
        toml::Value::Table(table) => {
            for (k, v) in table {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten(&key, v, out);
            }
        }
        other => {
            out.push_str(&format!("{prefix} = {}\n", render_value(prefix, other)));
        }
    }
}
