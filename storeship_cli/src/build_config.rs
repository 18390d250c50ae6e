//! Custom build-configuration validation
//!
//! A build profile may name a custom workflow file, expected under a fixed
//! subdirectory of the project. Validation happens in two phases so the
//! caller can tell a YAML syntax problem from a structurally invalid
//! workflow; anything else propagates unchanged.

use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::Deserialize;
use thiserror::Error;

/// Directory convention for custom build configuration files
pub const CUSTOM_BUILD_CONFIG_DIR: &str = ".eas/build";

/// The slice of a build profile this module cares about
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildProfile {
    /// Filename of a custom workflow config, relative to the convention dir
    #[serde(default)]
    pub config: Option<String>,
}

/// Metadata extracted from a validated workflow config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomBuildConfigMetadata {
    pub workflow_name: Option<String>,
}

/// Validation failures, distinguishable by kind
#[derive(Error, Debug)]
pub enum BuildConfigError {
    #[error("Custom build configuration file {path} does not exist.")]
    NotFound { path: String },

    #[error("Custom build configuration file {path} contains invalid YAML.\n\n{message}")]
    InvalidYaml { path: String, message: String },

    #[error(
        "Custom build configuration file {path} contains invalid configuration. Please check the docs!\n{message}"
    )]
    InvalidConfig { path: String, message: String },

    /// Any other failure, passed through unchanged
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WorkflowConfig {
    build: BuildSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BuildSection {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    steps: Vec<StepEntry>,
}

/// A step is either a bare built-in function name or a detailed mapping
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StepEntry {
    FunctionCall(String),
    Detailed(serde_yaml::Mapping),
}

/// Relative location of a named config file under the convention directory
pub fn custom_build_config_path(config_filename: &str) -> PathBuf {
    Path::new(CUSTOM_BUILD_CONFIG_DIR).join(config_filename)
}

/// Validate the profile's custom workflow config, if it names one
///
/// Returns `Ok(None)` when the profile requests no custom config; absence of
/// the request is not an error.
pub fn validate_custom_build_config(
    project_dir: &Path,
    profile: &BuildProfile,
) -> Result<Option<CustomBuildConfigMetadata>, BuildConfigError> {
    let Some(config_filename) = &profile.config else {
        return Ok(None);
    };

    let relative_path = custom_build_config_path(config_filename);
    let config_path = project_dir.join(&relative_path);
    let display_path = relative_path.display().to_string().bold().to_string();
    if !config_path.exists() {
        return Err(BuildConfigError::NotFound { path: display_path });
    }

    let text = std::fs::read_to_string(&config_path)?;

    // Phase one: the document must be YAML at all
    let value: serde_yaml::Value =
        serde_yaml::from_str(&text).map_err(|e| BuildConfigError::InvalidYaml {
            path: display_path.clone(),
            message: e.to_string(),
        })?;

    // Phase two: it must have the workflow shape
    let config: WorkflowConfig =
        serde_yaml::from_value(value).map_err(|e| BuildConfigError::InvalidConfig {
            path: display_path.clone(),
            message: e.to_string(),
        })?;

    if config.build.steps.is_empty() {
        return Err(BuildConfigError::InvalidConfig {
            path: display_path,
            message: "a workflow must define at least one build step".to_string(),
        });
    }

    Ok(Some(CustomBuildConfigMetadata {
        workflow_name: config.build.name,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(dir: &Path, filename: &str, contents: &str) {
        let config_dir = dir.join(CUSTOM_BUILD_CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(filename), contents).unwrap();
    }

    #[test]
    fn test_no_config_requested_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let result =
            validate_custom_build_config(dir.path(), &BuildProfile::default()).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_missing_file_fails_before_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let profile = BuildProfile {
            config: Some("production.yml".to_string()),
        };
        let err = validate_custom_build_config(dir.path(), &profile).unwrap_err();
        assert!(matches!(err, BuildConfigError::NotFound { .. }));
        assert!(err.to_string().contains("production.yml"));
    }

    #[test]
    fn test_syntax_error_is_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "broken.yml", "build:\n  steps: [unclosed");
        let profile = BuildProfile {
            config: Some("broken.yml".to_string()),
        };
        let err = validate_custom_build_config(dir.path(), &profile).unwrap_err();
        assert!(matches!(err, BuildConfigError::InvalidYaml { .. }));
    }

    #[test]
    fn test_wrong_shape_is_invalid_config_not_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        // Valid YAML, wrong schema
        write_config(dir.path(), "shape.yml", "not_build:\n  hello: world\n");
        let profile = BuildProfile {
            config: Some("shape.yml".to_string()),
        };
        let err = validate_custom_build_config(dir.path(), &profile).unwrap_err();
        assert!(matches!(err, BuildConfigError::InvalidConfig { .. }));
    }

    #[test]
    fn test_empty_steps_is_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "empty.yml", "build:\n  name: noop\n  steps: []\n");
        let profile = BuildProfile {
            config: Some("empty.yml".to_string()),
        };
        let err = validate_custom_build_config(dir.path(), &profile).unwrap_err();
        assert!(matches!(err, BuildConfigError::InvalidConfig { .. }));
    }

    #[test]
    fn test_valid_config_yields_workflow_name() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            "release.yml",
            "build:\n  name: release build\n  steps:\n    - checkout\n    - run:\n        command: make\n",
        );
        let profile = BuildProfile {
            config: Some("release.yml".to_string()),
        };
        let meta = validate_custom_build_config(dir.path(), &profile)
            .unwrap()
            .unwrap();
        assert_eq!(meta.workflow_name.as_deref(), Some("release build"));
    }

    #[test]
    fn test_workflow_name_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "anon.yml", "build:\n  steps:\n    - checkout\n");
        let profile = BuildProfile {
            config: Some("anon.yml".to_string()),
        };
        let meta = validate_custom_build_config(dir.path(), &profile)
            .unwrap()
            .unwrap();
        assert_eq!(meta.workflow_name, None);
    }
}
