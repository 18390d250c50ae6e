//! Runner for the legacy scripted automation tool
//!
//! The tool takes a verb as its first argument followed by positional
//! credentials and parameters, and prints a JSON object on its last stdout
//! line: `{"result": "success", ...}` or `{"result": "failure", "reason":
//! ...}`. Credentials are passed as arguments and must never be echoed into
//! errors or logs.

use std::path::{Path, PathBuf};

use log::debug;
use serde_json::Value;
use tokio::process::Command;

use crate::error::{ProcessError, Result};

/// Handle to the legacy automation tool
#[derive(Debug, Clone)]
pub struct LegacyRunner {
    program: PathBuf,
}

impl LegacyRunner {
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
        }
    }

    fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Run one verb with its positional arguments and return the JSON result
    pub async fn run_action(&self, verb: &str, args: &[&str]) -> Result<Value> {
        debug!("running legacy action '{verb}' with {} argument(s)", args.len());
        let output = Command::new(&self.program)
            .arg(verb)
            .args(args)
            .output()
            .await
            .map_err(ProcessError::from_std)?;

        let tool = self.tool_name();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProcessError::tool_failed(
                &tool,
                output.status.code().unwrap_or(-1),
                stderr.trim(),
            )
            .into());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let last_line = stdout
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .ok_or_else(|| ProcessError::unreadable_output(&tool, "no output produced"))?;

        let value: Value = serde_json::from_str(last_line).map_err(|e| {
            ProcessError::unreadable_output(&tool, format!("last line is not JSON: {e}"))
        })?;

        if value.get("result").and_then(Value::as_str) == Some("failure") {
            let reason = value
                .get("reason")
                .and_then(Value::as_str)
                .unwrap_or("unknown failure");
            return Err(ProcessError::tool_failed(&tool, 0, reason).into());
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_tool_fails_with_spawn_error() {
        let runner = LegacyRunner::new("definitely-not-a-real-tool-kd93a");
        let err = runner.run_action("list", &[]).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Process(ProcessError::Spawn { .. })
        ));
    }

    #[tokio::test]
    async fn test_success_result_passes_through() {
        // `echo` stands in for the tool: first arg is the verb, the JSON
        // payload comes back on stdout.
        let runner = LegacyRunner::new("echo");
        let value = runner
            .run_action(r#"{"result":"success","provisioningProfileId":"P1"}"#, &[])
            .await
            .unwrap();
        assert_eq!(
            value.get("provisioningProfileId").and_then(Value::as_str),
            Some("P1")
        );
    }

    #[tokio::test]
    async fn test_failure_result_maps_to_tool_failed() {
        let runner = LegacyRunner::new("echo");
        let err = runner
            .run_action(r#"{"result":"failure","reason":"bad credentials"}"#, &[])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("bad credentials"));
    }

    #[tokio::test]
    async fn test_non_json_output_is_unreadable() {
        let runner = LegacyRunner::new("echo");
        let err = runner.run_action("plain text", &[]).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Process(ProcessError::UnreadableOutput { .. })
        ));
    }
}
