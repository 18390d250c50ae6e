//! External process related error types

use thiserror::Error;

/// Errors from spawning or running external tools
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The tool could not be started at all
    #[error("Failed to start external tool: {source}")]
    Spawn {
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but reported failure
    #[error("External tool '{tool}' failed with exit code {exit_code}: {stderr}")]
    ToolFailed {
        tool: String,
        exit_code: i32,
        stderr: String,
    },

    /// The tool produced output that could not be interpreted
    #[error("External tool '{tool}' produced unreadable output: {message}")]
    UnreadableOutput { tool: String, message: String },
}

impl ProcessError {
    /// Wrap a std io error from a spawn attempt
    pub fn from_std(source: std::io::Error) -> Self {
        Self::Spawn { source }
    }

    /// Create a tool failed error
    pub fn tool_failed(tool: &str, exit_code: i32, stderr: &str) -> Self {
        Self::ToolFailed {
            tool: tool.to_string(),
            exit_code,
            stderr: stderr.to_string(),
        }
    }

    /// Create an unreadable output error
    pub fn unreadable_output(tool: &str, message: impl Into<String>) -> Self {
        Self::UnreadableOutput {
            tool: tool.to_string(),
            message: message.into(),
        }
    }
}
