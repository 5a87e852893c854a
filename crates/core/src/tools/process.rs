//! Common subprocess runner for command-line backed tools.
//!
//! Tools shell out to platform programs (`screencapture`, `import`,
//! `tesseract`, ...). This module spawns them with piped output and turns
//! spawn failures and non-zero exits into [`ToolError`]s.

use crate::tools::base::ToolError;
use std::process::Stdio;
use tokio::process::Command;

/// Captured output of a finished command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runner for subprocess-based tools.
pub struct CommandRunner;

impl CommandRunner {
    /// Run a command to completion and return its output.
    ///
    /// # Errors
    ///
    /// - `ToolError::Execution` if the command cannot be spawned
    /// - `ToolError::Execution` if it exits unsuccessfully; the message
    ///   carries the exit status and trimmed stderr
    pub async fn run(command: &str, args: &[String]) -> Result<CommandOutput, ToolError> {
        tracing::debug!(command, ?args, "spawning tool command");

        let output = Command::new(command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                ToolError::Execution(format!("Failed to spawn command '{command}': {e}"))
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            let detail = stderr.trim();
            return Err(ToolError::Execution(if detail.is_empty() {
                format!("'{command}' exited with {}", output.status)
            } else {
                format!("'{command}' exited with {}: {detail}", output.status)
            }));
        }

        Ok(CommandOutput { stdout, stderr })
    }

    /// Whether `program` resolves on `PATH`.
    pub fn is_installed(program: &str) -> bool {
        which::which(program).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_captures_stdout() {
        let output = CommandRunner::run("echo", &["hello".to_string()])
            .await
            .expect("echo should succeed");

        assert_eq!(output.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn test_run_invalid_command() {
        let result = CommandRunner::run("nonexistent-command-xyz", &[]).await;

        if let Err(ToolError::Execution(msg)) = result {
            assert!(msg.contains("Failed to spawn command"));
        } else {
            panic!("Expected Execution error");
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_reports_non_zero_exit() {
        let result = CommandRunner::run(
            "sh",
            &["-c".to_string(), "echo boom >&2; exit 3".to_string()],
        )
        .await;

        match result {
            Err(ToolError::Execution(msg)) => assert!(msg.contains("boom")),
            other => panic!("Expected Execution error, got {other:?}"),
        }
    }

    #[test]
    fn test_is_installed() {
        assert!(!CommandRunner::is_installed("nonexistent-command-xyz"));
    }
}
