/// Tmux-based session host
use super::backend::SessionHost;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

/// Session host driving an external tmux server
pub struct TmuxHost {
    /// Path or name of the tmux binary
    binary: PathBuf,
}

impl TmuxHost {
    /// Create a host that runs `tmux` from `PATH`
    pub fn new() -> Self {
        Self::with_binary("tmux")
    }

    /// Create a host that runs the given tmux binary
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Run a tmux command and return stdout
    async fn run_tmux_command(&self, args: &[String]) -> Result<String> {
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .await
            .with_context(|| format!("failed to run {}", self.binary.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "tmux {} failed: {}",
                args.first().map(String::as_str).unwrap_or(""),
                stderr.trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl Default for TmuxHost {
    fn default() -> Self {
        Self::new()
    }
}

/// Target naming exactly the session `name`, never a prefix match
fn session_target(name: &str) -> String {
    format!("={name}")
}

/// Active pane of exactly the session `name`
fn pane_target(name: &str) -> String {
    format!("={name}:")
}

fn args(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| part.to_string()).collect()
}

fn has_session_args(name: &str) -> Vec<String> {
    args(&["has-session", "-t", session_target(name).as_str()])
}

/// `--` ends option parsing so text starting with `-` is typed, not parsed
fn send_literal_args(name: &str, text: &str) -> Vec<String> {
    args(&["send-keys", "-t", pane_target(name).as_str(), "-l", "--", text])
}

fn send_commit_args(name: &str) -> Vec<String> {
    args(&["send-keys", "-t", pane_target(name).as_str(), "Enter"])
}

fn capture_pane_args(name: &str, lines: usize) -> Vec<String> {
    args(&["capture-pane", "-t", pane_target(name).as_str(), "-p", "-S", format!("-{lines}").as_str()])
}

/// Split `list-sessions` output into trimmed, non-blank names
pub(crate) fn parse_session_names(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl SessionHost for TmuxHost {
    async fn list_sessions(&self) -> Result<Vec<String>> {
        let stdout = self
            .run_tmux_command(&args(&["list-sessions", "-F", "#{session_name}"]))
            .await?;
        Ok(parse_session_names(&stdout))
    }

    async fn has_session(&self, name: &str) -> Result<bool> {
        let output = Command::new(&self.binary)
            .args(has_session_args(name))
            .output()
            .await
            .with_context(|| format!("failed to run {}", self.binary.display()))?;
        Ok(output.status.success())
    }

    async fn send_literal(&self, name: &str, text: &str) -> Result<()> {
        // -l disables key-name lookup so "Enter" in the text stays literal
        self.run_tmux_command(&send_literal_args(name, text)).await?;
        Ok(())
    }

    async fn send_commit(&self, name: &str) -> Result<()> {
        self.run_tmux_command(&send_commit_args(name)).await?;
        Ok(())
    }

    async fn capture_pane(&self, name: &str, lines: usize) -> Result<String> {
        self.run_tmux_command(&capture_pane_args(name, lines)).await
    }

    fn host_name(&self) -> &str {
        "tmux"
    }
}
