// Logging module - log file location and tracing setup
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// File name of the bridge log inside the log directory
pub const LOG_FILE_NAME: &str = "bot.log";

/// Safely truncate a string to a maximum number of characters
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        // Reserve space for "..." suffix
        let trunc_chars = if max_chars >= 3 { max_chars - 3 } else { 0 };
        format!("{}...", s.chars().take(trunc_chars).collect::<String>())
    }
}

/// Default log directory (~/.claude/slack-bot)
pub fn default_log_dir() -> Result<PathBuf> {
    let home_dir = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Failed to get home directory")?;

    Ok(PathBuf::from(home_dir).join(".claude").join("slack-bot"))
}

/// Install the global tracing subscriber.
///
/// Events go to stderr and are appended to `<log_dir>/bot.log`. `RUST_LOG`
/// overrides the level; otherwise `info`, or `debug` when `verbose`.
/// Returns the path of the log file.
pub fn init(log_dir: &Path, verbose: bool) -> Result<PathBuf> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let log_path = log_dir.join(LOG_FILE_NAME);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_truncate_short_input_untouched() {
        assert_eq!(safe_truncate("run tests", 80), "run tests");
        assert_eq!(safe_truncate("", 5), "");
    }

    #[test]
    fn test_safe_truncate_counts_chars_not_bytes() {
        let text = "テスト実行して";
        assert_eq!(safe_truncate(text, 7), text);
        assert_eq!(safe_truncate(text, 5), "テス...");
    }

    #[test]
    fn test_safe_truncate_tiny_limit() {
        assert_eq!(safe_truncate("abcdef", 2), "...");
    }

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");

        let path = init(&log_dir, false).unwrap();
        assert_eq!(path, log_dir.join(LOG_FILE_NAME));
        assert!(path.exists());
    }
}
