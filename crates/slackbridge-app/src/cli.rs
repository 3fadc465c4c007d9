use std::path::PathBuf;

use clap::Parser;
use slackbridge_core::pending::DEFAULT_PENDING_CAPACITY;

/// CLI arguments for slackbridge
#[derive(Parser, Debug)]
#[command(name = "slackbridge")]
#[command(about = "Relay Slack direct messages into tmux sessions")]
#[command(version)]
pub struct Cli {
    /// Extra env file consulted before ./.env and the default profile
    #[arg(long, value_name = "PATH", env = "SLACKBRIDGE_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Directory for bot.log (default: ~/.claude/slack-bot)
    #[arg(long, value_name = "DIR", env = "SLACKBRIDGE_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// tmux binary to drive
    #[arg(long, value_name = "PATH", env = "SLACKBRIDGE_TMUX_BIN", default_value = "tmux")]
    pub tmux_bin: PathBuf,

    /// Maximum number of unanswered session pickers kept at once
    #[arg(
        long,
        value_name = "N",
        env = "SLACKBRIDGE_PENDING_CAPACITY",
        default_value_t = DEFAULT_PENDING_CAPACITY,
        value_parser = clap::value_parser!(usize)
    )]
    pub pending_capacity: usize,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["slackbridge"]).unwrap();
        assert_eq!(cli.tmux_bin, PathBuf::from("tmux"));
        assert!(!cli.verbose);
        assert!(cli.env_file.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "slackbridge",
            "--env-file",
            "/tmp/bridge.env",
            "--tmux-bin",
            "/usr/local/bin/tmux",
            "--pending-capacity",
            "8",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.env_file, Some(PathBuf::from("/tmp/bridge.env")));
        assert_eq!(cli.tmux_bin, PathBuf::from("/usr/local/bin/tmux"));
        assert_eq!(cli.pending_capacity, 8);
        assert!(cli.verbose);
    }

    #[test]
    fn test_rejects_non_numeric_capacity() {
        assert!(Cli::try_parse_from(["slackbridge", "--pending-capacity", "lots"]).is_err());
    }
}
