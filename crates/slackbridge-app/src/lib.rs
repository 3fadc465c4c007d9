pub mod bridge;
pub mod cli;
pub mod config;

pub use cli::Cli;
pub use config::{Config, ConfigError};

/// Record a fatal error in the log before the process exits.
pub fn report_fatal(error: &anyhow::Error) {
    tracing::error!(error = %format!("{error:#}"), "slackbridge stopped");
}
