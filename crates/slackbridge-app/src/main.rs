use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use slackbridge::{bridge, Cli, Config};
use slackbridge_core::{Router, RouterConfig};
use slackbridge_slack::SlackApi;
use slackbridge_terminal::{SessionRegistry, TmuxHost};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        slackbridge::report_fatal(&e);
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let log_dir = match &cli.log_dir {
        Some(dir) => dir.clone(),
        None => slackbridge_logging::default_log_dir()?,
    };
    let log_file = slackbridge_logging::init(&log_dir, cli.verbose)
        .with_context(|| format!("Failed to initialize logging in {}", log_dir.display()))?;

    let config = Config::load(cli.env_file.as_deref()).context("Invalid configuration")?;

    let sessions = SessionRegistry::with_host(Arc::new(TmuxHost::with_binary(&cli.tmux_bin)));
    let mut router_config = RouterConfig::new(&config.allowed_user, &config.default_session);
    router_config.pending_capacity = cli.pending_capacity;
    let router = Arc::new(Router::new(sessions, router_config));

    println!("{}", "slackbridge".bright_cyan().bold());
    println!("  {} {}", "allowed user:".dimmed(), config.allowed_user);
    println!("  {} {}", "default session:".dimmed(), config.default_session);
    println!("  {} {}", "log file:".dimmed(), log_file.display());

    tracing::info!(
        allowed_user = %config.allowed_user,
        default_session = %config.default_session,
        pending_capacity = cli.pending_capacity,
        "Starting Slack bridge"
    );

    let api = SlackApi::new(config.bot_token, config.app_token);
    bridge::run(api, router).await
}
