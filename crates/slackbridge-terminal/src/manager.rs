use std::sync::Arc;

use tracing::{debug, warn};

use super::backend::SessionHost;
use super::tmux_backend::TmuxHost;
use super::{CAPTURE_LINES, EMPTY_PLACEHOLDER, NO_SESSION_PLACEHOLDER};

/// Session registry over a pluggable host.
///
/// Every operation degrades instead of failing: a host that is not running
/// (or cannot be spawned) looks like a host with no sessions.
#[derive(Clone)]
pub struct SessionRegistry {
    host: Arc<dyn SessionHost>,
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("host", &self.host.host_name())
            .finish()
    }
}

impl SessionRegistry {
    /// Create a registry backed by tmux from `PATH`
    pub fn tmux() -> Self {
        Self::with_host(Arc::new(TmuxHost::new()))
    }

    /// Create a registry with a specific host
    pub fn with_host(host: Arc<dyn SessionHost>) -> Self {
        Self { host }
    }

    /// Get the host name being used
    pub fn host_name(&self) -> &str {
        self.host.host_name()
    }

    /// List running session names; empty when the host is unavailable
    pub async fn list_sessions(&self) -> Vec<String> {
        match self.host.list_sessions().await {
            Ok(sessions) => sessions,
            Err(e) => {
                debug!(error = %e, "listing sessions failed, treating as none");
                Vec::new()
            }
        }
    }

    /// Check if a session exists
    pub async fn session_exists(&self, name: &str) -> bool {
        match self.host.has_session(name).await {
            Ok(exists) => exists,
            Err(e) => {
                debug!(session = name, error = %e, "has-session failed");
                false
            }
        }
    }

    /// Type `text` into the session and press the commit key.
    ///
    /// Returns `false` without touching the host when the session does not
    /// exist, or when the host rejects either keystroke batch. The receiving
    /// program's reaction is never observed.
    pub async fn send_text(&self, name: &str, text: &str) -> bool {
        if !self.session_exists(name).await {
            return false;
        }

        if let Err(e) = self.host.send_literal(name, text).await {
            warn!(session = name, error = %e, "sending literal text failed");
            return false;
        }
        if let Err(e) = self.host.send_commit(name).await {
            warn!(session = name, error = %e, "sending commit key failed");
            return false;
        }

        true
    }

    /// Capture the session screen, trimmed and bounded to the last
    /// [`CAPTURE_LINES`] lines
    pub async fn capture_screen(&self, name: &str) -> String {
        if !self.session_exists(name).await {
            return NO_SESSION_PLACEHOLDER.to_string();
        }

        let raw = match self.host.capture_pane(name, CAPTURE_LINES).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(session = name, error = %e, "capture-pane failed");
                String::new()
            }
        };

        let bounded = last_lines(raw.trim(), CAPTURE_LINES);
        if bounded.is_empty() {
            EMPTY_PLACEHOLDER.to_string()
        } else {
            bounded
        }
    }
}

/// Keep at most the last `limit` lines of `text`
fn last_lines(text: &str, limit: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let skip = lines.len().saturating_sub(limit);
    lines[skip..].join("\n")
}
