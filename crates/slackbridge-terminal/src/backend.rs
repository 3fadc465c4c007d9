/// Session host abstraction over the terminal multiplexer
use anyhow::Result;
use async_trait::async_trait;

/// Raw commands understood by a terminal-multiplexer host.
///
/// Implementations report host failures (binary missing, nonzero exit) as
/// `Err`. Mapping those failures onto degraded values is the job of
/// [`crate::SessionRegistry`], not of the host.
#[async_trait]
pub trait SessionHost: Send + Sync {
    /// Names of all running sessions, in host order
    async fn list_sessions(&self) -> Result<Vec<String>>;

    /// Whether the host can resolve `name` to a session
    async fn has_session(&self, name: &str) -> Result<bool>;

    /// Type `text` into the session literally (no key-name interpretation)
    async fn send_literal(&self, name: &str, text: &str) -> Result<()>;

    /// Press the commit key (Enter) in the session
    async fn send_commit(&self, name: &str) -> Result<()>;

    /// Capture the pane, reaching back at most `lines` lines into history
    async fn capture_pane(&self, name: &str, lines: usize) -> Result<String>;

    /// Get host name for debugging
    fn host_name(&self) -> &str;
}
