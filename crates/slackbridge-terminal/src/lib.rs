// Terminal session registry
//
// Wraps an external terminal multiplexer (tmux) so the bridge can list named
// sessions, type into them and read their screens without ever creating or
// destroying a session itself.

mod manager;
pub mod backend;
mod tmux_backend;

// Re-export public API
pub use manager::SessionRegistry;
pub use backend::SessionHost;
pub use tmux_backend::TmuxHost;

// Constants
pub const CAPTURE_LINES: usize = 50;
pub const NO_SESSION_PLACEHOLDER: &str = "(no session)";
pub const EMPTY_PLACEHOLDER: &str = "(empty)";
