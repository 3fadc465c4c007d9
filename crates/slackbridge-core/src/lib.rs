//! Session routing for the chat-to-tmux bridge.
//!
//! An inbound instruction goes to the session it mentions, to the only live
//! session, or, when several are live, to whichever one the operator picks
//! from an interactive prompt. Picks are tracked in a single-use
//! [`PendingTable`] so a selection is delivered at most once.

pub mod commands;
pub mod event;
pub mod parser;
pub mod pending;
pub mod reply;
pub mod router;
pub mod selection;

pub use event::{ButtonClick, InboundMessage};
pub use parser::{parse_mention, strip_command_prefix, Command};
pub use pending::PendingTable;
pub use reply::{Control, ControlRow, ControlStyle, Reply};
pub use router::{Router, RouterConfig};
pub use selection::{Action, QuickKey, SelectionError, SelectionValue};
