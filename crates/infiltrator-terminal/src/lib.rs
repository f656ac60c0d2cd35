//! Command interpreter and terminal subsystem.
//!
//! The terminal is a registry-based dispatch system. Commands implement the
//! `Command` trait and are registered by name. The [`Terminal`] owns the
//! filesystem arena and the narrative [`Session`], feeds typed lines through
//! the registry, and turns command output into scrollback, scripted reveals,
//! breach requests, and the launch-codes dialog.

mod commands;
pub mod decision;
mod interpreter;
pub mod remote_commands;
pub mod security_commands;
pub mod session;
mod terminal;

/// Register all built-in commands (fs, security, remote) into a registry.
pub use commands::register_builtins;
/// A choice in the launch-codes dialog.
pub use decision::Decision;
/// A locked directory the player asked to breach.
pub use interpreter::BreachRequest;
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command (text, scripted lines, signals).
pub use interpreter::CommandOutput;
/// Registry of available commands with dispatch.
pub use interpreter::CommandRegistry;
/// Shared mutable environment passed to every command.
pub use interpreter::Environment;
/// Register ssh and exit into a registry.
pub use remote_commands::register_remote_commands;
/// Register analyze and breach into a registry.
pub use security_commands::register_security_commands;
/// Narrative session state and ending selection.
pub use session::{Ending, Session, Thought};
/// Terminal front end.
pub use terminal::{BREACH_BANNER, Mode, Terminal, WELCOME_MESSAGE};
