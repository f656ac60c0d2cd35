//! Terminal Infiltrator core.
//!
//! Ties the terminal, the breach minigame and the narrative session together
//! behind one frame-driven [`Game`] controller. The presentation layer calls
//! [`Game::handle_input`] for raw events and [`Game::update`] once per frame,
//! then reads back whatever it needs to draw.

// Re-exports from infiltrator-types (foundation types).
pub use infiltrator_types::config;
pub use infiltrator_types::error;
pub use infiltrator_types::input;

pub use infiltrator_breach as breach;
pub use infiltrator_terminal as terminal;
pub use infiltrator_vfs as vfs;

mod game;

pub use game::{BreachPhase, Game};
