//! Error types for Terminal Infiltrator.

use std::io;

/// Errors produced by the game framework.
///
/// `Command` carries a player-facing message and displays it verbatim, so the
/// terminal can append it to the scrollback without decoration.
#[derive(Debug, thiserror::Error)]
pub enum InfiltratorError {
    #[error("VFS error: {0}")]
    Vfs(String),

    #[error("{0}")]
    Command(String),

    #[error("breach error: {0}")]
    Breach(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, InfiltratorError>;
