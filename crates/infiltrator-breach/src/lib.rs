//! Breach protocol minigame.
//!
//! A 5x5 matrix of hex tokens and a four-token target sequence. The player
//! picks cells alternating between a column and a row, starting in the top
//! row, until the buffer matches the target or the countdown runs out. The
//! puzzle knows nothing about the filesystem; the caller decides what a win
//! or a loss means.

mod error;
mod layouts;
mod puzzle;

pub use error::SelectionError;
pub use layouts::{BUFFER_SIZE, LAYOUT_COUNT, Layout, MATRIX_SIZE, Token};
pub use puzzle::{Axis, BreachPuzzle, BreachState};
