//! Presentation-agnostic input event types.
//!
//! The presentation layer maps keyboard and pointer input to these events.
//! The game core never sees raw device input.

/// A raw input event forwarded once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Character typed on the keyboard.
    TextInput(char),
    /// Backspace / delete-left.
    Backspace,
    /// Enter: submit the current input line.
    Submit,
    /// Escape: request a full session restart.
    Cancel,
    /// Scroll the output log towards older lines.
    ScrollUp,
    /// Scroll the output log towards newer lines.
    ScrollDown,
    /// A breach matrix cell was picked (pointer click mapped to a cell).
    CellPick(Cell),
}

/// A cell in the breach matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl InputEvent {
    /// Whether this event is a printable ASCII keystroke the terminal accepts.
    pub fn is_printable(&self) -> bool {
        matches!(self, InputEvent::TextInput(ch) if (' '..='~').contains(ch))
    }
}
