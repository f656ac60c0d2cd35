use infiltrator_types::input::Cell;

/// Why a cell pick was rejected. A rejected pick never changes puzzle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("puzzle is no longer active")]
    NotActive,

    #[error("cell ({}, {}) is outside the matrix", .0.row, .0.col)]
    OutOfBounds(Cell),

    #[error("buffer is full")]
    BufferFull,

    #[error("first pick must be in the top row")]
    NotInTopRow,

    #[error("pick must be in column {0}")]
    WrongColumn(usize),

    #[error("pick must be in row {0}")]
    WrongRow(usize),

    #[error("pick must leave the previous cell's position on the free axis")]
    SameCell,
}
