//! The three hand-authored matrix layouts and their target sequences.

/// Side length of the square matrix.
pub const MATRIX_SIZE: usize = 5;

/// Number of tokens the player must collect.
pub const BUFFER_SIZE: usize = 4;

/// A two-character hex token as drawn in the matrix.
pub type Token = &'static str;

/// One solvable puzzle layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub matrix: [[Token; MATRIX_SIZE]; MATRIX_SIZE],
    pub target: [Token; BUFFER_SIZE],
}

pub const LAYOUT_COUNT: usize = LAYOUTS.len();

pub(crate) const LAYOUTS: [Layout; 3] = [
    Layout {
        matrix: [
            ["1C", "E9", "BD", "55", "1C"],
            ["BD", "55", "1C", "E9", "BD"],
            ["E9", "1C", "55", "BD", "E9"],
            ["1C", "BD", "E9", "1C", "55"],
            ["55", "E9", "BD", "1C", "E9"],
        ],
        target: ["E9", "BD", "1C", "BD"],
    },
    Layout {
        matrix: [
            ["55", "1C", "E9", "BD", "1C"],
            ["E9", "55", "1C", "1C", "BD"],
            ["1C", "E9", "BD", "55", "1C"],
            ["BD", "1C", "55", "E9", "55"],
            ["1C", "BD", "E9", "1C", "E9"],
        ],
        target: ["1C", "BD", "E9", "55"],
    },
    Layout {
        matrix: [
            ["E9", "55", "1C", "BD", "E9"],
            ["1C", "E9", "BD", "55", "1C"],
            ["BD", "1C", "E9", "1C", "BD"],
            ["55", "E9", "1C", "BD", "55"],
            ["1C", "BD", "55", "E9", "1C"],
        ],
        target: ["E9", "1C", "BD", "55"],
    },
];
