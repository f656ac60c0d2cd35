use infiltrator_types::input::Cell;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::SelectionError;
use crate::layouts::{BUFFER_SIZE, LAYOUTS, Layout, MATRIX_SIZE, Token};

/// Puzzle lifecycle. `Won` and `Lost` are terminal until [`BreachPuzzle::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreachState {
    Active,
    Won,
    Lost,
}

/// Which cells the next pick may come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// No pick yet: any cell in row 0.
    TopRow,
    /// Next pick must be in this column.
    Column(usize),
    /// Next pick must be in this row.
    Row(usize),
}

/// One breach attempt: a 5x5 token matrix, a target sequence and a countdown.
#[derive(Debug)]
pub struct BreachPuzzle {
    layout: usize,
    buffer: Vec<Token>,
    selected: Vec<Cell>,
    axis: Axis,
    time_limit: f32,
    time_left: f32,
    state: BreachState,
    rng: StdRng,
}

impl BreachPuzzle {
    /// New puzzle on a randomly chosen layout.
    pub fn new(time_limit_secs: f32, rng: StdRng) -> Self {
        let mut puzzle = Self {
            layout: 0,
            buffer: Vec::with_capacity(BUFFER_SIZE),
            selected: Vec::with_capacity(BUFFER_SIZE),
            axis: Axis::TopRow,
            time_limit: time_limit_secs,
            time_left: time_limit_secs,
            state: BreachState::Active,
            rng,
        };
        puzzle.reset();
        puzzle
    }

    pub fn from_seed(time_limit_secs: f32, seed: u64) -> Self {
        Self::new(time_limit_secs, StdRng::seed_from_u64(seed))
    }

    /// New puzzle pinned to layout `index` (wrapped into range).
    pub fn with_layout(time_limit_secs: f32, index: usize) -> Self {
        let mut puzzle = Self::from_seed(time_limit_secs, 0);
        puzzle.layout = index % LAYOUTS.len();
        puzzle
    }

    /// Clear progress, restore the countdown and pick a fresh layout.
    pub fn reset(&mut self) {
        self.layout = self.rng.gen_range(0..LAYOUTS.len());
        self.buffer.clear();
        self.selected.clear();
        self.axis = Axis::TopRow;
        self.time_left = self.time_limit;
        self.state = BreachState::Active;
        log::debug!("breach: reset to layout {}", self.layout);
    }

    /// Advance the countdown. Only an active puzzle can time out.
    pub fn tick(&mut self, dt: f32) {
        if self.state != BreachState::Active {
            return;
        }
        self.time_left -= dt;
        if self.time_left <= 0.0 {
            self.time_left = 0.0;
            self.state = BreachState::Lost;
            log::info!("breach: timed out with {} tokens", self.buffer.len());
        }
    }

    /// Try to pick `cell`. On success the token is appended to the buffer and
    /// returned.
    pub fn select(&mut self, cell: Cell) -> Result<Token, SelectionError> {
        if self.state != BreachState::Active {
            return Err(SelectionError::NotActive);
        }
        if cell.row >= MATRIX_SIZE || cell.col >= MATRIX_SIZE {
            return Err(SelectionError::OutOfBounds(cell));
        }
        if self.buffer.len() >= BUFFER_SIZE {
            return Err(SelectionError::BufferFull);
        }

        let last = self.selected.last().copied();
        let next_axis = match (self.axis, last) {
            (Axis::TopRow, _) => {
                if cell.row != 0 {
                    return Err(SelectionError::NotInTopRow);
                }
                Axis::Column(cell.col)
            },
            (Axis::Column(col), last) => {
                if cell.col != col {
                    return Err(SelectionError::WrongColumn(col));
                }
                if last.is_some_and(|l| l.row == cell.row) {
                    return Err(SelectionError::SameCell);
                }
                Axis::Row(cell.row)
            },
            (Axis::Row(row), last) => {
                if cell.row != row {
                    return Err(SelectionError::WrongRow(row));
                }
                if last.is_some_and(|l| l.col == cell.col) {
                    return Err(SelectionError::SameCell);
                }
                Axis::Column(cell.col)
            },
        };

        let token = self.layout().matrix[cell.row][cell.col];
        self.axis = next_axis;
        self.selected.push(cell);
        self.buffer.push(token);

        if self.buffer.as_slice() == self.layout().target.as_slice() {
            self.state = BreachState::Won;
            log::info!("breach: sequence matched");
        }
        Ok(token)
    }

    fn layout(&self) -> &'static Layout {
        &LAYOUTS[self.layout]
    }

    pub fn layout_index(&self) -> usize {
        self.layout
    }

    pub fn matrix(&self) -> &'static [[Token; MATRIX_SIZE]; MATRIX_SIZE] {
        &self.layout().matrix
    }

    pub fn target(&self) -> &'static [Token; BUFFER_SIZE] {
        &self.layout().target
    }

    pub fn buffer(&self) -> &[Token] {
        &self.buffer
    }

    pub fn selected(&self) -> &[Cell] {
        &self.selected
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    pub fn time_limit(&self) -> f32 {
        self.time_limit
    }

    pub fn state(&self) -> BreachState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state != BreachState::Active
    }
}
