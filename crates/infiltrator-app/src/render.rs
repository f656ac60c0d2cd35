//! Plain-text rendering of game state to a console.

use std::io::{self, Write};

use infiltrator_core::Game;
use infiltrator_core::breach::{BreachPuzzle, MATRIX_SIZE};
use infiltrator_core::terminal::Mode;

/// Tracks what has already been written so each draw only adds what changed.
#[derive(Debug, Default)]
pub struct Console {
    generation: u32,
    appended: u64,
    thought: Option<&'static str>,
    dialog_shown: bool,
    ending_shown: bool,
    loading_shown: bool,
    picks_shown: Option<usize>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write everything new since the last draw.
    pub fn draw(&mut self, game: &Game, out: &mut impl Write) -> io::Result<()> {
        let term = game.terminal();
        let session = term.session();

        if game.generation() != self.generation {
            *self = Self {
                generation: game.generation(),
                ..Self::default()
            };
            writeln!(out)?;
        }
        let fresh = term.lines_appended().saturating_sub(self.appended);
        let fresh = usize::try_from(fresh).unwrap_or(usize::MAX);
        let output = term.output();
        for line in &output[output.len().saturating_sub(fresh)..] {
            writeln!(out, "{line}")?;
        }
        self.appended = term.lines_appended();

        let thought = session.thought().map(|t| t.text);
        if thought != self.thought {
            if let Some(text) = thought {
                writeln!(out, "    >> {text}")?;
            }
            self.thought = thought;
        }

        match term.dialog() {
            Some(dialog) if !self.dialog_shown => {
                write_boxed(out, dialog)?;
                self.dialog_shown = true;
            },
            Some(_) => {},
            None => self.dialog_shown = false,
        }

        if let Some(text) = session.ending().text()
            && !self.ending_shown
        {
            write_boxed(out, text)?;
            writeln!(out, "Type :esc to restart.")?;
            self.ending_shown = true;
        }

        if game.is_breach_loading() {
            if !self.loading_shown {
                writeln!(out, "LOADING BREACH PROTOCOL...")?;
                self.loading_shown = true;
            }
        } else {
            self.loading_shown = false;
        }

        match game.puzzle() {
            Some(puzzle) => {
                if self.picks_shown != Some(puzzle.buffer().len()) {
                    write_puzzle(out, puzzle, game.attempts_left())?;
                    self.picks_shown = Some(puzzle.buffer().len());
                }
                write!(out, "[{:>4.1}s] row col> ", puzzle.time_left())?;
            },
            None => {
                self.picks_shown = None;
                if term.mode() == Mode::Normal && !game.is_breach_loading() {
                    write!(out, "{}{}", term.prompt(), term.input())?;
                }
            },
        }
        out.flush()
    }
}

fn write_boxed(out: &mut impl Write, text: &str) -> io::Result<()> {
    let width = text.lines().map(str::len).max().unwrap_or(0);
    let rule = "=".repeat(width + 4);
    writeln!(out, "{rule}")?;
    for line in text.lines() {
        writeln!(out, "| {line:<width$} |")?;
    }
    writeln!(out, "{rule}")
}

fn write_puzzle(out: &mut impl Write, puzzle: &BreachPuzzle, attempts: u8) -> io::Result<()> {
    writeln!(out)?;
    write!(out, "     ")?;
    for col in 0..MATRIX_SIZE {
        write!(out, " {col:<3}")?;
    }
    writeln!(out)?;
    for (row, tokens) in puzzle.matrix().iter().enumerate() {
        write!(out, "  {row}  ")?;
        for (col, token) in tokens.iter().enumerate() {
            let picked = puzzle
                .selected()
                .iter()
                .any(|cell| cell.row == row && cell.col == col);
            if picked {
                write!(out, "[{token}]")?;
            } else {
                write!(out, " {token} ")?;
            }
        }
        writeln!(out)?;
    }
    writeln!(out, "TARGET: {}", puzzle.target().join(" "))?;
    writeln!(out, "BUFFER: {}", puzzle.buffer().join(" "))?;
    writeln!(out, "ATTEMPTS REMAINING: {attempts}")
}
