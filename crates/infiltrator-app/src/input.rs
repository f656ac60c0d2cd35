//! Map console lines to input events.

use infiltrator_core::input::{Cell, InputEvent};
use infiltrator_core::terminal::Mode;

/// What one console line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineAction {
    /// Feed these events to the game in order.
    Events(Vec<InputEvent>),
    /// Leave the program.
    Quit,
    /// Line did not parse in the current context.
    Ignored,
}

/// Translate a console line. `breach_active` routes `row col` pairs to the
/// puzzle; `mode` routes number keys to the decision dialog.
pub fn translate(line: &str, breach_active: bool, mode: Mode) -> LineAction {
    let trimmed = line.trim();
    match trimmed {
        ":quit" | ":q" => return LineAction::Quit,
        ":esc" => return LineAction::Events(vec![InputEvent::Cancel]),
        ":up" => return LineAction::Events(vec![InputEvent::ScrollUp]),
        ":down" => return LineAction::Events(vec![InputEvent::ScrollDown]),
        _ => {},
    }

    if breach_active {
        return parse_cell(trimmed)
            .map(|cell| LineAction::Events(vec![InputEvent::CellPick(cell)]))
            .unwrap_or(LineAction::Ignored);
    }

    if let Mode::AwaitingDecision { .. } = mode {
        return trimmed
            .chars()
            .next()
            .map(|ch| LineAction::Events(vec![InputEvent::TextInput(ch)]))
            .unwrap_or(LineAction::Ignored);
    }

    let mut events: Vec<InputEvent> = line.chars().map(InputEvent::TextInput).collect();
    events.push(InputEvent::Submit);
    LineAction::Events(events)
}

fn parse_cell(text: &str) -> Option<Cell> {
    let mut parts = text.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Cell::new(row, col))
}
