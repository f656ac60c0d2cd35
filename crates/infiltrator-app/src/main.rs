//! Terminal Infiltrator console entry point.
//!
//! Reads one line per frame from stdin. Ordinary lines are typed into the
//! terminal and submitted. While the breach puzzle is up, `row col` picks a
//! cell; while the launch-codes dialog is open, a number picks an option.
//! `:esc` restarts, `:up`/`:down` scroll, `:quit` leaves.

mod input;
mod render;

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use infiltrator_core::Game;
use infiltrator_core::config::GameConfig;
use input::{LineAction, translate};
use render::Console;

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Resolve config from CLI arg or INFILTRATOR_CONFIG; defaults otherwise.
    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("INFILTRATOR_CONFIG").ok())
    {
        Some(path) => {
            let path = PathBuf::from(path);
            GameConfig::load(&path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        },
        None => GameConfig::default(),
    };
    log::info!(
        "Starting Terminal Infiltrator as {}@{}",
        config.terminal.user,
        config.terminal.host
    );

    let mut game = Game::new(config)?;
    let mut console = Console::new();
    let mut stdout = io::stdout();
    console.draw(&game, &mut stdout)?;

    let mut last = Instant::now();
    for line in io::stdin().lock().lines() {
        let line = line?;

        // Time spent waiting for input counts against the breach timer.
        let now = Instant::now();
        game.update(now.duration_since(last).as_secs_f32())?;
        last = now;

        let breach_active = game.puzzle().is_some();
        match translate(&line, breach_active, game.terminal().mode()) {
            LineAction::Quit => break,
            LineAction::Ignored => log::debug!("ignored input line: {line:?}"),
            LineAction::Events(events) => {
                for event in events {
                    game.handle_input(event);
                }
            },
        }
        game.update(0.0)?;
        last = settle(&mut game, &mut console, &mut stdout, last)?;
        console.draw(&game, &mut stdout)?;
    }

    log::info!("Goodbye");
    Ok(())
}

/// Run frames until scripted output and the breach loading screen are done,
/// drawing as lines appear. Returns the time of the last frame.
fn settle(
    game: &mut Game,
    console: &mut Console,
    out: &mut io::Stdout,
    mut last: Instant,
) -> Result<Instant> {
    while game.terminal().pending_len() > 0 || game.is_breach_loading() {
        console.draw(game, out)?;
        thread::sleep(FRAME);
        let now = Instant::now();
        game.update(now.duration_since(last).as_secs_f32())?;
        last = now;
    }
    Ok(last)
}
