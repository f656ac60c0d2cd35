//! Frame-driven game controller.

use infiltrator_breach::{BreachPuzzle, BreachState, SelectionError, Token};
use infiltrator_terminal::{BreachRequest, Terminal};
use infiltrator_types::config::GameConfig;
use infiltrator_types::error::Result;
use infiltrator_types::input::{Cell, InputEvent};
use infiltrator_vfs::build_world_with;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

pub const BREACH_DETECTED: &str = "CRITICAL SECURITY BREACH DETECTED";
pub const FOUND_MESSAGE: &str = "YOU HAVE BEEN FOUND!";

/// Where the breach minigame is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum BreachPhase {
    /// No breach in progress; input goes to the terminal.
    Idle,
    /// Short "loading" pause before the puzzle appears.
    Loading {
        remaining: f32,
        request: BreachRequest,
    },
    /// The puzzle is on screen and receives cell picks.
    Running { request: BreachRequest },
}

/// Top-level controller driving the terminal and the breach minigame.
pub struct Game {
    config: GameConfig,
    terminal: Terminal,
    puzzle: BreachPuzzle,
    phase: BreachPhase,
    attempts_left: u8,
    generation: u32,
    rng: StdRng,
}

impl Game {
    /// Build a fresh game from configuration.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let terminal = Self::build_terminal(&config)?;
        let puzzle = BreachPuzzle::new(
            config.breach.time_limit_secs,
            StdRng::seed_from_u64(rng.next_u64()),
        );
        log::info!(
            "Game ready (breach attempts: {}, seed: {:?})",
            config.breach.max_attempts,
            config.seed
        );
        Ok(Self {
            attempts_left: config.breach.max_attempts,
            config,
            terminal,
            puzzle,
            phase: BreachPhase::Idle,
            generation: 0,
            rng,
        })
    }

    fn build_terminal(config: &GameConfig) -> Result<Terminal> {
        let world = build_world_with(&config.world)?;
        Ok(Terminal::new(world, &config.terminal, &config.session))
    }

    /// Throw away all state and start over from a freshly built world.
    pub fn restart(&mut self) -> Result<()> {
        self.terminal = Self::build_terminal(&self.config)?;
        self.puzzle = BreachPuzzle::new(
            self.config.breach.time_limit_secs,
            StdRng::seed_from_u64(self.rng.next_u64()),
        );
        self.phase = BreachPhase::Idle;
        self.attempts_left = self.config.breach.max_attempts;
        self.generation += 1;
        log::info!("Game restarted (run {})", self.generation);
        Ok(())
    }

    /// Route one raw input event. While a breach is loading or running the
    /// terminal only sees Escape.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Cancel => self.terminal.handle_input(event),
            InputEvent::CellPick(cell) if self.puzzle().is_some() => {
                if let Err(e) = self.pick(cell) {
                    log::debug!("breach pick rejected: {e}");
                }
            },
            _ if self.phase == BreachPhase::Idle => self.terminal.handle_input(event),
            _ => {},
        }
    }

    /// Pick a puzzle cell directly.
    pub fn pick(&mut self, cell: Cell) -> std::result::Result<Token, SelectionError> {
        if !matches!(self.phase, BreachPhase::Running { .. }) {
            return Err(SelectionError::NotActive);
        }
        self.puzzle.select(cell)
    }

    /// Advance one frame.
    pub fn update(&mut self, dt: f32) -> Result<()> {
        if self.terminal.restart_requested() {
            return self.restart();
        }

        match std::mem::replace(&mut self.phase, BreachPhase::Idle) {
            BreachPhase::Idle => {
                if let Some(request) = self.terminal.take_breach_request() {
                    if self.attempts_left > 0 {
                        log::info!("Loading breach protocol for {}", request.name);
                        self.phase = BreachPhase::Loading {
                            remaining: self.config.breach.load_delay_secs,
                            request,
                        };
                    } else {
                        self.lockdown();
                    }
                }
            },
            BreachPhase::Loading { remaining, request } => {
                let remaining = remaining - dt;
                self.phase = if remaining <= 0.0 {
                    self.puzzle.reset();
                    BreachPhase::Running { request }
                } else {
                    BreachPhase::Loading { remaining, request }
                };
            },
            BreachPhase::Running { request } => {
                self.puzzle.tick(dt);
                match self.puzzle.state() {
                    BreachState::Active => self.phase = BreachPhase::Running { request },
                    BreachState::Won => self.terminal.apply_breach_success(&request)?,
                    BreachState::Lost => self.breach_failed(),
                }
            },
        }

        self.terminal.tick(dt);
        Ok(())
    }

    fn breach_failed(&mut self) {
        self.attempts_left = self.attempts_left.saturating_sub(1);
        log::warn!("Breach failed, {} attempts left", self.attempts_left);
        if self.attempts_left == 0 {
            self.lockdown();
        } else {
            self.terminal.push_line(format!(
                "Breach failed. Attempts remaining: {}",
                self.attempts_left
            ));
        }
        self.puzzle.reset();
    }

    fn lockdown(&mut self) {
        self.terminal.push_line(BREACH_DETECTED);
        self.terminal.push_line(FOUND_MESSAGE);
        self.terminal.lock();
    }

    // -- Accessors --

    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal {
        &mut self.terminal
    }

    /// The puzzle, while it is on screen.
    pub fn puzzle(&self) -> Option<&BreachPuzzle> {
        match self.phase {
            BreachPhase::Running { .. } => Some(&self.puzzle),
            _ => None,
        }
    }

    pub fn phase(&self) -> &BreachPhase {
        &self.phase
    }

    pub fn is_breach_loading(&self) -> bool {
        matches!(self.phase, BreachPhase::Loading { .. })
    }

    pub fn attempts_left(&self) -> u8 {
        self.attempts_left
    }

    /// Number of restarts so far.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
