//! Terminal front end: input line, scrollback, prompt, scripted output and
//! the launch-codes dialog, wrapped around the command registry.

use std::collections::VecDeque;

use infiltrator_types::config::{SessionConfig, TerminalConfig};
use infiltrator_types::error::{InfiltratorError, Result};
use infiltrator_types::input::InputEvent;
use infiltrator_vfs::{FsTree, NodeId, World};

use crate::decision::Decision;
use crate::interpreter::{BreachRequest, CommandOutput, CommandRegistry, Environment};
use crate::session::{Ending, Session};

pub const WELCOME_MESSAGE: &str = "Terminal initialized. Type '--help' for commands.";
pub const BREACH_BANNER: &str = "Initiating ICE breach protocol...";

/// What the terminal accepts as input right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// The launch-codes dialog is open; only a number key gets through.
    AwaitingDecision { allow_modified: bool },
}

/// Interactive terminal: owns the filesystem arena, cursor, session and scrollback.
pub struct Terminal {
    registry: CommandRegistry,
    config: TerminalConfig,
    tree: FsTree,
    local_root: NodeId,
    cwd: NodeId,
    session: Session,
    output: Vec<String>,
    /// Lines ever appended, unaffected by `clear` and trimming.
    appended: u64,
    pending: VecDeque<String>,
    reveal_timer: f32,
    input: String,
    prompt: String,
    scroll: usize,
    mode: Mode,
    dialog: Option<String>,
    breach_request: Option<BreachRequest>,
    restart_requested: bool,
}

impl Terminal {
    pub fn new(world: World, config: &TerminalConfig, session: &SessionConfig) -> Self {
        let mut registry = CommandRegistry::new();
        crate::register_builtins(&mut registry);

        let mut terminal = Self {
            registry,
            config: config.clone(),
            tree: world.tree,
            local_root: world.root,
            cwd: world.root,
            session: Session::new(session.thought_duration_secs),
            output: vec![WELCOME_MESSAGE.to_string()],
            appended: 1,
            pending: VecDeque::new(),
            reveal_timer: 0.0,
            input: String::new(),
            prompt: String::new(),
            scroll: 0,
            mode: Mode::Normal,
            dialog: None,
            breach_request: None,
            restart_requested: false,
        };
        terminal.update_prompt();
        terminal
    }

    // -- Input --

    /// Feed one raw input event. Cell picks belong to the breach puzzle and
    /// are ignored here.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::Cancel => {
                log::info!("Restart requested");
                self.restart_requested = true;
            },
            InputEvent::TextInput(ch) => match self.mode {
                Mode::Normal if event.is_printable() => self.input.push(ch),
                Mode::Normal => {},
                Mode::AwaitingDecision { .. } => {
                    if let Some(decision) = Decision::from_key(ch)
                        && let Err(e) = self.submit_decision(decision)
                    {
                        log::debug!("decision ignored: {e}");
                    }
                },
            },
            InputEvent::Backspace => {
                self.input.pop();
            },
            InputEvent::Submit => {
                if self.mode == Mode::Normal {
                    let line = std::mem::take(&mut self.input);
                    self.execute(&line);
                }
            },
            InputEvent::ScrollUp => self.scroll_up(),
            InputEvent::ScrollDown => self.scroll_down(),
            InputEvent::CellPick(_) => {},
        }
    }

    /// Run one command line as if typed.
    pub fn execute(&mut self, line: &str) {
        self.flush_pending();
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if self.mode != Mode::Normal {
            log::debug!("ignored while awaiting decision: {line}");
            return;
        }
        if !self.session.is_locked() {
            let echo = format!("{}{line}", self.prompt);
            self.append(echo);
        }

        let mut env = Environment {
            tree: &mut self.tree,
            cwd: self.cwd,
            local_root: self.local_root,
            session: &mut self.session,
        };
        let result = self.registry.execute(line, &mut env);
        self.cwd = env.cwd;

        match result {
            Ok(output) => self.apply_output(output),
            Err(e) => self.push_text(&e.to_string()),
        }
        self.update_prompt();
        self.scroll = 0;
        self.trim_output();
    }

    fn apply_output(&mut self, output: CommandOutput) {
        match output {
            CommandOutput::Text(text) => self.push_text(&text),
            CommandOutput::None => {},
            CommandOutput::Clear => {
                self.output.clear();
                self.scroll = 0;
            },
            CommandOutput::Scripted(lines) => self.pending.extend(lines),
            CommandOutput::Breach(request) => {
                self.append(BREACH_BANNER.to_string());
                self.breach_request = Some(request);
            },
            CommandOutput::Decision {
                prompt,
                allow_modified,
            } => {
                self.mode = Mode::AwaitingDecision { allow_modified };
                self.dialog = Some(prompt);
            },
        }
    }

    /// Resolve the open launch-codes dialog.
    pub fn submit_decision(&mut self, decision: Decision) -> Result<()> {
        let Mode::AwaitingDecision { allow_modified } = self.mode else {
            return Err(InfiltratorError::InvalidState(
                "no decision pending".to_string(),
            ));
        };
        if decision == Decision::SubmitModified && !allow_modified {
            return Err(InfiltratorError::InvalidState(
                "modified codes require every clue".to_string(),
            ));
        }

        match decision {
            Decision::SubmitCodes => self.session.finish(Ending::Bad),
            Decision::SubmitModified => self.session.finish(Ending::Good),
            Decision::KeepExploring => {
                if let Some(link) = self.session.disconnect() {
                    self.tree.remove_subtree(link.root);
                    self.cwd = link.return_to;
                }
                self.push_text("\nReturning to local system...");
                self.append("You should look around for more information...".to_string());
            },
        }
        self.mode = Mode::Normal;
        self.dialog = None;
        self.update_prompt();
        self.trim_output();
        Ok(())
    }

    // -- Frame updates --

    /// Advance timers: the player's thought and the scripted-output reveal.
    pub fn tick(&mut self, dt: f32) {
        self.session.tick(dt);

        if self.pending.is_empty() {
            self.reveal_timer = 0.0;
            return;
        }
        let interval = self.config.reveal_interval_ms as f32 / 1000.0;
        if interval <= 0.0 {
            self.flush_pending();
            return;
        }
        self.reveal_timer += dt;
        while self.reveal_timer >= interval {
            let Some(line) = self.pending.pop_front() else {
                break;
            };
            self.append(line);
            self.reveal_timer -= interval;
        }
        if self.pending.is_empty() {
            self.reveal_timer = 0.0;
        }
        self.trim_output();
    }

    /// Move every queued scripted line into the log immediately.
    pub fn flush_pending(&mut self) {
        while let Some(line) = self.pending.pop_front() {
            self.append(line);
        }
        self.reveal_timer = 0.0;
        self.trim_output();
    }

    // -- Breach hand-off --

    /// Take the breach request raised by the last command, if any.
    pub fn take_breach_request(&mut self) -> Option<BreachRequest> {
        self.breach_request.take()
    }

    /// Unlock a breached directory and step into it.
    ///
    /// The target is entered by id, wherever the cursor has moved since the
    /// request was raised.
    pub fn apply_breach_success(&mut self, request: &BreachRequest) -> Result<()> {
        if !self.tree.node_mut(request.target)?.set_locked(false) {
            return Err(InfiltratorError::Breach(format!(
                "target is not a directory: {}",
                request.name
            )));
        }
        self.append(format!("Access granted to {} directory", request.name));
        log::info!("breach: unlocked {}", request.name);
        let echo = format!("{}cd {}", self.prompt, request.name);
        self.append(echo);
        self.cwd = request.target;
        self.update_prompt();
        self.trim_output();
        Ok(())
    }

    /// Append a line from outside the interpreter (controller messages).
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.append(line.into());
        self.trim_output();
    }

    /// Lock the terminal for good.
    pub fn lock(&mut self) {
        self.session.lock();
    }

    // -- Scrollback --

    pub fn scroll_up(&mut self) {
        if self.scroll + 1 < self.output.len() {
            self.scroll += 1;
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// The last `rows` lines that are visible at the current scroll offset.
    pub fn visible_lines(&self, rows: usize) -> &[String] {
        let end = self.output.len().saturating_sub(self.scroll);
        let start = end.saturating_sub(rows);
        &self.output[start..end]
    }

    fn append(&mut self, line: String) {
        self.output.push(line);
        self.appended += 1;
    }

    fn push_text(&mut self, text: &str) {
        for line in text.lines() {
            self.append(line.to_string());
        }
    }

    fn trim_output(&mut self) {
        let max = self.config.max_scrollback.max(1);
        if self.output.len() > max {
            let excess = self.output.len() - max;
            self.output.drain(..excess);
            self.scroll = self.scroll.min(self.output.len().saturating_sub(1));
        }
    }

    fn update_prompt(&mut self) {
        let host = if self.session.is_remote() {
            &self.config.remote_host
        } else {
            &self.config.host
        };
        self.prompt = format!(
            "{}@{}:{}$ ",
            self.config.user,
            host,
            self.tree.path_of(self.cwd)
        );
    }

    // -- Accessors --

    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Total lines appended so far. Renderers diff this to find new lines.
    pub fn lines_appended(&self) -> u64 {
        self.appended
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Text of the open decision dialog.
    pub fn dialog(&self) -> Option<&str> {
        self.dialog.as_deref()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn tree(&self) -> &FsTree {
        &self.tree
    }

    pub fn cwd(&self) -> NodeId {
        self.cwd
    }

    pub fn local_root(&self) -> NodeId {
        self.local_root
    }

    pub fn restart_requested(&self) -> bool {
        self.restart_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::LOCKED_MESSAGE;
    use infiltrator_vfs::build_world;
    use infiltrator_vfs::world::CLUE_FILES;

    fn terminal() -> Terminal {
        terminal_with(TerminalConfig::default())
    }

    fn terminal_with(config: TerminalConfig) -> Terminal {
        Terminal::new(build_world().unwrap(), &config, &SessionConfig::default())
    }

    fn type_line(term: &mut Terminal, line: &str) {
        for ch in line.chars() {
            term.handle_input(InputEvent::TextInput(ch));
        }
        term.handle_input(InputEvent::Submit);
    }

    fn last(term: &Terminal) -> &str {
        term.output().last().map(String::as_str).unwrap_or("")
    }

    fn connect(term: &mut Terminal) {
        term.execute("ssh admin@192.168.1.100 -p 444");
        term.flush_pending();
    }

    fn collect_clues(term: &mut Terminal) {
        for (dirs, file) in [
            (&["etc", ".evidence"][..], CLUE_FILES[0]),
            (&["var", "log", ".archived_logs"][..], CLUE_FILES[1]),
            (&["opt", ".internal"][..], CLUE_FILES[2]),
        ] {
            term.execute("cd ~");
            for dir in dirs {
                term.execute(&format!("cd {dir}"));
            }
            term.execute(&format!("cat {file}"));
        }
        term.execute("cd ~");
    }

    #[test]
    fn starts_with_welcome_and_root_prompt() {
        let term = terminal();
        assert_eq!(term.output(), [WELCOME_MESSAGE]);
        assert_eq!(term.prompt(), "root@alliance1:/$ ");
        assert_eq!(term.mode(), Mode::Normal);
    }

    #[test]
    fn typed_command_is_echoed_and_run() {
        let mut term = terminal();
        type_line(&mut term, "cd home");
        assert_eq!(term.output()[1], "root@alliance1:/$ cd home");
        assert_eq!(term.prompt(), "root@alliance1:/home$ ");
        assert!(term.input().is_empty());
    }

    #[test]
    fn input_buffer_editing() {
        let mut term = terminal();
        term.handle_input(InputEvent::TextInput('l'));
        term.handle_input(InputEvent::TextInput('x'));
        term.handle_input(InputEvent::Backspace);
        term.handle_input(InputEvent::TextInput('s'));
        term.handle_input(InputEvent::TextInput('\u{7}'));
        term.handle_input(InputEvent::TextInput('é'));
        assert_eq!(term.input(), "ls");
        term.handle_input(InputEvent::Backspace);
        term.handle_input(InputEvent::Backspace);
        term.handle_input(InputEvent::Backspace);
        assert_eq!(term.input(), "");
    }

    #[test]
    fn errors_land_in_scrollback() {
        let mut term = terminal();
        term.execute("frobnicate");
        assert_eq!(last(&term), "frobnicate: command not found");
        term.execute("cat nothing");
        assert_eq!(last(&term), "cat: nothing: No such file");
    }

    #[test]
    fn locked_directory_scenario() {
        let mut term = terminal();
        term.execute("cd home");
        term.execute("cd user");
        term.execute("cd .secure");
        assert_eq!(last(&term), "Access denied: Directory is locked.");
        term.execute("pwd");
        assert_eq!(last(&term), "/home/user");
    }

    #[test]
    fn clear_empties_log_but_not_counter() {
        let mut term = terminal();
        term.execute("ls");
        let before = term.lines_appended();
        term.execute("clear");
        assert!(term.output().is_empty());
        term.execute("pwd");
        assert_eq!(term.output().len(), 2);
        assert_eq!(term.lines_appended(), before + 3);
    }

    #[test]
    fn scripted_output_revealed_over_ticks() {
        let mut term = terminal();
        term.execute("ssh admin@1.2.3.4 -p 1");
        assert_eq!(term.pending_len(), 3);
        assert_eq!(last(&term), "root@alliance1:/$ ssh admin@1.2.3.4 -p 1");

        term.tick(0.05);
        assert_eq!(term.pending_len(), 2);
        assert_eq!(last(&term), "Attempting connection to 1.2.3.4...");
        term.tick(0.2);
        assert_eq!(term.pending_len(), 0);
        assert_eq!(last(&term), "Warning: Access attempt has been logged");
    }

    #[test]
    fn new_command_flushes_pending_first() {
        let mut term = terminal();
        term.execute("ssh admin@1.2.3.4 -p 1");
        term.execute("pwd");
        let tail: Vec<&str> = term.output()[term.output().len() - 5..]
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(
            tail,
            [
                "Attempting connection to 1.2.3.4...",
                "Connection failed: Invalid credentials",
                "Warning: Access attempt has been logged",
                "root@alliance1:/$ pwd",
                "/",
            ]
        );
    }

    #[test]
    fn ssh_switches_prompt_to_remote_host() {
        let mut term = terminal();
        connect(&mut term);
        assert!(term.session().is_remote());
        assert_eq!(term.prompt(), "root@alliance-secure:/$ ");
        term.execute("exit");
        assert_eq!(last(&term), "Disconnecting from remote server...");
        assert_eq!(term.prompt(), "root@alliance1:/$ ");
    }

    #[test]
    fn cat_codes_outside_remote_is_missing() {
        let mut term = terminal();
        term.execute("cat codes.txt");
        assert_eq!(last(&term), "cat: codes.txt: No such file");
        assert_eq!(term.mode(), Mode::Normal);
    }

    #[test]
    fn decision_blocks_commands() {
        let mut term = terminal();
        connect(&mut term);
        term.execute("cat codes.txt");
        assert_eq!(
            term.mode(),
            Mode::AwaitingDecision {
                allow_modified: false
            }
        );
        assert!(term.dialog().unwrap().contains("OMEGA-DELTA-4"));

        let before = term.output().len();
        term.execute("exit");
        type_line(&mut term, "ls");
        assert_eq!(term.output().len(), before);
        assert!(term.session().is_remote());
    }

    #[test]
    fn option_one_locks_with_bad_ending() {
        let mut term = terminal();
        connect(&mut term);
        term.execute("cat codes.txt");
        term.handle_input(InputEvent::TextInput('1'));

        assert_eq!(term.mode(), Mode::Normal);
        assert!(term.dialog().is_none());
        assert!(term.session().has_nuke_codes());
        assert!(term.session().is_locked());
        assert_eq!(term.session().ending(), Ending::Bad);

        let before = term.output().len();
        term.execute("help");
        assert_eq!(term.output().len(), before + 1);
        assert_eq!(last(&term), LOCKED_MESSAGE);
    }

    #[test]
    fn option_two_returns_to_saved_directory() {
        let mut term = terminal();
        term.execute("cd var");
        term.execute("cd log");
        connect(&mut term);
        term.execute("cat codes.txt");
        term.submit_decision(Decision::KeepExploring).unwrap();

        assert!(!term.session().is_remote());
        assert_eq!(term.tree().path_of(term.cwd()), "/var/log");
        assert_eq!(term.prompt(), "root@alliance1:/var/log$ ");
        assert_eq!(last(&term), "You should look around for more information...");
        assert_eq!(term.session().ending(), Ending::None);
    }

    #[test]
    fn option_three_requires_all_clues() {
        let mut term = terminal();
        connect(&mut term);
        term.execute("cat codes.txt");
        assert!(term.submit_decision(Decision::SubmitModified).is_err());
        assert!(matches!(term.mode(), Mode::AwaitingDecision { .. }));
        term.handle_input(InputEvent::TextInput('3'));
        assert!(matches!(term.mode(), Mode::AwaitingDecision { .. }));
    }

    #[test]
    fn option_three_with_all_clues_is_good_ending() {
        let mut term = terminal();
        collect_clues(&mut term);
        assert!(term.session().has_found_all_clues());
        connect(&mut term);
        term.execute("cat codes.txt");
        assert_eq!(
            term.mode(),
            Mode::AwaitingDecision {
                allow_modified: true
            }
        );
        assert!(term.dialog().unwrap().contains("3: Send modified launch codes"));
        term.handle_input(InputEvent::TextInput('3'));
        assert_eq!(term.session().ending(), Ending::Good);
        assert!(term.session().is_locked());
    }

    #[test]
    fn decision_without_dialog_is_invalid() {
        let mut term = terminal();
        assert!(term.submit_decision(Decision::SubmitCodes).is_err());
        assert!(!term.session().is_locked());
    }

    #[test]
    fn breach_request_and_success() {
        let mut term = terminal();
        term.execute("cd home");
        term.execute("cd user");
        term.execute("breach .secure");
        assert_eq!(last(&term), BREACH_BANNER);

        let request = term.take_breach_request().unwrap();
        assert!(term.take_breach_request().is_none());
        term.apply_breach_success(&request).unwrap();

        assert!(!term.tree().get(request.target).unwrap().is_locked());
        assert_eq!(term.tree().path_of(term.cwd()), "/home/user/.secure");
        assert!(term.output().iter().any(|l| l == "Access granted to .secure directory"));
        term.execute("cat remoteServer.txt");
        assert!(term.output().iter().any(|l| l == "IP: 192.168.1.100"));
    }

    #[test]
    fn breach_success_enters_target_after_cursor_moved() {
        let mut term = terminal();
        term.execute("cd home");
        term.execute("cd user");
        term.execute("breach .secure");
        let request = term.take_breach_request().unwrap();
        term.execute("cd ..");
        assert_eq!(term.tree().path_of(term.cwd()), "/home");

        term.apply_breach_success(&request).unwrap();
        assert_eq!(term.cwd(), request.target);
        assert_eq!(term.tree().path_of(term.cwd()), "/home/user/.secure");
        assert_eq!(term.prompt(), "root@alliance1:/home/user/.secure$ ");
        assert_eq!(last(&term), "root@alliance1:/home$ cd .secure");
        assert!(!term.output().iter().any(|l| l.contains("No such directory")));
    }

    #[test]
    fn breach_success_on_file_is_rejected() {
        let mut term = terminal();
        let root = term.cwd();
        let file = term.tree.add_file(root, "notes.txt", "x").unwrap();
        let request = BreachRequest {
            target: file,
            name: "notes.txt".to_string(),
        };
        let err = term.apply_breach_success(&request).unwrap_err();
        assert!(matches!(err, InfiltratorError::Breach(_)));
        assert_eq!(term.cwd(), root);
    }

    #[test]
    fn cancel_requests_restart() {
        let mut term = terminal();
        assert!(!term.restart_requested());
        term.handle_input(InputEvent::Cancel);
        assert!(term.restart_requested());
    }

    #[test]
    fn thought_expires_with_ticks() {
        let mut term = terminal();
        term.execute("cd opt");
        term.execute("cd .internal");
        term.execute(&format!("cat {}", CLUE_FILES[2]));
        assert!(term.session().thought().is_some());
        term.tick(5.1);
        assert!(term.session().thought().is_none());
    }

    #[test]
    fn scrollback_is_bounded_and_scrollable() {
        let mut term = terminal_with(TerminalConfig {
            max_scrollback: 10,
            ..TerminalConfig::default()
        });
        for _ in 0..20 {
            term.execute("pwd");
        }
        assert_eq!(term.output().len(), 10);
        assert_eq!(last(&term), "/");

        for _ in 0..50 {
            term.handle_input(InputEvent::ScrollUp);
        }
        assert_eq!(term.scroll_offset(), 9);
        assert_eq!(term.visible_lines(3).len(), 1);
        term.handle_input(InputEvent::ScrollDown);
        assert_eq!(term.scroll_offset(), 8);
        assert_eq!(term.visible_lines(3).len(), 2);
    }
}
