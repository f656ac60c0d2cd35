//! Command trait, registry, and dispatch logic.
//!
//! A line is split once, on the first whitespace run, into the command name
//! and the rest of the line. Names are matched exactly and case-sensitively;
//! each command tokenizes its own arguments.

use std::collections::HashMap;

use infiltrator_types::error::{InfiltratorError, Result};
use infiltrator_vfs::{FsTree, NodeId};

use crate::session::{LOCKED_MESSAGE, Session};

/// A locked directory the player asked to breach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreachRequest {
    pub target: NodeId,
    pub name: String,
}

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// Lines appended to the log at once, separated by `\n`.
    Text(String),
    /// Command produced no visible output.
    None,
    /// Signal to clear the terminal output buffer.
    Clear,
    /// Lines revealed one at a time by the terminal's pending queue.
    Scripted(Vec<String>),
    /// Signal to the controller to start the breach minigame.
    Breach(BreachRequest),
    /// Signal to the terminal to open the launch-codes decision dialog.
    Decision {
        prompt: String,
        allow_modified: bool,
    },
}

/// Shared mutable environment passed to every command.
pub struct Environment<'a> {
    /// Arena holding the local world and, while connected, the remote server.
    pub tree: &'a mut FsTree,
    /// Current directory.
    pub cwd: NodeId,
    /// Root of the local world, where `exit` returns to.
    pub local_root: NodeId,
    pub session: &'a mut Session,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// Additional names that dispatch to this command.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "cd <dir>").
    fn usage(&self) -> &str;

    /// Command category for grouping in logs and help.
    fn category(&self) -> &str {
        "general"
    }

    /// Execute the command with the rest of the line after its name.
    fn execute(&self, args: &str, env: &mut Environment<'_>) -> Result<CommandOutput>;
}

/// Registry of available commands with dispatch.
///
/// `help` and `--help` are built in: the listing is generated from the
/// registered commands' usage and description, in registration order.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
    aliases: HashMap<String, String>,
    order: Vec<String>,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            aliases: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        for alias in cmd.aliases() {
            self.aliases
                .insert((*alias).to_string(), cmd.name().to_string());
        }
        if !self.commands.contains_key(cmd.name()) {
            self.order.push(cmd.name().to_string());
        }
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    /// Whether `name` (or an alias) is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn resolve(&self, name: &str) -> Option<&dyn Command> {
        let canonical = self.aliases.get(name).map_or(name, String::as_str);
        self.commands.get(canonical).map(Box::as_ref)
    }

    /// Parse and execute a command line.
    ///
    /// While the session is locked every non-empty line, known or not,
    /// yields the lock message and nothing runs.
    pub fn execute(&self, line: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(CommandOutput::None);
        }
        if env.session.is_locked() {
            return Ok(CommandOutput::Text(LOCKED_MESSAGE.to_string()));
        }

        let (name, rest) = split_command(trimmed);
        if matches!(name, "help" | "--help") {
            return self.execute_help(rest);
        }
        let Some(cmd) = self.resolve(name) else {
            return Err(InfiltratorError::Command(format!(
                "{name}: command not found"
            )));
        };
        log::debug!("exec [{}]: {name} {rest:?}", cmd.category());
        cmd.execute(rest, env)
    }

    /// Built-in help with access to the registry.
    fn execute_help(&self, args: &str) -> Result<CommandOutput> {
        if let Some(name) = args.split_whitespace().next() {
            let Some(cmd) = self.resolve(name) else {
                return Err(InfiltratorError::Command(format!(
                    "help: no such command: {name}"
                )));
            };
            return Ok(CommandOutput::Text(format!(
                "{} ({})\n  {}\n  Usage: {}",
                cmd.name(),
                cmd.category(),
                cmd.description(),
                cmd.usage()
            )));
        }

        let mut out = String::from("Available commands:");
        for cmd in self.order.iter().filter_map(|name| self.commands.get(name)) {
            out.push_str(&format!("\n  {:<24}: {}", cmd.usage(), cmd.description()));
        }
        out.push_str(&format!("\n  {:<24}: {}", "help [command]", HELP_DESCRIPTION));
        Ok(CommandOutput::Text(out))
    }
}

const HELP_DESCRIPTION: &str = "Display this help message";

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Split on the first whitespace run into the command name and the rest.
pub fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim_start()),
        None => (line, ""),
    }
}
