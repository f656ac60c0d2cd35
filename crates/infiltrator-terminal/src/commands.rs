//! Built-in filesystem commands.

use infiltrator_types::error::{InfiltratorError, Result};
use infiltrator_vfs::hexdump::xxd_lines;
use infiltrator_vfs::world::CODES_FILE;

use crate::decision::decision_prompt;
use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};

/// Register all built-in commands into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(LsCmd));
    reg.register(Box::new(CdCmd));
    reg.register(Box::new(PwdCmd));
    reg.register(Box::new(CatCmd));
    reg.register(Box::new(XxdCmd));
    crate::register_security_commands(reg);
    crate::register_remote_commands(reg);
    reg.register(Box::new(ClearCmd));
}

fn command_error(msg: String) -> InfiltratorError {
    InfiltratorError::Command(msg)
}

// ---------------------------------------------------------------------------
// ls
// ---------------------------------------------------------------------------

struct LsCmd;
impl Command for LsCmd {
    fn name(&self) -> &str {
        "ls"
    }
    fn description(&self) -> &str {
        "List files (-a: include HIDDEN, -l: details)"
    }
    fn usage(&self) -> &str {
        "ls [-a] [-l]"
    }
    fn execute(&self, args: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let mut show_hidden = false;
        let mut detailed = false;
        for flag in args.split_whitespace().filter(|t| t.starts_with('-')) {
            show_hidden |= flag.contains('a');
            detailed |= flag.contains('l');
        }

        let children = env.tree.children(env.cwd);
        if children.is_empty() {
            return Ok(CommandOutput::Text("Directory is empty.".to_string()));
        }

        let mut lines = Vec::new();
        if detailed {
            let total = env.tree.count_visible_children(env.cwd, show_hidden);
            lines.push(format!("total {total}"));
        }
        for &child in children {
            let node = env.tree.node(child)?;
            if node.is_hidden() && !show_hidden {
                continue;
            }
            lines.push(if detailed {
                node.detail_line()
            } else {
                node.listing_name()
            });
        }

        if lines.is_empty() {
            return Ok(CommandOutput::None);
        }
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

struct CdCmd;
impl Command for CdCmd {
    fn name(&self) -> &str {
        "cd"
    }
    fn description(&self) -> &str {
        "Change directory"
    }
    fn usage(&self) -> &str {
        "cd <dir>"
    }
    fn execute(&self, args: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let path = args.trim();
        if path.is_empty() || path == "~" {
            env.cwd = env.tree.root_of(env.cwd);
            return Ok(CommandOutput::None);
        }
        if path == ".." {
            if let Some(parent) = env.tree.node(env.cwd)?.parent() {
                env.cwd = parent;
            }
            return Ok(CommandOutput::None);
        }

        let target = env
            .tree
            .find_child(env.cwd, path)
            .filter(|&id| env.tree.get(id).is_some_and(|n| n.is_directory()))
            .ok_or_else(|| command_error(format!("cd: {path}: No such directory")))?;
        if env.tree.node(target)?.is_locked() {
            log::info!("cd refused: {path} is locked");
            return Err(command_error(
                "Access denied: Directory is locked.".to_string(),
            ));
        }
        env.cwd = target;
        Ok(CommandOutput::None)
    }
}

// ---------------------------------------------------------------------------
// pwd
// ---------------------------------------------------------------------------

struct PwdCmd;
impl Command for PwdCmd {
    fn name(&self) -> &str {
        "pwd"
    }
    fn description(&self) -> &str {
        "Print working directory"
    }
    fn usage(&self) -> &str {
        "pwd"
    }
    fn execute(&self, _args: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.tree.path_of(env.cwd)))
    }
}

// ---------------------------------------------------------------------------
// cat
// ---------------------------------------------------------------------------

struct CatCmd;
impl Command for CatCmd {
    fn name(&self) -> &str {
        "cat"
    }
    fn description(&self) -> &str {
        "Display file contents"
    }
    fn usage(&self) -> &str {
        "cat <file>"
    }
    fn execute(&self, args: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let name = args.trim();
        let id = env
            .tree
            .find_child(env.cwd, name)
            .ok_or_else(|| command_error(format!("cat: {name}: No such file")))?;

        if name == CODES_FILE && env.session.is_remote() {
            let allow_modified = env.session.has_found_all_clues();
            log::info!("Launch codes opened (modified option: {allow_modified})");
            return Ok(CommandOutput::Decision {
                prompt: decision_prompt(allow_modified),
                allow_modified,
            });
        }

        let node = env.tree.node(id)?;
        if node.is_directory() {
            return Err(command_error(format!("cat: {name}: Is a directory")));
        }
        let text = format!("\n{}", node.visible_content());
        env.session.record_read(name);
        Ok(CommandOutput::Text(text))
    }
}

// ---------------------------------------------------------------------------
// xxd / hexdump
// ---------------------------------------------------------------------------

struct XxdCmd;
impl Command for XxdCmd {
    fn name(&self) -> &str {
        "xxd"
    }
    fn aliases(&self) -> &[&str] {
        &["hexdump"]
    }
    fn description(&self) -> &str {
        "Display file contents in hex"
    }
    fn usage(&self) -> &str {
        "xxd <file>"
    }
    fn execute(&self, args: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let name = args.trim();
        let id = env
            .tree
            .find_child(env.cwd, name)
            .ok_or_else(|| command_error(format!("xxd: {name}: No such file")))?;
        let bytes = env.tree.node(id)?.full_content().as_bytes();

        let lines = xxd_lines(bytes);
        if lines.is_empty() {
            return Ok(CommandOutput::None);
        }
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// clear
// ---------------------------------------------------------------------------

struct ClearCmd;
impl Command for ClearCmd {
    fn name(&self) -> &str {
        "clear"
    }
    fn description(&self) -> &str {
        "Clear the terminal"
    }
    fn usage(&self) -> &str {
        "clear"
    }
    fn execute(&self, _args: &str, _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Clear)
    }
}
