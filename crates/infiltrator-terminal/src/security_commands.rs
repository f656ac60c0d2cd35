//! Intrusion commands: analyze, breach.

use infiltrator_types::error::{InfiltratorError, Result};
use infiltrator_vfs::Analysis;

use crate::interpreter::{BreachRequest, Command, CommandOutput, CommandRegistry, Environment};

/// Register the intrusion commands into a registry.
pub fn register_security_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(AnalyzeCmd));
    reg.register(Box::new(BreachCmd));
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

struct AnalyzeCmd;
impl Command for AnalyzeCmd {
    fn name(&self) -> &str {
        "analyze"
    }
    fn description(&self) -> &str {
        "Analyze network configuration"
    }
    fn usage(&self) -> &str {
        "analyze <file>"
    }
    fn category(&self) -> &str {
        "security"
    }
    fn execute(&self, args: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let name = args.trim();
        let analysis = match env.tree.find_child(env.cwd, name) {
            Some(id) => env.tree.node_mut(id)?.analyze(),
            None => Analysis::NotAnalyzable,
        };
        match analysis {
            Analysis::NotAnalyzable => Err(InfiltratorError::Command(
                "Error: Cannot analyze this file type.".to_string(),
            )),
            Analysis::Exhausted => Err(InfiltratorError::Command(
                "No analysis attempts remaining.".to_string(),
            )),
            Analysis::Report(report) => {
                log::info!("analyze: {name}");
                Ok(CommandOutput::Scripted(
                    report.lines().map(str::to_string).collect(),
                ))
            },
        }
    }
}

// ---------------------------------------------------------------------------
// breach
// ---------------------------------------------------------------------------

struct BreachCmd;
impl Command for BreachCmd {
    fn name(&self) -> &str {
        "breach"
    }
    fn description(&self) -> &str {
        "Initiate ICE breach protocol"
    }
    fn usage(&self) -> &str {
        "breach <dir>"
    }
    fn category(&self) -> &str {
        "security"
    }
    fn execute(&self, args: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let name = args.trim();
        let target = env.tree.find_child(env.cwd, name).ok_or_else(|| {
            InfiltratorError::Command(format!("breach: target not found: {name}"))
        })?;
        if !env.tree.node(target)?.is_locked() {
            return Err(InfiltratorError::Command(format!(
                "breach: target is not locked: {name}"
            )));
        }
        log::info!("breach requested: {name}");
        Ok(CommandOutput::Breach(BreachRequest {
            target,
            name: name.to_string(),
        }))
    }
}
