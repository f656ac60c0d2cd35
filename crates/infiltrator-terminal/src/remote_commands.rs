//! Remote session commands: ssh, exit.

use infiltrator_types::error::{InfiltratorError, Result};
use infiltrator_vfs::build_remote_server;
use infiltrator_vfs::world::{REMOTE_ADDRESS, REMOTE_PORT, REMOTE_SERVER_NAME, REMOTE_USER};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment};
use crate::session::RemoteLink;

const SSH_USAGE: &str = "Invalid format. Use: ssh user@ip -p port";

/// Register the remote session commands into a registry.
pub fn register_remote_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(SshCmd));
    reg.register(Box::new(ExitCmd));
}

// ---------------------------------------------------------------------------
// ssh
// ---------------------------------------------------------------------------

struct SshCmd;
impl Command for SshCmd {
    fn name(&self) -> &str {
        "ssh"
    }
    fn description(&self) -> &str {
        "Connect to remote server"
    }
    fn usage(&self) -> &str {
        "ssh <user@ip> -p <port>"
    }
    fn category(&self) -> &str {
        "remote"
    }
    fn execute(&self, args: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let mut tokens = args.split_whitespace();
        let connection = tokens.next().unwrap_or_default();
        let port_flag = tokens.next().unwrap_or_default();
        let port = tokens.next().unwrap_or_default();

        let (user, address) = connection
            .split_once('@')
            .ok_or_else(|| InfiltratorError::Command(SSH_USAGE.to_string()))?;
        if port_flag != "-p" {
            return Err(InfiltratorError::Command(SSH_USAGE.to_string()));
        }
        if env.session.is_remote() {
            return Err(InfiltratorError::Command(format!(
                "ssh: already connected to {REMOTE_SERVER_NAME}"
            )));
        }

        let mut lines = vec![format!("Attempting connection to {address}...")];
        if user != REMOTE_USER || address != REMOTE_ADDRESS || port != REMOTE_PORT {
            log::warn!("ssh: rejected {user}@{address}:{port}");
            lines.push("Connection failed: Invalid credentials".to_string());
            lines.push("Warning: Access attempt has been logged".to_string());
            return Ok(CommandOutput::Scripted(lines));
        }

        let root = build_remote_server(env.tree)?;
        env.session.connect(RemoteLink {
            root,
            return_to: env.cwd,
        });
        env.cwd = root;
        log::info!("ssh: connected to {REMOTE_SERVER_NAME}");

        lines.extend(
            [
                "Establishing secure connection...",
                "Authenticating...",
                "Access granted. ALLIANCE_SECURE_SERVER",
                "----------------------------------",
                "WARNING: This is a restricted system.",
                "All activities are being monitored.",
            ]
            .map(str::to_string),
        );
        Ok(CommandOutput::Scripted(lines))
    }
}

// ---------------------------------------------------------------------------
// exit
// ---------------------------------------------------------------------------

struct ExitCmd;
impl Command for ExitCmd {
    fn name(&self) -> &str {
        "exit"
    }
    fn description(&self) -> &str {
        "Disconnect from remote server"
    }
    fn usage(&self) -> &str {
        "exit"
    }
    fn category(&self) -> &str {
        "remote"
    }
    fn execute(&self, _args: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        // Outside a remote session `exit` does not exist.
        let link = env
            .session
            .disconnect()
            .ok_or_else(|| InfiltratorError::Command("exit: command not found".to_string()))?;
        env.tree.remove_subtree(link.root);
        env.cwd = env.local_root;
        log::info!("ssh: disconnected");
        Ok(CommandOutput::Text(
            "Disconnecting from remote server...".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use infiltrator_vfs::world::CODES_FILE;
    use infiltrator_vfs::{NodeId, World, build_world};

    fn setup() -> (CommandRegistry, World, Session) {
        let mut reg = CommandRegistry::new();
        crate::register_builtins(&mut reg);
        (reg, build_world().unwrap(), Session::new(5.0))
    }

    fn exec(
        reg: &CommandRegistry,
        world: &mut World,
        session: &mut Session,
        cwd: &mut NodeId,
        line: &str,
    ) -> Result<CommandOutput> {
        let mut env = Environment {
            tree: &mut world.tree,
            cwd: *cwd,
            local_root: world.root,
            session,
        };
        let result = reg.execute(line, &mut env);
        *cwd = env.cwd;
        result
    }

    const GOOD_SSH: &str = "ssh admin@192.168.1.100 -p 444";

    #[test]
    fn ssh_with_valid_credentials_exposes_codes() {
        let (reg, mut world, mut session) = setup();
        let mut cwd = world.tree.find_child(world.root, "var").unwrap();
        let start = cwd;

        let out = exec(&reg, &mut world, &mut session, &mut cwd, GOOD_SSH).unwrap();
        let CommandOutput::Scripted(lines) = out else {
            panic!("expected scripted output");
        };
        assert_eq!(lines[0], "Attempting connection to 192.168.1.100...");
        assert!(lines.iter().any(|l| l == "Access granted. ALLIANCE_SECURE_SERVER"));

        assert!(session.is_remote());
        assert_eq!(session.remote().unwrap().return_to, start);
        assert_eq!(world.tree.get(cwd).unwrap().name(), REMOTE_SERVER_NAME);
        assert!(world.tree.find_child(cwd, CODES_FILE).is_some());
        assert_eq!(world.tree.path_of(cwd), "/");
    }

    #[test]
    fn ssh_with_wrong_credentials_changes_nothing() {
        let (reg, mut world, mut session) = setup();
        let mut cwd = world.root;
        let nodes = world.tree.len();
        for line in [
            "ssh root@192.168.1.100 -p 444",
            "ssh admin@10.0.1.42 -p 444",
            "ssh admin@192.168.1.100 -p 22",
        ] {
            let out = exec(&reg, &mut world, &mut session, &mut cwd, line).unwrap();
            let CommandOutput::Scripted(lines) = out else {
                panic!("expected scripted output");
            };
            assert_eq!(lines[1], "Connection failed: Invalid credentials");
            assert_eq!(lines[2], "Warning: Access attempt has been logged");
        }
        assert_eq!(cwd, world.root);
        assert!(!session.is_remote());
        assert_eq!(world.tree.len(), nodes);
    }

    #[test]
    fn ssh_malformed() {
        let (reg, mut world, mut session) = setup();
        let mut cwd = world.root;
        for line in ["ssh", "ssh admin", "ssh admin@192.168.1.100", "ssh admin@192.168.1.100 -x 444"] {
            let err = exec(&reg, &mut world, &mut session, &mut cwd, line).unwrap_err();
            assert_eq!(format!("{err}"), SSH_USAGE, "{line}");
        }
    }

    #[test]
    fn exit_returns_to_local_root_and_destroys_remote() {
        let (reg, mut world, mut session) = setup();
        let mut cwd = world.tree.find_child(world.root, "opt").unwrap();
        let nodes = world.tree.len();
        exec(&reg, &mut world, &mut session, &mut cwd, GOOD_SSH).unwrap();
        let remote = cwd;

        let out = exec(&reg, &mut world, &mut session, &mut cwd, "exit").unwrap();
        assert_eq!(
            out,
            CommandOutput::Text("Disconnecting from remote server...".to_string())
        );
        assert_eq!(cwd, world.root);
        assert!(!session.is_remote());
        assert!(world.tree.get(remote).is_none());
        assert_eq!(world.tree.len(), nodes);
    }

    #[test]
    fn exit_outside_remote_is_unknown() {
        let (reg, mut world, mut session) = setup();
        let mut cwd = world.root;
        let err = exec(&reg, &mut world, &mut session, &mut cwd, "exit").unwrap_err();
        assert_eq!(format!("{err}"), "exit: command not found");
    }

    #[test]
    fn cd_home_while_remote_stays_on_server() {
        let (reg, mut world, mut session) = setup();
        let mut cwd = world.root;
        exec(&reg, &mut world, &mut session, &mut cwd, GOOD_SSH).unwrap();
        let remote = cwd;
        exec(&reg, &mut world, &mut session, &mut cwd, "cd ~").unwrap();
        assert_eq!(cwd, remote);
        exec(&reg, &mut world, &mut session, &mut cwd, "cd ..").unwrap();
        assert_eq!(cwd, remote);
    }

    #[test]
    fn cat_codes_in_remote_opens_decision() {
        let (reg, mut world, mut session) = setup();
        let mut cwd = world.root;
        exec(&reg, &mut world, &mut session, &mut cwd, GOOD_SSH).unwrap();
        let out = exec(&reg, &mut world, &mut session, &mut cwd, "cat codes.txt").unwrap();
        let CommandOutput::Decision {
            prompt,
            allow_modified,
        } = out
        else {
            panic!("expected decision");
        };
        assert!(!allow_modified);
        assert!(prompt.contains("ALPHA-ZULU-9"));
    }

    #[test]
    fn second_ssh_while_connected_is_refused() {
        let (reg, mut world, mut session) = setup();
        let mut cwd = world.root;
        exec(&reg, &mut world, &mut session, &mut cwd, GOOD_SSH).unwrap();
        let err = exec(&reg, &mut world, &mut session, &mut cwd, GOOD_SSH).unwrap_err();
        assert!(format!("{err}").starts_with("ssh: already connected"));
    }
}
