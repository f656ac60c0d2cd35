//! The fixed, hand-authored game world and the remote server subtree.

use infiltrator_types::config::WorldConfig;
use infiltrator_types::error::Result;

use crate::analysis::NETWORK_CONFIG_TEXT;
use crate::node::NodeId;
use crate::tree::FsTree;

/// Name of the locked directory under `/home/user`.
pub const SECURE_DIR: &str = ".secure";

/// The three narrative clue files, in clue order.
pub const CLUE_FILES: [&str; 3] = [
    "regime_activities.txt",
    "intercepted_comms.log",
    "operation_truth.enc",
];

/// Root directory name of the remote server.
pub const REMOTE_SERVER_NAME: &str = "ALLIANCE_SECURE_SERVER";

/// The only file on the remote server.
pub const CODES_FILE: &str = "codes.txt";

pub const REMOTE_USER: &str = "admin";
pub const REMOTE_ADDRESS: &str = "192.168.1.100";
pub const REMOTE_PORT: &str = "444";

/// Content of the remote `codes.txt`.
pub const CODES_TEXT: &str = "NUCLEAR LAUNCH CODES\n\
===================\n\
Authorization: ALPHA-ZULU-9\n\
Confirmation: OMEGA-DELTA-4\n";

const REMOTE_SERVER_TEXT: &str = "ALLIANCE COMMAND SERVER\n\
=====================\n\
IP: 192.168.1.100\n\
PORT: 444\n\
USER: admin\n\
\n\
WARNING: ICE Defense System Active\n\
Multiple breach attempts will trigger lockdown\n\
Nuclear launch codes stored on secure server.\n";

const REGIME_ACTIVITIES_TEXT: &str = "ALLIANCE INTELLIGENCE REPORT\n\
===========================\n\
SUBJECT: Regime Civilian Operations\n\
\n\
Our operatives have confirmed the Regime's true intentions.\n\
The 'humanitarian aid' missions are fronts for systematic\n\
civilian elimination operations.\n\
\n\
Confirmed civilian casualties: 10,000+\n\
Destroyed infrastructure: 75% of urban centers\n\
Chemical weapons deployed: Multiple instances confirmed\n\
\n\
UN inspectors are being actively blocked from sites.\n\
Regime maintains public story of humanitarian aid.\n\
\n\
-- Alliance Intelligence Division\n";

const INTERCEPTED_COMMS_TEXT: &str = "INTERCEPTED REGIME COMMUNICATION\n\
==============================\n\
FROM: High Command\n\
TO: Field Operations\n\
\n\
Aid centers are successfully masking our operations.\n\
Continue using humanitarian convoys for weapons transport.\n\
Civilian registration provides excellent targeting data.\n\
\n\
Maintain deniability. Mark all dissidents as 'insurgents'.\n\
Prepare population centers for 'final solution'.\n";

const OPERATION_TRUTH_TEXT: &str = "REGIME INTERNAL MEMO - TOP SECRET\n\
===============================\n\
The Alliance must be eliminated completely.\n\
Nuclear deployment will target:\n\
- Major population centers\n\
- Civilian shelters\n\
- Humanitarian aid camps\n\
\n\
Estimated civilian casualties: 50 million+\n\
Acceptable losses for regime victory.\n\
\n\
Maintain humanitarian aid narrative until launch.\n";

/// A built world: the arena plus the id of the local root.
#[derive(Debug)]
pub struct World {
    pub tree: FsTree,
    pub root: NodeId,
}

/// Build the stock world.
pub fn build_world() -> Result<World> {
    build_world_with(&WorldConfig::default())
}

/// Build the world, applying optional additions from `config`.
pub fn build_world_with(config: &WorldConfig) -> Result<World> {
    let mut tree = FsTree::new();
    let root = tree.create_root("root");

    let etc = tree.add_child(root, "etc", false, true)?;
    let home = tree.add_sibling(etc, "home", false, true)?;
    let var = tree.add_sibling(home, "var", false, true)?;
    let opt = tree.add_sibling(var, "opt", false, true)?;

    let user = tree.add_child(home, "user", false, true)?;
    let secure = tree.add_child(user, SECURE_DIR, true, true)?;
    tree.node_mut(secure)?.set_locked(true);
    tree.add_file(secure, "remoteServer.txt", REMOTE_SERVER_TEXT)?;

    let evidence = tree.add_child(etc, ".evidence", true, true)?;
    tree.add_file(evidence, CLUE_FILES[0], REGIME_ACTIVITIES_TEXT)?;

    let log_dir = tree.add_child(var, "log", false, true)?;
    let archived = tree.add_child(log_dir, ".archived_logs", true, true)?;
    tree.add_file(archived, CLUE_FILES[1], INTERCEPTED_COMMS_TEXT)?;

    let internal = tree.add_child(opt, ".internal", true, true)?;
    tree.add_file(internal, CLUE_FILES[2], OPERATION_TRUTH_TEXT)?;

    if config.network_config {
        let conf = tree.add_file(etc, "network.conf", NETWORK_CONFIG_TEXT)?;
        tree.node_mut(conf)?.make_network_config();
    }

    log::info!("World built: {} nodes", tree.len());
    Ok(World { tree, root })
}

/// Create the remote server as a new root in `tree`.
pub fn build_remote_server(tree: &mut FsTree) -> Result<NodeId> {
    let root = tree.create_root(REMOTE_SERVER_NAME);
    tree.add_file(root, CODES_FILE, CODES_TEXT)?;
    Ok(root)
}
