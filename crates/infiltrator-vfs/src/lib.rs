//! Virtual file system for Terminal Infiltrator.
//!
//! Nodes live in an arena owned by [`FsTree`] and are addressed by stable
//! [`NodeId`]s. A directory keeps its children as an ordered id list and every
//! node keeps a non-owning back index to its parent.

mod analysis;
pub mod hexdump;
mod node;
mod tree;
pub mod world;

pub use analysis::{Analysis, MAX_ANALYSIS_ATTEMPTS, NetworkConfig};
pub use node::{FileNode, NodeId, NodeMeta};
pub use tree::FsTree;
pub use world::{World, build_remote_server, build_world, build_world_with};
