//! A single file or directory in the tree.

use chrono::{DateTime, Utc};

use crate::analysis::{Analysis, NetworkConfig};

/// Stable index of a node inside an [`FsTree`](crate::FsTree) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw arena index, for logging.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Cosmetic metadata shown by `ls -l`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeMeta {
    pub owner: String,
    pub group: String,
    pub permissions: String,
    pub size: u64,
    pub modified: DateTime<Utc>,
}

/// Block size reported for directories.
const DIR_SIZE: u64 = 4096;

impl NodeMeta {
    fn new(is_dir: bool) -> Self {
        Self {
            owner: "root".to_string(),
            group: "root".to_string(),
            permissions: if is_dir { "drwxr-xr-x" } else { "-rw-r--r--" }.to_string(),
            size: if is_dir { DIR_SIZE } else { 0 },
            modified: Utc::now(),
        }
    }
}

/// A file or directory.
///
/// Files and directories share this type; only directories may have children
/// or be locked.
#[derive(Debug, Clone)]
pub struct FileNode {
    name: String,
    is_dir: bool,
    hidden: bool,
    locked: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    content: String,
    visible_offset: usize,
    meta: NodeMeta,
    network: Option<NetworkConfig>,
}

impl FileNode {
    pub(crate) fn new(name: &str, parent: Option<NodeId>, hidden: bool, is_dir: bool) -> Self {
        Self {
            name: name.to_string(),
            is_dir,
            hidden,
            locked: false,
            parent,
            children: Vec::new(),
            content: String::new(),
            visible_offset: 0,
            meta: NodeMeta::new(is_dir),
            network: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_directory(&self) -> bool {
        self.is_dir
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Lock or unlock a directory. Files cannot be locked; returns whether
    /// the flag was applied.
    pub fn set_locked(&mut self, locked: bool) -> bool {
        if !self.is_dir {
            return false;
        }
        self.locked = locked;
        true
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order. Always empty for files.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    /// Entire content, including any redacted suffix.
    pub fn full_content(&self) -> &str {
        &self.content
    }

    /// The prefix of the content currently revealed to the player.
    pub fn visible_content(&self) -> &str {
        &self.content[..self.visible_offset]
    }

    pub fn visible_offset(&self) -> usize {
        self.visible_offset
    }

    /// Replace the content; all of it becomes visible.
    pub fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
        self.visible_offset = self.content.len();
        if !self.is_dir {
            self.meta.size = self.content.len() as u64;
        }
        self.meta.modified = Utc::now();
    }

    /// Restrict the visible prefix. The offset is clamped to the content
    /// length and moved back to the nearest character boundary.
    pub fn set_visible_offset(&mut self, offset: usize) {
        let mut offset = offset.min(self.content.len());
        while !self.content.is_char_boundary(offset) {
            offset -= 1;
        }
        self.visible_offset = offset;
    }

    /// Turn this file into an analyzable network configuration.
    pub fn make_network_config(&mut self) {
        self.network = Some(NetworkConfig::new());
    }

    pub fn is_network_config(&self) -> bool {
        self.network.is_some()
    }

    /// Remaining analysis attempts, if this is a network configuration.
    pub fn analysis_attempts(&self) -> Option<u8> {
        self.network.as_ref().map(NetworkConfig::remaining)
    }

    /// Run one analysis pass over this file.
    pub fn analyze(&mut self) -> Analysis {
        match self.network.as_mut() {
            Some(net) => net.analyze(&self.content),
            None => Analysis::NotAnalyzable,
        }
    }

    /// One `ls -l` line: permissions, links, owner, group, size, time, name.
    pub fn detail_line(&self) -> String {
        format!(
            "{:<10} {:<3} {:<8} {:<8} {:<5} {} {}{}",
            self.meta.permissions,
            2,
            self.meta.owner,
            self.meta.group,
            self.meta.size,
            self.meta.modified.format("%b %d %H:%M"),
            self.name,
            if self.is_dir { "/" } else { "" }
        )
    }

    /// Name as shown by a plain `ls`.
    pub fn listing_name(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_defaults() {
        let dir = FileNode::new("etc", None, false, true);
        assert!(dir.is_directory());
        assert_eq!(dir.meta().permissions, "drwxr-xr-x");
        assert_eq!(dir.meta().owner, "root");
        assert_eq!(dir.meta().group, "root");
        assert_eq!(dir.meta().size, 4096);
        assert_eq!(dir.listing_name(), "etc/");
    }

    #[test]
    fn file_defaults() {
        let file = FileNode::new("notes.txt", None, false, false);
        assert_eq!(file.meta().permissions, "-rw-r--r--");
        assert_eq!(file.listing_name(), "notes.txt");
        assert_eq!(file.visible_content(), "");
    }

    #[test]
    fn set_content_reveals_everything() {
        let mut file = FileNode::new("a.txt", None, false, false);
        file.set_content("hello\nworld");
        assert_eq!(file.visible_content(), "hello\nworld");
        assert_eq!(file.visible_offset(), 11);
        assert_eq!(file.meta().size, 11);
    }

    #[test]
    fn visible_offset_limits_prefix() {
        let mut file = FileNode::new("a.txt", None, false, false);
        file.set_content("public|secret");
        file.set_visible_offset(6);
        assert_eq!(file.visible_content(), "public");
        assert_eq!(file.full_content(), "public|secret");
    }

    #[test]
    fn visible_offset_is_clamped_and_char_aligned() {
        let mut file = FileNode::new("a.txt", None, false, false);
        file.set_content("a→b");
        file.set_visible_offset(100);
        assert_eq!(file.visible_offset(), file.full_content().len());
        // Byte 2 is inside the arrow.
        file.set_visible_offset(2);
        assert_eq!(file.visible_content(), "a");
    }

    #[test]
    fn files_cannot_be_locked() {
        let mut file = FileNode::new("a.txt", None, false, false);
        assert!(!file.set_locked(true));
        assert!(!file.is_locked());

        let mut dir = FileNode::new(".secure", None, true, true);
        assert!(dir.set_locked(true));
        assert!(dir.is_locked());
    }

    #[test]
    fn detail_line_layout() {
        let dir = FileNode::new("home", None, false, true);
        let line = dir.detail_line();
        assert!(line.starts_with("drwxr-xr-x 2   root     root     4096  "));
        assert!(line.ends_with(" home/"));
    }

    #[test]
    fn plain_file_is_not_analyzable() {
        let mut file = FileNode::new("a.txt", None, false, false);
        assert!(!file.is_network_config());
        assert_eq!(file.analysis_attempts(), None);
        assert_eq!(file.analyze(), Analysis::NotAnalyzable);
    }
}
