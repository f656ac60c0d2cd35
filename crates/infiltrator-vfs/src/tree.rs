//! Arena-backed filesystem tree.
//!
//! Every node lives in a slot of one `Vec`. Slots of removed nodes are left
//! empty and never reused, so a stale [`NodeId`] can only ever resolve to
//! `None`, never to an unrelated node.

use infiltrator_types::error::{InfiltratorError, Result};

use crate::node::{FileNode, NodeId};

/// An arena of [`FileNode`]s. May hold several independent trees (the local
/// world and an ephemeral remote server), each with its own root.
#[derive(Debug, Default)]
pub struct FsTree {
    nodes: Vec<Option<FileNode>>,
}

impl FsTree {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn insert(&mut self, node: FileNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(node));
        id
    }

    /// Create a new, parentless directory.
    pub fn create_root(&mut self, name: &str) -> NodeId {
        let id = self.insert(FileNode::new(name, None, false, true));
        log::debug!("vfs: created root {name} ({})", id.index());
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&FileNode> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut FileNode> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Like [`get`](Self::get) but reports a missing node as an error.
    pub fn node(&self, id: NodeId) -> Result<&FileNode> {
        self.get(id)
            .ok_or_else(|| InfiltratorError::Vfs(format!("no such node: {}", id.index())))
    }

    /// Like [`get_mut`](Self::get_mut) but reports a missing node as an error.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut FileNode> {
        self.get_mut(id)
            .ok_or_else(|| InfiltratorError::Vfs(format!("no such node: {}", id.index())))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a new node to the end of `parent`'s children.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: &str,
        hidden: bool,
        is_dir: bool,
    ) -> Result<NodeId> {
        let dir = self.node(parent)?;
        if !dir.is_directory() {
            return Err(InfiltratorError::Vfs(format!(
                "not a directory: {}",
                dir.name()
            )));
        }
        if self.find_child(parent, name).is_some() {
            return Err(InfiltratorError::Vfs(format!("file exists: {name}")));
        }
        let id = self.insert(FileNode::new(name, Some(parent), hidden, is_dir));
        self.node_mut(parent)?.children.push(id);
        log::debug!("vfs: added {name} under {}", parent.index());
        Ok(id)
    }

    /// Append a new node after the last sibling of `node`, under the same
    /// parent. A root has no siblings.
    pub fn add_sibling(
        &mut self,
        node: NodeId,
        name: &str,
        hidden: bool,
        is_dir: bool,
    ) -> Result<NodeId> {
        let current = self.node(node)?;
        let parent = current.parent().ok_or_else(|| {
            InfiltratorError::Vfs(format!("root has no siblings: {}", current.name()))
        })?;
        self.add_child(parent, name, hidden, is_dir)
    }

    /// Add a visible file with content under `parent`.
    pub fn add_file(&mut self, parent: NodeId, name: &str, content: &str) -> Result<NodeId> {
        let id = self.add_child(parent, name, false, false)?;
        self.node_mut(id)?.set_content(content);
        Ok(id)
    }

    /// Exact-name lookup among the immediate children of `dir`.
    pub fn find_child(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        let dir = self.get(dir)?;
        dir.children()
            .iter()
            .copied()
            .find(|&child| self.get(child).is_some_and(|n| n.name() == name))
    }

    /// Children of `dir` in insertion order; empty for files or missing nodes.
    pub fn children(&self, dir: NodeId) -> &[NodeId] {
        self.get(dir).map(FileNode::children).unwrap_or(&[])
    }

    /// Count immediate children, optionally including hidden ones.
    pub fn count_visible_children(&self, dir: NodeId, include_hidden: bool) -> usize {
        self.children(dir)
            .iter()
            .filter_map(|&child| self.get(child))
            .filter(|n| include_hidden || !n.is_hidden())
            .count()
    }

    /// Walk parent links up to the root of the tree containing `id`.
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.get(current).and_then(FileNode::parent) {
            current = parent;
        }
        current
    }

    /// Absolute path of `id`. The root's own name is not part of the path;
    /// the root itself is `/`.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = id;
        while let Some(node) = self.get(current) {
            match node.parent() {
                Some(parent) => {
                    names.push(node.name());
                    current = parent;
                },
                None => break,
            }
        }
        if names.is_empty() {
            return "/".to_string();
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    /// Remove `id` and everything beneath it. Returns the number of nodes
    /// removed (0 if `id` was already gone).
    pub fn remove_subtree(&mut self, id: NodeId) -> usize {
        let Some(node) = self.get(id) else {
            return 0;
        };
        if let Some(parent) = node.parent()
            && let Some(parent_node) = self.get_mut(parent)
        {
            parent_node.children.retain(|&c| c != id);
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get_mut(current.0).and_then(Option::take) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        log::debug!("vfs: removed subtree {} ({removed} nodes)", id.index());
        removed
    }
}
