//! Directory tree
//!
//! Directories form a hierarchy assembled by the external loader:
//! records are inserted first, then wired together with
//! [`DirectoryTree::add_subdirectory`]. The tree is an arena that owns
//! every node; parent back-references are non-owning id links into the
//! arena, so ownership stays strictly top-down.

use crate::error::{TreeError, TreeKind};
use crate::identity::{DirectoryId, Timestamp};
use crate::path;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A constants directory record.
///
/// Constructed fully populated by the external loader and never mutated
/// afterward. `parent_id` is database metadata; the structural parent
/// link inside a [`DirectoryTree`] is established only by the attach
/// operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    pub id: DirectoryId,
    /// Database id of the parent directory. Id 0 marks a root-level directory.
    pub parent_id: DirectoryId,
    pub name: String,
    pub created_time: Timestamp,
    pub modified_time: Timestamp,
    /// Full description of the directory.
    pub comment: String,
}

#[derive(Debug, Clone)]
struct DirectoryNode {
    directory: Directory,
    parent: Option<DirectoryId>,
    subdirectories: Vec<DirectoryId>,
}

/// Arena of directories with parent/child links and path computation.
#[derive(Debug, Clone, Default)]
pub struct DirectoryTree {
    nodes: BTreeMap<DirectoryId, DirectoryNode>,
}

impl DirectoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructed directory record in the tree.
    ///
    /// The node starts detached: no parent link, no subdirectories.
    pub fn insert(&mut self, directory: Directory) -> Result<(), TreeError> {
        let id = directory.id;
        if self.nodes.contains_key(&id) {
            return Err(TreeError::DuplicateNode {
                kind: TreeKind::Directory,
                id: id.0,
            });
        }
        self.nodes.insert(
            id,
            DirectoryNode {
                directory,
                parent: None,
                subdirectories: Vec::new(),
            },
        );
        Ok(())
    }

    /// Attach `child` as a subdirectory of `parent`.
    ///
    /// Sets the child's parent back-reference and appends the child to
    /// the parent's ordered subdirectory sequence. Fails without touching
    /// the tree if either id is unknown, if the child is already attached
    /// somewhere, or if the attach would create a cycle.
    pub fn add_subdirectory(
        &mut self,
        parent: DirectoryId,
        child: DirectoryId,
    ) -> Result<(), TreeError> {
        self.node(parent)?;
        let child_node = self.node(child)?;
        if child_node.parent.is_some() {
            return Err(TreeError::AlreadyAttached {
                kind: TreeKind::Directory,
                child: child.0,
            });
        }
        // Attaching a node under its own subtree (or itself) would make
        // path computation and disposal loop forever.
        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == child {
                return Err(TreeError::CycleDetected {
                    kind: TreeKind::Directory,
                    child: child.0,
                    parent: parent.0,
                });
            }
            cursor = self.node(current)?.parent;
        }

        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.subdirectories.push(child);
        Ok(())
    }

    /// Full path of a directory, including its own name.
    ///
    /// A directory with no parent link has `full_path == name`; otherwise
    /// the parent's full path is combined with the name. Children of an
    /// empty-named root therefore come out '/'-prefixed.
    pub fn full_path(&self, id: DirectoryId) -> Result<String, TreeError> {
        let mut names: Vec<&str> = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current)?;
            names.push(node.directory.name.as_str());
            cursor = node.parent;
        }

        let mut segments = names.into_iter().rev();
        let root = segments.next().unwrap_or_default().to_string();
        Ok(segments.fold(root, |acc, name| path::combine(&acc, name)))
    }

    /// Ordered subdirectory ids of a directory.
    pub fn subdirectories(&self, id: DirectoryId) -> Result<&[DirectoryId], TreeError> {
        Ok(&self.node(id)?.subdirectories)
    }

    /// Non-owning parent back-reference, `None` for detached or root nodes.
    pub fn parent_of(&self, id: DirectoryId) -> Result<Option<DirectoryId>, TreeError> {
        Ok(self.node(id)?.parent)
    }

    /// Recursively release ownership of all descendants of `id`.
    ///
    /// Every node below `id` is removed from the arena and the node's own
    /// subdirectory sequence is cleared. The node itself stays.
    pub fn dispose_subdirectories(&mut self, id: DirectoryId) -> Result<(), TreeError> {
        let mut pending = std::mem::take(&mut self.node_mut(id)?.subdirectories);
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                pending.extend(node.subdirectories);
            }
        }
        Ok(())
    }

    pub fn get(&self, id: DirectoryId) -> Option<&Directory> {
        self.nodes.get(&id).map(|node| &node.directory)
    }

    /// Ids of all inserted directories that have no parent link.
    pub fn root_directories(&self) -> Vec<DirectoryId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: DirectoryId) -> Result<&DirectoryNode, TreeError> {
        self.nodes.get(&id).ok_or(TreeError::UnknownNode {
            kind: TreeKind::Directory,
            id: id.0,
        })
    }

    fn node_mut(&mut self, id: DirectoryId) -> Result<&mut DirectoryNode, TreeError> {
        self.nodes.get_mut(&id).ok_or(TreeError::UnknownNode {
            kind: TreeKind::Directory,
            id: id.0,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
