//! Variation tree
//!
//! Variations are named data contexts forming a hierarchy parallel to,
//! but independent of, the directory tree. The attach convention here is
//! child-centric ([`VariationTree::set_parent`]), preserved from the
//! source model alongside the directory tree's parent-centric one.

use crate::error::{TreeError, TreeKind};
use crate::identity::VariationId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A variation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variation {
    pub id: VariationId,
    /// Database id of the parent variation.
    pub parent_id: VariationId,
    pub name: String,
}

#[derive(Debug, Clone)]
struct VariationNode {
    variation: Variation,
    parent: Option<VariationId>,
    children: Vec<VariationId>,
}

/// Arena of variations with parent/child links.
#[derive(Debug, Clone, Default)]
pub struct VariationTree {
    nodes: BTreeMap<VariationId, VariationNode>,
}

impl VariationTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructed variation record in the tree.
    pub fn insert(&mut self, variation: Variation) -> Result<(), TreeError> {
        let id = variation.id;
        if self.nodes.contains_key(&id) {
            return Err(TreeError::DuplicateNode {
                kind: TreeKind::Variation,
                id: id.0,
            });
        }
        self.nodes.insert(
            id,
            VariationNode {
                variation,
                parent: None,
                children: Vec::new(),
            },
        );
        Ok(())
    }

    /// Attach `child` under `parent`.
    ///
    /// Stores the child's parent back-reference and appends the child to
    /// the parent's ordered child sequence. Same structural guarantees as
    /// [`crate::DirectoryTree::add_subdirectory`].
    pub fn set_parent(&mut self, child: VariationId, parent: VariationId) -> Result<(), TreeError> {
        self.node(parent)?;
        if self.node(child)?.parent.is_some() {
            return Err(TreeError::AlreadyAttached {
                kind: TreeKind::Variation,
                child: child.0,
            });
        }
        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == child {
                return Err(TreeError::CycleDetected {
                    kind: TreeKind::Variation,
                    child: child.0,
                    parent: parent.0,
                });
            }
            cursor = self.node(current)?.parent;
        }

        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Ordered child ids of a variation.
    pub fn children(&self, id: VariationId) -> Result<&[VariationId], TreeError> {
        Ok(&self.node(id)?.children)
    }

    /// Non-owning parent back-reference, `None` for detached or root nodes.
    pub fn parent_of(&self, id: VariationId) -> Result<Option<VariationId>, TreeError> {
        Ok(self.node(id)?.parent)
    }

    pub fn get(&self, id: VariationId) -> Option<&Variation> {
        self.nodes.get(&id).map(|node| &node.variation)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: VariationId) -> Result<&VariationNode, TreeError> {
        self.nodes.get(&id).ok_or(TreeError::UnknownNode {
            kind: TreeKind::Variation,
            id: id.0,
        })
    }

    fn node_mut(&mut self, id: VariationId) -> Result<&mut VariationNode, TreeError> {
        self.nodes.get_mut(&id).ok_or(TreeError::UnknownNode {
            kind: TreeKind::Variation,
            id: id.0,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn variation(id: i32, name: &str) -> Variation {
        Variation {
            id: VariationId(id),
            parent_id: VariationId(0),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_set_parent_links_both_directions() {
        let mut tree = VariationTree::new();
        tree.insert(variation(1, "default")).unwrap();
        tree.insert(variation(2, "mc")).unwrap();

        tree.set_parent(VariationId(2), VariationId(1)).unwrap();

        assert_eq!(tree.children(VariationId(1)).unwrap(), &[VariationId(2)]);
        assert_eq!(tree.parent_of(VariationId(2)).unwrap(), Some(VariationId(1)));
    }

    #[test]
    fn test_set_parent_rejects_cycle() {
        let mut tree = VariationTree::new();
        tree.insert(variation(1, "default")).unwrap();
        tree.insert(variation(2, "mc")).unwrap();
        tree.set_parent(VariationId(2), VariationId(1)).unwrap();

        let result = tree.set_parent(VariationId(1), VariationId(2));
        assert!(matches!(
            result,
            Err(TreeError::CycleDetected {
                kind: TreeKind::Variation,
                child: 1,
                parent: 2
            })
        ));
    }

    #[test]
    fn test_set_parent_rejects_second_parent() {
        let mut tree = VariationTree::new();
        tree.insert(variation(1, "default")).unwrap();
        tree.insert(variation(2, "mc")).unwrap();
        tree.insert(variation(3, "calib")).unwrap();
        tree.set_parent(VariationId(3), VariationId(1)).unwrap();

        let result = tree.set_parent(VariationId(3), VariationId(2));
        assert!(matches!(result, Err(TreeError::AlreadyAttached { child: 3, .. })));
        assert!(tree.children(VariationId(2)).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_variation() {
        let tree = VariationTree::new();
        assert!(matches!(
            tree.children(VariationId(1)),
            Err(TreeError::UnknownNode {
                kind: TreeKind::Variation,
                id: 1
            })
        ));
    }
}
