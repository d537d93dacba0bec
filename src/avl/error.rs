//! Error types reported by [`AvlMap`](super::AvlMap).

use thiserror::Error;

use super::{Key, NodeId};

/// Why [`AvlMap::try_insert`](super::AvlMap::try_insert) left the map unchanged.
///
/// # Examples
///
/// ```rust
/// use intrusive_avl::avl::{AvlLinks, AvlMap, InsertError, NodeId};
///
/// let mut arena = vec![AvlLinks::new(1), AvlLinks::new(1)];
/// let mut map = AvlMap::new();
/// map.try_insert(&mut arena, NodeId::new(0)).unwrap();
///
/// let error = map.try_insert(&mut arena, NodeId::new(1)).unwrap_err();
/// assert_eq!(
///     error,
///     InsertError::DuplicateKey { key: 1, existing: NodeId::new(0) }
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsertError {
    /// Another linked node already holds the key.
    #[error("key {key} is already held by node {existing}")]
    DuplicateKey {
        /// The rejected key.
        key: Key,
        /// The node that keeps holding the key.
        existing: NodeId,
    },
    /// The node is already linked into a map.
    #[error("node {node} is already linked into a map")]
    AlreadyLinked {
        /// The rejected node.
        node: NodeId,
    },
}

/// A broken structural invariant found by [`AvlMap::validate`](super::AvlMap::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// The root node has a parent link.
    #[error("root {root} has parent {parent}")]
    RootHasParent {
        /// The root node.
        root: NodeId,
        /// Its unexpected parent.
        parent: NodeId,
    },
    /// A child does not point back at the node that links it.
    #[error("node {node} should have parent {expected:?} but has {found:?}")]
    ParentMismatch {
        /// The child node.
        node: NodeId,
        /// The node holding it as a child.
        expected: Option<NodeId>,
        /// Its recorded parent.
        found: Option<NodeId>,
    },
    /// A key lies outside the range allowed by its ancestors.
    #[error("node {node} with key {key} breaks the search order")]
    OrderViolation {
        /// The misplaced node.
        node: NodeId,
        /// Its key.
        key: Key,
    },
    /// A stored height disagrees with the heights of the children.
    #[error("node {node} stores height {stored} but its children imply {expected}")]
    HeightMismatch {
        /// The node.
        node: NodeId,
        /// The stored height.
        stored: usize,
        /// `1 + max(height(left), height(right))`.
        expected: usize,
    },
    /// The subtree heights of a node differ by more than one.
    #[error("node {node} has balance factor {balance_factor}")]
    Unbalanced {
        /// The node.
        node: NodeId,
        /// `height(left) - height(right)`.
        balance_factor: isize,
    },
}
