//! Intrusive AVL ordered map.
//!
//! This module provides [`AvlMap`], an ordered map whose balancing metadata
//! lives inside records owned by the caller.
//!
//! # Overview
//!
//! The caller keeps its records in an arena (anything implementing
//! [`NodeArena`], such as a `Vec`) and embeds an [`AvlLinks`] block in each
//! record. The map only stores the handle of the root node; every other link
//! is stored in the records themselves and addressed by [`NodeId`].
//!
//! - O(log N) insert
//! - O(log N) search
//! - O(log N) remove
//! - O(N) clear
//!
//! The map never allocates, frees or moves records. `insert` links a record
//! into the tree and `remove` unlinks it again, leaving a detached record that
//! can be reused. Call `clear` before dropping a map whose records will be
//! linked again.
//!
//! # Examples
//!
//! ```rust
//! use intrusive_avl::avl::{AvlLinks, AvlMap, AvlNode, NodeId};
//!
//! struct Job {
//!     links: AvlLinks,
//!     name: &'static str,
//! }
//!
//! impl AvlNode for Job {
//!     fn links(&self) -> &AvlLinks {
//!         &self.links
//!     }
//!
//!     fn links_mut(&mut self) -> &mut AvlLinks {
//!         &mut self.links
//!     }
//! }
//!
//! let mut jobs = vec![
//!     Job { links: AvlLinks::new(30), name: "compile" },
//!     Job { links: AvlLinks::new(10), name: "fetch" },
//!     Job { links: AvlLinks::new(20), name: "link" },
//! ];
//!
//! let mut map = AvlMap::new();
//! for index in 0..jobs.len() {
//!     map.insert(&mut jobs, NodeId::new(index));
//! }
//!
//! let found = map.search(&jobs, 20).map(|id| jobs[id.index()].name);
//! assert_eq!(found, Some("link"));
//!
//! let removed = map.remove(&mut jobs, 10).unwrap();
//! assert_eq!(jobs[removed.index()].name, "fetch");
//! assert!(!jobs[removed.index()].links.is_linked());
//! ```
//!
//! # Invariants
//!
//! Every public operation leaves the linked records satisfying:
//! 1. Keys in a left subtree are strictly less, keys in a right subtree
//!    strictly greater
//! 2. `height == 1 + max(height(left), height(right))`, an absent subtree
//!    having height 0
//! 3. The two subtree heights of every node differ by at most one
//! 4. Child and parent links agree, and the root has no parent
//!
//! [`AvlMap::validate`] checks all of them.

use std::fmt;

mod arena;
mod balance;
mod error;
mod links;
mod map;
mod validate;

pub use arena::NodeArena;
pub use error::InsertError;
pub use error::InvariantViolation;
pub use links::AvlLinks;
pub use links::AvlNode;
pub use map::AvlMap;

/// The ordering key stored in every node.
///
/// The same type is used for insertion, lookup and removal.
pub type Key = u64;

// =============================================================================
// Node Handle
// =============================================================================

/// A stable handle to a record in the caller's arena.
///
/// The map stores handles, never references, so a record may be borrowed
/// freely by the caller between map operations.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(usize);

impl NodeId {
    /// Creates a handle for the record at `index` in the arena.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intrusive_avl::avl::NodeId;
    ///
    /// let id = NodeId::new(3);
    /// assert_eq!(id.index(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index this handle refers to.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    #[inline]
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod node_id_tests {
    use super::NodeId;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(7)]
    #[case(usize::MAX)]
    fn test_node_id_round_trips_index(#[case] index: usize) {
        assert_eq!(NodeId::new(index).index(), index);
        assert_eq!(NodeId::from(index), NodeId::new(index));
    }

    #[rstest]
    fn test_node_id_display() {
        assert_eq!(NodeId::new(42).to_string(), "#42");
    }
}
