//! Caller-owned storage addressed by [`NodeId`].

use super::{AvlLinks, AvlNode, NodeId};

/// Storage that resolves [`NodeId`] handles to records.
///
/// The arena belongs to the caller. The map borrows it for the duration of a
/// single operation and touches nothing but the [`AvlLinks`] of the records
/// it resolves.
///
/// Implementations are provided for slices, arrays and `Vec`, where a handle
/// is the record's index.
///
/// # Panics
///
/// The provided implementations panic when handed a handle that is out of
/// range, exactly like slice indexing. Passing such a handle to the map is a
/// caller bug.
///
/// # Examples
///
/// ```rust
/// use intrusive_avl::avl::{AvlLinks, NodeArena, NodeId};
///
/// let arena = vec![AvlLinks::new(4), AvlLinks::new(2)];
/// assert_eq!(arena.node(NodeId::new(1)).key(), 2);
/// ```
pub trait NodeArena {
    /// The record type stored in the arena.
    type Node: AvlNode;

    /// Resolves `id` to its record.
    fn node(&self, id: NodeId) -> &Self::Node;

    /// Resolves `id` to its record mutably.
    fn node_mut(&mut self, id: NodeId) -> &mut Self::Node;
}

impl<T: AvlNode> NodeArena for [T] {
    type Node = T;

    #[inline]
    fn node(&self, id: NodeId) -> &T {
        &self[id.index()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut T {
        &mut self[id.index()]
    }
}

impl<T: AvlNode, const N: usize> NodeArena for [T; N] {
    type Node = T;

    #[inline]
    fn node(&self, id: NodeId) -> &T {
        &self[id.index()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut T {
        &mut self[id.index()]
    }
}

impl<T: AvlNode> NodeArena for Vec<T> {
    type Node = T;

    #[inline]
    fn node(&self, id: NodeId) -> &T {
        &self[id.index()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut T {
        &mut self[id.index()]
    }
}

#[inline]
pub(crate) fn links<A: NodeArena + ?Sized>(arena: &A, id: NodeId) -> &AvlLinks {
    arena.node(id).links()
}

#[inline]
pub(crate) fn links_mut<A: NodeArena + ?Sized>(arena: &mut A, id: NodeId) -> &mut AvlLinks {
    arena.node_mut(id).links_mut()
}

// =============================================================================
// Tests
// =============================================================================
