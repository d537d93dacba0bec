//! Structural invariant checking.

use smallvec::SmallVec;

use super::arena::{NodeArena, links};
use super::balance::height_of;
use super::{AvlMap, InvariantViolation, Key, NodeId};

/// Inline capacity of the tree walk stacks. A depth-first walk never holds
/// more than the tree height plus one entry, and an AVL tree with fewer than
/// 2^64 nodes is shallower than this.
pub(crate) const STACK_CAPACITY: usize = 96;

/// A pending node together with the open key interval it must fall into.
struct Frame {
    node: NodeId,
    parent: Option<NodeId>,
    lower: Option<Key>,
    upper: Option<Key>,
}

impl AvlMap {
    /// Checks every structural invariant and returns the number of linked
    /// nodes.
    ///
    /// This walks the whole tree and costs O(N). It is meant for tests and
    /// for callers that want to catch a key being changed while its record
    /// was linked.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] encountered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intrusive_avl::avl::{AvlLinks, AvlMap, NodeId};
    ///
    /// let mut arena: Vec<AvlLinks> = (0..100).map(AvlLinks::new).collect();
    /// let mut map = AvlMap::new();
    /// for index in 0..arena.len() {
    ///     map.insert(&mut arena, NodeId::new(index));
    /// }
    /// assert_eq!(map.validate(&arena), Ok(100));
    /// ```
    pub fn validate<A: NodeArena + ?Sized>(&self, arena: &A) -> Result<usize, InvariantViolation> {
        let Some(root) = self.root() else {
            return Ok(0);
        };
        if let Some(parent) = links(arena, root).parent() {
            return Err(InvariantViolation::RootHasParent { root, parent });
        }

        let mut stack: SmallVec<[Frame; STACK_CAPACITY]> = SmallVec::new();
        stack.push(Frame {
            node: root,
            parent: None,
            lower: None,
            upper: None,
        });
        let mut count = 0;

        while let Some(frame) = stack.pop() {
            let node = links(arena, frame.node);

            if node.parent() != frame.parent {
                return Err(InvariantViolation::ParentMismatch {
                    node: frame.node,
                    expected: frame.parent,
                    found: node.parent(),
                });
            }

            let key = node.key();
            if frame.lower.is_some_and(|lower| key <= lower)
                || frame.upper.is_some_and(|upper| key >= upper)
            {
                return Err(InvariantViolation::OrderViolation {
                    node: frame.node,
                    key,
                });
            }

            // Children are strictly shorter than a node with a correct height,
            // which also guarantees the walk terminates on a corrupted arena.
            let left_height = height_of(arena, node.left());
            let right_height = height_of(arena, node.right());
            let expected = 1 + left_height.max(right_height);
            if node.height() != expected {
                return Err(InvariantViolation::HeightMismatch {
                    node: frame.node,
                    stored: node.height(),
                    expected,
                });
            }

            let balance_factor = left_height.cast_signed() - right_height.cast_signed();
            if !(-1..=1).contains(&balance_factor) {
                return Err(InvariantViolation::Unbalanced {
                    node: frame.node,
                    balance_factor,
                });
            }

            count += 1;
            if let Some(left) = node.left() {
                stack.push(Frame {
                    node: left,
                    parent: Some(frame.node),
                    lower: frame.lower,
                    upper: Some(key),
                });
            }
            if let Some(right) = node.right() {
                stack.push(Frame {
                    node: right,
                    parent: Some(frame.node),
                    lower: Some(key),
                    upper: frame.upper,
                });
            }
        }

        Ok(count)
    }
}

// =============================================================================
// Tests
// =============================================================================
