//! The [`AvlMap`] root and its linking operations.

use std::cmp::Ordering;

use smallvec::SmallVec;

use super::arena::{NodeArena, links, links_mut};
use super::balance::{balance_factor, rebalance, replace_child};
use super::links::{AvlLinks, Side};
use super::validate::STACK_CAPACITY;
use super::{InsertError, Key, NodeId};

// =============================================================================
// AvlMap Definition
// =============================================================================

/// An intrusive AVL ordered map over records stored in a [`NodeArena`].
///
/// The map itself holds only the handle of the root node. It is deliberately
/// not `Clone`: two roots sharing the same linked records would corrupt each
/// other on the first mutation.
///
/// # Time Complexity
///
/// | Operation      | Complexity |
/// |----------------|------------|
/// | `new`          | O(1)       |
/// | `insert`       | O(log N)   |
/// | `try_insert`   | O(log N)   |
/// | `search`       | O(log N)   |
/// | `remove`       | O(log N)   |
/// | `height`       | O(1)       |
///
/// # Examples
///
/// ```rust
/// use intrusive_avl::avl::{AvlLinks, AvlMap, NodeId};
///
/// let mut arena: Vec<AvlLinks> = [10, 20, 30].into_iter().map(AvlLinks::new).collect();
/// let mut map = AvlMap::new();
/// for index in 0..arena.len() {
///     map.insert(&mut arena, NodeId::new(index));
/// }
///
/// // Inserting 10, 20, 30 in order rotates 20 up to the root
/// assert_eq!(map.root(), Some(NodeId::new(1)));
/// assert_eq!(map.height(&arena), 2);
/// ```
#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AvlMap {
    root: Option<NodeId>,
}

static_assertions::assert_impl_all!(AvlMap: Send, Sync);
static_assertions::assert_not_impl_any!(AvlMap: Clone, Copy);

impl AvlMap {
    /// Creates an empty map.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// Returns the root node, or `None` if the map is empty.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns `true` if no node is linked.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the height of the tree, 0 when empty.
    #[inline]
    #[must_use]
    pub fn height<A: NodeArena + ?Sized>(&self, arena: &A) -> usize {
        self.root.map_or(0, |root| links(arena, root).height())
    }

    /// Links `node` into the map.
    ///
    /// The node's key must be set beforehand; its height and links are
    /// overwritten. If another node already holds the key, nothing changes
    /// and `node` stays detached. Use [`try_insert`](Self::try_insert) to
    /// find out whether the node was linked.
    ///
    /// `node` must be detached: freshly created, returned by
    /// [`remove`](Self::remove), or unlinked by [`clear`](Self::clear). A node
    /// whose map was dropped or replaced without `clear` still carries its
    /// old links and is refused until [`AvlLinks::detach`] is called on it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intrusive_avl::avl::{AvlLinks, AvlMap, NodeId};
    ///
    /// let mut arena = vec![AvlLinks::new(5), AvlLinks::new(5)];
    /// let mut map = AvlMap::new();
    /// map.insert(&mut arena, NodeId::new(0));
    /// map.insert(&mut arena, NodeId::new(1));
    ///
    /// assert_eq!(map.search(&arena, 5), Some(NodeId::new(0)));
    /// assert!(!arena[1].is_linked());
    /// ```
    pub fn insert<A: NodeArena + ?Sized>(&mut self, arena: &mut A, node: NodeId) {
        if let Err(error @ InsertError::AlreadyLinked { .. }) = self.try_insert(arena, node) {
            tracing::warn!(%error, "insert ignored");
        }
    }

    /// Links `node` into the map, reporting why it was not linked.
    ///
    /// # Errors
    ///
    /// - [`InsertError::DuplicateKey`] if another node holds the same key.
    ///   The existing node keeps its place.
    /// - [`InsertError::AlreadyLinked`] if `node` still carries links, either
    ///   because it is linked into this or another map, or because its map
    ///   was discarded without [`clear`](Self::clear).
    ///
    /// On error neither the map nor `node` is modified.
    pub fn try_insert<A: NodeArena + ?Sized>(
        &mut self,
        arena: &mut A,
        node: NodeId,
    ) -> Result<(), InsertError> {
        let new_links = links(arena, node);
        if new_links.is_linked() {
            return Err(InsertError::AlreadyLinked { node });
        }
        let key = new_links.key();

        let Some(mut current) = self.root else {
            links_mut(arena, node).reset_leaf();
            self.root = Some(node);
            tracing::debug!(%node, key, "linked as root");
            return Ok(());
        };

        let (parent, side) = loop {
            let current_links = links(arena, current);
            let side = match key.cmp(&current_links.key()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    tracing::debug!(%node, key, existing = %current, "duplicate key rejected");
                    return Err(InsertError::DuplicateKey {
                        key,
                        existing: current,
                    });
                }
            };
            match current_links.child(side) {
                Some(child) => current = child,
                None => break (current, side),
            }
        };

        let new_links = links_mut(arena, node);
        new_links.reset_leaf();
        new_links.set_parent(Some(parent));
        links_mut(arena, parent).set_child(side, Some(node));

        self.root = Some(rebalance(arena, parent));
        tracing::debug!(%node, key, %parent, "linked");
        Ok(())
    }

    /// Returns the node holding `key`, or `None` if it is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intrusive_avl::avl::{AvlLinks, AvlMap, NodeId};
    ///
    /// let arena: Vec<AvlLinks> = Vec::new();
    /// assert_eq!(AvlMap::new().search(&arena, 1), None);
    /// ```
    #[must_use]
    pub fn search<A: NodeArena + ?Sized>(&self, arena: &A, key: Key) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = links(arena, id);
            current = match key.cmp(&node.key()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    /// Returns `true` if a node holds `key`.
    #[inline]
    #[must_use]
    pub fn contains_key<A: NodeArena + ?Sized>(&self, arena: &A, key: Key) -> bool {
        self.search(arena, key).is_some()
    }

    /// Unlinks the node holding `key` and returns it.
    ///
    /// The returned node is fully detached: no parent, no children, height 0.
    /// It may be re-keyed and inserted again. Returns `None`, without touching
    /// the map, if no node holds `key`.
    ///
    /// A node with two children is replaced by its in-order neighbour taken
    /// from its taller side: the successor when it leans right, otherwise the
    /// predecessor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intrusive_avl::avl::{AvlLinks, AvlMap, NodeId};
    ///
    /// let mut arena = vec![AvlLinks::new(1), AvlLinks::new(2)];
    /// let mut map = AvlMap::new();
    /// map.insert(&mut arena, NodeId::new(0));
    /// map.insert(&mut arena, NodeId::new(1));
    ///
    /// assert_eq!(map.remove(&mut arena, 1), Some(NodeId::new(0)));
    /// assert_eq!(map.remove(&mut arena, 1), None);
    /// assert_eq!(arena[0], AvlLinks::new(1));
    /// ```
    pub fn remove<A: NodeArena + ?Sized>(&mut self, arena: &mut A, key: Key) -> Option<NodeId> {
        let target = self.search(arena, key)?;
        let target_links = *links(arena, target);
        let parent = target_links.parent();

        let rebalance_from = match (target_links.left(), target_links.right()) {
            (None, None) => {
                self.replace_in_parent(arena, parent, target, None);
                parent
            }
            (Some(child), None) | (None, Some(child)) => {
                links_mut(arena, child).set_parent(parent);
                self.replace_in_parent(arena, parent, target, Some(child));
                parent
            }
            (Some(left), Some(right)) => {
                Some(self.splice_neighbour(arena, target, &target_links, left, right))
            }
        };

        links_mut(arena, target).detach();
        if let Some(start) = rebalance_from {
            self.root = Some(rebalance(arena, start));
        }
        tracing::debug!(node = %target, key, "unlinked");
        Some(target)
    }

    /// Unlinks every node and empties the map, returning how many nodes were
    /// detached.
    ///
    /// Every record the map held comes back detached and can be inserted
    /// into this or another map. This walks the whole tree and costs O(N).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intrusive_avl::avl::{AvlLinks, AvlMap, NodeId};
    ///
    /// let mut arena: Vec<AvlLinks> = (0..4).map(AvlLinks::new).collect();
    /// let mut map = AvlMap::new();
    /// for index in 0..arena.len() {
    ///     map.insert(&mut arena, NodeId::new(index));
    /// }
    ///
    /// assert_eq!(map.clear(&mut arena), 4);
    /// assert!(map.is_empty());
    /// assert!(arena.iter().all(|links| !links.is_linked()));
    /// ```
    pub fn clear<A: NodeArena + ?Sized>(&mut self, arena: &mut A) -> usize {
        let mut stack: SmallVec<[NodeId; STACK_CAPACITY]> = SmallVec::new();
        stack.extend(self.root.take());
        let mut count = 0;

        while let Some(node) = stack.pop() {
            let node_links = links_mut(arena, node);
            stack.extend(node_links.left());
            stack.extend(node_links.right());
            node_links.detach();
            count += 1;
        }

        tracing::debug!(count, "cleared");
        count
    }

    /// Moves the in-order neighbour of a two-child `target` into its place.
    ///
    /// Returns the node the rebalancing walk starts from.
    fn splice_neighbour<A: NodeArena + ?Sized>(
        &mut self,
        arena: &mut A,
        target: NodeId,
        target_links: &AvlLinks,
        left: NodeId,
        right: NodeId,
    ) -> NodeId {
        // The neighbour comes from the taller side, ties going left
        let (taken, taken_root, kept_root) = if balance_factor(arena, target) < 0 {
            (Side::Right, right, left)
        } else {
            (Side::Left, left, right)
        };

        let mut neighbour = taken_root;
        let mut neighbour_parent = target;
        while let Some(next) = links(arena, neighbour).child(taken.opposite()) {
            neighbour_parent = neighbour;
            neighbour = next;
        }

        let start = if neighbour == taken_root {
            // Adjacent: the neighbour keeps its own subtree on the taken side
            neighbour
        } else {
            let orphan = links(arena, neighbour).child(taken);

            replace_child(arena, neighbour_parent, neighbour, orphan);
            if let Some(orphan) = orphan {
                links_mut(arena, orphan).set_parent(Some(neighbour_parent));
            }

            links_mut(arena, neighbour).set_child(taken, Some(taken_root));
            links_mut(arena, taken_root).set_parent(Some(neighbour));
            neighbour_parent
        };

        links_mut(arena, neighbour).set_child(taken.opposite(), Some(kept_root));
        links_mut(arena, kept_root).set_parent(Some(neighbour));

        let parent = target_links.parent();
        links_mut(arena, neighbour).set_parent(parent);
        links_mut(arena, neighbour).set_height(target_links.height());
        self.replace_in_parent(arena, parent, target, Some(neighbour));

        tracing::trace!(%target, %neighbour, ?taken, "spliced neighbour");
        start
    }

    /// Points whatever held `old` (a parent slot, or the root) at `new`.
    fn replace_in_parent<A: NodeArena + ?Sized>(
        &mut self,
        arena: &mut A,
        parent: Option<NodeId>,
        old: NodeId,
        new: Option<NodeId>,
    ) {
        match parent {
            Some(parent) => replace_child(arena, parent, old, new),
            None => self.root = new,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
