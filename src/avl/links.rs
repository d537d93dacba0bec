//! Link metadata embedded in caller-owned records.

use super::{Key, NodeId};

// =============================================================================
// Side
// =============================================================================

/// Which child slot of a node is addressed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

// =============================================================================
// AvlLinks Definition
// =============================================================================

/// The key, subtree height and structural links of one map entry.
///
/// A freshly created block is *detached*: height 0 and no links. Linking a
/// record through [`AvlMap::insert`](super::AvlMap::insert) turns it into a
/// leaf of height 1; [`AvlMap::remove`](super::AvlMap::remove) detaches it
/// again. The links are navigation handles only and never own the records
/// they point at.
///
/// # Examples
///
/// ```rust
/// use intrusive_avl::avl::AvlLinks;
///
/// let links = AvlLinks::new(7);
/// assert_eq!(links.key(), 7);
/// assert_eq!(links.height(), 0);
/// assert!(!links.is_linked());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AvlLinks {
    key: Key,
    height: usize,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl AvlLinks {
    /// Creates a detached link block carrying `key`.
    #[inline]
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            height: 0,
            parent: None,
            left: None,
            right: None,
        }
    }

    /// Returns the ordering key.
    #[inline]
    #[must_use]
    pub const fn key(&self) -> Key {
        self.key
    }

    /// Re-keys a detached record.
    ///
    /// Changing the key of a linked record would silently break the ordering
    /// of the tree, so this is only meant for records that are not in a map.
    #[inline]
    pub fn set_key(&mut self, key: Key) {
        debug_assert!(!self.is_linked(), "re-keying a linked node");
        self.key = key;
    }

    /// Returns the height of the subtree rooted here, 0 when detached.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the structural parent, `None` for the root or a detached node.
    #[inline]
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the left child.
    #[inline]
    #[must_use]
    pub const fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Returns the right child.
    #[inline]
    #[must_use]
    pub const fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Returns `true` while the record is linked into a map.
    #[inline]
    #[must_use]
    pub const fn is_linked(&self) -> bool {
        self.height != 0
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) const fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) const fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn set_height(&mut self, height: usize) {
        self.height = height;
    }

    /// Turns the block into an unattached leaf.
    #[inline]
    pub(crate) const fn reset_leaf(&mut self) {
        self.height = 1;
        self.parent = None;
        self.left = None;
        self.right = None;
    }

    /// Clears the height and links, keeping the key.
    ///
    /// [`AvlMap::remove`](super::AvlMap::remove) and
    /// [`AvlMap::clear`](super::AvlMap::clear) do this for every node they
    /// unlink. Call it directly only on a record whose map was dropped or
    /// replaced without being cleared; detaching a record that is still
    /// linked corrupts its map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intrusive_avl::avl::{AvlLinks, AvlMap, NodeId};
    ///
    /// let mut arena = vec![AvlLinks::new(1)];
    /// let mut map = AvlMap::new();
    /// map.insert(&mut arena, NodeId::new(0));
    ///
    /// // The map is replaced without `clear`, orphaning the record
    /// map = AvlMap::new();
    /// arena[0].detach();
    ///
    /// map.insert(&mut arena, NodeId::new(0));
    /// assert_eq!(map.root(), Some(NodeId::new(0)));
    /// ```
    #[inline]
    pub const fn detach(&mut self) {
        self.height = 0;
        self.parent = None;
        self.left = None;
        self.right = None;
    }
}

// =============================================================================
// AvlNode Trait
// =============================================================================

/// A record that can be linked into an [`AvlMap`](super::AvlMap).
///
/// This is the whole capability set the map needs: access to the embedded
/// [`AvlLinks`]. The map never reads any other field of the record.
///
/// # Examples
///
/// ```rust
/// use intrusive_avl::avl::{AvlLinks, AvlNode};
///
/// struct Timer {
///     links: AvlLinks,
///     callback: fn(),
/// }
///
/// impl AvlNode for Timer {
///     fn links(&self) -> &AvlLinks {
///         &self.links
///     }
///
///     fn links_mut(&mut self) -> &mut AvlLinks {
///         &mut self.links
///     }
/// }
///
/// let timer = Timer { links: AvlLinks::new(1_000), callback: || {} };
/// assert_eq!(timer.key(), 1_000);
/// ```
pub trait AvlNode {
    /// Returns the embedded link block.
    fn links(&self) -> &AvlLinks;

    /// Returns the embedded link block mutably.
    fn links_mut(&mut self) -> &mut AvlLinks;

    /// Returns the ordering key of this record.
    #[inline]
    fn key(&self) -> Key {
        self.links().key()
    }
}

impl AvlNode for AvlLinks {
    #[inline]
    fn links(&self) -> &AvlLinks {
        self
    }

    #[inline]
    fn links_mut(&mut self) -> &mut AvlLinks {
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
