//! Height bookkeeping, rotations and the upward rebalancing walk.
//!
//! A rotation restructures a pivot and its taller child:
//!
//! ```text
//!     rotate_left(P)             rotate_right(P)
//!
//!     P              C               P          C
//!    / \            / \             / \        / \
//!   a   C    =>    P   c           C   c  =>  a   P
//!      / \        / \             / \            / \
//!     b   c      a   b           a   b          b   c
//! ```
//!
//! Only `P` and `C` change depth, so only their heights are recomputed; every
//! other subtree keeps its stored height.

use super::NodeId;
use super::arena::{NodeArena, links, links_mut};
use super::links::Side;

/// Height of an optional subtree, 0 when absent.
#[inline]
pub(crate) fn height_of<A: NodeArena + ?Sized>(arena: &A, node: Option<NodeId>) -> usize {
    node.map_or(0, |id| links(arena, id).height())
}

/// Recomputes the height of `id` from its children.
#[inline]
pub(crate) fn update_height<A: NodeArena + ?Sized>(arena: &mut A, id: NodeId) {
    let node = links(arena, id);
    let height = 1 + height_of(arena, node.left()).max(height_of(arena, node.right()));
    links_mut(arena, id).set_height(height);
}

/// `height(left) - height(right)`.
#[inline]
pub(crate) fn balance_factor<A: NodeArena + ?Sized>(arena: &A, id: NodeId) -> isize {
    let node = links(arena, id);
    height_of(arena, node.left()).cast_signed() - height_of(arena, node.right()).cast_signed()
}

/// Points the child slot of `parent` that holds `old` at `new` instead.
#[inline]
pub(crate) fn replace_child<A: NodeArena + ?Sized>(
    arena: &mut A,
    parent: NodeId,
    old: NodeId,
    new: Option<NodeId>,
) {
    let parent_links = links_mut(arena, parent);
    if parent_links.left() == Some(old) {
        parent_links.set_child(Side::Left, new);
    } else {
        parent_links.set_child(Side::Right, new);
    }
}

/// Rotates `pivot` towards `direction` and returns the promoted child.
///
/// The child on the opposite side of `direction` takes the pivot's place.
/// A pivot without such a child is left untouched.
fn rotate<A: NodeArena + ?Sized>(arena: &mut A, pivot: NodeId, direction: Side) -> NodeId {
    let heavy = direction.opposite();
    let pivot_links = *links(arena, pivot);
    let Some(child) = pivot_links.child(heavy) else {
        return pivot;
    };
    let parent = pivot_links.parent();
    let inner = links(arena, child).child(direction);

    links_mut(arena, child).set_parent(parent);
    if let Some(parent) = parent {
        replace_child(arena, parent, pivot, Some(child));
    }

    links_mut(arena, child).set_child(direction, Some(pivot));
    links_mut(arena, pivot).set_parent(Some(child));

    links_mut(arena, pivot).set_child(heavy, inner);
    if let Some(inner) = inner {
        links_mut(arena, inner).set_parent(Some(pivot));
    }

    update_height(arena, pivot);
    update_height(arena, child);

    tracing::trace!(%pivot, %child, ?direction, "rotated");
    child
}

#[inline]
pub(crate) fn rotate_left<A: NodeArena + ?Sized>(arena: &mut A, pivot: NodeId) -> NodeId {
    rotate(arena, pivot, Side::Left)
}

#[inline]
pub(crate) fn rotate_right<A: NodeArena + ?Sized>(arena: &mut A, pivot: NodeId) -> NodeId {
    rotate(arena, pivot, Side::Right)
}

/// Walks from `start` to the root, fixing heights and rotating where a node
/// is out of balance. Returns the node the walk ended on, which is the root.
pub(crate) fn rebalance<A: NodeArena + ?Sized>(arena: &mut A, start: NodeId) -> NodeId {
    let mut current = start;
    loop {
        update_height(arena, current);
        let factor = balance_factor(arena, current);

        if factor < -1 {
            if let Some(right) = links(arena, current).right()
                && balance_factor(arena, right) > 0
            {
                rotate_right(arena, right);
            }
            current = rotate_left(arena, current);
        } else if factor > 1 {
            if let Some(left) = links(arena, current).left()
                && balance_factor(arena, left) < 0
            {
                rotate_left(arena, left);
            }
            current = rotate_right(arena, current);
        }

        match links(arena, current).parent() {
            Some(parent) => current = parent,
            None => return current,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
