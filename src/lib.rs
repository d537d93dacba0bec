//! # intrusive-avl
//!
//! An intrusive AVL ordered map: the key, subtree height and structural links
//! of every entry live inside records the caller owns.
//!
//! ## Overview
//!
//! The map never allocates or frees anything. Records sit in a caller-owned
//! arena (a `Vec`, a slice or anything implementing
//! [`NodeArena`](avl::NodeArena)) and refer to each other through
//! [`NodeId`](avl::NodeId) handles, so no reference cycles or unsafe code are
//! needed to keep parent links.
//!
//! - **Insert**: BST placement followed by an upward rebalancing walk
//! - **Search**: iterative descent, read-only
//! - **Remove**: unlinking with predecessor/successor splicing, then
//!   rebalancing
//!
//! ## Feature Flags
//!
//! - `avl`: the AVL map (enabled by default)
//! - `serde`: `Serialize`/`Deserialize` for handles, link blocks and the map root
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use intrusive_avl::prelude::*;
//!
//! let mut arena: Vec<AvlLinks> = [5, 3, 8].into_iter().map(AvlLinks::new).collect();
//! let mut map = AvlMap::new();
//! for index in 0..arena.len() {
//!     map.insert(&mut arena, NodeId::new(index));
//! }
//! assert_eq!(map.search(&arena, 8), Some(NodeId::new(2)));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use intrusive_avl::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "avl")]
    pub use crate::avl::*;
}

#[cfg(feature = "avl")]
pub mod avl;
