//! This crate exposes a Binary Search Tree (BST) whose nodes keep a link back to their parent,
//! mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored elements. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than or equal to its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than or equal to its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The [`Tree`] here accepts duplicates (they are routed to the right) so it behaves like an
//! ordered multiset. It does not rebalance: its height is whatever the insertion order produces.
//!
//! ## Parent links
//!
//! Every `Node` also knows its parent. Keeping those back-links consistent through deletion is
//! the interesting part of this tree. Nodes live in an arena and refer to each other through
//! [`generational_arena::Index`] handles, so a parent link can never free anything and a stale
//! link panics instead of reading freed memory.
//!
//! ## Value semantics
//!
//! ```
//! use parented_bst::Tree;
//!
//! let mut original: Tree<i32> = [100, 50, 150].into_iter().collect();
//!
//! // A clone is a deep copy built out of brand new nodes.
//! let mut copy = original.clone();
//! copy.remove(&50);
//! assert!(original.contains(&50));
//!
//! // Taking a tree moves its nodes without copying them and leaves the source empty.
//! let moved = std::mem::take(&mut original);
//! assert!(original.empty());
//! assert_eq!(moved.size(), 3);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
pub mod tree;
mod util;

pub use error::{Error, Result};
pub use tree::Tree;
