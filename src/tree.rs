//! An unbalanced BST with parent links. Nodes are kept in an arena owned by the `Tree` and refer
//! to one another through handles, so each child link is the only owner of its node and a parent
//! link is just a lookup.
//!
//! # Examples
//!
//! ```
//! use parented_bst::{Error, Tree};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.empty());
//! assert!(!tree.contains(&1));
//!
//! tree.add(1);
//! tree.add(1);
//! assert_eq!(tree.size(), 2);
//!
//! // Looking up an element that isn't there is an error.
//! assert_eq!(tree.get(&2), Err(Error::NotFound));
//!
//! // Removing an element hands it back and removes exactly one copy.
//! assert_eq!(tree.remove(&1), Some(1));
//! assert_eq!(tree.size(), 1);
//!
//! // Removing something that isn't there does nothing.
//! assert_eq!(tree.remove(&2), None);
//! ```

use std::cmp::Ordering;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, trace};

use crate::error::{Error, Result};
use crate::util::{Removal, Slot};

/// A Binary Search Tree of elements ordered by `Ord`. Equal elements are all kept, with later
/// ones stored to the right of earlier ones.
///
/// Cloning builds a structurally identical tree out of new nodes. Moving a tree (including with
/// [`std::mem::take`]) hands its nodes over without touching them.
pub struct Tree<T> {
    nodes: Arena<Node<T>>,
    root: Option<Index>,
}

struct Node<T> {
    element: T,
    // Non-owning. `None` only for the root.
    parent: Option<Index>,
    left: Option<Index>,
    right: Option<Index>,
}

impl<T> Node<T> {
    fn new(element: T, parent: Option<Index>) -> Self {
        Self {
            element,
            parent,
            left: None,
            right: None,
        }
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let mut tree = Self {
            nodes: Arena::with_capacity(self.nodes.len()),
            root: None,
        };
        tree.copy_nodes(self);
        tree
    }

    /// Releases every node of `self` before copying `source` into it.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.copy_nodes(source);
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    /// Prints the nested shape of the tree. Pending pieces are kept on a stack so deep trees
    /// don't recurse once per level.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Tree { root: ")?;
        let mut pending = vec![Render::Link(self.root)];
        while let Some(render) = pending.pop() {
            match render {
                Render::Text(text) => f.write_str(text)?,
                Render::Link(None) => f.write_str("None")?,
                Render::Link(Some(index)) => {
                    let node = &self.nodes[index];
                    write!(f, "Some(Node {{ element: {:?}, left: ", node.element)?;
                    pending.push(Render::Text(" })"));
                    pending.push(Render::Link(node.right));
                    pending.push(Render::Text(", right: "));
                    pending.push(Render::Link(node.left));
                }
            }
        }
        f.write_str(" }")
    }
}

/// A piece of [`Tree`]'s `Debug` output still waiting to be written.
enum Render {
    Text(&'static str),
    Link(Option<Index>),
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Inserts `element` as a new node. Elements that compare equal to one already in the tree
    /// are accepted and stored to its right.
    ///
    /// # Examples
    ///
    /// ```
    /// use parented_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.add(2);
    /// tree.add(1);
    /// tree.add(2);
    ///
    /// let mut elements = Vec::new();
    /// tree.in_order(|e| elements.push(*e));
    /// assert_eq!(elements, [1, 2, 2]);
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn add(&mut self, element: T)
    where
        T: Ord,
    {
        let slot = self.insertion_slot(&element);
        let index = self.nodes.insert(Node::new(element, slot.parent()));
        self.set_slot(slot, Some(index));

        if cfg!(debug_assertions) {
            self.assert_links(index);
            let node = &self.nodes[index];
            match slot {
                Slot::Root => {}
                Slot::Left(parent) => assert!(node.element < self.nodes[parent].element),
                Slot::Right(parent) => assert!(node.element >= self.nodes[parent].element),
            }
        }
    }

    /// Whether an element equal to `element` is stored in the tree.
    pub fn contains(&self, element: &T) -> bool
    where
        T: Ord,
    {
        self.search(element).is_some()
    }

    /// Potentially finds the stored element equal to `element`. If there are duplicates, this
    /// is the first one met walking down from the root.
    pub fn find(&self, element: &T) -> Option<&T>
    where
        T: Ord,
    {
        self.search(element).map(|index| &self.nodes[index].element)
    }

    /// Returns a mutable reference to the stored element equal to `element`, the same one
    /// [`Tree::find`] would return.
    ///
    /// The tree's shape does not change, so the caller must not change how the element orders
    /// against the others. Doing so is a logic error: later lookups may miss elements but memory
    /// stays safe.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if no stored element is equal to `element`.
    ///
    /// # Examples
    ///
    /// ```
    /// use parented_bst::{Error, Tree};
    ///
    /// let mut tree: Tree<(i32, &str)> = Tree::new();
    /// tree.add((1, "a"));
    ///
    /// assert_eq!(tree.get(&(1, "a")), Ok(&mut (1, "a")));
    /// assert_eq!(tree.get(&(2, "a")), Err(Error::NotFound));
    /// ```
    pub fn get(&mut self, element: &T) -> Result<&mut T>
    where
        T: Ord,
    {
        let index = self.search(element).ok_or(Error::NotFound)?;
        Ok(&mut self.nodes[index].element)
    }

    /// Removes one node holding an element equal to `element` and returns that element. If
    /// the tree does not contain such an element, nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use parented_bst::Tree;
    ///
    /// let mut tree: Tree<_> = [100, 50, 150].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&100), Some(100));
    /// assert_eq!(tree.remove(&100), None);
    /// assert_eq!(tree.size(), 2);
    /// ```
    #[instrument(level = "trace", skip_all)]
    pub fn remove(&mut self, element: &T) -> Option<T>
    where
        T: Ord,
    {
        let Some(index) = self.search(element) else {
            trace!("nothing to remove");
            return None;
        };
        let removal = self.unlink(index);
        debug!(?removal, remaining = self.nodes.len() - 1, "removed node");
        self.nodes.remove(index).map(|node| node.element)
    }

    /// Calls `visit` on every element in ascending order.
    pub fn in_order(&self, mut visit: impl FnMut(&T)) {
        let mut current = self.root.map(|root| self.leftmost(root));
        while let Some(index) = current {
            visit(&self.nodes[index].element);
            current = self.successor(index);
        }
    }

    /// How many elements are stored.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Alias for [`Tree::size`].
    pub fn len(&self) -> usize {
        self.size()
    }

    /// Whether the tree has no elements.
    pub fn empty(&self) -> bool {
        self.root.is_none()
    }

    /// Alias for [`Tree::empty`].
    pub fn is_empty(&self) -> bool {
        self.empty()
    }

    /// Drops every element.
    #[instrument(level = "trace", skip_all)]
    pub fn clear(&mut self) {
        debug!(released = self.nodes.len(), "clearing tree");
        self.nodes.clear();
        self.root = None;
    }

    /// The smallest element, if any.
    pub fn min(&self) -> Option<&T> {
        self.root.map(|root| &self.nodes[self.leftmost(root)].element)
    }

    /// The largest element, if any. With duplicates this is the last one inserted.
    pub fn max(&self) -> Option<&T> {
        self.root.map(|root| &self.nodes[self.rightmost(root)].element)
    }

    /// How many levels the tree has. An empty tree has a height of 0 and a lone root a height
    /// of 1.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut pending: Vec<_> = self.root.map(|root| (root, 1)).into_iter().collect();
        while let Some((index, depth)) = pending.pop() {
            height = height.max(depth);
            let node = &self.nodes[index];
            pending.extend(node.left.map(|left| (left, depth + 1)));
            pending.extend(node.right.map(|right| (right, depth + 1)));
        }
        height
    }

    /// Walks down from the root until it meets an element equal to `element`.
    fn search(&self, element: &T) -> Option<Index>
    where
        T: Ord,
    {
        let mut current = self.root;
        while let Some(index) = current {
            let node = &self.nodes[index];
            current = match node.element.cmp(element) {
                Ordering::Equal => return Some(index),
                Ordering::Less => node.right,
                Ordering::Greater => node.left,
            };
        }
        None
    }

    /// The empty slot a new `element` belongs in.
    fn insertion_slot(&self, element: &T) -> Slot
    where
        T: Ord,
    {
        let Some(mut current) = self.root else {
            return Slot::Root;
        };
        loop {
            let node = &self.nodes[current];
            let (slot, next) = if *element < node.element {
                (Slot::Left(current), node.left)
            } else {
                (Slot::Right(current), node.right)
            };
            match next {
                Some(next) => current = next,
                None => return slot,
            }
        }
    }

    /// Finds the slot currently holding the owning link to `index`.
    ///
    /// ## Panics
    ///
    /// When `index` isn't referenced by its parent.
    fn slot_of(&self, index: Index) -> Slot {
        match self.nodes[index].parent {
            None => {
                assert_eq!(self.root, Some(index), "parentless node is not the root");
                Slot::Root
            }
            Some(parent) if self.nodes[parent].left == Some(index) => Slot::Left(parent),
            Some(parent) => {
                assert_eq!(
                    self.nodes[parent].right,
                    Some(index),
                    "node is not a child of its parent"
                );
                Slot::Right(parent)
            }
        }
    }

    fn set_slot(&mut self, slot: Slot, node: Option<Index>) {
        match slot {
            Slot::Root => self.root = node,
            Slot::Left(parent) => self.nodes[parent].left = node,
            Slot::Right(parent) => self.nodes[parent].right = node,
        }
    }

    /// Detaches the node at `index` from the tree without freeing it. Whatever replaces it in
    /// its slot gets its parent link repointed.
    ///
    /// # Diagram
    ///
    /// With two children, the in-order successor `s` (leftmost node of the right subtree, so it
    /// has no left child) is unlinked first and then takes over the removed node's slot:
    ///
    /// ```text
    ///    Option<parent>              Option<parent>
    ///         |                           |
    ///       index                         s
    ///       /   \                       /   \
    ///      l     r        unlink ->    l     r
    ///           /                           /
    ///          s                           x
    ///           \
    ///            x
    /// ```
    fn unlink(&mut self, index: Index) -> Removal {
        let slot = self.slot_of(index);
        let node = &self.nodes[index];
        let (parent, left, right) = (node.parent, node.left, node.right);

        match (left, right) {
            (None, None) => {
                self.set_slot(slot, None);
                Removal::Leaf
            }
            (Some(child), None) | (None, Some(child)) => {
                self.set_slot(slot, Some(child));
                self.nodes[child].parent = parent;
                if cfg!(debug_assertions) {
                    self.assert_links(child);
                }
                Removal::OneChild
            }
            (Some(left), Some(right)) => {
                let successor = self.leftmost(right);
                self.unlink(successor);

                // If the successor was `right` itself, its own right child now sits there.
                let right = self.nodes[index].right;
                let grafted = &mut self.nodes[successor];
                grafted.parent = parent;
                grafted.left = Some(left);
                grafted.right = right;

                self.set_slot(slot, Some(successor));
                self.nodes[left].parent = Some(successor);
                if let Some(right) = right {
                    self.nodes[right].parent = Some(successor);
                }

                if cfg!(debug_assertions) {
                    self.assert_links(successor);
                }
                Removal::TwoChildren
            }
        }
    }

    fn leftmost(&self, mut index: Index) -> Index {
        while let Some(left) = self.nodes[index].left {
            index = left;
        }
        index
    }

    fn rightmost(&self, mut index: Index) -> Index {
        while let Some(right) = self.nodes[index].right {
            index = right;
        }
        index
    }

    /// The next node in order after `index`, found by climbing parent links when there is no
    /// right subtree.
    fn successor(&self, index: Index) -> Option<Index> {
        if let Some(right) = self.nodes[index].right {
            return Some(self.leftmost(right));
        }
        let mut child = index;
        let mut parent = self.nodes[index].parent;
        while let Some(index) = parent {
            if self.nodes[index].left == Some(child) {
                return Some(index);
            }
            child = index;
            parent = self.nodes[index].parent;
        }
        None
    }

    /// Rebuilds `source`'s shape out of new nodes in `self`, which must be empty.
    fn copy_nodes(&mut self, source: &Self)
    where
        T: Clone,
    {
        assert!(self.root.is_none(), "copying into a non-empty tree");
        let mut pending: Vec<_> = source.root.map(|root| (root, Slot::Root)).into_iter().collect();
        while let Some((from, slot)) = pending.pop() {
            let node = &source.nodes[from];
            let copied = self
                .nodes
                .insert(Node::new(node.element.clone(), slot.parent()));
            self.set_slot(slot, Some(copied));

            pending.extend(node.right.map(|right| (right, Slot::Right(copied))));
            pending.extend(node.left.map(|left| (left, Slot::Left(copied))));
        }
        debug!(copied = self.nodes.len(), "copied tree");
    }

    /// Asserts that the node at `index` and its neighbours agree on their links.
    fn assert_links(&self, index: Index) {
        let node = &self.nodes[index];
        match node.parent {
            Some(parent) => {
                let parent = &self.nodes[parent];
                assert!(parent.left == Some(index) || parent.right == Some(index));
            }
            None => assert_eq!(self.root, Some(index)),
        }
        for child in [node.left, node.right].into_iter().flatten() {
            assert_eq!(self.nodes[child].parent, Some(index));
        }
    }
}
