use generational_arena::Index;

/// The place that holds the owning link to a node. Splicing always writes through a `Slot` so
/// the root and a parent's child links are handled the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    /// The tree's own root link.
    Root,
    /// The left child link of the given parent.
    Left(Index),
    /// The right child link of the given parent.
    Right(Index),
}

impl Slot {
    /// The node owning this slot, which becomes the parent of whatever is stored in it.
    pub(crate) fn parent(self) -> Option<Index> {
        match self {
            Slot::Root => None,
            Slot::Left(parent) | Slot::Right(parent) => Some(parent),
        }
    }
}

/// Which shape of node a removal had to unlink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Removal {
    /// No children, the slot is simply cleared.
    Leaf,
    /// The sole child takes over the slot.
    OneChild,
    /// The in-order successor is unlinked and grafted into the slot.
    TwoChildren,
}
