mod tree;

use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Clone, Debug)]
pub enum Op<T> {
    /// Add the element to the data structure
    Add(T),
    /// Remove one copy of the element from the data structure
    Remove(T),
    /// Compare in-order traversals
    Iter,
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2]).copied() {
            Some(0) => Op::Add(T::arbitrary(g)),
            Some(1) => Op::Remove(T::arbitrary(g)),
            _ => Op::Iter,
        }
    }
}
