use parented_bst::{Error, Tree};
use quickcheck_macros::quickcheck;
use rstest::rstest;

use std::collections::{BTreeMap, HashSet};

use crate::Op;

fn elements<T: Clone>(tree: &Tree<T>) -> Vec<T> {
    let mut elements = Vec::new();
    tree.in_order(|e| elements.push(e.clone()));
    elements
}

/// Applies a set of operations to a tree and a counting map.
/// Returns `false` as soon as the tree disagrees with the map.
fn do_ops(ops: &[Op<i8>], bst: &mut Tree<i8>, counts: &mut BTreeMap<i8, usize>) -> bool {
    for op in ops {
        match op {
            Op::Add(x) => {
                bst.add(*x);
                *counts.entry(*x).or_default() += 1;
            }
            Op::Remove(x) => {
                let expected = match counts.get_mut(x) {
                    Some(count) => {
                        *count -= 1;
                        if *count == 0 {
                            counts.remove(x);
                        }
                        Some(*x)
                    }
                    None => None,
                };
                if bst.remove(x) != expected {
                    return false;
                }
            }
            Op::Iter => {
                let expected: Vec<_> = counts
                    .iter()
                    .flat_map(|(x, count)| std::iter::repeat(*x).take(*count))
                    .collect();
                if elements(bst) != expected {
                    return false;
                }
            }
        }
    }

    true
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut counts = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut counts)
        && tree.size() == counts.values().sum::<usize>()
        && counts.keys().all(|x| tree.contains(x))
}

#[quickcheck]
fn in_order_is_sorted(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let mut sorted = xs;
    sorted.sort_unstable();

    elements(&tree) == sorted
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();

    xs.iter()
        .all(|x| tree.contains(x) && tree.get(x).map(|e| *e) == Ok(*x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x) && tree.get(x) == Err(Error::NotFound))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    let mut still_present = xs;
    for delete in &deletes {
        // Only a successful removal shrinks the tree, and only by one copy.
        let expected = still_present
            .iter()
            .position(|x| x == delete)
            .map(|pos| still_present.swap_remove(pos));
        if tree.remove(delete) != expected {
            return false;
        }
    }

    still_present.sort_unstable();
    tree.size() == still_present.len() && elements(&tree) == still_present
}

#[quickcheck]
fn clone_is_independent(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let original: Tree<_> = xs.iter().copied().collect();
    let before = elements(&original);

    let mut copy = original.clone();
    for delete in &deletes {
        copy.remove(delete);
    }
    copy.add(0);

    elements(&original) == before && original.size() == xs.len()
}

#[quickcheck]
fn take_leaves_source_empty(xs: Vec<i8>) -> bool {
    let mut source: Tree<_> = xs.iter().copied().collect();
    let before = elements(&source);

    let moved = std::mem::take(&mut source);

    source.empty() && source.size() == 0 && elements(&moved) == before
}

#[rstest]
#[case::root_with_two_children(&[100, 50, 150, 25, 125, 175, 200, 210], 100, &[25, 50, 125, 150, 175, 200, 210])]
#[case::right_child_with_two_children(&[100, 50, 150, 175, 125], 150, &[50, 100, 125, 175])]
#[case::lone_root(&[100], 100, &[])]
#[case::absent(&[100, 50], 75, &[50, 100])]
fn driver_scenarios(#[case] adds: &[i32], #[case] removed: i32, #[case] expected: &[i32]) {
    let mut tree: Tree<_> = adds.iter().copied().collect();

    tree.remove(&removed);

    assert_eq!(tree.size(), expected.len());
    assert!(!tree.contains(&removed));
    assert_eq!(elements(&tree), expected);
}

#[test]
fn copy_and_move_addresses() {
    let values = [12, 88, 2, 39, 200, 77];
    let mut original: Tree<_> = values.into_iter().collect();
    let mut copy = original.clone();

    let original_addresses: Vec<*const i32> = values
        .iter()
        .map(|v| original.get(v).unwrap() as *const i32)
        .collect();
    for (value, address) in values.iter().zip(&original_addresses) {
        assert_ne!(copy.get(value).unwrap() as *const i32, *address);
    }

    let mut moved = std::mem::take(&mut original);
    assert!(original.empty());
    for (value, address) in values.iter().zip(&original_addresses) {
        assert_eq!(moved.get(value).unwrap() as *const i32, *address);
    }
}
