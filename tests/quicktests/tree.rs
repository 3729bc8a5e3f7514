use hashbst::hash::BuildIdentityHasher;
use hashbst::Tree;

use std::collections::{HashMap, HashSet};
use std::hash::{BuildHasher, Hash};

use quickcheck::quickcheck;

use crate::Op;

/// Applies a set of operations to a tree and a counting map.
/// This way we can ensure that after a random smattering of adds
/// and deletes we hold the same values, as many times each.
fn do_ops<T, S>(ops: &[Op<T>], tree: &mut Tree<T, S>, counts: &mut HashMap<T, usize>)
where
    T: Hash + Eq + Clone,
    S: BuildHasher,
{
    for op in ops {
        match op {
            Op::Add(x) => {
                if tree.add(x.clone()) {
                    *counts.entry(x.clone()).or_default() += 1;
                }
            }
            Op::Delete(x) => {
                let deleted = tree.delete(x);
                match counts.get_mut(x) {
                    Some(count) => {
                        assert!(deleted);
                        *count -= 1;
                        if *count == 0 {
                            counts.remove(x);
                        }
                    }
                    None => assert!(!deleted),
                }
            }
        }
    }
}

/// Collects the values an in-order traversal visits.
fn inorder<T: Clone, S>(tree: &Tree<T, S>, reverse: bool) -> Vec<T> {
    let mut values = Vec::new();
    tree.traverse_inorder(reverse, |node| values.push(node.value().clone()));
    values
}

quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut counts = HashMap::new();

        do_ops(&ops, &mut tree, &mut counts);
        tree.check().is_ok()
            && tree.len() == counts.values().sum::<usize>()
            && counts.keys().all(|x| tree.has_value(x))
    }

    fn fuzz_without_duplicates_string(ops: Vec<Op<String>>) -> bool {
        let mut tree = Tree::with_duplicates(false);
        let mut counts = HashMap::new();

        do_ops(&ops, &mut tree, &mut counts);
        tree.check().is_ok()
            && counts.values().all(|count| *count == 1)
            && counts.keys().all(|x| tree.has_value(x.as_str()))
    }

    fn contains(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.add(*x);
        }

        tree.len() == xs.len() && xs.iter().all(|x| tree.get(x) == Some(x))
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !tree.has_value(x))
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = Tree::with_duplicates(false);
        tree.extend(xs.iter().copied());
        for delete in &deletes {
            tree.delete(delete);
        }

        // Nothing was added twice so a single delete is enough.
        deletes.iter().all(|x| !tree.has_value(x) && !tree.delete(x))
            && xs.iter().filter(|x| !deletes.contains(*x)).all(|x| tree.has_value(x))
    }

    fn inorder_is_sorted_by_hash(xs: Vec<i32>) -> bool {
        let mut tree = Tree::with_hasher(BuildIdentityHasher::default());
        tree.extend(xs.iter().copied());

        let mut sorted = xs;
        sorted.sort_unstable();
        let mut descending = sorted.clone();
        descending.reverse();

        inorder(&tree, false) == sorted && inorder(&tree, true) == descending
    }

    fn inorder_hashes_never_decrease(xs: Vec<(u8, String)>) -> bool {
        let tree: Tree<_> = xs.into_iter().collect();
        let hashes: Vec<_> = tree.iter().map(|x| tree.hasher().hash_one(x)).collect();

        hashes.windows(2).all(|pair| pair[0] <= pair[1])
    }

    fn breadthfirst_sees_every_value(xs: Vec<i16>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let mut seen = Vec::new();
        tree.traverse_breadthfirst(|node| seen.push(*node.value()));

        let mut expected = xs;
        expected.sort_unstable();
        seen.sort_unstable();
        seen == expected
    }

    fn delete_everything(xs: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        xs.iter().all(|x| tree.delete(x)) && tree.is_empty() && tree.check().is_ok()
    }
}

#[test]
fn reverse_changes_visitation_not_just_output() {
    let mut tree = Tree::with_hasher(BuildIdentityHasher::default());
    tree.extend([3, 2, 0, 1, 4, 6, 5, 7, 8]);

    let mut preorder = Vec::new();
    tree.traverse_preorder(false, |node| preorder.push(*node.value()));
    let mut reversed = Vec::new();
    tree.traverse_preorder(true, |node| reversed.push(*node.value()));

    preorder.reverse();
    assert_ne!(preorder, reversed);
    assert_eq!(reversed, [3, 4, 6, 7, 8, 5, 2, 0, 1]);
}

#[test]
fn many_values_without_duplicates() {
    // A fixed, scrambled sequence of 0..10_000.
    let values: Vec<i32> = (0..10_000).map(|i| (i * 7_919) % 10_000).collect();

    let mut tree = Tree::with_duplicates_and_hasher(false, BuildIdentityHasher::default());
    tree.extend(values.iter().copied());
    assert_eq!(tree.len(), 10_000);
    assert!(tree.iter().copied().eq(0..10_000));

    assert!(!tree.has_value(&-1));
    assert!(tree.add(-1));
    assert!(tree.has_value(&-1));

    assert!(tree.has_value(&999));
    assert!(!tree.add(999));

    let root = tree.get_node(tree.root().unwrap()).unwrap();
    let root_value = *root.value();
    let left = root.left().map(|id| *tree.get_node(id).unwrap().value());
    let right = root.right().map(|id| *tree.get_node(id).unwrap().value());

    assert!(tree.delete(&root_value));
    assert!(!tree.has_value(&root_value));

    let new_root_value = *tree.get_node(tree.root().unwrap()).unwrap().value();
    assert_ne!(root_value, new_root_value);
    assert!(left.map_or(true, |left| left < new_root_value));
    assert!(right.map_or(true, |right| right >= new_root_value));

    for value in [5555, 9999, 6, 100] {
        assert!(tree.has_value(&value));
        assert!(tree.delete(&value));
        assert!(!tree.has_value(&value));
    }
    assert_eq!(tree.check(), Ok(()));
}
