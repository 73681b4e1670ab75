#![allow(dead_code)]

use itertools::Itertools;
use proptest::prelude::*;
use rand::{self, Rng};
use sapling::*;
use std::collections::BTreeSet;

/// Something to perform in one round of tests
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundAction {
    Insert(i32),
    Delete(i32),
    Search(i32),
}

pub fn random_round_action<R: Rng>(rng: &mut R, max_key: i32) -> RoundAction {
    use RoundAction::*;
    let key = rng.gen_range(0..max_key);
    match rng.gen_range(0..3) {
        0 => Insert(key),
        1 => Delete(key),
        _ => Search(key),
    }
}

/// Checks the tree's invariants, and that it holds exactly the values of `model`.
pub fn assert_matches_model<T: SomeTree<i32>>(tree: &T, model: &BTreeSet<i32>) {
    tree.assert_correctness();
    assert_eq!(tree.size(), model.len());
    let values: Vec<i32> = tree.inner().iter().cloned().collect();
    assert!(values.iter().tuple_windows().all(|(a, b)| a < b));
    assert_eq!(values, model.iter().cloned().collect::<Vec<_>>());
}

/// Performs one round on both the tree and the model, and compares the results.
pub fn apply_round<T: SomeTree<i32>>(
    tree: &mut T,
    model: &mut BTreeSet<i32>,
    action: &RoundAction,
) {
    use RoundAction::*;
    match *action {
        Insert(key) => {
            let id = tree.insert(key);
            assert_eq!(tree.inner().get(id), Some(&key));
            model.insert(key);
        }
        Delete(key) => {
            assert_eq!(tree.delete(&key), model.take(&key));
        }
        Search(key) => {
            let found = tree.search(&key);
            assert_eq!(found.is_some(), model.contains(&key));
            if let Some(id) = found {
                assert_eq!(tree.inner().get(id), Some(&key));
            }
        }
    }
}

pub fn check_consistency<T: SomeTree<i32>>(rounds: usize, max_key: i32) {
    let mut rng = rand::thread_rng();
    let mut tree = T::new();
    let mut model = BTreeSet::new();
    for round in 0..rounds {
        let action = random_round_action(&mut rng, max_key);
        apply_round(&mut tree, &mut model, &action);
        if round % 64 == 0 {
            assert_matches_model(&tree, &model);
        }
    }
    assert_matches_model(&tree, &model);
}

pub fn check_consistency_proptest<T: SomeTree<i32>>(
    initial: &[i32],
    actions: &[RoundAction],
) -> Result<(), TestCaseError> {
    use RoundAction::*;
    let mut tree: T = initial.iter().cloned().collect();
    let mut model: BTreeSet<i32> = initial.iter().cloned().collect();
    for action in actions {
        match *action {
            Insert(key) => {
                let id = tree.insert(key);
                prop_assert_eq!(tree.inner().get(id), Some(&key));
                model.insert(key);
            }
            Delete(key) => {
                prop_assert_eq!(tree.delete(&key), model.take(&key));
            }
            Search(key) => {
                let found = tree.search(&key);
                prop_assert_eq!(found.is_some(), model.contains(&key));
            }
        }
        prop_assert_eq!(tree.size(), model.len());
        let validation = tree.validate();
        prop_assert!(validation.is_ok(), "{:?}", validation);
    }
    let values: Vec<i32> = tree.inner().iter().cloned().collect();
    prop_assert_eq!(values, model.into_iter().collect::<Vec<_>>());
    Ok(())
}
