// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Property tests: random operation sequences against a reference model.

mod common;

use std::collections::BTreeMap;

use proptest::prelude::*;
use proptest::test_runner::{Config as PropConfig, RngAlgorithm, TestRng, TestRunner};

use common::{at, sphere, Recorder};
use echo_world::{ActionSet, ObjectStore, ShapeHandle};

const IDS: [&str; 3] = ["a", "b", "c"];

#[derive(Debug, Clone)]
enum Op {
    Add { obj: usize, count: usize },
    Move { obj: usize, slot: usize },
    RemoveShape { obj: usize, slot: usize },
    RemoveObject { obj: usize },
    Clear,
    Fork,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..IDS.len(), 1..3usize).prop_map(|(obj, count)| Op::Add { obj, count }),
        2 => (0..IDS.len(), 0..4usize).prop_map(|(obj, slot)| Op::Move { obj, slot }),
        3 => (0..IDS.len(), 0..4usize).prop_map(|(obj, slot)| Op::RemoveShape { obj, slot }),
        1 => (0..IDS.len()).prop_map(|obj| Op::RemoveObject { obj }),
        1 => Just(Op::Clear),
        1 => Just(Op::Fork),
    ]
}

/// Runs `ops` against a store and a plain map of handle lists, checking the
/// id/non-empty invariant, the emitted actions, and that forks taken along
/// the way never change afterwards.
fn check(ops: &[Op]) -> Result<(), TestCaseError> {
    let mut store = ObjectStore::new();
    let (rec, _) = Recorder::attach(&mut store);
    let mut model: BTreeMap<String, Vec<ShapeHandle>> = BTreeMap::new();
    let mut forks: Vec<(ObjectStore, BTreeMap<String, Vec<ShapeHandle>>)> = Vec::new();

    for op in ops {
        rec.clear();
        let expected: Vec<(String, ActionSet)> = match *op {
            Op::Add { obj, count } => {
                let id = IDS[obj];
                let shapes: Vec<_> = (0..count).map(|_| sphere(1.0)).collect();
                let poses = vec![at(0.0, 0.0, 0.0); count];
                store.add_to_object(id, &shapes, &poses).unwrap();
                let entry = model.entry(id.to_owned()).or_default();
                let action = if entry.is_empty() {
                    ActionSet::CREATE
                } else {
                    ActionSet::ADD_SHAPE
                };
                entry.extend(shapes);
                vec![(id.to_owned(), action)]
            }
            Op::Move { obj, slot } => {
                let id = IDS[obj];
                let target = model.get(id).and_then(|v| v.get(slot)).cloned();
                let lookup = target.clone().unwrap_or_else(|| sphere(1.0));
                let moved = store
                    .move_shape_in_object(id, &lookup, at(1.0, 2.0, 3.0))
                    .unwrap();
                prop_assert_eq!(moved, target.is_some());
                if moved {
                    vec![(id.to_owned(), ActionSet::MOVE_SHAPE)]
                } else {
                    vec![]
                }
            }
            Op::RemoveShape { obj, slot } => {
                let id = IDS[obj];
                let target = model.get(id).and_then(|v| v.get(slot)).cloned();
                let lookup = target.clone().unwrap_or_else(|| sphere(1.0));
                let removed = store.remove_shape_from_object(id, &lookup);
                prop_assert_eq!(removed, target.is_some());
                if removed {
                    let list = model.get_mut(id).unwrap();
                    list.remove(slot);
                    if list.is_empty() {
                        model.remove(id);
                        vec![(id.to_owned(), ActionSet::DESTROY)]
                    } else {
                        vec![(id.to_owned(), ActionSet::REMOVE_SHAPE)]
                    }
                } else {
                    vec![]
                }
            }
            Op::RemoveObject { obj } => {
                let id = IDS[obj];
                let removed = store.remove_object(id);
                prop_assert_eq!(removed, model.remove(id).is_some());
                if removed {
                    vec![(id.to_owned(), ActionSet::DESTROY)]
                } else {
                    vec![]
                }
            }
            Op::Clear => {
                let gone: Vec<_> = model
                    .keys()
                    .map(|id| (id.clone(), ActionSet::DESTROY))
                    .collect();
                store.clear_objects();
                model.clear();
                gone
            }
            Op::Fork => {
                forks.push((store.clone(), model.clone()));
                vec![]
            }
        };

        prop_assert_eq!(rec.actions(), expected);
        prop_assert_eq!(store.object_ids(), model.keys().cloned().collect::<Vec<_>>());
        for (id, shapes) in &model {
            let record = store.object(id).unwrap();
            prop_assert!(!record.is_empty());
            prop_assert_eq!(record.shapes(), shapes.as_slice());
            prop_assert_eq!(record.poses().len(), shapes.len());
        }
    }

    for (fork, snapshot) in &forks {
        prop_assert_eq!(fork.object_ids(), snapshot.keys().cloned().collect::<Vec<_>>());
        for (id, shapes) in snapshot {
            prop_assert_eq!(fork.object(id).unwrap().shapes(), shapes.as_slice());
        }
    }
    Ok(())
}

#[test]
fn random_operation_sequences_match_model() {
    const SEED_BYTES: [u8; 32] = [
        0x57, 0x0e, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0,
    ];
    let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &SEED_BYTES);
    let mut runner = TestRunner::new_with_rng(
        PropConfig {
            cases: 128,
            ..PropConfig::default()
        },
        rng,
    );

    runner
        .run(&prop::collection::vec(op(), 1..40), |ops| check(&ops))
        .unwrap();
}

proptest! {
    #[test]
    fn fork_isolation_holds_for_any_append(extra in 1..5usize) {
        let s1 = sphere(1.0);
        let mut store1 = ObjectStore::new();
        store1.add_shape_to_object("A", s1.clone(), at(0.0, 0.0, 0.0)).unwrap();
        let mut store2 = store1.clone();
        for _ in 0..extra {
            store2.add_shape_to_object("A", sphere(2.0), at(1.0, 0.0, 0.0)).unwrap();
        }
        prop_assert_eq!(store1.object("A").unwrap().shapes(), &[s1][..]);
        prop_assert_eq!(store2.object("A").unwrap().len(), extra + 1);
    }
}
