// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Custom shape inserters see every added shape, from either add call.

mod common;

use std::collections::BTreeMap;

use common::{at, cube, sphere, Recorder};
use echo_world::{
    Aabb, ActionSet, ObjectRecord, ObjectStore, Pose, ShapeHandle, ShapeId, ShapeInserter,
    StoreConfig,
};

/// Keeps the placed bounds of every shape it inserts.
#[derive(Debug, Clone, Default)]
struct BoundsInserter {
    bounds: BTreeMap<ShapeId, Aabb>,
    calls: usize,
}

impl ShapeInserter for BoundsInserter {
    fn insert(&mut self, record: &mut ObjectRecord, shape: ShapeHandle, pose: Pose) {
        self.calls += 1;
        if let Some(local) = shape.local_aabb() {
            self.bounds.insert(shape.id(), local.transformed(&pose));
        }
        record.push_shape(shape, pose);
    }
}

#[test]
fn batch_and_single_adds_share_one_primitive() {
    let mut store = ObjectStore::with_inserter(StoreConfig::default(), BoundsInserter::default());
    let (rec, _) = Recorder::attach(&mut store);
    let (a, b, c) = (sphere(1.0), cube(2.0), sphere(0.5));

    store
        .add_to_object("obj", &[a.clone(), b.clone()], &[at(10.0, 0.0, 0.0), Pose::identity()])
        .unwrap();
    store
        .add_shape_to_object("obj", c.clone(), at(0.0, 0.0, -3.0))
        .unwrap();

    let ins = store.inserter();
    assert_eq!(ins.calls, 3);
    assert_eq!(ins.bounds[&a.id()].min().to_array(), [9.0, -1.0, -1.0]);
    assert_eq!(ins.bounds[&b.id()].max().to_array(), [1.0, 1.0, 1.0]);
    assert_eq!(ins.bounds[&c.id()].min().to_array(), [-0.5, -0.5, -3.5]);
    assert_eq!(store.object("obj").unwrap().shapes(), &[a, b, c]);
    assert_eq!(
        rec.actions(),
        vec![
            ("obj".into(), ActionSet::CREATE),
            ("obj".into(), ActionSet::ADD_SHAPE),
        ]
    );
}

#[test]
fn rejected_calls_never_reach_the_inserter() {
    let mut store = ObjectStore::with_inserter(StoreConfig::default(), BoundsInserter::default());
    assert!(store
        .add_to_object("obj", &[sphere(1.0)], &[])
        .is_err());
    assert!(store
        .add_shape_to_object("obj", sphere(1.0), at(f32::NAN, 0.0, 0.0))
        .is_err());
    assert_eq!(store.inserter().calls, 0);
}

#[test]
fn inserter_state_forks_with_the_store() {
    let mut base = ObjectStore::with_inserter(StoreConfig::default(), BoundsInserter::default());
    base.add_shape_to_object("a", sphere(1.0), Pose::identity())
        .unwrap();
    let mut fork = base.clone();
    fork.add_shape_to_object("a", sphere(1.0), Pose::identity())
        .unwrap();
    fork.inserter_mut().bounds.clear();

    assert_eq!(base.inserter().calls, 1);
    assert_eq!(base.inserter().bounds.len(), 1);
    assert_eq!(fork.inserter().calls, 2);
}
