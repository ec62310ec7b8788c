// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use echo_world::{ActionSet, ObjectStore, ObserverId, Pose, Shape, ShapeHandle, ShapeInserter, Vec3};

/// One delivered notification: object id, action, shape count seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub action: ActionSet,
    pub shapes: usize,
}

/// Shared log filled by an observer callback.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Event>>>);

impl Recorder {
    pub fn attach<I: ShapeInserter>(store: &mut ObjectStore<I>) -> (Self, ObserverId) {
        let rec = Self::default();
        let sink = Arc::clone(&rec.0);
        let id = store.add_observer(move |record, action| {
            sink.lock().unwrap().push(Event {
                id: record.id().to_owned(),
                action,
                shapes: record.len(),
            });
        });
        (rec, id)
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn actions(&self) -> Vec<(String, ActionSet)> {
        self.events().into_iter().map(|e| (e.id, e.action)).collect()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn sphere(radius: f32) -> ShapeHandle {
    ShapeHandle::new(Shape::Sphere { radius })
}

pub fn cube(side: f32) -> ShapeHandle {
    ShapeHandle::new(Shape::Box {
        size: Vec3::splat(side),
    })
}

pub fn at(x: f32, y: f32, z: f32) -> Pose {
    Pose::from_translation(Vec3::new(x, y, z))
}
