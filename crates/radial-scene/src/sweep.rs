//! Pairwise collision sweep.
//!
//! Runs once per full repaint over every shape of the scene. The pass is a
//! pure function of the bodies; the scene writes the results back into each
//! shape's collision state and turns them into events.

use radial_core::{bodies_collide, CollisionBody, Point, ShapeId};
use smallvec::SmallVec;

use crate::shape::Shape;

/// Snapshot of one shape taken before the sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepBody {
    pub id: ShapeId,
    pub body: CollisionBody,
    /// Outline center, used for proximity.
    pub center: Point,
    pub ignored: bool,
    pub collision_enabled: bool,
    pub closest: Option<f64>,
    /// `is_colliding` from the previous sweep.
    pub was_colliding: bool,
}

impl SweepBody {
    pub fn from_shape(shape: &Shape) -> Self {
        let options = shape.options();
        Self {
            id: shape.id(),
            body: shape.collision_body(),
            center: shape.bounding_box().outline().center(),
            ignored: options.ignored,
            collision_enabled: options.collision,
            closest: options.closest,
            was_colliding: shape.collision_state().is_colliding,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub id: ShapeId,
    pub is_colliding: bool,
    pub previous_collision: bool,
    pub collisions: SmallVec<[ShapeId; 4]>,
    /// Nearest other shape within the closest-tracking threshold.
    pub closest: Option<(ShapeId, f64)>,
    pub collision_enabled: bool,
}

impl SweepResult {
    pub fn collision_ended(&self) -> bool {
        self.previous_collision && !self.is_colliding
    }
}

/// Computes collision sets and proximity for every body, in input order.
pub fn sweep(bodies: &[SweepBody]) -> Vec<SweepResult> {
    let mut results: Vec<SweepResult> = bodies
        .iter()
        .map(|b| SweepResult {
            id: b.id,
            is_colliding: false,
            previous_collision: b.was_colliding,
            collisions: SmallVec::new(),
            closest: None,
            collision_enabled: b.collision_enabled,
        })
        .collect();

    for i in 0..bodies.len() {
        if bodies[i].ignored {
            continue;
        }
        for j in (i + 1)..bodies.len() {
            if bodies[j].ignored || !bodies_collide(&bodies[i].body, &bodies[j].body) {
                continue;
            }
            let (a, b) = (bodies[i].id, bodies[j].id);
            if !results[i].collisions.contains(&b) {
                results[i].collisions.push(b);
            }
            if !results[j].collisions.contains(&a) {
                results[j].collisions.push(a);
            }
            results[i].is_colliding = true;
            results[j].is_colliding = true;
        }
    }

    for (i, body) in bodies.iter().enumerate() {
        let Some(threshold) = body.closest else {
            continue;
        };
        results[i].closest = bodies
            .iter()
            .enumerate()
            .filter(|(j, other)| *j != i && !other.ignored)
            .map(|(_, other)| (other.id, body.center.distance_to(&other.center)))
            .filter(|(_, distance)| *distance <= threshold)
            .min_by(|a, b| a.1.total_cmp(&b.1));
    }

    results
}
