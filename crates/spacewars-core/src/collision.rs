//! Collision pass.
//!
//! Runs once per tick after every object has moved, in two phases:
//!
//! 1. **DETECT**: Snapshot each enabled object's collider and collect every
//!    intersecting pair `(i, j)` with `i < j`, in collection order.
//! 2. **RESOLVE**: For each pair in that order, call `on_collision` on the
//!    earlier object with [`CollisionOrder::First`], then on the later one with
//!    [`CollisionOrder::Second`].
//!
//! # Determinism
//!
//! Detection reads a frozen view of positions, so reactions cannot move an
//! object into or out of a pair during the same tick. Pairs are resolved in
//! ascending index order; a member that was disabled by an earlier pair in the
//! pass is skipped from then on.

use spacewars_physics::Collider;

use crate::object::{CollisionOrder, GameObject, ObjectContext};

/// Two intersecting objects, as indices into the collection (`first < second`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollisionPair {
    /// Index of the earlier object
    pub first: usize,
    /// Index of the later object
    pub second: usize,
}

/// Collects every intersecting pair of enabled objects that have colliders.
#[must_use]
pub fn detect_collisions(objects: &[Box<dyn GameObject>]) -> Vec<CollisionPair> {
    let colliders: Vec<Option<Collider>> = objects
        .iter()
        .map(|object| if object.enabled() { object.collider() } else { None })
        .collect();

    let mut pairs = Vec::new();
    for (first, a) in colliders.iter().enumerate() {
        let Some(a) = a else {
            continue;
        };
        for (offset, b) in colliders[first + 1..].iter().enumerate() {
            if b.as_ref().is_some_and(|b| a.intersects(b)) {
                pairs.push(CollisionPair {
                    first,
                    second: first + 1 + offset,
                });
            }
        }
    }
    pairs
}

/// Invokes both reactions for each pair. Returns the number of pairs resolved.
///
/// Pairs with an index out of range, or with a member that is no longer
/// enabled, are skipped.
pub fn resolve_collisions(
    objects: &mut [Box<dyn GameObject>],
    pairs: &[CollisionPair],
    ctx: &mut ObjectContext<'_>,
) -> usize {
    let mut resolved = 0;

    for pair in pairs {
        if pair.first >= pair.second || pair.second >= objects.len() {
            continue;
        }
        let (head, tail) = objects.split_at_mut(pair.second);
        let first: &mut dyn GameObject = &mut *head[pair.first];
        let second: &mut dyn GameObject = &mut *tail[0];

        if !first.enabled() || !second.enabled() {
            continue;
        }

        tracing::debug!(
            tick = ctx.tick(),
            first = %first.id(),
            second = %second.id(),
            "collision"
        );

        first.on_collision(&*second, ctx, CollisionOrder::First);
        second.on_collision(&*first, ctx, CollisionOrder::Second);
        resolved += 1;
    }

    resolved
}

/// Detects and resolves all collisions for one tick.
pub fn run_collision_pass(
    objects: &mut [Box<dyn GameObject>],
    ctx: &mut ObjectContext<'_>,
) -> usize {
    let pairs = detect_collisions(objects);
    resolve_collisions(objects, &pairs, ctx)
}
