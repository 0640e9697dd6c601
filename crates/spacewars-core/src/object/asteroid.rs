//! Asteroids.

use std::any::Any;

use serde_json::json;
use spacewars_physics::{Collider, Vector2};

use super::{vector_json, CollisionOrder, GameObject, ObjectContext, ObjectId, ObjectTag};
use crate::config::ASTEROID_COLLISION_DAMAGE;

/// A stationary circular obstacle.
///
/// Asteroids are indestructible in the current rule set: colliding with them
/// costs the other party health but leaves the asteroid untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    id: ObjectId,
    enabled: bool,
    position: Vector2,
    radius: f64,
    damage: f64,
}

impl Asteroid {
    /// Creates an enabled asteroid dealing the default collision damage.
    #[must_use]
    pub fn new(id: ObjectId, position: Vector2, radius: f64) -> Self {
        Self {
            id,
            enabled: true,
            position,
            radius,
            damage: ASTEROID_COLLISION_DAMAGE,
        }
    }

    /// Sets the damage dealt on contact.
    #[must_use]
    pub fn with_damage(mut self, damage: f64) -> Self {
        self.damage = damage;
        self
    }

    /// Collider radius.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Damage dealt to a spaceship on contact.
    #[must_use]
    pub const fn damage(&self) -> f64 {
        self.damage
    }
}

impl GameObject for Asteroid {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn tag(&self) -> ObjectTag {
        ObjectTag::Asteroid
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn position(&self) -> Vector2 {
        self.position
    }

    fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    fn update(&mut self, _delta_time_ms: f64, _ctx: &mut ObjectContext<'_>) {}

    fn collider(&self) -> Option<Collider> {
        Some(Collider::circle(self.position, self.radius))
    }

    fn on_collision(
        &mut self,
        _other: &dyn GameObject,
        _ctx: &mut ObjectContext<'_>,
        _order: CollisionOrder,
    ) {
    }

    fn serialize(&self) -> serde_json::Value {
        json!({
            "type": ObjectTag::Asteroid,
            "id": self.id,
            "enabled": self.enabled,
            "position": vector_json(self.position),
            "radius": self.radius,
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
