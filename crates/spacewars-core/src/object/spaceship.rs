//! Player spaceships.

use std::any::Any;

use serde_json::json;
use spacewars_physics::{Collider, Vector2};

use super::{vector_json, Asteroid, CollisionOrder, GameObject, ObjectContext, ObjectId, ObjectTag};
use crate::config::{SPACESHIP_HEALTH, SPACESHIP_RADIUS};

/// A named, player-controlled ship.
///
/// Ships drift with their velocity (units per second) and lose health when
/// they touch an asteroid. Health reaching zero disables the ship for good:
/// a disabled ship no longer moves, collides or takes damage.
///
/// # Example
///
/// ```
/// use spacewars_core::object::{ObjectId, Spaceship};
/// use spacewars_core::Vector2;
///
/// let mut ship = Spaceship::new(ObjectId::new(1), "viper", Vector2::new(10.0, 10.0), 0.0);
/// assert_eq!(ship.health(), 100.0);
///
/// assert!(!ship.damage(40.0));
/// assert!(ship.damage(60.0));
/// assert_eq!(ship.health(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Spaceship {
    id: ObjectId,
    name: String,
    enabled: bool,
    position: Vector2,
    /// Heading in radians.
    rotation: f64,
    /// Units per second.
    velocity: Vector2,
    health: f64,
    radius: f64,
}

impl Spaceship {
    /// Creates an enabled, stationary ship with full health.
    #[must_use]
    pub fn new(id: ObjectId, name: impl Into<String>, position: Vector2, rotation: f64) -> Self {
        Self {
            id,
            name: name.into(),
            enabled: true,
            position,
            rotation,
            velocity: Vector2::ZERO,
            health: SPACESHIP_HEALTH,
            radius: SPACESHIP_RADIUS,
        }
    }

    /// Sets the starting health.
    #[must_use]
    pub fn with_health(mut self, health: f64) -> Self {
        self.health = health;
        self
    }

    /// Sets the collider radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Unique name used for lookups.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Remaining health.
    #[must_use]
    pub const fn health(&self) -> f64 {
        self.health
    }

    /// Heading in radians.
    #[must_use]
    pub const fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Unit vector pointing along the heading.
    #[must_use]
    pub fn heading(&self) -> Vector2 {
        Vector2::from_angle(self.rotation)
    }

    /// Velocity in units per second.
    #[must_use]
    pub const fn velocity(&self) -> Vector2 {
        self.velocity
    }

    /// Collider radius.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns true once health has been depleted.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }

    /// Sets the velocity in units per second.
    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }

    /// Sets the heading in radians.
    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    /// Turns the ship by `delta` radians.
    pub fn rotate(&mut self, delta: f64) {
        self.rotation += delta;
    }

    /// Adds `amount` units per second of velocity along the heading.
    pub fn thrust(&mut self, amount: f64) {
        self.velocity += self.heading() * amount;
    }

    /// Removes `amount` health. Returns true if this hit destroyed the ship.
    ///
    /// Health is clamped at zero. Disabled ships ignore damage.
    pub fn damage(&mut self, amount: f64) -> bool {
        if !self.enabled {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        if self.is_destroyed() {
            self.enabled = false;
            return true;
        }
        false
    }
}

impl GameObject for Spaceship {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn tag(&self) -> ObjectTag {
        ObjectTag::Spaceship
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

    fn update(&mut self, delta_time_ms: f64, _ctx: &mut ObjectContext<'_>) {
        self.position += self.velocity * (delta_time_ms / 1000.0);
    }

    fn collider(&self) -> Option<Collider> {
        Some(Collider::circle(self.position, self.radius))
    }

    // Ships only take damage from asteroids, on whichever side of the pair
    // they land. Ship-on-ship contact has no effect.
    fn on_collision(
        &mut self,
        other: &dyn GameObject,
        ctx: &mut ObjectContext<'_>,
        order: CollisionOrder,
    ) {
        if !self.enabled || other.tag() != ObjectTag::Asteroid {
            return;
        }
        let Some(asteroid) = other.as_any().downcast_ref::<Asteroid>() else {
            return;
        };

        tracing::debug!(
            ship = %self.name,
            asteroid = %asteroid.id(),
            side = order.index(),
            damage = asteroid.damage(),
            "spaceship hit asteroid"
        );

        if self.damage(asteroid.damage()) {
            ctx.log(format!("Spaceship {} destroyed", self.name));
        }
    }

    fn serialize(&self) -> serde_json::Value {
        json!({
            "type": ObjectTag::Spaceship,
            "id": self.id,
            "name": self.name,
            "enabled": self.enabled,
            "position": vector_json(self.position),
            "rotation": self.rotation,
            "velocity": vector_json(self.velocity),
            "health": self.health,
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
