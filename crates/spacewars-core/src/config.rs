//! Tunable simulation constants.
//!
//! [`GameConfig`] gathers every domain constant the kernel uses. It derives
//! serde traits so hosts can load it from JSON (or any serde format); missing
//! fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

/// Guaranteed floor on the number of asteroids generated for a new world.
pub const MIN_ASTEROIDS: usize = 8;

/// Default ceiling on generated asteroids.
pub const MAX_ASTEROIDS: usize = 16;

/// Health a freshly added spaceship starts with.
pub const SPACESHIP_HEALTH: f64 = 100.0;

/// Collider radius of a spaceship.
pub const SPACESHIP_RADIUS: f64 = 16.0;

/// Health removed from a spaceship by one asteroid collision.
pub const ASTEROID_COLLISION_DAMAGE: f64 = 100.0;

/// Smallest generated asteroid radius.
pub const MIN_ASTEROID_RADIUS: f64 = 20.0;

/// Largest generated asteroid radius.
pub const MAX_ASTEROID_RADIUS: f64 = 60.0;

/// Configuration for a [`Game`](crate::Game).
///
/// # Example
///
/// ```
/// use spacewars_core::GameConfig;
///
/// let config: GameConfig = serde_json::from_str(r#"{ "max_asteroids": 24 }"#).unwrap();
/// assert_eq!(config.max_asteroids, 24);
/// assert_eq!(config.min_asteroids, spacewars_core::config::MIN_ASTEROIDS);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Lower bound on generated asteroids
    pub min_asteroids: usize,
    /// Upper bound on generated asteroids (inclusive)
    pub max_asteroids: usize,
    /// Smallest generated asteroid radius
    pub min_asteroid_radius: f64,
    /// Largest generated asteroid radius
    pub max_asteroid_radius: f64,
    /// Starting health of spaceships added through the game
    pub spaceship_health: f64,
    /// Collider radius of spaceships added through the game
    pub spaceship_radius: f64,
    /// Damage dealt by generated asteroids on contact
    pub asteroid_collision_damage: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_asteroids: MIN_ASTEROIDS,
            max_asteroids: MAX_ASTEROIDS,
            min_asteroid_radius: MIN_ASTEROID_RADIUS,
            max_asteroid_radius: MAX_ASTEROID_RADIUS,
            spaceship_health: SPACESHIP_HEALTH,
            spaceship_radius: SPACESHIP_RADIUS,
            asteroid_collision_damage: ASTEROID_COLLISION_DAMAGE,
        }
    }
}

impl GameConfig {
    /// Returns a copy with inconsistent values repaired.
    ///
    /// - `max_asteroids` is raised to `min_asteroids` if it is lower
    /// - radius bounds are ordered and kept positive and finite
    /// - non-finite health, radius and damage fall back to their defaults
    /// - negative damage is raised to zero
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let finite_or = |value: f64, fallback: f64| {
            if value.is_finite() {
                value
            } else {
                fallback
            }
        };

        let mut min_radius =
            finite_or(self.min_asteroid_radius, defaults.min_asteroid_radius).max(1.0);
        let mut max_radius =
            finite_or(self.max_asteroid_radius, defaults.max_asteroid_radius).max(1.0);
        if max_radius < min_radius {
            std::mem::swap(&mut min_radius, &mut max_radius);
        }

        Self {
            min_asteroids: self.min_asteroids,
            max_asteroids: self.max_asteroids.max(self.min_asteroids),
            min_asteroid_radius: min_radius,
            max_asteroid_radius: max_radius,
            spaceship_health: finite_or(self.spaceship_health, defaults.spaceship_health),
            spaceship_radius: finite_or(self.spaceship_radius, defaults.spaceship_radius).max(0.0),
            asteroid_collision_damage: finite_or(
                self.asteroid_collision_damage,
                defaults.asteroid_collision_damage,
            )
            .max(0.0),
        }
    }
}
