//! Collision shapes.
//!
//! A [`Collider`] is the geometric stand-in a game object exposes for
//! intersection testing. Shapes are a closed set, so the collider is an enum
//! and pairwise tests dispatch with a `match` instead of trait objects.
//!
//! Intersection is symmetric: `a.intersects(&b) == b.intersects(&a)` for every
//! pair of shapes.

use serde::{Deserialize, Serialize};

use crate::Vector2;

/// Circle shape with a center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleCollider {
    center: Vector2,
    radius: f64,
}

impl CircleCollider {
    /// Create a circle. Negative radii are clamped to zero.
    #[must_use]
    pub fn new(center: Vector2, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    /// Center of the circle.
    #[must_use]
    pub const fn center(&self) -> Vector2 {
        self.center
    }

    /// Radius of the circle.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Circles intersect when the distance between centers is at most the sum
    /// of the radii. Touching counts.
    #[must_use]
    pub fn intersects_circle(&self, other: &Self) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) <= reach * reach
    }

    /// Check if a point lies inside or on the circle.
    #[must_use]
    pub fn contains_point(&self, point: Vector2) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }
}

/// Shape attached to a game object for intersection testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Collider {
    /// Circle shape
    Circle(CircleCollider),
}

impl Collider {
    /// Shorthand for a circle collider.
    #[must_use]
    pub fn circle(center: Vector2, radius: f64) -> Self {
        Self::Circle(CircleCollider::new(center, radius))
    }

    /// Returns true if the two shapes overlap or touch.
    #[must_use]
    pub fn intersects(&self, other: &Collider) -> bool {
        match (self, other) {
            (Self::Circle(a), Self::Circle(b)) => a.intersects_circle(b),
        }
    }

    /// Reference point of the shape.
    #[must_use]
    pub const fn center(&self) -> Vector2 {
        match self {
            Self::Circle(circle) => circle.center(),
        }
    }
}

impl From<CircleCollider> for Collider {
    fn from(circle: CircleCollider) -> Self {
        Self::Circle(circle)
    }
}
