//! # Space Wars Physics
//!
//! Geometry substrate for the space-wars simulation kernel.
//!
//! This crate holds the value types every game object is built on:
//!
//! - [`Vector2`]: 2D `f64` vector (a re-export of [`glam::DVec2`])
//! - [`Size`]: world bounds with toroidal wrapping
//! - [`Collider`]: intersection shapes attached to game objects
//!
//! ## Quick Start
//!
//! ```
//! use spacewars_physics::{CircleCollider, Collider, Size, Vector2};
//!
//! let world = Size::new(1000.0, 1000.0);
//!
//! // Objects leaving the right edge reappear on the left.
//! let wrapped = world.wrap(Vector2::new(1000.5, 500.0));
//! assert!((wrapped.x - 0.5).abs() < 1e-9);
//!
//! let ship = Collider::from(CircleCollider::new(Vector2::new(100.0, 100.0), 16.0));
//! let rock = Collider::from(CircleCollider::new(Vector2::new(150.0, 100.0), 50.0));
//! assert!(ship.intersects(&rock));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collider;

use serde::{Deserialize, Serialize};

pub use collider::{CircleCollider, Collider};

/// 2D vector with `f64` components.
///
/// Value type: arithmetic returns new values and never mutates operands.
pub use glam::DVec2 as Vector2;

/// World bounds.
///
/// The playable area spans `[0, width] x [0, height]`. Sizes are immutable once
/// a game is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Get the center point of the area.
    #[must_use]
    pub fn center(&self) -> Vector2 {
        Vector2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Check if a point lies inside the bounds (edges included).
    #[must_use]
    pub fn contains(&self, point: Vector2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    /// Wrap a position onto the torus described by these bounds.
    ///
    /// Coordinates inside `[0, extent]` are returned unchanged, so an object
    /// resting exactly on the far edge stays there. Anything outside wraps with a
    /// Euclidean remainder: `1000.02` becomes `0.02` and `-0.02` becomes `999.98`
    /// on a 1000-wide axis.
    ///
    /// Degenerate axes (zero, negative or non-finite extent) are left untouched.
    #[must_use]
    pub fn wrap(&self, position: Vector2) -> Vector2 {
        Vector2::new(
            wrap_axis(position.x, self.width),
            wrap_axis(position.y, self.height),
        )
    }
}

fn wrap_axis(value: f64, extent: f64) -> f64 {
    if extent <= 0.0 || !extent.is_finite() || (0.0..=extent).contains(&value) {
        return value;
    }
    value.rem_euclid(extent)
}
