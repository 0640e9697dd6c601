//! Game object model.
//!
//! Everything that lives in the world implements [`GameObject`]. The trait is
//! object-safe; the manager stores objects as `Box<dyn GameObject>` in
//! insertion order.
//!
//! - [`ObjectId`]: Stable identifier, unique for the lifetime of a world
//! - [`ObjectTag`]: Variant classification used for collision rules
//! - [`ObjectContext`]: What an object may touch while updating or reacting
//! - [`CollisionOrder`]: Which side of a colliding pair a reaction represents
//!
//! Concrete variants are [`Spaceship`] and [`Asteroid`]. Hosts and tests may add
//! their own types tagged [`ObjectTag::Other`].
//!
//! # Example
//!
//! ```
//! use spacewars_core::object::{Asteroid, GameObject, ObjectId, ObjectTag, Spaceship};
//! use spacewars_core::Vector2;
//!
//! let ship = Spaceship::new(ObjectId::new(1), "viper", Vector2::new(100.0, 100.0), 0.0);
//! let rock = Asteroid::new(ObjectId::new(2), Vector2::new(150.0, 100.0), 50.0);
//!
//! assert_eq!(ship.tag(), ObjectTag::Spaceship);
//! assert!(ship.collider().unwrap().intersects(&rock.collider().unwrap()));
//! ```

mod asteroid;
mod spaceship;

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

use spacewars_physics::{Collider, Size, Vector2};

use crate::logger::Logger;

pub use asteroid::Asteroid;
pub use spaceship::Spaceship;

/// Unique identifier for a game object.
///
/// Ids are allocated monotonically by the
/// [`GameManager`](crate::GameManager), so a world rebuilt from the same seed
/// hands out the same ids.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(i64);

impl ObjectId {
    /// Creates an id from a raw value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ObjectId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

impl From<ObjectId> for i64 {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

/// Variant classification of a game object.
///
/// Collision rules check the tag, never names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectTag {
    /// Player-controlled ship; registered by name in the manager
    Spaceship,
    /// Procedurally generated obstacle
    Asteroid,
    /// Host-defined object without built-in collision rules
    Other,
}

impl fmt::Display for ObjectTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spaceship => write!(f, "spaceship"),
            Self::Asteroid => write!(f, "asteroid"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Side of a colliding pair a reaction call represents.
///
/// The member that comes first in the manager's collection receives `First`,
/// the other receives `Second`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CollisionOrder {
    /// Earlier object in collection order (index 0 of the pair)
    First,
    /// Later object in collection order (index 1 of the pair)
    Second,
}

impl CollisionOrder {
    /// Numeric side of the pair: 0 or 1.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// Borrowed view of the world handed to objects during a tick.
///
/// Gives access to the world bounds, the current tick and the game log. The
/// object collection itself is not reachable from here.
#[derive(Debug)]
pub struct ObjectContext<'a> {
    size: Size,
    tick: u64,
    logger: &'a mut Logger,
}

impl<'a> ObjectContext<'a> {
    /// Creates a context for one tick.
    #[must_use]
    pub fn new(size: Size, tick: u64, logger: &'a mut Logger) -> Self {
        Self { size, tick, logger }
    }

    /// World bounds.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Tick being simulated.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Appends a message to the game log.
    pub fn log(&mut self, message: impl Into<String>) {
        self.logger.append(self.tick, message);
    }
}

/// Capability set shared by every object in the world.
///
/// # Contract
///
/// - `id` is stable for the object's lifetime
/// - disabled objects are skipped by motion updates and collision detection
/// - `on_collision` is called once per detected pair per member, after all
///   positions for the tick are final
/// - `serialize` returns the object's external representation
pub trait GameObject: Any + fmt::Debug {
    /// Stable identity.
    fn id(&self) -> ObjectId;

    /// Variant classification.
    fn tag(&self) -> ObjectTag;

    /// Whether the object takes part in the simulation.
    fn enabled(&self) -> bool;

    /// Enables or disables the object.
    fn set_enabled(&mut self, enabled: bool);

    /// Current position.
    fn position(&self) -> Vector2;

    /// Moves the object. The manager uses this to apply screen wrapping.
    fn set_position(&mut self, position: Vector2);

    /// Advances the object's own state by `delta_time_ms` milliseconds.
    ///
    /// Negative deltas are legal and run motion backwards.
    fn update(&mut self, delta_time_ms: f64, ctx: &mut ObjectContext<'_>);

    /// Shape used for collision detection. `None` opts out of collisions.
    fn collider(&self) -> Option<Collider>;

    /// Reaction to touching `other`.
    fn on_collision(
        &mut self,
        other: &dyn GameObject,
        ctx: &mut ObjectContext<'_>,
        order: CollisionOrder,
    );

    /// External representation as a structured mapping.
    fn serialize(&self) -> serde_json::Value;

    /// Upcast for variant downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for variant downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn GameObject {
    /// Returns the concrete object if it is a `T`.
    #[must_use]
    pub fn downcast_ref<T: GameObject>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Returns the concrete object mutably if it is a `T`.
    #[must_use]
    pub fn downcast_mut<T: GameObject>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Returns `true` if this object is a spaceship.
    #[must_use]
    pub fn is_spaceship(&self) -> bool {
        self.tag() == ObjectTag::Spaceship
    }

    /// Returns `true` if this object is an asteroid.
    #[must_use]
    pub fn is_asteroid(&self) -> bool {
        self.tag() == ObjectTag::Asteroid
    }
}

/// Serialized `{x, y}` form of a vector.
pub(crate) fn vector_json(v: Vector2) -> serde_json::Value {
    serde_json::json!({ "x": v.x, "y": v.y })
}
