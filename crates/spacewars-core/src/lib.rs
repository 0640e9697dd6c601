//! # Space Wars Core
//!
//! Deterministic, tick-driven 2D space combat simulation kernel.
//!
//! ## Architecture
//!
//! - **Game**: lifecycle status and the per-tick loop (motion, wrap, collisions, termination)
//! - **Manager**: object collection, spaceship name index, game log
//! - **Objects**: spaceships and asteroids behind the [`GameObject`] trait
//! - **Generation**: seeded asteroid fields, a pure function of `(seed, index)`
//!
//! Rendering, transport and process wiring live outside this crate. Hosts call
//! [`Game::update`] once per frame and read [`Game::serialize`].
//!
//! ## Usage
//!
//! ```
//! use spacewars_core::{Game, GameStatus, Size, Vector2};
//!
//! let mut game = Game::new(Size::new(1000.0, 1000.0), 1_234_567_890);
//! game.add_spaceship("viper", Vector2::new(100.0, 100.0), 0.0)?;
//! game.start()?;
//! game.update(16.0);
//!
//! let world = game.serialize();
//! assert_eq!(world["status"], "running");
//! # Ok::<(), spacewars_core::GameError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collision;
pub mod config;
pub mod error;
pub mod game;
pub mod generation;
pub mod logger;
pub mod manager;
pub mod object;

#[cfg(test)]
mod tests;

pub use config::GameConfig;
pub use error::{GameError, Result};
pub use game::{Game, GameSnapshot, GameStatus};
pub use logger::{LogEntry, Logger};
pub use manager::GameManager;
pub use object::{
    Asteroid, CollisionOrder, GameObject, ObjectContext, ObjectId, ObjectTag, Spaceship,
};

pub use spacewars_physics::{CircleCollider, Collider, Size, Vector2};
