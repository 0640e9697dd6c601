//! Game state machine and tick driver.
//!
//! [`Game`] owns the world bounds, the seed, the lifecycle status and the
//! [`GameManager`]. It is the only place that changes the status and the only
//! driver of the per-tick loop.
//!
//! # Tick
//!
//! Each [`Game::update`] runs, in order:
//!
//! 1. **MOTION**: every enabled object updates itself, then wraps onto the torus
//! 2. **COLLISION**: one collision pass over the final positions
//! 3. **TERMINATION**: while running, the game ends once no spaceship is left
//!
//! # Status
//!
//! ```text
//! Initialized --start--> Running <--start/pause--> Paused
//!                           |
//!                      no ships left
//!                           v
//!                         Ended
//! ```
//!
//! Every transition appends exactly one `"Game state changed to: {status}"`
//! entry to the log. `Ended` is terminal: every command is rejected with
//! [`GameError::InvalidState`].
//!
//! # Example
//!
//! ```
//! use spacewars_core::{Game, GameStatus, Size, Vector2};
//!
//! let mut game = Game::new(Size::new(1024.0, 768.0), 42);
//! game.add_spaceship("viper", Vector2::new(10.0, 10.0), 0.0)?;
//! game.start()?;
//!
//! game.spaceship_action("viper", |ship, _| ship.thrust(50.0))?;
//! game.update(16.0);
//!
//! assert_eq!(game.status(), GameStatus::Running);
//! assert_eq!(game.tick(), 1);
//! # Ok::<(), spacewars_core::GameError>(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use spacewars_physics::{Size, Vector2};

use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::logger::LogEntry;
use crate::manager::GameManager;
use crate::object::{ObjectContext, ObjectId, Spaceship};

// =============================================================================
// GameStatus
// =============================================================================

/// Lifecycle status of a [`Game`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Constructed, not started yet
    Initialized,
    /// Ticks advance the world
    Running,
    /// Ticks are ignored until the next start
    Paused,
    /// Terminal: no spaceship left in play
    Ended,
}

impl GameStatus {
    /// Lower-case name used in logs and snapshots.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Ended => "ended",
        }
    }

    /// Returns true if `update` moves the world in this status.
    #[must_use]
    pub const fn is_advancing(self) -> bool {
        matches!(self, Self::Initialized | Self::Running)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// GameSnapshot
// =============================================================================

/// Serializable view of the whole world.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Current status
    pub status: GameStatus,
    /// Construction seed
    pub seed: i64,
    /// World bounds
    pub size: Size,
    /// Ticks simulated since construction or the last reset
    pub tick: u64,
    /// Every object's mapping, in collection order
    pub game_objects: Vec<serde_json::Value>,
    /// Log entries, oldest first
    pub logs: Vec<LogEntry>,
}

// =============================================================================
// Game
// =============================================================================

/// A space-wars match.
#[derive(Debug)]
pub struct Game {
    seed: i64,
    size: Size,
    status: GameStatus,
    tick: u64,
    config: GameConfig,
    manager: GameManager,
}

impl Game {
    /// Creates a game with the default configuration.
    #[must_use]
    pub fn new(size: Size, seed: i64) -> Self {
        Self::with_config(size, seed, GameConfig::default())
    }

    /// Creates a game with a custom configuration.
    ///
    /// The configuration is sanitized first, see [`GameConfig::sanitized`].
    #[must_use]
    pub fn with_config(size: Size, seed: i64, config: GameConfig) -> Self {
        let config = config.sanitized();
        let manager = GameManager::new(seed, size, &config);
        Self {
            seed,
            size,
            status: GameStatus::Initialized,
            tick: 0,
            config,
            manager,
        }
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Construction seed.
    #[must_use]
    pub const fn seed(&self) -> i64 {
        self.seed
    }

    /// World bounds.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Ticks simulated since construction or the last reset.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Sanitized configuration in use.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The object collection and log.
    #[must_use]
    pub const fn manager(&self) -> &GameManager {
        &self.manager
    }

    /// Mutable access to the manager, for adding host-defined objects.
    pub fn manager_mut(&mut self) -> &mut GameManager {
        &mut self.manager
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Starts or resumes the game.
    ///
    /// Already running is a no-op.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidState`] if the game has ended.
    pub fn start(&mut self) -> Result<()> {
        match self.status {
            GameStatus::Initialized | GameStatus::Paused => {
                self.transition(GameStatus::Running);
                Ok(())
            }
            GameStatus::Running => Ok(()),
            GameStatus::Ended => Err(self.reject("start")),
        }
    }

    /// Pauses a running game.
    ///
    /// Already paused is a no-op.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidState`] if the game was never started or has ended.
    pub fn pause(&mut self) -> Result<()> {
        match self.status {
            GameStatus::Running => {
                self.transition(GameStatus::Paused);
                Ok(())
            }
            GameStatus::Paused => Ok(()),
            GameStatus::Initialized | GameStatus::Ended => Err(self.reject("pause")),
        }
    }

    /// Rebuilds the world from the seed and sets the game running.
    ///
    /// Spaceships, logs and the tick counter are dropped; the asteroid field
    /// is regenerated exactly as it was at construction.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidState`] if the game has ended.
    pub fn reset(&mut self) -> Result<()> {
        if self.status == GameStatus::Ended {
            return Err(self.reject("reset"));
        }
        self.manager = GameManager::new(self.seed, self.size, &self.config);
        self.tick = 0;
        self.status = GameStatus::Running;
        tracing::info!(seed = self.seed, "game reset");
        Ok(())
    }

    /// Advances the world by `delta_time_ms` milliseconds.
    ///
    /// Paused and ended games are left untouched. Negative deltas run motion
    /// backwards.
    pub fn update(&mut self, delta_time_ms: f64) {
        if !self.status.is_advancing() {
            return;
        }
        self.tick += 1;

        self.manager.update_objects(delta_time_ms, self.size, self.tick);
        let collisions = self.manager.resolve_collisions(self.size, self.tick);
        tracing::trace!(tick = self.tick, collisions, "tick complete");

        if self.status == GameStatus::Running && self.manager.is_game_over() {
            self.transition(GameStatus::Ended);
        }
    }

    // -------------------------------------------------------------------------
    // Spaceship commands
    // -------------------------------------------------------------------------

    /// Adds a spaceship with configured health and radius.
    ///
    /// # Errors
    ///
    /// - [`GameError::DuplicateName`] if the name is taken
    /// - [`GameError::InvalidState`] if the game has ended
    pub fn add_spaceship(
        &mut self,
        name: &str,
        position: Vector2,
        rotation: f64,
    ) -> Result<ObjectId> {
        if self.status == GameStatus::Ended {
            return Err(self.reject("add spaceship"));
        }
        if self.manager.get_spaceship(name).is_ok() {
            return Err(GameError::duplicate_name(name));
        }

        let id = self.manager.next_object_id();
        let ship = Spaceship::new(id, name, position, rotation)
            .with_health(self.config.spaceship_health)
            .with_radius(self.config.spaceship_radius);
        self.manager.add_game_object(ship)
    }

    /// Removes a spaceship by name.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotFound`] if no spaceship has this name
    /// - [`GameError::InvalidState`] if the game has ended
    pub fn remove_spaceship(&mut self, name: &str) -> Result<()> {
        if self.status == GameStatus::Ended {
            return Err(self.reject("remove spaceship"));
        }
        self.manager.remove_spaceship(name).map(drop)
    }

    /// Looks up a spaceship by name.
    ///
    /// # Errors
    ///
    /// [`GameError::NotFound`] if no spaceship has this name.
    pub fn get_spaceship(&self, name: &str) -> Result<&Spaceship> {
        self.manager.get_spaceship(name)
    }

    /// Runs `action` once against the named spaceship and returns its result.
    ///
    /// The action also receives an [`ObjectContext`] for the current tick, so it
    /// can read the world bounds and append to the game log.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotFound`] if no spaceship has this name; `action` is not called
    /// - [`GameError::InvalidState`] if the game has ended
    pub fn spaceship_action<R>(
        &mut self,
        name: &str,
        action: impl FnOnce(&mut Spaceship, &mut ObjectContext<'_>) -> R,
    ) -> Result<R> {
        if self.status == GameStatus::Ended {
            return Err(self.reject("act on spaceship"));
        }
        self.manager.with_spaceship_mut(name, self.size, self.tick, action)
    }

    // -------------------------------------------------------------------------
    // Serialization
    // -------------------------------------------------------------------------

    /// Typed view of the whole world.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            status: self.status,
            seed: self.seed,
            size: self.size,
            tick: self.tick,
            game_objects: self
                .manager
                .game_objects()
                .iter()
                .map(|object| object.serialize())
                .collect(),
            logs: self.manager.logger().logs().to_vec(),
        }
    }

    /// The snapshot as a structured mapping.
    #[must_use]
    pub fn serialize(&self) -> serde_json::Value {
        // Every snapshot field has string keys, so conversion cannot fail.
        serde_json::to_value(self.snapshot()).unwrap_or_else(|err| {
            tracing::error!(%err, "snapshot serialization failed");
            serde_json::Value::Null
        })
    }

    fn transition(&mut self, status: GameStatus) {
        self.status = status;
        self.manager
            .log(self.tick, format!("Game state changed to: {status}"));
    }

    fn reject(&self, command: &'static str) -> GameError {
        tracing::warn!(status = %self.status, command, "command rejected");
        GameError::InvalidState {
            status: self.status,
            command,
        }
    }
}
