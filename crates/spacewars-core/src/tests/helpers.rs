//! Test helpers: game factories and a scripted object.

use std::any::Any;

use spacewars_physics::{Collider, Size, Vector2};

use crate::config::GameConfig;
use crate::game::Game;
use crate::object::{CollisionOrder, GameObject, ObjectContext, ObjectId, ObjectTag};

/// Seed shared by the scenario tests.
pub const SEED: i64 = 1_234_567_890;

/// World used by the scenario tests.
pub fn world() -> Size {
    Size::new(1000.0, 1000.0)
}

/// A fresh game on the standard world and seed.
pub fn game() -> Game {
    Game::new(world(), SEED)
}

/// A fresh game without any generated asteroids.
pub fn empty_game() -> Game {
    let config = GameConfig {
        min_asteroids: 0,
        max_asteroids: 0,
        ..GameConfig::default()
    };
    Game::with_config(world(), SEED, config)
}

// =============================================================================
// MockObject
// =============================================================================

/// Object that moves by `(1 / dt, 1 / dt)` on every update.
///
/// Small positive deltas push it far; negative deltas move it back. It has no
/// collider and counts how often it was updated.
#[derive(Debug)]
pub struct MockObject {
    id: ObjectId,
    enabled: bool,
    position: Vector2,
    pub updates: usize,
}

impl MockObject {
    pub fn new(id: ObjectId, position: Vector2) -> Self {
        Self {
            id,
            enabled: true,
            position,
            updates: 0,
        }
    }
}

impl GameObject for MockObject {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn tag(&self) -> ObjectTag {
        ObjectTag::Other
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
        let step = 1.0 / delta_time_ms;
        self.position += Vector2::new(step, step);
        self.updates += 1;
    }

    fn collider(&self) -> Option<Collider> {
        None
    }

    fn on_collision(
        &mut self,
        _other: &dyn GameObject,
        _ctx: &mut ObjectContext<'_>,
        _order: CollisionOrder,
    ) {
    }

    fn serialize(&self) -> serde_json::Value {
        serde_json::json!({ "type": "mock", "id": self.id })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Adds a [`MockObject`] to `game` and returns its id.
pub fn add_mock(game: &mut Game, position: Vector2) -> ObjectId {
    let id = game.manager_mut().next_object_id();
    game.manager_mut()
        .add_game_object(MockObject::new(id, position))
        .unwrap();
    id
}

/// Position of the object with `id`.
pub fn position_of(game: &Game, id: ObjectId) -> Vector2 {
    game.manager().game_object(id).unwrap().position()
}

/// Asserts two positions agree within `tolerance` on both axes.
pub fn assert_near(actual: Vector2, expected: Vector2, tolerance: f64) {
    assert!(
        (actual.x - expected.x).abs() <= tolerance && (actual.y - expected.y).abs() <= tolerance,
        "expected {expected:?} within {tolerance}, got {actual:?}"
    );
}
