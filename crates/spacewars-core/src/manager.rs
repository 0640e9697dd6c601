//! Game manager: owner of the world's objects and log.
//!
//! The [`GameManager`] provides:
//! - Object storage in insertion order (the order collisions and snapshots use)
//! - A name index for spaceship lookup and removal
//! - Seeded asteroid population at construction
//! - The per-tick motion and collision phases driven by [`Game`](crate::Game)
//!
//! # Invariants
//!
//! - Every registered spaceship is present both in the collection and in the
//!   name index; removal drops it from both
//! - Spaceship names are unique
//! - A manager built with [`GameManager::new`] holds at least
//!   `config.min_asteroids` asteroids
//!
//! # Example
//!
//! ```
//! use spacewars_core::{GameConfig, GameManager, GameObject, Size, Vector2};
//! use spacewars_core::object::Spaceship;
//!
//! let config = GameConfig::default();
//! let mut manager = GameManager::new(42, Size::new(1024.0, 768.0), &config);
//! assert!(manager.asteroid_count() >= config.min_asteroids);
//!
//! let id = manager.next_object_id();
//! manager.add_game_object(Spaceship::new(id, "viper", Vector2::new(10.0, 10.0), 0.0))?;
//! assert_eq!(manager.get_spaceship("viper")?.id(), id);
//! # Ok::<(), spacewars_core::GameError>(())
//! ```

use std::collections::{HashMap, HashSet};

use spacewars_physics::Size;

use crate::collision::run_collision_pass;
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::generation::generate_field;
use crate::logger::Logger;
use crate::object::{Asteroid, GameObject, ObjectContext, ObjectId, Spaceship};

/// Container for all objects in a world.
#[derive(Debug, Default)]
pub struct GameManager {
    /// Objects in insertion order.
    objects: Vec<Box<dyn GameObject>>,
    /// Spaceship name to id. Only used for lookups, never iterated.
    spaceships: HashMap<String, ObjectId>,
    logger: Logger,
    /// Last allocated id; ids start at 1.
    last_id: i64,
}

impl GameManager {
    /// Creates a manager populated with the seeded asteroid field.
    #[must_use]
    pub fn new(seed: i64, size: Size, config: &GameConfig) -> Self {
        let mut manager = Self::empty();
        for placement in generate_field(seed, size, config) {
            let id = manager.next_object_id();
            manager.objects.push(Box::new(
                Asteroid::new(id, placement.position, placement.radius)
                    .with_damage(config.asteroid_collision_damage),
            ));
        }
        tracing::debug!(seed, asteroids = manager.objects.len(), "asteroid field generated");
        manager
    }

    /// Creates a manager with no objects.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Allocates a fresh object id.
    pub fn next_object_id(&mut self) -> ObjectId {
        self.last_id += 1;
        ObjectId::new(self.last_id)
    }

    /// Appends an object to the collection.
    ///
    /// Spaceships are also registered in the name index.
    ///
    /// # Errors
    ///
    /// [`GameError::DuplicateName`] if a spaceship with the same name is
    /// already registered. Nothing is added in that case.
    pub fn add_game_object<T: GameObject>(&mut self, object: T) -> Result<ObjectId> {
        self.add_boxed(Box::new(object))
    }

    /// Appends an already boxed object. See [`GameManager::add_game_object`].
    ///
    /// # Errors
    ///
    /// [`GameError::DuplicateName`] if the spaceship name is taken.
    pub fn add_boxed(&mut self, object: Box<dyn GameObject>) -> Result<ObjectId> {
        if let Some(name) = spaceship_name(&*object) {
            if self.spaceships.contains_key(name) {
                return Err(GameError::duplicate_name(name));
            }
        }
        Ok(self.insert_unchecked(object))
    }

    /// Appends several objects, all or nothing.
    ///
    /// # Errors
    ///
    /// [`GameError::DuplicateName`] if any spaceship name is already registered
    /// or appears twice in `objects`. Nothing is added in that case.
    pub fn add_game_objects(&mut self, objects: Vec<Box<dyn GameObject>>) -> Result<Vec<ObjectId>> {
        let mut batch_names = HashSet::new();
        for object in &objects {
            if let Some(name) = spaceship_name(&**object) {
                if self.spaceships.contains_key(name) || !batch_names.insert(name) {
                    return Err(GameError::duplicate_name(name));
                }
            }
        }

        Ok(objects
            .into_iter()
            .map(|object| self.insert_unchecked(object))
            .collect())
    }

    fn insert_unchecked(&mut self, object: Box<dyn GameObject>) -> ObjectId {
        let id = object.id();
        if let Some(name) = spaceship_name(&*object) {
            self.spaceships.insert(name.to_owned(), id);
        }
        self.objects.push(object);
        id
    }

    /// Looks up a spaceship by name.
    ///
    /// # Errors
    ///
    /// [`GameError::NotFound`] if no spaceship has this name.
    pub fn get_spaceship(&self, name: &str) -> Result<&Spaceship> {
        let index = self.spaceship_index(name)?;
        self.objects[index]
            .downcast_ref::<Spaceship>()
            .ok_or_else(|| GameError::not_found(name))
    }

    /// Looks up a spaceship by name for mutation.
    ///
    /// # Errors
    ///
    /// [`GameError::NotFound`] if no spaceship has this name.
    pub fn get_spaceship_mut(&mut self, name: &str) -> Result<&mut Spaceship> {
        let index = self.spaceship_index(name)?;
        self.objects[index]
            .downcast_mut::<Spaceship>()
            .ok_or_else(|| GameError::not_found(name))
    }

    /// Removes a spaceship from the collection and the name index.
    ///
    /// The remaining objects keep their relative order.
    ///
    /// # Errors
    ///
    /// [`GameError::NotFound`] if no spaceship has this name.
    pub fn remove_spaceship(&mut self, name: &str) -> Result<Box<dyn GameObject>> {
        let index = self.spaceship_index(name)?;
        self.spaceships.remove(name);
        Ok(self.objects.remove(index))
    }

    fn spaceship_index(&self, name: &str) -> Result<usize> {
        let id = self
            .spaceships
            .get(name)
            .copied()
            .ok_or_else(|| GameError::not_found(name))?;
        self.objects
            .iter()
            .position(|object| {
                object
                    .downcast_ref::<Spaceship>()
                    .is_some_and(|ship| ship.id() == id && ship.name() == name)
            })
            .ok_or_else(|| GameError::not_found(name))
    }

    /// Runs `action` on the named spaceship with a context for `tick`.
    pub(crate) fn with_spaceship_mut<R>(
        &mut self,
        name: &str,
        size: Size,
        tick: u64,
        action: impl FnOnce(&mut Spaceship, &mut ObjectContext<'_>) -> R,
    ) -> Result<R> {
        let index = self.spaceship_index(name)?;
        let ship = self.objects[index]
            .downcast_mut::<Spaceship>()
            .ok_or_else(|| GameError::not_found(name))?;
        let mut ctx = ObjectContext::new(size, tick, &mut self.logger);
        Ok(action(ship, &mut ctx))
    }

    /// All objects in insertion order.
    #[must_use]
    pub fn game_objects(&self) -> &[Box<dyn GameObject>] {
        &self.objects
    }

    /// Looks up any object by id.
    #[must_use]
    pub fn game_object(&self, id: ObjectId) -> Option<&dyn GameObject> {
        let object = self.objects.iter().find(|object| object.id() == id)?;
        Some(&**object)
    }

    /// Looks up any object by id for mutation.
    #[must_use]
    pub fn game_object_mut(&mut self, id: ObjectId) -> Option<&mut dyn GameObject> {
        let object = self.objects.iter_mut().find(|object| object.id() == id)?;
        Some(&mut **object)
    }

    /// Spaceships in collection order.
    pub fn spaceships(&self) -> impl Iterator<Item = &Spaceship> + '_ {
        self.objects
            .iter()
            .filter_map(|object| object.downcast_ref::<Spaceship>())
    }

    /// Number of asteroids in the collection, enabled or not.
    #[must_use]
    pub fn asteroid_count(&self) -> usize {
        self.objects.iter().filter(|object| object.is_asteroid()).count()
    }

    /// Number of spaceships still in play.
    #[must_use]
    pub fn enabled_spaceship_count(&self) -> usize {
        self.spaceships().filter(|ship| ship.enabled()).count()
    }

    /// The match is over once no spaceship is left in play.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.enabled_spaceship_count() == 0
    }

    /// The game log.
    #[must_use]
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Appends a message to the game log.
    pub fn log(&mut self, tick: u64, message: impl Into<String>) {
        self.logger.append(tick, message);
    }

    /// Moves every enabled object, then wraps it onto the torus.
    pub(crate) fn update_objects(&mut self, delta_time_ms: f64, size: Size, tick: u64) {
        let mut ctx = ObjectContext::new(size, tick, &mut self.logger);
        for object in self.objects.iter_mut().filter(|object| object.enabled()) {
            object.update(delta_time_ms, &mut ctx);
            let wrapped = size.wrap(object.position());
            object.set_position(wrapped);
        }
    }

    /// Runs the collision pass over the current positions.
    pub(crate) fn resolve_collisions(&mut self, size: Size, tick: u64) -> usize {
        let mut ctx = ObjectContext::new(size, tick, &mut self.logger);
        run_collision_pass(&mut self.objects, &mut ctx)
    }
}

fn spaceship_name(object: &dyn GameObject) -> Option<&str> {
    object.as_any().downcast_ref::<Spaceship>().map(Spaceship::name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacewars_physics::Vector2;

    use crate::object::ObjectTag;

    fn world() -> Size {
        Size::new(1024.0, 768.0)
    }

    fn ship(manager: &mut GameManager, name: &str) -> Spaceship {
        let id = manager.next_object_id();
        Spaceship::new(id, name, Vector2::new(100.0, 100.0), 0.0)
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn new_populates_minimum_asteroids() {
            let config = GameConfig::default();
            let manager = GameManager::new(1_234_567_890, world(), &config);
            assert!(manager.game_objects().len() >= config.min_asteroids);
            assert_eq!(manager.asteroid_count(), manager.game_objects().len());
            assert!(manager.logger().is_empty());
        }

        #[test]
        fn same_seed_same_field() {
            let config = GameConfig::default();
            let a = GameManager::new(7, world(), &config);
            let b = GameManager::new(7, world(), &config);
            let field = |m: &GameManager| -> Vec<serde_json::Value> {
                m.game_objects().iter().map(|o| o.serialize()).collect()
            };
            assert_eq!(field(&a), field(&b));
        }

        #[test]
        fn generated_asteroids_use_configured_damage() {
            let config = GameConfig {
                asteroid_collision_damage: 12.0,
                ..GameConfig::default()
            };
            let manager = GameManager::new(7, world(), &config);
            assert!(manager
                .game_objects()
                .iter()
                .filter_map(|o| o.downcast_ref::<Asteroid>())
                .all(|a| a.damage() == 12.0));
        }

        #[test]
        fn ids_are_sequential_from_one() {
            let mut manager = GameManager::empty();
            assert_eq!(manager.next_object_id(), ObjectId::new(1));
            assert_eq!(manager.next_object_id(), ObjectId::new(2));
        }

        #[test]
        fn generated_ids_are_unique() {
            let mut manager = GameManager::new(99, world(), &GameConfig::default());
            let next = manager.next_object_id();
            let mut ids: Vec<_> = manager.game_objects().iter().map(|o| o.id()).collect();
            ids.push(next);
            let unique: HashSet<_> = ids.iter().copied().collect();
            assert_eq!(unique.len(), ids.len());
        }
    }

    mod add_tests {
        use super::*;

        #[test]
        fn add_spaceship_registers_name() {
            let mut manager = GameManager::empty();
            let viper = ship(&mut manager, "viper");
            let id = manager.add_game_object(viper).unwrap();

            assert_eq!(manager.game_objects().len(), 1);
            assert_eq!(manager.get_spaceship("viper").unwrap().id(), id);
        }

        #[test]
        fn add_duplicate_name_fails_without_mutation() {
            let mut manager = GameManager::empty();
            let first = ship(&mut manager, "viper");
            let second = ship(&mut manager, "viper");
            manager.add_game_object(first).unwrap();

            let err = manager.add_game_object(second).unwrap_err();
            assert_eq!(err, GameError::duplicate_name("viper"));
            assert_eq!(manager.game_objects().len(), 1);
        }

        #[test]
        fn add_batch_is_all_or_nothing() {
            let mut manager = GameManager::empty();
            let rock_id = manager.next_object_id();
            let batch: Vec<Box<dyn GameObject>> = vec![
                Box::new(Asteroid::new(rock_id, Vector2::ZERO, 10.0)),
                Box::new(ship(&mut manager, "viper")),
                Box::new(ship(&mut manager, "viper")),
            ];

            assert!(matches!(
                manager.add_game_objects(batch),
                Err(GameError::DuplicateName { .. })
            ));
            assert!(manager.game_objects().is_empty());
            assert!(manager.get_spaceship("viper").is_err());
        }

        #[test]
        fn add_batch_preserves_order() {
            let mut manager = GameManager::empty();
            let rock_id = manager.next_object_id();
            let batch: Vec<Box<dyn GameObject>> = vec![
                Box::new(ship(&mut manager, "viper")),
                Box::new(Asteroid::new(rock_id, Vector2::ZERO, 10.0)),
            ];
            manager.add_game_objects(batch).unwrap();

            let tags: Vec<_> = manager.game_objects().iter().map(|o| o.tag()).collect();
            assert_eq!(tags, vec![ObjectTag::Spaceship, ObjectTag::Asteroid]);
        }
    }

    mod lookup_tests {
        use super::*;

        #[test]
        fn get_unknown_spaceship_is_not_found() {
            let manager = GameManager::empty();
            assert_eq!(
                manager.get_spaceship("ghost").unwrap_err(),
                GameError::not_found("ghost")
            );
        }

        #[test]
        fn get_spaceship_mut_mutation_is_visible() {
            let mut manager = GameManager::empty();
            let viper = ship(&mut manager, "viper");
            manager.add_game_object(viper).unwrap();

            manager
                .get_spaceship_mut("viper")
                .unwrap()
                .set_position(Vector2::new(200.0, 200.0));

            assert_eq!(
                manager.get_spaceship("viper").unwrap().position(),
                Vector2::new(200.0, 200.0)
            );
        }

        #[test]
        fn game_object_by_id() {
            let mut manager = GameManager::new(3, world(), &GameConfig::default());
            let first = manager.game_objects()[0].id();
            assert!(manager.game_object(first).is_some());
            assert!(manager.game_object(ObjectId::new(-1)).is_none());

            if let Some(object) = manager.game_object_mut(first) {
                object.set_enabled(false);
            }
            assert!(!manager.game_objects()[0].enabled());
        }

        #[test]
        fn spaceship_counts() {
            let mut manager = GameManager::empty();
            assert!(manager.is_game_over());

            let viper = ship(&mut manager, "viper");
            let cobra = ship(&mut manager, "cobra");
            manager.add_game_object(viper).unwrap();
            manager.add_game_object(cobra).unwrap();
            assert_eq!(manager.enabled_spaceship_count(), 2);

            manager.get_spaceship_mut("cobra").unwrap().set_enabled(false);
            assert_eq!(manager.enabled_spaceship_count(), 1);
            assert!(!manager.is_game_over());

            manager.get_spaceship_mut("viper").unwrap().damage(1000.0);
            assert!(manager.is_game_over());
            assert_eq!(manager.spaceships().count(), 2);
        }
    }

    mod remove_tests {
        use super::*;

        #[test]
        fn remove_drops_from_collection_and_index() {
            let mut manager = GameManager::new(5, world(), &GameConfig::default());
            let asteroids = manager.game_objects().len();
            let viper = ship(&mut manager, "viper");
            manager.add_game_object(viper).unwrap();

            let removed = manager.remove_spaceship("viper").unwrap();
            assert!(removed.is_spaceship());
            assert_eq!(manager.game_objects().len(), asteroids);
            assert!(manager.get_spaceship("viper").is_err());
            assert!(manager.game_objects().iter().all(|o| o.is_asteroid()));
        }

        #[test]
        fn remove_keeps_order_of_remaining_objects() {
            let mut manager = GameManager::empty();
            let a = ship(&mut manager, "a");
            let b = ship(&mut manager, "b");
            let c = ship(&mut manager, "c");
            for s in [a, b, c] {
                manager.add_game_object(s).unwrap();
            }

            manager.remove_spaceship("b").unwrap();
            let names: Vec<_> = manager.spaceships().map(Spaceship::name).collect();
            assert_eq!(names, vec!["a", "c"]);
        }

        #[test]
        fn remove_unknown_is_not_found() {
            let mut manager = GameManager::empty();
            assert!(matches!(
                manager.remove_spaceship("ghost"),
                Err(GameError::NotFound { .. })
            ));
        }

        #[test]
        fn removed_name_can_be_reused() {
            let mut manager = GameManager::empty();
            let first = ship(&mut manager, "viper");
            manager.add_game_object(first).unwrap();
            manager.remove_spaceship("viper").unwrap();

            let second = ship(&mut manager, "viper");
            assert!(manager.add_game_object(second).is_ok());
        }

        #[test]
        fn ships_sharing_an_id_resolve_by_name() {
            let mut manager = GameManager::empty();
            let id = ObjectId::new(5);
            manager
                .add_game_object(Spaceship::new(id, "a", Vector2::new(1.0, 1.0), 0.0))
                .unwrap();
            manager
                .add_game_object(Spaceship::new(id, "b", Vector2::new(2.0, 2.0), 0.0))
                .unwrap();

            assert_eq!(manager.get_spaceship("b").unwrap().name(), "b");
            assert_eq!(manager.get_spaceship_mut("a").unwrap().name(), "a");

            let removed = manager.remove_spaceship("b").unwrap();
            assert_eq!(removed.downcast_ref::<Spaceship>().map(Spaceship::name), Some("b"));

            let names: Vec<_> = manager.spaceships().map(Spaceship::name).collect();
            assert_eq!(names, vec!["a"]);
            assert_eq!(manager.get_spaceship("a").unwrap().position(), Vector2::new(1.0, 1.0));
            assert!(manager.get_spaceship("b").is_err());
        }
    }

    mod tick_tests {
        use super::*;

        #[test]
        fn spaceship_action_context_logs_at_tick() {
            let mut manager = GameManager::empty();
            let viper = ship(&mut manager, "viper");
            manager.add_game_object(viper).unwrap();

            let width = manager
                .with_spaceship_mut("viper", world(), 9, |ship, ctx| {
                    ship.rotate(1.0);
                    ctx.log(format!("{} turned", ship.name()));
                    ctx.size().width
                })
                .unwrap();

            assert_eq!(width, 1024.0);
            assert_eq!(manager.logger().logs()[0].message(), "viper turned");
            assert_eq!(manager.logger().logs()[0].tick(), 9);
            assert!((manager.get_spaceship("viper").unwrap().rotation() - 1.0).abs() < 1e-12);
        }

        #[test]
        fn spaceship_action_unknown_name_skips_action() {
            let mut manager = GameManager::empty();
            let mut called = false;
            let result = manager.with_spaceship_mut("ghost", world(), 0, |_, _| called = true);
            assert_eq!(result, Err(GameError::not_found("ghost")));
            assert!(!called);
        }

        #[test]
        fn update_moves_and_wraps_enabled_objects() {
            let mut manager = GameManager::empty();
            let mut viper = ship(&mut manager, "viper");
            viper.set_position(Vector2::new(1000.0, 500.0));
            viper.set_velocity(Vector2::new(100.0, 0.0));
            manager.add_game_object(viper).unwrap();

            manager.update_objects(500.0, Size::new(1000.0, 1000.0), 1);

            let pos = manager.get_spaceship("viper").unwrap().position();
            assert!((pos.x - 50.0).abs() < 1e-9);
            assert!((pos.y - 500.0).abs() < 1e-9);
        }

        #[test]
        fn update_skips_disabled_objects() {
            let mut manager = GameManager::empty();
            let mut viper = ship(&mut manager, "viper");
            viper.set_velocity(Vector2::new(100.0, 0.0));
            viper.set_enabled(false);
            manager.add_game_object(viper).unwrap();

            manager.update_objects(1000.0, Size::new(1000.0, 1000.0), 1);

            assert_eq!(
                manager.get_spaceship("viper").unwrap().position(),
                Vector2::new(100.0, 100.0)
            );
        }

        #[test]
        fn resolve_collisions_damages_ship() {
            let mut manager = GameManager::empty();
            let viper = ship(&mut manager, "viper");
            let rock_id = manager.next_object_id();
            manager.add_game_object(viper).unwrap();
            manager
                .add_game_object(Asteroid::new(rock_id, Vector2::new(150.0, 100.0), 50.0))
                .unwrap();

            assert_eq!(manager.resolve_collisions(world(), 4), 1);

            let viper = manager.get_spaceship("viper").unwrap();
            assert!(!viper.enabled());
            assert_eq!(manager.logger().logs()[0].tick(), 4);
        }
    }
}
