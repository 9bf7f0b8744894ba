//! # Game World
//!
//! Owns the level objects in a [`SlotMap`](crate::foundation::collections::SlotMap)
//! arena and the player, and steps both one frame at a time:
//!
//! 1. [`Player::handle_input`]
//! 2. [`World::interact`] when the interact button was pressed
//! 3. [`World::handle_collisions`]
//! 4. [`Player::update_position`]
//! 5. [`World::update_moving_objects`]
//!
//! Level records are kept after loading so [`World::reset`] can rebuild the
//! arena without touching the mesh library again.

use std::rc::Rc;

use crate::assets::{MeshInstance, MeshLibrary, Model};
use crate::config::GameConfig;
use crate::foundation::collections::{EntityId, EntityMap};
use crate::foundation::math::Matrix4;
use crate::physics::{resolve_contact, Collider, ColliderType, PhysicsManager};
use crate::scene::{parse_level, LevelError, LevelInstance};

use super::game_object::{GameObject, GameObjectType};
use super::input::PlayerInput;
use super::player::Player;
use super::GameError;

/// Whether the level is still being played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameState {
    /// Player is in control
    #[default]
    Running,
    /// End point reached; frames no longer advance
    Won,
}

/// What a collision pass or a frame ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Nothing special happened
    Continue,
    /// A death zone restarted the level
    Reset,
    /// The end point was reached
    Won,
}

/// A level record with its model resolved.
#[derive(Debug, Clone)]
struct LevelRecord {
    instance: LevelInstance,
    model: Rc<Model>,
}

/// Level objects, the player and the game state.
#[derive(Debug)]
pub struct World {
    config: GameConfig,
    objects: EntityMap<GameObject>,
    records: Vec<LevelRecord>,
    player: Player,
    state: GameState,
    reset_count: u32,
}

impl World {
    /// Empty world with a player at the spawn point.
    ///
    /// Fails with [`GameError::Config`] when `config` does not pass
    /// [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: GameConfig) -> Self {
        let player = Player::new(&config.player, &config.camera);
        Self {
            config,
            objects: EntityMap::with_key(),
            records: Vec::new(),
            player,
            state: GameState::Running,
            reset_count: 0,
        }
    }

    /// Parses level text and replaces the current level with it.
    ///
    /// Nothing changes when any record fails. Returns the number of objects
    /// created.
    pub fn load_level(&mut self, text: &str, library: &MeshLibrary) -> Result<usize, GameError> {
        let instances = parse_level(text)?;
        Ok(self.load_instances(instances, library)?)
    }

    /// Replaces the current level with already parsed records.
    pub fn load_instances(
        &mut self,
        instances: Vec<LevelInstance>,
        library: &MeshLibrary,
    ) -> Result<usize, LevelError> {
        let records = instances
            .into_iter()
            .map(|instance| {
                let model = library.get(&instance.model).ok_or_else(|| LevelError::UnknownModel {
                    line: instance.line,
                    model: instance.model.clone(),
                })?;
                Ok(LevelRecord { instance, model })
            })
            .collect::<Result<Vec<_>, LevelError>>()?;

        let objects = build_objects(&records, &self.config)?;
        let count = objects.len();

        self.objects = objects;
        self.records = records;
        self.state = GameState::Running;
        self.player.reset();
        log::info!("Level loaded: {} objects", count);
        Ok(count)
    }

    /// Restarts the level: objects rebuilt from the loaded records, player respawned.
    pub fn reset(&mut self) -> Result<(), GameError> {
        self.objects = build_objects(&self.records, &self.config)?;
        self.player.reset();
        self.state = GameState::Running;
        self.reset_count += 1;
        log::info!("Level reset ({} so far)", self.reset_count);
        Ok(())
    }

    /// Every object's collider, in arena order.
    ///
    /// Built from the arena on each call, so it always matches the live objects.
    pub fn colliders(&self) -> impl Iterator<Item = &Collider> + '_ {
        self.objects.values().map(GameObject::collider)
    }

    /// Resolves the player's next step against every object.
    ///
    /// The stepped capsule is rebuilt for each object from the velocity as
    /// corrected so far. A death zone resets the level and ends the pass; an
    /// end point wins and still blocks; a door matching the phone's color is
    /// passed through.
    pub fn handle_collisions(&mut self, delta_time: f32) -> Result<FrameOutcome, GameError> {
        let threshold = self.config.physics.grounded_threshold;
        let phone = self.player.phone().state();
        let mut outcome = FrameOutcome::Continue;
        self.player.set_grounded(false);

        for (id, object) in &self.objects {
            let stepped = self.player.stepped_collider(delta_time);
            let Some(normal) = object.collider().check_collision(&stepped) else {
                continue;
            };

            match object.kind() {
                GameObjectType::DeathZone => {
                    log::info!("Player entered death zone {:?}", id);
                    outcome = FrameOutcome::Reset;
                    break;
                }
                GameObjectType::EndPoint => {
                    if self.state != GameState::Won {
                        log::info!("Player reached the end point");
                    }
                    self.state = GameState::Won;
                    outcome = FrameOutcome::Won;
                }
                GameObjectType::Door if object.color() == phone => {
                    log::debug!("Passing through {} door {:?}", phone, id);
                    continue;
                }
                _ => {}
            }

            let response = resolve_contact(self.player.velocity(), normal, threshold);
            if response.grounded {
                self.player.set_grounded(true);
            }
            if response.velocity != self.player.velocity() {
                log::debug!(
                    "{:?} {:?} blocked velocity {} -> {}",
                    object.kind(),
                    id,
                    self.player.velocity(),
                    response.velocity
                );
            }
            self.player.set_velocity(response.velocity);
        }

        if outcome == FrameOutcome::Reset {
            self.reset()?;
        }
        Ok(outcome)
    }

    /// Casts the view ray and trades colors with the first button or
    /// moving object it hits.
    ///
    /// Returns the entity whose color changed.
    pub fn interact(&mut self) -> Option<EntityId> {
        let ray = self.player.interaction_ray();
        let reach = self.player.settings().interact_distance;
        let hit_owner = PhysicsManager::raycast(&ray, self.colliders(), reach)
            .and_then(|hit| hit.collider.owner())?;

        let object = self.objects.get_mut(hit_owner)?;
        if !object.kind().is_interactive() {
            log::debug!("Interaction hit a {:?}, nothing to trade", object.kind());
            return None;
        }

        let given = self.player.phone().state();
        self.player.phone_mut().swap_color_state(object.color_mut());
        object.set_mesh_texture();
        log::info!(
            "Traded {} for {} with {:?} {:?}",
            given,
            self.player.phone().state(),
            object.kind(),
            hit_owner
        );
        Some(hit_owner)
    }

    /// Advances every moving object along its path.
    pub fn update_moving_objects(&mut self, delta_time: f32) {
        for object in self.objects.values_mut() {
            object.update_transform(delta_time);
        }
    }

    /// Runs one full frame. A won level no longer advances.
    pub fn frame(
        &mut self,
        input: &PlayerInput,
        delta_time: f32,
    ) -> Result<FrameOutcome, GameError> {
        if self.state == GameState::Won {
            return Ok(FrameOutcome::Won);
        }

        if self.player.handle_input(input, delta_time) {
            self.interact();
        }

        let outcome = self.handle_collisions(delta_time)?;
        if outcome == FrameOutcome::Reset {
            return Ok(outcome);
        }

        self.player.update_position(delta_time);
        self.update_moving_objects(delta_time);
        Ok(outcome)
    }

    /// Projection times view for the player camera.
    pub fn view_projection(&self) -> Result<Matrix4, GameError> {
        let camera = self.player.camera();
        Ok(camera.projection_matrix()? * camera.view_matrix())
    }

    /// Level object by handle
    #[must_use]
    pub fn object(&self, id: EntityId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    /// All level objects with their handles
    pub fn objects(&self) -> impl Iterator<Item = (EntityId, &GameObject)> + '_ {
        self.objects.iter()
    }

    /// Number of level objects
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// The player
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable player
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Current game state
    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Death-zone resets since the world was created
    #[must_use]
    pub const fn reset_count(&self) -> u32 {
        self.reset_count
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }
}

/// Builds a fresh arena from resolved records. Unknown object ids are skipped.
fn build_objects(
    records: &[LevelRecord],
    config: &GameConfig,
) -> Result<EntityMap<GameObject>, LevelError> {
    let mut objects = EntityMap::with_key();

    for LevelRecord { instance, model } in records {
        let Some((kind, color)) = GameObjectType::classify(instance.id) else {
            log::warn!("Skipping unknown object id {} at line {}", instance.id, instance.line);
            continue;
        };

        let mesh = MeshInstance::new(
            Rc::clone(model),
            instance.texture.clone(),
            instance.world_transform(),
        );
        let collider = Collider::create_from_mesh(ColliderType::Box, &mesh).ok_or_else(|| {
            LevelError::ColliderBuild {
                line: instance.line,
                model: instance.model.clone(),
            }
        })?;

        let mut object = GameObject::new(kind, color, mesh, collider);
        if kind == GameObjectType::MovingObject {
            let end = instance.endpoint_transform().unwrap_or_else(|| {
                Matrix4::create_translation(config.moving_object.fallback_end())
            });
            object = object.with_motion(end, config.moving_object.speed);
        }

        objects.insert_with_key(move |id| {
            object.set_owner(id);
            object
        });
    }

    Ok(objects)
}

impl Default for World {
    fn default() -> Self {
        Self::with_valid_config(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vector3;
    use crate::game::color::ColorState;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;
    const FLOOR: &str = "12 floor none 0 -0.1 0 0 0 0 1 1 1\n";

    fn world_with(level: &str) -> World {
        let library = MeshLibrary::with_primitives();
        let mut world = World::default();
        world.load_level(level, &library).unwrap();
        world
    }

    fn find(world: &World, kind: GameObjectType) -> EntityId {
        world
            .objects()
            .find(|(_, object)| object.kind() == kind)
            .map(|(id, _)| id)
            .unwrap()
    }

    #[test]
    fn test_landing_on_floor_grounds_player() {
        let mut world = world_with(FLOOR);
        let outcome = world.frame(&PlayerInput::idle(), DT).unwrap();

        assert_eq!(outcome, FrameOutcome::Continue);
        assert!(world.player().grounded());
        assert_relative_eq!(world.player().velocity().y, 0.0);
        assert_relative_eq!(world.player().position(), Vector3::ZERO);
    }

    #[test]
    fn test_falling_without_floor() {
        let mut world = world_with("# nothing here\n");
        world.frame(&PlayerInput::idle(), DT).unwrap();
        assert!(!world.player().grounded());
        assert!(world.player().position().y < 0.0);
    }

    fn walk_into_red_door(phone: ColorState) -> Vector3 {
        let level = format!("{FLOOR}1 cube red_color 0 0.5 -1 0 0 0 4 1 0.2\n");
        let mut world = world_with(&level);
        world.player_mut().phone_mut().set_state(phone);
        world.player_mut().set_position(Vector3::new(0.0, 0.0, -0.75));
        world.player_mut().set_velocity(Vector3::new(0.0, 0.0, -2.5));

        world.handle_collisions(DT).unwrap();
        world.player().velocity()
    }

    #[test]
    fn test_matching_door_lets_player_through() {
        let velocity = walk_into_red_door(ColorState::Red);
        assert_relative_eq!(velocity, Vector3::new(0.0, 0.0, -2.5), epsilon = 1e-6);
    }

    #[test]
    fn test_other_color_door_blocks() {
        let velocity = walk_into_red_door(ColorState::Blue);
        assert_relative_eq!(velocity.z, 0.0, epsilon = 1e-6);

        let inactive = walk_into_red_door(ColorState::Inactive);
        assert_relative_eq!(inactive.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_death_zone_resets_level() {
        let level = format!("{FLOOR}14 cube none 0 0.5 -3 0 0 0 1 1 1\n");
        let mut world = world_with(&level);
        world.player_mut().phone_mut().set_state(ColorState::Yellow);
        world.player_mut().set_position(Vector3::new(0.0, 0.0, -3.0));

        let outcome = world.frame(&PlayerInput::idle(), DT).unwrap();
        assert_eq!(outcome, FrameOutcome::Reset);
        assert_eq!(world.reset_count(), 1);
        assert_eq!(world.player().position(), Vector3::ZERO);
        assert_eq!(world.player().phone().state(), ColorState::Inactive);
        assert_eq!(world.object_count(), 2);
        assert_eq!(world.state(), GameState::Running);
    }

    #[test]
    fn test_end_point_wins_and_freezes() {
        let level = format!("{FLOOR}13 cube none 0 0.5 -3 0 0 0 1 1 1\n");
        let mut world = world_with(&level);
        world.player_mut().set_position(Vector3::new(0.0, 0.0, -3.0));

        assert_eq!(world.frame(&PlayerInput::idle(), DT).unwrap(), FrameOutcome::Won);
        assert_eq!(world.state(), GameState::Won);

        let walk = PlayerInput { forward: true, ..PlayerInput::idle() };
        let position = world.player().position();
        assert_eq!(world.frame(&walk, DT).unwrap(), FrameOutcome::Won);
        assert_eq!(world.player().position(), position);
    }

    #[test]
    fn test_interact_trades_colors_with_button() {
        let level = format!("{FLOOR}6 cube blue_color 0 0.5 -3 0 0 0 1 1 1\n");
        let mut world = world_with(&level);
        world.player_mut().phone_mut().set_state(ColorState::Red);
        let button = find(&world, GameObjectType::Button);

        let click = PlayerInput { interact: true, ..PlayerInput::idle() };
        world.frame(&click, DT).unwrap();

        assert_eq!(world.player().phone().state(), ColorState::Blue);
        let object = world.object(button).unwrap();
        assert_eq!(object.color(), ColorState::Red);
        assert_eq!(object.mesh().texture(), "red_color");

        // held button does not trade back
        world.frame(&click, DT).unwrap();
        assert_eq!(world.player().phone().state(), ColorState::Blue);
    }

    #[test]
    fn test_interact_ignores_doors_and_misses() {
        let level = format!("{FLOOR}2 cube blue_color 0 0.5 -3 0 0 0 1 1 1\n");
        let mut world = world_with(&level);
        world.player_mut().phone_mut().set_state(ColorState::Red);
        assert!(world.interact().is_none());
        assert_eq!(world.player().phone().state(), ColorState::Red);

        let mut empty = world_with(FLOOR);
        assert!(empty.interact().is_none());
    }

    #[test]
    fn test_colliders_are_owned_by_their_objects() {
        let level = format!(
            "{FLOOR}5 cube red_color 2 0.5 0 0 0 0 1 1 1\n9 cube none 0 1 -4 0 0 0 1 1 1 0 1 -8\n"
        );
        let world = world_with(&level);
        assert_eq!(world.colliders().count(), 3);
        for (id, object) in world.objects() {
            assert_eq!(object.collider().owner(), Some(id));
        }
    }

    #[test]
    fn test_unknown_ids_are_skipped() {
        let level = format!("{FLOOR}42 cube none 0 0 0 0 0 0 1 1 1\n");
        let world = world_with(&level);
        assert_eq!(world.object_count(), 1);
    }

    #[test]
    fn test_failed_load_keeps_current_level() {
        let library = MeshLibrary::with_primitives();
        let mut world = world_with(FLOOR);

        let result = world.load_level("12 teapot none 0 0 0 0 0 0 1 1 1", &library);
        assert!(matches!(
            result,
            Err(GameError::Level(LevelError::UnknownModel { line: 1, .. }))
        ));
        assert_eq!(world.object_count(), 1);

        let malformed = world.load_level("12 cube none 0 0", &library);
        assert!(matches!(malformed, Err(GameError::Level(LevelError::Malformed { .. }))));
        assert_eq!(world.object_count(), 1);
    }

    #[test]
    fn test_moving_object_uses_fallback_end() {
        let mut world = world_with("8 cube none 0 0 0 0 0 0 1 1 1\n");
        let platform = find(&world, GameObjectType::MovingObject);
        world.update_moving_objects(4.0);

        let object = world.object(platform).unwrap();
        assert_relative_eq!(
            object.mesh().model_matrix().translation(),
            Vector3::new(0.0, -1.0, -30.0),
            epsilon = 1e-4
        );
        let bounds = object.collider().aabb().unwrap();
        assert_relative_eq!(bounds.center(), Vector3::new(0.0, -1.0, -30.0), epsilon = 1e-4);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = GameConfig::default();
        config.player.radius = -0.2;
        assert!(matches!(World::new(config), Err(GameError::Config(_))));
        assert!(World::new(GameConfig::default()).is_ok());
    }

    #[test]
    fn test_view_projection_is_available() {
        let world = World::default();
        assert!(world.view_projection().is_ok());
    }
}
