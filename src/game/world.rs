use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use super::body::{Body, ColliderKind};
use super::camera::Camera;
use super::clock::{Clock, Tick};
use super::coin::Coin;
use super::input::InputSource;
use super::manager::GameManager;
use super::physics::{self, Arena};
use super::player::{MotionState, PlayerController};
use crate::config::{CoinConfig, Config};

// Scattered coins keep this far from the walls
const COIN_MARGIN: f32 = 1.5;

/// Everything that happened during one world step
#[derive(Debug, Default, Clone, Copy)]
pub struct WorldEvents {
    pub jumped: bool,
    pub double_jumped: bool,
    pub dash_started: bool,
    pub dash_ended: bool,
    pub landed: bool,
    pub coins_collected: u32,
}

impl WorldEvents {
    pub fn any(&self) -> bool {
        self.jumped
            || self.double_jumped
            || self.dash_started
            || self.dash_ended
            || self.landed
            || self.coins_collected > 0
    }
}

/// The game-loop driver: owns every component and calls their updates in a
/// fixed order each step.
pub struct World {
    pub arena: Arena,
    pub body: Body,
    pub player: PlayerController,
    pub camera: Camera,
    pub coins: Vec<Coin>,
    pub manager: GameManager,
    pub coins_total: usize,
    clock: Clock,
    gravity: f32,
    camera_turn_speed: f32,
    spawn: Vec3,
    coin_layout: Vec<Vec3>,
    coin_config: CoinConfig,
}

impl World {
    pub fn new(config: &Config) -> Self {
        let arena = Arena::from_config(&config.world);
        let [sx, _, sz] = config.world.spawn;
        let spawn = physics::resting_position(&arena, sx, sz);

        let coin_layout = if config.world.coins.is_empty() {
            scatter_coins(&arena, config)
        } else {
            config.world.coins.iter().map(|&p| Vec3::from_array(p)).collect()
        };

        let coins: Vec<Coin> = coin_layout
            .iter()
            .map(|&p| Coin::new(p, &config.coin))
            .collect();

        info!(
            coins = coins.len(),
            platforms = arena.platforms.len(),
            "world created"
        );

        Self {
            body: Body::new(spawn, config.world.player_radius, config.world.player_height),
            player: PlayerController::new(config.player.clone()),
            camera: Camera::default(),
            coins_total: coins.len(),
            coins,
            manager: GameManager::with_hud(),
            clock: Clock::new(),
            gravity: config.world.gravity,
            camera_turn_speed: config.world.camera_turn_speed,
            spawn,
            coin_layout,
            coin_config: config.coin.clone(),
            arena,
        }
    }

    /// Put everything back to its starting state, coins included.
    pub fn reset(&mut self) {
        self.body = Body::new(self.spawn, self.body.radius, self.body.height);
        self.player.reset();
        self.camera = Camera::default();
        self.coins = self
            .coin_layout
            .iter()
            .map(|&p| Coin::new(p, &self.coin_config))
            .collect();
        self.manager.reset();
        self.clock.reset();
        info!("world reset");
    }

    pub fn now(&self) -> f32 {
        self.clock.now()
    }

    pub fn motion_state(&self) -> MotionState {
        self.player.motion_state()
    }

    /// A level that started without coins is never complete.
    pub fn all_coins_collected(&self) -> bool {
        self.coins_total > 0 && self.coins.is_empty()
    }

    /// Turn the camera; `direction` is -1 (left), 0 or +1 (right).
    pub fn turn_camera(&mut self, direction: f32, dt: f32) {
        if direction != 0.0 {
            self.camera.turn(direction * self.camera_turn_speed * dt);
        }
    }

    /// Advance the world by `dt` seconds using this tick's input.
    pub fn step(&mut self, input: &impl InputSource, dt: f32) -> WorldEvents {
        let tick = self.clock.advance(dt);
        let mut events = WorldEvents::default();

        self.turn_camera(input.camera_turn(), dt);

        let player_events = self.player.update(
            input,
            &self.camera,
            &mut self.body,
            tick,
            &mut self.manager,
        );
        events.jumped = player_events.jumped;
        events.double_jumped = player_events.double_jumped;
        events.dash_started = player_events.dash_started;
        events.dash_ended = player_events.dash_ended;

        let was_grounded = self.player.is_grounded();
        let contact = physics::step_body(
            &mut self.body,
            &self.arena,
            self.gravity,
            dt,
            was_grounded,
        );
        if contact.grounded {
            self.player.on_collision_stay();
        } else if was_grounded {
            self.player.on_collision_exit();
        }
        events.landed = contact.landed;
        if contact.wall_collision {
            trace!(position = ?self.body.position, "wall contact");
        }
        if contact.landed {
            debug!(surface = ?contact.surface, y = self.body.position.y, "landed");
        }

        events.coins_collected = self.update_coins(tick);

        self.manager.update(tick.now);

        if events.any() {
            debug!(?events, state = self.player.motion_state().label(), "world step");
        }
        events
    }

    fn update_coins(&mut self, tick: Tick) -> u32 {
        let center = self.body.center();
        let reach = self.body.radius.max(self.body.height * 0.5);
        let mut collected = 0;

        for coin in &mut self.coins {
            coin.update(tick.dt);
            if coin.overlaps(center, reach)
                && coin.on_trigger_enter(ColliderKind::Player, &mut self.manager)
            {
                collected += 1;
            }
        }

        self.coins.retain(|coin| !coin.is_collected());
        collected
    }
}

/// Place `coin_count` coins at random over the floor and platform tops.
/// The same seed always gives the same layout.
fn scatter_coins(arena: &Arena, config: &Config) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(config.world.coin_seed);
    let hover = config.coin.hover_height;

    let max_x = (arena.width - COIN_MARGIN).max(COIN_MARGIN);
    let max_z = (arena.depth - COIN_MARGIN).max(COIN_MARGIN);

    (0..config.world.coin_count)
        .map(|i| {
            // Every third coin sits on a platform when there are any
            if i % 3 == 2 && !arena.platforms.is_empty() {
                let platform = arena.platforms[rng.gen_range(0..arena.platforms.len())];
                let x = rng.gen_range(platform.min_x..=platform.max_x);
                let z = rng.gen_range(platform.min_z..=platform.max_z);
                Vec3::new(x, platform.top + hover, z)
            } else {
                let x = rng.gen_range(COIN_MARGIN..=max_x);
                let z = rng.gen_range(COIN_MARGIN..=max_z);
                physics::resting_position(arena, x, z) + Vec3::Y * hover
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::input::InputSnapshot;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    fn config_with_coins(coins: Vec<[f32; 3]>) -> Config {
        let mut config = Config::default();
        config.world.coins = coins;
        config
    }

    fn no_coins() -> Config {
        let mut config = Config::default();
        config.world.coin_count = 0;
        config
    }

    fn settle(world: &mut World) {
        for _ in 0..5 {
            world.step(&InputSnapshot::default(), DT);
        }
    }

    #[test]
    fn test_spawn_settles_grounded() {
        let mut world = World::new(&no_coins());
        settle(&mut world);
        assert!(world.player.is_grounded());
        assert_eq!(world.motion_state(), MotionState::Grounded);
    }

    #[test]
    fn test_coinless_level_is_not_complete() {
        let mut world = World::new(&no_coins());
        assert_eq!(world.coins_total, 0);
        assert!(!world.all_coins_collected());

        world.step(&InputSnapshot::default(), DT);
        assert!(!world.all_coins_collected());
    }

    #[test]
    fn test_inverted_platform_scatters_without_panic() {
        let mut config = Config::default();
        config.world.platforms = vec![crate::config::PlatformConfig {
            x: 10.0,
            z: 10.0,
            width: -2.0,
            depth: 3.0,
            height: 1.5,
        }];

        let world = World::new(&config);

        assert_eq!(world.coins.len(), config.world.coin_count);
        // Every third coin lands on the platform
        let on_platform = &world.coins[2];
        assert!(world.arena.platforms[0].contains(on_platform.position.x, on_platform.position.z));
        assert_eq!(on_platform.position.y, 1.5 + config.coin.hover_height);
    }

    #[test]
    fn test_scatter_is_deterministic() {
        let config = Config::default();
        let a = World::new(&config);
        let b = World::new(&config);

        assert_eq!(a.coins.len(), config.world.coin_count);
        let pa: Vec<Vec3> = a.coins.iter().map(|c| c.position).collect();
        let pb: Vec<Vec3> = b.coins.iter().map(|c| c.position).collect();
        assert_eq!(pa, pb);

        for p in pa {
            assert!(p.x >= 0.0 && p.x <= a.arena.width);
            assert!(p.z >= 0.0 && p.z <= a.arena.depth);
            assert!(p.y > 0.0);
        }
    }

    #[test]
    fn test_jump_leaves_ground_and_lands_with_double_jump_recharged() {
        let mut world = World::new(&no_coins());
        settle(&mut world);

        let press = InputSnapshot {
            jump_pressed: true,
            jump_held: true,
            ..InputSnapshot::default()
        };
        let release = InputSnapshot {
            jump_released: true,
            ..InputSnapshot::default()
        };

        assert!(world.step(&press, DT).jumped);
        assert!(!world.player.is_grounded());
        world.step(&release, DT);

        assert!(world.step(&press, DT).double_jumped);
        assert!(!world.player.state().can_double_jump);

        let mut landed = false;
        for _ in 0..600 {
            if world.step(&InputSnapshot::default(), DT).landed {
                landed = true;
                break;
            }
        }
        assert!(landed);
        assert!(world.player.is_grounded());
        assert!(world.player.state().can_double_jump);
    }

    #[test]
    fn test_walking_into_coin_collects_it_once() {
        let config = config_with_coins(vec![[22.0, 1.0, 4.0]]);
        let mut world = World::new(&config);
        settle(&mut world);

        let walk = InputSnapshot {
            move_input: Vec2::new(1.0, 0.0),
            ..InputSnapshot::default()
        };

        let mut collected = 0;
        for _ in 0..120 {
            collected += world.step(&walk, DT).coins_collected;
        }

        assert_eq!(collected, 1);
        assert_eq!(world.manager.score(), 1);
        assert!(world.all_coins_collected());
        assert_eq!(
            world.manager.score_text.as_ref().unwrap().text,
            "Score: 1"
        );
    }

    #[test]
    fn test_dash_drives_cooldown_slider() {
        let mut world = World::new(&no_coins());
        settle(&mut world);

        let dash = InputSnapshot {
            move_input: Vec2::new(0.0, 1.0),
            dash_pressed: true,
            ..InputSnapshot::default()
        };
        assert!(world.step(&dash, DT).dash_started);

        let slider = world.manager.dash_cooldown_slider.as_ref().unwrap().value;
        assert!(slider < 0.1);

        let mut previous = slider;
        for _ in 0..90 {
            world.step(&InputSnapshot::default(), DT);
            let value = world.manager.dash_cooldown_slider.as_ref().unwrap().value;
            assert!(value >= previous);
            previous = value;
        }
        assert_eq!(previous, 1.0);
    }

    #[test]
    fn test_dash_keeps_height_then_gravity_returns() {
        let mut world = World::new(&no_coins());
        settle(&mut world);

        // Jump, then dash near the top of the arc
        let press = InputSnapshot {
            jump_pressed: true,
            ..InputSnapshot::default()
        };
        world.step(&press, DT);
        for _ in 0..10 {
            world.step(&InputSnapshot::default(), DT);
        }

        let dash = InputSnapshot {
            move_input: Vec2::new(-1.0, 0.0),
            dash_pressed: true,
            ..InputSnapshot::default()
        };
        assert!(world.step(&dash, DT).dash_started);
        let height = world.body.position.y;

        while world.player.state().is_dashing {
            assert!((world.body.position.y - height).abs() < 1e-4);
            world.step(&InputSnapshot::default(), DT);
        }

        assert!(world.body.use_gravity);
        for _ in 0..10 {
            world.step(&InputSnapshot::default(), DT);
        }
        assert!(world.body.position.y < height);
    }

    #[test]
    fn test_camera_turn_changes_walk_direction() {
        let mut world = World::new(&no_coins());
        settle(&mut world);

        // 90 deg/s for one second
        let turn = InputSnapshot {
            camera_turn: 1.0,
            ..InputSnapshot::default()
        };
        for _ in 0..60 {
            world.step(&turn, DT);
        }
        assert_eq!(world.camera.heading_label(), "E");

        let forward = InputSnapshot {
            move_input: Vec2::new(0.0, 1.0),
            ..InputSnapshot::default()
        };
        world.step(&forward, DT);
        assert!(world.body.velocity.x > 4.9);
    }

    #[test]
    fn test_reset_restores_coins_and_score() {
        let config = config_with_coins(vec![[22.0, 1.0, 4.0]]);
        let mut world = World::new(&config);
        let walk = InputSnapshot {
            move_input: Vec2::new(1.0, 0.0),
            ..InputSnapshot::default()
        };
        for _ in 0..120 {
            world.step(&walk, DT);
        }
        assert!(world.all_coins_collected());

        world.reset();

        assert_eq!(world.coins.len(), 1);
        assert_eq!(world.manager.score(), 0);
        assert_eq!(world.now(), 0.0);
        assert_eq!(world.body.position, world.spawn);
    }
}
