// Coin Dash configuration types
// All settings with sensible defaults matching the prototype's tuning

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub coin: CoinConfig,
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    // Camera-relative movement
    pub move_forward: String,
    pub move_back: String,
    pub move_left: String,
    pub move_right: String,

    pub jump: String,

    // Shift is only visible on terminals with the keyboard enhancement protocol,
    // so dash also has a plain character binding
    pub dash: String,
    pub dash_alt: String,

    pub camera_left: String,
    pub camera_right: String,

    pub restart: String,
    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_forward: "W".to_string(),
            move_back: "S".to_string(),
            move_left: "A".to_string(),
            move_right: "D".to_string(),
            jump: "Space".to_string(),
            dash: "LeftShift".to_string(),
            dash_alt: "K".to_string(),
            camera_left: "Left".to_string(),
            camera_right: "Right".to_string(),
            restart: "R".to_string(),
            quit: "Esc".to_string(),
        }
    }
}

/// Character controller tuning. Units are world units and seconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub move_speed: f32,

    // Initial upward velocity of a grounded jump
    pub jump_force: f32,

    // How long holding jump keeps adding lift
    pub max_jump_time: f32,
    pub jump_hold_force: f32,

    // Facing slerp rate (fraction per second, clamped per tick)
    pub rotation_speed: f32,

    pub double_jump_force: f32,

    pub dash_speed: f32,
    pub dash_duration: f32,
    pub dash_cooldown: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            jump_force: 8.0,
            max_jump_time: 0.3,
            jump_hold_force: 5.0,
            rotation_speed: 10.0,
            double_jump_force: 8.0,
            dash_speed: 20.0,
            dash_duration: 0.2,
            dash_cooldown: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CoinConfig {
    pub value: u32,

    // Degrees per second
    pub rotation_speed: f32,

    // Pickup radius in world units
    pub radius: f32,

    // Height of the coin centre above whatever surface it sits on
    pub hover_height: f32,
}

impl Default for CoinConfig {
    fn default() -> Self {
        Self {
            value: 1,
            rotation_speed: 100.0,
            radius: 0.5,
            hover_height: 1.0,
        }
    }
}

/// A raised box the player can land on from above.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PlatformConfig {
    // Centre of the footprint
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub depth: f32,
    // Height of the top surface
    pub height: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorldConfig {
    // Downward acceleration, positive value
    pub gravity: f32,

    // Arena spans [0, width] on x and [0, depth] on z
    pub arena_width: f32,
    pub arena_depth: f32,

    pub spawn: [f32; 3],

    pub player_radius: f32,
    pub player_height: f32,

    // Explicit coin positions [x, y, z]; when empty, `coin_count` coins are scattered
    pub coins: Vec<[f32; 3]>,
    pub coin_count: usize,
    pub coin_seed: u64,

    // Camera yaw rate in degrees per second
    pub camera_turn_speed: f32,

    // Array of tables, keep last
    pub platforms: Vec<PlatformConfig>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            arena_width: 40.0,
            arena_depth: 24.0,
            spawn: [20.0, 0.0, 4.0],
            player_radius: 0.5,
            player_height: 2.0,
            coins: Vec::new(),
            coin_count: 12,
            coin_seed: 7,
            camera_turn_speed: 90.0,
            platforms: vec![
                PlatformConfig {
                    x: 8.0,
                    z: 16.0,
                    width: 6.0,
                    depth: 4.0,
                    height: 2.5,
                },
                PlatformConfig {
                    x: 30.0,
                    z: 12.0,
                    width: 5.0,
                    depth: 5.0,
                    height: 4.5,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    // Axis ramp toward a pressed direction, units per second
    pub axis_sensitivity: f32,

    // Axis ramp back to rest, units per second
    pub axis_gravity: f32,

    // Without release events, a key is considered released after this long
    // without a press or repeat
    pub key_release_timeout_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            axis_sensitivity: 3.0,
            axis_gravity: 3.0,
            key_release_timeout_ms: 550,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Target frames per second
    pub target_fps: u64,

    // RGB values 0-255
    pub player_color: [u8; 3],
    pub coin_color: [u8; 3],
    pub platform_color: [u8; 3],
    pub wall_color: [u8; 3],
    pub cooldown_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            player_color: [255, 255, 255],   // White
            coin_color: [255, 215, 0],       // Gold
            platform_color: [120, 160, 200], // Steel blue
            wall_color: [100, 100, 100],     // Gray
            cooldown_color: [80, 200, 255],  // Cyan
        }
    }
}
