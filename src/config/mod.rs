// Configuration module for Coin Dash
// Handles loading and managing game configuration from TOML file

pub mod loader;
pub mod types;

pub use loader::load_config;
pub use types::{
    CoinConfig, Config, DisplayConfig, InputConfig, KeyBindings, PlatformConfig, PlayerConfig,
    WorldConfig,
};
