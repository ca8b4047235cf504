pub mod body;
pub mod camera;
pub mod clock;
pub mod coin;
pub mod input;
pub mod manager;
pub mod physics;
pub mod player;
pub mod world;

pub use input::{InputAction, InputManager};
pub use world::World;
