pub mod braille;
pub mod overlay;
pub mod render;

pub use overlay::OverlayMessage;
pub use render::render;
