use glam::Vec3;
use tracing::debug;

use super::body::ColliderKind;
use super::manager::ScoreSink;
use crate::config::CoinConfig;

#[derive(Debug, Clone)]
pub struct Coin {
    pub position: Vec3,
    pub value: u32,
    pub radius: f32,
    /// Degrees per second about the coin's local spin axis
    pub rotation_speed: f32,
    /// Current spin angle in degrees, [0, 360)
    pub angle: f32,
    collected: bool,
}

impl Coin {
    pub fn new(position: Vec3, config: &CoinConfig) -> Self {
        Self {
            position,
            value: config.value,
            radius: config.radius,
            rotation_speed: config.rotation_speed,
            angle: 0.0,
            collected: false,
        }
    }

    /// Cosmetic spin
    pub fn update(&mut self, dt: f32) {
        self.angle = (self.angle + self.rotation_speed * dt).rem_euclid(360.0);
    }

    /// Overlap callback. Only the player collects; a coin pays out once and
    /// is gone afterwards. Returns whether this call collected it.
    pub fn on_trigger_enter(&mut self, other: ColliderKind, score: &mut impl ScoreSink) -> bool {
        if self.collected || other != ColliderKind::Player {
            return false;
        }

        score.add_score(self.value);
        self.collected = true;
        debug!(value = self.value, position = ?self.position, "coin collected");
        true
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Sphere test against a point, e.g. the player's centre
    pub fn overlaps(&self, point: Vec3, other_radius: f32) -> bool {
        self.position.distance(point) <= self.radius + other_radius
    }

    /// Apparent width of the spinning coin seen from above, in [0, 1]
    pub fn apparent_width(&self) -> f32 {
        self.angle.to_radians().cos().abs()
    }
}
