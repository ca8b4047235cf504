use glam::{Quat, Vec3};

/// Collider categories that contact and trigger callbacks can tell apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderKind {
    Player,
    Ground,
    Platform,
}

/// The player's rigid body as seen by the controller: velocity is read and
/// written every tick, gravity can be switched off, rotation only changes
/// when the controller turns it.
#[derive(Debug, Clone)]
pub struct Body {
    /// Feet position
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Quat,
    pub use_gravity: bool,
    pub radius: f32,
    pub height: f32,
}

impl Body {
    pub fn new(position: Vec3, radius: f32, height: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            use_gravity: true,
            radius,
            height,
        }
    }

    /// Horizontal speed, ignoring the vertical component
    pub fn planar_speed(&self) -> f32 {
        Vec3::new(self.velocity.x, 0.0, self.velocity.z).length()
    }

    /// Unit vector the body faces on the ground plane
    pub fn facing(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Centre of the body's capsule, used for trigger overlaps
    pub fn center(&self) -> Vec3 {
        self.position + Vec3::Y * (self.height * 0.5)
    }
}
