use glam::{Vec2, Vec3};

/// Follow camera. Only its yaw matters for movement: input is mapped onto
/// the camera's forward/right axes flattened to the ground plane.
#[derive(Debug, Clone, Default)]
pub struct Camera {
    /// Radians about +Y; 0 looks down +Z
    pub yaw: f32,
}

impl Camera {
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    /// Turn by `degrees`, keeping yaw in [0, 2π).
    pub fn turn(&mut self, degrees: f32) {
        self.yaw = (self.yaw + degrees.to_radians()).rem_euclid(std::f32::consts::TAU);
    }

    /// Convert stick input into a world-space direction on the ground plane.
    /// The result is not normalized, so analogue input keeps its magnitude.
    pub fn relative_movement(&self, input: Vec2) -> Vec3 {
        let mut forward = self.forward();
        let mut right = self.right();

        forward.y = 0.0;
        right.y = 0.0;

        let forward = forward.normalize_or_zero();
        let right = right.normalize_or_zero();

        forward * input.y + right * input.x
    }

    /// Compass label for the HUD (+Z is north)
    pub fn heading_label(&self) -> &'static str {
        const LABELS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
        let sector = (self.yaw / std::f32::consts::FRAC_PI_4).round() as usize % 8;
        LABELS[sector]
    }
}
