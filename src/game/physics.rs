use glam::Vec3;

use super::body::{Body, ColliderKind};
use crate::config::{PlatformConfig, WorldConfig};

// Distance below which the body counts as touching a surface
const CONTACT_EPSILON: f32 = 1e-3;

/// Raised box with a walkable top. Only the top collides: the body passes
/// through the sides and lands when it comes down onto the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
    pub top: f32,
}

impl Platform {
    /// Footprint centred on (x, z). A negative width or depth is taken as
    /// its magnitude so min <= max always holds.
    pub fn from_config(config: &PlatformConfig) -> Self {
        let half_width = config.width.abs() / 2.0;
        let half_depth = config.depth.abs() / 2.0;
        Self {
            min_x: config.x - half_width,
            max_x: config.x + half_width,
            min_z: config.z - half_depth,
            max_z: config.z + half_depth,
            top: config.height,
        }
    }

    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }
}

/// Static level geometry: a walled floor plus platforms
#[derive(Debug, Clone)]
pub struct Arena {
    pub width: f32,
    pub depth: f32,
    pub platforms: Vec<Platform>,
}

impl Arena {
    pub fn from_config(config: &WorldConfig) -> Self {
        Self {
            width: config.arena_width,
            depth: config.arena_depth,
            platforms: config.platforms.iter().map(Platform::from_config).collect(),
        }
    }

    /// Highest walkable surface at or below `max_height` under (x, z).
    pub fn surface_below(&self, x: f32, z: f32, max_height: f32) -> f32 {
        self.platforms
            .iter()
            .filter(|p| p.contains(x, z) && p.top <= max_height)
            .map(|p| p.top)
            .fold(0.0, f32::max)
    }

    /// Highest surface under (x, z), ignoring the body's height
    pub fn top_at(&self, x: f32, z: f32) -> f32 {
        self.surface_below(x, z, f32::INFINITY)
    }
}

/// What the physics step observed, fed back to the controller as contacts
#[derive(Debug, Default, Clone, Copy)]
pub struct PhysicsEvents {
    /// Body rests on the floor or a platform after this step
    pub grounded: bool,
    /// Contact began this step
    pub landed: bool,
    /// What the body is standing on, when grounded
    pub surface: Option<ColliderKind>,
    pub wall_collision: bool,
}

pub fn step_body(
    body: &mut Body,
    arena: &Arena,
    gravity: f32,
    dt: f32,
    was_grounded: bool,
) -> PhysicsEvents {
    let mut events = PhysicsEvents::default();

    if body.use_gravity {
        body.velocity.y -= gravity * dt;
    }

    let previous_y = body.position.y;
    body.position += body.velocity * dt;

    // Walls
    let radius = body.radius;
    let clamped_x = body.position.x.clamp(radius, (arena.width - radius).max(radius));
    if clamped_x != body.position.x {
        body.position.x = clamped_x;
        body.velocity.x = 0.0;
        events.wall_collision = true;
    }
    let clamped_z = body.position.z.clamp(radius, (arena.depth - radius).max(radius));
    if clamped_z != body.position.z {
        body.position.z = clamped_z;
        body.velocity.z = 0.0;
        events.wall_collision = true;
    }

    // Surfaces the feet started above (or on) can catch the body
    let support = arena.surface_below(
        body.position.x,
        body.position.z,
        previous_y + CONTACT_EPSILON,
    );

    if body.velocity.y <= 0.0 && body.position.y <= support + CONTACT_EPSILON {
        body.position.y = support;
        body.velocity.y = 0.0;
        events.grounded = true;
        events.surface = Some(if support > 0.0 {
            ColliderKind::Platform
        } else {
            ColliderKind::Ground
        });
    }

    events.landed = events.grounded && !was_grounded;
    events
}

/// Where a body standing at (x, z) would rest, as a full position
pub fn resting_position(arena: &Arena, x: f32, z: f32) -> Vec3 {
    Vec3::new(x, arena.top_at(x, z), z)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;
    const GRAVITY: f32 = 9.81;

    fn arena() -> Arena {
        Arena {
            width: 20.0,
            depth: 20.0,
            platforms: vec![Platform {
                min_x: 8.0,
                max_x: 12.0,
                min_z: 8.0,
                max_z: 12.0,
                top: 2.0,
            }],
        }
    }

    #[test]
    fn test_gravity_pulls_body_down_to_floor() {
        let arena = arena();
        let mut body = Body::new(Vec3::new(2.0, 3.0, 2.0), 0.5, 2.0);

        let mut grounded = false;
        let mut landed_count = 0;
        for _ in 0..240 {
            let events = step_body(&mut body, &arena, GRAVITY, DT, grounded);
            if events.landed {
                landed_count += 1;
            }
            grounded = events.grounded;
        }

        assert!(grounded);
        assert_eq!(landed_count, 1);
        assert_eq!(body.position.y, 0.0);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_resting_body_stays_grounded() {
        let arena = arena();
        let mut body = Body::new(Vec3::new(2.0, 0.0, 2.0), 0.5, 2.0);

        for _ in 0..10 {
            let events = step_body(&mut body, &arena, GRAVITY, DT, true);
            assert!(events.grounded);
            assert!(!events.landed);
        }
    }

    #[test]
    fn test_upward_velocity_leaves_ground() {
        let arena = arena();
        let mut body = Body::new(Vec3::new(2.0, 0.0, 2.0), 0.5, 2.0);
        body.velocity.y = 8.0;

        let events = step_body(&mut body, &arena, GRAVITY, DT, true);
        assert!(!events.grounded);
        assert!(body.position.y > 0.0);
    }

    #[test]
    fn test_lands_on_platform_from_above() {
        let arena = arena();
        let mut body = Body::new(Vec3::new(10.0, 4.0, 10.0), 0.5, 2.0);

        let mut grounded = false;
        for _ in 0..240 {
            grounded = step_body(&mut body, &arena, GRAVITY, DT, grounded).grounded;
        }

        assert!(grounded);
        assert_eq!(body.position.y, 2.0);

        let events = step_body(&mut body, &arena, GRAVITY, DT, true);
        assert_eq!(events.surface, Some(ColliderKind::Platform));
    }

    #[test]
    fn test_platform_sides_do_not_block() {
        let arena = arena();
        let mut body = Body::new(Vec3::new(6.0, 0.0, 10.0), 0.5, 2.0);
        body.velocity.x = 5.0;

        let mut grounded = true;
        for _ in 0..30 {
            grounded = step_body(&mut body, &arena, GRAVITY, DT, grounded).grounded;
        }

        // Walked under the platform top and stayed on the floor
        assert!(arena.platforms[0].contains(body.position.x, body.position.z));
        assert!(grounded);
        assert_eq!(body.position.y, 0.0);
    }

    #[test]
    fn test_walls_stop_body_and_are_not_ground() {
        let arena = arena();
        let mut body = Body::new(Vec3::new(19.0, 5.0, 2.0), 0.5, 2.0);
        body.velocity.x = 60.0;

        let events = step_body(&mut body, &arena, GRAVITY, DT, false);

        assert!(events.wall_collision);
        assert!(!events.grounded);
        assert_eq!(events.surface, None);
        assert_eq!(body.position.x, 19.5);
        assert_eq!(body.velocity.x, 0.0);
    }

    #[test]
    fn test_inverted_footprint_is_normalised() {
        let platform = Platform::from_config(&PlatformConfig {
            x: 10.0,
            z: 5.0,
            width: -2.0,
            depth: -4.0,
            height: 1.0,
        });

        assert_eq!((platform.min_x, platform.max_x), (9.0, 11.0));
        assert_eq!((platform.min_z, platform.max_z), (3.0, 7.0));
        assert!(platform.contains(10.0, 5.0));
    }

    #[test]
    fn test_gravity_off_holds_height() {
        let arena = arena();
        let mut body = Body::new(Vec3::new(2.0, 3.0, 2.0), 0.5, 2.0);
        body.use_gravity = false;
        body.velocity = Vec3::new(4.0, 0.0, 0.0);

        let events = step_body(&mut body, &arena, GRAVITY, DT, false);

        assert!(!events.grounded);
        assert_eq!(body.position.y, 3.0);
    }
}
