use glam::{Quat, Vec3};
use tracing::debug;

use super::body::Body;
use super::camera::Camera;
use super::clock::Tick;
use super::input::InputSource;
use super::manager::CooldownSink;
use crate::config::PlayerConfig;

// Below this the movement direction counts as no input for dashing
const MIN_DASH_INPUT: f32 = 1e-5;
// Facing only follows input above this magnitude
const MIN_TURN_INPUT: f32 = 0.1;

/// Mutable controller state, touched only by `update` and the contact callbacks
#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    pub grounded: bool,
    pub can_double_jump: bool,
    pub is_jumping: bool,
    pub jump_hold_time: f32,
    pub jump_released_after_first_jump: bool,
    pub is_dashing: bool,
    pub dash_time_remaining: f32,
    /// Clock time of the last dash start, `None` before the first one
    pub last_dash_time: Option<f32>,
}

/// Summary of the controller for display and logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionState {
    Grounded,
    Airborne { can_double_jump: bool },
    Jumping { hold_time: f32 },
    Dashing { time_remaining: f32 },
}

impl MotionState {
    pub fn label(&self) -> &'static str {
        match self {
            MotionState::Grounded => "Grounded",
            MotionState::Airborne { .. } => "Airborne",
            MotionState::Jumping { .. } => "Jumping",
            MotionState::Dashing { .. } => "Dashing",
        }
    }
}

/// Transitions that happened during one update
#[derive(Debug, Default, Clone, Copy)]
pub struct PlayerEvents {
    pub jumped: bool,
    pub double_jumped: bool,
    pub dash_started: bool,
    pub dash_ended: bool,
}

pub struct PlayerController {
    pub config: PlayerConfig,
    state: PlayerState,
}

impl PlayerController {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            config,
            state: PlayerState::default(),
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn is_grounded(&self) -> bool {
        self.state.grounded
    }

    pub fn motion_state(&self) -> MotionState {
        let state = &self.state;
        if state.is_dashing {
            MotionState::Dashing {
                time_remaining: state.dash_time_remaining,
            }
        } else if state.is_jumping {
            MotionState::Jumping {
                hold_time: state.jump_hold_time,
            }
        } else if state.grounded {
            MotionState::Grounded
        } else {
            MotionState::Airborne {
                can_double_jump: state.can_double_jump,
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = PlayerState::default();
    }

    /// Advance the controller by one tick.
    ///
    /// Dashing takes over the whole tick: while a dash is active nothing else
    /// (walking, turning, jumping) runs, including on the tick it starts.
    pub fn update(
        &mut self,
        input: &impl InputSource,
        camera: &Camera,
        body: &mut Body,
        tick: Tick,
        cooldown: &mut impl CooldownSink,
    ) -> PlayerEvents {
        let mut events = PlayerEvents::default();
        let move_direction = camera.relative_movement(input.move_input());

        if input.is_dash_pressed() && self.dash_ready(tick.now) && !self.state.is_dashing {
            events.dash_started = self.start_dash(move_direction, body, tick.now, cooldown);
        }

        if self.state.is_dashing {
            events.dash_ended = self.dash_movement(body, tick.dt);
            return events;
        }

        let speed = self.config.move_speed;
        body.velocity = Vec3::new(
            move_direction.x * speed,
            body.velocity.y,
            move_direction.z * speed,
        );

        if move_direction.length() > MIN_TURN_INPUT {
            let target = Quat::from_rotation_y(move_direction.x.atan2(move_direction.z));
            let t = (self.config.rotation_speed * tick.dt).min(1.0);
            body.rotation = body.rotation.slerp(target, t);
        }

        let state = &mut self.state;

        if state.grounded && input.is_jump_pressed() {
            state.is_jumping = true;
            state.jump_released_after_first_jump = false;
            state.jump_hold_time = 0.0;
            body.velocity.y = self.config.jump_force;
            events.jumped = true;
            debug!(force = self.config.jump_force, "jump");
        }

        // Holding jump extends the first jump
        if state.is_jumping
            && input.is_jump_held()
            && state.jump_hold_time < self.config.max_jump_time
        {
            body.velocity.y += self.config.jump_hold_force * tick.dt;
            state.jump_hold_time += tick.dt;
        }

        if input.is_jump_released() || state.jump_hold_time >= self.config.max_jump_time {
            state.is_jumping = false;
            state.jump_released_after_first_jump = true;
        }

        if !state.grounded
            && state.can_double_jump
            && state.jump_released_after_first_jump
            && input.is_jump_pressed()
        {
            body.velocity.y = self.config.double_jump_force;
            state.can_double_jump = false;
            events.double_jumped = true;
            debug!(force = self.config.double_jump_force, "double jump");
        }

        events
    }

    /// Contact with a walkable surface during this tick
    pub fn on_collision_stay(&mut self) {
        self.state.grounded = true;
        self.state.can_double_jump = true;
    }

    /// Contact with every walkable surface was lost
    pub fn on_collision_exit(&mut self) {
        self.state.grounded = false;
    }

    fn dash_ready(&self, now: f32) -> bool {
        match self.state.last_dash_time {
            Some(last) => now > last + self.config.dash_cooldown,
            None => true,
        }
    }

    fn start_dash(
        &mut self,
        mut move_direction: Vec3,
        body: &mut Body,
        now: f32,
        cooldown: &mut impl CooldownSink,
    ) -> bool {
        if move_direction.length() < MIN_DASH_INPUT {
            return false;
        }

        self.state.is_dashing = true;
        self.state.dash_time_remaining = self.config.dash_duration;
        self.state.last_dash_time = Some(now);

        move_direction.y = 0.0;

        body.use_gravity = false;
        body.velocity = move_direction.normalize() * self.config.dash_speed;

        cooldown.start_dash_cooldown(self.config.dash_cooldown, now);
        debug!(now, direction = ?move_direction, "dash started");
        true
    }

    /// Returns true when the dash finished this tick.
    fn dash_movement(&mut self, body: &mut Body, dt: f32) -> bool {
        self.state.dash_time_remaining -= dt;

        body.velocity.y = 0.0;

        if self.state.dash_time_remaining <= 0.0 {
            self.state.is_dashing = false;
            body.use_gravity = true;
            debug!("dash ended");
            return true;
        }
        false
    }
}
