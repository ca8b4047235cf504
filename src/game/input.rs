use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, ModifierKeyCode};
use glam::Vec2;
use std::collections::{HashMap, HashSet};
use std::io;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::config::{InputConfig, KeyBindings};

/// Keys that feed the per-tick gameplay snapshot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameKey {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    Jump,
    Dash,
    CameraLeft,
    CameraRight,
}

/// Session-level actions, handled by the play loop rather than the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Binding {
    Game(GameKey),
    Action(InputAction),
}

/// Parse a key name from the config file.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let code = match name {
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "Enter" => KeyCode::Enter,
        "Esc" => KeyCode::Esc,
        "Space" => KeyCode::Char(' '),
        "Tab" => KeyCode::Tab,
        "LeftShift" => KeyCode::Modifier(ModifierKeyCode::LeftShift),
        "RightShift" => KeyCode::Modifier(ModifierKeyCode::RightShift),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c.to_ascii_lowercase()),
                _ => return None,
            }
        }
    };
    Some(code)
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Flat lookup from terminal key codes to bindings
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    bindings: HashMap<KeyCode, Binding>,
}

impl KeyMap {
    pub fn from_config(keys: &KeyBindings) -> Self {
        let entries = [
            (&keys.move_forward, Binding::Game(GameKey::MoveForward)),
            (&keys.move_back, Binding::Game(GameKey::MoveBack)),
            (&keys.move_left, Binding::Game(GameKey::MoveLeft)),
            (&keys.move_right, Binding::Game(GameKey::MoveRight)),
            (&keys.jump, Binding::Game(GameKey::Jump)),
            (&keys.dash, Binding::Game(GameKey::Dash)),
            (&keys.dash_alt, Binding::Game(GameKey::Dash)),
            (&keys.camera_left, Binding::Game(GameKey::CameraLeft)),
            (&keys.camera_right, Binding::Game(GameKey::CameraRight)),
            (&keys.restart, Binding::Action(InputAction::Restart)),
            (&keys.quit, Binding::Action(InputAction::Quit)),
        ];

        let mut bindings = HashMap::new();
        for (name, binding) in entries {
            match parse_key(name) {
                Some(code) => {
                    bindings.insert(code, binding);
                }
                None => warn!(key = %name, "ignoring unrecognised key binding"),
            }
        }

        Self { bindings }
    }

    fn lookup(&self, code: KeyCode) -> Option<Binding> {
        self.bindings.get(&normalize(code)).copied()
    }
}

/// Everything the controller reads from input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Smoothed (horizontal, vertical) axes, each in [-1, 1]
    pub move_input: Vec2,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub jump_released: bool,
    pub dash_pressed: bool,
    /// -1 turns the camera left, +1 right
    pub camera_turn: f32,
}

/// Read-only view of one tick's input, as consumed by the controller
pub trait InputSource {
    fn move_input(&self) -> Vec2;
    fn is_jump_pressed(&self) -> bool;
    fn is_jump_held(&self) -> bool;
    fn is_jump_released(&self) -> bool;
    fn is_dash_pressed(&self) -> bool;
    fn camera_turn(&self) -> f32;
}

impl InputSource for InputSnapshot {
    fn move_input(&self) -> Vec2 {
        self.move_input
    }

    fn is_jump_pressed(&self) -> bool {
        self.jump_pressed
    }

    fn is_jump_held(&self) -> bool {
        self.jump_held
    }

    fn is_jump_released(&self) -> bool {
        self.jump_released
    }

    fn is_dash_pressed(&self) -> bool {
        self.dash_pressed
    }

    fn camera_turn(&self) -> f32 {
        self.camera_turn
    }
}

/// Turns raw key events into a once-per-tick snapshot.
///
/// Events arrive between ticks; edges (press/release) are latched until the
/// next `sample`, levels (held) reflect the state at sampling time.
pub struct InputManager {
    keymap: KeyMap,
    axis_sensitivity: f32,
    axis_gravity: f32,
    release_timeout: Duration,
    // True when the terminal reports key releases; otherwise holds expire
    release_events: bool,
    held: HashMap<GameKey, Instant>,
    pressed: HashSet<GameKey>,
    released: HashSet<GameKey>,
    jump_was_held: bool,
    axis: Vec2,
    snapshot: InputSnapshot,
}

impl InputManager {
    pub fn new(keys: &KeyBindings, config: &InputConfig, release_events: bool) -> Self {
        Self {
            keymap: KeyMap::from_config(keys),
            axis_sensitivity: config.axis_sensitivity,
            axis_gravity: config.axis_gravity,
            release_timeout: Duration::from_millis(config.key_release_timeout_ms),
            release_events,
            held: HashMap::new(),
            pressed: HashSet::new(),
            released: HashSet::new(),
            jump_was_held: false,
            axis: Vec2::ZERO,
            snapshot: InputSnapshot::default(),
        }
    }

    /// Drain pending terminal events. Gameplay keys update internal state;
    /// session actions are returned to the caller.
    pub fn poll_events(&mut self) -> Result<Vec<InputAction>, io::Error> {
        let mut actions = Vec::new();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key(key, Instant::now()) {
                        actions.push(action);
                    }
                }
                Event::FocusLost => self.release_all(),
                _ => {}
            }
        }

        Ok(actions)
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<InputAction> {
        let binding = self.keymap.lookup(key.code)?;

        match binding {
            Binding::Action(action) => (key.kind == KeyEventKind::Press).then_some(action),
            Binding::Game(game_key) => {
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if self.held.insert(game_key, now).is_none() {
                            self.pressed.insert(game_key);
                        }
                    }
                    KeyEventKind::Release => {
                        if self.held.remove(&game_key).is_some() {
                            self.released.insert(game_key);
                        }
                    }
                }
                None
            }
        }
    }

    /// Release every held key, e.g. when the terminal loses focus.
    pub fn release_all(&mut self) {
        for (key, _) in self.held.drain() {
            self.released.insert(key);
        }
    }

    /// Build the snapshot for the coming tick and clear latched edges.
    pub fn sample(&mut self, dt: f32, now: Instant) -> InputSnapshot {
        if !self.release_events {
            let timeout = self.release_timeout;
            let expired: Vec<GameKey> = self
                .held
                .iter()
                .filter(|(_, seen)| now.saturating_duration_since(**seen) > timeout)
                .map(|(key, _)| *key)
                .collect();
            for key in expired {
                self.held.remove(&key);
                self.released.insert(key);
            }
        }

        let jump_held = self.is_held(GameKey::Jump);
        let jump_pressed = self.pressed.contains(&GameKey::Jump);
        let jump_released =
            self.released.contains(&GameKey::Jump) || (self.jump_was_held && !jump_held);

        let target = Vec2::new(
            self.direction(GameKey::MoveLeft, GameKey::MoveRight),
            self.direction(GameKey::MoveBack, GameKey::MoveForward),
        );
        self.axis = Vec2::new(
            step_axis(self.axis.x, target.x, self.axis_sensitivity, self.axis_gravity, dt),
            step_axis(self.axis.y, target.y, self.axis_sensitivity, self.axis_gravity, dt),
        );

        self.snapshot = InputSnapshot {
            move_input: self.axis,
            jump_pressed,
            jump_held,
            jump_released,
            dash_pressed: self.pressed.contains(&GameKey::Dash),
            camera_turn: self.direction(GameKey::CameraLeft, GameKey::CameraRight),
        };

        self.pressed.clear();
        self.released.clear();
        self.jump_was_held = jump_held;

        self.snapshot
    }

    pub fn is_held(&self, key: GameKey) -> bool {
        self.held.contains_key(&key)
    }

    /// Forget all key state, e.g. on restart.
    pub fn reset(&mut self) {
        self.held.clear();
        self.pressed.clear();
        self.released.clear();
        self.jump_was_held = false;
        self.axis = Vec2::ZERO;
        self.snapshot = InputSnapshot::default();
    }

    fn direction(&self, negative: GameKey, positive: GameKey) -> f32 {
        let mut value = 0.0;
        if self.is_held(negative) {
            value -= 1.0;
        }
        if self.is_held(positive) {
            value += 1.0;
        }
        value
    }
}

impl InputSource for InputManager {
    fn move_input(&self) -> Vec2 {
        self.snapshot.move_input
    }

    fn is_jump_pressed(&self) -> bool {
        self.snapshot.jump_pressed
    }

    fn is_jump_held(&self) -> bool {
        self.snapshot.jump_held
    }

    fn is_jump_released(&self) -> bool {
        self.snapshot.jump_released
    }

    fn is_dash_pressed(&self) -> bool {
        self.snapshot.dash_pressed
    }

    fn camera_turn(&self) -> f32 {
        self.snapshot.camera_turn
    }
}

/// Advance one smoothed axis toward its raw target.
/// Reversing direction snaps through zero first.
fn step_axis(value: f32, target: f32, sensitivity: f32, gravity: f32, dt: f32) -> f32 {
    if target == 0.0 {
        return move_towards(value, 0.0, gravity * dt);
    }

    let start = if value * target < 0.0 { 0.0 } else { value };
    move_towards(start, target, sensitivity * dt).clamp(-1.0, 1.0)
}

fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + delta.signum() * max_delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    const DT: f32 = 1.0 / 60.0;

    fn manager(release_events: bool) -> InputManager {
        InputManager::new(&KeyBindings::default(), &InputConfig::default(), release_events)
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("W"), Some(KeyCode::Char('w')));
        assert_eq!(
            parse_key("LeftShift"),
            Some(KeyCode::Modifier(ModifierKeyCode::LeftShift))
        );
        assert_eq!(parse_key("Banana"), None);
    }

    #[test]
    fn test_jump_edges_and_level() {
        let mut input = manager(true);
        let now = Instant::now();

        input.handle_key(key(KeyCode::Char(' '), KeyEventKind::Press), now);
        let snap = input.sample(DT, now);
        assert!(snap.jump_pressed);
        assert!(snap.jump_held);
        assert!(!snap.jump_released);

        // Still held: level stays, edge does not repeat
        input.handle_key(key(KeyCode::Char(' '), KeyEventKind::Repeat), now);
        let snap = input.sample(DT, now);
        assert!(!snap.jump_pressed);
        assert!(snap.jump_held);

        input.handle_key(key(KeyCode::Char(' '), KeyEventKind::Release), now);
        let snap = input.sample(DT, now);
        assert!(!snap.jump_held);
        assert!(snap.jump_released);

        let snap = input.sample(DT, now);
        assert!(!snap.jump_released);
    }

    #[test]
    fn test_tap_within_one_tick_reports_both_edges() {
        let mut input = manager(true);
        let now = Instant::now();

        input.handle_key(key(KeyCode::Char(' '), KeyEventKind::Press), now);
        input.handle_key(key(KeyCode::Char(' '), KeyEventKind::Release), now);
        let snap = input.sample(DT, now);

        assert!(snap.jump_pressed);
        assert!(!snap.jump_held);
        assert!(snap.jump_released);
    }

    #[test]
    fn test_holds_expire_without_release_events() {
        let mut input = manager(false);
        let start = Instant::now();

        input.handle_key(key(KeyCode::Char(' '), KeyEventKind::Press), start);
        assert!(input.sample(DT, start).jump_held);

        let later = start + Duration::from_millis(1000);
        let snap = input.sample(DT, later);
        assert!(!snap.jump_held);
        assert!(snap.jump_released);
    }

    #[test]
    fn test_retap_within_timeout_reads_as_repeat_without_release_events() {
        let mut input = manager(false);
        let start = Instant::now();

        input.handle_key(key(KeyCode::Char(' '), KeyEventKind::Press), start);
        assert!(input.sample(DT, start).jump_pressed);

        // Without release reports a quick second tap looks like key repeat
        let retap = start + Duration::from_millis(300);
        input.handle_key(key(KeyCode::Char(' '), KeyEventKind::Press), retap);
        let snap = input.sample(DT, retap);
        assert!(!snap.jump_pressed);
        assert!(snap.jump_held);

        // Once the hold lapses, the next tap is a fresh press
        let lapsed = retap + Duration::from_millis(600);
        assert!(input.sample(DT, lapsed).jump_released);
        input.handle_key(key(KeyCode::Char(' '), KeyEventKind::Press), lapsed);
        assert!(input.sample(DT, lapsed).jump_pressed);
    }

    #[test]
    fn test_uppercase_and_alt_dash_binding() {
        let mut input = manager(true);
        let now = Instant::now();

        input.handle_key(key(KeyCode::Char('K'), KeyEventKind::Press), now);
        assert!(input.sample(DT, now).dash_pressed);
        assert!(!input.sample(DT, now).dash_pressed);
    }

    #[test]
    fn test_session_actions_only_on_press() {
        let mut input = manager(true);
        let now = Instant::now();

        assert_eq!(
            input.handle_key(key(KeyCode::Esc, KeyEventKind::Press), now),
            Some(InputAction::Quit)
        );
        assert_eq!(
            input.handle_key(key(KeyCode::Char('r'), KeyEventKind::Release), now),
            None
        );
    }

    #[test]
    fn test_axis_ramps_and_stays_in_range() {
        let mut input = manager(true);
        let now = Instant::now();

        input.handle_key(key(KeyCode::Char('d'), KeyEventKind::Press), now);
        let first = input.sample(DT, now).move_input.x;
        assert!(first > 0.0 && first < 1.0);

        for _ in 0..120 {
            input.sample(DT, now);
        }
        assert_eq!(input.move_input().x, 1.0);

        // Reversing snaps through zero instead of easing across
        input.handle_key(key(KeyCode::Char('d'), KeyEventKind::Release), now);
        input.handle_key(key(KeyCode::Char('a'), KeyEventKind::Press), now);
        let reversed = input.sample(DT, now).move_input.x;
        assert!(reversed < 0.0 && reversed >= -1.0);
    }

    #[test]
    fn test_axis_returns_to_rest() {
        let mut input = manager(true);
        let now = Instant::now();

        input.handle_key(key(KeyCode::Char('w'), KeyEventKind::Press), now);
        for _ in 0..60 {
            input.sample(DT, now);
        }
        input.handle_key(key(KeyCode::Char('w'), KeyEventKind::Release), now);
        for _ in 0..60 {
            input.sample(DT, now);
        }
        assert_eq!(input.move_input(), Vec2::ZERO);
    }

    #[test]
    fn test_accessors_reflect_last_sample() {
        let mut input = manager(true);
        let now = Instant::now();

        input.handle_key(key(KeyCode::Char(' '), KeyEventKind::Press), now);
        input.handle_key(key(KeyCode::Right, KeyEventKind::Press), now);
        let snap = input.sample(DT, now);

        assert_eq!(input.is_jump_pressed(), snap.jump_pressed);
        assert!(input.is_jump_held());
        assert!(!input.is_jump_released());
        assert!(!input.is_dash_pressed());
        assert_eq!(input.camera_turn(), 1.0);
    }

    #[test]
    fn test_focus_loss_releases_keys() {
        let mut input = manager(true);
        let now = Instant::now();

        input.handle_key(key(KeyCode::Char(' '), KeyEventKind::Press), now);
        input.sample(DT, now);
        input.release_all();
        let snap = input.sample(DT, now);
        assert!(snap.jump_released);
        assert!(!input.is_held(GameKey::Jump));
    }
}
