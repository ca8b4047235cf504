use std::io;
use std::time::Instant;

use ratatui::Terminal;
use tracing::info;

use crate::config::{Config, KeyBindings};
use crate::game::{InputAction, InputManager, World};
use crate::ui;
use crate::FIXED_TIMESTEP;

use super::common::{frame_duration, limit_frame_rate};

// How long the intro card stays up after a (re)start, in world seconds
const INTRO_SECONDS: f32 = 3.0;

/// Run the single-player arena until the quit key is pressed
pub fn run_game<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: &Config,
    release_events: bool,
) -> Result<(), io::Error> {
    info!(release_events, "game start");

    let mut world = World::new(config);
    let mut input = InputManager::new(&config.keybindings, &config.input, release_events);
    let budget = frame_duration(config.display.target_fps);
    let hint = controls_hint(&config.keybindings);
    let mut completion_logged = false;

    loop {
        let now = Instant::now();

        for action in input.poll_events()? {
            match action {
                InputAction::Quit => {
                    info!(score = world.manager.score(), "quit");
                    return Ok(());
                }
                InputAction::Restart => {
                    world.reset();
                    input.reset();
                    completion_logged = false;
                }
            }
        }

        input.sample(FIXED_TIMESTEP, now);

        // The arena freezes once every coin is collected
        if !world.all_coins_collected() {
            world.step(&input, FIXED_TIMESTEP);
        }

        let overlay = if world.all_coins_collected() {
            if !completion_logged {
                info!(score = world.manager.score(), time = world.now(), "all coins collected");
                completion_logged = true;
            }
            Some(ui::OverlayMessage::complete(
                world.manager.score(),
                world.now(),
                &config.keybindings,
            ))
        } else if world.now() < INTRO_SECONDS {
            Some(ui::OverlayMessage::intro(world.coins_total))
        } else {
            None
        };

        terminal.draw(|f| ui::render(f, &world, &config.display, &hint, overlay.as_ref()))?;

        limit_frame_rate(now, budget);
    }
}

fn controls_hint(keys: &KeyBindings) -> String {
    format!(
        "{}{}{}{}: Move  {}: Jump  {}/{}: Dash  {}/{}: Camera  {}: Restart  {}: Quit",
        keys.move_forward,
        keys.move_left,
        keys.move_back,
        keys.move_right,
        keys.jump,
        keys.dash,
        keys.dash_alt,
        keys.camera_left,
        keys.camera_right,
        keys.restart,
        keys.quit
    )
}
