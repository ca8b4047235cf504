mod config;
mod debug;
mod game;
mod game_modes;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableFocusChange, EnableFocusChange, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing::info;

const FIXED_TIMESTEP: f32 = 1.0 / 60.0; // Fixed timestep for deterministic simulation

/// Command line options
#[derive(Debug, Default)]
struct CliOptions {
    debug: bool,
    config_path: Option<PathBuf>,
    print_config: bool,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    if options.print_config {
        let defaults = toml::to_string_pretty(&config::Config::default())
            .context("failed to serialize default config")?;
        println!("{}", defaults);
        return Ok(());
    }

    let config = config::load_config(options.config_path.as_deref())
        .context("failed to load configuration")?;

    debug::init(options.debug).context("failed to initialise debug log")?;
    info!(config_path = ?options.config_path, "Coin Dash session started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;

    // Key release events are only reported with the enhancement protocol
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    // Run game
    let result = game_modes::run_game(&mut terminal, &config, release_events);

    // Restore terminal
    if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result.context("game loop failed")
}

/// Parse command line arguments
fn parse_args(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--debug" | "-d" => options.debug = true,
            "--config" | "-c" => match rest.next() {
                Some(path) => options.config_path = Some(PathBuf::from(path)),
                None => {
                    eprintln!("Error: --config requires a path");
                    eprintln!("Usage: {} --config <path>", args[0]);
                    std::process::exit(1);
                }
            },
            "--print-config" => options.print_config = true,
            "--help" | "-h" => {
                print_usage(&args[0]);
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage(&args[0]);
                std::process::exit(1);
            }
        }
    }

    options
}

fn print_usage(program: &str) {
    println!("Coin Dash - terminal platformer prototype");
    println!();
    println!("Usage:");
    println!("  {}                     # Play with the default config", program);
    println!("  {} --config <path>     # Play with a specific config file", program);
    println!("  {} --debug             # Write a debug log to {}", program, debug::LOG_FILE_PATH);
    println!("  {} --print-config      # Print the default config and exit", program);
    println!();
    println!("Note: the config file is created on first run at:");
    println!("      {}", config::loader::get_config_path().display());
    println!("      Shift-to-dash needs a terminal with the keyboard enhancement");
    println!("      protocol (kitty, foot, WezTerm); elsewhere use the dash_alt key.");
}
