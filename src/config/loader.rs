// Configuration file loading and creation

use super::types::Config;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("coin-dash");

    // Create config directory if it doesn't exist
    fs::create_dir_all(&path).ok();

    path.push("config.toml");
    path
}

/// Load configuration from `path_override` or the default location.
///
/// A missing file at the default location is created with defaults. A missing
/// override path is an error, since the user named it explicitly.
pub fn load_config(path_override: Option<&Path>) -> Result<Config, io::Error> {
    match path_override {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            Ok(parse_or_default(&contents))
        }
        None => {
            let config_path = get_config_path();
            if config_path.exists() {
                let contents = fs::read_to_string(&config_path)?;
                Ok(parse_or_default(&contents))
            } else {
                create_default_config(&config_path)?;
                Ok(Config::default())
            }
        }
    }
}

fn parse_or_default(contents: &str) -> Config {
    match toml::from_str(contents) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Failed to parse config file: {}", e);
            eprintln!("Using default configuration");
            Config::default()
        }
    }
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<(), io::Error> {
    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let commented_toml = format!(
        "# Coin Dash Configuration File\n\
         # Edit this file to tune the controller and the arena\n\
         # After editing, restart the game for changes to take effect\n\
         #\n\
         # Key binding format: \"Up\", \"Down\", \"Left\", \"Right\", \"Enter\", \"Esc\",\n\
         #                     \"Space\", \"Tab\", \"LeftShift\", \"RightShift\"\n\
         #                     or single characters like \"W\", \"K\", etc.\n\
         #\n\
         # Shift keys are only reported by terminals that support the keyboard\n\
         # enhancement protocol (kitty, foot, WezTerm, ...); use dash_alt elsewhere.\n\
         #\n\
         # Colors: RGB values from 0-255\n\n\
         {}",
        toml_string
    );

    fs::write(path, commented_toml)?;
    println!("Created default config file at: {}", path.display());
    Ok(())
}
