use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, ShiftTapError};
use crate::state::StateSource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_state_file")]
    pub state_file: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            output_dir: default_output_dir(),
        }
    }
}

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// `~/.config/shifttap/config.json`
pub fn config_path() -> PathBuf {
    home().join(".config/shifttap/config.json")
}

fn data_file(name: &str) -> String {
    home()
        .join("Documents/shifttap")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

fn default_state_file() -> String {
    data_file("state.json")
}

fn default_output_dir() -> String {
    data_file("exports")
}

pub fn load_config() -> Config {
    load_config_from(&config_path())
}

/// Missing file means defaults; an unreadable one is logged and ignored.
pub fn load_config_from(path: &Path) -> Config {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Config::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read config, using defaults");
            return Config::default();
        }
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "invalid config, using defaults");
        Config::default()
    })
}

pub fn save_config(config: &Config) -> Result<()> {
    save_config_to(config, &config_path())
}

pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| ShiftTapError::Config(e.to_string()))?;
    std::fs::write(path, json + "\n")?;
    Ok(())
}

/// The state source for a command: an explicit `--state` path wins over
/// the configured one.
pub fn resolve_state_source(explicit: Option<&str>, config: &Config) -> StateSource {
    match explicit {
        Some(p) => StateSource::new(shellexpand_path(p)),
        None => StateSource::new(shellexpand_path(&config.state_file)),
    }
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
