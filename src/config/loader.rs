// Configuration loader
// Loads settings from an explicit path, ~/.moodbot/config.toml, or defaults

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::CONFIG_DIR_NAME;
use super::palette::PaletteOverrides;
use super::settings::{Config, DatasetConfig, TrainingParams};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlConfig {
    #[serde(default)]
    server: Option<TomlServer>,
    #[serde(default)]
    data: Option<TomlData>,
    #[serde(default)]
    training: Option<TomlTraining>,
    #[serde(default)]
    palette: Option<PaletteOverrides>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlServer {
    bind_address: Option<String>,
    max_body_bytes: Option<usize>,
    max_message_chars: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlData {
    chat: Option<TomlDataset>,
    emotion: Option<TomlDataset>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlDataset {
    path: Option<PathBuf>,
    input_column: Option<String>,
    label_column: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlTraining {
    c: Option<f64>,
    learning_rate: Option<f64>,
    max_iter: Option<usize>,
    tol: Option<f64>,
}

/// Load configuration.
///
/// An explicit `path` must exist. Without one, `~/.moodbot/config.toml` is
/// used when present; otherwise built-in defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                bail!("Configuration file not found: {}", p.display());
            }
            Some(p.to_path_buf())
        }
        None => default_config_path().filter(|p| p.exists()),
    };

    let Some(path) = path else {
        tracing::debug!("No config file, using defaults");
        return Ok(Config::default());
    };

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = parse_config(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// `~/.moodbot/config.toml`, if a home directory can be determined
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join("config.toml"))
}

/// Parse TOML text and apply it on top of the defaults
pub fn parse_config(contents: &str) -> Result<Config> {
    let toml_config: TomlConfig = toml::from_str(contents)?;
    let mut config = Config::default();

    if let Some(server) = toml_config.server {
        if let Some(addr) = server.bind_address {
            config.server.bind_address = addr;
        }
        if let Some(limit) = server.max_body_bytes {
            config.server.max_body_bytes = limit;
        }
        if let Some(limit) = server.max_message_chars {
            if limit == 0 {
                bail!("server.max_message_chars must be positive");
            }
            config.server.max_message_chars = limit;
        }
    }

    if let Some(data) = toml_config.data {
        if let Some(chat) = data.chat {
            apply_dataset(&mut config.data.chat, chat);
        }
        if let Some(emotion) = data.emotion {
            apply_dataset(&mut config.data.emotion, emotion);
        }
    }

    if let Some(training) = toml_config.training {
        apply_training(&mut config.training, training)?;
    }

    if let Some(palette) = toml_config.palette {
        config.palette.merge(palette);
    }

    Ok(config)
}

fn apply_dataset(target: &mut DatasetConfig, section: TomlDataset) {
    if let Some(path) = section.path {
        target.path = path;
    }
    if let Some(col) = section.input_column {
        target.input_column = col;
    }
    if let Some(col) = section.label_column {
        target.label_column = col;
    }
}

fn apply_training(target: &mut TrainingParams, section: TomlTraining) -> Result<()> {
    if let Some(c) = section.c {
        if c <= 0.0 {
            bail!("training.c must be positive, got {c}");
        }
        target.c = c;
    }
    if let Some(lr) = section.learning_rate {
        if lr <= 0.0 {
            bail!("training.learning_rate must be positive, got {lr}");
        }
        target.learning_rate = lr;
    }
    if let Some(max_iter) = section.max_iter {
        target.max_iter = max_iter;
    }
    if let Some(tol) = section.tol {
        target.tol = tol;
    }
    Ok(())
}
