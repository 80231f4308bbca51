// Configuration module
// Public interface for configuration loading

pub mod constants;
mod loader;
mod palette;
mod settings;

pub use loader::{default_config_path, load_config, parse_config};
pub use palette::{Palette, PaletteOverrides};
pub use settings::{Config, DataConfig, DatasetConfig, ServerConfig, TrainingParams};
