//! Configuration for obrand
//!
//! Supports:
//! - `~/.config/obrand/config.toml` - Global settings
//! - `OBRAND_ETC_DIR` - Base installation directory override

pub mod settings;
pub mod types;

pub use settings::{
    default_config_path, load_default_settings, load_settings, resolve_etc_dir, CONFIG_FILENAME,
    ETC_DIR_ENV,
};
pub use types::*;
