//! Configuration module for zenflip
//!
//! Provides types and parsing for `zenflip.toml` settings.

pub mod loader;
pub mod schema;

pub use loader::{
    default_config, find_config, find_config_from, find_xdg_config, load_config,
    merge_cli_overrides, CliOverrides, ConfigError, CONFIG_FILE_NAME,
};
pub use schema::*;
