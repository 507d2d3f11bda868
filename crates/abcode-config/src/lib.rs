//! ABCode configuration system.
//!
//! TOML-based configuration with validation. All config sections use
//! sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! let config = abcode_config::load_config().expect("failed to load config");
//! println!("dev server: {}", config.dev_server.url);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{AbcodeConfig, CONFIG_SCHEMA_VERSION};

use abcode_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path, creating it if missing,
/// and validate the result.
pub fn load_config() -> Result<AbcodeConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load and validate config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<AbcodeConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}
