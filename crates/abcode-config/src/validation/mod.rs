//! Full configuration validation.
//!
//! Each domain has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod network;
mod panel;


use crate::schema::AbcodeConfig;
use abcode_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &AbcodeConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    network::validate_dev_server(&mut errors, config);
    network::validate_backend(&mut errors, config);
    panel::validate_panel(&mut errors, config);
    panel::validate_sync(&mut errors, config);
    panel::validate_trigger(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
