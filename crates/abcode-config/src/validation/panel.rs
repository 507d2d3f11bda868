//! Panel, handshake, and trigger validation.

use crate::schema::AbcodeConfig;

use super::helpers::validate_range;

pub(crate) fn validate_panel(errors: &mut Vec<String>, config: &AbcodeConfig) {
    if config.panel.dist_dir.trim().is_empty() {
        errors.push("panel.dist_dir must not be empty".into());
    }
    validate_range(errors, "panel.width", config.panel.width, 200, 8192);
    validate_range(errors, "panel.height", config.panel.height, 200, 8192);
}

pub(crate) fn validate_sync(errors: &mut Vec<String>, config: &AbcodeConfig) {
    validate_range(
        errors,
        "sync.ready_grace_ms",
        config.sync.ready_grace_ms,
        100,
        10_000,
    );
}

pub(crate) fn validate_trigger(errors: &mut Vec<String>, config: &AbcodeConfig) {
    if config.trigger.languages.is_empty() {
        errors.push("trigger.languages must name at least one language".into());
    }
    if config.trigger.languages.iter().any(|l| l.trim().is_empty()) {
        errors.push("trigger.languages must not contain empty entries".into());
    }
    validate_range(
        errors,
        "trigger.debounce_ms",
        config.trigger.debounce_ms,
        0,
        5000,
    );
}
