//! Dev-server and backend validation.

use crate::schema::AbcodeConfig;

use super::helpers::{validate_http_url, validate_range};

pub(crate) fn validate_dev_server(errors: &mut Vec<String>, config: &AbcodeConfig) {
    validate_http_url(errors, "dev_server.url", &config.dev_server.url);
    validate_range(
        errors,
        "dev_server.probe_timeout_ms",
        config.dev_server.probe_timeout_ms,
        50,
        5000,
    );
}

pub(crate) fn validate_backend(errors: &mut Vec<String>, config: &AbcodeConfig) {
    validate_http_url(errors, "backend.origin", &config.backend.origin);
}
