//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# ABCode dashboard configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[dev_server]
# enabled = true
# url = "http://localhost:5173"
# probe_timeout_ms = 500     # 50-5000

[panel]
# title = "ABCode Dashboard"
# dist_dir = "media/dist"    # relative to the working directory
# width = 900
# height = 1000
# retain_context_when_hidden = true
# devtools = false

[sync]
# ready_grace_ms = 1000      # 100-10000

[trigger]
# languages = ["python"]
# debounce_ms = 300          # 0-5000
# watch_workspace = true

[backend]
# origin = "http://localhost:8000"

[logging]
# level = "info"             # trace, debug, info, warn, error
"##
    .to_string()
}
