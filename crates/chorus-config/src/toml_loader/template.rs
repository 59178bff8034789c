//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# CHORUS frame cache configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[cache]
# capacity = 5           # 1-64 frames kept alive
# overflow = "exceed"    # exceed, evict_active, reject
# event_buffer = 64      # 1-4096

[resolver]
# session_url_template = "https://chorus.localhost/workspaces/{workspace}/sessions/{session}"
# session_name_template = "Session {session}"

# [[webapps]]
# id = "jupyter"
# name = "JupyterLab"
# url = "https://jupyter.example.org/lab"

[readiness]
# poll_interval_ms = 1000   # 100-60000
# timeout_secs = 120        # 1-3600

[logging]
# level = "info"         # trace, debug, info, warn, error
"##
}
