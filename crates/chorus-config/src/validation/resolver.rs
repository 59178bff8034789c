//! Validation for session templates and the webapp table.

use std::collections::HashSet;

use crate::schema::ChorusConfig;

use super::helpers::{is_valid_frame_id, validate_http_url};

/// Both session templates must reference the session id, and the URL template
/// must also place the workspace.
pub(crate) fn validate_resolver(errors: &mut Vec<String>, config: &ChorusConfig) {
    let resolver = &config.resolver;

    if !resolver.session_url_template.contains("{session}") {
        errors.push("resolver.session_url_template is missing {session}".to_string());
    }
    if !resolver.session_url_template.contains("{workspace}") {
        errors.push("resolver.session_url_template is missing {workspace}".to_string());
    }
    if !resolver.session_name_template.contains("{session}") {
        errors.push("resolver.session_name_template is missing {session}".to_string());
    }

    let sample = resolver
        .session_url_template
        .replace("{workspace}", "ws")
        .replace("{session}", "s");
    validate_http_url(errors, "resolver.session_url_template", &sample);
}

/// Webapp ids must be unique and well formed; every entry needs a name and an
/// http(s) URL.
pub(crate) fn validate_webapps(errors: &mut Vec<String>, config: &ChorusConfig) {
    let mut seen = HashSet::new();

    for (i, app) in config.webapps.iter().enumerate() {
        if !is_valid_frame_id(&app.id) {
            errors.push(format!("webapps[{i}].id = {:?} is not a valid id", app.id));
        } else if !seen.insert(app.id.as_str()) {
            errors.push(format!("webapps[{i}].id = {:?} is a duplicate", app.id));
        }

        if app.name.trim().is_empty() {
            errors.push(format!("webapps[{i}].name is empty"));
        }

        validate_http_url(errors, &format!("webapps[{i}].url"), &app.url);
    }
}
