use crate::schema::ChorusConfig;

use super::helpers::validate_range;

/// Validate readiness polling.
pub(crate) fn validate_readiness(errors: &mut Vec<String>, config: &ChorusConfig) {
    validate_range(
        errors,
        "readiness.poll_interval_ms",
        config.readiness.poll_interval_ms,
        100,
        60_000,
    );
    validate_range(
        errors,
        "readiness.timeout_secs",
        config.readiness.timeout_secs,
        1,
        3600,
    );
}
