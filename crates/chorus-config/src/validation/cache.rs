use crate::schema::ChorusConfig;

use super::helpers::validate_range;

/// Validate cache sizing.
pub(crate) fn validate_cache(errors: &mut Vec<String>, config: &ChorusConfig) {
    validate_range(errors, "cache.capacity", config.cache.capacity, 1, 64);
    validate_range(errors, "cache.event_buffer", config.cache.event_buffer, 1, 4096);
}
