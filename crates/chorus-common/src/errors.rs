use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config watch error: {0}")]
    WatchError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ChorusError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("iframe cache error: {0}")]
    Cache(String),

    #[error("resolver error: {0}")]
    Resolver(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("cache.capacity = 0 is out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: cache.capacity = 0 is out of range"
        );

        let err = ConfigError::WatchError("inotify limit reached".into());
        assert_eq!(err.to_string(), "config watch error: inotify limit reached");
    }

    #[test]
    fn chorus_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: ChorusError = config_err.into();
        assert!(matches!(err, ChorusError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn chorus_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "script missing");
        let err: ChorusError = io_err.into();
        assert!(matches!(err, ChorusError::Io(_)));
        assert!(err.to_string().contains("script missing"));
    }

    #[test]
    fn chorus_error_string_variants() {
        let err = ChorusError::Cache("capacity exhausted".into());
        assert_eq!(err.to_string(), "iframe cache error: capacity exhausted");

        let err = ChorusError::Resolver("session not found".into());
        assert_eq!(err.to_string(), "resolver error: session not found");
    }
}
