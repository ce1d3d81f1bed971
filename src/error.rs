use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a world or loading its configuration.
///
/// Stepping itself never fails; everything here happens before the first step.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration value.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Reading or writing a config/snapshot file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Malformed JSON in a config file.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_the_parameter() {
        let e = Error::InvalidParam("radius must be finite and > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("radius"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("{not json");
        let e: Error = parse.unwrap_err().into();
        assert!(matches!(e, Error::Json(_)));
    }
}
