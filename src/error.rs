//! Errors at the configuration and persistence edge
//!
//! The simulation itself never fails; only loading/saving files does.

use std::fmt;

/// Crate error type
#[derive(Debug)]
pub enum Error {
    /// Reading or writing a file failed
    Io(std::io::Error),
    /// A document was not valid JSON for the expected type
    Json(serde_json::Error),
    /// Settings parsed but describe an unplayable configuration
    InvalidSettings(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {}", err),
            Error::Json(err) => write!(f, "json error: {}", err),
            Error::InvalidSettings(reason) => write!(f, "invalid settings: {}", reason),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::InvalidSettings(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_failure() {
        let err = Error::InvalidSettings("gap_min > gap_max".to_string());
        assert_eq!(err.to_string(), "invalid settings: gap_min > gap_max");

        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.to_string().starts_with("json error"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
