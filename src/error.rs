//! Error types for the wxboard core.

use thiserror::Error;

/// Main error type for the wxboard core.
///
/// Every variant is fatal to the current fetch cycle; the core never retries.
/// The presentation layer is expected to show [`WxError::user_message`] and
/// keep the structured variant for logging.
#[derive(Error, Debug)]
pub enum WxError {
    /// Geocoding returned zero candidates for the requested location.
    #[error("no geocoding candidate found for location '{location}'")]
    NotFound { location: String },

    /// Transport failure or non-success HTTP status from any external fetch.
    #[error("fetch failed: {message}")]
    Fetch { message: String },

    /// Expected page structure (table count, label rows, value alignment)
    /// was not found or is inconsistent.
    #[error("unexpected page layout: {message}")]
    Layout { message: String },

    /// Input validation errors
    #[error("invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("configuration error: {message}")]
    Config { message: String },

    /// CSV export errors
    #[error("CSV export failed: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WxError {
    /// Create a new not-found error for a location query
    pub fn not_found<S: Into<String>>(location: S) -> Self {
        Self::NotFound {
            location: location.into(),
        }
    }

    /// Create a new fetch error
    pub fn fetch<S: Into<String>>(message: S) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create a new layout error
    pub fn layout<S: Into<String>>(message: S) -> Self {
        Self::Layout {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Short machine-readable kind, used by the API error body.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            WxError::NotFound { .. } => "not_found",
            WxError::Fetch { .. } => "fetch",
            WxError::Layout { .. } => "layout",
            WxError::Validation { .. } => "validation",
            WxError::Config { .. } => "config",
            WxError::Csv { .. } => "csv",
            WxError::Io { .. } => "io",
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WxError::NotFound { location } => {
                format!("No results for '{location}'. Please try a different location.")
            }
            WxError::Fetch { .. } => {
                "Unable to reach the weather service. Please check your internet connection and try again."
                    .to_string()
            }
            WxError::Layout { .. } => {
                "The weather page did not look as expected. Please try again later or with a different location."
                    .to_string()
            }
            WxError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WxError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            WxError::Csv { .. } | WxError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for WxError {
    fn from(err: reqwest::Error) -> Self {
        WxError::Fetch {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let not_found = WxError::not_found("Nowhere, ZZ");
        assert!(matches!(not_found, WxError::NotFound { .. }));

        let fetch = WxError::fetch("status 503");
        assert!(matches!(fetch, WxError::Fetch { .. }));

        let layout = WxError::layout("only 3 tables on page");
        assert!(matches!(layout, WxError::Layout { .. }));
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(WxError::not_found("x").kind(), "not_found");
        assert_eq!(WxError::fetch("x").kind(), "fetch");
        assert_eq!(WxError::layout("x").kind(), "layout");
        assert_eq!(WxError::validation("x").kind(), "validation");
    }

    #[test]
    fn test_user_messages() {
        let not_found = WxError::not_found("Atlantis");
        assert!(not_found.user_message().contains("Atlantis"));
        assert!(not_found.user_message().contains("different location"));

        let fetch = WxError::fetch("timed out");
        assert!(fetch.user_message().contains("Unable to reach"));

        let validation = WxError::validation("location cannot be empty");
        assert!(validation.user_message().contains("location cannot be empty"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let wx_err: WxError = io_err.into();
        assert!(matches!(wx_err, WxError::Io { .. }));
    }
}
