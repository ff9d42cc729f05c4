//! Error types
//!
//! One error enum covers every recoverable failure in the crate. Nothing in the
//! annotation core returns an error: a missing time source makes actions no-ops
//! instead. Errors come from input validation, the local store, the remote
//! scouting API and configuration loading.

use std::fmt;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ScoutError>;

/// A single form field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name as shown next to the input (e.g. `teamNumber`).
    pub field: &'static str,
    /// User-facing message.
    pub message: String,
}

/// Every failing field of a submitted form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub errors: Vec<FieldError>,
}

impl FormErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message reported for a field, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join(" "))
    }
}

/// The main error type.
///
/// # Error Categories
///
/// - **Input validation**: bad video URL, missing form fields, non-numeric team number
/// - **Persistence**: the local document store could not be read or written
/// - **Remote API**: non-2xx responses or a malformed `{ data }` envelope
/// - **Configuration**: unreadable config file or missing base URL
/// - **Server**: the local read endpoints could not bind
#[derive(Error, Debug)]
pub enum ScoutError {
    /// A single rejected input, such as an unsupported video link.
    #[error("{0}")]
    Validation(String),

    /// One or more form fields were rejected.
    #[error("Invalid form: {0}")]
    InvalidForm(FormErrors),

    /// The document store rejected a read or write.
    #[error("Store error: {0}")]
    Store(String),

    /// A referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// General I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The remote scouting API answered with a non-success status.
    #[error("Scouting API request failed ({status} {reason}){detail}", detail = format_detail(.body))]
    Api {
        status: u16,
        reason: String,
        body: String,
    },

    /// The remote scouting API answered without a `data` key.
    #[error("Scouting API response missing `data`.")]
    MissingData,

    /// No scouting API base URL was configured.
    #[error("Missing SCOUTING_APP_URL env variable.")]
    MissingBaseUrl,

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration file or value problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The local HTTP server could not start.
    #[error("Server error: {0}")]
    Server(String),
}

fn format_detail(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {}", body)
    }
}

impl From<toml::de::Error> for ScoutError {
    fn from(err: toml::de::Error) -> Self {
        ScoutError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let error = ScoutError::Validation("Only YouTube links are supported.".to_string());
        assert_eq!(error.to_string(), "Only YouTube links are supported.");
    }

    #[test]
    fn test_api_error_display_with_body() {
        let error = ScoutError::Api {
            status: 502,
            reason: "Bad Gateway".to_string(),
            body: "upstream down".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Scouting API request failed (502 Bad Gateway): upstream down"
        );
    }

    #[test]
    fn test_api_error_display_without_body() {
        let error = ScoutError::Api {
            status: 404,
            reason: "Not Found".to_string(),
            body: String::new(),
        };
        assert_eq!(error.to_string(), "Scouting API request failed (404 Not Found)");
    }

    #[test]
    fn test_form_errors_lookup() {
        let mut errors = FormErrors::default();
        errors.push("userName", "Name is required.");
        errors.push("teamNumber", "Team number must be a number.");
        assert_eq!(errors.message_for("teamNumber"), Some("Team number must be a number."));
        assert_eq!(errors.message_for("eventCode"), None);
        assert_eq!(
            ScoutError::InvalidForm(errors).to_string(),
            "Invalid form: Name is required. Team number must be a number."
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: ScoutError = io_error.into();
        assert!(matches!(error, ScoutError::Io(_)));
        assert!(error.to_string().contains("IO error"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("fps = = 3");
        let error: ScoutError = parsed.unwrap_err().into();
        assert!(matches!(error, ScoutError::Config(_)));
    }
}
