// Error types for the extraction service client

use std::fmt;

#[derive(Debug, Clone)]
pub enum ClientError {
    /// Blank URL input
    EmptyUrl,

    /// Non-empty input that matches no accepted URL shape
    InvalidUrl(String),

    /// Download triggered with nothing selected
    NoSelection,

    /// Format id passed on the command line that the catalog does not contain
    UnknownFormat(String),

    /// A lookup or download is already in flight
    Busy(&'static str),

    /// Error message reported by the service (surfaced verbatim)
    Remote(String),

    /// Non-2xx status without a parseable error body
    Status(u16),

    /// Response body could not be parsed as expected JSON
    Parse(String),

    /// Transport-level failure (connect, timeout, proxy)
    Network(String),

    /// Local filesystem failure while saving the payload
    Io(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "Please enter a video URL."),
            Self::InvalidUrl(_) => write!(
                f,
                "Please enter a valid YouTube video URL (e.g., youtube.com/watch?v=... or youtu.be/...)."
            ),
            Self::NoSelection => write!(f, "Please select at least one format."),
            Self::UnknownFormat(id) => write!(f, "Unknown format id: {}", id),
            Self::Busy(action) => write!(f, "A {} is already in progress", action),
            Self::Remote(msg) => write!(f, "{}", msg),
            Self::Status(code) => write!(f, "Server error: {}", code),
            Self::Parse(msg) => write!(f, "Unexpected response from server: {}", msg),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::Io(msg) => write!(f, "File error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Network("request timed out".to_string())
        } else if e.is_decode() {
            Self::Parse(e.to_string())
        } else {
            Self::Network(e.to_string())
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl ClientError {
    /// Input-validation errors are reported inline and never hit the network.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyUrl | Self::InvalidUrl(_) | Self::NoSelection | Self::UnknownFormat(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_errors_surface_verbatim() {
        let err = ClientError::Remote("This video is unavailable.".to_string());
        assert_eq!(err.to_string(), "This video is unavailable.");
    }

    #[test]
    fn test_status_error_message() {
        assert_eq!(ClientError::Status(502).to_string(), "Server error: 502");
    }

    #[test]
    fn test_validation_taxonomy() {
        assert!(ClientError::EmptyUrl.is_validation());
        assert!(ClientError::NoSelection.is_validation());
        assert!(!ClientError::Status(500).is_validation());
        assert!(!ClientError::Remote("x".into()).is_validation());
    }
}
