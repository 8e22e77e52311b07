// src/error.rs
use thiserror::Error;

/// Failures of a single user action against the matching backend.
///
/// None of these are retried; the view turns each one into a panel, an alert
/// or a notice and the user re-triggers the action.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("API request failed with status {status}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Transport(String),

    /// A request URL could not be built; nothing was sent.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Unexpected response shape: {0}")]
    Schema(String),

    #[error("Please submit a job search first to generate an email.")]
    MissingJob,

    #[error("Failed to copy to clipboard: {0}")]
    Clipboard(String),

    #[error("Host action failed: {0}")]
    Host(String),
}

impl ClientError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Schema(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_carries_code() {
        let err = ClientError::Status {
            status: 503,
            body: "down".to_string(),
        };
        assert_eq!(err.to_string(), "API request failed with status 503");
        assert_eq!(err.status_code(), Some(503));
    }

    #[test]
    fn test_schema_from_serde() {
        let err: ClientError = serde_json::from_str::<Vec<u32>>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, ClientError::Schema(_)));
        assert_eq!(err.status_code(), None);
    }
}
