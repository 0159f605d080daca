use thiserror::Error;

/// Failure talking to the booking API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Please log in to continue")]
    Unauthorized,

    #[error("Request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message supplied by the server, if it sent one.
    pub fn message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Transport(other.to_string()),
        }
    }
}

/// Errors surfaced by the booking and review workflows. `Display` is the text
/// shown to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    #[error("Please log in to continue")]
    AuthRequired,

    #[error("{0}")]
    ValidationError(String),

    #[error("You can only review properties you have completed stays at")]
    NotEligible,

    #[error("You have already reviewed this stay")]
    AlreadyReviewed,

    #[error("{0}")]
    Api(String),

    #[error("A submission is already in progress")]
    InFlight,
}

impl WorkflowError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        WorkflowError::ValidationError(message.into())
    }

    /// Wraps an API failure, passing the server's message through when present.
    pub(crate) fn from_api(err: &ApiError, fallback: &str) -> Self {
        let message = match err {
            ApiError::Unauthorized => return WorkflowError::AuthRequired,
            other => other.message().unwrap_or(fallback),
        };
        WorkflowError::Api(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_message_passthrough() {
        let err = ApiError::Status {
            status: 409,
            message: Some("Dates are no longer available".to_string()),
        };
        assert_eq!(
            WorkflowError::from_api(&err, "fallback"),
            WorkflowError::Api("Dates are no longer available".to_string())
        );
    }

    #[test]
    fn test_api_fallback_message() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(
            WorkflowError::from_api(&err, "Booking failed. Please try again.").to_string(),
            "Booking failed. Please try again."
        );
    }

    #[test]
    fn test_unauthorized_maps_to_auth_required() {
        assert_eq!(
            WorkflowError::from_api(&ApiError::Unauthorized, "fallback"),
            WorkflowError::AuthRequired
        );
    }

    #[test]
    fn test_not_eligible_text() {
        assert_eq!(
            WorkflowError::NotEligible.to_string(),
            "You can only review properties you have completed stays at"
        );
    }
}
