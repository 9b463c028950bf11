// error.rs: Error types for plan review, reject, and apply operations.

use thiserror::Error;

/// Structured failure returned by the reject operation.
///
/// `code` is whatever machine-readable tag the server attached; it is carried
/// through untouched and only used in logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{msg}")]
pub struct RejectError {
    pub msg: String,
    pub code: Option<String>,
}

impl RejectError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            code: None,
        }
    }
}

/// Failure of the batch apply that runs after the review loop ends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{msg}")]
pub struct ApplyError {
    pub msg: String,
}

impl ApplyError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Errors raised while talking to the plan server outside of reject/apply.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced a response (connect, TLS, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {msg}")]
    Server { status: u16, msg: String },

    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Fatal conditions produced when interpreting a finished review.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Rejecting a file failed on the server; the review was aborted.
    #[error("Server error: {}", .0.msg)]
    Server(RejectError),

    /// Applying the confirmed changes failed.
    #[error("Apply failed: {}", .0.msg)]
    Apply(ApplyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_error_messages_carry_the_server_text() {
        let err = ReviewError::Server(RejectError {
            msg: "plan not found".to_owned(),
            code: Some("not_found".to_owned()),
        });
        assert_eq!(err.to_string(), "Server error: plan not found");

        let err = ReviewError::Apply(ApplyError::new("disk full"));
        assert_eq!(err.to_string(), "Apply failed: disk full");
    }
}
