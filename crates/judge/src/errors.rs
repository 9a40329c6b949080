//! Remote judgement error types

use thiserror::Error;

/// Errors raised while configuring or calling the remote judgement API.
#[derive(Error, Debug)]
pub enum JudgeError {
    /// Required configuration is missing or unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failure: connect, TLS, timeout
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-success status
    #[error("API request failed: {status} - {body}")]
    Api { status: u16, body: String },

    /// The API answered successfully but the body carried no generated text
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for JudgeError {
    fn from(err: reqwest::Error) -> Self {
        JudgeError::Network(err.to_string())
    }
}
