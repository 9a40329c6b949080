//! Judge configuration from the environment

use std::env;
use std::time::Duration;

use crate::errors::JudgeError;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the hosted text-generation API.
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    /// Base URL of the API, without a trailing slash.
    pub endpoint: String,
    /// Hosted model identifier.
    pub model: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Whole-request timeout in seconds.
    pub timeout_seconds: u64,
}

impl JudgeConfig {
    /// Build a config from `VERIDICT_JUDGE_*` environment variables.
    ///
    /// Endpoint, model and timeout fall back to defaults when unset or
    /// blank. The API key has no default and no fallback; a missing key is
    /// a configuration error, never an empty-string request.
    pub fn from_env() -> Result<Self, JudgeError> {
        let api_key = env::var("VERIDICT_JUDGE_API_KEY")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                JudgeError::Config(
                    "Missing required secret: VERIDICT_JUDGE_API_KEY. Provide via environment variable."
                        .to_string(),
                )
            })?;

        let endpoint = env::var("VERIDICT_JUDGE_ENDPOINT")
            .ok()
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let model = env::var("VERIDICT_JUDGE_MODEL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_seconds = env::var("VERIDICT_JUDGE_TIMEOUT")
            .ok()
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            endpoint,
            model,
            api_key,
            timeout_seconds,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
