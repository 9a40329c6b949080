//! Remote judgement client
//!
//! Sends raw review text to a hosted text-generation API wrapped in a
//! fixed instructional prompt and returns the generated text verbatim.
//! The review is deliberately not normalized first: surface noise such as
//! punctuation runs and gibberish is exactly what the prompt asks the
//! model to judge. No retries, no label parsing.

use serde_json::json;
use tracing::debug;

use crate::config::JudgeConfig;
use crate::errors::JudgeError;

/// Client for the generateContent endpoint of a hosted model.
pub struct RemoteJudge {
    config: JudgeConfig,
    client: reqwest::Client,
}

impl RemoteJudge {
    /// Create a client with the whole-request timeout from the config.
    pub fn new(config: JudgeConfig) -> Result<Self, JudgeError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| JudgeError::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a client configured from `VERIDICT_JUDGE_*` variables.
    pub fn from_env() -> Result<Self, JudgeError> {
        Self::new(JudgeConfig::from_env()?)
    }

    /// Ask the hosted model for a judgement on one review.
    ///
    /// One request, one response; a failure of any kind is returned to the
    /// caller as is.
    pub async fn judge(&self, review_text: &str) -> Result<String, JudgeError> {
        let prompt = build_prompt(review_text);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint, self.config.model
        );

        let payload = json!({
            "contents": [
                {
                    "parts": [
                        { "text": prompt }
                    ]
                }
            ]
        });

        debug!("Requesting judgement from model {}", self.config.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(JudgeError::Api { status, body });
        }

        let response_json: serde_json::Value = response.json().await?;
        extract_generated_text(&response_json)
    }
}

/// Embed review text into the fixed judgement prompt.
///
/// The instructional template is part of the judgement contract; changing
/// its wording changes what the hosted model is asked to do.
pub fn build_prompt(review_text: &str) -> String {
    format!(
        "Classify the following review as GENUINE or FAKE.\n\
         \n\
         Rules:\n\
         - GENUINE reviews have proper language, structure, and meaning.\n\
         - FAKE reviews contain excessive punctuation, random characters, gibberish, or lack clear intent.\n\
         \n\
         Respond with:\n\
         Label: GENUINE or FAKE\n\
         Reason: One short sentence. No special characters.\n\
         \n\
         Review:\n\
         {review_text}\n"
    )
}

/// Pull the generated text out of a generateContent response body.
///
/// Concatenates the text parts of the first candidate, which is what the
/// hosted API's own client libraries surface as the response text.
fn extract_generated_text(response: &serde_json::Value) -> Result<String, JudgeError> {
    let parts = response["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| {
            JudgeError::MalformedResponse("no content parts in first candidate".to_string())
        })?;

    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();

    if text.is_empty() {
        return Err(JudgeError::MalformedResponse(
            "candidate carries no generated text".to_string(),
        ));
    }

    Ok(text)
}
