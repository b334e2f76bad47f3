use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::ModelError;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings for the generative model, injected once at startup.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl AiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// A model that answers a prompt with JSON text conforming to `schema`.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<String, ModelError>;
}

/// Client for the Gemini `models/{model}:generateContent` endpoint.
pub struct GeminiClient {
    config: AiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: AiConfig) -> Self {
        Self {
            config: AiConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.config.base_url, self.config.model)
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<String, ModelError> {
        if self.config.api_key.is_empty() {
            return Err(ModelError::MissingApiKey);
        }

        debug!(model = %self.config.model, "Calling generateContent");

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request_body(prompt, schema))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ModelError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        extract_text(parsed)
    }
}

/// Request body asking for JSON output constrained by `schema`.
pub fn request_body(prompt: &str, schema: &Value) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }],
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": schema,
        },
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// Finish reasons that mean the content filter stopped generation.
const BLOCKING_FINISH_REASONS: &[&str] =
    &["SAFETY", "PROHIBITED_CONTENT", "BLOCKLIST", "SPII", "RECITATION"];

/// Pulls the concatenated text of the first candidate, turning content-filter
/// verdicts into `ModelError::Blocked`.
pub fn extract_text(response: GenerateContentResponse) -> Result<String, ModelError> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(ModelError::Blocked(reason));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(ModelError::EmptyResponse)?;

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if BLOCKING_FINISH_REASONS.contains(&reason) {
            return Err(ModelError::Blocked(reason.to_string()));
        }
    }

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ModelError::EmptyResponse);
    }
    Ok(text)
}

/// Google APIs wrap failures as `{"error": {"message": ..., "status": ...}}`.
/// Falls back to the raw body when it is not shaped like that.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct Envelope {
        error: Detail,
    }
    #[derive(Deserialize)]
    struct Detail {
        message: Option<String>,
        status: Option<String>,
    }

    match serde_json::from_str::<Envelope>(body) {
        Ok(Envelope { error }) => match (error.status, error.message) {
            (Some(status), Some(message)) => format!("{}: {}", status, message),
            (None, Some(message)) => message,
            (Some(status), None) => status,
            (None, None) => body.to_string(),
        },
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> GenerateContentResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn request_body_carries_schema() {
        let schema = json!({ "type": "OBJECT" });
        let body = request_body("hello", &schema);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn extracts_first_candidate_text() {
        let resp = parse(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}]},"finishReason":"STOP"}]}"#,
        );
        assert_eq!(extract_text(resp).unwrap(), r#"{"a":1}"#);
    }

    #[test]
    fn prompt_block_is_a_safety_error() {
        let resp = parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        assert!(matches!(extract_text(resp), Err(ModelError::Blocked(r)) if r == "SAFETY"));
    }

    #[test]
    fn safety_finish_reason_is_a_safety_error() {
        let resp = parse(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#);
        assert!(matches!(extract_text(resp), Err(ModelError::Blocked(_))));
    }

    #[test]
    fn missing_candidates_is_empty() {
        assert!(matches!(extract_text(parse("{}")), Err(ModelError::EmptyResponse)));
        let resp = parse(r#"{"candidates":[{"content":{"parts":[]},"finishReason":"STOP"}]}"#);
        assert!(matches!(extract_text(resp), Err(ModelError::EmptyResponse)));
    }

    #[test]
    fn google_error_envelope_is_unwrapped() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "INVALID_ARGUMENT: API key not valid.");
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
    }

    #[tokio::test]
    async fn empty_key_fails_without_network() {
        let client = GeminiClient::new(AiConfig::new(""));
        let err = client.generate_json("hi", &json!({})).await.unwrap_err();
        assert!(matches!(err, ModelError::MissingApiKey));
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let mut config = AiConfig::new("k");
        config.base_url = "http://localhost:9999/v1beta/".into();
        config.model = "m".into();
        let client = GeminiClient::new(config);
        assert_eq!(client.endpoint(), "http://localhost:9999/v1beta/models/m:generateContent");
    }
}
