/// Gemini client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All provider interactions MUST go through this module.
///
/// Two call modes are exposed:
/// - grounded search: free-text generation augmented with Google Search,
///   returning text plus untyped citation metadata. The transport enforces
///   NO schema in this mode — callers must parse-then-validate.
/// - structured JSON: schema-constrained generation. The provider claims to
///   enforce the schema, but callers re-validate independently.
///
/// Model: gemini-2.5-flash (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all provider calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("provider returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: EmptyConfig,
}

#[derive(Debug, Serialize)]
struct EmptyConfig {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

/// Search-grounding citations. Chunks are arbitrary provider metadata and
/// pass through unparsed for display.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
}

impl GenerateResponse {
    /// Extracts the text of the first candidate's first text part.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.iter().find_map(|p| p.text.as_deref()))
    }

    /// Grounding citations of the first candidate, empty when absent.
    pub fn sources(&self) -> Vec<Value> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|m| m.grounding_chunks.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct GeminiApiError {
    error: GeminiApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiApiErrorBody {
    message: String,
}

/// Text plus pass-through citations from a grounded-search call.
#[derive(Debug, Clone)]
pub struct GroundedText {
    pub text: String,
    pub sources: Vec<Value>,
}

/// Provider abstraction carried in `AppState` as `Arc<dyn JobDataProvider>`.
/// Implement this to swap the backend without touching callers — tests
/// substitute fakes returning canned text.
#[async_trait]
pub trait JobDataProvider: Send + Sync {
    /// Search-grounded generation: free text that should contain a JSON
    /// array, plus citation metadata. Untrusted — no schema is enforced.
    async fn grounded_search(&self, prompt: &str) -> Result<GroundedText, GeminiError>;

    /// Schema-constrained generation returning the raw JSON text.
    async fn structured_json(&self, prompt: &str, schema: &Value) -> Result<String, GeminiError>;
}

/// The real Gemini client used in production. One call per request — a
/// failure propagates to the caller, which surfaces a retry affordance.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    async fn call(&self, request_body: &GeminiRequest<'_>) -> Result<GenerateResponse, GeminiError> {
        let url = format!("{GEMINI_API_URL}/{MODEL}:generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<GeminiApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let gemini_response: GenerateResponse = response.json().await?;

        if let Some(usage) = &gemini_response.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={:?}, candidate_tokens={:?}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(gemini_response)
    }
}

#[async_trait]
impl JobDataProvider for GeminiClient {
    async fn grounded_search(&self, prompt: &str) -> Result<GroundedText, GeminiError> {
        let request_body = GeminiRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            tools: Some(vec![Tool {
                google_search: EmptyConfig {},
            }]),
            generation_config: None,
        };

        let response = self.call(&request_body).await?;
        let sources = response.sources();
        // Empty text is not a transport error here: the caller classifies it
        // as an unusable payload while keeping any citations.
        let text = response.text().unwrap_or("").trim().to_string();

        Ok(GroundedText { text, sources })
    }

    async fn structured_json(&self, prompt: &str, schema: &Value) -> Result<String, GeminiError> {
        let request_body = GeminiRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            tools: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        };

        let response = self.call(&request_body).await?;
        response
            .text()
            .map(|t| t.trim().to_string())
            .ok_or(GeminiError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_text_reads_first_text_part() {
        let raw = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "[]" }] }
            }]
        });
        let response: GenerateResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.text(), Some("[]"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text_or_sources() {
        let response: GenerateResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.text(), None);
        assert!(response.sources().is_empty());
    }

    #[test]
    fn test_grounding_chunks_pass_through_untyped() {
        let raw = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "[]" }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://example.com", "title": "Example" } }
                    ]
                }
            }]
        });
        let response: GenerateResponse = serde_json::from_value(raw).unwrap();
        let sources = response.sources();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0]["web"]["title"], "Example");
    }

    #[test]
    fn test_grounded_request_serializes_search_tool() {
        let request = GeminiRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: "find jobs" }],
            }],
            tools: Some(vec![Tool {
                google_search: EmptyConfig {},
            }]),
            generation_config: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["tools"][0]["googleSearch"], json!({}));
        assert!(value.get("generationConfig").is_none());
    }

    #[test]
    fn test_structured_request_serializes_schema_config() {
        let schema = json!({ "type": "ARRAY" });
        let request = GeminiRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: "trend" }],
            }],
            tools: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &schema,
            }),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "ARRAY");
        assert!(value.get("tools").is_none());
    }
}
