use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::GroundedSearchClient;
use crate::domain::{Citation, DomainError, GroundedAnswer};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const MODEL_ENV: &str = "GEMINI_MODEL";
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";

/// Shown verbatim when no credential is configured.
pub const MISSING_API_KEY_MESSAGE: &str = "GEMINI_API_KEY is not set. \
Export your Gemini API key (export GEMINI_API_KEY=...) and restart visualsearch.";

const API_VERSION_PATH: &str = "/v1beta/models";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Connection settings for [`GeminiClient`], resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl GeminiConfig {
    /// Read configuration from the environment:
    ///
    /// | Variable          | Default                                     |
    /// |-------------------|---------------------------------------------|
    /// | `GEMINI_API_KEY`  | absent (searches fail with a config error)  |
    /// | `GEMINI_MODEL`    | `gemini-2.5-flash`                          |
    /// | `GEMINI_BASE_URL` | `https://generativelanguage.googleapis.com` |
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok(),
            model: std::env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var(BASE_URL_ENV)
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        }
        .normalized()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self.normalized()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    // A blank key is the same as no key.
    fn normalized(mut self) -> Self {
        self.api_key = self
            .api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    tools: Vec<Tool>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

// Every hop below is optional; absent fields deserialize to empty values.
// Grounding data is best effort: a hop with the wrong JSON type (null, a
// number where a string belongs) also degrades to empty.

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
    #[serde(deserialize_with = "lenient")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(deserialize_with = "lenient")]
    grounding_metadata: Option<GroundingMetadata>,
    #[serde(deserialize_with = "lenient")]
    finish_reason: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct GroundingMetadata {
    #[serde(deserialize_with = "lenient_items")]
    grounding_chunks: Vec<GroundingChunk>,
    #[serde(deserialize_with = "lenient_items")]
    web_search_queries: Vec<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GroundingChunk {
    #[serde(deserialize_with = "lenient")]
    web: Option<WebChunk>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct WebChunk {
    #[serde(deserialize_with = "lenient")]
    uri: Option<String>,
    #[serde(deserialize_with = "lenient")]
    title: Option<String>,
}

/// Deserialize `T`, falling back to `T::default()` when the value has the
/// wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Deserialize a list item by item. A non-array yields an empty list and a
/// malformed item yields `T::default()` in its slot.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .map(|item| T::deserialize(item).unwrap_or_default())
        .collect())
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// HTTP client for the Gemini `generateContent` API with the Google Search
/// grounding tool enabled.
///
/// Implements [`GroundedSearchClient`]. The credential is injected through
/// [`GeminiConfig`]; when it is absent every call fails with
/// [`DomainError::Configuration`] before any request is built.
///
/// No timeout, retry or backoff is applied: one best-effort request per call.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    /// Full endpoint URL (base + version path + model + method).
    url: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let config = config.normalized();
        let base = config.base_url.trim_end_matches('/');
        let url = format!(
            "{base}{API_VERSION_PATH}/{}:generateContent",
            config.model
        );
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key,
            model: config.model,
            url,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.url
    }

    fn into_answer(response: GenerateContentResponse) -> Result<GroundedAnswer, DomainError> {
        let Some(candidate) = response.candidates.into_iter().next() else {
            let reason = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .map(|r| format!(" (blocked: {r})"))
                .unwrap_or_default();
            return Err(DomainError::provider(format!(
                "Gemini returned no answer for this query{reason}"
            )));
        };

        if let Some(reason) = candidate.finish_reason.as_deref() {
            debug!("GeminiClient: finish reason {reason}");
        }

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
            .unwrap_or_default();

        let metadata = candidate.grounding_metadata.unwrap_or_default();
        if !metadata.web_search_queries.is_empty() {
            debug!(
                "GeminiClient: grounded with web searches {:?}",
                metadata.web_search_queries
            );
        }

        let citations = metadata
            .grounding_chunks
            .into_iter()
            .map(|chunk| {
                let web = chunk.web.unwrap_or_default();
                Citation::new(web.title, web.uri)
            })
            .collect();

        Ok(GroundedAnswer::new(text, citations))
    }

    fn error_message(status: reqwest::StatusCode, body: &str) -> String {
        serde_json::from_str::<ApiErrorEnvelope>(body)
            .ok()
            .and_then(|e| e.error.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Gemini API returned {status}"))
    }
}

#[async_trait]
impl GroundedSearchClient for GeminiClient {
    async fn generate_grounded(&self, prompt: &str) -> Result<GroundedAnswer, DomainError> {
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("GeminiClient: no API key configured, skipping request");
            return Err(DomainError::configuration(MISSING_API_KEY_MESSAGE));
        };

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("Gemini request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::provider(format!("Gemini response could not be read: {e}")))?;

        if !status.is_success() {
            warn!("GeminiClient: API returned {status}: {body}");
            return Err(DomainError::provider(Self::error_message(status, &body)));
        }

        let api_response: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            DomainError::provider(format!("Gemini response could not be parsed: {e}"))
        })?;

        Self::into_answer(api_response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
