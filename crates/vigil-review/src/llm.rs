use reqwest::Client;
use serde::{Deserialize, Serialize};

use vigil_core::VigilError;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Client for the Gemini `generateContent` REST API.
///
/// One request per pipeline run; no retries, no timeout beyond the HTTP
/// library default.
///
/// # Examples
///
/// ```
/// use vigil_review::llm::GeminiClient;
///
/// let client = GeminiClient::new("test-key", "gemini-2.5-flash", None).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    url: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client for the given API key and model.
    ///
    /// `endpoint` overrides the API base URL; tests point it at a local
    /// mock server.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::BackendUnreachable`] if the HTTP client cannot
    /// be built.
    pub fn new(
        api_key: &str,
        model: &str,
        endpoint: Option<&str>,
    ) -> Result<Self, VigilError> {
        let base = endpoint.unwrap_or(DEFAULT_ENDPOINT).trim_end_matches('/');
        let url = format!("{base}/v1beta/models/{model}:generateContent");
        let http = Client::builder()
            .user_agent(concat!("vigil/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                VigilError::BackendUnreachable(format!("failed to build HTTP client: {e}"))
            })?;
        Ok(Self {
            http,
            url,
            api_key: api_key.to_string(),
        })
    }

    /// Send one generation request and return the model's text.
    ///
    /// # Errors
    ///
    /// Returns [`VigilError::BackendUnreachable`] on transport failure and
    /// [`VigilError::BackendRejected`] on a non-success status (bad key,
    /// exhausted quota) or a response body without message content.
    pub async fn generate(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<String, VigilError> {
        let payload = GenerateRequest {
            system_instruction: InstructionContent {
                parts: vec![Part {
                    text: Some(system_instruction.to_string()),
                }],
            },
            contents: vec![RequestContent {
                role: "user".into(),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self
            .http
            .post(&self.url)
            .query(&[("key", &self.api_key)])
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                VigilError::BackendUnreachable(format!("generateContent request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VigilError::BackendRejected(format!(
                "Gemini API error {status}: {body}"
            )));
        }

        let message: GenerateResponse = response.json().await.map_err(|e| {
            VigilError::BackendRejected(format!("failed to parse Gemini response: {e}"))
        })?;

        message
            .candidates
            .into_iter()
            .flat_map(|candidate| candidate.content.parts)
            .filter_map(|part| part.text)
            .next()
            .ok_or_else(|| {
                VigilError::BackendRejected("Gemini response missing message content".into())
            })
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: InstructionContent,
    contents: Vec<RequestContent>,
}

#[derive(Serialize)]
struct InstructionContent {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct RequestContent {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<Part>,
}
