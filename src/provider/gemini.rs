use super::{ChatProvider, Conversation, UpstreamError};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl GeminiConfig {
    /// Creates a config with the default model and generation settings.
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
        }
    }
}

/// Gemini REST implementation of the chat capability.
#[derive(Clone)]
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Environment variable for the API key.
    pub const API_KEY_ENV: &'static str = "GEMINI_API_KEY";

    /// Creates a new Gemini provider.
    pub fn new(config: GeminiConfig) -> Result<Self, UpstreamError> {
        if config.api_key.is_empty() {
            return Err(UpstreamError::MissingApiKey("gemini".to_string()));
        }

        Ok(Self {
            config,
            client: Client::new(),
        })
    }

    /// Creates a provider from the environment.
    pub fn from_env() -> Result<Self, UpstreamError> {
        let api_key = std::env::var(Self::API_KEY_ENV)
            .map_err(|_| UpstreamError::MissingApiKey("gemini".to_string()))?;

        Self::new(GeminiConfig::new(api_key))
    }

    /// Overrides the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }
}

impl ChatProvider for GeminiProvider {
    type Conversation = GeminiConversation;

    fn new_conversation(&self) -> GeminiConversation {
        GeminiConversation {
            config: self.config.clone(),
            client: self.client.clone(),
            history: Vec::new(),
        }
    }
}

/// One running dialogue; history is kept client-side and replayed each turn.
pub struct GeminiConversation {
    config: GeminiConfig,
    client: Client,
    history: Vec<Content>,
}

impl Conversation for GeminiConversation {
    async fn send(&mut self, prompt: &str) -> Result<String, UpstreamError> {
        self.history.push(Content::user(prompt));

        match self.round_trip().await {
            Ok(text) => {
                self.history.push(Content::model(&text));
                Ok(text)
            }
            Err(e) => {
                // A failed turn is not kept in history.
                self.history.pop();
                Err(e)
            }
        }
    }
}

impl GeminiConversation {
    /// Number of turns (user and model) accumulated so far.
    pub fn turns(&self) -> usize {
        self.history.len()
    }

    async fn round_trip(&self) -> Result<String, UpstreamError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            BASE_URL, self.config.model, self.config.api_key
        );

        let request = GenerateRequest {
            contents: &self.history,
            generation_config: GenerationConfig::from(&self.config),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Request(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Malformed(e.to_string()))?;

        first_candidate_text(reply)
    }
}

/// One turn of the dialogue on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

impl Content {
    fn user(text: &str) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }

    fn model(text: &str) -> Self {
        Self {
            role: "model".to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: &'a [Content],
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "topP")]
    top_p: f64,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

impl From<&GeminiConfig> for GenerationConfig {
    fn from(config: &GeminiConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_p: config.top_p,
            top_k: config.top_k,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Extracts the text of the first candidate, concatenating its parts.
fn first_candidate_text(response: GenerateResponse) -> Result<String, UpstreamError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| UpstreamError::Malformed("reply contained no candidates".to_string()))?;

    let content = candidate
        .content
        .ok_or_else(|| UpstreamError::Malformed("candidate contained no content".to_string()))?;

    if content.parts.is_empty() {
        return Err(UpstreamError::Malformed(
            "candidate content contained no parts".to_string(),
        ));
    }

    Ok(content
        .parts
        .into_iter()
        .map(|part| part.text)
        .collect::<Vec<_>>()
        .join(""))
}
