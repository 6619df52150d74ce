use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;

const COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const COMPLETION_TIMEOUT_SECS: u64 = 90;
const DEFAULT_TEMPERATURE: f32 = 0.1;

/// The closed set of LLM backends a caller can select. Extend by adding
/// enum members; an unknown selector string is an explicit
/// `UnsupportedBackend` failure upstream, never a silent miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmBackend {
    AtlasV2,
}

impl LlmBackend {
    pub fn from_selector(selector: &str) -> Option<Self> {
        match selector {
            "Atlas v2" => Some(LlmBackend::AtlasV2),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LlmBackend::AtlasV2 => "Atlas v2",
        }
    }

    pub fn model(&self) -> &'static str {
        match self {
            LlmBackend::AtlasV2 => "gpt-3.5-turbo-16k",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug)]
pub enum LlmError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
    ResponseError(String),
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            LlmError::HttpError(err) => write!(f, "HTTP error: {}", err),
            LlmError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl std::error::Error for LlmError {}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::HttpError(err)
    }
}

/// A conversational completion backend: fixed system prompt, rolling
/// history, one new user instruction, raw text back.
pub trait CompletionBackend {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        input: &str,
    ) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Live OpenAI chat-completions client backing `LlmBackend::AtlasV2`.
pub struct OpenAiClient {
    http_client: Client,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiClient {
    pub fn from_env(backend: LlmBackend) -> Result<Self, LlmError> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| LlmError::EnvironmentError("OPENAI_API_KEY not set".to_string()))?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(COMPLETION_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            model: backend.model().to_string(),
            temperature: DEFAULT_TEMPERATURE,
        })
    }
}

impl CompletionBackend for OpenAiClient {
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        input: &str,
    ) -> Result<String, LlmError> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(system_prompt));
        messages.extend_from_slice(history);
        messages.push(ChatMessage::user(input));

        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        };

        let response = self
            .http_client
            .post(COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::ResponseError(format!(
                "Completion request failed with status {}: {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::ResponseError(format!("Failed to parse response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LlmError::ResponseError("Response contained no choices".to_string()))
    }
}
