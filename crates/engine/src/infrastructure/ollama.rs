//! Ollama-style text generation client (`/api/generate`, non-streaming).

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::infrastructure::config::{BasicAuth, ConfigError, InferenceConfig};
use crate::infrastructure::ports::{InferenceError, InferencePort};

/// How much of a response body goes into log lines.
const LOG_SNIPPET_CHARS: usize = 500;

/// Client for a single-prompt generation endpoint.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    endpoint: String,
    credentials: Option<BasicAuth>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OllamaClient {
    pub fn new(config: &InferenceConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            credentials: config.credentials.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl InferencePort for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, InferenceError> {
        let payload = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
                num_predict: self.max_tokens,
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(auth) = &self.credentials {
            request = request.basic_auth(&auth.username, Some(&auth.password));
        }

        let started = Instant::now();
        let response = request.send().await.map_err(classify_transport_error)?;
        let status = response.status();

        tracing::info!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            model = %self.model,
            "Inference response received"
        );

        if status != StatusCode::OK {
            let headers = format!("{:?}", response.headers());
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => format!("<unreadable body: {e}>"),
            };
            tracing::warn!(
                status = status.as_u16(),
                headers = %headers,
                body = %snippet(&body),
                "Inference backend returned an error status"
            );
            return Err(InferenceError::from_status(status.as_u16(), &body, &self.model));
        }

        let body = response.text().await.map_err(classify_transport_error)?;
        tracing::debug!(body = %snippet(body.trim()), "Raw inference response");
        Ok(body)
    }
}

/// Map a reqwest failure onto the backend taxonomy.
fn classify_transport_error(error: reqwest::Error) -> InferenceError {
    let classified = if error.is_timeout() {
        InferenceError::Timeout
    } else if error.is_connect() {
        InferenceError::Connection(error.to_string())
    } else if error.is_request() || error.is_body() || error.is_decode() || error.is_redirect() {
        InferenceError::Transport(error.to_string())
    } else {
        InferenceError::Unexpected(error.to_string())
    };

    tracing::warn!(error = %error, kind = ?classified, "Inference request failed");
    classified
}

fn snippet(text: &str) -> String {
    text.chars().take(LOG_SNIPPET_CHARS).collect()
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}
