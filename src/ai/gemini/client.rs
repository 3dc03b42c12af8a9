use super::extract::extract_text;
use super::types::GenerateContentRequest;
use crate::ai::GenerationProvider;
use crate::models::Config;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Lightweight Gemini REST client returning raw response envelopes.
pub struct GeminiHttpClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl GeminiHttpClient {
    /// Construct a Gemini client.
    ///
    /// `model` should be the bare model ID (for example `gemini-2.0-flash`);
    /// a `models/` prefix is stripped.
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: Client) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured model ID without the `models/` prefix.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Calls Gemini's `generateContent` endpoint and returns the JSON envelope.
    ///
    /// A body that is not JSON is reported as an extraction failure carrying the
    /// body text, since no text can be located in it.
    pub async fn generate_content<Req: Serialize>(&self, request: &Req) -> Result<Value> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        tracing::debug!(model = %self.model, "Sending generateContent request to Gemini");

        let mut builder = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Failed to send request to Gemini: {}", e);
            e
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error (status {}): {}", status, error_text);
            return Err(Error::Provider {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}\nBody: {}", e, body);
            Error::Extraction {
                raw: Value::String(body),
            }
        })
    }
}

/// Text generation backed by Gemini.
pub struct GeminiClient {
    http: GeminiHttpClient,
}

impl GeminiClient {
    pub fn new(http: GeminiHttpClient) -> Self {
        Self { http }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            GeminiHttpClient::new(config.api_key.clone(), config.model.clone())
                .with_base_url(config.base_url.clone())
                .with_timeout(config.timeout),
        )
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest::from_prompt(prompt);
        let envelope = self.http.generate_content(&request).await?;

        extract_text(&envelope).ok_or_else(|| {
            tracing::error!("No generated text found in Gemini response: {}", envelope);
            Error::Extraction { raw: envelope }
        })
    }
}
