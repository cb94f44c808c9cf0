use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::http_client;
use crate::provider::{LlmError, LlmProvider, Message};

/// Local Ollama backend (`POST {url}/api/chat`, non-streaming).
pub struct OllamaProvider {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(url: String, model: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: http_client(timeout)?,
            url: url.trim_end_matches('/').to_string(),
            model,
        })
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        messages: Vec<Message>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> Result<String, LlmError> {
        let url = format!("{}/api/chat", self.url);

        let mut options = serde_json::Map::new();
        if let Some(temperature) = temperature {
            options.insert("temperature".into(), json!(temperature));
        }
        if let Some(max_tokens) = max_tokens {
            options.insert("num_predict".into(), json!(max_tokens));
        }
        let body = json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
            "options": options,
        });

        debug!(url = %url, model = %self.model, "ollama chat request");

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let resp: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::ParseError(e.to_string()))?;
        let content = resp["message"]["content"]
            .as_str()
            .ok_or_else(|| LlmError::ParseError("missing message.content".into()))?
            .to_string();

        Ok(content)
    }
}
