use bytes::Bytes;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: Option<String>,
}

/// Client for the upstream OpenAI-compatible chat completions endpoint.
/// Built once at startup and shared across requests.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    chat_url: String,
    model: String,
}

impl UpstreamClient {
    pub fn new(config: &GatewayConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            chat_url: format!(
                "{}/v1/chat/completions",
                config.upstream_url.trim_end_matches('/')
            ),
            model: config.model.clone(),
        })
    }

    /// One completion round trip: system plus user message in, assistant
    /// message text out. No retry, no streaming, the full generation is
    /// awaited.
    pub async fn complete(
        &self,
        api_key: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> GatewayResult<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
        };

        let resp = self
            .client
            .post(&self.chat_url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                log::error!("AI gateway request failed: {}", err);
                GatewayError::Upstream
            })?;

        let status = resp.status();
        let body: Bytes = resp.bytes().await.map_err(|err| {
            log::error!("AI gateway body read failed: {}", err);
            GatewayError::Upstream
        })?;

        if !status.is_success() {
            log::error!(
                "AI gateway error: {} {}",
                status.as_u16(),
                String::from_utf8_lossy(&body)
            );
            return Err(classify_failure(status));
        }

        completion_content(&body)
    }
}

fn classify_failure(status: StatusCode) -> GatewayError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => GatewayError::RateLimited,
        StatusCode::PAYMENT_REQUIRED => GatewayError::UsageLimited,
        _ => GatewayError::Upstream,
    }
}

/// Pull `choices[0].message.content` out of a completion body, treating
/// anything absent as empty text.
fn completion_content(body: &[u8]) -> GatewayResult<String> {
    let completion: ChatCompletionResponse =
        serde_json::from_slice(body).map_err(|err| GatewayError::Extraction {
            detail: format!("unreadable completion body: {}", err),
        })?;

    Ok(completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default())
}
