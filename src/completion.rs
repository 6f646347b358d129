use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::CompletionConfig;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion service unreachable at {0}")]
    Connect(String),
    #[error("completion request timed out after {0}s")]
    Timeout(u64),
    #[error("completion transport failure: {0}")]
    Transport(String),
    #[error("completion service returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("malformed completion response: {0}")]
    Parse(String),
}

impl CompletionError {
    /// Connect/transport errors, timeouts and upstream 5xx are worth one
    /// more attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            CompletionError::Connect(_)
            | CompletionError::Timeout(_)
            | CompletionError::Transport(_) => true,
            CompletionError::Api { status, .. } => *status >= 500,
            CompletionError::Parse(_) => false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, CompletionError>;
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatCompletionService {
    base_url: String,
    api_key: String,
    model: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl ChatCompletionService {
    pub fn new(config: &CompletionConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
            client,
        })
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[async_trait]
impl CompletionClient for ChatCompletionService {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: u32,
    ) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    CompletionError::Connect(self.base_url.clone())
                } else if e.is_timeout() {
                    CompletionError::Timeout(self.timeout_secs)
                } else {
                    CompletionError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Parse(e.to_string()))?;

        let reply = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::Parse("response carried no choices".into()))?;

        Ok(reply.message.content.trim().to_string())
    }
}

/// One bounded retry on transient failures; non-transient errors surface
/// immediately.
pub async fn complete_with_retry(
    client: &dyn CompletionClient,
    messages: &[ChatMessage],
    max_tokens: u32,
) -> Result<String, CompletionError> {
    match client.complete(messages, max_tokens).await {
        Ok(reply) => Ok(reply),
        Err(e) if e.is_transient() => {
            warn!(error = %e, "completion call failed, retrying once");
            client.complete(messages, max_tokens).await
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FlakyClient {
        calls: AtomicUsize,
        fail_first_with: fn() -> CompletionError,
    }

    #[async_trait]
    impl CompletionClient for FlakyClient {
        async fn complete(
            &self,
            _messages: &[ChatMessage],
            _max_tokens: u32,
        ) -> Result<String, CompletionError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err((self.fail_first_with)())
            } else {
                Ok("밀크씨슬, 비타민 C".to_string())
            }
        }
    }

    #[tokio::test]
    async fn retries_once_on_timeout() {
        let client = FlakyClient {
            calls: AtomicUsize::new(0),
            fail_first_with: || CompletionError::Timeout(30),
        };
        let reply = complete_with_retry(&client, &[ChatMessage::user("hi")], 300)
            .await
            .expect("second attempt should succeed");
        assert_eq!(reply, "밀크씨슬, 비타민 C");
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn does_not_retry_on_client_error() {
        let client = FlakyClient {
            calls: AtomicUsize::new(0),
            fail_first_with: || CompletionError::Api {
                status: 401,
                body: "bad key".into(),
            },
        };
        let err = complete_with_retry(&client, &[ChatMessage::user("hi")], 300)
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::Api { status: 401, .. }));
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_on_upstream_5xx() {
        let client = FlakyClient {
            calls: AtomicUsize::new(0),
            fail_first_with: || CompletionError::Api {
                status: 503,
                body: "overloaded".into(),
            },
        };
        let reply = complete_with_retry(&client, &[ChatMessage::user("hi")], 300)
            .await
            .expect("retry should succeed");
        assert!(!reply.is_empty());
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn transient_classification() {
        assert!(CompletionError::Connect("http://localhost".into()).is_transient());
        assert!(CompletionError::Timeout(30).is_transient());
        assert!(CompletionError::Api {
            status: 500,
            body: String::new()
        }
        .is_transient());
        assert!(!CompletionError::Api {
            status: 400,
            body: String::new()
        }
        .is_transient());
        assert!(!CompletionError::Parse("truncated".into()).is_transient());
    }
}
