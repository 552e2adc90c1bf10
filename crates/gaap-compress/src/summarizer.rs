//! Single-shot calls to a remote summarization endpoint.
//!
//! Two wire dialects are spoken: Anthropic Messages (`/v1/messages`) and
//! OpenAI-compatible chat completions (`/v1/chat/completions`). Every call
//! carries its own timeout and is attempted exactly once.

use async_trait::async_trait;
use gaap_core::{GaapError, Provider, ProviderConfig, Result};
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// Everything one remote call needs
#[derive(Debug, Clone)]
pub struct SummaryRequest<'a> {
    pub provider: Provider,
    pub endpoint: &'a str,
    pub api_key: Option<&'a str>,
    pub model: &'a str,
    pub system_prompt: &'a str,
    pub user_text: &'a str,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl<'a> SummaryRequest<'a> {
    pub fn from_config(
        config: &'a ProviderConfig,
        api_key: Option<&'a str>,
        system_prompt: &'a str,
        user_text: &'a str,
        max_tokens: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            provider: config.provider,
            endpoint: &config.endpoint,
            api_key,
            model: &config.model,
            system_prompt,
            user_text,
            max_tokens,
            timeout,
        }
    }

    fn url(&self) -> String {
        let endpoint = self.endpoint.trim_end_matches('/');
        match self.provider {
            Provider::Anthropic => format!("{}/v1/messages", endpoint),
            Provider::OpenAiCompatible => format!("{}/v1/chat/completions", endpoint),
        }
    }
}

/// Turns text into shorter text
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, request: &SummaryRequest<'_>) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct AnthropicBody<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct OpenAiBody<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 2],
}

/// [`Summarizer`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpSummarizer {
    client: reqwest::Client,
}

impl HttpSummarizer {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| GaapError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn build(&self, request: &SummaryRequest<'_>) -> reqwest::RequestBuilder {
        let builder = self.client.post(request.url()).timeout(request.timeout);

        match request.provider {
            Provider::Anthropic => {
                let builder = builder
                    .header("anthropic-version", ANTHROPIC_VERSION)
                    .json(&AnthropicBody {
                        model: request.model,
                        max_tokens: request.max_tokens,
                        system: request.system_prompt,
                        messages: [ChatMessage {
                            role: "user",
                            content: request.user_text,
                        }],
                    });
                match request.api_key {
                    Some(key) => builder.header("x-api-key", key),
                    None => builder,
                }
            }
            Provider::OpenAiCompatible => {
                let builder = builder.json(&OpenAiBody {
                    model: request.model,
                    max_tokens: request.max_tokens,
                    messages: [
                        ChatMessage {
                            role: "system",
                            content: request.system_prompt,
                        },
                        ChatMessage {
                            role: "user",
                            content: request.user_text,
                        },
                    ],
                });
                match request.api_key {
                    Some(key) => builder.bearer_auth(key),
                    None => builder,
                }
            }
        }
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(&self, request: &SummaryRequest<'_>) -> Result<String> {
        let response = self
            .build(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let payload: serde_json::Value = response.json().await.map_err(|e| {
            if e.is_decode() {
                GaapError::Protocol(format!("response is not JSON: {}", e))
            } else {
                transport_error(e)
            }
        })?;

        let text = extract_text(request.provider, &payload)?;
        tracing::debug!(
            provider = request.provider.name(),
            chars = text.chars().count(),
            "summary received"
        );
        Ok(text)
    }
}

/// Pull the generated text out of a success response
pub fn extract_text(provider: Provider, payload: &serde_json::Value) -> Result<String> {
    let (text, field) = match provider {
        Provider::Anthropic => (payload["content"][0]["text"].as_str(), "content[0].text"),
        Provider::OpenAiCompatible => (
            payload["choices"][0]["message"]["content"].as_str(),
            "choices[0].message.content",
        ),
    };

    match text.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(GaapError::Protocol(format!(
            "Invalid API response: missing {}",
            field
        ))),
    }
}

fn transport_error(e: reqwest::Error) -> GaapError {
    if e.is_timeout() {
        GaapError::Transport(format!("request timed out: {}", e))
    } else {
        GaapError::Transport(e.to_string())
    }
}

fn status_error(status: StatusCode, body: &str) -> GaapError {
    let preview: String = body.trim().chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
    let detail = if preview.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, preview)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GaapError::Auth(detail),
        StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS => {
            GaapError::Transport(detail)
        }
        s if s.is_server_error() => GaapError::Transport(detail),
        _ => GaapError::Protocol(detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn local_summarizer() -> HttpSummarizer {
        HttpSummarizer::with_client(reqwest::Client::builder().no_proxy().build().unwrap())
    }

    fn request<'a>(provider: Provider, endpoint: &'a str, key: Option<&'a str>) -> SummaryRequest<'a> {
        SummaryRequest {
            provider,
            endpoint,
            api_key: key,
            model: "test-model",
            system_prompt: "be brief",
            user_text: "a long message",
            max_tokens: 200,
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_anthropic_wire_format() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "model": "test-model",
                "max_tokens": 200,
                "system": "be brief",
                "messages": [{"role": "user", "content": "a long message"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "  short  "}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let summarizer = local_summarizer();
        let uri = server.uri();
        let text = summarizer
            .summarize(&request(Provider::Anthropic, &uri, Some("sk-test")))
            .await
            .unwrap();
        assert_eq!(text, "short");
    }

    #[tokio::test]
    async fn test_openai_wire_format() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-oai"))
            .and(body_json(json!({
                "model": "test-model",
                "max_tokens": 200,
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "a long message"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "short"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let summarizer = local_summarizer();
        let uri = server.uri();
        let text = summarizer
            .summarize(&request(Provider::OpenAiCompatible, &uri, Some("sk-oai")))
            .await
            .unwrap();
        assert_eq!(text, "short");
    }

    #[tokio::test]
    async fn test_openai_without_key_sends_no_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "ok"}}]
            })))
            .mount(&server)
            .await;

        let summarizer = local_summarizer();
        let uri = server.uri();
        summarizer
            .summarize(&request(Provider::OpenAiCompatible, &uri, None))
            .await
            .unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert!(received[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_missing_text_is_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": []})))
            .mount(&server)
            .await;

        let summarizer = local_summarizer();
        let uri = server.uri();
        let err = summarizer
            .summarize(&request(Provider::Anthropic, &uri, Some("k")))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "ProtocolError");
    }

    #[tokio::test]
    async fn test_non_json_body_is_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let summarizer = local_summarizer();
        let uri = server.uri();
        let err = summarizer
            .summarize(&request(Provider::Anthropic, &uri, Some("k")))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "ProtocolError");
    }

    #[tokio::test]
    async fn test_rejected_key_is_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid x-api-key"))
            .expect(1)
            .mount(&server)
            .await;

        let summarizer = local_summarizer();
        let uri = server.uri();
        let err = summarizer
            .summarize(&request(Provider::Anthropic, &uri, Some("bad")))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "AuthError");
        assert!(err.to_string().contains("invalid x-api-key"));
    }

    #[tokio::test]
    async fn test_server_error_is_transport_error_and_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let summarizer = local_summarizer();
        let uri = server.uri();
        let err = summarizer
            .summarize(&request(Provider::Anthropic, &uri, Some("k")))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "TransportError");
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"content": [{"text": "late"}]}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let summarizer = local_summarizer();
        let uri = server.uri();
        let mut req = request(Provider::Anthropic, &uri, Some("k"));
        req.timeout = Duration::from_millis(50);
        let err = summarizer.summarize(&req).await.unwrap_err();
        assert_eq!(err.kind(), "TransportError");
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let summarizer = local_summarizer();
        let err = summarizer
            .summarize(&request(Provider::Anthropic, "http://127.0.0.1:9", Some("k")))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "TransportError");
    }

    #[test]
    fn test_extract_text_rejects_blank() {
        let payload = json!({"choices": [{"message": {"content": "   "}}]});
        assert!(extract_text(Provider::OpenAiCompatible, &payload).is_err());
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let req = request(Provider::Anthropic, "https://api.anthropic.com/", None);
        assert_eq!(req.url(), "https://api.anthropic.com/v1/messages");
    }
}
