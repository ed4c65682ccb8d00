use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::llm::{CompletionClient, CompletionRequest, CompletionResult};

use super::{
    config::OpenAiConfig,
    error::{OpenAiError, OpenAiResult},
    models::{ApiErrorEnvelope, ChatCompletionRequest, ChatCompletionResponse},
};

const COMPLETIONS_PATH: &str = "chat/completions";

/// Client for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    endpoint: Arc<str>,
    api_key: Arc<str>,
    model: Arc<str>,
}

impl OpenAiClient {
    /// Build the HTTP client for the configured endpoint.
    pub fn new(config: OpenAiConfig) -> OpenAiResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| OpenAiError::ClientBuilder { source })?;

        let base_url = config.base_url.trim_end_matches('/');
        let endpoint = Arc::<str>::from(format!("{base_url}/{COMPLETIONS_PATH}"));

        info!(
            model = %config.model,
            endpoint = %endpoint,
            "initialized completion client"
        );

        Ok(Self {
            client,
            endpoint,
            api_key: Arc::from(config.api_key),
            model: Arc::from(config.model),
        })
    }

    async fn send(&self, request: CompletionRequest) -> OpenAiResult<String> {
        let body = ChatCompletionRequest::from_request(&self.model, &request);

        debug!(
            model = %self.model,
            messages = request.messages.len(),
            json_mode = request.json_mode,
            "sending completion request"
        );

        let response = self
            .client
            .post(self.endpoint.as_ref())
            .bearer_auth(self.api_key.as_ref())
            .json(&body)
            .send()
            .await
            .map_err(|source| OpenAiError::RequestSend {
                url: self.endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response).await);
        }

        let payload = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|source| OpenAiError::DecodeResponse { source })?;

        let id = payload.id.clone().unwrap_or_default();
        let finish_reason = payload
            .choices
            .first()
            .and_then(|choice| choice.finish_reason.clone());
        let content = payload
            .into_first_content()
            .ok_or(OpenAiError::EmptyReply)?;

        info!(
            id = %id,
            finish_reason = ?finish_reason,
            content_len = content.len(),
            "completion request succeeded"
        );

        Ok(content)
    }

    async fn status_error(status: StatusCode, response: reqwest::Response) -> OpenAiError {
        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorEnvelope>(&text) {
            Ok(envelope) => {
                warn!(
                    %status,
                    error_type = ?envelope.error.error_type,
                    code = ?envelope.error.code,
                    message = %envelope.error.message,
                    "completion API returned an error"
                );
                OpenAiError::RequestStatus {
                    status,
                    message: envelope.error.message,
                    error_type: envelope.error.error_type,
                    code: envelope.error.code,
                }
            }
            Err(err) => {
                warn!(%status, parse_error = %err, "completion API error body was not JSON");
                OpenAiError::RequestStatus {
                    status,
                    message: format!("HTTP {status}"),
                    error_type: None,
                    code: None,
                }
            }
        }
    }
}

impl CompletionClient for OpenAiClient {
    fn complete(&self, request: CompletionRequest) -> BoxFuture<'static, CompletionResult<String>> {
        let client = self.clone();
        Box::pin(async move { client.send(request).await.map_err(Into::into) })
    }

    fn model(&self) -> &str {
        &self.model
    }
}
