//! HTTP client for Claude API

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use tokio::sync::mpsc;

use super::error::ClaudeError;
use super::models::{ClaudeModel, CreateMessageRequest, Message, MessageResponse};
use super::streaming;

/// Claude API client
pub struct ClaudeClient {
    /// HTTP client
    client: Client,
    /// API key for authentication
    api_key: String,
}

impl ClaudeClient {
    /// Claude API base URL
    const API_URL: &'static str = "https://api.anthropic.com/v1/messages";
    /// API version header value
    const API_VERSION: &'static str = "2023-06-01";

    /// Create a new Claude client with the given API key
    pub fn new(api_key: String) -> Result<Self, ClaudeError> {
        let client = Client::builder().connect_timeout(Duration::from_secs(30)).build()?;
        Ok(Self { client, api_key })
    }

    fn post(&self, request: &CreateMessageRequest) -> RequestBuilder {
        self.client
            .post(Self::API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", Self::API_VERSION)
            .header("content-type", "application/json")
            .json(request)
    }

    /// Map HTTP error statuses to [`ClaudeError`]
    async fn check_status(response: Response) -> Result<Response, ClaudeError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(ClaudeError::RateLimited { retry_after_seconds: retry_after });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ClaudeError::ApiError {
                status: 401,
                message: "Invalid API key".to_string(),
            });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClaudeError::ApiError { status: status.as_u16(), message });
        }

        Ok(response)
    }

    /// Send a request and stream the reply, returning the full text
    pub async fn generate_text(
        &self,
        request: CreateMessageRequest,
        progress: Option<mpsc::UnboundedSender<usize>>,
    ) -> Result<String, ClaudeError> {
        let request = request.streaming();
        let response = Self::check_status(self.post(&request).send().await?).await?;
        let text = streaming::collect_text(response, progress).await?;

        if text.trim().is_empty() {
            return Err(ClaudeError::EmptyResponse);
        }
        Ok(text)
    }

    /// Send a non-streaming message request
    pub async fn send_message(
        &self,
        mut request: CreateMessageRequest,
    ) -> Result<MessageResponse, ClaudeError> {
        request.stream = false;

        let response = Self::check_status(self.post(&request).send().await?).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Test the API key by sending a minimal request
    pub async fn test_connection(&self) -> Result<(), ClaudeError> {
        let request = CreateMessageRequest::new(ClaudeModel::Haiku45, vec![Message::user("Hi")])
            .with_max_tokens(10);

        let response = self.send_message(request).await?;
        if response.text().is_empty() {
            return Err(ClaudeError::EmptyResponse);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let client = ClaudeClient::new("sk-ant-test-key".to_string()).unwrap();
        assert_eq!(client.api_key, "sk-ant-test-key");
    }
}
