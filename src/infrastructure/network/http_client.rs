use crate::application::ports::{ExecutionClient, ExecutionError, ExecutionRequest};
use crate::domain::value_objects::HttpMethod;
use crate::shared::config::NetworkConfig;
use crate::shared::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// reqwest-backed execution adapter. Builds the call described by an action
/// record against the configured API base URL; the transport timeout is the
/// only cancellation mechanism (there is no queue-level timeout).
pub struct HttpExecutionClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpExecutionClient {
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn method_of(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl ExecutionClient for HttpExecutionClient {
    async fn execute(&self, request: ExecutionRequest) -> std::result::Result<Value, ExecutionError> {
        let url = format!("{}{}", self.base_url, request.endpoint.as_str());
        debug!(
            target: "sync::client",
            method = request.method.as_str(),
            url = %url,
            "replaying action"
        );

        let mut builder = self.http.request(Self::method_of(request.method), &url);
        if let Some(token) = &request.auth_token {
            builder = builder.bearer_auth(token);
        }
        if request.method.has_body() {
            builder = builder.json(request.payload.as_json());
        }

        let response = builder
            .send()
            .await
            .map_err(|err| ExecutionError::transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request rejected")
                    .to_string()
            } else {
                body
            };
            return Err(ExecutionError::status(status.as_u16(), message));
        }

        // Empty or non-JSON bodies are legal success responses.
        let body = response
            .text()
            .await
            .map_err(|err| ExecutionError::transport(err.to_string()))?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> NetworkConfig {
        NetworkConfig {
            base_url: base_url.to_string(),
            request_timeout: 5,
        }
    }

    #[test]
    fn strips_trailing_slash_from_base_url() {
        let client = HttpExecutionClient::new(&config("https://api.mandi.example/")).unwrap();
        assert_eq!(client.base_url, "https://api.mandi.example");
    }

    #[test]
    fn maps_every_verb() {
        assert_eq!(
            HttpExecutionClient::method_of(HttpMethod::Patch),
            reqwest::Method::PATCH
        );
        assert_eq!(
            HttpExecutionClient::method_of(HttpMethod::Delete),
            reqwest::Method::DELETE
        );
    }
}
