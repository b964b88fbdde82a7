use async_trait::async_trait;
use reqwest::Client;
use std::env;
use std::time::Duration;
use thiserror::Error;

use super::endpoints::{
    AvailableModel, ChatCompletionRequest, ChatCompletionResponse, Provider, TextGenerationRequest,
    GROQ_CHAT_URL, GROQ_MODELS, OPENROUTER_CHAT_URL, OPENROUTER_MODELS,
};

#[derive(Debug, Error)]
pub enum ApiConnectionError {
    #[error("API key not found in environment: {0}")]
    MissingApiKey(String),
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("API error {status}: {error_body}")]
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
    #[error("API returned no usable content: {0}")]
    EmptyResponse(String),
}

/// The single outbound dependency of the pipeline: prompt in, generated text out.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate_text(&self, request: &TextGenerationRequest) -> Result<String, ApiConnectionError>;

    fn model_name(&self) -> &str;
}

impl Provider {
    pub fn groq(api_key_env_var_name: &str, model: &str) -> Self {
        Self::Groq {
            api_key: api_key_env_var_name.to_string(),
            model: model.to_string(),
            timeout_secs: None,
        }
    }

    pub fn openrouter(api_key_env_var_name: &str, model: &str) -> Self {
        Self::OpenRouter {
            api_key: api_key_env_var_name.to_string(),
            model: model.to_string(),
            timeout_secs: None,
        }
    }

    pub fn with_timeout(mut self, secs: Option<u64>) -> Self {
        match &mut self {
            Provider::Groq { timeout_secs, .. } | Provider::OpenRouter { timeout_secs, .. } => {
                *timeout_secs = secs;
            }
        }
        self
    }

    pub fn get_available_models(&self) -> Vec<AvailableModel> {
        match self {
            Provider::Groq { .. } => GROQ_MODELS.to_vec(),
            Provider::OpenRouter { .. } => OPENROUTER_MODELS.to_vec(),
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Provider::Groq { model, .. } | Provider::OpenRouter { model, .. } => model,
        }
    }

    fn chat_url(&self) -> &'static str {
        match self {
            Provider::Groq { .. } => GROQ_CHAT_URL,
            Provider::OpenRouter { .. } => OPENROUTER_CHAT_URL,
        }
    }

    fn api_key_env_var(&self) -> &str {
        match self {
            Provider::Groq { api_key, .. } | Provider::OpenRouter { api_key, .. } => api_key,
        }
    }

    fn timeout(&self) -> Option<Duration> {
        match self {
            Provider::Groq { timeout_secs, .. } | Provider::OpenRouter { timeout_secs, .. } => {
                timeout_secs.map(Duration::from_secs)
            }
        }
    }

    pub async fn call_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiConnectionError> {
        let api_key_env_var_name = self.api_key_env_var();
        let actual_api_key = env::var(api_key_env_var_name)
            .map_err(|_| ApiConnectionError::MissingApiKey(api_key_env_var_name.to_string()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let mut http_request = client
            .post(self.chat_url())
            .bearer_auth(actual_api_key)
            .header("Content-Type", "application/json");

        if let Provider::OpenRouter { .. } = self {
            let site_url = env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
            let app_name = env::var("APP_NAME").unwrap_or_else(|_| "Dinezzy".to_string());
            http_request = http_request.header("HTTP-Referer", site_url).header("X-Title", app_name);
        }

        let response = http_request.json(&request).send().await?;

        if response.status().is_success() {
            let chat_response = response.json::<ChatCompletionResponse>().await?;
            Ok(chat_response)
        } else {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            Err(ApiConnectionError::ApiError { status, error_body })
        }
    }
}

#[async_trait]
impl ModelClient for Provider {
    async fn generate_text(&self, request: &TextGenerationRequest) -> Result<String, ApiConnectionError> {
        let chat_request = request.clone().into_chat_request(self.model());
        let response = self.call_chat_completion(chat_request).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ApiConnectionError::EmptyResponse("no choices received".to_string()))?;

        tracing::debug!(length = content.len(), "received model response");
        if content.trim().is_empty() {
            return Err(ApiConnectionError::EmptyResponse("blank message content".to_string()));
        }
        Ok(content)
    }

    fn model_name(&self) -> &str {
        self.model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_connection::endpoints::DEFAULT_MODEL;

    #[test]
    fn test_provider_reports_its_model_and_catalogue() {
        let provider = Provider::groq("GROQ_API_KEY", DEFAULT_MODEL);
        assert_eq!(provider.model(), DEFAULT_MODEL);
        assert_eq!(provider.chat_url(), GROQ_CHAT_URL);
        assert!(provider
            .get_available_models()
            .iter()
            .any(|m| m.model_name == DEFAULT_MODEL));

        let provider = Provider::openrouter("OPENROUTER_API_KEY", "some/model").with_timeout(Some(5));
        assert_eq!(provider.chat_url(), OPENROUTER_CHAT_URL);
        assert_eq!(provider.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_error_messages_name_the_failure() {
        let err = ApiConnectionError::MissingApiKey("GROQ_API_KEY".to_string());
        assert_eq!(err.to_string(), "API key not found in environment: GROQ_API_KEY");
        let err = ApiConnectionError::ApiError {
            status: reqwest::StatusCode::TOO_MANY_REQUESTS,
            error_body: "slow down".to_string(),
        };
        assert!(err.to_string().contains("429"));
    }
}
