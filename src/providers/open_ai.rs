use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::error::{AnalysisError, AppError};
use crate::model::Recipe;
use crate::providers::{build_user_message, AnalysisPort, RECIPE_ANALYST_PROMPT};
use crate::request::AnalysisRequest;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Duration) -> Result<Self, AppError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or_else(|| {
                AppError::BuilderError(
                    "OPENAI_API_KEY not found in config or environment".to_string(),
                )
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::BuilderError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(OpenAIProvider {
            client,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAIProvider {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

/// Map an unsuccessful HTTP status onto the analysis error taxonomy
fn status_error(status: StatusCode, body: &str) -> AnalysisError {
    let detail = format!("OpenAI API error ({}): {}", status, body);
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            AnalysisError::UpstreamTimeout(detail)
        }
        StatusCode::BAD_REQUEST
        | StatusCode::PAYLOAD_TOO_LARGE
        | StatusCode::UNSUPPORTED_MEDIA_TYPE
        | StatusCode::UNPROCESSABLE_ENTITY => AnalysisError::InvalidInput(detail),
        _ => AnalysisError::UpstreamUnavailable(detail),
    }
}

/// Models sometimes wrap JSON in markdown fences despite being told not to
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse the assistant message into a validated recipe
pub(crate) fn parse_recipe(content: &str) -> Result<Recipe, AnalysisError> {
    let recipe: Recipe = serde_json::from_str(strip_code_fences(content))?;
    recipe.validate()?;
    Ok(recipe)
}

#[async_trait]
impl AnalysisPort for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<Recipe, AnalysisError> {
        request.validate()?;
        debug!("Sending {} analysis request to {}", request.kind(), self.model);

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": RECIPE_ANALYST_PROMPT},
                    build_user_message(request)
                ],
                "response_format": {"type": "json_object"},
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAI returned {}", status);
            return Err(status_error(status, &body));
        }

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);

        let content = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                AnalysisError::MalformedResponse(
                    "Failed to extract content from response".to_string(),
                )
            })?;

        parse_recipe(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    const RECIPE_JSON: &str = r#"{\"name\": \"Gado-gado\", \"description\": \"Vegetable salad with peanut dressing\", \"origin\": \"Jakarta\", \"cookingTime\": \"40 minutes\", \"servings\": 3, \"difficulty\": \"Easy\", \"ingredients\": [{\"name\": \"Long beans\", \"amount\": \"100g\"}], \"instructions\": [\"Blanch the vegetables.\", \"Pour over peanut sauce.\"], \"history\": \"A Betawi classic.\", \"interestingFacts\": [\"Gado-gado means mix-mix.\"]}"#;

    fn chat_body(content: &str) -> String {
        format!(
            r#"{{"choices": [{{"message": {{"content": "{}"}}}}]}}"#,
            content
        )
    }

    #[tokio::test]
    async fn test_analyze_text() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer fake_api_key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(chat_body(RECIPE_JSON))
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o-mini".to_string(),
        );
        let request = AnalysisRequest::text("Gado-gado salad").unwrap();

        let recipe = provider.analyze(&request).await.unwrap();
        assert_eq!(recipe.name, "Gado-gado");
        assert_eq!(recipe.servings, 3);
        assert_eq!(recipe.instructions.len(), 2);
        assert!(recipe.nutritional_highlights.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(503)
            .with_body(r#"{"error": "overloaded"}"#)
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o-mini".to_string(),
        );
        let request = AnalysisRequest::text("Soto ayam soup").unwrap();

        let err = provider.analyze(&request).await.unwrap_err();
        assert!(matches!(err, AnalysisError::UpstreamUnavailable(_)));
        assert!(err.is_transient());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_content_is_malformed() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o-mini".to_string(),
        );
        let request = AnalysisRequest::text("Soto ayam soup").unwrap();

        let err = provider.analyze(&request).await.unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_invalid_request_never_hits_network() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4o-mini".to_string(),
        );
        let request = AnalysisRequest::Image {
            payload: String::new(),
        };

        let err = provider.analyze(&request).await.unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
        mock.assert_async().await;
    }

    #[test]
    fn test_parse_recipe_with_fences() {
        let content = "```json\n{\"name\": \"Bakso\", \"description\": \"\", \"origin\": \"Solo\", \"cookingTime\": \"1 hour\", \"servings\": 2, \"difficulty\": \"Medium\", \"instructions\": [\"Shape the meatballs.\"], \"history\": \"\"}\n```";
        let recipe = parse_recipe(content).unwrap();
        assert_eq!(recipe.name, "Bakso");
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_parse_recipe_rejects_invalid_recipe() {
        let content = r#"{"name": "Bakso", "description": "", "origin": "Solo", "cookingTime": "1 hour", "servings": 0, "difficulty": "Medium", "instructions": ["Shape."], "history": ""}"#;
        let err = parse_recipe(content).unwrap_err();
        assert!(err.to_string().contains("servings"));
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::GATEWAY_TIMEOUT, ""),
            AnalysisError::UpstreamTimeout(_)
        ));
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, ""),
            AnalysisError::UpstreamUnavailable(_)
        ));
        assert!(matches!(
            status_error(StatusCode::PAYLOAD_TOO_LARGE, ""),
            AnalysisError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_provider_name() {
        let provider = OpenAIProvider::with_base_url(
            "fake_api_key".to_string(),
            DEFAULT_BASE_URL.to_string(),
            "gpt-4o".to_string(),
        );
        assert_eq!(provider.provider_name(), "openai");
    }
}
