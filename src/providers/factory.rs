use std::time::Duration;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::providers::{AnalysisPort, MockProvider, OpenAIProvider};

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance by name from configuration.
    ///
    /// The mock needs no entry under `providers`; it is only refused when an
    /// entry exists and disables it. Real backends must be configured and enabled.
    pub fn create(
        provider_name: &str,
        config: &AppConfig,
    ) -> Result<Box<dyn AnalysisPort>, AppError> {
        Self::create_with_timeout(provider_name, config, config.request_timeout())
    }

    /// Like [`ProviderFactory::create`], with an exact request timeout for real backends
    pub fn create_with_timeout(
        provider_name: &str,
        config: &AppConfig,
        timeout: Duration,
    ) -> Result<Box<dyn AnalysisPort>, AppError> {
        let provider_config = config.providers.get(provider_name);

        if let Some(provider_config) = provider_config {
            if !provider_config.enabled {
                return Err(AppError::BuilderError(format!(
                    "Provider '{}' is not enabled in configuration",
                    provider_name
                )));
            }
        }

        match provider_name {
            "mock" => Ok(Box::new(MockProvider::new(&config.mock))),
            "openai" => {
                let provider_config = provider_config.ok_or_else(|| {
                    AppError::BuilderError(format!(
                        "Provider '{}' not found in configuration",
                        provider_name
                    ))
                })?;
                Ok(Box::new(OpenAIProvider::new(provider_config, timeout)?))
            }
            _ => Err(AppError::BuilderError(format!(
                "Unknown provider: {}",
                provider_name
            ))),
        }
    }

    /// Get the default provider from configuration
    pub fn get_default_provider(config: &AppConfig) -> Result<Box<dyn AnalysisPort>, AppError> {
        Self::create(&config.default_provider, config)
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["mock", "openai"]
    }
}
