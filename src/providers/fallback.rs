use async_trait::async_trait;
use log::{debug, info, warn};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::AppConfig;
use crate::error::{AnalysisError, AppError};
use crate::model::Recipe;
use crate::providers::{AnalysisPort, ProviderFactory};
use crate::request::AnalysisRequest;

/// Tries a chain of providers, retrying each one on transient failures.
///
/// Errors caused by the request itself stop the chain immediately since no
/// other backend would accept it either.
pub struct FallbackProvider {
    providers: Vec<Box<dyn AnalysisPort>>,
    retry_attempts: u32,
    retry_delay_ms: u64,
}

impl FallbackProvider {
    /// Create a new fallback provider from configuration
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        Self::with_timeout(config, config.request_timeout())
    }

    /// Create a fallback provider whose real backends use the given request timeout
    pub fn with_timeout(config: &AppConfig, timeout: Duration) -> Result<Self, AppError> {
        if !config.fallback.enabled {
            let default_provider =
                ProviderFactory::create_with_timeout(&config.default_provider, config, timeout)?;
            return Ok(FallbackProvider {
                providers: vec![default_provider],
                retry_attempts: 1,
                retry_delay_ms: 0,
            });
        }

        let mut providers = Vec::new();

        for provider_name in &config.fallback.order {
            match ProviderFactory::create_with_timeout(provider_name, config, timeout) {
                Ok(provider) => {
                    info!("Added '{}' to fallback chain", provider_name);
                    providers.push(provider);
                }
                Err(e) => {
                    warn!("Failed to initialize provider '{}': {}", provider_name, e);
                }
            }
        }

        if providers.is_empty() {
            return Err(AppError::BuilderError(
                "No providers available in fallback configuration".to_string(),
            ));
        }

        Ok(FallbackProvider {
            providers,
            retry_attempts: config.fallback.retry_attempts.max(1),
            retry_delay_ms: config.fallback.retry_delay_ms,
        })
    }

    /// Chain explicit providers, mostly useful for tests and embedding
    pub fn from_providers(
        providers: Vec<Box<dyn AnalysisPort>>,
        retry_attempts: u32,
        retry_delay_ms: u64,
    ) -> Self {
        FallbackProvider {
            providers,
            retry_attempts: retry_attempts.max(1),
            retry_delay_ms,
        }
    }

    /// Try a provider with linear backoff between transient failures
    async fn try_provider_with_retry(
        &self,
        provider: &dyn AnalysisPort,
        request: &AnalysisRequest,
    ) -> Result<Recipe, AnalysisError> {
        let mut attempt = 1;

        loop {
            debug!(
                "Attempting analysis with {} (attempt {}/{})",
                provider.provider_name(),
                attempt,
                self.retry_attempts
            );

            match provider.analyze(request).await {
                Ok(recipe) => {
                    info!("Generated '{}' using {}", recipe.name, provider.provider_name());
                    return Ok(recipe);
                }
                Err(e) => {
                    warn!(
                        "Provider {} failed (attempt {}/{}): {}",
                        provider.provider_name(),
                        attempt,
                        self.retry_attempts,
                        e
                    );
                    if !e.is_transient() || attempt >= self.retry_attempts {
                        return Err(e);
                    }
                }
            }

            let delay = Duration::from_millis(self.retry_delay_ms * attempt as u64);
            debug!("Waiting {:?} before retry", delay);
            sleep(delay).await;
            attempt += 1;
        }
    }
}

#[async_trait]
impl AnalysisPort for FallbackProvider {
    fn provider_name(&self) -> &str {
        "fallback"
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<Recipe, AnalysisError> {
        let mut last_error = None;

        for provider in &self.providers {
            match self.try_provider_with_retry(provider.as_ref(), request).await {
                Ok(recipe) => return Ok(recipe),
                Err(e @ AnalysisError::InvalidInput(_)) => return Err(e),
                Err(e) => last_error = Some(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            AnalysisError::UpstreamUnavailable("No providers in fallback chain".to_string())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FallbackConfig;
    use crate::providers::MockProvider;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Fails with the given error a number of times, then delegates to the mock
    struct FlakyProvider {
        failures: u32,
        error: AnalysisError,
        calls: Arc<AtomicU32>,
    }

    #[async_trait]
    impl AnalysisPort for FlakyProvider {
        fn provider_name(&self) -> &str {
            "flaky"
        }

        async fn analyze(&self, request: &AnalysisRequest) -> Result<Recipe, AnalysisError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(self.error.clone());
            }
            MockProvider::instant().analyze(request).await
        }
    }

    fn flaky(failures: u32, error: AnalysisError) -> (Box<dyn AnalysisPort>, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let provider = FlakyProvider {
            failures,
            error,
            calls: calls.clone(),
        };
        (Box::new(provider), calls)
    }

    #[test]
    fn test_fallback_disabled_uses_default() {
        let config = AppConfig::default();
        let fallback = FallbackProvider::new(&config).unwrap();
        assert_eq!(fallback.providers.len(), 1);
        assert_eq!(fallback.retry_attempts, 1);
        assert_eq!(fallback.provider_name(), "fallback");
    }

    #[test]
    fn test_fallback_skips_unavailable_providers() {
        let config = AppConfig {
            fallback: FallbackConfig {
                enabled: true,
                order: vec!["openai".to_string(), "mock".to_string()],
                retry_attempts: 2,
                retry_delay_ms: 50,
            },
            ..AppConfig::default()
        };

        let fallback = FallbackProvider::new(&config).unwrap();
        assert_eq!(fallback.providers.len(), 1);
        assert_eq!(fallback.providers[0].provider_name(), "mock");
    }

    #[test]
    fn test_fallback_no_providers() {
        let config = AppConfig {
            fallback: FallbackConfig {
                enabled: true,
                order: vec!["nonexistent".to_string()],
                ..FallbackConfig::default()
            },
            ..AppConfig::default()
        };

        let result = FallbackProvider::new(&config);
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("No providers available"));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_errors_are_retried() {
        let (provider, calls) = flaky(2, AnalysisError::UpstreamTimeout("slow".into()));
        let fallback = FallbackProvider::from_providers(vec![provider], 3, 100);

        let request = AnalysisRequest::text("Soto ayam soup").unwrap();
        let recipe = fallback.analyze(&request).await.unwrap();
        assert_eq!(recipe.name, "Sate Ayam Madura");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_malformed_response_moves_to_next_provider() {
        let (first, first_calls) = flaky(10, AnalysisError::MalformedResponse("junk".into()));
        let fallback = FallbackProvider::from_providers(
            vec![first, Box::new(MockProvider::instant())],
            3,
            0,
        );

        let request = AnalysisRequest::text("Gado-gado salad").unwrap();
        let recipe = fallback.analyze(&request).await.unwrap();
        assert_eq!(recipe.name, "Sate Ayam Madura");
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_input_stops_the_chain() {
        let (first, first_calls) = flaky(10, AnalysisError::InvalidInput("bad".into()));
        let (second, second_calls) = flaky(0, AnalysisError::InvalidInput("unused".into()));
        let fallback = FallbackProvider::from_providers(vec![first, second], 3, 0);

        let request = AnalysisRequest::text("Gado-gado salad").unwrap();
        let err = fallback.analyze(&request).await.unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_error_is_reported() {
        let (first, _) = flaky(10, AnalysisError::UpstreamUnavailable("down".into()));
        let fallback = FallbackProvider::from_providers(vec![first], 2, 10);

        let request = AnalysisRequest::text("Gado-gado salad").unwrap();
        let err = fallback.analyze(&request).await.unwrap_err();
        assert_eq!(err, AnalysisError::UpstreamUnavailable("down".into()));
    }
}
