use std::time::Duration;

use crate::config::{AppConfig, ProviderConfig};
use crate::error::AppError;
use crate::providers::{AnalysisPort, FallbackProvider, MockProvider, ProviderFactory};
use crate::shell::AppShell;
use crate::theme::{FileThemeStore, MemoryThemeStore, ThemeStore};

/// Analysis backends that can be selected by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Mock,
    OpenAI,
}

impl Provider {
    /// Convert to provider name string used by the factory
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Mock => "mock",
            Provider::OpenAI => "openai",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mock" => Some(Provider::Mock),
            "openai" => Some(Provider::OpenAI),
            _ => None,
        }
    }
}

/// Builder that wires an [`AppShell`] to its analysis backend and theme storage
#[derive(Default)]
pub struct AppShellBuilder {
    config: Option<AppConfig>,
    port: Option<Box<dyn AnalysisPort>>,
    provider: Option<Provider>,
    theme_store: Option<Box<dyn ThemeStore>>,
    timeout: Option<Duration>,
    api_key: Option<String>,
    model: Option<String>,
    mock_delay: Option<Duration>,
}

impl AppShellBuilder {
    /// Use an explicit configuration instead of loading one
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a ready-made analysis backend, bypassing provider selection
    ///
    /// # Example
    /// ```
    /// use recipe_nusantara::{AppShell, MockProvider};
    ///
    /// let shell = AppShell::builder()
    ///     .port(Box::new(MockProvider::instant()))
    ///     .in_memory_theme()
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(shell.provider_name(), "mock");
    /// ```
    pub fn port(mut self, port: Box<dyn AnalysisPort>) -> Self {
        self.port = Some(port);
        self
    }

    /// Select a backend by kind
    pub fn provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn theme_store(mut self, store: Box<dyn ThemeStore>) -> Self {
        self.theme_store = Some(store);
        self
    }

    /// Keep the theme preference in memory only
    pub fn in_memory_theme(self) -> Self {
        self.theme_store(Box::new(MemoryThemeStore::default()))
    }

    /// Set a timeout for backend requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the API key for the selected provider
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the selected provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Override the simulated latency of the mock backend
    pub fn mock_delay(mut self, delay: Duration) -> Self {
        self.mock_delay = Some(delay);
        self
    }

    /// Compose the shell.
    ///
    /// Backend selection, first match wins: an explicit port, an explicit
    /// provider (with any api key / model overrides), then the configured
    /// default. The default sits behind the fallback chain only when
    /// `fallback.enabled` is set.
    pub fn build(self) -> Result<AppShell, AppError> {
        let mut config = match self.config {
            Some(config) => config,
            None => AppConfig::load()?,
        };
        let timeout = self.timeout.unwrap_or_else(|| config.request_timeout());
        if let Some(delay) = self.mock_delay {
            config.mock.delay_ms = saturating_millis(delay);
        }

        let port: Box<dyn AnalysisPort> = match (self.port, self.provider) {
            (Some(port), _) => port,
            (None, Some(Provider::Mock)) => match self.mock_delay {
                Some(delay) => Box::new(MockProvider::with_delay(delay)),
                None => Box::new(MockProvider::new(&config.mock)),
            },
            (None, Some(provider)) => {
                let name = provider.as_str();
                let entry = config
                    .providers
                    .entry(name.to_string())
                    .or_insert_with(|| ProviderConfig {
                        enabled: true,
                        model: "gpt-4o-mini".to_string(),
                        temperature: 0.7,
                        max_tokens: 2000,
                        api_key: None,
                        base_url: None,
                    });
                if self.api_key.is_some() {
                    entry.api_key = self.api_key;
                }
                if let Some(model) = self.model {
                    entry.model = model;
                }
                ProviderFactory::create_with_timeout(name, &config, timeout)?
            }
            (None, None) if config.fallback.enabled => {
                Box::new(FallbackProvider::with_timeout(&config, timeout)?)
            }
            (None, None) => {
                ProviderFactory::create_with_timeout(&config.default_provider, &config, timeout)?
            }
        };

        let theme_store = self
            .theme_store
            .unwrap_or_else(|| Box::new(FileThemeStore::new(&config.theme_file)));

        Ok(AppShell::new(port, theme_store))
    }
}

/// Whole milliseconds, saturating instead of wrapping for huge durations
fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl AppShell {
    /// Creates a new builder for composing the application
    pub fn builder() -> AppShellBuilder {
        AppShellBuilder::default()
    }
}
