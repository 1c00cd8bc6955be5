use async_trait::async_trait;
use log::{debug, info};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::MockConfig;
use crate::error::AnalysisError;
use crate::fixtures;
use crate::model::Recipe;
use crate::providers::AnalysisPort;
use crate::request::AnalysisRequest;

/// Stand-in backend that answers with canned recipes after a simulated delay.
///
/// Only the request kind matters: images yield Nasi Gudeg Jogja, text yields
/// Sate Ayam Madura. The content of the request is never inspected beyond
/// the input constraints every backend enforces.
pub struct MockProvider {
    delay: Duration,
}

impl MockProvider {
    pub fn new(config: &MockConfig) -> Self {
        MockProvider {
            delay: Duration::from_millis(config.delay_ms),
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        MockProvider { delay }
    }

    /// Mock without any simulated latency
    pub fn instant() -> Self {
        Self::with_delay(Duration::ZERO)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(&MockConfig::default())
    }
}

#[async_trait]
impl AnalysisPort for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<Recipe, AnalysisError> {
        request.validate()?;

        if !self.delay.is_zero() {
            debug!("Simulating analysis latency of {:?}", self.delay);
            sleep(self.delay).await;
        }

        let recipe = match request {
            AnalysisRequest::Image { .. } => fixtures::nasi_gudeg_jogja(),
            AnalysisRequest::Text { .. } => fixtures::sate_ayam_madura(),
        };
        info!("Mock analysis of {} request produced '{}'", request.kind(), recipe.name);

        Ok(recipe)
    }
}
