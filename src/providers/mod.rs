mod factory;
mod fallback;
mod mock;
mod open_ai;
mod prompt;

pub use factory::ProviderFactory;
pub use fallback::FallbackProvider;
pub use mock::MockProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_user_message, RECIPE_ANALYST_PROMPT};

use async_trait::async_trait;

use crate::error::AnalysisError;
use crate::model::Recipe;
use crate::request::AnalysisRequest;

/// Boundary between the application and whatever produces a recipe from a request
#[async_trait]
pub trait AnalysisPort: Send + Sync {
    /// Get the provider name (e.g., "mock", "openai")
    fn provider_name(&self) -> &str;

    /// Analyze an image or a dish description and return a complete recipe
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Recipe, AnalysisError>;
}
