//! Indonesian recipe generator.
//!
//! A photo of a dish or a short description goes in through the
//! [`InputController`], an [`AnalysisPort`] turns it into a [`Recipe`], and
//! the [`display`] module renders it. [`AppShell`] ties these together and
//! owns the current recipe and the loading flag.

pub mod builder;
pub mod config;
pub mod display;
pub mod error;
pub mod fixtures;
pub mod input;
pub mod model;
pub mod providers;
pub mod request;
pub mod shell;
pub mod theme;

pub use builder::{AppShellBuilder, Provider};
pub use config::AppConfig;
pub use error::{AnalysisError, AppError};
pub use input::{InputController, InputState};
pub use model::{Difficulty, Ingredient, Recipe};
pub use providers::{AnalysisPort, FallbackProvider, MockProvider, OpenAIProvider};
pub use request::{AnalysisRequest, ImageFile};
pub use shell::{AppShell, Notice, PendingAnalysis};
pub use theme::{FileThemeStore, MemoryThemeStore, Theme, ThemeStore};

/// One-shot analysis of a dish description with the given backend
///
/// # Example
/// ```
/// # use recipe_nusantara::{generate_from_text, MockProvider};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipe = generate_from_text(&MockProvider::instant(), "Rendang beef curry").await?;
/// assert_eq!(recipe.name, "Sate Ayam Madura");
/// # Ok(())
/// # }
/// ```
pub async fn generate_from_text(
    port: &dyn AnalysisPort,
    prompt: &str,
) -> Result<Recipe, AnalysisError> {
    let request = AnalysisRequest::text(prompt)?;
    port.analyze(&request).await
}

/// One-shot analysis of an image file on disk.
///
/// Files that are not images are rejected with [`AnalysisError::InvalidInput`].
pub async fn generate_from_image_file(
    port: &dyn AnalysisPort,
    path: impl AsRef<std::path::Path>,
) -> Result<Recipe, AppError> {
    let image = ImageFile::load(path).await?;
    if !image.is_image() {
        return Err(AnalysisError::InvalidInput(format!(
            "{} is not an image ({})",
            image.name, image.mime
        ))
        .into());
    }
    let request = AnalysisRequest::image(image.to_base64())?;
    Ok(port.analyze(&request).await?)
}
