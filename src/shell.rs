use html_escape::encode_text;
use log::{debug, error, info, warn};
use std::fmt::Write as _;
use std::sync::Arc;

use crate::display;
use crate::error::AnalysisError;
use crate::fixtures::EXAMPLE_PROMPTS;
use crate::input::InputController;
use crate::model::Recipe;
use crate::providers::AnalysisPort;
use crate::request::{AnalysisRequest, ImageFile};
use crate::theme::{Theme, ThemeStore};

pub const APP_NAME: &str = "RecipeNusantara";
pub const APP_TAGLINE: &str = "Indonesian Recipe Generator";

/// User-visible message after a failed analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The user has to change what they submitted
    InvalidInput(String),
    /// Something went wrong on the backend; the same request may work later
    TryAgain(String),
}

impl Notice {
    pub fn from_error(err: &AnalysisError) -> Self {
        if let AnalysisError::InvalidInput(msg) = err {
            Notice::InvalidInput(msg.clone())
        } else if err.is_transient() {
            Notice::TryAgain("The recipe service is busy right now. Please try again.".to_string())
        } else {
            Notice::TryAgain("We could not put a recipe together. Please try again.".to_string())
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::InvalidInput(msg) | Notice::TryAgain(msg) => msg,
        }
    }
}

/// An analysis started by [`AppShell`], runnable without borrowing the shell.
///
/// Hand the outcome of [`PendingAnalysis::run`] back to [`AppShell::finish`].
pub struct PendingAnalysis {
    port: Arc<dyn AnalysisPort>,
    request: AnalysisRequest,
}

impl PendingAnalysis {
    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }

    /// Issue the single `analyze` call
    pub async fn run(self) -> Result<Recipe, AnalysisError> {
        debug!(
            "Submitting {} request to {}",
            self.request.kind(),
            self.port.provider_name()
        );
        self.port.analyze(&self.request).await
    }
}

/// Composes the input panel, the recipe display and the page chrome.
///
/// `current_recipe` and `is_loading` only ever change together: starting an
/// analysis clears the recipe and raises the flag, finishing one lowers the
/// flag and stores the recipe on success. The analysis itself runs outside
/// the shell, so theme and text edits stay possible while it is in flight.
pub struct AppShell {
    port: Arc<dyn AnalysisPort>,
    theme_store: Box<dyn ThemeStore>,
    theme: Theme,
    input: InputController,
    current_recipe: Option<Recipe>,
    is_loading: bool,
    notice: Option<Notice>,
}

impl AppShell {
    /// Compose the shell; the stored theme is read once here
    pub fn new(port: Box<dyn AnalysisPort>, theme_store: Box<dyn ThemeStore>) -> Self {
        let theme = Theme::from_stored(theme_store.load().as_deref());
        AppShell {
            port: Arc::from(port),
            theme_store,
            theme,
            input: InputController::new(),
            current_recipe: None,
            is_loading: false,
            notice: None,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.port.provider_name()
    }

    pub fn current_recipe(&self) -> Option<&Recipe> {
        self.current_recipe.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn input(&self) -> &InputController {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputController {
        &mut self.input
    }

    pub fn select_image(&mut self, image: ImageFile) -> bool {
        self.input.select_image(image)
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input.set_text(text);
    }

    /// Flip the theme and persist the new value
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        info!("Theme switched to: {}", self.theme);
        if let Err(e) = self.theme_store.save(self.theme.as_str()) {
            warn!("Failed to persist theme: {}", e);
        }
        self.theme
    }

    /// Start an image analysis; `None` unless an image is selected and nothing is running
    pub fn begin_image_analysis(&mut self) -> Option<PendingAnalysis> {
        let request = self.input.begin_image_submission(self.is_loading)?;
        Some(self.begin(request))
    }

    /// Start a text analysis; `None` when the field is blank or a run is in progress
    pub fn begin_text_analysis(&mut self) -> Option<PendingAnalysis> {
        let request = self.input.begin_text_submission(self.is_loading)?;
        Some(self.begin(request))
    }

    fn begin(&mut self, request: AnalysisRequest) -> PendingAnalysis {
        self.is_loading = true;
        self.current_recipe = None;
        self.notice = None;

        PendingAnalysis {
            port: Arc::clone(&self.port),
            request,
        }
    }

    /// Record the outcome of a pending analysis and lower the loading flag.
    ///
    /// Ignored when no analysis is in flight.
    pub fn finish(&mut self, outcome: Result<Recipe, AnalysisError>) -> Option<&Recipe> {
        if !self.is_loading {
            warn!("Discarding analysis outcome, nothing was in flight");
            return self.current_recipe.as_ref();
        }
        self.input.complete();

        match outcome {
            Ok(recipe) => {
                info!("Recipe generated successfully: {}", recipe.name);
                self.current_recipe = Some(recipe);
            }
            Err(e) => {
                error!("Failed to generate recipe: {}", e);
                self.notice = Some(Notice::from_error(&e));
            }
        }
        self.is_loading = false;

        self.current_recipe.as_ref()
    }

    /// "Analyze Image": begin, await and finish in one go
    pub async fn analyze_image(&mut self) -> Option<&Recipe> {
        let pending = self.begin_image_analysis()?;
        let outcome = pending.run().await;
        self.finish(outcome)
    }

    /// "Generate Recipe": begin, await and finish in one go
    pub async fn generate_recipe(&mut self) -> Option<&Recipe> {
        let pending = self.begin_text_analysis()?;
        let outcome = pending.run().await;
        self.finish(outcome)
    }

    /// Render the whole page as a standalone HTML document
    pub fn render_page(&self) -> String {
        let mut page = String::new();
        let theme_class = match self.theme {
            Theme::Dark => " class=\"dark\"",
            Theme::Light => "",
        };

        let _ = write!(
            page,
            "<!DOCTYPE html>\n<html lang=\"en\"{}>\n<head><meta charset=\"utf-8\"><title>{} - {}</title></head>\n<body>\n",
            theme_class, APP_NAME, APP_TAGLINE
        );
        page.push_str(&render_header(self.theme));
        page.push_str(HERO_HTML);
        page.push_str("<main>\n");
        page.push_str(&self.render_input_panel());
        if let Some(notice) = &self.notice {
            let kind = match notice {
                Notice::InvalidInput(_) => "invalid-input",
                Notice::TryAgain(_) => "try-again",
            };
            let _ = writeln!(
                page,
                "<div class=\"notice {}\" role=\"alert\">{}</div>",
                kind,
                encode_text(notice.message())
            );
        }
        page.push_str(&display::render_html(self.current_recipe(), self.theme));
        page.push_str("\n</main>\n");
        page.push_str(FOOTER_HTML);
        page.push_str("</body>\n</html>\n");

        page
    }

    fn render_input_panel(&self) -> String {
        let mut panel = String::from("<section class=\"input-panel\">");

        match self.input.preview() {
            Some(preview) => {
                let _ = write!(
                    panel,
                    "<img src=\"{}\" alt=\"Food preview\" data-testid=\"img-food-preview\"><p>Image ready for analysis</p>",
                    html_escape::encode_double_quoted_attribute(preview)
                );
            }
            None => panel.push_str("<p>Drop your food image here</p><p>or click to browse from your device</p>"),
        }
        let _ = write!(
            panel,
            "<button data-testid=\"button-analyze-image\"{}>Analyze Image</button>",
            disabled_attr(!self.input.can_analyze_image(self.is_loading))
        );

        let _ = write!(
            panel,
            "<textarea data-testid=\"textarea-dish-description\">{}</textarea><button data-testid=\"button-analyze-text\"{}>Generate Recipe</button><div class=\"examples\">",
            encode_text(self.input.text()),
            disabled_attr(!self.input.can_generate(self.is_loading))
        );
        for (index, prompt) in EXAMPLE_PROMPTS.iter().enumerate() {
            let _ = write!(
                panel,
                "<span class=\"badge\" data-testid=\"badge-example-{}\">{}</span>",
                index, prompt
            );
        }
        panel.push_str("</div></section>\n");

        panel
    }
}

fn disabled_attr(disabled: bool) -> &'static str {
    if disabled {
        " disabled"
    } else {
        ""
    }
}

fn render_header(theme: Theme) -> String {
    // The toggle shows the theme it switches to
    let toggle_label = match theme {
        Theme::Light => "Dark mode",
        Theme::Dark => "Light mode",
    };
    format!(
        "<header><h1 data-testid=\"text-app-name\">{}</h1><p data-testid=\"text-app-tagline\">{}</p><button data-testid=\"button-theme-toggle\">{}</button></header>\n",
        APP_NAME, APP_TAGLINE, toggle_label
    )
}

const HERO_HTML: &str = "<section class=\"hero\"><h2 data-testid=\"text-hero-title\">Explore the culinary world of the Indonesian archipelago and explore the richness of flavors</h2><p data-testid=\"text-hero-subtitle\">Discover authentic Indonesian recipes with AI-powered analysis. Upload an image or describe a dish to unlock its secrets, ingredients, and cultural heritage.</p></section>\n";

const FOOTER_HTML: &str = "<footer><p data-testid=\"text-copyright\">Copyright 2025</p><p data-testid=\"text-footer-description\">Celebrating Indonesian culinary heritage through technology</p></footer>\n";
