use log::{debug, info};

use crate::error::AnalysisError;
use crate::fixtures::EXAMPLE_PROMPTS;
use crate::model::Recipe;
use crate::providers::AnalysisPort;
use crate::request::{AnalysisRequest, ImageFile};

/// Where the input panel is in its upload / submit cycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputState {
    #[default]
    Idle,
    ImageSelected {
        image: ImageFile,
        /// `data:` URL shown in the upload area
        preview: String,
    },
    Submitting,
}

/// Captures one analysis request from the user and hands it to the port.
///
/// The controller never decides what happens to a recipe; it returns the
/// outcome of the single `analyze` call to its caller.
#[derive(Debug, Default)]
pub struct InputController {
    state: InputState,
    text: String,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Preview of the selected image, if any
    pub fn preview(&self) -> Option<&str> {
        match &self.state {
            InputState::ImageSelected { preview, .. } => Some(preview),
            _ => None,
        }
    }

    /// Accept a picked or dropped file.
    ///
    /// Files that are not images are ignored and leave the state untouched.
    pub fn select_image(&mut self, image: ImageFile) -> bool {
        if !image.is_image() {
            debug!("Ignoring non-image file {} ({})", image.name, image.mime);
            return false;
        }
        if self.state == InputState::Submitting {
            return false;
        }

        info!("Image uploaded: {}", image.name);
        let preview = image.preview();
        self.state = InputState::ImageSelected { image, preview };
        true
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Copy an example prompt into the text field without submitting it
    pub fn choose_example(&mut self, index: usize) -> Option<&'static str> {
        let prompt = EXAMPLE_PROMPTS.get(index).copied()?;
        info!("Selected example prompt: {}", prompt);
        self.text = prompt.to_string();
        Some(prompt)
    }

    /// Whether "Generate Recipe" is enabled
    pub fn can_generate(&self, is_loading: bool) -> bool {
        !is_loading && self.state != InputState::Submitting && !self.text.trim().is_empty()
    }

    /// Whether "Analyze Image" is enabled
    pub fn can_analyze_image(&self, is_loading: bool) -> bool {
        !is_loading && matches!(self.state, InputState::ImageSelected { .. })
    }

    /// Encode the selected image and move to `Submitting`.
    ///
    /// Returns `None` when the control is disabled.
    pub fn begin_image_submission(&mut self, is_loading: bool) -> Option<AnalysisRequest> {
        if !self.can_analyze_image(is_loading) {
            return None;
        }
        let InputState::ImageSelected { image, .. } =
            std::mem::replace(&mut self.state, InputState::Submitting)
        else {
            return None;
        };

        Some(AnalysisRequest::Image {
            payload: image.to_base64(),
        })
    }

    /// Build a text request from the trimmed field and move to `Submitting`.
    ///
    /// Returns `None` when the field is blank or a submission is running.
    pub fn begin_text_submission(&mut self, is_loading: bool) -> Option<AnalysisRequest> {
        if !self.can_generate(is_loading) {
            return None;
        }
        let request = AnalysisRequest::text(&self.text).ok()?;
        self.state = InputState::Submitting;
        Some(request)
    }

    /// Return to `Idle` once the submission started by `begin_*` has settled
    pub fn complete(&mut self) {
        self.state = InputState::Idle;
    }

    /// Issue the single analysis call and return to `Idle` whatever the outcome
    pub async fn submit(
        &mut self,
        port: &dyn AnalysisPort,
        request: AnalysisRequest,
    ) -> Result<Recipe, AnalysisError> {
        debug!("Submitting {} request to {}", request.kind(), port.provider_name());
        let outcome = port.analyze(&request).await;
        self.complete();
        outcome
    }
}
