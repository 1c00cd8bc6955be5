use thiserror::Error;

/// Errors that can occur while turning a request into a recipe
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The request itself is unusable (empty prompt, bad image payload)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The analysis backend could not be reached or refused to serve
    #[error("Analysis service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The analysis backend did not answer in time
    #[error("Analysis service timed out: {0}")]
    UpstreamTimeout(String),

    /// The backend answered with something that is not a valid recipe
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// Whether retrying the same request might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AnalysisError::UpstreamUnavailable(_) | AnalysisError::UpstreamTimeout(_)
        )
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AnalysisError::UpstreamTimeout(err.to_string())
        } else if err.is_decode() {
            AnalysisError::MalformedResponse(err.to_string())
        } else {
            AnalysisError::UpstreamUnavailable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::MalformedResponse(err.to_string())
    }
}

/// Errors raised while composing or running the application around the port
#[derive(Error, Debug)]
pub enum AppError {
    /// Recipe analysis failed
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    /// Builder or provider selection problem
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Reading an image or the theme file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Serializing a recipe failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
