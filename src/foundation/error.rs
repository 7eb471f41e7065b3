/// Convenience result type used across the crate.
pub type SplashResult<T> = Result<T, SplashError>;

/// Errors surfaced at the edges of the splash engine.
///
/// The animation core never propagates these through its frame loop; they come from config
/// parsing, surface acquisition and rasterization.
#[derive(thiserror::Error, Debug)]
pub enum SplashError {
    /// Invalid configuration or argument.
    #[error("validation error: {0}")]
    Validation(String),

    /// A draw surface could not be acquired or used.
    #[error("surface error: {0}")]
    Surface(String),

    /// Text shaping or rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// Config (de)serialization failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SplashError {
    /// Build a [`SplashError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SplashError::Surface`].
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`SplashError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SplashError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
