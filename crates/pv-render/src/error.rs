//! Error types for section rendering

/// Errors while turning a section body into displayable output
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Body exceeds the configured render limit
    #[error("section body too large: {len} bytes (max: {max})")]
    TooLarge { len: usize, max: usize },

    /// Structured markup could not be compiled
    #[error("markup error: {0}")]
    Markup(String),

    /// Highlighter rejected the code
    #[error("highlight failed for '{language}': {message}")]
    Highlight { language: String, message: String },

    /// Highlighter has no syntax for the language
    #[error("unsupported language: '{0}'")]
    UnsupportedLanguage(String),
}

impl RenderError {
    /// Create highlight error for language
    pub fn highlight(language: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Highlight {
            language: language.into(),
            message: message.into(),
        }
    }
}
