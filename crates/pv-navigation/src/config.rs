//! Viewer configuration
//!
//! All fields have defaults; a TOML document may override any subset.
//!
//! ```toml
//! focus_line = 120.0
//! origin = "https://policies.example.com"
//! base_path = "/viewer"
//! search_mode = "literal"
//! ```

use crate::error::ConfigError;
use crate::substitution::SearchMode;
use crate::tracker::DEFAULT_FOCUS_LINE;
use serde::{Deserialize, Serialize};

/// Navigation engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Viewport offset of the focus line used for breadcrumbs
    pub focus_line: f64,
    /// Scheme and host used in deep links
    pub origin: String,
    /// Page path used in deep links
    pub base_path: String,
    /// Language assumed for code sections
    pub code_language: String,
    /// Highlighting theme for the light scheme
    pub light_theme: String,
    /// Highlighting theme for the dark scheme
    pub dark_theme: String,
    /// Preference-store key holding the theme
    pub theme_key: String,
    /// Largest section body rendered (bytes)
    pub max_render_bytes: usize,
    /// How find/replace interprets search text
    pub search_mode: SearchMode,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            focus_line: DEFAULT_FOCUS_LINE,
            origin: "http://localhost:3000".to_string(),
            base_path: "/".to_string(),
            code_language: pv_render::MarkdownRenderer::DEFAULT_CODE_LANGUAGE.to_string(),
            light_theme: pv_render::SyntectHighlighter::DEFAULT_LIGHT_THEME.to_string(),
            dark_theme: pv_render::SyntectHighlighter::DEFAULT_DARK_THEME.to_string(),
            theme_key: "theme".to_string(),
            max_render_bytes: pv_render::MarkdownRenderer::DEFAULT_MAX_SOURCE_LEN,
            search_mode: SearchMode::default(),
        }
    }
}

impl ViewerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// Returns `ConfigError` if the document does not parse or a value is
    /// out of range
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` naming the first bad field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.focus_line.is_finite() || self.focus_line < 0.0 {
            return Err(ConfigError::invalid(
                "focus_line",
                format!("must be a non-negative finite offset, got {}", self.focus_line),
            ));
        }
        if self.origin.is_empty() || !self.origin.contains("://") {
            return Err(ConfigError::invalid(
                "origin",
                format!("expected scheme://host, got '{}'", self.origin),
            ));
        }
        if self.theme_key.is_empty() {
            return Err(ConfigError::invalid("theme_key", "must not be empty"));
        }
        if self.max_render_bytes == 0 {
            return Err(ConfigError::invalid("max_render_bytes", "must be positive"));
        }
        Ok(())
    }

    /// With focus line offset
    #[inline]
    #[must_use]
    pub fn with_focus_line(mut self, focus_line: f64) -> Self {
        self.focus_line = focus_line;
        self
    }

    /// With deep-link origin and path
    #[inline]
    #[must_use]
    pub fn with_location(
        mut self,
        origin: impl Into<String>,
        base_path: impl Into<String>,
    ) -> Self {
        self.origin = origin.into();
        self.base_path = base_path.into();
        self
    }

    /// With search mode
    #[inline]
    #[must_use]
    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    /// With code language
    #[inline]
    #[must_use]
    pub fn with_code_language(mut self, language: impl Into<String>) -> Self {
        self.code_language = language.into();
        self
    }

    /// Page locator without fragment, e.g. `https://host/viewer`
    #[must_use]
    pub fn page_url(&self) -> String {
        let origin = self.origin.trim_end_matches('/');
        let path = self.base_path.trim();
        if path.is_empty() || path == "/" {
            format!("{origin}/")
        } else if path.starts_with('/') {
            format!("{origin}{path}")
        } else {
            format!("{origin}/{path}")
        }
    }

    /// Renderer configured from these settings
    #[must_use]
    pub fn build_renderer(&self) -> pv_render::MarkdownRenderer {
        let mut highlighters = pv_render::HighlighterRegistry::new();
        highlighters.register(
            pv_render::SyntectHighlighter::new()
                .with_themes(self.light_theme.clone(), self.dark_theme.clone()),
        );
        pv_render::MarkdownRenderer::with_highlighters(highlighters)
            .with_code_language(self.code_language.clone())
            .with_max_source_len(self.max_render_bytes)
    }
}
