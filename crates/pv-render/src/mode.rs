//! Presentation modes and rendered output

use crate::escape::escape_html;
use serde::{Deserialize, Serialize};

/// How a section body is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresentationMode {
    /// Preformatted source text
    Raw,
    /// Compiled markdown with highlighted fenced blocks
    Compiled,
    /// Whole body highlighted as code
    Code,
}

/// Light or dark color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background
    #[default]
    Light,
    /// Dark background
    Dark,
}

impl Theme {
    /// The other scheme
    #[inline]
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Stored preference value
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored preference value
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Check for dark scheme
    #[inline]
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Rendered section body ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Displayable {
    /// Mode the body was actually rendered in
    pub mode: PresentationMode,
    /// HTML fragment
    pub html: String,
    /// Set when rendering fell back to raw text after a failure
    pub degraded: bool,
}

impl Displayable {
    /// Wrap rendered HTML
    #[inline]
    #[must_use]
    pub fn new(mode: PresentationMode, html: String) -> Self {
        Self {
            mode,
            html,
            degraded: false,
        }
    }

    /// Raw preformatted rendering of text
    #[must_use]
    pub fn raw(text: &str) -> Self {
        Self::new(
            PresentationMode::Raw,
            format!("<pre class=\"raw\">{}</pre>", escape_html(text)),
        )
    }

    /// Raw rendering marked as a fallback
    #[must_use]
    pub fn degraded(text: &str) -> Self {
        Self {
            degraded: true,
            ..Self::raw(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn theme_toggle_and_parse() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse(Theme::Light.as_str()), Some(Theme::Light));
        assert_eq!(Theme::parse("sepia"), None);
    }

    #[test]
    fn raw_escapes_markup() {
        let out = Displayable::raw("<b>x</b> & y");
        assert_eq!(out.html, "<pre class=\"raw\">&lt;b&gt;x&lt;/b&gt; &amp; y</pre>");
        assert_eq!(out.mode, PresentationMode::Raw);
        assert!(!out.degraded);
    }

    #[test]
    fn degraded_is_raw() {
        let out = Displayable::degraded("# Title");
        assert!(out.degraded);
        assert_eq!(out.mode, PresentationMode::Raw);
        assert!(out.html.contains("# Title"));
    }
}
