//! Syntax highlighters keyed by language tag
//!
//! Fenced code blocks carry a language tag (`python`, `rust`, ...). The
//! [`HighlighterRegistry`] maps a tag to the highest-priority highlighter
//! that supports it; unknown tags render as escaped plain text.

use crate::error::RenderError;
use crate::escape::escape_html;
use crate::mode::Theme;
use syntect::highlighting::ThemeSet;
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Highlighter trait for turning code into themed HTML
///
/// Implement this trait to add support for new languages.
pub trait Highlighter: Send + Sync + 'static {
    /// Highlight code as the given language
    ///
    /// # Errors
    /// Returns `RenderError` if the language is unsupported or highlighting
    /// fails
    fn highlight(&self, code: &str, language: &str, theme: Theme) -> Result<String, RenderError>;

    /// Language tags this highlighter is known for (lowercase)
    fn languages(&self) -> &[&str];

    /// Check if this highlighter can handle the language tag
    fn supports(&self, language: &str) -> bool {
        let tag = language.to_lowercase();
        self.languages().iter().any(|l| *l == tag)
    }

    /// Highlighter priority (higher = tried first when several match)
    fn priority(&self) -> i32 {
        0
    }
}

/// Registry of highlighters, highest priority first
pub struct HighlighterRegistry {
    highlighters: Vec<Box<dyn Highlighter>>,
}

impl Default for HighlighterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HighlighterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlighterRegistry")
            .field("highlighter_count", &self.highlighters.len())
            .field("languages", &self.all_languages())
            .finish()
    }
}

impl HighlighterRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            highlighters: Vec::new(),
        }
    }

    /// Register a highlighter
    pub fn register<H: Highlighter>(&mut self, highlighter: H) {
        self.highlighters.push(Box::new(highlighter));
        // Sort by priority (higher first)
        self.highlighters
            .sort_by_key(|h| std::cmp::Reverse(h.priority()));
    }

    /// Find highlighter for language tag
    #[must_use]
    pub fn find(&self, language: &str) -> Option<&dyn Highlighter> {
        self.highlighters
            .iter()
            .find(|h| h.supports(language))
            .map(|h| &**h)
    }

    /// Get all advertised language tags
    #[must_use]
    pub fn all_languages(&self) -> Vec<&str> {
        self.highlighters
            .iter()
            .flat_map(|h| h.languages())
            .copied()
            .collect()
    }

    /// Number of registered highlighters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.highlighters.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.highlighters.is_empty()
    }

    /// Highlight code, propagating highlighter errors
    ///
    /// A missing or unregistered tag is not an error: the code is returned
    /// as escaped plain text.
    ///
    /// # Errors
    /// Returns the highlighter's `RenderError` if it fails
    pub fn highlight(
        &self,
        code: &str,
        language: Option<&str>,
        theme: Theme,
    ) -> Result<String, RenderError> {
        match language.and_then(|tag| self.find(tag).map(|h| (tag, h))) {
            Some((tag, highlighter)) => highlighter.highlight(code, tag, theme),
            None => {
                tracing::debug!(language = ?language, "no highlighter registered, rendering plain");
                Ok(plain_block(code, language))
            }
        }
    }

    /// Highlight code, falling back to plain text on any failure
    #[must_use]
    pub fn highlight_or_plain(&self, code: &str, language: Option<&str>, theme: Theme) -> String {
        self.highlight(code, language, theme).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "highlighting failed, rendering plain");
            plain_block(code, language)
        })
    }
}

/// Escaped `<pre><code>` block, tagged with the language when known
#[must_use]
pub fn plain_block(code: &str, language: Option<&str>) -> String {
    match language {
        Some(tag) if !tag.is_empty() => format!(
            "<pre><code class=\"language-{}\">{}</code></pre>",
            escape_html(tag),
            escape_html(code)
        ),
        _ => format!("<pre><code>{}</code></pre>", escape_html(code)),
    }
}

/// Highlighter backed by syntect's bundled syntaxes and themes
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    light_theme: String,
    dark_theme: String,
}

impl std::fmt::Debug for SyntectHighlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntectHighlighter")
            .field("light_theme", &self.light_theme)
            .field("dark_theme", &self.dark_theme)
            .finish_non_exhaustive()
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntectHighlighter {
    /// Theme used for the light scheme unless overridden
    pub const DEFAULT_LIGHT_THEME: &'static str = "InspiredGitHub";
    /// Theme used for the dark scheme unless overridden
    pub const DEFAULT_DARK_THEME: &'static str = "base16-ocean.dark";

    const LANGUAGES: &'static [&'static str] = &[
        "python", "py", "rust", "rs", "javascript", "js", "typescript", "ts", "json", "yaml",
        "yml", "sql", "shell", "bash", "sh", "html", "css", "java", "go", "toml", "markdown",
        "md",
    ];

    /// Create highlighter with default syntaxes and themes
    #[must_use]
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            light_theme: Self::DEFAULT_LIGHT_THEME.to_string(),
            dark_theme: Self::DEFAULT_DARK_THEME.to_string(),
        }
    }

    /// With named light and dark themes
    #[must_use]
    pub fn with_themes(mut self, light: impl Into<String>, dark: impl Into<String>) -> Self {
        self.light_theme = light.into();
        self.dark_theme = dark.into();
        self
    }

    /// Names of the bundled themes
    #[must_use]
    pub fn theme_names(&self) -> Vec<&str> {
        self.theme_set.themes.keys().map(String::as_str).collect()
    }

    /// Find syntax definition for a language name
    ///
    /// Tries the name, then the name as an extension, then a mapping of
    /// common names to extensions.
    fn find_syntax_for_language(&self, lang: &str) -> Option<&SyntaxReference> {
        let lang_lower = lang.to_lowercase();

        if let Some(syntax) = self.syntax_set.find_syntax_by_token(&lang_lower) {
            return Some(syntax);
        }

        if let Some(syntax) = self.syntax_set.find_syntax_by_extension(&lang_lower) {
            return Some(syntax);
        }

        let mapped = match lang_lower.as_str() {
            "rust" => "rs",
            "python" => "py",
            "javascript" => "js",
            "typescript" => "ts",
            "shell" | "bash" => "sh",
            "yaml" => "yml",
            "markdown" => "md",
            other => other,
        };

        self.syntax_set
            .find_syntax_by_extension(mapped)
            .or_else(|| self.syntax_set.find_syntax_by_name(mapped))
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: &str, theme: Theme) -> Result<String, RenderError> {
        let syntax = self
            .find_syntax_for_language(language)
            .ok_or_else(|| RenderError::UnsupportedLanguage(language.to_string()))?;

        let theme_name = match theme {
            Theme::Light => &self.light_theme,
            Theme::Dark => &self.dark_theme,
        };
        let theme = self
            .theme_set
            .themes
            .get(theme_name)
            .ok_or_else(|| {
                RenderError::highlight(language, format!("unknown theme '{theme_name}'"))
            })?;

        syntect::html::highlighted_html_for_string(code, &self.syntax_set, syntax, theme)
            .map_err(|e| RenderError::highlight(language, e.to_string()))
    }

    fn languages(&self) -> &[&str] {
        Self::LANGUAGES
    }

    fn supports(&self, language: &str) -> bool {
        self.find_syntax_for_language(language).is_some()
    }
}
