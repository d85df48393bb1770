//! Markdown section renderer
//!
//! Uses pulldown-cmark to compile section bodies to HTML. Fenced code
//! blocks are handed to the [`HighlighterRegistry`] by language tag.

use crate::error::RenderError;
use crate::highlight::{HighlighterRegistry, SyntectHighlighter};
use crate::mode::{Displayable, PresentationMode, Theme};
use crate::renderer::TextRenderer;
use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser as MdParser, Tag, TagEnd};

/// Renderer for raw, compiled and code presentation
#[derive(Debug)]
pub struct MarkdownRenderer {
    highlighters: HighlighterRegistry,
    code_language: String,
    max_source_len: usize,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Language assumed for code sections unless configured
    pub const DEFAULT_CODE_LANGUAGE: &'static str = "python";
    /// Largest body rendered unless configured (bytes)
    pub const DEFAULT_MAX_SOURCE_LEN: usize = 256 * 1024;

    /// Create renderer with the syntect highlighter registered
    #[must_use]
    pub fn new() -> Self {
        let mut highlighters = HighlighterRegistry::new();
        highlighters.register(SyntectHighlighter::new());
        Self::with_highlighters(highlighters)
    }

    /// Create renderer over a custom highlighter registry
    #[must_use]
    pub fn with_highlighters(highlighters: HighlighterRegistry) -> Self {
        Self {
            highlighters,
            code_language: Self::DEFAULT_CODE_LANGUAGE.to_string(),
            max_source_len: Self::DEFAULT_MAX_SOURCE_LEN,
        }
    }

    /// With language used for code sections
    #[must_use]
    pub fn with_code_language(mut self, language: impl Into<String>) -> Self {
        self.code_language = language.into();
        self
    }

    /// With maximum body size in bytes
    #[must_use]
    pub fn with_max_source_len(mut self, max: usize) -> Self {
        self.max_source_len = max;
        self
    }

    /// Registered highlighters
    #[inline]
    #[must_use]
    pub fn highlighters(&self) -> &HighlighterRegistry {
        &self.highlighters
    }

    /// Compile markdown to HTML, highlighting fenced blocks
    fn compile(&self, text: &str, theme: Theme) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let mut events = Vec::new();
        let mut current_code: Option<(Option<String>, String)> = None;

        for event in MdParser::new_ext(text, options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    current_code = Some((lang, String::new()));
                }
                Event::Text(chunk) if current_code.is_some() => {
                    if let Some((_, ref mut code)) = current_code {
                        code.push_str(&chunk);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = current_code.take() {
                        let block = self
                            .highlighters
                            .highlight_or_plain(&code, lang.as_deref(), theme);
                        events.push(Event::Html(block.into()));
                    }
                }
                // Markup in section text is shown, never interpreted
                Event::Html(markup) | Event::InlineHtml(markup) => {
                    events.push(Event::Text(markup));
                }
                other => events.push(other),
            }
        }

        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }
}

impl TextRenderer for MarkdownRenderer {
    fn render(
        &self,
        text: &str,
        mode: PresentationMode,
        theme: Theme,
    ) -> Result<Displayable, RenderError> {
        if text.len() > self.max_source_len {
            return Err(RenderError::TooLarge {
                len: text.len(),
                max: self.max_source_len,
            });
        }

        match mode {
            PresentationMode::Raw => Ok(Displayable::raw(text)),
            PresentationMode::Compiled => Ok(Displayable::new(mode, self.compile(text, theme))),
            PresentationMode::Code => {
                let html = self
                    .highlighters
                    .highlight(text, Some(&self.code_language), theme)?;
                Ok(Displayable::new(mode, html))
            }
        }
    }
}
