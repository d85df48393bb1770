//! Text renderer contract
//!
//! The navigation engine only depends on [`TextRenderer`]; concrete
//! renderers live alongside it in this crate or in the embedding shell.

use crate::error::RenderError;
use crate::mode::{Displayable, PresentationMode, Theme};

/// Turns a section's source text into displayable output
pub trait TextRenderer {
    /// Render text in the requested mode
    ///
    /// # Errors
    /// Returns `RenderError` if the body cannot be rendered in that mode
    fn render(
        &self,
        text: &str,
        mode: PresentationMode,
        theme: Theme,
    ) -> Result<Displayable, RenderError>;
}

/// Render text, degrading to raw output if the renderer fails
///
/// The failure stays local to this one body; callers rendering sibling
/// sections are unaffected. A body over the renderer's size limit is cut
/// to that limit before it is shown raw.
pub fn render_or_fallback<R>(
    renderer: &R,
    text: &str,
    mode: PresentationMode,
    theme: Theme,
) -> Displayable
where
    R: TextRenderer + ?Sized,
{
    match renderer.render(text, mode, theme) {
        Ok(displayable) => displayable,
        Err(RenderError::TooLarge { len, max }) => {
            tracing::warn!(len, max, ?mode, "body too large, showing truncated raw text");
            Displayable::degraded(truncate(text, max))
        }
        Err(e) => {
            tracing::warn!(error = %e, ?mode, "render failed, showing raw text");
            Displayable::degraded(text)
        }
    }
}

/// Longest prefix of `text` within `max` bytes, cut on a char boundary
fn truncate(text: &str, max: usize) -> &str {
    let mut end = max.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FailingRenderer;

    impl TextRenderer for FailingRenderer {
        fn render(
            &self,
            _text: &str,
            _mode: PresentationMode,
            _theme: Theme,
        ) -> Result<Displayable, RenderError> {
            Err(RenderError::Markup("unclosed fence".to_string()))
        }
    }

    struct EchoRenderer;

    impl TextRenderer for EchoRenderer {
        fn render(
            &self,
            text: &str,
            mode: PresentationMode,
            _theme: Theme,
        ) -> Result<Displayable, RenderError> {
            Ok(Displayable::new(mode, text.to_string()))
        }
    }

    struct LimitedRenderer(usize);

    impl TextRenderer for LimitedRenderer {
        fn render(
            &self,
            text: &str,
            mode: PresentationMode,
            _theme: Theme,
        ) -> Result<Displayable, RenderError> {
            if text.len() > self.0 {
                return Err(RenderError::TooLarge {
                    len: text.len(),
                    max: self.0,
                });
            }
            Ok(Displayable::new(mode, text.to_string()))
        }
    }

    #[test]
    fn failure_degrades_to_raw() {
        let out = render_or_fallback(
            &FailingRenderer,
            "**bold**",
            PresentationMode::Compiled,
            Theme::Light,
        );
        assert!(out.degraded);
        assert_eq!(out.mode, PresentationMode::Raw);
        assert!(out.html.contains("**bold**"));
    }

    #[test]
    fn success_passes_through() {
        let out = render_or_fallback(&EchoRenderer, "x", PresentationMode::Code, Theme::Dark);
        assert_eq!(out, Displayable::new(PresentationMode::Code, "x".to_string()));
    }

    #[test]
    fn oversized_body_is_cut_to_limit() {
        let out = render_or_fallback(
            &LimitedRenderer(4),
            "123456",
            PresentationMode::Compiled,
            Theme::Light,
        );
        assert!(out.degraded);
        assert_eq!(out, Displayable::degraded("1234"));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate("aé", 2), "a");
        assert_eq!(truncate("abc", 10), "abc");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn works_through_trait_object() {
        let renderer: &dyn TextRenderer = &FailingRenderer;
        assert!(render_or_fallback(renderer, "x", PresentationMode::Raw, Theme::Light).degraded);
    }
}
