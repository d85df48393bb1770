//! Policy Viewer Renderers
//!
//! Presents section bodies in one of three interchangeable modes without
//! touching the underlying source text.
//!
//! # Architecture
//!
//! ```text
//! section text ──► TextRenderer ──► Displayable (HTML)
//!                     │
//!                     ├─ Raw       escaped <pre>
//!                     ├─ Compiled  pulldown-cmark ──► fenced blocks ──► HighlighterRegistry
//!                     └─ Code      HighlighterRegistry (configured language)
//! ```
//!
//! # Example
//!
//! ```rust
//! use pv_render::{MarkdownRenderer, PresentationMode, TextRenderer, Theme};
//!
//! let renderer = MarkdownRenderer::new();
//! let out = renderer
//!     .render("Convert the `Total` column.", PresentationMode::Compiled, Theme::Light)
//!     .unwrap();
//! assert!(out.html.contains("<code>Total</code>"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod highlight;
pub mod markdown;
pub mod mode;
pub mod renderer;

mod escape;

// Re-exports for convenience
pub use error::RenderError;
pub use highlight::{plain_block, Highlighter, HighlighterRegistry, SyntectHighlighter};
pub use markdown::MarkdownRenderer;
pub use mode::{Displayable, PresentationMode, Theme};
pub use renderer::{render_or_fallback, TextRenderer};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
