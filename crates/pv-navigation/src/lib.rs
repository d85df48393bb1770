//! Policy Viewer Navigation Engine
//!
//! Filtering, position tracking, find/replace previews, deep links and the
//! state that ties them together.
//!
//! # Architecture
//!
//! ```text
//! Catalog ──► filter ──► FilteredCatalog ──► surface::hierarchy ──► anchors
//!                                                                     │
//!   breadcrumb ◄── tracker::resolve ◄── (address, rect) on scroll ◄───┘
//!
//!   SubstitutionEngine (overrides by section) ──► copy / render
//! ```
//!
//! Data flows one way from the catalog; the tracker only writes the
//! breadcrumb, and overrides never touch the catalog.
//!
//! # Example
//!
//! ```rust
//! use pv_catalog::{Catalog, Subtopic, Topic};
//! use pv_navigation::{AppState, MemoryClipboard, ViewerConfig};
//!
//! let catalog = Catalog::load(vec![Topic::new(
//!     "Conversions",
//!     vec![Subtopic::named("2A Conversion").with_code("df['GMV'].astype(float)")],
//! )]);
//! let mut state = AppState::new(catalog, ViewerConfig::default());
//!
//! state.replace("section-0-0-code", "GMV", "Revenue").unwrap();
//! let mut clipboard = MemoryClipboard::new();
//! let text = state.copy_content("section-0-0-code", &mut clipboard).unwrap();
//! assert_eq!(text, "df['Revenue'].astype(float)");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod collaborators;
pub mod config;
pub mod error;
pub mod filter;
pub mod state;
pub mod substitution;
pub mod surface;
pub mod theme;
pub mod tracker;

// Re-exports for convenience
pub use collaborators::{
    AmbientPreference, Clipboard, MemoryClipboard, MemoryPreferenceStore, PreferenceStore,
    SystemPreference,
};
pub use config::ViewerConfig;
pub use error::{
    CollaboratorError, ConfigError, NavigationError, NavigationResult, SubstitutionError,
};
pub use filter::{filter, FilteredCatalog, FilteredTopic};
pub use state::AppState;
pub use substitution::{substitute, SearchMode, SubstitutionEngine};
pub use surface::{
    hierarchy, presentation_mode, NavSection, NavSubtopic, NavTopic, NavigationSurface,
    COPY_NOTICE,
};
pub use theme::ThemeController;
pub use tracker::{breadcrumb_for_fragment, Anchor, Breadcrumb, PositionTracker, Rect};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for embedding the viewer
    pub use crate::{
        AppState, Anchor, Breadcrumb, Clipboard, NavigationError, PreferenceStore, SearchMode,
        ViewerConfig,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
