//! Application state
//!
//! [`AppState`] owns everything the viewer mutates: the filter query, the
//! raw toggle, the theme, the breadcrumb and the overrides. Each event
//! handler is a thin write over one of the pure components.

use crate::collaborators::{AmbientPreference, Clipboard, PreferenceStore};
use crate::config::ViewerConfig;
use crate::error::NavigationResult;
use crate::filter::{filter, FilteredCatalog};
use crate::substitution::SubstitutionEngine;
use crate::surface::{NavigationSurface, COPY_NOTICE};
use crate::theme::ThemeController;
use crate::tracker::{Anchor, Breadcrumb, PositionTracker};
use pv_catalog::Catalog;
use pv_render::{Displayable, TextRenderer, Theme};

/// Label of the raw toggle while compiled output is shown
pub const SHOW_RAW_LABEL: &str = "Show Raw";
/// Label of the raw toggle while raw output is shown
pub const SHOW_COMPILED_LABEL: &str = "Show Compiled";

/// Single owner of the viewer's mutable state
#[derive(Debug, Clone)]
pub struct AppState {
    catalog: Catalog,
    config: ViewerConfig,
    query: String,
    raw: bool,
    theme: ThemeController,
    tracker: PositionTracker,
    overrides: SubstitutionEngine,
    notice: Option<&'static str>,
}

impl AppState {
    /// Create state with the light theme; call [`Self::load_preferences`] to
    /// restore the persisted one
    #[must_use]
    pub fn new(catalog: Catalog, config: ViewerConfig) -> Self {
        let theme = ThemeController::new(config.theme_key.clone(), Theme::default());
        let tracker = PositionTracker::new(config.focus_line);
        let overrides = SubstitutionEngine::new(config.search_mode);
        Self {
            catalog,
            config,
            query: String::new(),
            raw: false,
            theme,
            tracker,
            overrides,
            notice: None,
        }
    }

    /// The catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Restore the theme from the preference store
    pub fn load_preferences<S, A>(&mut self, store: &S, ambient: &A) -> Theme
    where
        S: PreferenceStore + ?Sized,
        A: AmbientPreference + ?Sized,
    {
        self.theme = ThemeController::load(self.config.theme_key.clone(), store, ambient);
        self.theme.theme()
    }

    /// Set the initial breadcrumb from a location fragment
    ///
    /// Returns `false` if the fragment does not resolve.
    pub fn load_fragment(&mut self, fragment: &str) -> bool {
        self.tracker.jump_to(&self.catalog, fragment)
    }

    /// Current filter query
    #[inline]
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the filter query
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Catalog filtered by the current query
    #[must_use]
    pub fn filtered(&self) -> FilteredCatalog<'_> {
        filter(&self.catalog, &self.query)
    }

    /// Surface over the catalog and current overrides
    #[must_use]
    pub fn surface(&self) -> NavigationSurface<'_> {
        NavigationSurface::new(&self.catalog, &self.overrides, &self.config)
    }

    /// Whether raw output is shown
    #[inline]
    #[must_use]
    pub fn raw(&self) -> bool {
        self.raw
    }

    /// Flip the raw toggle
    pub fn toggle_raw(&mut self) -> bool {
        self.raw = !self.raw;
        self.raw
    }

    /// Label for the raw toggle button
    #[inline]
    #[must_use]
    pub fn raw_toggle_label(&self) -> &'static str {
        if self.raw {
            SHOW_COMPILED_LABEL
        } else {
            SHOW_RAW_LABEL
        }
    }

    /// Current theme
    #[inline]
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    /// Flip the theme and persist it best-effort
    pub fn toggle_theme<S>(&mut self, store: &mut S) -> Theme
    where
        S: PreferenceStore + ?Sized,
    {
        self.theme.toggle(store)
    }

    /// Recompute the breadcrumb after a scroll
    pub fn on_scroll(&mut self, anchors: &[Anchor]) -> &Breadcrumb {
        self.tracker.on_scroll(&self.catalog, anchors)
    }

    /// Current breadcrumb
    #[inline]
    #[must_use]
    pub fn breadcrumb(&self) -> &Breadcrumb {
        self.tracker.current()
    }

    /// Replaced text of a section, computed from its catalog text
    ///
    /// # Errors
    /// Returns `NavigationError` if the address is not a resolvable section
    /// or the search text is not a valid pattern
    pub fn preview(
        &self,
        address: &str,
        search: &str,
        replacement: &str,
    ) -> NavigationResult<String> {
        let section = self.surface().resolve_section(address)?;
        let original = self.catalog.section_text(section)?;
        Ok(self.overrides.preview(section, search, replacement, original)?)
    }

    /// Store override text for a section
    ///
    /// # Errors
    /// Returns `NavigationError` if the address is not a resolvable section
    pub fn commit(&mut self, address: &str, text: impl Into<String>) -> NavigationResult<()> {
        let section = self.surface().resolve_section(address)?;
        self.overrides.commit(section, text.into());
        Ok(())
    }

    /// Preview and commit in one step
    ///
    /// # Errors
    /// Same as [`Self::preview`]; on error the previous text stays in place
    pub fn replace(
        &mut self,
        address: &str,
        search: &str,
        replacement: &str,
    ) -> NavigationResult<String> {
        let text = self.preview(address, search, replacement)?;
        self.commit(address, text.clone())?;
        Ok(text)
    }

    /// Drop a section's override
    ///
    /// Returns `true` if one existed.
    ///
    /// # Errors
    /// Returns `NavigationError` if the address is not a resolvable section
    pub fn reset(&mut self, address: &str) -> NavigationResult<bool> {
        let section = self.surface().resolve_section(address)?;
        Ok(self.overrides.reset(section))
    }

    /// Overrides held
    #[inline]
    #[must_use]
    pub fn overrides(&self) -> &SubstitutionEngine {
        &self.overrides
    }

    /// Currently effective text of a section
    ///
    /// # Errors
    /// Returns `NavigationError` if the address is not a resolvable section
    pub fn effective_text(&self, address: &str) -> NavigationResult<&str> {
        self.surface().content(address)
    }

    /// Copy a section's effective text and post the copy notice
    ///
    /// # Errors
    /// Returns `NavigationError` if the address is not a resolvable section
    pub fn copy_content<C>(&mut self, address: &str, clipboard: &mut C) -> NavigationResult<String>
    where
        C: Clipboard + ?Sized,
    {
        let text = self.surface().copy_content(address, clipboard)?;
        self.notice = Some(COPY_NOTICE);
        Ok(text)
    }

    /// Copy a deep link and post the copy notice
    ///
    /// # Errors
    /// Returns `NavigationError` if the address does not resolve
    pub fn copy_deep_link<C>(
        &mut self,
        address: &str,
        clipboard: &mut C,
    ) -> NavigationResult<String>
    where
        C: Clipboard + ?Sized,
    {
        let link = self.surface().copy_deep_link(address, clipboard)?;
        self.notice = Some(COPY_NOTICE);
        Ok(link)
    }

    /// Render a section under the current toggle and theme
    ///
    /// # Errors
    /// Returns `NavigationError` if the address is not a resolvable section
    pub fn render_section<R>(&self, address: &str, renderer: &R) -> NavigationResult<Displayable>
    where
        R: TextRenderer + ?Sized,
    {
        self.surface()
            .render_section(address, renderer, self.raw, self.theme.theme())
    }

    /// Take the pending notice, if any
    pub fn take_notice(&mut self) -> Option<&'static str> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{MemoryClipboard, MemoryPreferenceStore, SystemPreference};
    use pv_catalog::{Subtopic, Topic};

    fn state() -> AppState {
        let catalog = Catalog::load(vec![Topic::new(
            "Conversions",
            vec![Subtopic::named("2A Conversion")
                .with_description("object type with commas")
                .with_code("df['GMV'].str.replace(',', '')")],
        )]);
        AppState::new(catalog, ViewerConfig::default())
    }

    #[test]
    fn raw_toggle_label_follows_state() {
        let mut state = state();
        assert_eq!(state.raw_toggle_label(), "Show Raw");
        assert!(state.toggle_raw());
        assert_eq!(state.raw_toggle_label(), "Show Compiled");
    }

    #[test]
    fn query_drives_filtered_view() {
        let mut state = state();
        state.set_query("COMMAS");
        assert_eq!(state.filtered().entry_count(), 1);
        state.set_query("pokemon");
        assert!(state.filtered().is_empty());
        assert_eq!(state.query(), "pokemon");
    }

    #[test]
    fn replace_then_reset() {
        let mut state = state();
        let address = "section-0-0-golden-example-code";
        let text = state.replace(address, "GMV", "Revenue").unwrap();
        assert_eq!(text, "df['Revenue'].str.replace(',', '')");
        assert_eq!(state.effective_text(address).unwrap(), text);

        assert!(state.reset(address).unwrap());
        assert_eq!(state.effective_text(address).unwrap(), "df['GMV'].str.replace(',', '')");
    }

    #[test]
    fn preview_does_not_store() {
        let state = state();
        let out = state
            .preview("section-0-0-description", "commas", "separators")
            .unwrap();
        assert_eq!(out, "object type with separators");
        assert!(state.overrides().is_empty());
    }

    #[test]
    fn override_markup_renders_escaped() {
        let mut state = state();
        let address = "section-0-0-description";
        let renderer = state.config().build_renderer();
        state
            .replace(address, "commas", "<img src=x onerror=alert(1)>")
            .unwrap();

        let out = state.render_section(address, &renderer).unwrap();
        assert!(!out.degraded);
        assert!(!out.html.contains("<img"));
        assert!(out.html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    }

    #[test]
    fn copy_posts_notice_once() {
        let mut state = state();
        let mut clipboard = MemoryClipboard::new();
        state.copy_deep_link("topic-0", &mut clipboard).unwrap();
        assert_eq!(state.take_notice(), Some(COPY_NOTICE));
        assert_eq!(state.take_notice(), None);
        assert_eq!(clipboard.contents(), Some("http://localhost:3000/#topic-0"));
    }

    #[test]
    fn theme_round_trip() {
        let mut state = state();
        let mut store = MemoryPreferenceStore::new();
        assert_eq!(state.load_preferences(&store, &SystemPreference::DARK), Theme::Dark);
        assert_eq!(state.toggle_theme(&mut store), Theme::Light);
        assert_eq!(state.load_preferences(&store, &SystemPreference::DARK), Theme::Light);
    }
}
