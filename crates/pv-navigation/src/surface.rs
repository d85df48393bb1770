//! Navigation surface
//!
//! Turns a filtered catalog into the addressed hierarchy the page renders,
//! and implements the copy, deep-link and per-section render actions on
//! top of the catalog and the current overrides.

use crate::collaborators::Clipboard;
use crate::config::ViewerConfig;
use crate::error::{NavigationError, NavigationResult};
use crate::filter::FilteredCatalog;
use crate::substitution::SubstitutionEngine;
use pv_catalog::{Address, Catalog, SectionKind, SectionRef};
use pv_render::{render_or_fallback, Displayable, PresentationMode, TextRenderer, Theme};

/// Confirmation shown after any copy action
pub const COPY_NOTICE: &str = "Content copied to clipboard!";

/// Presentation for a section kind under the raw toggle
///
/// Code sections are always highlighted as code; every other kind is raw
/// when the toggle is set and compiled otherwise.
#[inline]
#[must_use]
pub const fn presentation_mode(kind: SectionKind, raw_toggle: bool) -> PresentationMode {
    match kind {
        SectionKind::Code => PresentationMode::Code,
        _ if raw_toggle => PresentationMode::Raw,
        _ => PresentationMode::Compiled,
    }
}

/// Rendered section node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavSection {
    /// Section reference
    pub section: SectionRef,
    /// Heading
    pub title: &'static str,
    /// Label of the copy button
    pub copy_label: String,
}

impl NavSection {
    fn new(section: SectionRef) -> Self {
        let title = section.kind.title();
        Self {
            section,
            title,
            copy_label: format!("Copy {title}"),
        }
    }

    /// Canonical address
    #[inline]
    #[must_use]
    pub fn address(&self) -> Address {
        Address::Section(self.section)
    }
}

/// Rendered subtopic node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavSubtopic<'a> {
    /// Canonical address
    pub address: Address,
    /// Display name
    pub name: &'a str,
    /// The four sections, in document order
    pub sections: Vec<NavSection>,
}

/// Rendered topic node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavTopic<'a> {
    /// Canonical address
    pub address: Address,
    /// Display name
    pub name: &'a str,
    /// Retained subtopics
    pub subtopics: Vec<NavSubtopic<'a>>,
}

impl NavTopic<'_> {
    /// Every address under this topic, header first
    pub fn addresses(&self) -> impl Iterator<Item = Address> + '_ {
        std::iter::once(self.address).chain(self.subtopics.iter().flat_map(|sub| {
            std::iter::once(sub.address).chain(sub.sections.iter().map(NavSection::address))
        }))
    }
}

/// Build the addressed hierarchy for a filtered view
///
/// Addresses use original catalog indices, so filtering never renumbers
/// anchors.
#[must_use]
pub fn hierarchy<'a>(filtered: &FilteredCatalog<'a>) -> Vec<NavTopic<'a>> {
    filtered
        .topics()
        .iter()
        .map(|entry| NavTopic {
            address: Address::topic(entry.index),
            name: entry.topic.name.as_str(),
            subtopics: entry
                .subtopics
                .iter()
                .map(|&(s, subtopic)| NavSubtopic {
                    address: Address::subtopic(entry.index, s),
                    name: subtopic.name.as_str(),
                    sections: SectionKind::ALL
                        .into_iter()
                        .map(|kind| NavSection::new(SectionRef::new(entry.index, s, kind)))
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

/// Copy, link and render actions over one catalog and its overrides
#[derive(Debug, Clone, Copy)]
pub struct NavigationSurface<'a> {
    catalog: &'a Catalog,
    overrides: &'a SubstitutionEngine,
    config: &'a ViewerConfig,
}

impl<'a> NavigationSurface<'a> {
    /// Create surface
    #[inline]
    #[must_use]
    pub fn new(
        catalog: &'a Catalog,
        overrides: &'a SubstitutionEngine,
        config: &'a ViewerConfig,
    ) -> Self {
        Self {
            catalog,
            overrides,
            config,
        }
    }

    /// Parse an address and check that it resolves
    ///
    /// # Errors
    /// Returns `NavigationError::Catalog` for a malformed or unresolved address
    pub fn resolve(&self, raw: &str) -> NavigationResult<Address> {
        let (address, _) = self.catalog.resolve_str(raw)?;
        Ok(address)
    }

    /// Parse a section address and check that it resolves
    ///
    /// # Errors
    /// Returns `NavigationError::NotASection` for topic and subtopic
    /// addresses, `NavigationError::Catalog` if it does not resolve
    pub fn resolve_section(&self, raw: &str) -> NavigationResult<SectionRef> {
        let address = self.resolve(raw)?;
        address
            .as_section()
            .ok_or(NavigationError::NotASection(address))
    }

    /// Currently effective text of a section
    ///
    /// # Errors
    /// Same as [`Self::resolve_section`]
    pub fn content(&self, raw: &str) -> NavigationResult<&'a str> {
        let section = self.resolve_section(raw)?;
        Ok(self.overrides.effective_text(self.catalog, section)?)
    }

    /// Copy a section's effective text to the clipboard
    ///
    /// Returns the copied text. A clipboard failure is logged and ignored.
    ///
    /// # Errors
    /// Same as [`Self::resolve_section`]
    pub fn copy_content<C>(&self, raw: &str, clipboard: &mut C) -> NavigationResult<String>
    where
        C: Clipboard + ?Sized,
    {
        let text = self.content(raw)?.to_string();
        write_best_effort(clipboard, &text, raw);
        Ok(text)
    }

    /// Fully qualified link to an address
    ///
    /// The address is kept as given, so an alias such as
    /// `section-1-2-code` stays in the fragment.
    ///
    /// # Errors
    /// Returns `NavigationError::Catalog` for a malformed or unresolved address
    pub fn deep_link(&self, raw: &str) -> NavigationResult<String> {
        self.resolve(raw)?;
        Ok(format!("{}#{raw}", self.config.page_url()))
    }

    /// Copy a deep link to the clipboard
    ///
    /// Returns the link. A clipboard failure is logged and ignored.
    ///
    /// # Errors
    /// Same as [`Self::deep_link`]
    pub fn copy_deep_link<C>(&self, raw: &str, clipboard: &mut C) -> NavigationResult<String>
    where
        C: Clipboard + ?Sized,
    {
        let link = self.deep_link(raw)?;
        write_best_effort(clipboard, &link, raw);
        Ok(link)
    }

    /// Render a section's effective text
    ///
    /// A renderer failure degrades this section to raw text; it is not an
    /// error.
    ///
    /// # Errors
    /// Same as [`Self::resolve_section`]
    pub fn render_section<R>(
        &self,
        raw: &str,
        renderer: &R,
        raw_toggle: bool,
        theme: Theme,
    ) -> NavigationResult<Displayable>
    where
        R: TextRenderer + ?Sized,
    {
        let section = self.resolve_section(raw)?;
        let text = self.overrides.effective_text(self.catalog, section)?;
        let mode = presentation_mode(section.kind, raw_toggle);
        Ok(render_or_fallback(renderer, text, mode, theme))
    }
}

fn write_best_effort<C>(clipboard: &mut C, text: &str, address: &str)
where
    C: Clipboard + ?Sized,
{
    if let Err(e) = clipboard.write(text) {
        tracing::warn!(address, error = %e, "clipboard write failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::MemoryClipboard;
    use crate::filter::filter;
    use pretty_assertions::assert_eq;
    use pv_catalog::{Subtopic, Topic};

    fn catalog() -> Catalog {
        Catalog::load(vec![
            Topic::new(
                "Conversions",
                vec![
                    Subtopic::named("2A Conversion").with_code("pd.to_numeric(df['GMV'])"),
                    Subtopic::named("Datetime Conversion").with_description("date like column"),
                ],
            ),
            Topic::new("Visualization", vec![Subtopic::named("6L")]),
        ])
    }

    #[test]
    fn presentation_mode_rule() {
        assert_eq!(presentation_mode(SectionKind::Code, false), PresentationMode::Code);
        assert_eq!(presentation_mode(SectionKind::Code, true), PresentationMode::Code);
        assert_eq!(presentation_mode(SectionKind::Thought, true), PresentationMode::Raw);
        assert_eq!(presentation_mode(SectionKind::Summary, false), PresentationMode::Compiled);
    }

    #[test]
    fn hierarchy_keeps_original_indices() {
        let catalog = catalog();
        let filtered = filter(&catalog, "datetime");
        let nodes = hierarchy(&filtered);

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].subtopics[0].address, Address::subtopic(0, 1));
        let addresses: Vec<String> = nodes[0].addresses().map(|a| a.to_string()).collect();
        assert_eq!(
            addresses,
            vec![
                "topic-0",
                "subtopic-0-1",
                "section-0-1-description",
                "section-0-1-golden-example-thought",
                "section-0-1-golden-example-rtu",
                "section-0-1-golden-example-code",
            ]
        );
    }

    #[test]
    fn section_nodes_carry_copy_labels() {
        let catalog = catalog();
        let filtered = filter(&catalog, "");
        let nodes = hierarchy(&filtered);
        let labels: Vec<&str> = nodes[1].subtopics[0]
            .sections
            .iter()
            .map(|s| s.copy_label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Copy Description",
                "Copy Golden Example Thought",
                "Copy Golden Example RTU",
                "Copy Golden Example Code",
            ]
        );
    }

    #[test]
    fn copy_content_writes_clipboard() {
        let catalog = catalog();
        let overrides = SubstitutionEngine::default();
        let config = ViewerConfig::default();
        let surface = NavigationSurface::new(&catalog, &overrides, &config);

        let mut clipboard = MemoryClipboard::new();
        let text = surface
            .copy_content("section-0-0-golden-example-code", &mut clipboard)
            .unwrap();
        assert_eq!(text, "pd.to_numeric(df['GMV'])");
        assert_eq!(clipboard.contents(), Some("pd.to_numeric(df['GMV'])"));
    }

    #[test]
    fn copy_content_rejects_non_sections() {
        let catalog = catalog();
        let overrides = SubstitutionEngine::default();
        let config = ViewerConfig::default();
        let surface = NavigationSurface::new(&catalog, &overrides, &config);
        let mut clipboard = MemoryClipboard::new();

        let err = surface.copy_content("subtopic-0-0", &mut clipboard).unwrap_err();
        assert!(matches!(err, NavigationError::NotASection(Address::Subtopic { .. })));

        let err = surface.copy_content("section-4-0-code", &mut clipboard).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(clipboard.contents(), None);
    }

    #[test]
    fn deep_link_uses_config_location() {
        let catalog = catalog();
        let overrides = SubstitutionEngine::default();
        let config =
            ViewerConfig::default().with_location("https://policies.example.com", "/viewer");
        let surface = NavigationSurface::new(&catalog, &overrides, &config);

        assert_eq!(
            surface.deep_link("topic-1").unwrap(),
            "https://policies.example.com/viewer#topic-1"
        );
        assert_eq!(
            surface.deep_link("section-0-1-code").unwrap(),
            "https://policies.example.com/viewer#section-0-1-code"
        );
        assert!(surface.deep_link("subtopic-1-5").unwrap_err().is_not_found());
    }
}
