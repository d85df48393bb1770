//! Position tracker
//!
//! Maps the rendered anchors and a fixed focus line near the top of the
//! viewport to the single most specific [`Breadcrumb`].
//!
//! # Resolution
//!
//! Anchors are scanned in document order (derived from their addresses,
//! not from the order they were reported in) in three tiers:
//!
//! 1. sections: the first one straddling the focus line wins;
//! 2. subtopic headers, yielding no section label;
//! 3. topic headers, yielding an empty subtopic name.
//!
//! When nothing straddles the line the previous breadcrumb stays in place.

use pv_catalog::{section_label, Address, Catalog, Resolved};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Default focus-line offset from the top of the viewport
pub const DEFAULT_FOCUS_LINE: f64 = 150.0;

/// Vertical extent of a rendered anchor, in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top edge
    pub top: f64,
    /// Bottom edge
    pub bottom: f64,
}

impl Rect {
    /// Create rect from edges
    #[inline]
    #[must_use]
    pub const fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Check if the line lies within the rect (edges inclusive)
    #[inline]
    #[must_use]
    pub fn straddles(&self, line: f64) -> bool {
        self.top <= line && line <= self.bottom
    }
}

/// A rendered element carrying an address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Element identifier, as rendered
    pub address: String,
    /// Current bounding box
    pub rect: Rect,
}

impl Anchor {
    /// Create anchor
    #[inline]
    #[must_use]
    pub fn new(address: impl Into<String>, top: f64, bottom: f64) -> Self {
        Self {
            address: address.into(),
            rect: Rect::new(top, bottom),
        }
    }
}

/// The most specific location currently in view
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Topic name (empty only before the first resolution)
    pub topic_name: String,
    /// Subtopic name, empty when only a topic header is in view
    pub subtopic_name: String,
    /// Section label, set only when a section is the most specific unit
    pub section_label: Option<String>,
}

impl Breadcrumb {
    /// Create breadcrumb
    #[must_use]
    pub fn new(
        topic_name: impl Into<String>,
        subtopic_name: impl Into<String>,
        section_label: Option<String>,
    ) -> Self {
        Self {
            topic_name: topic_name.into(),
            subtopic_name: subtopic_name.into(),
            section_label,
        }
    }

    /// Check for the initial, never-resolved breadcrumb
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topic_name.is_empty() && self.subtopic_name.is_empty() && self.section_label.is_none()
    }

    /// Non-empty trail segments, outermost first
    #[must_use]
    pub fn trail(&self) -> Vec<&str> {
        [
            Some(self.topic_name.as_str()),
            Some(self.subtopic_name.as_str()),
            self.section_label.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect()
    }

    fn from_resolved(raw: &str, resolved: &Resolved<'_>) -> Self {
        Self {
            topic_name: resolved.topic_name().to_string(),
            subtopic_name: resolved.subtopic_name().unwrap_or_default().to_string(),
            section_label: match resolved {
                Resolved::Section { .. } => section_label(raw),
                _ => None,
            },
        }
    }
}

impl Display for Breadcrumb {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.trail().join(" › "))
    }
}

/// Resolve anchors against the focus line
///
/// Returns `None` when no anchor straddles the line; callers keep their
/// previous breadcrumb in that case. Anchors whose address does not parse
/// or resolve are skipped.
#[must_use]
pub fn resolve(catalog: &Catalog, anchors: &[Anchor], focus_line: f64) -> Option<Breadcrumb> {
    let mut ordered: Vec<(Address, &Anchor)> = anchors
        .iter()
        .filter_map(|anchor| match anchor.address.parse::<Address>() {
            Ok(address) => Some((address, anchor)),
            Err(e) => {
                tracing::debug!(address = %anchor.address, error = %e, "skipping anchor");
                None
            }
        })
        .collect();
    // Stable: duplicates keep their reported order
    ordered.sort_by_key(|(address, _)| *address);

    // Most specific tier first: sections, then subtopics, then topics
    for depth in [2, 1, 0] {
        let hit = ordered
            .iter()
            .filter(|(address, anchor)| {
                address.depth() == depth && anchor.rect.straddles(focus_line)
            })
            .find_map(|(address, anchor)| {
                catalog
                    .resolve(address)
                    .ok()
                    .map(|resolved| Breadcrumb::from_resolved(&anchor.address, &resolved))
            });
        if hit.is_some() {
            return hit;
        }
    }

    None
}

/// Breadcrumb for a location fragment, used on initial load
///
/// Accepts the fragment with or without a leading `#`.
#[must_use]
pub fn breadcrumb_for_fragment(catalog: &Catalog, fragment: &str) -> Option<Breadcrumb> {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);
    match catalog.resolve_str(raw) {
        Ok((_, resolved)) => Some(Breadcrumb::from_resolved(raw, &resolved)),
        Err(e) => {
            tracing::debug!(fragment, error = %e, "fragment does not resolve");
            None
        }
    }
}

/// Holds the last resolved breadcrumb across scroll events
#[derive(Debug, Clone, PartialEq)]
pub struct PositionTracker {
    focus_line: f64,
    current: Breadcrumb,
}

impl Default for PositionTracker {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_LINE)
    }
}

impl PositionTracker {
    /// Create tracker with a focus line
    #[inline]
    #[must_use]
    pub fn new(focus_line: f64) -> Self {
        Self {
            focus_line,
            current: Breadcrumb::default(),
        }
    }

    /// Focus-line offset
    #[inline]
    #[must_use]
    pub fn focus_line(&self) -> f64 {
        self.focus_line
    }

    /// Last resolved breadcrumb
    #[inline]
    #[must_use]
    pub fn current(&self) -> &Breadcrumb {
        &self.current
    }

    /// Recompute after a scroll
    ///
    /// Keeps the previous breadcrumb when no anchor straddles the focus line.
    pub fn on_scroll(&mut self, catalog: &Catalog, anchors: &[Anchor]) -> &Breadcrumb {
        if let Some(next) = resolve(catalog, anchors, self.focus_line) {
            if next != self.current {
                tracing::debug!(breadcrumb = %next, "breadcrumb changed");
                self.current = next;
            }
        }
        &self.current
    }

    /// Jump to a location fragment
    ///
    /// Returns `false` (and keeps the current breadcrumb) if the fragment
    /// does not resolve.
    pub fn jump_to(&mut self, catalog: &Catalog, fragment: &str) -> bool {
        match breadcrumb_for_fragment(catalog, fragment) {
            Some(breadcrumb) => {
                self.current = breadcrumb;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pv_catalog::{Subtopic, Topic};

    fn catalog() -> Catalog {
        Catalog::load(vec![
            Topic::new(
                "Conversions",
                vec![Subtopic::named("2A Conversion"), Subtopic::named("3A Conversion")],
            ),
            Topic::new("Visualization", vec![Subtopic::named("6L")]),
        ])
    }

    fn page_anchors() -> Vec<Anchor> {
        vec![
            Anchor::new("topic-0", 0.0, 1000.0),
            Anchor::new("subtopic-0-0", 0.0, 400.0),
            Anchor::new("section-0-0-description", 0.0, 120.0),
            Anchor::new("section-0-0-golden-example-thought", 120.0, 400.0),
        ]
    }

    #[test]
    fn section_straddling_focus_wins() {
        let catalog = catalog();
        let crumb = resolve(&catalog, &page_anchors(), 150.0).unwrap();
        assert_eq!(
            crumb,
            Breadcrumb::new("Conversions", "2A Conversion", Some("golden example thought".into()))
        );
    }

    #[test]
    fn first_in_document_order_breaks_ties() {
        let catalog = catalog();
        // Both sections straddle 120; the description comes first in the document
        let crumb = resolve(&catalog, &page_anchors(), 120.0).unwrap();
        assert_eq!(crumb.section_label.as_deref(), Some("description"));
    }

    #[test]
    fn registration_order_is_ignored() {
        let catalog = catalog();
        let mut anchors = page_anchors();
        anchors.reverse();
        let crumb = resolve(&catalog, &anchors, 120.0).unwrap();
        assert_eq!(crumb.section_label.as_deref(), Some("description"));
    }

    #[test]
    fn subtopic_header_without_sections() {
        let catalog = catalog();
        let anchors = vec![
            Anchor::new("topic-0", 0.0, 1000.0),
            Anchor::new("subtopic-0-1", 100.0, 300.0),
            Anchor::new("section-0-1-description", 200.0, 300.0),
        ];
        let crumb = resolve(&catalog, &anchors, 150.0).unwrap();
        assert_eq!(crumb, Breadcrumb::new("Conversions", "3A Conversion", None));
    }

    #[test]
    fn topic_header_only() {
        let catalog = catalog();
        let anchors = vec![
            Anchor::new("topic-1", 100.0, 200.0),
            Anchor::new("subtopic-1-0", 300.0, 400.0),
        ];
        let crumb = resolve(&catalog, &anchors, 150.0).unwrap();
        assert_eq!(crumb, Breadcrumb::new("Visualization", "", None));
        assert_eq!(crumb.trail(), vec!["Visualization"]);
    }

    #[test]
    fn nothing_straddles() {
        let catalog = catalog();
        assert!(resolve(&catalog, &page_anchors(), 3000.0).is_none());
        assert!(resolve(&catalog, &[], 150.0).is_none());
    }

    #[test]
    fn bad_anchors_are_skipped() {
        let catalog = catalog();
        let anchors = vec![
            Anchor::new("navbar", 0.0, 1000.0),
            Anchor::new("section-9-0-description", 0.0, 1000.0),
            Anchor::new("subtopic-1-0", 100.0, 200.0),
        ];
        let crumb = resolve(&catalog, &anchors, 150.0).unwrap();
        assert_eq!(crumb, Breadcrumb::new("Visualization", "6L", None));
    }

    #[test]
    fn tracker_does_not_reset_below_last_anchor() {
        let catalog = catalog();
        let mut tracker = PositionTracker::new(150.0);
        assert!(tracker.current().is_empty());

        let first = tracker.on_scroll(&catalog, &page_anchors()).clone();
        assert_eq!(first.section_label.as_deref(), Some("golden example thought"));

        // Everything scrolled far above the focus line
        let shifted: Vec<_> = page_anchors()
            .into_iter()
            .map(|a| Anchor::new(a.address, a.rect.top - 5000.0, a.rect.bottom - 5000.0))
            .collect();
        assert_eq!(tracker.on_scroll(&catalog, &shifted), &first);
    }

    #[test]
    fn tracker_focus_line_below_all_keeps_previous() {
        let catalog = catalog();
        let mut tracker = PositionTracker::new(3000.0);
        tracker.jump_to(&catalog, "#subtopic-0-1");
        let before = tracker.current().clone();
        assert_eq!(tracker.on_scroll(&catalog, &page_anchors()), &before);
    }

    #[test]
    fn fragment_resolution() {
        let catalog = catalog();
        let crumb = breadcrumb_for_fragment(&catalog, "#section-1-0-code").unwrap();
        assert_eq!(crumb, Breadcrumb::new("Visualization", "6L", Some("code".into())));

        assert!(breadcrumb_for_fragment(&catalog, "section-5-0-code").is_none());
        assert!(breadcrumb_for_fragment(&catalog, "").is_none());
    }

    #[test]
    fn jump_to_invalid_keeps_current() {
        let catalog = catalog();
        let mut tracker = PositionTracker::default();
        assert!(tracker.jump_to(&catalog, "topic-1"));
        assert!(!tracker.jump_to(&catalog, "topic-7"));
        assert_eq!(tracker.current(), &Breadcrumb::new("Visualization", "", None));
    }

    #[test]
    fn breadcrumb_display() {
        let crumb = Breadcrumb::new("Conversions", "2A Conversion", Some("code".into()));
        assert_eq!(crumb.to_string(), "Conversions › 2A Conversion › code");
        assert_eq!(Breadcrumb::default().to_string(), "");
    }

    #[test]
    fn rect_edges_are_inclusive() {
        let rect = Rect::new(120.0, 400.0);
        assert!(rect.straddles(120.0));
        assert!(rect.straddles(400.0));
        assert!(!rect.straddles(400.5));
    }
}
