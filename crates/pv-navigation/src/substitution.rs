//! Substitution engine
//!
//! Find/replace previews over section bodies, kept as per-section
//! overrides. The catalog itself is never modified: the text shown for a
//! section is its override if one exists, the catalog text otherwise.
//!
//! Previews always apply to the catalog text, never to an earlier override,
//! so repeated previews of the same search are idempotent.

use crate::error::SubstitutionError;
use pv_catalog::{Catalog, CatalogResult, SectionRef};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// How search text is interpreted
///
/// `Pattern` treats the search text as a regular expression, so characters
/// such as `.` or `(` carry pattern meaning and `$1` in the replacement
/// expands capture groups. `Literal` matches and inserts text verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Regular-expression search
    #[default]
    Pattern,
    /// Plain-text search
    Literal,
}

impl SearchMode {
    /// Parse from a lowercase name
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pattern" | "regex" => Some(Self::Pattern),
            "literal" | "plain" => Some(Self::Literal),
            _ => None,
        }
    }
}

/// Replace every occurrence of `search` in `original`
///
/// An empty search returns the original unchanged.
///
/// # Errors
/// Returns `SubstitutionError::InvalidPattern` in `Pattern` mode when the
/// search text does not compile
pub fn substitute(
    search: &str,
    replacement: &str,
    original: &str,
    mode: SearchMode,
) -> Result<String, SubstitutionError> {
    if search.is_empty() {
        return Ok(original.to_string());
    }

    match mode {
        SearchMode::Literal => Ok(original.replace(search, replacement)),
        SearchMode::Pattern => {
            let pattern = Regex::new(search).map_err(|e| SubstitutionError::InvalidPattern {
                pattern: search.to_string(),
                message: e.to_string(),
            })?;
            Ok(match pattern.replace_all(original, replacement) {
                Cow::Borrowed(unchanged) => unchanged.to_string(),
                Cow::Owned(changed) => changed,
            })
        }
    }
}

/// Per-section overrides produced by find/replace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionEngine {
    mode: SearchMode,
    overrides: HashMap<SectionRef, String>,
}

impl SubstitutionEngine {
    /// Create engine with no overrides
    #[inline]
    #[must_use]
    pub fn new(mode: SearchMode) -> Self {
        Self {
            mode,
            overrides: HashMap::new(),
        }
    }

    /// Search mode in use
    #[inline]
    #[must_use]
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Compute the replaced text for one section without storing it
    ///
    /// # Errors
    /// Returns `SubstitutionError` if the search text is not a valid pattern
    pub fn preview(
        &self,
        section: SectionRef,
        search: &str,
        replacement: &str,
        original: &str,
    ) -> Result<String, SubstitutionError> {
        substitute(search, replacement, original, self.mode).inspect_err(|e| {
            tracing::debug!(%section, error = %e, "preview rejected");
        })
    }

    /// Preview against a section's catalog text and store the result
    ///
    /// Returns the new override text. On error nothing is stored and any
    /// earlier override for the section is left in place.
    ///
    /// # Errors
    /// Returns `SubstitutionError` if the search text is not a valid pattern
    pub fn apply(
        &mut self,
        section: SectionRef,
        search: &str,
        replacement: &str,
        original: &str,
    ) -> Result<&str, SubstitutionError> {
        let text = self.preview(section, search, replacement, original)?;
        Ok(self.commit(section, text))
    }

    /// Store override text for a section
    pub fn commit(&mut self, section: SectionRef, text: String) -> &str {
        tracing::info!(%section, len = text.len(), "override committed");
        let slot = self.overrides.entry(section).or_default();
        *slot = text;
        slot
    }

    /// Drop a section's override
    ///
    /// Returns `true` if one existed.
    pub fn reset(&mut self, section: SectionRef) -> bool {
        let removed = self.overrides.remove(&section).is_some();
        if removed {
            tracing::debug!(%section, "override reset");
        }
        removed
    }

    /// Override text, if any
    #[inline]
    #[must_use]
    pub fn get(&self, section: SectionRef) -> Option<&str> {
        self.overrides.get(&section).map(String::as_str)
    }

    /// Check for an override
    #[inline]
    #[must_use]
    pub fn is_overridden(&self, section: SectionRef) -> bool {
        self.overrides.contains_key(&section)
    }

    /// Text to display: the override if present, the catalog text otherwise
    ///
    /// # Errors
    /// Returns an out-of-range error if the section does not resolve
    pub fn effective_text<'a>(
        &'a self,
        catalog: &'a Catalog,
        section: SectionRef,
    ) -> CatalogResult<&'a str> {
        let original = catalog.section_text(section)?;
        Ok(self.get(section).unwrap_or(original))
    }

    /// Number of overrides
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// Check if there are no overrides
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use pv_catalog::{SectionKind, Subtopic, Topic};

    fn catalog() -> Catalog {
        Catalog::load(vec![Topic::new(
            "Conversions",
            vec![
                Subtopic::named("2A Conversion").with_code("df['GMV'] = df['GMV'].astype(float)"),
                Subtopic::named("3A Conversion").with_code("df['GMV'].sum()"),
            ],
        )])
    }

    #[test]
    fn replaces_every_occurrence() {
        let text = "df['GMV'] = df['GMV'].astype(float)";
        let out = substitute("GMV", "Revenue", text, SearchMode::Pattern).unwrap();
        assert_eq!(out, "df['Revenue'] = df['Revenue'].astype(float)");
    }

    #[test]
    fn empty_search_is_identity() {
        for mode in [SearchMode::Pattern, SearchMode::Literal] {
            assert_eq!(substitute("", "x", "abc", mode).unwrap(), "abc");
        }
    }

    #[test]
    fn pattern_mode_interprets_metacharacters() {
        // "." matches any character in pattern mode
        assert_eq!(substitute("a.c", "X", "abc a.c", SearchMode::Pattern).unwrap(), "X X");
        assert_eq!(substitute("a.c", "X", "abc a.c", SearchMode::Literal).unwrap(), "abc X");
    }

    #[test]
    fn pattern_mode_expands_groups() {
        let out =
            substitute(r"(\w+)\.sum\(\)", "$1.mean()", "df.sum()", SearchMode::Pattern).unwrap();
        assert_eq!(out, "df.mean()");
        let out = substitute("sum", "$1", "sum", SearchMode::Literal).unwrap();
        assert_eq!(out, "$1");
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = substitute("(", "x", "abc", SearchMode::Pattern).unwrap_err();
        assert!(matches!(
            err,
            SubstitutionError::InvalidPattern { ref pattern, .. } if pattern == "("
        ));
        assert_eq!(substitute("(", "x", "a(c", SearchMode::Literal).unwrap(), "axc");
    }

    #[test]
    fn commit_and_reset() {
        let catalog = catalog();
        let section = SectionRef::new(0, 0, SectionKind::Code);
        let mut engine = SubstitutionEngine::default();

        let original = catalog.section_text(section).unwrap();
        engine.apply(section, "GMV", "Revenue", original).unwrap();
        assert_eq!(
            engine.effective_text(&catalog, section).unwrap(),
            "df['Revenue'] = df['Revenue'].astype(float)"
        );

        assert!(engine.reset(section));
        assert!(!engine.reset(section));
        assert_eq!(engine.effective_text(&catalog, section).unwrap(), original);
        // Catalog untouched throughout
        assert_eq!(catalog.section_text(section).unwrap(), "df['GMV'] = df['GMV'].astype(float)");
    }

    #[test]
    fn overrides_are_per_section() {
        let catalog = catalog();
        let first = SectionRef::new(0, 0, SectionKind::Code);
        let second = SectionRef::new(0, 1, SectionKind::Code);
        let mut engine = SubstitutionEngine::default();

        engine
            .apply(first, "GMV", "Revenue", catalog.section_text(first).unwrap())
            .unwrap();
        assert!(engine.is_overridden(first));
        assert!(!engine.is_overridden(second));
        assert_eq!(engine.effective_text(&catalog, second).unwrap(), "df['GMV'].sum()");
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn failed_apply_keeps_previous_override() {
        let section = SectionRef::new(0, 0, SectionKind::Code);
        let mut engine = SubstitutionEngine::default();
        engine.commit(section, "kept".to_string());
        assert!(engine.apply(section, "[", "x", "abc").is_err());
        assert_eq!(engine.get(section), Some("kept"));
    }

    #[test]
    fn effective_text_out_of_range() {
        let engine = SubstitutionEngine::default();
        let err = engine
            .effective_text(&catalog(), SectionRef::new(3, 0, SectionKind::Code))
            .unwrap_err();
        assert!(err.is_out_of_range());
    }

    #[test]
    fn search_mode_parse() {
        assert_eq!(SearchMode::parse("literal"), Some(SearchMode::Literal));
        assert_eq!(SearchMode::parse("regex"), Some(SearchMode::Pattern));
        assert_eq!(SearchMode::parse("fuzzy"), None);
    }

    proptest! {
        #[test]
        fn literal_round_trip(
            prefix in "[a-z ]{0,12}",
            suffix in "[a-z ]{0,12}",
        ) {
            // The search token never occurs in the surrounding text or in the replacement
            let original = format!("{prefix}GMV{suffix}");
            let replaced = substitute("GMV", "#", &original, SearchMode::Literal).unwrap();
            let restored = substitute("#", "GMV", &replaced, SearchMode::Literal).unwrap();
            prop_assert_eq!(restored, original);
        }

        #[test]
        fn text_without_match_is_unchanged(text in "[a-z ]{0,32}") {
            for mode in [SearchMode::Pattern, SearchMode::Literal] {
                prop_assert_eq!(substitute("XYZ", "q", &text, mode).unwrap(), text.clone());
            }
        }
    }
}
