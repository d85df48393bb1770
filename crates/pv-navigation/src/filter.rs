//! Filter engine
//!
//! Derives a reduced view of the catalog from a free-text query. Matching is
//! a case-insensitive substring test against index metadata only: topic
//! names, subtopic names and subtopic descriptions. Example bodies (thought,
//! summary, code) are never searched.
//!
//! A topic whose own name matches keeps its full subtopic list; otherwise it
//! keeps only matching subtopics, and is dropped when none match.

use pv_catalog::{Catalog, Subtopic, Topic};

/// A topic retained by a filter, with its original index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredTopic<'a> {
    /// Index in the source catalog
    pub index: usize,
    /// The source topic
    pub topic: &'a Topic,
    /// Retained subtopics with their original indices, in catalog order
    pub subtopics: Vec<(usize, &'a Subtopic)>,
    /// Whether the topic was kept because its own name matched
    pub name_matched: bool,
}

/// The catalog as seen through a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredCatalog<'a> {
    query: String,
    topics: Vec<FilteredTopic<'a>>,
}

impl<'a> FilteredCatalog<'a> {
    /// Query that produced this view
    #[inline]
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Retained topics in catalog order
    #[inline]
    #[must_use]
    pub fn topics(&self) -> &[FilteredTopic<'a>] {
        &self.topics
    }

    /// Number of retained topics
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Check if nothing matched
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Total retained subtopics
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.topics.iter().map(|t| t.subtopics.len()).sum()
    }

    /// Materialise the view as owned topics
    #[must_use]
    pub fn to_topics(&self) -> Vec<Topic> {
        self.topics
            .iter()
            .map(|t| Topic {
                name: t.topic.name.clone(),
                subtopics: t.subtopics.iter().map(|(_, s)| (*s).clone()).collect(),
            })
            .collect()
    }
}

/// Filter the catalog by a query
#[must_use]
pub fn filter<'a>(catalog: &'a Catalog, query: &str) -> FilteredCatalog<'a> {
    let needle = query.to_lowercase();
    let topics: Vec<_> = catalog
        .topics()
        .iter()
        .enumerate()
        .filter_map(|(index, topic)| filter_topic(index, topic, &needle))
        .collect();

    tracing::debug!(query, topics = topics.len(), "filtered catalog");

    FilteredCatalog {
        query: query.to_string(),
        topics,
    }
}

fn filter_topic<'a>(index: usize, topic: &'a Topic, needle: &str) -> Option<FilteredTopic<'a>> {
    let all = || topic.subtopics.iter().enumerate().collect::<Vec<_>>();

    if needle.is_empty() {
        return Some(FilteredTopic {
            index,
            topic,
            subtopics: all(),
            name_matched: false,
        });
    }

    if contains_folded(&topic.name, needle) {
        return Some(FilteredTopic {
            index,
            topic,
            subtopics: all(),
            name_matched: true,
        });
    }

    let subtopics: Vec<_> = topic
        .subtopics
        .iter()
        .enumerate()
        .filter(|(_, s)| {
            contains_folded(&s.name, needle) || contains_folded(&s.description, needle)
        })
        .collect();

    if subtopics.is_empty() {
        None
    } else {
        Some(FilteredTopic {
            index,
            topic,
            subtopics,
            name_matched: false,
        })
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
