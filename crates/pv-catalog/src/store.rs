//! Read-only catalog store
//!
//! [`Catalog`] is loaded once and never mutated. Any "edit" is modelled
//! outside the store as a per-section override.

use crate::address::{Address, SectionRef};
use crate::error::{CatalogError, CatalogResult};
use crate::model::{SectionKind, Subtopic, Topic};
use std::sync::Arc;

const BUILTIN_CATALOG: &str = include_str!("../data/topics.json");

/// Handle to an immutable catalog
///
/// Cloning is cheap; all clones share the same topics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    topics: Arc<[Topic]>,
}

/// A catalog node looked up by address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// A topic header
    Topic(&'a Topic),
    /// A subtopic header
    Subtopic {
        /// Enclosing topic
        topic: &'a Topic,
        /// The entry
        subtopic: &'a Subtopic,
    },
    /// A section body
    Section {
        /// Enclosing topic
        topic: &'a Topic,
        /// Enclosing entry
        subtopic: &'a Subtopic,
        /// Which field
        kind: SectionKind,
    },
}

impl<'a> Resolved<'a> {
    /// Name of the enclosing (or addressed) topic
    #[inline]
    #[must_use]
    pub fn topic_name(&self) -> &'a str {
        match *self {
            Self::Topic(topic) | Self::Subtopic { topic, .. } | Self::Section { topic, .. } => {
                &topic.name
            }
        }
    }

    /// Name of the enclosing (or addressed) subtopic
    #[inline]
    #[must_use]
    pub fn subtopic_name(&self) -> Option<&'a str> {
        match *self {
            Self::Topic(_) => None,
            Self::Subtopic { subtopic, .. } | Self::Section { subtopic, .. } => {
                Some(&subtopic.name)
            }
        }
    }

    /// Section text, for section nodes
    #[inline]
    #[must_use]
    pub fn text(&self) -> Option<&'a str> {
        match *self {
            Self::Section { subtopic, kind, .. } => Some(subtopic.field(kind)),
            _ => None,
        }
    }
}

impl Catalog {
    /// Load a catalog from its topics
    #[must_use]
    pub fn load(topics: Vec<Topic>) -> Self {
        let entries: usize = topics.iter().map(|t| t.subtopics.len()).sum();
        tracing::info!(topics = topics.len(), entries, "catalog loaded");
        Self {
            topics: topics.into(),
        }
    }

    /// Load a catalog from a JSON array of topics
    ///
    /// # Errors
    /// Returns `CatalogError::Json` if the document is not a topic array
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let topics: Vec<Topic> = serde_json::from_str(json)?;
        Ok(Self::load(topics))
    }

    /// The catalog bundled with the viewer
    ///
    /// # Errors
    /// Returns `CatalogError::Json` if the bundled data is corrupt
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// All topics in document order
    #[inline]
    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Number of topics
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Check if catalog has no topics
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Lookup topic by index
    ///
    /// # Errors
    /// Returns `CatalogError::TopicOutOfRange` for an invalid index
    pub fn topic(&self, topic: usize) -> CatalogResult<&Topic> {
        self.topics
            .get(topic)
            .ok_or(CatalogError::TopicOutOfRange {
                topic,
                len: self.topics.len(),
            })
    }

    /// Lookup subtopic by indices
    ///
    /// # Errors
    /// Returns an out-of-range error if either index is invalid
    pub fn get(&self, topic: usize, subtopic: usize) -> CatalogResult<&Subtopic> {
        let parent = self.topic(topic)?;
        parent
            .subtopics
            .get(subtopic)
            .ok_or(CatalogError::SubtopicOutOfRange {
                topic,
                subtopic,
                len: parent.subtopics.len(),
            })
    }

    /// Original text of a section
    ///
    /// # Errors
    /// Returns an out-of-range error if the section does not resolve
    pub fn section_text(&self, section: SectionRef) -> CatalogResult<&str> {
        Ok(self
            .get(section.topic, section.subtopic)?
            .field(section.kind))
    }

    /// Resolve an address to its node
    ///
    /// # Errors
    /// Returns an out-of-range error if the address does not resolve
    pub fn resolve(&self, address: &Address) -> CatalogResult<Resolved<'_>> {
        let result = match *address {
            Address::Topic(topic) => self.topic(topic).map(Resolved::Topic),
            Address::Subtopic { topic, subtopic } => {
                self.get(topic, subtopic).map(|entry| Resolved::Subtopic {
                    topic: &self.topics[topic],
                    subtopic: entry,
                })
            }
            Address::Section(section) => {
                self.get(section.topic, section.subtopic)
                    .map(|entry| Resolved::Section {
                        topic: &self.topics[section.topic],
                        subtopic: entry,
                        kind: section.kind,
                    })
            }
        };
        if let Err(ref e) = result {
            tracing::debug!(%address, error = %e, "address did not resolve");
        }
        result
    }

    /// Parse and resolve an address string
    ///
    /// # Errors
    /// Returns `CatalogError::Address` for a malformed string, or an
    /// out-of-range error if it does not resolve
    pub fn resolve_str(&self, raw: &str) -> CatalogResult<(Address, Resolved<'_>)> {
        let address: Address = raw.parse()?;
        let resolved = self.resolve(&address)?;
        Ok((address, resolved))
    }

    /// Every address in the catalog, in document order
    pub fn addresses(&self) -> impl Iterator<Item = Address> + '_ {
        self.topics.iter().enumerate().flat_map(|(t, topic)| {
            std::iter::once(Address::topic(t)).chain(topic.subtopics.iter().enumerate().flat_map(
                move |(s, _)| {
                    std::iter::once(Address::subtopic(t, s)).chain(
                        SectionKind::ALL
                            .into_iter()
                            .map(move |kind| Address::section(t, s, kind)),
                    )
                },
            ))
        })
    }
}

impl From<Vec<Topic>> for Catalog {
    fn from(topics: Vec<Topic>) -> Self {
        Self::load(topics)
    }
}
