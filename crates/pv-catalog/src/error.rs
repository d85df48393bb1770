//! Error types for the catalog store

/// Errors parsing an address string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// Not a topic, subtopic or section address
    #[error("unknown address prefix: '{0}'")]
    UnknownPrefix(String),

    /// Address ends before all indices were read
    #[error("truncated address: '{0}'")]
    Truncated(String),

    /// Index segment is not a canonical decimal number
    #[error("invalid index '{segment}' in address '{address}'")]
    InvalidIndex { address: String, segment: String },

    /// Section slug does not name a section kind
    #[error("unknown section '{slug}' in address '{address}'")]
    UnknownSection { address: String, slug: String },
}

/// Errors from catalog lookups and loading
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Topic index past the end of the catalog
    #[error("topic {topic} out of range (catalog has {len} topics)")]
    TopicOutOfRange { topic: usize, len: usize },

    /// Subtopic index past the end of its topic
    #[error("subtopic {subtopic} out of range for topic {topic} ({len} subtopics)")]
    SubtopicOutOfRange {
        topic: usize,
        subtopic: usize,
        len: usize,
    },

    /// Address string did not parse
    #[error("invalid address: {0}")]
    Address(#[from] AddressError),

    /// Catalog document failed to deserialize
    #[error("catalog json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    /// Whether the error means "entry not found" (skip the node)
    #[inline]
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::TopicOutOfRange { .. } | Self::SubtopicOutOfRange { .. }
        )
    }
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
