//! Catalog data model
//!
//! A catalog is an ordered sequence of [`Topic`]s, each holding an ordered
//! sequence of [`Subtopic`]s. Every subtopic carries exactly four text
//! fields, one per [`SectionKind`].

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Top-level grouping in the catalog
///
/// Identity is the topic's position in the catalog, not its name: names may
/// repeat across catalog versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Display name
    pub name: String,
    /// Entries under this topic, in document order
    #[serde(default)]
    pub subtopics: Vec<Subtopic>,
}

impl Topic {
    /// Create topic from name and entries
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, subtopics: Vec<Subtopic>) -> Self {
        Self {
            name: name.into(),
            subtopics,
        }
    }
}

/// A single documented policy example
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtopic {
    /// Display name
    pub name: String,
    /// When the policy applies
    #[serde(default)]
    pub description: String,
    /// Worked reasoning ("golden example thought")
    #[serde(rename = "goldenExampleThought", alias = "thought", default)]
    pub thought: String,
    /// Short user-facing response ("golden example RTU")
    #[serde(rename = "goldenExampleRTU", alias = "summary", default)]
    pub summary: String,
    /// Example snippet ("golden example code")
    #[serde(rename = "goldenExampleCode", alias = "code", default)]
    pub code: String,
}

impl Subtopic {
    /// Create an entry with only a name; text fields start empty
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            thought: String::new(),
            summary: String::new(),
            code: String::new(),
        }
    }

    /// With description text
    #[must_use]
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// With thought text
    #[must_use]
    pub fn with_thought(mut self, text: impl Into<String>) -> Self {
        self.thought = text.into();
        self
    }

    /// With summary text
    #[must_use]
    pub fn with_summary(mut self, text: impl Into<String>) -> Self {
        self.summary = text.into();
        self
    }

    /// With code text
    #[must_use]
    pub fn with_code(mut self, text: impl Into<String>) -> Self {
        self.code = text.into();
        self
    }

    /// Text of one section
    #[inline]
    #[must_use]
    pub fn field(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::Description => &self.description,
            SectionKind::Thought => &self.thought,
            SectionKind::Summary => &self.summary,
            SectionKind::Code => &self.code,
        }
    }
}

/// The four fixed sections of a subtopic, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    /// Applicability description
    Description,
    /// Golden example thought
    Thought,
    /// Golden example response-to-user
    Summary,
    /// Golden example code
    Code,
}

impl SectionKind {
    /// All kinds in document order
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Description,
        SectionKind::Thought,
        SectionKind::Summary,
        SectionKind::Code,
    ];

    /// Position within a subtopic
    #[inline]
    #[must_use]
    pub const fn ordinal(self) -> usize {
        match self {
            Self::Description => 0,
            Self::Thought => 1,
            Self::Summary => 2,
            Self::Code => 3,
        }
    }

    /// Heading shown above the section body
    #[inline]
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Thought => "Golden Example Thought",
            Self::Summary => "Golden Example RTU",
            Self::Code => "Golden Example Code",
        }
    }

    /// Canonical address slug (kebab-cased title)
    #[inline]
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Thought => "golden-example-thought",
            Self::Summary => "golden-example-rtu",
            Self::Code => "golden-example-code",
        }
    }

    /// Parse a slug, accepting canonical slugs and short aliases
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "description" => Some(Self::Description),
            "golden-example-thought" | "thought" => Some(Self::Thought),
            "golden-example-rtu" | "rtu" | "summary" => Some(Self::Summary),
            "golden-example-code" | "code" => Some(Self::Code),
            _ => None,
        }
    }
}

impl Display for SectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
