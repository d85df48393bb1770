//! Canonical addresses for catalog nodes
//!
//! Provides [`Address`] for hierarchical addressing of topics, subtopics and
//! sections. Addresses double as anchor identifiers, deep-link fragments and
//! override keys.
//!
//! # Examples
//! - `topic-0`
//! - `subtopic-0-2`
//! - `section-1-2-golden-example-code` (or the alias `section-1-2-code`)

use crate::error::AddressError;
use crate::model::SectionKind;
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

const TOPIC_PREFIX: &str = "topic-";
const SUBTOPIC_PREFIX: &str = "subtopic-";
const SECTION_PREFIX: &str = "section-";

/// Typed reference to one section of one subtopic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionRef {
    /// Topic index
    pub topic: usize,
    /// Subtopic index within the topic
    pub subtopic: usize,
    /// Which of the four fields
    pub kind: SectionKind,
}

impl SectionRef {
    /// Create section reference
    #[inline]
    #[must_use]
    pub const fn new(topic: usize, subtopic: usize, kind: SectionKind) -> Self {
        Self {
            topic,
            subtopic,
            kind,
        }
    }

    /// Address of this section
    #[inline]
    #[must_use]
    pub const fn address(self) -> Address {
        Address::Section(self)
    }
}

impl Display for SectionRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SECTION_PREFIX}{}-{}-{}",
            self.topic,
            self.subtopic,
            self.kind.slug()
        )
    }
}

/// Address of a topic, subtopic or section
///
/// Ordering follows document order: a topic header precedes its subtopics,
/// a subtopic header precedes its sections, and sections follow
/// [`SectionKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Address {
    /// `topic-{t}`
    Topic(usize),
    /// `subtopic-{t}-{s}`
    Subtopic {
        /// Topic index
        topic: usize,
        /// Subtopic index
        subtopic: usize,
    },
    /// `section-{t}-{s}-{slug}`
    Section(SectionRef),
}

impl Address {
    /// Topic address
    #[inline]
    #[must_use]
    pub const fn topic(topic: usize) -> Self {
        Self::Topic(topic)
    }

    /// Subtopic address
    #[inline]
    #[must_use]
    pub const fn subtopic(topic: usize, subtopic: usize) -> Self {
        Self::Subtopic { topic, subtopic }
    }

    /// Section address
    #[inline]
    #[must_use]
    pub const fn section(topic: usize, subtopic: usize, kind: SectionKind) -> Self {
        Self::Section(SectionRef::new(topic, subtopic, kind))
    }

    /// Topic index, present for every variant
    #[inline]
    #[must_use]
    pub const fn topic_index(&self) -> usize {
        match *self {
            Self::Topic(topic) | Self::Subtopic { topic, .. } => topic,
            Self::Section(section) => section.topic,
        }
    }

    /// Subtopic index, absent for topic addresses
    #[inline]
    #[must_use]
    pub const fn subtopic_index(&self) -> Option<usize> {
        match *self {
            Self::Topic(_) => None,
            Self::Subtopic { subtopic, .. } => Some(subtopic),
            Self::Section(section) => Some(section.subtopic),
        }
    }

    /// Section reference, if this addresses a section
    #[inline]
    #[must_use]
    pub const fn as_section(&self) -> Option<SectionRef> {
        match *self {
            Self::Section(section) => Some(section),
            _ => None,
        }
    }

    /// Enclosing address (if not a topic)
    #[inline]
    #[must_use]
    pub const fn parent(&self) -> Option<Self> {
        match *self {
            Self::Topic(_) => None,
            Self::Subtopic { topic, .. } => Some(Self::Topic(topic)),
            Self::Section(section) => Some(Self::Subtopic {
                topic: section.topic,
                subtopic: section.subtopic,
            }),
        }
    }

    /// Check if this address strictly encloses another
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        let mut current = other.parent();
        while let Some(addr) = current {
            if addr == *self {
                return true;
            }
            current = addr.parent();
        }
        false
    }

    /// Specificity rank: sections are the most specific
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> usize {
        match self {
            Self::Topic(_) => 0,
            Self::Subtopic { .. } => 1,
            Self::Section(_) => 2,
        }
    }

    fn document_key(&self) -> (usize, Option<usize>, Option<usize>) {
        match *self {
            Self::Topic(topic) => (topic, None, None),
            Self::Subtopic { topic, subtopic } => (topic, Some(subtopic), None),
            Self::Section(s) => (s.topic, Some(s.subtopic), Some(s.kind.ordinal())),
        }
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> Ordering {
        self.document_key().cmp(&other.document_key())
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Topic(topic) => write!(f, "{TOPIC_PREFIX}{topic}"),
            Self::Subtopic { topic, subtopic } => write!(f, "{SUBTOPIC_PREFIX}{topic}-{subtopic}"),
            Self::Section(section) => section.fmt(f),
        }
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix(SECTION_PREFIX) {
            let (topic, rest) = split_index(s, rest)?;
            let (subtopic, slug) = split_index(s, rest)?;
            let kind =
                SectionKind::from_slug(slug).ok_or_else(|| AddressError::UnknownSection {
                    address: s.to_string(),
                    slug: slug.to_string(),
                })?;
            Ok(Self::section(topic, subtopic, kind))
        } else if let Some(rest) = s.strip_prefix(SUBTOPIC_PREFIX) {
            let (topic, rest) = split_index(s, rest)?;
            let subtopic = parse_index(s, rest)?;
            Ok(Self::subtopic(topic, subtopic))
        } else if let Some(rest) = s.strip_prefix(TOPIC_PREFIX) {
            Ok(Self::topic(parse_index(s, rest)?))
        } else {
            Err(AddressError::UnknownPrefix(s.to_string()))
        }
    }
}

impl From<SectionRef> for Address {
    fn from(section: SectionRef) -> Self {
        Self::Section(section)
    }
}

/// Breadcrumb label for a raw section address
///
/// The label is the slug text actually present in the address with `-`
/// replaced by spaces, so `section-0-0-golden-example-thought` yields
/// `golden example thought` and the alias `section-1-2-code` yields `code`.
/// Returns `None` for anything that is not a well-formed section address.
#[must_use]
pub fn section_label(raw: &str) -> Option<String> {
    match raw.parse::<Address>() {
        Ok(Address::Section(_)) => {
            let slug = raw.splitn(4, '-').nth(3)?;
            Some(slug.replace('-', " "))
        }
        _ => None,
    }
}

fn split_index<'a>(address: &str, rest: &'a str) -> Result<(usize, &'a str), AddressError> {
    let (index, tail) = rest
        .split_once('-')
        .ok_or_else(|| AddressError::Truncated(address.to_string()))?;
    Ok((parse_index(address, index)?, tail))
}

fn parse_index(address: &str, segment: &str) -> Result<usize, AddressError> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if !canonical {
        return Err(AddressError::InvalidIndex {
            address: address.to_string(),
            segment: segment.to_string(),
        });
    }
    segment.parse().map_err(|_| AddressError::InvalidIndex {
        address: address.to_string(),
        segment: segment.to_string(),
    })
}
