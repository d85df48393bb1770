//! Error types for the navigation engine
//!
//! Provides error handling for:
//! - Address lookups (parse failures, out-of-range indices)
//! - Substitution previews (invalid search patterns)
//! - Boundary collaborators (clipboard, preference store)
//! - Configuration loading

use pv_catalog::{Address, AddressError, CatalogError};

/// Errors from find/replace previews
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubstitutionError {
    /// Search text is not a valid pattern
    #[error("invalid search pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Failures reported by boundary collaborators
///
/// These never abort an operation; callers log and continue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    /// Clipboard write failed
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    /// Preference store read or write failed
    #[error("preference store unavailable: {0}")]
    PreferenceStore(String),
}

/// Errors loading viewer configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML document did not parse
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value is out of its allowed range
    #[error("invalid config value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

impl ConfigError {
    /// Create invalid-value error
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Main navigation error type
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// Address did not parse or does not resolve
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Operation needs a section address
    #[error("not a section address: {0}")]
    NotASection(Address),

    /// Find/replace preview failed
    #[error("substitution error: {0}")]
    Substitution(#[from] SubstitutionError),
}

impl NavigationError {
    /// Whether the error means "entry not found"
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Catalog(e) => e.is_out_of_range() || matches!(e, CatalogError::Address(_)),
            _ => false,
        }
    }
}

impl From<AddressError> for NavigationError {
    fn from(err: AddressError) -> Self {
        Self::Catalog(CatalogError::Address(err))
    }
}

/// Result type alias for navigation operations
pub type NavigationResult<T> = Result<T, NavigationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitution_error_display() {
        let err = SubstitutionError::InvalidPattern {
            pattern: "(".to_string(),
            message: "unclosed group".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid search pattern '(': unclosed group"
        );
    }

    #[test]
    fn collaborator_error_display() {
        let err = CollaboratorError::Clipboard("permission denied".to_string());
        assert_eq!(err.to_string(), "clipboard unavailable: permission denied");
    }

    #[test]
    fn error_conversions() {
        let err: NavigationError = AddressError::UnknownPrefix("x".to_string()).into();
        assert!(matches!(err, NavigationError::Catalog(CatalogError::Address(_))));
        assert!(err.is_not_found());

        let err: NavigationError = CatalogError::TopicOutOfRange { topic: 9, len: 1 }.into();
        assert!(err.is_not_found());

        let err = NavigationError::NotASection(Address::topic(0));
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "not a section address: topic-0");
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::invalid("focus_line", "must be finite");
        assert_eq!(
            err.to_string(),
            "invalid config value for focus_line: must be finite"
        );
    }
}
