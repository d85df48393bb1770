//! Boundary collaborators
//!
//! The engine talks to the host environment only through these traits:
//! a clipboard, a key/value preference store and the ambient colour-scheme
//! preference. In-memory implementations are provided for embedding and
//! tests.

use crate::error::CollaboratorError;
use std::collections::HashMap;

/// Write-only clipboard
pub trait Clipboard {
    /// Replace the clipboard contents
    ///
    /// # Errors
    /// Returns `CollaboratorError::Clipboard` if the host refuses the write
    fn write(&mut self, text: &str) -> Result<(), CollaboratorError>;
}

/// Persistent key/value preferences
pub trait PreferenceStore {
    /// Read a value
    ///
    /// # Errors
    /// Returns `CollaboratorError::PreferenceStore` if the store cannot be read
    fn get(&self, key: &str) -> Result<Option<String>, CollaboratorError>;

    /// Write a value
    ///
    /// # Errors
    /// Returns `CollaboratorError::PreferenceStore` if the store cannot be written
    fn set(&mut self, key: &str, value: &str) -> Result<(), CollaboratorError>;
}

/// Ambient colour-scheme preference of the host
pub trait AmbientPreference {
    /// Whether the host prefers a dark scheme
    fn prefers_dark(&self) -> bool;
}

/// Fixed ambient preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemPreference {
    /// Dark scheme preferred
    pub dark: bool,
}

impl SystemPreference {
    /// Preference for a dark scheme
    pub const DARK: Self = Self { dark: true };
    /// Preference for a light scheme
    pub const LIGHT: Self = Self { dark: false };
}

impl AmbientPreference for SystemPreference {
    fn prefers_dark(&self) -> bool {
        self.dark
    }
}

/// Clipboard holding the last written text in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    /// Create empty clipboard
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last written text
    #[inline]
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write(&mut self, text: &str) -> Result<(), CollaboratorError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Preference store backed by a map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With an initial value
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, CollaboratorError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), CollaboratorError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
