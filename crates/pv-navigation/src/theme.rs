//! Theme controller
//!
//! Resolves the color scheme from the preference store, falling back to the
//! host's ambient preference, and persists toggles best-effort.

use crate::collaborators::{AmbientPreference, PreferenceStore};
use pv_render::Theme;

/// Current color scheme and the key it is persisted under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeController {
    key: String,
    theme: Theme,
}

impl ThemeController {
    /// Create controller with an explicit theme
    #[must_use]
    pub fn new(key: impl Into<String>, theme: Theme) -> Self {
        Self {
            key: key.into(),
            theme,
        }
    }

    /// Resolve the initial theme
    ///
    /// A stored `"dark"` or `"light"` wins. A missing or unrecognised value,
    /// or an unreadable store, falls back to the ambient preference.
    pub fn load<S, A>(key: impl Into<String>, store: &S, ambient: &A) -> Self
    where
        S: PreferenceStore + ?Sized,
        A: AmbientPreference + ?Sized,
    {
        let key = key.into();
        let stored = match store.get(&key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "could not read theme preference");
                None
            }
        };

        let theme = match stored.as_deref().and_then(Theme::parse) {
            Some(theme) => theme,
            None => {
                if let Some(value) = stored.as_deref() {
                    tracing::debug!(key = %key, value, "ignoring unrecognised theme value");
                }
                if ambient.prefers_dark() {
                    Theme::Dark
                } else {
                    Theme::Light
                }
            }
        };

        Self { key, theme }
    }

    /// Current theme
    #[inline]
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and persist it
    ///
    /// The in-memory theme changes even if the store rejects the write.
    pub fn toggle<S>(&mut self, store: &mut S) -> Theme
    where
        S: PreferenceStore + ?Sized,
    {
        self.theme = self.theme.toggled();
        if let Err(e) = store.set(&self.key, self.theme.as_str()) {
            tracing::warn!(key = %self.key, error = %e, "could not persist theme preference");
        }
        self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{MemoryPreferenceStore, SystemPreference};
    use crate::error::CollaboratorError;

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, CollaboratorError> {
            Err(CollaboratorError::PreferenceStore("quota exceeded".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), CollaboratorError> {
            Err(CollaboratorError::PreferenceStore("quota exceeded".to_string()))
        }
    }

    #[test]
    fn stored_value_wins_over_ambient() {
        let store = MemoryPreferenceStore::new().with_value("theme", "light");
        let controller = ThemeController::load("theme", &store, &SystemPreference::DARK);
        assert_eq!(controller.theme(), Theme::Light);
    }

    #[test]
    fn missing_value_uses_ambient() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(
            ThemeController::load("theme", &store, &SystemPreference::DARK).theme(),
            Theme::Dark
        );
        assert_eq!(
            ThemeController::load("theme", &store, &SystemPreference::LIGHT).theme(),
            Theme::Light
        );
    }

    #[test]
    fn unrecognised_value_uses_ambient() {
        let store = MemoryPreferenceStore::new().with_value("theme", "sepia");
        let controller = ThemeController::load("theme", &store, &SystemPreference::DARK);
        assert_eq!(controller.theme(), Theme::Dark);
    }

    #[test]
    fn toggle_persists() {
        let mut store = MemoryPreferenceStore::new();
        let mut controller = ThemeController::load("theme", &store, &SystemPreference::LIGHT);
        assert_eq!(controller.toggle(&mut store), Theme::Dark);
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(controller.toggle(&mut store), Theme::Light);
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn broken_store_degrades() {
        let mut store = BrokenStore;
        let mut controller = ThemeController::load("theme", &store, &SystemPreference::DARK);
        assert_eq!(controller.theme(), Theme::Dark);
        assert_eq!(controller.toggle(&mut store), Theme::Light);
        assert_eq!(controller.theme(), Theme::Light);
    }
}
