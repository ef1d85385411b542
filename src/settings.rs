//! Presentation preferences
//!
//! Persisted separately from the high score.

use serde::{Deserialize, Serialize};

use crate::platform::storage::{KeyValueStore, StorageError};

/// Player-facing display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Swap the two block colors for a stronger-contrast pair
    pub high_contrast: bool,
    /// Draw the background grid
    pub show_grid: bool,
    /// Show the control hint while playing
    pub show_hint: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_contrast: false,
            show_grid: true,
            show_hint: true,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "chroma_catch_settings";

    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        if let Some(json) = store.get(Self::STORAGE_KEY) {
            match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)
            .map_err(|e| StorageError::Rejected(e.to_string()))?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::storage::MemoryStore;

    #[test]
    fn test_missing_fields_default() {
        let mut store = MemoryStore::new();
        store
            .set(Settings::STORAGE_KEY, r#"{ "high_contrast": true }"#)
            .unwrap();
        let settings = Settings::load(&store);
        assert!(settings.high_contrast);
        assert!(settings.show_grid);
        assert!(settings.show_hint);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let settings = Settings {
            high_contrast: true,
            show_grid: false,
            show_hint: false,
        };
        settings.save(&mut store).unwrap();
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_malformed_is_default() {
        let mut store = MemoryStore::new();
        store.set(Settings::STORAGE_KEY, "[1,2").unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
