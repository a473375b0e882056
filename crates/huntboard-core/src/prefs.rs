//! User preference persistence.

use tracing::debug;

use crate::error::HuntError;
use crate::model::UserPreferences;
use crate::storage::{KeyValueStore, load, save};

/// Stored preferences under `key`, or defaults when missing or invalid.
pub fn load_preferences<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> UserPreferences {
    load(store, key, UserPreferences::default())
}

/// Validate and store `prefs` under `key`.
///
/// # Errors
///
/// Returns [`HuntError::Validation`] without writing when `prefs` breaks a
/// constraint, or the storage error when the write fails.
pub fn save_preferences<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    prefs: &UserPreferences,
) -> Result<(), HuntError> {
    save(store, key, prefs)?;
    debug!(key, "saved preferences");
    Ok(())
}

/// Reset preferences to defaults by removing the stored document.
///
/// # Errors
///
/// Returns the storage error when the removal fails.
pub fn reset_preferences<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
) -> Result<(), HuntError> {
    store.remove(key)?;
    debug!(key, "reset preferences");
    Ok(())
}
