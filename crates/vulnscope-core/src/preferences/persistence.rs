//! Preferences persistence
//!
//! Defines the backend seam the store persists through, plus the provided
//! file-backed implementation writing a TOML document with atomic
//! temp-file-then-rename operations.

use std::fs;
use std::path::{Path, PathBuf};

use crate::preferences::errors::PersistenceError;
use crate::preferences::types::Preferences;
use crate::preferences::validation;

/// Storage seam for the preferences store.
///
/// The store treats the backend as an opaque persistence operation: `load`
/// once at session start, `save` on explicit user action. Implementations
/// must be full-snapshot — partial writes are not part of the contract.
pub trait PreferencesBackend {
    /// Load the persisted snapshot. `Ok(None)` means no document exists
    /// yet (first session); that is not an error.
    fn load(&self) -> Result<Option<Preferences>, PersistenceError>;

    /// Persist the full snapshot.
    fn save(&self, prefs: &Preferences) -> Result<(), PersistenceError>;
}

/// File-backed preferences storage under a base directory.
///
/// The document lives at `<base_dir>/preferences.toml`. Writes go to a
/// temp file first and are renamed into place so a crash mid-write never
/// leaves a truncated document.
#[derive(Debug, Clone)]
pub struct FilePreferencesBackend {
    base_dir: PathBuf,
}

const PREFERENCES_FILE: &str = "preferences.toml";

impl FilePreferencesBackend {
    /// Create a backend rooted at an explicit base directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Create a backend at the default location (`~/.vulnscope`).
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BaseDirUnavailable`] when no home
    /// directory can be determined.
    pub fn default_location() -> Result<Self, PersistenceError> {
        let home = dirs::home_dir().ok_or(PersistenceError::BaseDirUnavailable)?;
        Ok(Self::new(home.join(".vulnscope")))
    }

    fn preferences_file(&self) -> PathBuf {
        self.base_dir.join(PREFERENCES_FILE)
    }
}

fn cleanup_temp_file(temp_file: &Path, original_error: &std::io::Error) {
    if let Err(cleanup_err) = fs::remove_file(temp_file) {
        tracing::warn!(
            event = "core.preferences.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err,
            message = "Failed to clean up temp file after write error"
        );
    }
}

impl PreferencesBackend for FilePreferencesBackend {
    fn load(&self) -> Result<Option<Preferences>, PersistenceError> {
        let path = self.preferences_file();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PersistenceError::Io { source: e }),
        };

        let mut prefs: Preferences =
            toml::from_str(&content).map_err(|e| PersistenceError::Deserialize {
                message: e.to_string(),
            })?;

        // Hand-edited documents may carry out-of-range intervals; clamp on
        // load so the in-memory invariant holds from the first read.
        if validation::validate_preferences(&prefs).is_err() {
            let clamped = validation::clamp_refresh_interval(prefs.refresh_interval_ms);
            tracing::warn!(
                event = "core.preferences.interval_clamped_on_load",
                file = %path.display(),
                stored = prefs.refresh_interval_ms,
                clamped = clamped,
            );
            prefs.refresh_interval_ms = clamped;
        }

        Ok(Some(prefs))
    }

    fn save(&self, prefs: &Preferences) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.base_dir).map_err(|e| PersistenceError::Io { source: e })?;

        let document = toml::to_string_pretty(prefs).map_err(|e| PersistenceError::Serialize {
            message: e.to_string(),
        })?;

        let path = self.preferences_file();
        let temp_file = path.with_extension("toml.tmp");

        // Write to temp file
        if let Err(e) = fs::write(&temp_file, &document) {
            cleanup_temp_file(&temp_file, &e);
            return Err(PersistenceError::Io { source: e });
        }

        // Rename temp file to final location
        if let Err(e) = fs::rename(&temp_file, &path) {
            cleanup_temp_file(&temp_file, &e);
            return Err(PersistenceError::Io { source: e });
        }

        Ok(())
    }
}
