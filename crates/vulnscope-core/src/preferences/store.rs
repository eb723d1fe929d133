//! The session-scoped preferences store.
//!
//! Single source of truth for user-adjustable settings within a session.
//! Updates apply to the in-memory snapshot immediately (optimistic) so the
//! UI reflects them without waiting for persistence; `save` persists the
//! full snapshot explicitly. On a failed save the in-memory snapshot
//! reverts to the last successfully persisted one, so the UI never drifts
//! from what the store actually holds.

use crate::events::Event;
use crate::preferences::errors::PersistenceError;
use crate::preferences::persistence::PreferencesBackend;
use crate::preferences::types::{PreferenceUpdate, Preferences};
use crate::preferences::validation;

/// Session-scoped preferences store.
///
/// Created at session start, dropped at sign-out. The store is
/// single-owner: all mutations go through `&mut self` methods, and sharing
/// across tasks is the consumer's concern. Competing updates are last
/// write wins, not merged.
pub struct PreferencesStore<B: PreferencesBackend> {
    backend: B,
    /// The snapshot consumers see, including unsaved optimistic updates.
    current: Preferences,
    /// The last snapshot the backend confirmed. Revert target on save failure.
    persisted: Preferences,
}

impl<B: PreferencesBackend> PreferencesStore<B> {
    /// Load the store from the backend, falling back to the documented
    /// defaults when no document exists or the load fails.
    ///
    /// Load failures are surfaced through the log rather than blocking
    /// session start — a dashboard with default preferences beats no
    /// dashboard.
    pub fn load(backend: B) -> (Self, Event) {
        let (prefs, from_disk) = match backend.load() {
            Ok(Some(prefs)) => (prefs, true),
            Ok(None) => (Preferences::default(), false),
            Err(e) => {
                tracing::error!(
                    event = "core.preferences.load_failed",
                    error = %e,
                    message = "Failed to load preferences, falling back to defaults"
                );
                (Preferences::default(), false)
            }
        };

        tracing::info!(
            event = "core.preferences.loaded",
            from_disk = from_disk,
            auto_refresh = prefs.auto_refresh,
            refresh_interval_ms = prefs.refresh_interval_ms,
        );

        (
            Self {
                backend,
                current: prefs.clone(),
                persisted: prefs,
            },
            Event::PreferencesLoaded { from_disk },
        )
    }

    /// Current snapshot, including unsaved optimistic updates. Never
    /// touches the backend.
    pub fn get(&self) -> Preferences {
        self.current.clone()
    }

    /// Whether the in-memory snapshot differs from the last persisted one.
    pub fn is_dirty(&self) -> bool {
        self.current != self.persisted
    }

    /// Apply one change to the in-memory snapshot immediately.
    ///
    /// Does not touch the backend; call [`save`](Self::save) to persist.
    /// `RefreshIntervalMs` values are clamped into the documented range.
    pub fn update(&mut self, update: PreferenceUpdate) -> Event {
        let key = update.key();

        match update {
            PreferenceUpdate::Theme(v) => self.current.theme = v,
            PreferenceUpdate::FontSize(v) => self.current.font_size = v,
            PreferenceUpdate::DashboardLayout(v) => self.current.dashboard_layout = v,
            PreferenceUpdate::AutoRefresh(v) => self.current.auto_refresh = v,
            PreferenceUpdate::RefreshIntervalMs(v) => {
                let clamped = validation::clamp_refresh_interval(v);
                if clamped != v {
                    tracing::warn!(
                        event = "core.preferences.interval_clamped",
                        requested = v,
                        clamped = clamped,
                    );
                }
                self.current.refresh_interval_ms = clamped;
            }
            PreferenceUpdate::EmailAlerts(v) => self.current.notifications.email_alerts = v,
            PreferenceUpdate::PushAlerts(v) => self.current.notifications.push_alerts = v,
            PreferenceUpdate::WeeklyDigest(v) => self.current.notifications.weekly_digest = v,
            PreferenceUpdate::HighContrast(v) => self.current.accessibility.high_contrast = v,
            PreferenceUpdate::ReduceMotion(v) => self.current.accessibility.reduce_motion = v,
            PreferenceUpdate::LargeTargets(v) => self.current.accessibility.large_targets = v,
        }

        tracing::debug!(event = "core.preferences.updated", key = key);

        Event::PreferenceUpdated {
            key: key.to_string(),
        }
    }

    /// Persist the full in-memory snapshot.
    ///
    /// # Errors
    ///
    /// On failure the in-memory snapshot reverts to the last successfully
    /// persisted one and the error is returned for display.
    pub fn save(&mut self) -> Result<Event, PersistenceError> {
        match self.backend.save(&self.current) {
            Ok(()) => {
                self.persisted = self.current.clone();
                tracing::info!(event = "core.preferences.saved");
                Ok(Event::PreferencesSaved)
            }
            Err(e) => {
                tracing::warn!(
                    event = "core.preferences.save_reverted",
                    error = %e,
                    message = "Save failed, reverting in-memory snapshot to last persisted state"
                );
                self.current = self.persisted.clone();
                Err(e)
            }
        }
    }

    /// Replace the snapshot with the documented defaults and persist it.
    ///
    /// # Errors
    ///
    /// On persistence failure the same revert rule as [`save`](Self::save)
    /// applies: the previous snapshot stays in effect.
    pub fn reset_to_defaults(&mut self) -> Result<Vec<Event>, PersistenceError> {
        self.current = Preferences::default();
        let saved = self.save()?;
        tracing::info!(event = "core.preferences.reset");
        Ok(vec![Event::PreferencesReset, saved])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::types::Theme;
    use std::cell::RefCell;

    /// Backend recording saves in memory, optionally failing.
    struct TestBackend {
        stored: RefCell<Option<Preferences>>,
        fail_saves: RefCell<bool>,
    }

    impl TestBackend {
        fn empty() -> Self {
            Self {
                stored: RefCell::new(None),
                fail_saves: RefCell::new(false),
            }
        }

        fn with_stored(prefs: Preferences) -> Self {
            Self {
                stored: RefCell::new(Some(prefs)),
                fail_saves: RefCell::new(false),
            }
        }
    }

    impl PreferencesBackend for TestBackend {
        fn load(&self) -> Result<Option<Preferences>, PersistenceError> {
            Ok(self.stored.borrow().clone())
        }

        fn save(&self, prefs: &Preferences) -> Result<(), PersistenceError> {
            if *self.fail_saves.borrow() {
                return Err(PersistenceError::Io {
                    source: std::io::Error::other("backend down"),
                });
            }
            *self.stored.borrow_mut() = Some(prefs.clone());
            Ok(())
        }
    }

    #[test]
    fn test_load_empty_backend_uses_defaults() {
        let (store, event) = PreferencesStore::load(TestBackend::empty());
        assert_eq!(event, Event::PreferencesLoaded { from_disk: false });
        assert_eq!(store.get(), Preferences::default());
    }

    #[test]
    fn test_load_uses_stored_snapshot() {
        let mut prefs = Preferences::default();
        prefs.auto_refresh = true;
        let (store, event) = PreferencesStore::load(TestBackend::with_stored(prefs.clone()));

        assert_eq!(event, Event::PreferencesLoaded { from_disk: true });
        assert_eq!(store.get(), prefs);
    }

    #[test]
    fn test_update_is_optimistic() {
        let (mut store, _) = PreferencesStore::load(TestBackend::empty());

        // Visible via get() before any persistence round-trip
        let event = store.update(PreferenceUpdate::AutoRefresh(true));
        assert!(store.get().auto_refresh);
        assert_eq!(
            event,
            Event::PreferenceUpdated {
                key: "auto_refresh".to_string()
            }
        );
        assert!(store.is_dirty());
    }

    #[test]
    fn test_update_clamps_refresh_interval() {
        let (mut store, _) = PreferencesStore::load(TestBackend::empty());

        store.update(PreferenceUpdate::RefreshIntervalMs(10));
        assert_eq!(store.get().refresh_interval_ms, 60_000);

        store.update(PreferenceUpdate::RefreshIntervalMs(999_999_999));
        assert_eq!(store.get().refresh_interval_ms, 3_600_000);
    }

    #[test]
    fn test_save_persists_and_clears_dirty() {
        let (mut store, _) = PreferencesStore::load(TestBackend::empty());
        store.update(PreferenceUpdate::Theme(Theme::Dark));
        assert!(store.is_dirty());

        let event = store.save().unwrap();
        assert_eq!(event, Event::PreferencesSaved);
        assert!(!store.is_dirty());
        assert_eq!(
            store.backend.stored.borrow().as_ref().unwrap().theme,
            Theme::Dark
        );
    }

    #[test]
    fn test_failed_save_reverts_optimistic_update() {
        let (mut store, _) = PreferencesStore::load(TestBackend::empty());
        store.update(PreferenceUpdate::AutoRefresh(true));
        store.save().unwrap();

        // Flip another option, then make the backend fail
        store.update(PreferenceUpdate::AutoRefresh(false));
        *store.backend.fail_saves.borrow_mut() = true;

        let result = store.save();
        assert!(result.is_err());

        // In-memory snapshot reverted to the last persisted state
        assert!(store.get().auto_refresh);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_reset_to_defaults() {
        let mut prefs = Preferences::default();
        prefs.auto_refresh = true;
        prefs.refresh_interval_ms = 120_000;
        let (mut store, _) = PreferencesStore::load(TestBackend::with_stored(prefs));

        let events = store.reset_to_defaults().unwrap();
        assert_eq!(events, vec![Event::PreferencesReset, Event::PreferencesSaved]);

        let after = store.get();
        assert!(!after.auto_refresh);
        assert_eq!(after.refresh_interval_ms, 300_000);
    }

    #[test]
    fn test_reset_to_defaults_reverts_on_save_failure() {
        let mut prefs = Preferences::default();
        prefs.auto_refresh = true;
        let (mut store, _) = PreferencesStore::load(TestBackend::with_stored(prefs));
        *store.backend.fail_saves.borrow_mut() = true;

        assert!(store.reset_to_defaults().is_err());
        // Previous snapshot stays in effect
        assert!(store.get().auto_refresh);
    }
}
