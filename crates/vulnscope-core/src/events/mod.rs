use serde::{Deserialize, Serialize};

/// All preference state changes that can result from a store operation.
///
/// Each variant describes _what happened_, not what should happen. Only
/// successful state changes produce events — failures use the `Result`
/// error channel (`Err(PersistenceError)`), not the event stream.
///
/// Events use owned types so they can be serialized, stored, and sent
/// across boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// The preferences snapshot was loaded at session start.
    /// `from_disk` is false when no persisted document existed and the
    /// documented defaults were used instead.
    PreferencesLoaded { from_disk: bool },
    /// A single option was changed in the in-memory snapshot (optimistic,
    /// not yet persisted).
    PreferenceUpdated { key: String },
    /// The full in-memory snapshot was persisted.
    PreferencesSaved,
    /// The snapshot was replaced with the documented defaults.
    PreferencesReset,
}
