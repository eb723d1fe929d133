use crate::errors::VulnScopeError;

/// Errors from the preferences persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Could not determine a base directory for preferences storage")]
    BaseDirUnavailable,

    #[error("Failed to serialize preferences: {message}")]
    Serialize { message: String },

    #[error("Failed to parse preferences document: {message}")]
    Deserialize { message: String },

    #[error("IO error accessing preferences storage: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl VulnScopeError for PersistenceError {
    fn error_code(&self) -> &'static str {
        match self {
            PersistenceError::BaseDirUnavailable => "PREFERENCES_BASE_DIR_UNAVAILABLE",
            PersistenceError::Serialize { .. } => "PREFERENCES_SERIALIZE_ERROR",
            PersistenceError::Deserialize { .. } => "PREFERENCES_PARSE_ERROR",
            PersistenceError::Io { .. } => "PREFERENCES_IO_ERROR",
        }
    }
}

/// Errors from preference validation and store operations.
#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("Invalid value for '{option}': {message}")]
    InvalidValue { option: String, message: String },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl VulnScopeError for PreferencesError {
    fn error_code(&self) -> &'static str {
        match self {
            PreferencesError::InvalidValue { .. } => "PREFERENCES_INVALID_VALUE",
            PreferencesError::Persistence(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, PreferencesError::InvalidValue { .. })
    }
}
