use std::error::Error;

/// Base trait for all application errors
pub trait VulnScopeError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the application
pub type VulnScopeResult<T> = Result<T, Box<dyn VulnScopeError>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::errors::PersistenceError;

    #[test]
    fn test_vulnscope_result() {
        let _result: VulnScopeResult<i32> = Ok(42);
    }

    #[test]
    fn test_errors_are_boxable() {
        let error = PersistenceError::BaseDirUnavailable;
        let boxed: Box<dyn VulnScopeError> = Box::new(error);
        assert_eq!(boxed.error_code(), "PREFERENCES_BASE_DIR_UNAVAILABLE");
    }
}
