use thiserror::Error;

/// Error type for the clinic simulation engine.
///
/// Configuration errors are detected eagerly, before any event is processed.
/// Invariant violations indicate an engine bug; a run that hits one is
/// aborted rather than clamped, since its statistics are no longer valid.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("invariant violation: {0}")]
    Invariant(String),
}

impl SimError {
    /// Check whether this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, SimError::Configuration(_))
    }

    /// Check whether this is an invariant violation.
    pub fn is_invariant(&self) -> bool {
        matches!(self, SimError::Invariant(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimError::Configuration("shift duration must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: shift duration must be positive"
        );
        assert!(err.is_configuration());
        assert!(!err.is_invariant());

        let err = SimError::Invariant("negative waiting time".to_string());
        assert!(err.is_invariant());
    }
}
