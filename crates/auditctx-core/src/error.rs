//! Error types for registry operations.

use thiserror::Error;

/// Errors surfaced by the execution-scoped registry.
///
/// All variants indicate integration bugs rather than transient conditions;
/// they are returned to the caller immediately, with no retry or local
/// recovery. The date and timestamp accessors never return these: they
/// degrade to the system clock by contract.
#[derive(Error, Debug)]
pub enum ContextError {
    /// No audit context is installed for the current execution at all.
    ///
    /// An accessor was used outside an installed scope; a lifecycle error
    /// in the calling code.
    #[error("no audit context installed on the current execution (wanted {wanted})")]
    NotFound { wanted: String },

    /// A context is installed but the requested field has neither a direct
    /// value nor a provider.
    ///
    /// The integration code set up the context incompletely.
    #[error("installed audit context has no {wanted}, neither value nor provider")]
    NoValue { wanted: String },

    /// Store substitution attempted while the registry is locked.
    ///
    /// Substitution is a one-shot startup customization; call `unlock()`
    /// first, deliberately.
    #[error("context store configuration is locked; unlock() before substituting")]
    Locked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_the_wanted_field() {
        let err = ContextError::NotFound { wanted: "user".into() };
        assert_eq!(
            err.to_string(),
            "no audit context installed on the current execution (wanted user)"
        );
    }

    #[test]
    fn test_no_value_names_the_wanted_field() {
        let err = ContextError::NoValue { wanted: "value 'foo'".into() };
        assert_eq!(
            err.to_string(),
            "installed audit context has no value 'foo', neither value nor provider"
        );
    }

    #[test]
    fn test_locked_message() {
        assert_eq!(
            ContextError::Locked.to_string(),
            "context store configuration is locked; unlock() before substituting"
        );
    }
}
