//! Error types for the notation codec
//!
//! Decoding is expected to fail on user-supplied strings, so the public
//! `decode` entry points return `Option`. These errors carry the reason for
//! callers that want it (`try_decode`) and for debug logging.

/// Reasons a notation string was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    /// String does not start with the `PN:v` prefix
    #[error("notation must start with 'PN:v'")]
    MissingPrefix,

    /// Version segment is not a positive decimal integer
    #[error("invalid notation version: '{0}'")]
    InvalidVersion(String),

    /// The plate type segment is absent
    #[error("notation is missing the plate type segment")]
    MissingSegment,

    /// Plate type is not one of the supported well counts
    #[error("unsupported plate type: {0}")]
    UnsupportedPlateType(#[from] PlateTypeError),

    /// A well entry has no `:` between well id and fields
    #[error("malformed well entry (missing ':'): '{0}'")]
    MalformedEntry(String),
}

/// Invalid plate type value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlateTypeError {
    /// Value is a number but not an allowed well count
    #[error("{0} is not a supported well count (expected 6, 12, 24, 48, 96 or 384)")]
    UnsupportedCount(u32),

    /// Value is not a decimal number at all
    #[error("'{0}' is not a well count")]
    NotANumber(String),
}

/// Result alias for notation operations
pub type NotationResult<T> = Result<T, NotationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plate_type_error_display() {
        let err = PlateTypeError::UnsupportedCount(7);
        assert_eq!(
            err.to_string(),
            "7 is not a supported well count (expected 6, 12, 24, 48, 96 or 384)"
        );
    }

    #[test]
    fn plate_type_error_converts() {
        let err: NotationError = PlateTypeError::NotANumber("abc".to_string()).into();
        assert!(matches!(err, NotationError::UnsupportedPlateType(_)));
    }

    #[test]
    fn malformed_entry_display() {
        let err = NotationError::MalformedEntry("A1x".to_string());
        assert!(err.to_string().contains("A1x"));
    }
}
