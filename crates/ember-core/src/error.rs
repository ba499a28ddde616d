//! # EMBER Error Handling
//!
//! Error types for the fault subsystem.
//!
//! Nothing in the fault path itself is allowed to fail fatally - decode
//! problems degrade to generic reports. Errors here cover the setup
//! surface (table validation, registration) and the diagnostics sink.

use core::fmt;

// =============================================================================
// RESULT TYPE
// =============================================================================

/// EMBER Result type alias
pub type Result<T> = core::result::Result<T, Error>;

// =============================================================================
// ERROR ENUM
// =============================================================================

/// EMBER unified error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    // =========================================================================
    // Table Validation Errors
    // =========================================================================
    /// Two fault descriptors claim the same interrupt signature
    DuplicateSignature,
    /// An interrupt description exceeds its 12-character slot
    DescriptionTooLong,
    /// Client ids are not contiguous from zero
    SparseClientTable,

    // =========================================================================
    // Setup Errors
    // =========================================================================
    /// A generation backend is already installed
    AlreadyRegistered,
    /// No generation backend has been installed yet
    NotRegistered,

    // =========================================================================
    // Diagnostics Errors
    // =========================================================================
    /// Writing into the diagnostics sink failed
    DiagnosticsFormat,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSignature => write!(f, "duplicate fault signature in table"),
            Self::DescriptionTooLong => write!(f, "interrupt description too long"),
            Self::SparseClientTable => write!(f, "client ids not contiguous"),
            Self::AlreadyRegistered => write!(f, "generation backend already installed"),
            Self::NotRegistered => write!(f, "no generation backend installed"),
            Self::DiagnosticsFormat => write!(f, "diagnostics sink write failed"),
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(_: fmt::Error) -> Self {
        Error::DiagnosticsFormat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        use alloc::string::ToString;

        assert_eq!(
            Error::DuplicateSignature.to_string(),
            "duplicate fault signature in table"
        );
        assert_eq!(
            Error::NotRegistered.to_string(),
            "no generation backend installed"
        );
    }

    #[test]
    fn test_fmt_error_conversion() {
        let err: Error = core::fmt::Error.into();
        assert_eq!(err, Error::DiagnosticsFormat);
    }
}
