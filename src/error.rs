//! Error types for the Shift Compliance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while registering agreements,
//! evaluating shifts, or authorizing overrides.
//!
//! A [`ComplianceVerdict`](crate::models::ComplianceVerdict) carrying violations
//! is not an error: it is returned in the `Ok` channel and callers inspect
//! `is_blocking()` explicitly.

use thiserror::Error;

use crate::models::ViolationKind;

/// The main error type for the Shift Compliance Engine.
///
/// Every variant is a deterministic function of the input, so none of them
/// is worth retrying: the caller must fix the agreement code, the shift
/// window, or the override request.
///
/// # Example
///
/// ```
/// use shift_compliance::error::EngineError;
///
/// let error = EngineError::UnknownAgreement {
///     code: "SUVICO".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown labor agreement: SUVICO");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The agreement code is not registered, or the agreement is inactive.
    #[error("Unknown labor agreement: {code}")]
    UnknownAgreement {
        /// The agreement code that was looked up.
        code: String,
    },

    /// An agreement record failed validation.
    #[error("Invalid labor agreement '{code}': {message}")]
    InvalidAgreement {
        /// The code of the offending agreement.
        code: String,
        /// A description of what made the agreement invalid.
        message: String,
    },

    /// A proposed shift or ledger entry has a malformed time range.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift or ledger entry.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// An override was requested for a violation that can never be overridden.
    #[error("Violation '{kind}' cannot be overridden")]
    NonOverridableViolation {
        /// The violation kind the override targeted.
        kind: ViolationKind,
    },

    /// An override request is missing required attribution.
    #[error("Invalid override field '{field}': {message}")]
    InvalidOverride {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
