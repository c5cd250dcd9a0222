//! # Error Types
//!
//! Domain-specific error types for luxscape-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  luxscape-core errors (this file)                                       │
//! │  ├── CoreError        - Design-engine misuse (staging, catalog keys)   │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  luxscape-studio errors (separate crate)                               │
//! │  └── SessionError     - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SessionError → Frontend           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (category, option id, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message
//!
//! The compiler and resolver never return these: they are total over their
//! input domain. Errors come from the selection editor (illegal transitions)
//! and from input validation.

use thiserror::Error;

use crate::types::FixtureKind;

// =============================================================================
// Core Error
// =============================================================================

/// Design-engine errors.
///
/// These represent illegal uses of the selection editor or rejected input,
/// never internal failures. They should be caught and translated to
/// user-facing messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The catalog carries no category for this fixture kind.
    ///
    /// ## When This Occurs
    /// - Toggling a kind the injected catalog does not define
    /// - Toggling `Transformer`, which is a pricing row, not a category
    #[error("Fixture category not in catalog: {kind}")]
    CategoryNotInCatalog { kind: FixtureKind },

    /// A configuration surface was requested for a category without
    /// sub-options.
    #[error("Category {kind} has no sub-options to configure")]
    NoSubOptions { kind: FixtureKind },

    /// A staging operation arrived while no staging panel was open.
    ///
    /// ## When This Occurs
    /// - Confirm/cancel after the panel was already confirmed
    /// - A sub-option toggle raced the panel being closed
    #[error("No staging panel is open")]
    StagingClosed,

    /// A sub-option id the staged category does not define.
    #[error("Unknown sub-option '{option_id}' for category {kind}")]
    UnknownSubOption { kind: FixtureKind, option_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before the engine runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownSubOption {
            kind: FixtureKind::Up,
            option_id: "chimneys".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown sub-option 'chimneys' for category up"
        );

        let err = CoreError::CategoryNotInCatalog {
            kind: FixtureKind::Transformer,
        };
        assert_eq!(
            err.to_string(),
            "Fixture category not in catalog: transformer"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "client name".to_string(),
        };
        assert_eq!(err.to_string(), "client name is required");

        let err = ValidationError::TooLong {
            field: "notes".to_string(),
            max: 2000,
        };
        assert_eq!(err.to_string(), "notes must be at most 2000 characters");

        let err = ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        };
        assert_eq!(err.to_string(), "tax_rate must be between 0 and 10000");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "notes".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
