//! # Session Error Type
//!
//! Unified error type for design-session operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in LuxScape                               │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  session.compilePrompt()                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Session Operation                                               │  │
//! │  │  Result<T, SessionError>                                         │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Empty design? ──── SessionError::empty_design() ──┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Engine error? ──── CoreError ─────────────── SessionError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  try {                                                                  │
//! │    await session.compilePrompt()                                        │
//! │  } catch (e) {                                                          │
//! │    // e.message = "Select a fixture or add a note before rendering"     │
//! │    // e.code = "EMPTY_DESIGN"                                           │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use luxscape_core::{CoreError, ValidationError};
use serde::Serialize;
use ts_rs::TS;

/// Error returned from design-session operations.
///
/// ## Serialization
/// This is what the frontend receives when an operation fails:
/// ```json
/// {
///   "code": "STAGING_ERROR",
///   "message": "No staging panel is open"
/// }
/// ```
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SessionError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for session responses.
///
/// ## Usage in Frontend
/// ```typescript
/// try {
///   await session.buildQuote(priceList);
/// } catch (e) {
///   switch (e.code) {
///     case 'EMPTY_DESIGN':
///       highlightFixtureBar();
///       break;
///     case 'VALIDATION_ERROR':
///       showForm(e.message);
///       break;
///     default:
///       showError('An error occurred');
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Nothing selected and no notes; rendering or quoting is pointless
    EmptyDesign,

    /// Input validation failed
    ValidationError,

    /// Staging-panel operation failed (no panel open, unknown option)
    StagingError,

    /// Category lookup against the fixture catalog failed
    CatalogError,

    /// Internal error
    Internal,
}

impl SessionError {
    /// Creates a new session error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        SessionError {
            code,
            message: message.into(),
        }
    }

    /// Creates an empty-design error.
    pub fn empty_design() -> Self {
        SessionError::new(
            ErrorCode::EmptyDesign,
            "Select a fixture or add a note before rendering",
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        SessionError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a staging error.
    pub fn staging(message: impl Into<String>) -> Self {
        SessionError::new(ErrorCode::StagingError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        SessionError::new(ErrorCode::Internal, message)
    }
}

/// Converts engine errors to session errors.
impl From<CoreError> for SessionError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CategoryNotInCatalog { kind } => SessionError::new(
                ErrorCode::CatalogError,
                format!("Fixture category not in catalog: {}", kind),
            ),
            CoreError::NoSubOptions { kind } => SessionError::staging(format!(
                "Category {} has no sub-options to configure",
                kind
            )),
            CoreError::StagingClosed => SessionError::staging("No staging panel is open"),
            CoreError::UnknownSubOption { kind, option_id } => SessionError::staging(format!(
                "Unknown sub-option '{}' for category {}",
                option_id, kind
            )),
            CoreError::Validation(e) => SessionError::validation(e.to_string()),
        }
    }
}

/// Converts raw validation errors to session errors.
impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::validation(err.to_string())
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for SessionError {}
