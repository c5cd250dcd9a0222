//! # Validation Module
//!
//! Input validation utilities for LuxScape.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Session layer (Rust)                                         │
//! │  └── THIS MODULE: business rule validation before the engine runs      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine (pure)                                                │
//! │  └── Total over validated input; never validates again                 │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use luxscape_core::validation::{validate_notes, validate_tax_rate_bps};
//!
//! let notes = validate_notes("  10 up lights, warm tone  ").unwrap();
//! assert_eq!(notes, "10 up lights, warm tone");
//!
//! validate_tax_rate_bps(825).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::PricingDefinition;
use crate::{MAX_NOTES_LEN, MAX_PRICING_ROWS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates the customer notes field.
///
/// ## Rules
/// - Can be empty (notes are advisory)
/// - Maximum MAX_NOTES_LEN characters after trimming
///
/// ## Returns
/// The trimmed notes string, which is what the compiler and resolver
/// should be handed.
pub fn validate_notes(notes: &str) -> ValidationResult<String> {
    let notes = notes.trim();

    if notes.len() > MAX_NOTES_LEN {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_NOTES_LEN,
        });
    }

    Ok(notes.to_string())
}

/// Validates a client name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 120 characters
pub fn validate_client_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "client name".to_string(),
        });
    }

    if name.len() > 120 {
        return Err(ValidationError::TooLong {
            field: "client name".to_string(),
            max: 120,
        });
    }

    Ok(())
}

// =============================================================================
// Pricing Validators
// =============================================================================

/// Validates one price-list row.
///
/// ## Rules
/// - Name must not be empty, at most 200 characters
/// - Unit price must be non-negative (zero is allowed for included items)
pub fn validate_pricing_definition(row: &PricingDefinition) -> ValidationResult<()> {
    let name = row.name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "pricing name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "pricing name".to_string(),
            max: 200,
        });
    }

    if row.unit_price_cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "unit price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a full price list: every row, plus a size cap.
pub fn validate_price_list(rows: &[PricingDefinition]) -> ValidationResult<()> {
    if rows.len() > MAX_PRICING_ROWS {
        return Err(ValidationError::OutOfRange {
            field: "price list rows".to_string(),
            min: 0,
            max: MAX_PRICING_ROWS as i64,
        });
    }

    for row in rows {
        validate_pricing_definition(row)?;
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
/// - Most rates are 0-2500 (0% to 25%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

/// Validates a flat discount in cents.
///
/// ## Rules
/// - Must be non-negative (zero means no discount)
pub fn validate_discount_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
