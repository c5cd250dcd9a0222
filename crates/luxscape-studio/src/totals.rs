//! # Quote Totals
//!
//! Display math for a quote document.
//!
//! ## Why Here and Not in the Engine?
//! The engine leaves `total_cents` at zero: billing policy (tax treatment,
//! discount application) is presentation-side and subject to change without
//! touching the pure core. This module is that policy's single home. If a
//! backend ever re-prices a quote, it recomputes from the line items with
//! this same math.
//!
//! ## The Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal   = Σ line_total(item)        (quantity × unit price)        │
//! │  taxable    = max(subtotal - discount, 0)                              │
//! │  tax        = taxable × rate            (half-up rounding, in cents)   │
//! │  grand      = taxable + tax                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ts_rs::TS;

use luxscape_core::money::Money;
use luxscape_core::types::QuoteDocument;

/// Quote totals summary for display.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTotals {
    /// Number of quote lines
    pub item_count: usize,

    /// Total fixture count across all lines
    pub fixture_count: u32,

    /// Sum of line totals, before discount and tax
    pub subtotal_cents: i64,

    /// Flat discount applied before tax
    pub discount_cents: i64,

    /// Tax on the discounted amount
    pub tax_cents: i64,

    /// What the client pays
    pub grand_total_cents: i64,
}

impl From<&QuoteDocument> for QuoteTotals {
    fn from(doc: &QuoteDocument) -> Self {
        let subtotal = doc.subtotal().cents();
        // Discount is capped at the subtotal; a quote never goes negative.
        let taxable = (subtotal - doc.discount_cents).max(0);
        let tax = Money::from_cents(taxable).calculate_tax(doc.tax_rate()).cents();

        QuoteTotals {
            item_count: doc.items.len(),
            fixture_count: doc.items.iter().map(|i| i.quantity).sum(),
            subtotal_cents: subtotal,
            discount_cents: doc.discount_cents,
            tax_cents: tax,
            grand_total_cents: taxable + tax,
        }
    }
}
