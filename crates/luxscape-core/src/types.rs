//! # Domain Types
//!
//! Core domain types used throughout LuxScape.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │PricingDefinition│   │    LineItem     │   │  QuoteDocument  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  kind           │   │  name           │   │  items          │       │
//! │  │  name           │   │  quantity       │   │  client         │       │
//! │  │  unit_price_cents│  │  unit_price_cents│  │  total_cents    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │   FixtureKind   │   │  ClientDetails  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Up, Path, ...  │   │  name, email    │       │
//! │  │  825 = 8.25%    │   │  Transformer    │   │  phone, address │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `LineItem` freezes the pricing data it was built from. A later price-list
//! edit never rewrites an already-issued quote.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 825 bps = 8.25% (e.g., Texas sales tax)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Fixture Kind
// =============================================================================

/// The closed set of fixture categories the design engine understands.
///
/// ## Why a Closed Enum?
/// Every selection, catalog entry, prompt rule, and price row is keyed by
/// one of these variants. Making the set closed means an unknown category
/// is unrepresentable: matches stay exhaustive and the compiler flags every
/// site that needs attention when a category is added.
///
/// `Transformer` is special: it is never toggled by the designer. Exactly
/// one transformer is attached to any non-empty design when quantities are
/// resolved.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FixtureKind {
    /// Ground-staked accent lights washing walls upward.
    Up,
    /// Low bollard/stake lights along walkways.
    Path,
    /// Fixtures mounted at the gutter line shining up the upper story.
    Gutter,
    /// Recessed downlights in the eave soffits.
    Soffit,
    /// Low-profile pavement and retaining-wall lights.
    Hardscape,
    /// In-grade well lights cored into concrete.
    CoreDrill,
    /// Low-voltage supply for everything above.
    Transformer,
}

impl FixtureKind {
    /// Stable identifier string, matching the serde representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FixtureKind::Up => "up",
            FixtureKind::Path => "path",
            FixtureKind::Gutter => "gutter",
            FixtureKind::Soffit => "soffit",
            FixtureKind::Hardscape => "hardscape",
            FixtureKind::CoreDrill => "core_drill",
            FixtureKind::Transformer => "transformer",
        }
    }

    /// Checks whether this is the transformer pseudo-category.
    #[inline]
    pub const fn is_transformer(&self) -> bool {
        matches!(self, FixtureKind::Transformer)
    }
}

impl fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Pricing Definition
// =============================================================================

/// One row of the price list: what a single fixture of a kind costs.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingDefinition {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Fixture category this row prices.
    pub kind: FixtureKind,

    /// Display name shown on the quote ("LED Up Light").
    pub name: String,

    /// Scope-of-work text carried onto the quote line.
    pub description: String,

    /// Per-unit price in cents (smallest currency unit).
    pub unit_price_cents: i64,
}

impl PricingDefinition {
    /// Creates a pricing row with a fresh UUID.
    pub fn new(kind: FixtureKind, name: &str, description: &str, unit_price_cents: i64) -> Self {
        PricingDefinition {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            name: name.to_string(),
            description: description.to_string(),
            unit_price_cents,
        }
    }

    /// Returns the unit price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A line item on a quote.
/// Uses snapshot pattern to freeze pricing data at time of quoting.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub id: String,
    /// Display name at time of quoting (frozen).
    pub name: String,
    /// Scope-of-work text at time of quoting (frozen).
    pub description: String,
    /// Resolved fixture count. Always at least 1 on an issued quote.
    pub quantity: u32,
    /// Unit price in cents at time of quoting (frozen).
    pub unit_price_cents: i64,
}

impl LineItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total (unit price × quantity) as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Client Details
// =============================================================================

/// Contact block printed on the quote header.
/// Everything except the name is optional at draft time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClientDetails {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

// =============================================================================
// Quote Document
// =============================================================================

/// A reconciled quote: resolved line items plus billing parameters.
///
/// ## Note on `total_cents`
/// The assembler leaves `total_cents` at zero. Totals depend on tax and
/// discount treatment that belongs to the billing layer, which computes
/// them from `items`, `tax_rate_bps`, and `discount_cents`. A non-zero
/// value here would be a second source of truth.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteDocument {
    pub id: String,
    pub items: Vec<LineItem>,
    /// Tax rate in basis points (825 = 8.25%).
    pub tax_rate_bps: u32,
    /// Flat discount in cents, subtracted before tax.
    pub discount_cents: i64,
    pub client: ClientDetails,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    /// Placeholder, always 0. See note above.
    pub total_cents: i64,
}

impl QuoteDocument {
    /// Returns the tax rate.
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Returns the flat discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    /// Sums the line totals of every item on the quote.
    pub fn subtotal(&self) -> Money {
        let mut subtotal = Money::zero();
        for item in &self.items {
            subtotal += item.line_total();
        }
        subtotal
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
