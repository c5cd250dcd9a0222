//! # Quantity Resolver
//!
//! Produces a fixture quantity for every row of the externally supplied
//! price list, so the quote assembler can price the design.
//!
//! ## Resolution Tiers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Per pricing row, evaluated strictly in order:                          │
//! │                                                                         │
//! │  Tier 0  transformer row     1 if anything is selected, else 0.        │
//! │          │                   Ignores every other tier.                  │
//! │          ▼                                                              │
//! │  Tier 1  explicit text       "10 up lights" in the notes. ONE match    │
//! │          │                   anywhere puts the WHOLE pass in strict    │
//! │          │                   mode: matched rows get their integer,     │
//! │          │                   every other ordinary row gets 0.          │
//! │          ▼                                                              │
//! │  Tier 2  sub-option sums     selected category: sum the estimate       │
//! │          │                   counts of its chosen sub-options.         │
//! │          ▼                                                              │
//! │  Tier 3  toggle default      selected category with nothing chosen:    │
//! │                              flat per-category default count.          │
//! │                                                                         │
//! │  Final filter: rows at quantity 0 never reach the assembler.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Strict-Mode Switch Is Global
//! A single tier-1 match anywhere in the notes disables estimation for
//! EVERY row, including categories the user toggled on but did not mention.
//! "10 up lights" with path toggled on yields up=10 and path absent. This
//! coupling is deliberate and preserved; the customer's written counts are
//! treated as the complete word on quantities.
//!
//! ## Construction
//! [`QuantityResolver::for_catalog`] compiles one keyword pattern per
//! category (keywords escaped, longest first, case insensitive) and copies
//! the estimate tables out of the catalog. The resolver is immutable after
//! that and reusable across any number of passes.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::FixtureCatalog;
use crate::selection::SelectionState;
use crate::types::{FixtureKind, PricingDefinition};

// =============================================================================
// Resolution Tier
// =============================================================================

/// Which strategy produced a resolved quantity. Carried on every line for
/// display and debugging ("where did this number come from?").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionTier {
    /// Tier 0: the transformer presence rule.
    Transformer,
    /// Tier 1: an integer extracted from the customer notes.
    ExplicitText,
    /// Tier 2: summed estimate counts of the chosen sub-options.
    SubOptionEstimate,
    /// Tier 3: the flat per-category default count.
    ToggleDefault,
}

// =============================================================================
// Resolved Line
// =============================================================================

/// One surviving (pricing row, quantity) pair. Quantity is always ≥ 1;
/// zero-quantity rows are filtered before this type is built.
#[derive(Debug, Clone)]
pub struct ResolvedLine<'a> {
    pub definition: &'a PricingDefinition,
    pub quantity: u32,
    pub tier: ResolutionTier,
}

// =============================================================================
// Quantity Resolver
// =============================================================================

/// Per-category extraction pattern and estimate tables, copied out of the
/// catalog at construction.
#[derive(Debug)]
struct CategoryEstimator {
    kind: FixtureKind,
    /// `None` when the category defines no keywords.
    pattern: Option<Regex>,
    default_count: u32,
    option_counts: BTreeMap<String, u32>,
}

impl CategoryEstimator {
    /// First parseable "<integer> <keyword>" occurrence in the notes.
    /// A matched integer too large for `u32` is treated as no match.
    fn extract(&self, notes: &str) -> Option<u32> {
        let pattern = self.pattern.as_ref()?;
        pattern
            .captures_iter(notes)
            .find_map(|caps| caps[1].parse::<u32>().ok())
    }

    /// Tier 2/3 estimate for a selected category. A configured category
    /// whose chosen options contribute nothing falls back to the flat
    /// default, so a selected category never silently estimates to zero.
    fn estimate(&self, state: &SelectionState) -> (u32, ResolutionTier) {
        if let Some(ids) = state.chosen(self.kind) {
            let sum: u32 = ids
                .iter()
                .filter_map(|id| self.option_counts.get(id))
                .sum();
            if sum > 0 {
                return (sum, ResolutionTier::SubOptionEstimate);
            }
        }
        (self.default_count, ResolutionTier::ToggleDefault)
    }
}

/// Resolves quantities for a price list against a selection snapshot and
/// the customer notes.
#[derive(Debug)]
pub struct QuantityResolver {
    estimators: Vec<CategoryEstimator>,
}

impl QuantityResolver {
    /// Builds a resolver for one catalog, compiling the keyword patterns
    /// once. Keywords are regex-escaped and tried longest first so
    /// "up lights" wins over "up".
    pub fn for_catalog(catalog: &FixtureCatalog) -> Self {
        let estimators = catalog
            .categories()
            .iter()
            .map(|category| {
                let pattern = if category.keywords.is_empty() {
                    None
                } else {
                    let mut keywords: Vec<&str> =
                        category.keywords.iter().map(String::as_str).collect();
                    keywords.sort_by(|a, b| b.len().cmp(&a.len()));

                    let alternation = keywords
                        .iter()
                        .map(|k| regex::escape(k))
                        .collect::<Vec<_>>()
                        .join("|");
                    let source = format!(r"(?i)\b(\d+)\s*(?:{alternation})\b");
                    // Escaped keywords always form a valid pattern.
                    Some(Regex::new(&source).expect("keyword pattern failed to compile"))
                };

                let option_counts = category
                    .sub_options
                    .iter()
                    .map(|opt| (opt.id.clone(), opt.estimate_count))
                    .collect();

                CategoryEstimator {
                    kind: category.kind,
                    pattern,
                    default_count: category.default_count,
                    option_counts,
                }
            })
            .collect();

        QuantityResolver { estimators }
    }

    /// Runs one resolution pass over the price list. Rows resolving to 0
    /// are dropped here; every returned line carries a positive quantity
    /// and the tier that produced it.
    pub fn resolve<'a>(
        &self,
        state: &SelectionState,
        notes: &str,
        pricing: &'a [PricingDefinition],
    ) -> Vec<ResolvedLine<'a>> {
        // One match anywhere flips the whole pass into strict text mode.
        let strict = self
            .estimators
            .iter()
            .any(|est| est.extract(notes).is_some());

        let mut lines = Vec::with_capacity(pricing.len());
        for row in pricing {
            let (quantity, tier) = if row.kind.is_transformer() {
                let qty = if state.is_empty() { 0 } else { 1 };
                (qty, ResolutionTier::Transformer)
            } else if strict {
                let qty = self
                    .estimator(row.kind)
                    .and_then(|est| est.extract(notes))
                    .unwrap_or(0);
                (qty, ResolutionTier::ExplicitText)
            } else if state.is_selected(row.kind) {
                match self.estimator(row.kind) {
                    Some(est) => est.estimate(state),
                    // Row keyed to a kind this catalog does not carry.
                    None => (0, ResolutionTier::ToggleDefault),
                }
            } else {
                (0, ResolutionTier::ToggleDefault)
            };

            if quantity > 0 {
                lines.push(ResolvedLine {
                    definition: row,
                    quantity,
                    tier,
                });
            }
        }
        lines
    }

    fn estimator(&self, kind: FixtureKind) -> Option<&CategoryEstimator> {
        self.estimators.iter().find(|est| est.kind == kind)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
