//! # Quote Assembler
//!
//! Maps resolved (pricing row, quantity) pairs onto a [`QuoteDocument`].
//!
//! The assembler copies name, description, and unit price out of each
//! pricing row so the quote is a frozen snapshot: later price-list edits
//! never rewrite an issued quote. Tax, discount, and the grand total are
//! NOT computed here; `total_cents` is written as 0 and the display layer
//! recomputes totals from the items and billing parameters.

use chrono::Utc;
use uuid::Uuid;

use crate::resolver::ResolvedLine;
use crate::types::{ClientDetails, LineItem, QuoteDocument, TaxRate};

/// Assembles the final quote from surviving resolved lines.
///
/// The resolver has already dropped zero-quantity rows; the filter here
/// keeps the document invariant local, so no caller can hand-build a line
/// list that smuggles a zero through.
pub fn assemble_quote(
    resolved: &[ResolvedLine<'_>],
    client: ClientDetails,
    tax_rate: TaxRate,
    discount_cents: i64,
) -> QuoteDocument {
    let items = resolved
        .iter()
        .filter(|line| line.quantity > 0)
        .map(|line| LineItem {
            id: Uuid::new_v4().to_string(),
            name: line.definition.name.clone(),
            description: line.definition.description.clone(),
            quantity: line.quantity,
            unit_price_cents: line.definition.unit_price_cents,
        })
        .collect();

    QuoteDocument {
        id: Uuid::new_v4().to_string(),
        items,
        tax_rate_bps: tax_rate.bps(),
        discount_cents,
        client,
        created_at: Utc::now(),
        total_cents: 0,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FixtureCatalog;
    use crate::money::Money;
    use crate::resolver::{QuantityResolver, ResolutionTier};
    use crate::selection::SelectionEditor;
    use crate::types::{FixtureKind, PricingDefinition};

    fn price_list() -> Vec<PricingDefinition> {
        vec![
            PricingDefinition::new(
                FixtureKind::Up,
                "LED Up Light",
                "Brass ground-stake uplight, installed and aimed",
                8500,
            ),
            PricingDefinition::new(
                FixtureKind::Gutter,
                "LED Gutter Light",
                "Gutter-mounted uplight with mounting bracket",
                9500,
            ),
            PricingDefinition::new(
                FixtureKind::Transformer,
                "Low-Voltage Transformer",
                "300W stainless transformer with photocell and timer",
                40000,
            ),
        ]
    }

    fn client() -> ClientDetails {
        ClientDetails {
            name: "Dana Whitfield".to_string(),
            email: Some("dana@example.com".to_string()),
            phone: None,
            address: Some("18 Crestline Dr".to_string()),
        }
    }

    #[test]
    fn test_line_items_snapshot_pricing_rows() {
        let pricing = price_list();
        let resolved = vec![
            ResolvedLine {
                definition: &pricing[0],
                quantity: 6,
                tier: ResolutionTier::ToggleDefault,
            },
            ResolvedLine {
                definition: &pricing[2],
                quantity: 1,
                tier: ResolutionTier::Transformer,
            },
        ];

        let quote = assemble_quote(&resolved, client(), TaxRate::from_bps(825), 0);

        assert_eq!(quote.items.len(), 2);
        let up = &quote.items[0];
        assert_eq!(up.name, "LED Up Light");
        assert_eq!(up.description, "Brass ground-stake uplight, installed and aimed");
        assert_eq!(up.quantity, 6);
        assert_eq!(up.unit_price_cents, 8500);
        assert_eq!(up.line_total(), Money::from_cents(51000));

        // Fresh ids per item, distinct from the quote id.
        assert_ne!(quote.items[0].id, quote.items[1].id);
        assert_ne!(quote.items[0].id, quote.id);
    }

    #[test]
    fn test_total_left_as_placeholder() {
        let pricing = price_list();
        let resolved = vec![ResolvedLine {
            definition: &pricing[0],
            quantity: 4,
            tier: ResolutionTier::ExplicitText,
        }];

        let quote = assemble_quote(&resolved, client(), TaxRate::from_bps(825), 2500);
        assert_eq!(quote.total_cents, 0);
        assert!(quote.subtotal().is_positive());
    }

    #[test]
    fn test_billing_parameters_carried_verbatim() {
        let quote = assemble_quote(&[], client(), TaxRate::from_bps(700), 1500);
        assert_eq!(quote.tax_rate_bps, 700);
        assert_eq!(quote.discount_cents, 1500);
        assert_eq!(quote.client.name, "Dana Whitfield");
        assert!(quote.items.is_empty());
    }

    #[test]
    fn test_zero_quantity_lines_never_become_items() {
        let pricing = price_list();
        let resolved = vec![
            ResolvedLine {
                definition: &pricing[0],
                quantity: 0,
                tier: ResolutionTier::ExplicitText,
            },
            ResolvedLine {
                definition: &pricing[1],
                quantity: 3,
                tier: ResolutionTier::SubOptionEstimate,
            },
        ];

        let quote = assemble_quote(&resolved, client(), TaxRate::zero(), 0);
        assert_eq!(quote.items.len(), 1);
        assert_eq!(quote.items[0].name, "LED Gutter Light");
        assert!(quote.items.iter().all(|item| item.quantity > 0));
    }

    #[test]
    fn test_end_to_end_resolution_to_quote() {
        let catalog = FixtureCatalog::standard();
        let resolver = QuantityResolver::for_catalog(&catalog);
        let pricing = price_list();

        let mut editor = SelectionEditor::new();
        editor.toggle_category(&catalog, FixtureKind::Up).unwrap();
        editor.confirm_staging().unwrap();
        editor.begin_configure(&catalog, FixtureKind::Gutter).unwrap();
        editor.toggle_staged_option(&catalog, "dormers").unwrap();
        editor.confirm_staging().unwrap();

        let resolved = resolver.resolve(editor.state(), "", &pricing);
        let quote = assemble_quote(&resolved, client(), TaxRate::from_bps(825), 0);

        // Items follow price-list order: up, gutter, transformer.
        let names: Vec<&str> = quote.items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["LED Up Light", "LED Gutter Light", "Low-Voltage Transformer"]
        );
        assert_eq!(quote.items[0].quantity, 6);
        assert_eq!(quote.items[1].quantity, 3);
        assert_eq!(quote.items[2].quantity, 1);
    }
}
