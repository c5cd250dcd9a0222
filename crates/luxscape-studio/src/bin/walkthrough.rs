//! # Design Walkthrough
//!
//! Runs one complete design pass from the terminal: select fixtures,
//! configure sub-options, add a customer note, then print the compiled
//! scene prompt and the assembled quote.
//!
//! ## Usage
//! ```bash
//! # Run the walkthrough
//! cargo run -p luxscape-studio --bin walkthrough
//!
//! # With debug tracing from the session layer
//! RUST_LOG=luxscape=debug cargo run -p luxscape-studio --bin walkthrough
//! ```
//!
//! ## The Scenario
//! A two-story brick house:
//! - Up lights on the first-story window sections
//! - Gutter lights washing the upper story
//! - Path lights along the front walk
//! - Customer asks for 10 up lights in the notes (overrides the estimate)

use luxscape_core::types::{ClientDetails, FixtureKind, PricingDefinition};
use luxscape_studio::{DesignSession, QuoteTotals};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Sample price list, one row per quotable kind.
fn price_list() -> Vec<PricingDefinition> {
    vec![
        PricingDefinition::new(
            FixtureKind::Up,
            "LED Up Light",
            "Solid brass, 2700K, ground stake",
            8500,
        ),
        PricingDefinition::new(
            FixtureKind::Path,
            "LED Path Light",
            "12in bollard, 2700K",
            9500,
        ),
        PricingDefinition::new(
            FixtureKind::Gutter,
            "LED Gutter Light",
            "Clip mount, 2700K, upper-story wash",
            7800,
        ),
        PricingDefinition::new(
            FixtureKind::Soffit,
            "LED Soffit Light",
            "Recessed eave downlight",
            11000,
        ),
        PricingDefinition::new(
            FixtureKind::Hardscape,
            "LED Hardscape Light",
            "Under-cap strip, 2700K",
            12500,
        ),
        PricingDefinition::new(
            FixtureKind::CoreDrill,
            "Core-Drilled Well Light",
            "In-grade, drilled into concrete",
            19500,
        ),
        PricingDefinition::new(
            FixtureKind::Transformer,
            "Low-Voltage Transformer",
            "300W stainless, photocell + timer",
            38000,
        ),
    ]
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,luxscape=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let session = DesignSession::standard();

    // Build the design
    println!("Building design...");
    session.toggle_fixture(FixtureKind::Up)?;
    session.toggle_option("windows")?;
    session.confirm_options()?;
    session.toggle_fixture(FixtureKind::Gutter)?;
    session.confirm_options()?;
    session.toggle_fixture(FixtureKind::Path)?;
    session.set_notes("10 up lights please, and keep everything warm, no cool white")?;

    let snapshot = session.snapshot();
    println!(
        "✓ {} categories selected, notes: {:?}",
        snapshot.state.selected_count(),
        snapshot.notes
    );

    // Compile the scene prompt
    println!();
    println!("Compiling scene prompt...");
    let prompt = session.compile_prompt()?;
    println!("✓ {} blocks", prompt.blocks().len());
    println!();
    println!("────────────────────────────────────────────────────────────");
    println!("{}", prompt.render());
    println!("────────────────────────────────────────────────────────────");

    // Assemble the quote: 8.25% tax, $150 off
    println!();
    println!("Assembling quote...");
    let pricing = price_list();
    let client = ClientDetails {
        name: "Dana Whitfield".to_string(),
        email: Some("dana@example.com".to_string()),
        ..ClientDetails::default()
    };
    let quote = session.build_quote(&pricing, client, 825, 15000)?;

    println!("✓ Quote {} for {}", quote.id, quote.client.name);
    println!();
    for item in &quote.items {
        println!(
            "  {:<28} x{:<3} @ {}  = {}",
            item.name,
            item.quantity,
            item.unit_price(),
            item.line_total()
        );
    }

    let totals = QuoteTotals::from(&quote);
    println!();
    println!("  Subtotal:  ${:>9.2}", totals.subtotal_cents as f64 / 100.0);
    println!("  Discount: -${:>9.2}", totals.discount_cents as f64 / 100.0);
    println!("  Tax:       ${:>9.2}", totals.tax_cents as f64 / 100.0);
    println!("  Total:     ${:>9.2}", totals.grand_total_cents as f64 / 100.0);

    println!();
    println!("✓ Walkthrough complete!");

    Ok(())
}
