//! # Design Session
//!
//! Manages the state of one design-in-progress.
//!
//! ## Thread Safety
//! The session state is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple UI commands may access/modify the design concurrently
//! 2. Only one command should modify the design at a time
//! 3. Compile and quote must see a consistent selection plus notes pair
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Design Session Operations                            │
//! │                                                                         │
//! │  Frontend Action          Session Call            State Change          │
//! │  ───────────────          ────────────            ────────────          │
//! │                                                                         │
//! │  Click fixture chip ─────► toggle_fixture() ────► on / off / staging    │
//! │                                                                         │
//! │  Click option pill ──────► toggle_option() ─────► pending set edited    │
//! │                                                                         │
//! │  Click Confirm ──────────► confirm_options() ───► committed, selected   │
//! │                                                                         │
//! │  Click Cancel ───────────► cancel_options() ────► staging discarded     │
//! │                                                                         │
//! │  Type in notes box ──────► set_notes() ─────────► notes replaced        │
//! │                                                                         │
//! │  Click Render ───────────► compile_prompt() ────► (read only)           │
//! │                                                                         │
//! │  Click Quote ────────────► build_quote() ───────► (read only)           │
//! │                                                                         │
//! │  NOTE: All write operations acquire the Mutex lock exclusively.         │
//! │        Read operations also acquire the lock but release it quickly.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use luxscape_core::catalog::FixtureCatalog;
use luxscape_core::compiler::{compile_scene_prompt, ScenePrompt};
use luxscape_core::quote::assemble_quote;
use luxscape_core::resolver::QuantityResolver;
use luxscape_core::selection::{SelectionEditor, SelectionState, StagingSelection, ToggleOutcome};
use luxscape_core::types::{ClientDetails, FixtureKind, PricingDefinition, QuoteDocument, TaxRate};
use luxscape_core::validation::{
    validate_client_name, validate_discount_cents, validate_notes, validate_price_list,
    validate_tax_rate_bps,
};

use crate::error::SessionError;

/// A point-in-time copy of the design for UI hydration.
///
/// ## Design Notes
/// The snapshot is a value, not a view: the caller can hold it as long as
/// it likes without pinning the session lock. Staging rides along so the
/// frontend can re-open a half-edited panel after a reload.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DesignSnapshot {
    /// Committed selection
    pub state: SelectionState,

    /// Open staging panel, if any
    pub staging: Option<StagingSelection>,

    /// Current customer notes (already trimmed)
    pub notes: String,
}

/// Mutable session state behind the lock.
#[derive(Debug, Default)]
struct SessionInner {
    editor: SelectionEditor,
    notes: String,
}

/// Shared handle to one design session.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<SessionInner>>` because:
/// - `Arc`: Allows shared ownership across threads
/// - `Mutex`: Ensures only one thread modifies the design at a time
///
/// Clones share the same underlying design. The catalog and the compiled
/// resolver never change after construction, so they sit outside the lock.
///
/// ## Why Not RwLock?
/// Session operations are typically quick, and most operations modify state.
/// A RwLock would add complexity with minimal benefit.
#[derive(Debug, Clone)]
pub struct DesignSession {
    catalog: Arc<FixtureCatalog>,
    resolver: Arc<QuantityResolver>,
    inner: Arc<Mutex<SessionInner>>,
}

impl DesignSession {
    /// Creates an empty session over the given catalog.
    ///
    /// Keyword patterns for quantity extraction are compiled here, once,
    /// not on every quote.
    pub fn new(catalog: FixtureCatalog) -> Self {
        let resolver = QuantityResolver::for_catalog(&catalog);
        DesignSession {
            catalog: Arc::new(catalog),
            resolver: Arc::new(resolver),
            inner: Arc::new(Mutex::new(SessionInner::default())),
        }
    }

    /// Creates an empty session over the standard fixture catalog.
    pub fn standard() -> Self {
        DesignSession::new(FixtureCatalog::standard())
    }

    /// The catalog this session designs against.
    pub fn catalog(&self) -> &FixtureCatalog {
        &self.catalog
    }

    // =========================================================================
    // Selection Operations
    // =========================================================================

    /// Toggles a fixture category on or off.
    ///
    /// ## Behavior
    /// - Selected category: switched off (configured options are retained)
    /// - Simple category: switched on directly
    /// - Category with sub-options: a staging panel opens instead
    pub fn toggle_fixture(&self, kind: FixtureKind) -> Result<ToggleOutcome, SessionError> {
        debug!(kind = %kind, "toggle_fixture");
        let outcome = self.with_inner_mut(|inner| inner.editor.toggle_category(&self.catalog, kind))?;
        Ok(outcome)
    }

    /// Opens the staging panel for a configurable category without toggling.
    ///
    /// Used by the "edit options" affordance on an already selected chip.
    pub fn begin_configure(&self, kind: FixtureKind) -> Result<(), SessionError> {
        debug!(kind = %kind, "begin_configure");
        self.with_inner_mut(|inner| inner.editor.begin_configure(&self.catalog, kind))?;
        Ok(())
    }

    /// Toggles one sub-option in the open staging panel.
    ///
    /// ## Returns
    /// `true` if the option is now pending, `false` if it was removed.
    pub fn toggle_option(&self, option_id: &str) -> Result<bool, SessionError> {
        debug!(option_id = %option_id, "toggle_option");
        let pending =
            self.with_inner_mut(|inner| inner.editor.toggle_staged_option(&self.catalog, option_id))?;
        Ok(pending)
    }

    /// Commits the open staging panel into the design.
    pub fn confirm_options(&self) -> Result<FixtureKind, SessionError> {
        let kind = self.with_inner_mut(|inner| inner.editor.confirm_staging())?;
        debug!(kind = %kind, "confirm_options");
        Ok(kind)
    }

    /// Discards the open staging panel, leaving the design untouched.
    ///
    /// ## Returns
    /// The category whose panel was discarded, or `None` if no panel was open.
    /// Cancelling with no panel open is a no-op, not an error.
    pub fn cancel_options(&self) -> Option<FixtureKind> {
        let kind = self.with_inner_mut(|inner| inner.editor.cancel_staging());
        if let Some(kind) = kind {
            debug!(kind = %kind, "cancel_options");
        }
        kind
    }

    /// Replaces the customer notes.
    ///
    /// ## Returns
    /// The stored (trimmed) notes text.
    pub fn set_notes(&self, notes: &str) -> Result<String, SessionError> {
        let notes = validate_notes(notes)?;
        debug!(len = notes.len(), "set_notes");
        self.with_inner_mut(|inner| inner.notes = notes.clone());
        Ok(notes)
    }

    /// Resets the session to an empty design.
    ///
    /// ## When Used
    /// - Designer starts over on the same photo
    /// - A new client walkthrough begins
    pub fn clear_design(&self) {
        debug!("clear_design");
        self.with_inner_mut(|inner| {
            inner.editor.clear();
            inner.notes.clear();
        });
    }

    /// Returns a point-in-time copy of the design.
    pub fn snapshot(&self) -> DesignSnapshot {
        self.with_inner(|inner| DesignSnapshot {
            state: inner.editor.state().clone(),
            staging: inner.editor.staging().cloned(),
            notes: inner.notes.clone(),
        })
    }

    // =========================================================================
    // Engine Invocation
    // =========================================================================

    /// Compiles the scene prompt for the current design.
    ///
    /// ## Errors
    /// `EMPTY_DESIGN` when nothing is selected and the notes are empty.
    /// Rendering an all-dark scene with no advisory text wastes a model
    /// call, so the session refuses it; the frontend disables the button
    /// for the same reason.
    pub fn compile_prompt(&self) -> Result<ScenePrompt, SessionError> {
        let prompt = self.with_inner(|inner| {
            if design_is_empty(inner) {
                return Err(SessionError::empty_design());
            }
            Ok(compile_scene_prompt(
                &self.catalog,
                inner.editor.state(),
                &inner.notes,
            ))
        })?;

        info!(blocks = prompt.blocks().len(), "compiled scene prompt");
        Ok(prompt)
    }

    /// Resolves quantities and assembles a quote for the current design.
    ///
    /// ## Arguments
    /// * `pricing` - Price list to draw unit prices from
    /// * `client` - Contact block for the quote header
    /// * `tax_rate_bps` - Tax rate in basis points (825 = 8.25%)
    /// * `discount_cents` - Flat discount applied before tax
    ///
    /// ## Errors
    /// - `VALIDATION_ERROR` for a bad price list, tax rate, discount, or
    ///   client name
    /// - `EMPTY_DESIGN` when nothing is selected and the notes are empty
    pub fn build_quote(
        &self,
        pricing: &[PricingDefinition],
        client: ClientDetails,
        tax_rate_bps: u32,
        discount_cents: i64,
    ) -> Result<QuoteDocument, SessionError> {
        validate_price_list(pricing)?;
        validate_tax_rate_bps(tax_rate_bps)?;
        validate_discount_cents(discount_cents)?;
        validate_client_name(&client.name)?;

        let quote = self.with_inner(|inner| {
            if design_is_empty(inner) {
                return Err(SessionError::empty_design());
            }
            let resolved = self
                .resolver
                .resolve(inner.editor.state(), &inner.notes, pricing);
            Ok(assemble_quote(
                &resolved,
                client,
                TaxRate::from_bps(tax_rate_bps),
                discount_cents,
            ))
        })?;

        info!(
            quote_id = %quote.id,
            items = quote.items.len(),
            "assembled quote"
        );
        Ok(quote)
    }

    // =========================================================================
    // Lock Helpers
    // =========================================================================

    /// Executes a function with read access to the session state.
    fn with_inner<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SessionInner) -> R,
    {
        let inner = self.inner.lock().expect("Design session mutex poisoned");
        f(&inner)
    }

    /// Executes a function with write access to the session state.
    fn with_inner_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SessionInner) -> R,
    {
        let mut inner = self.inner.lock().expect("Design session mutex poisoned");
        f(&mut inner)
    }
}

impl Default for DesignSession {
    fn default() -> Self {
        DesignSession::standard()
    }
}

/// A design is empty when nothing is selected and the notes carry no text.
/// Staged-but-unconfirmed options do not count.
fn design_is_empty(inner: &SessionInner) -> bool {
    inner.editor.state().is_empty() && inner.notes.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use luxscape_core::MAX_NOTES_LEN;

    fn price_list() -> Vec<PricingDefinition> {
        vec![
            PricingDefinition::new(FixtureKind::Up, "LED Up Light", "Brass, warm white", 8500),
            PricingDefinition::new(FixtureKind::Path, "LED Path Light", "12in bollard", 9500),
            PricingDefinition::new(FixtureKind::Gutter, "LED Gutter Light", "Clip mount", 7800),
            PricingDefinition::new(
                FixtureKind::Transformer,
                "Low-Voltage Transformer",
                "300W, stainless",
                38000,
            ),
        ]
    }

    fn client() -> ClientDetails {
        ClientDetails {
            name: "Dana Whitfield".to_string(),
            ..ClientDetails::default()
        }
    }

    #[test]
    fn test_toggle_and_snapshot() {
        let session = DesignSession::standard();

        let outcome = session.toggle_fixture(FixtureKind::Path).unwrap();
        assert_eq!(outcome, ToggleOutcome::SelectedOn);

        let snap = session.snapshot();
        assert!(snap.state.is_selected(FixtureKind::Path));
        assert!(snap.staging.is_none());
        assert_eq!(snap.notes, "");
    }

    #[test]
    fn test_staging_flow_through_session() {
        let session = DesignSession::standard();

        let outcome = session.toggle_fixture(FixtureKind::Up).unwrap();
        assert_eq!(outcome, ToggleOutcome::StagingOpened);

        let snap = session.snapshot();
        assert!(!snap.state.is_selected(FixtureKind::Up));
        assert_eq!(snap.staging.unwrap().category(), FixtureKind::Up);

        assert!(session.toggle_option("windows").unwrap());
        assert_eq!(session.confirm_options().unwrap(), FixtureKind::Up);

        let snap = session.snapshot();
        assert!(snap.state.is_selected(FixtureKind::Up));
        assert!(snap.state.has_chosen(FixtureKind::Up));
        let chosen = snap.state.chosen(FixtureKind::Up).unwrap();
        assert!(chosen.contains("windows"));
        assert!(snap.staging.is_none());
    }

    #[test]
    fn test_cancel_without_panel_is_noop() {
        let session = DesignSession::standard();
        assert_eq!(session.cancel_options(), None);

        session.toggle_fixture(FixtureKind::Up).unwrap();
        assert_eq!(session.cancel_options(), Some(FixtureKind::Up));
        assert_eq!(session.cancel_options(), None);
    }

    #[test]
    fn test_set_notes_trims_and_validates() {
        let session = DesignSession::standard();

        let stored = session.set_notes("  10 up lights please  ").unwrap();
        assert_eq!(stored, "10 up lights please");
        assert_eq!(session.snapshot().notes, "10 up lights please");

        let err = session.set_notes(&"x".repeat(MAX_NOTES_LEN + 1)).unwrap_err();
        assert!(matches!(err.code, ErrorCode::ValidationError));
        // Stored notes are untouched by the failed update
        assert_eq!(session.snapshot().notes, "10 up lights please");
    }

    #[test]
    fn test_compile_prompt_empty_design_blocked() {
        let session = DesignSession::standard();

        let err = session.compile_prompt().unwrap_err();
        assert!(matches!(err.code, ErrorCode::EmptyDesign));

        // Notes alone unblock rendering: all dark plus an advisory
        session.set_notes("warm light on the maple").unwrap();
        let prompt = session.compile_prompt().unwrap();
        assert!(prompt.render().contains("warm light on the maple"));
    }

    #[test]
    fn test_staging_errors_surface_with_code() {
        let session = DesignSession::standard();

        let err = session.toggle_option("windows").unwrap_err();
        assert!(matches!(err.code, ErrorCode::StagingError));

        let err = session.begin_configure(FixtureKind::Path).unwrap_err();
        assert!(matches!(err.code, ErrorCode::StagingError));
    }

    #[test]
    fn test_build_quote_end_to_end() {
        let session = DesignSession::standard();

        session.toggle_fixture(FixtureKind::Up).unwrap();
        session.toggle_option("windows").unwrap();
        session.confirm_options().unwrap();
        session.toggle_fixture(FixtureKind::Path).unwrap();

        let quote = session
            .build_quote(&price_list(), client(), 825, 0)
            .unwrap();

        // Windows estimate (4), path default (8), transformer (1)
        let names: Vec<&str> = quote.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["LED Up Light", "LED Path Light", "Low-Voltage Transformer"]
        );
        let quantities: Vec<u32> = quote.items.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![4, 8, 1]);
        assert_eq!(quote.client.name, "Dana Whitfield");
        assert_eq!(quote.tax_rate_bps, 825);
    }

    #[test]
    fn test_build_quote_validates_inputs() {
        let session = DesignSession::standard();
        session.toggle_fixture(FixtureKind::Path).unwrap();

        let err = session
            .build_quote(&price_list(), client(), 10001, 0)
            .unwrap_err();
        assert!(matches!(err.code, ErrorCode::ValidationError));

        let err = session
            .build_quote(&price_list(), client(), 825, -50)
            .unwrap_err();
        assert!(matches!(err.code, ErrorCode::ValidationError));

        let err = session
            .build_quote(&price_list(), ClientDetails::default(), 825, 0)
            .unwrap_err();
        assert!(matches!(err.code, ErrorCode::ValidationError));
    }

    #[test]
    fn test_build_quote_empty_design_blocked() {
        let session = DesignSession::standard();
        let err = session
            .build_quote(&price_list(), client(), 825, 0)
            .unwrap_err();
        assert!(matches!(err.code, ErrorCode::EmptyDesign));
    }

    #[test]
    fn test_clones_share_state() {
        let session = DesignSession::standard();
        let other = session.clone();

        session.toggle_fixture(FixtureKind::Hardscape).unwrap();
        assert!(other.snapshot().state.is_selected(FixtureKind::Hardscape));

        other.clear_design();
        assert!(session.snapshot().state.is_empty());
    }

    #[test]
    fn test_clear_design_resets_everything() {
        let session = DesignSession::standard();
        session.toggle_fixture(FixtureKind::Path).unwrap();
        session.toggle_fixture(FixtureKind::Up).unwrap(); // staging opens
        session.set_notes("keep it subtle").unwrap();

        session.clear_design();

        let snap = session.snapshot();
        assert!(snap.state.is_empty());
        assert_eq!(snap.notes, "");
        assert!(snap.staging.is_none());
    }
}
