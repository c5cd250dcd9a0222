//! # luxscape-core: Pure Design Engine for LuxScape
//!
//! This crate is the **heart** of LuxScape. It turns a fixture selection and
//! a free-text customer note into two deterministic artifacts: a scene prompt
//! for the image renderer, and quantified quote lines for the sales side. All
//! of it is pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        LuxScape Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (design studio UI)                  │   │
//! │  │    Fixture toggles ──► Sub-option panel ──► Preview ──► Quote  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              luxscape-studio (Session Layer)                    │   │
//! │  │    DesignSession: shared state, notes, guarded invocation      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ luxscape-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │ selection │  │ compiler  │  │ resolver  │  │   │
//! │  │   │ fragments │  │    FSM    │  │  prompt   │  │ quantity  │  │   │
//! │  │   │   rules   │  │  staging  │  │  blocks   │  │   tiers   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO IMAGE MODEL CALLS • PURE FUNCTIONS  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Fixture categories, sub-options, placement rules, cross-gates
//! - [`selection`] - Selection state machine with the staging panel
//! - [`compiler`] - Deny-first scene prompt compilation
//! - [`resolver`] - Tiered quantity resolution (notes, sub-options, defaults)
//! - [`quote`] - Quote document assembly from resolved quantities
//! - [`types`] - Domain types (FixtureKind, PricingDefinition, QuoteDocument)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for the session layer
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system, and model access is FORBIDDEN here
//! 3. **Deny First**: The prompt states what must stay dark before what may glow
//! 4. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//!
//! ## Example Usage
//!
//! ```rust
//! use luxscape_core::catalog::FixtureCatalog;
//! use luxscape_core::compiler::compile_scene_prompt;
//! use luxscape_core::selection::SelectionEditor;
//! use luxscape_core::types::FixtureKind;
//!
//! let catalog = FixtureCatalog::standard();
//! let mut editor = SelectionEditor::new();
//!
//! // Path lights have no sub-options: one toggle selects them.
//! editor.toggle_category(&catalog, FixtureKind::Path).unwrap();
//!
//! let prompt = compile_scene_prompt(&catalog, editor.state(), "");
//! assert!(prompt.render().contains("Add path lighting"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod compiler;
pub mod error;
pub mod money;
pub mod quote;
pub mod resolver;
pub mod selection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use luxscape_core::Money` instead of
// `use luxscape_core::money::Money`

pub use catalog::FixtureCatalog;
pub use compiler::{compile_scene_prompt, PromptBlock, ScenePrompt};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use quote::assemble_quote;
pub use resolver::{QuantityResolver, ResolutionTier, ResolvedLine};
pub use selection::{SelectionEditor, SelectionState, ToggleOutcome};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of the customer notes field, in bytes after trimming
///
/// ## Business Reason
/// Notes ride along on every prompt compilation and every quantity
/// resolution. A hard cap keeps pathological paste-ins from dominating
/// the rendered prompt.
pub const MAX_NOTES_LEN: usize = 2000;

/// Maximum rows accepted in a single price list
///
/// ## Business Reason
/// The resolver walks the full price list on every resolution. Real
/// price lists have one row per fixture kind plus a handful of extras;
/// a cap of 200 leaves generous headroom while bounding the work.
pub const MAX_PRICING_ROWS: usize = 200;
