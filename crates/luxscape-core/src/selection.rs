//! # Selection State
//!
//! The committed and in-progress fixture choices for one design, and the
//! editor that owns every legal transition between them.
//!
//! ## Per-Category State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │        Categories WITH sub-options (up, gutter)                         │
//! │                                                                         │
//! │                    toggle on / configure                                │
//! │   ┌────────────┐ ─────────────────────────► ┌────────────────────┐     │
//! │   │ Unselected │                            │  Staging(pending)  │     │
//! │   └────────────┘ ◄───────────────────────── └────────────────────┘     │
//! │         ▲                 cancel               │         │  ▲          │
//! │         │                                      │ confirm │  │ toggle   │
//! │         │ toggle off                           ▼         │  │ option   │
//! │   ┌────────────────────┐ ◄─────────────────────┘         └──┘          │
//! │   │ Selected(options)  │      (confirm also restores membership        │
//! │   └────────────────────┘       if it was toggled off mid-flow)         │
//! │         │        ▲                                                      │
//! │         └────────┘ configure (reopens Staging seeded from committed)   │
//! │                                                                         │
//! │        Categories WITHOUT sub-options (path, soffit, ...)               │
//! │        toggle flips membership directly. No staging.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Retention Rule
//! Toggling a configured category off removes membership but keeps its
//! committed sub-option set in storage, so re-selecting restores the last
//! configuration. Only `clear` forgets everything.
//!
//! ## Determinism
//! Selected kinds and committed option ids live in BTree collections, so a
//! snapshot serializes identically regardless of click order.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::FixtureCatalog;
use crate::error::{CoreError, CoreResult};
use crate::types::FixtureKind;

// =============================================================================
// Selection State
// =============================================================================

/// The committed choices for one design: which categories are selected,
/// and which sub-options each configured category last committed.
///
/// The `committed` map may hold entries for categories currently toggled
/// off; that is the retention rule, not a bug.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectionState {
    selected: BTreeSet<FixtureKind>,
    committed: BTreeMap<FixtureKind, BTreeSet<String>>,
}

impl SelectionState {
    /// Checks whether no categories are selected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Checks whether a category is in the selected set.
    #[inline]
    pub fn is_selected(&self, kind: FixtureKind) -> bool {
        self.selected.contains(&kind)
    }

    /// Number of selected categories.
    #[inline]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// The committed sub-option ids for a category, if it has ever been
    /// configured. `None` and an empty set mean the same thing to the
    /// compiler and resolver.
    pub fn chosen(&self, kind: FixtureKind) -> Option<&BTreeSet<String>> {
        self.committed.get(&kind)
    }

    /// Checks whether a selected category has at least one committed
    /// sub-option choice.
    pub fn has_chosen(&self, kind: FixtureKind) -> bool {
        self.chosen(kind).map_or(false, |ids| !ids.is_empty())
    }
}

// =============================================================================
// Staging Selection
// =============================================================================

/// A configuration surface in progress: one category plus a working copy
/// of its chosen sub-option ids. Never part of the committed state until
/// confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StagingSelection {
    category: FixtureKind,
    pending: BTreeSet<String>,
}

impl StagingSelection {
    /// The category being configured.
    #[inline]
    pub fn category(&self) -> FixtureKind {
        self.category
    }

    /// The tentative sub-option ids.
    #[inline]
    pub fn pending(&self) -> &BTreeSet<String> {
        &self.pending
    }

    /// Checks whether a sub-option is currently ticked.
    pub fn is_pending(&self, option_id: &str) -> bool {
        self.pending.contains(option_id)
    }
}

// =============================================================================
// Toggle Outcome
// =============================================================================

/// What a category toggle did, so the interaction layer knows whether to
/// open the configuration surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// Simple category committed into the selected set.
    SelectedOn,
    /// Category removed from the selected set.
    SelectedOff,
    /// Sub-option category: a staging panel opened instead of committing.
    StagingOpened,
}

// =============================================================================
// Selection Editor
// =============================================================================

/// Owns a [`SelectionState`] and an optional [`StagingSelection`] and
/// enforces the state machine above. This is the only writer of selection
/// data in the system.
#[derive(Debug, Clone, Default)]
pub struct SelectionEditor {
    state: SelectionState,
    staging: Option<StagingSelection>,
}

impl SelectionEditor {
    /// Creates an editor with nothing selected.
    pub fn new() -> Self {
        SelectionEditor::default()
    }

    /// Read access to the committed state.
    #[inline]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The open staging panel, if any.
    #[inline]
    pub fn staging(&self) -> Option<&StagingSelection> {
        self.staging.as_ref()
    }

    /// Toggles a category.
    ///
    /// - Selected → removed from the selected set (committed sub-options
    ///   are retained; an open staging panel is untouched).
    /// - Unselected, no sub-options → committed into the selected set.
    /// - Unselected, with sub-options → opens a staging panel seeded with
    ///   the previously committed choices (or empty). Membership is NOT
    ///   committed until [`confirm_staging`](Self::confirm_staging).
    ///
    /// Opening a staging panel replaces any panel already open.
    pub fn toggle_category(
        &mut self,
        catalog: &FixtureCatalog,
        kind: FixtureKind,
    ) -> CoreResult<ToggleOutcome> {
        let category = catalog
            .category(kind)
            .ok_or(CoreError::CategoryNotInCatalog { kind })?;

        if self.state.selected.remove(&kind) {
            return Ok(ToggleOutcome::SelectedOff);
        }

        if category.has_sub_options() {
            self.open_staging(kind);
            Ok(ToggleOutcome::StagingOpened)
        } else {
            self.state.selected.insert(kind);
            Ok(ToggleOutcome::SelectedOn)
        }
    }

    /// Reopens the configuration surface for a sub-option category,
    /// seeded with its committed choices. Legal from any state; this is
    /// how an already-selected category gets reconfigured without being
    /// toggled off first.
    pub fn begin_configure(
        &mut self,
        catalog: &FixtureCatalog,
        kind: FixtureKind,
    ) -> CoreResult<()> {
        let category = catalog
            .category(kind)
            .ok_or(CoreError::CategoryNotInCatalog { kind })?;

        if !category.has_sub_options() {
            return Err(CoreError::NoSubOptions { kind });
        }

        self.open_staging(kind);
        Ok(())
    }

    /// Flips one sub-option in the open staging panel. Returns whether the
    /// option is ticked after the flip.
    pub fn toggle_staged_option(
        &mut self,
        catalog: &FixtureCatalog,
        option_id: &str,
    ) -> CoreResult<bool> {
        let staging = self.staging.as_mut().ok_or(CoreError::StagingClosed)?;
        let kind = staging.category;

        let category = catalog
            .category(kind)
            .ok_or(CoreError::CategoryNotInCatalog { kind })?;
        if category.sub_option(option_id).is_none() {
            return Err(CoreError::UnknownSubOption {
                kind,
                option_id: option_id.to_string(),
            });
        }

        if staging.pending.remove(option_id) {
            Ok(false)
        } else {
            staging.pending.insert(option_id.to_string());
            Ok(true)
        }
    }

    /// Commits the staging panel: the pending set becomes the committed
    /// set and the category is guaranteed membership in the selected set,
    /// even if it was toggled off while the panel was open.
    pub fn confirm_staging(&mut self) -> CoreResult<FixtureKind> {
        let staging = self.staging.take().ok_or(CoreError::StagingClosed)?;
        let kind = staging.category;

        self.state.committed.insert(kind, staging.pending);
        self.state.selected.insert(kind);
        Ok(kind)
    }

    /// Discards the staging panel. Committed state is untouched. Returns
    /// the category whose panel was closed, if one was open.
    pub fn cancel_staging(&mut self) -> Option<FixtureKind> {
        self.staging.take().map(|staging| staging.category)
    }

    /// Resets everything: selections, committed sub-options, and any open
    /// staging panel. Used when the user starts a new design.
    pub fn clear(&mut self) {
        self.state = SelectionState::default();
        self.staging = None;
    }

    fn open_staging(&mut self, kind: FixtureKind) {
        let pending = self.state.chosen(kind).cloned().unwrap_or_default();
        self.staging = Some(StagingSelection {
            category: kind,
            pending,
        });
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
