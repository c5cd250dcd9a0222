//! # Constraint Compiler
//!
//! Turns one selection snapshot into the natural-language constraint text
//! handed to the external image renderer.
//!
//! ## Assembly Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │     (FixtureCatalog, SelectionState, notes)                             │
//! │                        │                                                │
//! │                        ▼                                                │
//! │   1. Preamble          fixed closed-world policy                        │
//! │   2. Prohibitions      force-dark retouch text of unselected categories │
//! │   3. Deny block        deny fragment of EVERY unselected category       │
//! │   4. Allow block       per selected category, in catalog order:         │
//! │                          canonical fragment, or sub-option expansion    │
//! │                          + firing placement rules                       │
//! │   5. Cross-gates       pairwise combination rules                       │
//! │   6. Checklist         fixed self-check list                            │
//! │   7. Advisory          trimmed customer notes (omitted when empty)      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │            ScenePrompt { Vec<PromptBlock> } ──render()──► String        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why This Order
//! The downstream renderer is a generative model that empirically honors
//! later statements over earlier ones. Specific and overriding rules are
//! therefore placed AFTER general ones: the gates outrank the per-category
//! text, and the per-category text outranks the preamble. The order above
//! is a contract, not a style choice.
//!
//! ## Purity
//! `compile_scene_prompt` is a pure function: same inputs, byte-identical
//! output. It never errors over its input domain; committed sub-option ids
//! the catalog no longer defines are skipped, and a selected category whose
//! chosen ids are all stale falls back to its canonical fragment.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{FixtureCatalog, FixtureCategory, GateCondition, RuleTrigger, SubOption};
use crate::selection::SelectionState;
use crate::types::FixtureKind;

// =============================================================================
// Fixed Text
// =============================================================================

const PREAMBLE: &str = "You are converting a real daytime photograph of this exact \
property into a realistic night scene. Closed-world policy: do not add, move, or \
remove any object, plant, fixture, or structure; do not invent architectural \
features; the only change permitted is illumination. Treat every instruction below \
as binding, and when two instructions conflict, the later one wins.";

const CHECKLIST: &str = "Final self-check before emitting the image:\n\
1. No object, plant, or structure was added, moved, or removed.\n\
2. Every lit surface is explicitly allowed by an instruction above.\n\
3. Every surface named as dark shows no glow, bloom, or reflection.\n\
4. Fixture counts and spacing match the placement rules exactly.\n\
5. The scene reads as true night; geometry, framing, and materials are untouched.";

const ADVISORY_PREFIX: &str = "Customer notes (advisory only, lowest priority): ";

// =============================================================================
// Prompt Blocks
// =============================================================================

/// One tagged instruction block in the compiled prompt.
///
/// The tag records why the text is there, which makes the
/// last-statement-wins ordering testable instead of incidental. `render`
/// flattens the sequence into the single text artifact the renderer sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PromptBlock {
    /// Fixed closed-world policy, always first.
    Preamble(String),
    /// Absolute force-dark retouch instruction for an unselected category.
    Prohibition { kind: FixtureKind, text: String },
    /// Canonical deny fragment of an unselected category.
    DenyFragment { kind: FixtureKind, text: String },
    /// Allow text of a selected category: the canonical fragment, or its
    /// sub-option expansion.
    AllowFragment { kind: FixtureKind, text: String },
    /// A placement rule that fired for a selected category.
    CategoryRule { kind: FixtureKind, text: String },
    /// A pairwise combination rule that fired.
    CrossGate {
        subject: FixtureKind,
        peer: FixtureKind,
        text: String,
    },
    /// Fixed self-check list, selection independent.
    Checklist(String),
    /// Trimmed customer notes, always last, lowest priority.
    Advisory(String),
}

impl PromptBlock {
    /// The rendered text of this block.
    pub fn text(&self) -> &str {
        match self {
            PromptBlock::Preamble(text)
            | PromptBlock::Checklist(text)
            | PromptBlock::Advisory(text) => text,
            PromptBlock::Prohibition { text, .. }
            | PromptBlock::DenyFragment { text, .. }
            | PromptBlock::AllowFragment { text, .. }
            | PromptBlock::CategoryRule { text, .. }
            | PromptBlock::CrossGate { text, .. } => text,
        }
    }
}

// =============================================================================
// Scene Prompt
// =============================================================================

/// The compiled prompt: an ordered block sequence with one serialization
/// pass. The block structure is exposed so a UI can show a grouped preview;
/// `render` produces the exact text sent to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScenePrompt {
    blocks: Vec<PromptBlock>,
}

impl ScenePrompt {
    /// The ordered block sequence.
    #[inline]
    pub fn blocks(&self) -> &[PromptBlock] {
        &self.blocks
    }

    /// Flattens the blocks into the final text, one block per line.
    pub fn render(&self) -> String {
        let capacity: usize = self.blocks.iter().map(|b| b.text().len() + 1).sum();
        let mut out = String::with_capacity(capacity);
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(block.text());
        }
        out
    }
}

// =============================================================================
// Compilation
// =============================================================================

/// Compiles a selection snapshot and customer notes into a [`ScenePrompt`].
///
/// Every catalog category lands in exactly one of the deny block (step 3)
/// or the allow block (step 4); gates and fixed text wrap around them in
/// the contract order documented at module level.
pub fn compile_scene_prompt(
    catalog: &FixtureCatalog,
    state: &SelectionState,
    notes: &str,
) -> ScenePrompt {
    let mut blocks = Vec::with_capacity(catalog.categories().len() + 8);

    // 1. Preamble
    blocks.push(PromptBlock::Preamble(PREAMBLE.to_string()));

    // 2. Absolute prohibitions: force-dark retouch for unselected
    //    categories that carry one. Idempotent by construction; the text
    //    orders existing fixtures dark rather than forbidding new ones.
    for category in catalog.categories() {
        if state.is_selected(category.kind) {
            continue;
        }
        if let Some(text) = &category.force_dark {
            blocks.push(PromptBlock::Prohibition {
                kind: category.kind,
                text: text.clone(),
            });
        }
    }

    // 3. Deny block: the complement of the selected set, total, each
    //    unselected category exactly once, in catalog order.
    for category in catalog.categories() {
        if !state.is_selected(category.kind) {
            blocks.push(PromptBlock::DenyFragment {
                kind: category.kind,
                text: category.deny_fragment.clone(),
            });
        }
    }

    // 4. Allow block with placement rules.
    for category in catalog.categories() {
        if !state.is_selected(category.kind) {
            continue;
        }

        let chosen = valid_chosen(category, state);
        let text = if chosen.is_empty() {
            category.allow_fragment.clone()
        } else {
            expand_sub_options(category, &chosen)
        };
        blocks.push(PromptBlock::AllowFragment {
            kind: category.kind,
            text,
        });

        for rule in &category.placement_rules {
            let fires = match &rule.trigger {
                RuleTrigger::Always => true,
                RuleTrigger::OptionChosen(id) => chosen.iter().any(|opt| &opt.id == id),
            };
            if fires {
                blocks.push(PromptBlock::CategoryRule {
                    kind: category.kind,
                    text: rule.text.clone(),
                });
            }
        }
    }

    // 5. Cross-gates, after all per-category text so they win.
    for gate in catalog.gates() {
        if !state.is_selected(gate.subject) {
            continue;
        }
        let fires = match gate.condition {
            GateCondition::PeerUnselected => !state.is_selected(gate.peer),
            GateCondition::PeerSelected => state.is_selected(gate.peer),
        };
        if fires {
            blocks.push(PromptBlock::CrossGate {
                subject: gate.subject,
                peer: gate.peer,
                text: gate.text.clone(),
            });
        }
    }

    // 6. Checklist
    blocks.push(PromptBlock::Checklist(CHECKLIST.to_string()));

    // 7. Advisory
    let trimmed = notes.trim();
    if !trimmed.is_empty() {
        let mut text = String::with_capacity(ADVISORY_PREFIX.len() + trimmed.len());
        text.push_str(ADVISORY_PREFIX);
        text.push_str(trimmed);
        blocks.push(PromptBlock::Advisory(text));
    }

    ScenePrompt { blocks }
}

/// The committed sub-options of a selected category that the catalog still
/// defines, in catalog order. Stale ids are dropped here.
fn valid_chosen<'a>(category: &'a FixtureCategory, state: &SelectionState) -> Vec<&'a SubOption> {
    match state.chosen(category.kind) {
        Some(ids) => category
            .sub_options
            .iter()
            .filter(|opt| ids.contains(&opt.id))
            .collect(),
        None => Vec::new(),
    }
}

/// Builds the nested allow/deny expansion that replaces a category's
/// canonical fragment when sub-options are chosen: chosen placements are
/// enumerated and allowed, every other placement of the category is
/// enumerated and forbidden.
fn expand_sub_options(category: &FixtureCategory, chosen: &[&SubOption]) -> String {
    let mut text = String::with_capacity(192);

    text.push_str(&category.label);
    text.push_str(" are limited to these placements: ");
    push_labels(&mut text, chosen);
    text.push('.');
    for opt in chosen {
        text.push(' ');
        text.push_str(&opt.allow_fragment);
    }

    let other: Vec<&SubOption> = category
        .sub_options
        .iter()
        .filter(|opt| !chosen.iter().any(|c| c.id == opt.id))
        .collect();
    if !other.is_empty() {
        text.push_str(" Strictly forbidden placements: ");
        push_labels(&mut text, &other);
        text.push('.');
        for opt in &other {
            text.push(' ');
            text.push_str(&opt.deny_fragment);
        }
    }

    text
}

fn push_labels(text: &mut String, options: &[&SubOption]) {
    for (i, opt) in options.iter().enumerate() {
        if i > 0 {
            text.push_str(", ");
        }
        text.push_str(&opt.label);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionEditor;

    fn catalog() -> FixtureCatalog {
        FixtureCatalog::standard()
    }

    /// Selects a simple category, or confirms an empty staging panel for a
    /// sub-option category.
    fn select(editor: &mut SelectionEditor, catalog: &FixtureCatalog, kind: FixtureKind) {
        use crate::selection::ToggleOutcome;
        match editor.toggle_category(catalog, kind).unwrap() {
            ToggleOutcome::StagingOpened => {
                editor.confirm_staging().unwrap();
            }
            ToggleOutcome::SelectedOn => {}
            ToggleOutcome::SelectedOff => panic!("{kind} was already selected"),
        }
    }

    /// Selects a sub-option category with the given options committed.
    fn select_with_options(
        editor: &mut SelectionEditor,
        catalog: &FixtureCatalog,
        kind: FixtureKind,
        options: &[&str],
    ) {
        editor.begin_configure(catalog, kind).unwrap();
        for id in options {
            editor.toggle_staged_option(catalog, id).unwrap();
        }
        editor.confirm_staging().unwrap();
    }

    fn ordering_rank(block: &PromptBlock) -> u8 {
        match block {
            PromptBlock::Preamble(_) => 0,
            PromptBlock::Prohibition { .. } => 1,
            PromptBlock::DenyFragment { .. } => 2,
            // Allow text and its rules interleave per category.
            PromptBlock::AllowFragment { .. } | PromptBlock::CategoryRule { .. } => 3,
            PromptBlock::CrossGate { .. } => 4,
            PromptBlock::Checklist(_) => 5,
            PromptBlock::Advisory(_) => 6,
        }
    }

    #[test]
    fn test_compile_is_deterministic_and_idempotent() {
        let catalog = catalog();

        // Same design, built with different click orders.
        let mut a = SelectionEditor::new();
        select(&mut a, &catalog, FixtureKind::Path);
        select_with_options(&mut a, &catalog, FixtureKind::Up, &["windows", "peaks"]);

        let mut b = SelectionEditor::new();
        select_with_options(&mut b, &catalog, FixtureKind::Up, &["peaks", "windows"]);
        select(&mut b, &catalog, FixtureKind::Path);

        let notes = "client wants warm color temperature";
        let first = compile_scene_prompt(&catalog, a.state(), notes).render();
        let second = compile_scene_prompt(&catalog, a.state(), notes).render();
        let reordered = compile_scene_prompt(&catalog, b.state(), notes).render();

        assert_eq!(first, second);
        assert_eq!(first, reordered);
    }

    #[test]
    fn test_every_category_lands_in_exactly_one_block() {
        let catalog = catalog();

        let designs: Vec<SelectionEditor> = {
            let mut empty = SelectionEditor::new();
            empty.clear();

            let mut some = SelectionEditor::new();
            select(&mut some, &catalog, FixtureKind::Path);
            select_with_options(&mut some, &catalog, FixtureKind::Gutter, &["dormers"]);

            let mut all = SelectionEditor::new();
            for category in catalog.categories() {
                select(&mut all, &catalog, category.kind);
            }

            vec![empty, some, all]
        };

        for editor in &designs {
            let prompt = compile_scene_prompt(&catalog, editor.state(), "");
            for category in catalog.categories() {
                let allows = prompt
                    .blocks()
                    .iter()
                    .filter(|b| matches!(b, PromptBlock::AllowFragment { kind, .. } if *kind == category.kind))
                    .count();
                let denies = prompt
                    .blocks()
                    .iter()
                    .filter(|b| matches!(b, PromptBlock::DenyFragment { kind, .. } if *kind == category.kind))
                    .count();
                assert_eq!(
                    allows + denies,
                    1,
                    "{} appeared in {} allow and {} deny blocks",
                    category.kind,
                    allows,
                    denies
                );
            }
        }
    }

    #[test]
    fn test_block_order_follows_the_contract() {
        let catalog = catalog();
        let mut editor = SelectionEditor::new();
        select_with_options(&mut editor, &catalog, FixtureKind::Up, &["windows"]);
        select(&mut editor, &catalog, FixtureKind::Path);

        let prompt = compile_scene_prompt(&catalog, editor.state(), "prefer soft shadows");
        let ranks: Vec<u8> = prompt.blocks().iter().map(ordering_rank).collect();

        let mut sorted = ranks.clone();
        sorted.sort_unstable();
        assert_eq!(ranks, sorted, "blocks out of contract order: {ranks:?}");

        assert!(matches!(prompt.blocks().first(), Some(PromptBlock::Preamble(_))));
        assert!(matches!(prompt.blocks().last(), Some(PromptBlock::Advisory(_))));
    }

    #[test]
    fn test_gutter_without_soffit_fires_bleed_gate() {
        let catalog = catalog();
        let mut editor = SelectionEditor::new();
        select(&mut editor, &catalog, FixtureKind::Gutter);

        let text = compile_scene_prompt(&catalog, editor.state(), "").render();
        assert!(text.contains("gutter-line fixtures must throw no light onto the soffit face"));

        // With soffits also selected the gate must not fire.
        select(&mut editor, &catalog, FixtureKind::Soffit);
        let text = compile_scene_prompt(&catalog, editor.state(), "").render();
        assert!(!text.contains("gutter-line fixtures must throw no light onto the soffit face"));
    }

    #[test]
    fn test_soffit_force_dark_only_when_unselected() {
        let catalog = catalog();

        let empty = SelectionEditor::new();
        let text = compile_scene_prompt(&catalog, empty.state(), "").render();
        assert!(text.contains("retouch them to appear switched off"));

        let mut editor = SelectionEditor::new();
        select(&mut editor, &catalog, FixtureKind::Soffit);
        let text = compile_scene_prompt(&catalog, editor.state(), "").render();
        assert!(!text.contains("retouch them to appear switched off"));
        assert!(text.contains("Add recessed soffit downlighting"));
    }

    #[test]
    fn test_simple_category_renders_fragment_not_label() {
        let catalog = catalog();
        let mut editor = SelectionEditor::new();
        select(&mut editor, &catalog, FixtureKind::Path);

        let path = catalog.category(FixtureKind::Path).unwrap();
        let text = compile_scene_prompt(&catalog, editor.state(), "").render();

        // The allow line is the canonical fragment verbatim. The display
        // label only enters the prompt through a sub-option expansion
        // header, and Path has none to expand.
        assert!(text.contains(&path.allow_fragment));
        assert!(!text.contains(&path.label));
    }

    #[test]
    fn test_sub_option_expansion_replaces_canonical_fragment() {
        let catalog = catalog();
        let mut editor = SelectionEditor::new();
        select_with_options(&mut editor, &catalog, FixtureKind::Up, &["windows"]);

        let up = catalog.category(FixtureKind::Up).unwrap();
        let text = compile_scene_prompt(&catalog, editor.state(), "").render();

        // Replaced, not appended.
        assert!(!text.contains(&up.allow_fragment));
        assert!(text.contains("Up Lights are limited to these placements: Windows."));
        assert!(text.contains(&up.sub_option("windows").unwrap().allow_fragment));

        // The unchosen options are forbidden by label and by fragment.
        assert!(text.contains("Strictly forbidden placements: Siding, Peaks."));
        assert!(text.contains(&up.sub_option("siding").unwrap().deny_fragment));

        // Option-scoped rules: windows rule fires, peaks rule does not.
        assert!(text.contains("Exactly one fixture centered between each pair"));
        assert!(!text.contains("dies out before the ridge line"));
    }

    #[test]
    fn test_expansion_with_every_option_chosen_forbids_nothing() {
        let catalog = catalog();
        let mut editor = SelectionEditor::new();
        select_with_options(
            &mut editor,
            &catalog,
            FixtureKind::Gutter,
            &["dormers", "peaks"],
        );

        let text = compile_scene_prompt(&catalog, editor.state(), "").render();
        assert!(text.contains("Gutter Lights are limited to these placements: Dormers, Upper Peaks."));
        assert!(!text.contains("Strictly forbidden placements:"));
    }

    #[test]
    fn test_combined_scenario_up_default_gutter_dormers() {
        let catalog = catalog();
        let mut editor = SelectionEditor::new();
        select(&mut editor, &catalog, FixtureKind::Up);
        select_with_options(&mut editor, &catalog, FixtureKind::Gutter, &["dormers"]);

        let text = compile_scene_prompt(&catalog, editor.state(), "").render();

        // Up has no chosen options, so its canonical fragment stands.
        let up = catalog.category(FixtureKind::Up).unwrap();
        assert!(text.contains(&up.allow_fragment));

        // Dormer centering rule from the gutter configuration.
        assert!(text.contains("Center exactly one fixture below each dormer window"));

        // Soffit is unselected: the up/soffit gate fires...
        assert!(text.contains("every up light beam terminates below the eave line"));
        // ...and so does the up+gutter continuity gate.
        assert!(text.contains("no dark band remains between the first and second stories"));
    }

    #[test]
    fn test_advisory_trimmed_and_omitted_when_empty() {
        let catalog = catalog();
        let mut editor = SelectionEditor::new();
        select(&mut editor, &catalog, FixtureKind::Path);

        let bare = compile_scene_prompt(&catalog, editor.state(), "");
        let blank = compile_scene_prompt(&catalog, editor.state(), "   \n  ");
        assert_eq!(bare.render(), blank.render());
        assert!(matches!(bare.blocks().last(), Some(PromptBlock::Checklist(_))));

        let noted = compile_scene_prompt(&catalog, editor.state(), "  2700K, no glare  ");
        match noted.blocks().last() {
            Some(PromptBlock::Advisory(text)) => {
                assert_eq!(
                    text,
                    "Customer notes (advisory only, lowest priority): 2700K, no glare"
                );
            }
            other => panic!("expected advisory last, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_selection_compiles_total_deny() {
        let catalog = catalog();
        let editor = SelectionEditor::new();

        let prompt = compile_scene_prompt(&catalog, editor.state(), "");
        let text = prompt.render();

        for category in catalog.categories() {
            assert!(text.contains(&category.deny_fragment), "{}", category.kind);
        }
        assert!(!prompt
            .blocks()
            .iter()
            .any(|b| matches!(b, PromptBlock::AllowFragment { .. })));
    }

    #[test]
    fn test_prompt_block_wire_shape_is_stable() {
        let block = PromptBlock::DenyFragment {
            kind: FixtureKind::Soffit,
            text: "stay dark".to_string(),
        };
        let json = serde_json::to_string(&block).unwrap();
        assert_eq!(
            json,
            r#"{"deny_fragment":{"kind":"soffit","text":"stay dark"}}"#
        );

        let back: PromptBlock = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }
}
