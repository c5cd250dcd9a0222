//! # Fixture Catalog
//!
//! Static configuration describing every lighting category the design
//! engine can work with: display labels, canonical prompt fragments,
//! sub-options, placement rules, cross-category gates, estimation counts,
//! and the keyword sets used for free-text quantity extraction.
//!
//! ## How the Catalog Feeds the Engine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FixtureCatalog                                   │
//! │                                                                         │
//! │  FixtureCategory ──┬──► allow/deny fragments ──► Constraint Compiler   │
//! │                    ├──► force_dark text ───────► Constraint Compiler   │
//! │                    ├──► placement rules ───────► Constraint Compiler   │
//! │                    ├──► keywords ──────────────► Quantity Resolver     │
//! │                    └──► default/estimate counts ► Quantity Resolver    │
//! │                                                                         │
//! │  CrossGate (pairwise) ─────────────────────────► Constraint Compiler   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Injected, Not Global
//! The catalog is passed to the compiler and resolver as a parameter. No
//! module-level constants: tests can run against a two-category toy catalog,
//! and the standard data below is just one (carefully authored) instance.
//!
//! Category order in the catalog is the order the compiler walks, so the
//! compiled text is deterministic for a given catalog.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::FixtureKind;

// =============================================================================
// Sub-Option
// =============================================================================

/// A finer-grained placement target within a category ("windows",
/// "dormers", ...). Carries its own allow/deny fragments for the nested
/// expansion and a fixture-count estimate for quantity resolution.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubOption {
    /// Stable identifier, unique within its category ("windows").
    pub id: String,

    /// Short label shown on the configuration surface ("Windows").
    pub label: String,

    /// One-line description shown under the label.
    pub description: String,

    /// Emitted when this option is chosen.
    pub allow_fragment: String,

    /// Emitted when the category is selected but this option is not chosen.
    pub deny_fragment: String,

    /// Estimated fixture count this option contributes when chosen.
    pub estimate_count: u32,
}

impl SubOption {
    fn new(
        id: &str,
        label: &str,
        description: &str,
        allow_fragment: &str,
        deny_fragment: &str,
        estimate_count: u32,
    ) -> Self {
        SubOption {
            id: id.to_string(),
            label: label.to_string(),
            description: description.to_string(),
            allow_fragment: allow_fragment.to_string(),
            deny_fragment: deny_fragment.to_string(),
            estimate_count,
        }
    }
}

// =============================================================================
// Placement Rules
// =============================================================================

/// When a placement rule fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RuleTrigger {
    /// Fires whenever the owning category is selected.
    Always,
    /// Fires when the named sub-option is in the chosen set.
    OptionChosen(String),
}

/// A hand-authored geometric placement rule for one category.
///
/// These are the fixture-per-feature counting rules, centering rules, and
/// surface constraints appended after a category's allow text. Each category
/// carries its own rule set; there is no generic rule engine.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlacementRule {
    pub trigger: RuleTrigger,
    pub text: String,
}

impl PlacementRule {
    /// Rule that fires whenever the category is selected.
    pub fn always(text: &str) -> Self {
        PlacementRule {
            trigger: RuleTrigger::Always,
            text: text.to_string(),
        }
    }

    /// Rule that fires when a particular sub-option is chosen.
    pub fn when_option(option_id: &str, text: &str) -> Self {
        PlacementRule {
            trigger: RuleTrigger::OptionChosen(option_id.to_string()),
            text: text.to_string(),
        }
    }
}

// =============================================================================
// Cross-Category Gates
// =============================================================================

/// The peer condition under which a gate fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum GateCondition {
    /// Fires when the subject is selected and the peer is NOT selected.
    PeerUnselected,
    /// Fires when the subject and the peer are BOTH selected.
    PeerSelected,
}

/// A pairwise rule over the combination of two category selections.
///
/// Gates are appended after all per-category text so they win the
/// last-statement-wins ordering. Pairs without a defined gate simply have
/// no entry here.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CrossGate {
    pub subject: FixtureKind,
    pub peer: FixtureKind,
    pub condition: GateCondition,
    pub text: String,
}

impl CrossGate {
    /// Gate firing when `subject` is selected and `peer` is not.
    pub fn unless_peer(subject: FixtureKind, peer: FixtureKind, text: &str) -> Self {
        CrossGate {
            subject,
            peer,
            condition: GateCondition::PeerUnselected,
            text: text.to_string(),
        }
    }

    /// Gate firing when `subject` and `peer` are both selected.
    pub fn with_peer(subject: FixtureKind, peer: FixtureKind, text: &str) -> Self {
        CrossGate {
            subject,
            peer,
            condition: GateCondition::PeerSelected,
            text: text.to_string(),
        }
    }
}

// =============================================================================
// Fixture Category
// =============================================================================

/// One lighting category: everything the compiler and resolver need to
/// know about it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FixtureCategory {
    /// Category key. `FixtureKind::Transformer` never appears here; the
    /// transformer is a pricing-only row, not a lit category.
    pub kind: FixtureKind,

    /// Display label for the toggle panel ("Up Lights").
    pub label: String,

    /// Canonical sentence allowing this category, emitted when it is
    /// selected with no sub-options chosen.
    pub allow_fragment: String,

    /// Canonical sentence denying this category, emitted when unselected.
    pub deny_fragment: String,

    /// Absolute-prohibition text emitted when the category is NOT selected:
    /// an idempotent instruction to retouch pre-existing instances to dark,
    /// not merely to avoid adding new ones. Most categories have none.
    pub force_dark: Option<String>,

    /// Ordered sub-options (empty for simple categories).
    pub sub_options: Vec<SubOption>,

    /// Flat fixture-count fallback when the category is selected with no
    /// sub-options chosen (and for categories that have none).
    pub default_count: u32,

    /// Keywords recognised after an integer in free-text notes
    /// ("10 up lights"). Matched case-insensitively, longest first.
    pub keywords: Vec<String>,

    /// Hand-authored placement rules appended after the allow text.
    pub placement_rules: Vec<PlacementRule>,
}

impl FixtureCategory {
    /// Checks whether this category opens a configuration surface.
    #[inline]
    pub fn has_sub_options(&self) -> bool {
        !self.sub_options.is_empty()
    }

    /// Looks up a sub-option by id.
    pub fn sub_option(&self, id: &str) -> Option<&SubOption> {
        self.sub_options.iter().find(|opt| opt.id == id)
    }
}

// =============================================================================
// Fixture Catalog
// =============================================================================

/// The full catalog: categories in walk order plus the cross-gate table.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FixtureCatalog {
    categories: Vec<FixtureCategory>,
    gates: Vec<CrossGate>,
}

impl FixtureCatalog {
    /// Builds a catalog from explicit parts. Category order is preserved
    /// and becomes the compiler's walk order.
    pub fn new(categories: Vec<FixtureCategory>, gates: Vec<CrossGate>) -> Self {
        FixtureCatalog { categories, gates }
    }

    /// Categories in walk order.
    #[inline]
    pub fn categories(&self) -> &[FixtureCategory] {
        &self.categories
    }

    /// Looks up a category by kind.
    pub fn category(&self, kind: FixtureKind) -> Option<&FixtureCategory> {
        self.categories.iter().find(|cat| cat.kind == kind)
    }

    /// The cross-gate table in evaluation order.
    #[inline]
    pub fn gates(&self) -> &[CrossGate] {
        &self.gates
    }

    /// The standard residential catalog: six lighting categories with
    /// hand-authored prompt fragments, placement rules, and gates.
    ///
    /// Fragment wording matters. The downstream renderer is a generative
    /// model, so every sentence is phrased as a direct, checkable
    /// instruction about a named surface.
    pub fn standard() -> Self {
        let categories = vec![
            // ----------------------------------------------------------------
            // Up lights: ground-staked wash on the first-story facade
            // ----------------------------------------------------------------
            FixtureCategory {
                kind: FixtureKind::Up,
                label: "Up Lights".to_string(),
                allow_fragment: "Add warm up lighting: ground-staked fixtures at the \
                                 foundation washing the front facade upward."
                    .to_string(),
                deny_fragment: "Do not add any up lighting on the facade; the walls \
                                receive no ground-level accent wash."
                    .to_string(),
                force_dark: None,
                sub_options: vec![
                    SubOption::new(
                        "windows",
                        "Windows",
                        "Wall sections between the first-story windows",
                        "Place up lights on the wall sections between the \
                         first-story windows, washing each section upward.",
                        "Do not place up lights between the windows; those wall \
                         sections stay dark.",
                        4,
                    ),
                    SubOption::new(
                        "siding",
                        "Siding",
                        "Broad uninterrupted siding runs",
                        "Wash the broad siding runs with evenly spaced up light.",
                        "Leave the broad siding runs unlit.",
                        6,
                    ),
                    SubOption::new(
                        "peaks",
                        "Peaks",
                        "Gable peaks above the rooflines",
                        "Graze each gable peak with a single dedicated up light.",
                        "Leave the gable peaks dark.",
                        3,
                    ),
                ],
                default_count: 6,
                keywords: vec![
                    "up lights".to_string(),
                    "up light".to_string(),
                    "uplights".to_string(),
                    "uplight".to_string(),
                    "accent lights".to_string(),
                    "accents".to_string(),
                    "up".to_string(),
                ],
                placement_rules: vec![
                    PlacementRule::always(
                        "Keep every up light tight to the foundation with a narrow \
                         beam, so the wash stays on the wall plane and off the lawn.",
                    ),
                    PlacementRule::when_option(
                        "windows",
                        "Exactly one fixture centered between each pair of adjacent \
                         first-story windows; never two fixtures in one wall section.",
                    ),
                    PlacementRule::when_option(
                        "peaks",
                        "Aim each peak fixture so the beam lands entirely on the gable \
                         face and dies out before the ridge line.",
                    ),
                ],
            },
            // ----------------------------------------------------------------
            // Path lights: staked pools of light along walkways
            // ----------------------------------------------------------------
            FixtureCategory {
                kind: FixtureKind::Path,
                label: "Path Lights".to_string(),
                allow_fragment: "Add path lighting: short staked fixtures casting soft \
                                 overlapping pools of light along the walkways."
                    .to_string(),
                deny_fragment: "Do not add any path or walkway lighting; ground-level \
                                routes stay unlit."
                    .to_string(),
                force_dark: None,
                sub_options: vec![],
                default_count: 8,
                keywords: vec![
                    "path lights".to_string(),
                    "path light".to_string(),
                    "pathway".to_string(),
                    "walkway".to_string(),
                    "path".to_string(),
                ],
                placement_rules: vec![PlacementRule::always(
                    "Stagger fixtures left and right of the walkway at 6 to 8 foot \
                     intervals; never a straight runway row on one side.",
                )],
            },
            // ----------------------------------------------------------------
            // Gutter lights: gutter-line wash on the second story
            // ----------------------------------------------------------------
            FixtureCategory {
                kind: FixtureKind::Gutter,
                label: "Gutter Lights".to_string(),
                allow_fragment: "Add gutter-mounted up lighting at the gutter line, \
                                 washing the second-story facade upward."
                    .to_string(),
                deny_fragment: "Do not add gutter-mounted lighting; the upper facade \
                                above the gutter line stays dark."
                    .to_string(),
                force_dark: None,
                sub_options: vec![
                    SubOption::new(
                        "dormers",
                        "Dormers",
                        "Dormer windows on the roof face",
                        "Light each dormer window from the gutter line directly \
                         below it.",
                        "Leave the dormer windows dark.",
                        3,
                    ),
                    SubOption::new(
                        "peaks",
                        "Upper Peaks",
                        "Gable peaks above the second story",
                        "Wash the upper gable peaks from the gutter line.",
                        "Leave the upper gable peaks dark.",
                        2,
                    ),
                ],
                default_count: 4,
                keywords: vec![
                    "gutter lights".to_string(),
                    "gutter light".to_string(),
                    "gutter".to_string(),
                ],
                placement_rules: vec![
                    PlacementRule::always(
                        "Tuck each housing inside the gutter run so no fixture body is \
                         visible from the street.",
                    ),
                    PlacementRule::when_option(
                        "dormers",
                        "Center exactly one fixture below each dormer window; one \
                         fixture per dormer, never two.",
                    ),
                ],
            },
            // ----------------------------------------------------------------
            // Soffit lights: recessed eave downlights (with force-dark)
            // ----------------------------------------------------------------
            FixtureCategory {
                kind: FixtureKind::Soffit,
                label: "Soffit Lights".to_string(),
                allow_fragment: "Add recessed soffit downlighting: fixtures set into \
                                 the eave soffits casting even light down the walls."
                    .to_string(),
                deny_fragment: "Do not add soffit downlighting; the eaves cast no \
                                downward light."
                    .to_string(),
                force_dark: Some(
                    "If the photo already shows soffit or eave downlights, retouch \
                     them to appear switched off: dark lenses, no glow on the wall \
                     below them."
                        .to_string(),
                ),
                sub_options: vec![],
                default_count: 6,
                keywords: vec![
                    "soffit lights".to_string(),
                    "soffit light".to_string(),
                    "soffits".to_string(),
                    "soffit".to_string(),
                    "down lights".to_string(),
                    "down light".to_string(),
                    "downlights".to_string(),
                    "downlight".to_string(),
                    "eave".to_string(),
                ],
                placement_rules: vec![PlacementRule::always(
                    "Space soffit fixtures evenly along the eave so the wall below \
                     shows a continuous scallop pattern with no gaps.",
                )],
            },
            // ----------------------------------------------------------------
            // Hardscape lights: under-cap wall and step lighting
            // ----------------------------------------------------------------
            FixtureCategory {
                kind: FixtureKind::Hardscape,
                label: "Hardscape Lights".to_string(),
                allow_fragment: "Add hardscape lighting: low-profile linear fixtures \
                                 tucked under wall caps and step treads."
                    .to_string(),
                deny_fragment: "Do not add hardscape lighting; retaining walls, steps, \
                                and seat walls stay unlit."
                    .to_string(),
                force_dark: None,
                sub_options: vec![],
                default_count: 8,
                keywords: vec![
                    "hardscape lights".to_string(),
                    "hardscape".to_string(),
                    "wall lights".to_string(),
                    "wall light".to_string(),
                    "step lights".to_string(),
                    "step light".to_string(),
                ],
                placement_rules: vec![PlacementRule::always(
                    "Mount each fixture under the capstone or tread nose so only the \
                     graze is visible, never the source.",
                )],
            },
            // ----------------------------------------------------------------
            // Core-drill lights: flush in-grade well lights in concrete
            // ----------------------------------------------------------------
            FixtureCategory {
                kind: FixtureKind::CoreDrill,
                label: "Core-Drill Lights".to_string(),
                allow_fragment: "Add core-drilled well lights: flush in-grade fixtures \
                                 recessed into the concrete, grazing the columns and \
                                 walls above them."
                    .to_string(),
                deny_fragment: "Do not add in-grade or well lighting; nothing is \
                                recessed into the flatwork."
                    .to_string(),
                force_dark: None,
                sub_options: vec![],
                default_count: 4,
                keywords: vec![
                    "core drills".to_string(),
                    "core drill".to_string(),
                    "well lights".to_string(),
                    "well light".to_string(),
                    "core".to_string(),
                ],
                placement_rules: vec![PlacementRule::always(
                    "Set each well light flush with the finished surface, centered on \
                     the column or wall face it grazes.",
                )],
            },
        ];

        let gates = vec![
            CrossGate::unless_peer(
                FixtureKind::Gutter,
                FixtureKind::Soffit,
                "Because the soffits are not selected: gutter-line fixtures must \
                 throw no light onto the soffit face or the eave underside; retouch \
                 away any bleed onto the eaves.",
            ),
            CrossGate::unless_peer(
                FixtureKind::Up,
                FixtureKind::Soffit,
                "Because the soffits are not selected: every up light beam terminates \
                 below the eave line, leaving the soffits fully dark.",
            ),
            CrossGate::with_peer(
                FixtureKind::Up,
                FixtureKind::Gutter,
                "With both ground and gutter fixtures present: blend the two washes \
                 so no dark band remains between the first and second stories.",
            ),
        ];

        FixtureCatalog::new(categories, gates)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_has_six_lit_categories() {
        let catalog = FixtureCatalog::standard();
        assert_eq!(catalog.categories().len(), 6);

        // The transformer is a pricing row, never a lit category.
        assert!(catalog.category(FixtureKind::Transformer).is_none());

        // No duplicate kinds.
        for (i, cat) in catalog.categories().iter().enumerate() {
            for other in &catalog.categories()[i + 1..] {
                assert_ne!(cat.kind, other.kind);
            }
        }
    }

    #[test]
    fn test_standard_catalog_fragments_are_complete() {
        let catalog = FixtureCatalog::standard();
        for cat in catalog.categories() {
            assert!(!cat.label.is_empty(), "{} label", cat.kind);
            assert!(!cat.allow_fragment.is_empty(), "{} allow", cat.kind);
            assert!(!cat.deny_fragment.is_empty(), "{} deny", cat.kind);
            assert!(cat.default_count > 0, "{} default count", cat.kind);
            assert!(!cat.keywords.is_empty(), "{} keywords", cat.kind);

            for opt in &cat.sub_options {
                assert!(!opt.allow_fragment.is_empty(), "{}:{}", cat.kind, opt.id);
                assert!(!opt.deny_fragment.is_empty(), "{}:{}", cat.kind, opt.id);
                assert!(opt.estimate_count > 0, "{}:{}", cat.kind, opt.id);
            }
        }
    }

    #[test]
    fn test_sub_option_lookup() {
        let catalog = FixtureCatalog::standard();
        let gutter = catalog.category(FixtureKind::Gutter).unwrap();

        assert!(gutter.has_sub_options());
        assert_eq!(gutter.sub_option("dormers").unwrap().label, "Dormers");
        assert!(gutter.sub_option("chimneys").is_none());

        let path = catalog.category(FixtureKind::Path).unwrap();
        assert!(!path.has_sub_options());
    }

    #[test]
    fn test_standard_gates_reference_catalog_categories() {
        let catalog = FixtureCatalog::standard();
        assert_eq!(catalog.gates().len(), 3);

        for gate in catalog.gates() {
            assert_ne!(gate.subject, gate.peer);
            assert!(catalog.category(gate.subject).is_some());
            assert!(catalog.category(gate.peer).is_some());
            assert!(!gate.text.is_empty());
        }
    }

    #[test]
    fn test_placement_rule_constructors() {
        let always = PlacementRule::always("spacing rule");
        assert_eq!(always.trigger, RuleTrigger::Always);

        let scoped = PlacementRule::when_option("dormers", "centering rule");
        assert_eq!(
            scoped.trigger,
            RuleTrigger::OptionChosen("dormers".to_string())
        );
    }
}
