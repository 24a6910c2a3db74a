//! The deck composition and presentation engine.
//!
//! Pure derivations over the deck model: major-type classification,
//! format rules, stack grouping, statistics, and playtest piles. Nothing
//! here performs I/O or fails; degenerate inputs yield degenerate but
//! valid outputs (empty columns, zero stats, empty exclusion sets).

pub mod classify;
pub mod playtest;
pub mod rules;
pub mod stacking;
pub mod stats;

pub use classify::{classify, TypeBucket, MAJOR_TYPES};
pub use playtest::Pile;
pub use rules::{resolve, validate, Exclusions, RuleViolation, SINGLETON_EXCEPTIONS};
pub use stacking::{group_for_display, StackColumn, StackLayout, StackSlot};
pub use stats::{compute_stats, mana_curve, DeckStats, PERMANENT_TYPES};
