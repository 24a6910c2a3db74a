//! Format rules: commander exclusion for stacking, and deck legality
//! validation for commander-style formats.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{normalize_name, Deck, DeckEntry, Format};

// ---------------------------------------------------------------------------
// Exclusions
// ---------------------------------------------------------------------------

/// Normalized identities excluded from visual stacking.
///
/// Statistics never consult this set; a commander counts toward stats
/// while being kept out of its type column.
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    names: HashSet<String>,
}

impl Exclusions {
    /// The empty exclusion set.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether `name` (normalized) is excluded.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&normalize_name(name))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

/// Decide which identities the stack must set aside.
///
/// Only commander-style formats exclude anything, and only when a
/// commander name is set (non-empty after trimming) and an entry matches
/// it exactly (trim/case-insensitive on the full name, not substring).
/// No match means nothing is excluded; the deck is never mutated.
pub fn resolve(entries: &[DeckEntry], format: Format, commander_name: Option<&str>) -> Exclusions {
    let mut exclusions = Exclusions::default();
    if !format.has_commander() {
        return exclusions;
    }
    let commander = match commander_name.map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => return exclusions,
    };
    let wanted = normalize_name(commander);
    if entries.iter().any(|e| e.card.normalized_name() == wanted) {
        exclusions.names.insert(wanted);
    }
    exclusions
}

// ---------------------------------------------------------------------------
// Legality validation
// ---------------------------------------------------------------------------

/// Identities allowed any number of copies under the singleton rule:
/// basic lands, their snow-covered variants, and the printed exceptions.
pub const SINGLETON_EXCEPTIONS: [&str; 15] = [
    "plains",
    "island",
    "swamp",
    "mountain",
    "forest",
    "snow-covered plains",
    "snow-covered island",
    "snow-covered swamp",
    "snow-covered mountain",
    "snow-covered forest",
    "persistent petitioners",
    "dragon's approach",
    "rat colony",
    "relentless rats",
    "shadowborn apostle",
];

/// Commander-format deck size, commander included.
const COMMANDER_DECK_SIZE: u32 = 100;

/// One failed construction check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleViolation {
    pub rule: &'static str,
    pub message: String,
}

/// Check a deck against its format's construction rules.
///
/// Validation is advisory and only defined for commander-style formats;
/// every other format returns no violations. An empty vector means the
/// deck passed. The checks:
///
/// * `commander` - the commander name is set and present in the deck
/// * `deck-size` - total card count is exactly 100
/// * `banned` - no card carries a non-`"legal"` status for this format
///   (cards without legality data are not flagged)
/// * `singleton` - no identity above one copy, [`SINGLETON_EXCEPTIONS`]
///   aside
/// * `color-identity` - every card's color identity fits inside the
///   commander's (skipped when the commander is not in the deck)
pub fn validate(deck: &Deck) -> Vec<RuleViolation> {
    let mut violations = Vec::new();
    if !deck.format.has_commander() {
        return violations;
    }

    let commander_key = deck
        .commander_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(normalize_name);

    let commander_entry = commander_key.as_ref().and_then(|key| {
        deck.entries()
            .iter()
            .find(|e| &e.card.normalized_name() == key)
    });

    if commander_entry.is_none() {
        violations.push(RuleViolation {
            rule: "commander",
            message: "Commander not in deck".to_string(),
        });
    }

    let total = deck.total_count();
    if total != COMMANDER_DECK_SIZE {
        violations.push(RuleViolation {
            rule: "deck-size",
            message: format!(
                "Deck has to be: {}, but has {} cards.",
                COMMANDER_DECK_SIZE, total
            ),
        });
    }

    let format_key = deck.format.name();
    let banned: Vec<&str> = deck
        .entries()
        .iter()
        .filter(|e| {
            e.card
                .legalities
                .as_ref()
                .and_then(|l| l.get(format_key))
                .and_then(|status| status.as_str())
                .map(|status| status != "legal")
                .unwrap_or(false)
        })
        .map(|e| e.card.name.as_str())
        .collect();
    if !banned.is_empty() {
        violations.push(RuleViolation {
            rule: "banned",
            message: format!("Contains banned cards: {}", banned.join(", ")),
        });
    }

    let duplicates: Vec<&str> = deck
        .entries()
        .iter()
        .filter(|e| {
            e.count > 1 && !SINGLETON_EXCEPTIONS.contains(&e.card.normalized_name().as_str())
        })
        .map(|e| e.card.name.as_str())
        .collect();
    if !duplicates.is_empty() {
        violations.push(RuleViolation {
            rule: "singleton",
            message: format!("Contains duplicates: {}", duplicates.join(", ")),
        });
    }

    if let Some(commander) = commander_entry {
        let identity: HashSet<&str> = commander
            .card
            .color_identity
            .iter()
            .map(String::as_str)
            .collect();
        let off_color: Vec<&str> = deck
            .entries()
            .iter()
            .filter(|e| {
                e.card
                    .color_identity
                    .iter()
                    .any(|color| !identity.contains(color.as_str()))
            })
            .map(|e| e.card.name.as_str())
            .collect();
        if !off_color.is_empty() {
            violations.push(RuleViolation {
                rule: "color-identity",
                message: format!(
                    "Cards with invalid color identity: {}",
                    off_color.join(", ")
                ),
            });
        }
    }

    violations
}
