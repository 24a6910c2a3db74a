//! Deck statistics over the unfiltered entry list.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{CardRecord, DeckEntry};

/// Card types counted as permanents for statistics.
///
/// Defined independently of the stacking buckets: Battle is a permanent
/// type but has no stack column.
pub const PERMANENT_TYPES: [&str; 6] = [
    "Creature",
    "Artifact",
    "Enchantment",
    "Planeswalker",
    "Land",
    "Battle",
];

/// Count-based deck metrics.
///
/// Percentages are pre-rendered to one decimal place (`"75.0"`); an empty
/// deck renders them as `"0"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStats {
    pub card_count: u32,
    pub land_count: u32,
    pub land_percent: String,
    pub permanent_count: u32,
    pub permanent_percent: String,
}

/// Compute statistics over all entries.
///
/// Stats are unfiltered: a designated commander counts here even though
/// stacking sets it aside. Total: an empty deck yields zero counts and
/// `"0"` percentages, never a division error.
pub fn compute_stats(entries: &[DeckEntry]) -> DeckStats {
    let card_count: u32 = entries.iter().map(|e| e.count).sum();
    let land_count: u32 = entries
        .iter()
        .filter(|e| has_type(&e.card, "land"))
        .map(|e| e.count)
        .sum();
    let permanent_count: u32 = entries
        .iter()
        .filter(|e| PERMANENT_TYPES.iter().any(|t| has_type(&e.card, t)))
        .map(|e| e.count)
        .sum();

    DeckStats {
        card_count,
        land_count,
        land_percent: percent(land_count, card_count),
        permanent_count,
        permanent_percent: percent(permanent_count, card_count),
    }
}

/// Mana curve: unit counts keyed by rounded converted mana cost. Entries
/// with a missing or zero cmc are skipped.
pub fn mana_curve(entries: &[DeckEntry]) -> BTreeMap<u32, u32> {
    let mut curve = BTreeMap::new();
    for entry in entries {
        let Some(cmc) = entry.card.cmc else { continue };
        if cmc <= 0.0 {
            continue;
        }
        *curve.entry(cmc.round() as u32).or_insert(0) += entry.count;
    }
    curve
}

/// Whether either type field contains `needle`, case-insensitively.
fn has_type(card: &CardRecord, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    [card.card_type.as_deref(), card.type_line.as_deref()]
        .into_iter()
        .flatten()
        .any(|text| text.to_lowercase().contains(&needle))
}

fn percent(part: u32, whole: u32) -> String {
    if whole == 0 {
        "0".to_string()
    } else {
        format!("{:.1}", f64::from(part) * 100.0 / f64::from(whole))
    }
}
