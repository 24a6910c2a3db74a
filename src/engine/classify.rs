//! Major-type classification for the visual stack.

use std::fmt;

use serde::Serialize;

use crate::models::CardRecord;

// ---------------------------------------------------------------------------
// TypeBucket
// ---------------------------------------------------------------------------

/// One of the seven display categories the stack groups cards into.
///
/// Declaration order is classification priority order and matches
/// [`MAJOR_TYPES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TypeBucket {
    Creature,
    Instant,
    Sorcery,
    Artifact,
    Enchantment,
    Planeswalker,
    Land,
}

/// Stacking buckets in classification priority order: the first bucket
/// whose name appears in a card's type text wins.
pub const MAJOR_TYPES: [TypeBucket; 7] = [
    TypeBucket::Creature,
    TypeBucket::Instant,
    TypeBucket::Sorcery,
    TypeBucket::Artifact,
    TypeBucket::Enchantment,
    TypeBucket::Planeswalker,
    TypeBucket::Land,
];

impl TypeBucket {
    /// Display label, e.g. `"Creature"`.
    pub fn label(self) -> &'static str {
        match self {
            TypeBucket::Creature => "Creature",
            TypeBucket::Instant => "Instant",
            TypeBucket::Sorcery => "Sorcery",
            TypeBucket::Artifact => "Artifact",
            TypeBucket::Enchantment => "Enchantment",
            TypeBucket::Planeswalker => "Planeswalker",
            TypeBucket::Land => "Land",
        }
    }

    /// Lowercase needle matched against lowercased type text.
    fn marker(self) -> &'static str {
        match self {
            TypeBucket::Creature => "creature",
            TypeBucket::Instant => "instant",
            TypeBucket::Sorcery => "sorcery",
            TypeBucket::Artifact => "artifact",
            TypeBucket::Enchantment => "enchantment",
            TypeBucket::Planeswalker => "planeswalker",
            TypeBucket::Land => "land",
        }
    }
}

impl fmt::Display for TypeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// classify
// ---------------------------------------------------------------------------

/// Map a card to its major-type bucket, or `None`.
///
/// The type text is `card_type` when present, else `type_line`; buckets
/// are tried in [`MAJOR_TYPES`] order and the first case-insensitive
/// substring match wins. A card with no type text, or whose text matches
/// no bucket, has no bucket. Total: never fails.
pub fn classify(card: &CardRecord) -> Option<TypeBucket> {
    let text = card.card_type.as_deref().or(card.type_line.as_deref())?;
    let text = text.to_lowercase();
    MAJOR_TYPES
        .into_iter()
        .find(|bucket| text.contains(bucket.marker()))
}
