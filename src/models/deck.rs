use std::fmt;

use serde::{Deserialize, Serialize};

use super::card::{normalize_name, CardRecord};

// ---------------------------------------------------------------------------
// Format
// ---------------------------------------------------------------------------

/// Constructed formats a deck can be built for.
///
/// `Unspecified` is the default for decks that have not picked a format
/// yet; it carries no rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Commander,
    Standard,
    Modern,
    Pioneer,
    Legacy,
    Vintage,
    Pauper,
    Brawl,
    Historic,
    Alchemy,
    #[default]
    Unspecified,
}

impl Format {
    /// All named formats, for format pickers. `Unspecified` is not listed.
    pub const ALL: [Format; 10] = [
        Format::Commander,
        Format::Standard,
        Format::Modern,
        Format::Pioneer,
        Format::Legacy,
        Format::Vintage,
        Format::Pauper,
        Format::Brawl,
        Format::Historic,
        Format::Alchemy,
    ];

    /// Whether this format designates a commander card.
    pub fn has_commander(self) -> bool {
        matches!(self, Format::Commander | Format::Brawl)
    }

    /// Canonical lowercase name, matching the key used in card legalities.
    pub fn name(self) -> &'static str {
        match self {
            Format::Commander => "commander",
            Format::Standard => "standard",
            Format::Modern => "modern",
            Format::Pioneer => "pioneer",
            Format::Legacy => "legacy",
            Format::Vintage => "vintage",
            Format::Pauper => "pauper",
            Format::Brawl => "brawl",
            Format::Historic => "historic",
            Format::Alchemy => "alchemy",
            Format::Unspecified => "unspecified",
        }
    }

    /// Parse a format name, case-insensitively. `"edh"` is accepted as an
    /// alias for commander; anything unrecognized maps to `Unspecified`.
    pub fn from_name(name: &str) -> Format {
        match name.trim().to_lowercase().as_str() {
            "commander" | "edh" => Format::Commander,
            "standard" => Format::Standard,
            "modern" => Format::Modern,
            "pioneer" => Format::Pioneer,
            "legacy" => Format::Legacy,
            "vintage" => Format::Vintage,
            "pauper" => Format::Pauper,
            "brawl" => Format::Brawl,
            "historic" => Format::Historic,
            "alchemy" => Format::Alchemy,
            _ => Format::Unspecified,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// DeckEntry
// ---------------------------------------------------------------------------

/// One deck line: a card and how many copies the deck runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: CardRecord,
    pub count: u32,
}

// ---------------------------------------------------------------------------
// Deck
// ---------------------------------------------------------------------------

/// The deck under construction.
///
/// Entries are kept in insertion order with at most one entry per
/// normalized card name; the entry list is only reachable through the
/// operations below, which maintain that invariant. Metadata
/// (name, description, format, commander) is plain public state.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    pub name: String,
    pub description: String,
    pub format: Format,
    pub commander_name: Option<String>,
    entries: Vec<DeckEntry>,
}

impl Deck {
    /// Create an empty deck with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// The deck's name for display; `"Unnamed Deck"` when no name is set.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "Unnamed Deck"
        } else {
            &self.name
        }
    }

    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all entry counts.
    pub fn total_count(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// How many copies of `name` the deck runs (0 when absent).
    pub fn count_of(&self, name: &str) -> u32 {
        let key = normalize_name(name);
        self.entries
            .iter()
            .find(|e| e.card.normalized_name() == key)
            .map(|e| e.count)
            .unwrap_or(0)
    }

    /// Add one copy of a card.
    ///
    /// An existing entry with the same identity is incremented in place
    /// and keeps its position; otherwise a new entry is appended with
    /// count 1.
    pub fn add_card(&mut self, card: CardRecord) {
        let key = card.normalized_name();
        match self
            .entries
            .iter_mut()
            .find(|e| e.card.normalized_name() == key)
        {
            Some(entry) => entry.count += 1,
            None => self.entries.push(DeckEntry { card, count: 1 }),
        }
    }

    /// Remove one copy of the named card.
    ///
    /// A count above 1 is decremented; a count of 1 drops the entry, with
    /// the order of the remaining entries unchanged. Removing a name the
    /// deck does not contain is a no-op.
    pub fn remove_card(&mut self, name: &str) {
        let key = normalize_name(name);
        if let Some(pos) = self
            .entries
            .iter()
            .position(|e| e.card.normalized_name() == key)
        {
            if self.entries[pos].count > 1 {
                self.entries[pos].count -= 1;
            } else {
                self.entries.remove(pos);
            }
        }
    }

    /// Rebuild the deck from a flat card list, as delivered by a load or
    /// upload. Prior entries are discarded; repeated identities in the
    /// list become counts.
    pub fn replace_all(&mut self, cards: Vec<CardRecord>) {
        self.entries.clear();
        for card in cards {
            self.add_card(card);
        }
    }

    /// Drop all entries. Metadata is untouched.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Flat expansion: one record per copy, entry order preserved. This is
    /// the shape persistence and playtesting consume.
    pub fn flat_cards(&self) -> Vec<CardRecord> {
        let mut out = Vec::with_capacity(self.total_count() as usize);
        for entry in &self.entries {
            for _ in 0..entry.count {
                out.push(entry.card.clone());
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// SavedDeck / DeckSummary: the persistence shapes
// ---------------------------------------------------------------------------

/// A deck as written to and read from the store: metadata plus the flat
/// card list (counts are recovered on load via [`Deck::replace_all`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDeck {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub format: Format,
    pub commander_name: Option<String>,
    #[serde(default)]
    pub cards: Vec<CardRecord>,
}

impl SavedDeck {
    pub fn from_deck(deck: &Deck) -> Self {
        Self {
            name: deck.name.clone(),
            description: deck.description.clone(),
            format: deck.format,
            commander_name: deck.commander_name.clone(),
            cards: deck.flat_cards(),
        }
    }

    pub fn into_deck(self) -> Deck {
        let mut deck = Deck {
            name: self.name,
            description: self.description,
            format: self.format,
            commander_name: self.commander_name,
            entries: Vec::new(),
        };
        deck.replace_all(self.cards);
        deck
    }
}

/// One row of the saved-deck listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckSummary {
    pub name: String,
    #[serde(default)]
    pub description: String,
}
