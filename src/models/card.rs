use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// CardRecord: one card as the catalog (or any other source) delivers it
// ---------------------------------------------------------------------------

/// A single card record.
///
/// `name` is the identity key; everything else is optional because sources
/// vary in what they populate. The catalog fills both `card_type` and
/// `type_line` from the snapshot's type line; other sources may set either.
/// Deck identity is the normalized name (see [`normalize_name`]), never
/// object identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub name: String,
    pub card_type: Option<String>,
    pub type_line: Option<String>,
    pub image: Option<String>,
    pub mana_cost: Option<String>,
    pub cmc: Option<f64>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub color_identity: Vec<String>,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub oracle_text: Option<String>,
    pub loyalty: Option<String>,
    pub layout: Option<String>,
    pub artist: Option<String>,
    pub scryfall_id: Option<String>,
    pub legalities: Option<serde_json::Value>,
}

/// Passthrough fields surfaced in card detail views, in display order.
pub const DETAIL_FIELDS: [&str; 8] = [
    "Mana Cost",
    "CMC",
    "Power",
    "Toughness",
    "Oracle Text",
    "Loyalty",
    "Artist",
    "Layout",
];

impl CardRecord {
    /// The card's identity key for deck purposes.
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Rows for a card detail panel: one `(label, value)` pair per present
    /// field, iterating [`DETAIL_FIELDS`] in order. Absent fields produce
    /// no row.
    pub fn detail_rows(&self) -> Vec<(&'static str, String)> {
        DETAIL_FIELDS
            .iter()
            .filter_map(|&label| self.detail_value(label).map(|value| (label, value)))
            .collect()
    }

    fn detail_value(&self, label: &str) -> Option<String> {
        match label {
            "Mana Cost" => self.mana_cost.clone(),
            "CMC" => self.cmc.map(|c| c.to_string()),
            "Power" => self.power.clone(),
            "Toughness" => self.toughness.clone(),
            "Oracle Text" => self.oracle_text.clone(),
            "Loyalty" => self.loyalty.clone(),
            "Artist" => self.artist.clone(),
            "Layout" => self.layout.clone(),
            _ => None,
        }
    }
}

/// Normalize a card name for identity comparisons: trimmed and lowercased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
