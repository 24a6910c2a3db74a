//! Boundary for turning raw deck-list text into card records.
//!
//! The crate ships no parser; embedding applications implement
//! [`DecklistSource`] against whatever list format and card resolution
//! they support, and the deck drives it through
//! [`Deck::replace_from_source`].

use crate::error::Result;
use crate::models::{CardRecord, Deck, Format};

/// Resolves raw deck-list text into a flat list of card records.
///
/// `format` and `commander_name` carry the deck context so an
/// implementation can resolve format-specific lines (a commander header,
/// for instance) correctly.
pub trait DecklistSource {
    /// Resolve `raw` into one card record per unit.
    ///
    /// Errors are structured (`InvalidArgument` for malformed input,
    /// `NotFound` for unresolvable names is the expected convention).
    fn resolve(
        &self,
        raw: &str,
        format: Format,
        commander_name: Option<&str>,
    ) -> Result<Vec<CardRecord>>;
}

impl Deck {
    /// Replace this deck's entries from a resolved deck list.
    ///
    /// Resolution runs first; the deck is only touched when it succeeds,
    /// so a failed upload leaves the current deck intact.
    pub fn replace_from_source<S: DecklistSource + ?Sized>(
        &mut self,
        source: &S,
        raw: &str,
    ) -> Result<()> {
        let cards = source.resolve(raw, self.format, self.commander_name.as_deref())?;
        self.replace_all(cards);
        Ok(())
    }
}
