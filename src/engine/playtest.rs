//! Goldfishing helpers: shuffle a deck's flat expansion and draw from it.

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::models::{CardRecord, Deck};

/// An owned pile of cards for playtesting.
///
/// Built from a deck's flat expansion; drawing from the pile never
/// touches the deck it came from.
#[derive(Debug, Clone, Default)]
pub struct Pile {
    cards: Vec<CardRecord>,
}

impl Pile {
    /// Build a pile from a deck, one card per copy.
    pub fn from_deck(deck: &Deck) -> Self {
        Self {
            cards: deck.flat_cards(),
        }
    }

    /// Shuffle the pile in place.
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut thread_rng());
    }

    /// Draw the top card; `None` once the pile is empty.
    pub fn draw(&mut self) -> Option<CardRecord> {
        self.cards.pop()
    }

    /// Cards left in the pile.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
