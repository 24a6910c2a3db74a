//! Tests for the deck model: entry bookkeeping, format parsing, and the
//! persistence shapes.

mod common;

use deckstack::{Deck, Format, SavedDeck};

// ---------------------------------------------------------------------------
// Format
// ---------------------------------------------------------------------------

#[test]
fn format_from_name_parses_known_formats() {
    assert_eq!(Format::from_name("commander"), Format::Commander);
    assert_eq!(Format::from_name("Modern"), Format::Modern);
    assert_eq!(Format::from_name("  PAUPER  "), Format::Pauper);
}

#[test]
fn format_from_name_accepts_edh_alias() {
    assert_eq!(Format::from_name("edh"), Format::Commander);
    assert_eq!(Format::from_name("EDH"), Format::Commander);
}

#[test]
fn format_from_name_maps_unknown_to_unspecified() {
    assert_eq!(Format::from_name("tiny-leaders"), Format::Unspecified);
    assert_eq!(Format::from_name(""), Format::Unspecified);
}

#[test]
fn format_name_round_trips_through_from_name() {
    for format in Format::ALL {
        assert_eq!(Format::from_name(format.name()), format);
    }
}

#[test]
fn only_commander_and_brawl_designate_a_commander() {
    assert!(Format::Commander.has_commander());
    assert!(Format::Brawl.has_commander());
    assert!(!Format::Modern.has_commander());
    assert!(!Format::Unspecified.has_commander());
}

#[test]
fn format_serializes_as_lowercase_string() {
    assert_eq!(
        serde_json::to_string(&Format::Commander).unwrap(),
        "\"commander\""
    );
    let back: Format = serde_json::from_str("\"brawl\"").unwrap();
    assert_eq!(back, Format::Brawl);
}

// ---------------------------------------------------------------------------
// Deck::new / display_name
// ---------------------------------------------------------------------------

#[test]
fn new_deck_starts_empty() {
    let deck = Deck::new("Burn");
    assert_eq!(deck.name, "Burn");
    assert!(deck.is_empty());
    assert_eq!(deck.total_count(), 0);
    assert!(deck.entries().is_empty());
}

#[test]
fn display_name_falls_back_for_blank_names() {
    assert_eq!(Deck::new("Burn").display_name(), "Burn");
    assert_eq!(Deck::new("").display_name(), "Unnamed Deck");
    assert_eq!(Deck::new("   ").display_name(), "Unnamed Deck");
}

// ---------------------------------------------------------------------------
// add_card / remove_card / count_of
// ---------------------------------------------------------------------------

#[test]
fn add_card_appends_new_entries_in_order() {
    let mut deck = Deck::new("Test");
    deck.add_card(common::card("Shock", "Instant"));
    deck.add_card(common::card("Forest", "Basic Land \u{2014} Forest"));

    assert_eq!(deck.entries().len(), 2);
    assert_eq!(deck.entries()[0].card.name, "Shock");
    assert_eq!(deck.entries()[1].card.name, "Forest");
}

#[test]
fn add_card_merges_same_identity_into_one_entry() {
    let mut deck = Deck::new("Test");
    deck.add_card(common::card("Shock", "Instant"));
    deck.add_card(common::card("shock", "Instant"));
    deck.add_card(common::card("  SHOCK  ", "Instant"));

    assert_eq!(deck.entries().len(), 1);
    assert_eq!(deck.entries()[0].count, 3);
    assert_eq!(deck.total_count(), 3);
}

#[test]
fn count_of_ignores_case_and_padding() {
    let mut deck = Deck::new("Test");
    deck.add_card(common::card("Sol Ring", "Artifact"));
    deck.add_card(common::card("Sol Ring", "Artifact"));

    assert_eq!(deck.count_of("sol ring"), 2);
    assert_eq!(deck.count_of(" SOL RING "), 2);
    assert_eq!(deck.count_of("Mox Opal"), 0);
}

#[test]
fn remove_card_decrements_before_dropping() {
    let mut deck = Deck::new("Test");
    deck.add_card(common::card("Shock", "Instant"));
    deck.add_card(common::card("Shock", "Instant"));

    deck.remove_card("Shock");
    assert_eq!(deck.count_of("Shock"), 1);
    assert_eq!(deck.entries().len(), 1);

    deck.remove_card("shock");
    assert_eq!(deck.count_of("Shock"), 0);
    assert!(deck.is_empty());
}

#[test]
fn remove_card_keeps_remaining_order() {
    let mut deck = Deck::new("Test");
    deck.add_card(common::card("Shock", "Instant"));
    deck.add_card(common::card("Forest", "Basic Land \u{2014} Forest"));
    deck.add_card(common::card("Sol Ring", "Artifact"));

    deck.remove_card("Forest");
    let names: Vec<&str> = deck.entries().iter().map(|e| e.card.name.as_str()).collect();
    assert_eq!(names, ["Shock", "Sol Ring"]);
}

#[test]
fn remove_card_is_a_no_op_for_absent_names() {
    let mut deck = Deck::new("Test");
    deck.add_card(common::card("Shock", "Instant"));

    deck.remove_card("Counterspell");
    assert_eq!(deck.total_count(), 1);
}

#[test]
fn add_then_remove_restores_the_previous_state() {
    let mut deck = Deck::new("Test");
    deck.add_card(common::card("Shock", "Instant"));
    deck.add_card(common::card("Forest", "Basic Land \u{2014} Forest"));
    let before: Vec<(String, u32)> = deck
        .entries()
        .iter()
        .map(|e| (e.card.name.clone(), e.count))
        .collect();

    deck.add_card(common::card("Opt", "Instant"));
    deck.remove_card("Opt");

    let after: Vec<(String, u32)> = deck
        .entries()
        .iter()
        .map(|e| (e.card.name.clone(), e.count))
        .collect();
    assert_eq!(before, after);
}

// ---------------------------------------------------------------------------
// replace_all / clear / flat_cards
// ---------------------------------------------------------------------------

#[test]
fn replace_all_rebuilds_counts_from_a_flat_list() {
    let mut deck = Deck::new("Test");
    deck.add_card(common::card("Old Card", "Instant"));

    deck.replace_all(vec![
        common::card("Island", "Basic Land \u{2014} Island"),
        common::card("Island", "Basic Land \u{2014} Island"),
        common::card("Opt", "Instant"),
    ]);

    assert_eq!(deck.entries().len(), 2);
    assert_eq!(deck.count_of("Island"), 2);
    assert_eq!(deck.count_of("Opt"), 1);
    assert_eq!(deck.count_of("Old Card"), 0);
}

#[test]
fn clear_drops_entries_but_keeps_metadata() {
    let mut deck = Deck::new("Elves");
    deck.description = "Mono green".to_string();
    deck.format = Format::Commander;
    deck.commander_name = Some("Ezuri, Renegade Leader".to_string());
    deck.add_card(common::card("Llanowar Elves", "Creature \u{2014} Elf Druid"));

    deck.clear();

    assert!(deck.is_empty());
    assert_eq!(deck.name, "Elves");
    assert_eq!(deck.description, "Mono green");
    assert_eq!(deck.format, Format::Commander);
    assert_eq!(deck.commander_name.as_deref(), Some("Ezuri, Renegade Leader"));
}

#[test]
fn flat_cards_expands_counts_in_entry_order() {
    let mut deck = Deck::new("Test");
    deck.add_card(common::card("Shock", "Instant"));
    deck.add_card(common::card("Forest", "Basic Land \u{2014} Forest"));
    deck.add_card(common::card("Forest", "Basic Land \u{2014} Forest"));

    let flat = deck.flat_cards();
    let names: Vec<&str> = flat.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Shock", "Forest", "Forest"]);
}

// ---------------------------------------------------------------------------
// SavedDeck
// ---------------------------------------------------------------------------

#[test]
fn saved_deck_round_trips_counts_and_metadata() {
    let mut deck = Deck::new("Izzet Spells");
    deck.description = "Draw and burn".to_string();
    deck.format = Format::Brawl;
    deck.commander_name = Some("Niv-Mizzet, Parun".to_string());
    deck.add_card(common::card("Shock", "Instant"));
    deck.add_card(common::card("Shock", "Instant"));
    deck.add_card(common::card("Island", "Basic Land \u{2014} Island"));

    let restored = SavedDeck::from_deck(&deck).into_deck();

    assert_eq!(restored.name, "Izzet Spells");
    assert_eq!(restored.description, "Draw and burn");
    assert_eq!(restored.format, Format::Brawl);
    assert_eq!(restored.commander_name.as_deref(), Some("Niv-Mizzet, Parun"));
    assert_eq!(restored.count_of("Shock"), 2);
    assert_eq!(restored.count_of("Island"), 1);
    assert_eq!(restored.total_count(), 3);
}

#[test]
fn saved_deck_serializes_with_camel_case_keys() {
    let mut deck = Deck::new("Test");
    deck.commander_name = Some("Atraxa, Praetors' Voice".to_string());
    let value = serde_json::to_value(SavedDeck::from_deck(&deck)).unwrap();

    assert!(value.get("commanderName").is_some());
    assert!(value.get("cards").is_some());
    assert_eq!(value["format"], "unspecified");
}
