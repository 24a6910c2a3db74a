//! Tests for the stack grouping engine: column partitioning, slot
//! merging, commander exclusion, and selection promotion.

mod common;

use deckstack::engine::{group_for_display, resolve, Exclusions, TypeBucket};
use deckstack::{Deck, Format};

fn sample_deck() -> Deck {
    let mut deck = Deck::new("Mixed");
    deck.add_card(common::card("Llanowar Elves", "Creature \u{2014} Elf Druid"));
    deck.add_card(common::card("Shock", "Instant"));
    deck.add_card(common::card("Forest", "Basic Land \u{2014} Forest"));
    deck.add_card(common::card("Forest", "Basic Land \u{2014} Forest"));
    deck.add_card(common::card("Sol Ring", "Artifact"));
    deck
}

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

#[test]
fn layout_always_has_seven_columns() {
    let deck = Deck::new("Empty");
    let layout = group_for_display(deck.entries(), &Exclusions::none(), None);

    assert_eq!(layout.columns().len(), 7);
    assert!(layout.is_empty());
    assert_eq!(layout.classified_units(), 0);
}

#[test]
fn columns_come_back_in_display_order() {
    let deck = sample_deck();
    let layout = group_for_display(deck.entries(), &Exclusions::none(), None);

    let buckets: Vec<TypeBucket> = layout.columns().iter().map(|c| c.bucket).collect();
    assert_eq!(
        buckets,
        [
            TypeBucket::Creature,
            TypeBucket::Instant,
            TypeBucket::Sorcery,
            TypeBucket::Artifact,
            TypeBucket::Enchantment,
            TypeBucket::Planeswalker,
            TypeBucket::Land,
        ]
    );
}

#[test]
fn cards_land_in_their_type_columns() {
    let deck = sample_deck();
    let layout = group_for_display(deck.entries(), &Exclusions::none(), None);

    assert_eq!(layout.column(TypeBucket::Creature).slots.len(), 1);
    assert_eq!(layout.column(TypeBucket::Instant).slots.len(), 1);
    assert_eq!(layout.column(TypeBucket::Artifact).slots.len(), 1);
    assert_eq!(layout.column(TypeBucket::Land).slots.len(), 1);
    assert!(layout.column(TypeBucket::Sorcery).is_empty());
    assert!(layout.column(TypeBucket::Enchantment).is_empty());
    assert!(layout.column(TypeBucket::Planeswalker).is_empty());
}

#[test]
fn copies_merge_into_one_slot_with_a_count() {
    let deck = sample_deck();
    let layout = group_for_display(deck.entries(), &Exclusions::none(), None);

    let lands = layout.column(TypeBucket::Land);
    assert_eq!(lands.slots.len(), 1);
    assert_eq!(lands.slots[0].card.name, "Forest");
    assert_eq!(lands.slots[0].count, 2);
    assert_eq!(lands.unit_count(), 2);
}

#[test]
fn three_islands_and_a_shock_make_two_slots() {
    let mut deck = Deck::new("Test");
    deck.add_card(common::card("Island", "Basic Land \u{2014} Island"));
    deck.add_card(common::card("Island", "Basic Land \u{2014} Island"));
    deck.add_card(common::card("Island", "Basic Land \u{2014} Island"));
    deck.add_card(common::card("Shock", "Instant"));

    let layout = group_for_display(deck.entries(), &Exclusions::none(), None);
    assert_eq!(layout.column(TypeBucket::Land).slots.len(), 1);
    assert_eq!(layout.column(TypeBucket::Land).slots[0].count, 3);
    assert_eq!(layout.column(TypeBucket::Instant).slots.len(), 1);
    assert_eq!(layout.classified_units(), 4);
}

#[test]
fn unclassified_cards_fall_out_of_the_layout() {
    let mut deck = sample_deck();
    deck.add_card(common::card("Backup Plan", "Conspiracy"));

    let layout = group_for_display(deck.entries(), &Exclusions::none(), None);
    // Five classified units; the conspiracy is in the deck but not the stack.
    assert_eq!(layout.classified_units(), 5);
    assert_eq!(deck.total_count(), 6);
}

#[test]
fn classified_units_equal_the_sum_over_columns() {
    let deck = sample_deck();
    let layout = group_for_display(deck.entries(), &Exclusions::none(), None);

    let by_column: u32 = layout.columns().iter().map(|c| c.unit_count()).sum();
    assert_eq!(layout.classified_units(), by_column);
    assert_eq!(by_column, deck.total_count());
}

// ---------------------------------------------------------------------------
// Exclusions
// ---------------------------------------------------------------------------

#[test]
fn excluded_commander_is_kept_out_of_the_stack() {
    let mut deck = sample_deck();
    deck.format = Format::Commander;
    deck.commander_name = Some("Ezuri, Renegade Leader".to_string());
    deck.add_card(common::card(
        "Ezuri, Renegade Leader",
        "Legendary Creature \u{2014} Elf Warrior",
    ));

    let exclusions = resolve(deck.entries(), deck.format, deck.commander_name.as_deref());
    let layout = group_for_display(deck.entries(), &exclusions, None);

    let creatures = layout.column(TypeBucket::Creature);
    assert_eq!(creatures.slots.len(), 1);
    assert_eq!(creatures.slots[0].card.name, "Llanowar Elves");
    assert_eq!(layout.classified_units(), deck.total_count() - 1);
}

#[test]
fn no_exclusions_means_every_classified_card_is_stacked() {
    let mut deck = sample_deck();
    deck.add_card(common::card(
        "Ezuri, Renegade Leader",
        "Legendary Creature \u{2014} Elf Warrior",
    ));

    let layout = group_for_display(deck.entries(), &Exclusions::none(), None);
    assert_eq!(layout.column(TypeBucket::Creature).slots.len(), 2);
}

// ---------------------------------------------------------------------------
// Selection promotion
// ---------------------------------------------------------------------------

#[test]
fn selected_slot_moves_to_the_top_of_its_column() {
    let mut deck = Deck::new("Test");
    deck.add_card(common::card("Llanowar Elves", "Creature \u{2014} Elf Druid"));
    deck.add_card(common::card("Grizzly Bears", "Creature \u{2014} Bear"));
    deck.add_card(common::card("Elvish Mystic", "Creature \u{2014} Elf Druid"));

    let layout = group_for_display(deck.entries(), &Exclusions::none(), Some("Grizzly Bears"));
    let names: Vec<&str> = layout
        .column(TypeBucket::Creature)
        .slots
        .iter()
        .map(|s| s.card.name.as_str())
        .collect();

    // The selected card renders last (on top); the rest keep their order.
    assert_eq!(names, ["Llanowar Elves", "Elvish Mystic", "Grizzly Bears"]);
}

#[test]
fn selection_matching_is_normalized() {
    let mut deck = Deck::new("Test");
    deck.add_card(common::card("Llanowar Elves", "Creature \u{2014} Elf Druid"));
    deck.add_card(common::card("Grizzly Bears", "Creature \u{2014} Bear"));

    let layout = group_for_display(deck.entries(), &Exclusions::none(), Some("  LLANOWAR elves "));
    let creatures = layout.column(TypeBucket::Creature);
    assert_eq!(creatures.slots.last().unwrap().card.name, "Llanowar Elves");
}

#[test]
fn selecting_an_absent_card_changes_nothing() {
    let deck = sample_deck();
    let plain = group_for_display(deck.entries(), &Exclusions::none(), None);
    let selected = group_for_display(deck.entries(), &Exclusions::none(), Some("Black Lotus"));

    for (a, b) in plain.columns().iter().zip(selected.columns().iter()) {
        let left: Vec<&str> = a.slots.iter().map(|s| s.card.name.as_str()).collect();
        let right: Vec<&str> = b.slots.iter().map(|s| s.card.name.as_str()).collect();
        assert_eq!(left, right);
    }
}

#[test]
fn grouping_never_mutates_the_deck() {
    let deck = sample_deck();
    let before = deck.total_count();

    let _ = group_for_display(deck.entries(), &Exclusions::none(), Some("Forest"));

    assert_eq!(deck.total_count(), before);
    assert_eq!(deck.entries().len(), 4);
}
