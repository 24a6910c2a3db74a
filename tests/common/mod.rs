//! Shared test fixtures for the deckstack integration tests.
//!
//! Provides in-memory `CardRecord` builders for the pure engine tests and
//! `setup_catalog()`, which registers a small snapshot-shaped JSON fixture
//! into an offline catalog. Not every test binary uses every helper.

#![allow(dead_code)]

use std::fs;
use std::time::Duration;

use deckstack::{CardRecord, Catalog, SnapshotCache};

/// Build a card with both type fields set, the way catalog rows come out.
pub fn card(name: &str, type_line: &str) -> CardRecord {
    CardRecord {
        name: name.to_string(),
        card_type: Some(type_line.to_string()),
        type_line: Some(type_line.to_string()),
        ..Default::default()
    }
}

/// Build a card with type, mana cost, and cmc set.
pub fn card_with_cost(name: &str, type_line: &str, mana_cost: &str, cmc: f64) -> CardRecord {
    CardRecord {
        mana_cost: Some(mana_cost.to_string()),
        cmc: Some(cmc),
        ..card(name, type_line)
    }
}

/// Create a `Catalog` backed by a temporary cache directory with the
/// sample snapshot fixture registered as the `cards` view.
///
/// Returns `(Catalog, tempfile::TempDir)`. The caller must keep the
/// `TempDir` alive for the duration of the test: the view reads the
/// fixture file on every query, so the directory must not be deleted
/// prematurely.
pub fn setup_catalog() -> (Catalog, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let cache = SnapshotCache::new(
        Some(tmp_dir.path().to_path_buf()),
        true,
        Duration::from_secs(30),
    )
    .unwrap();
    let catalog = Catalog::new(cache).unwrap();

    let fixture = tmp_dir.path().join("cards-fixture.json");
    fs::write(
        &fixture,
        serde_json::to_string(&sample_card_rows()).unwrap(),
    )
    .unwrap();
    catalog
        .register_cards_from_json(fixture.to_str().unwrap())
        .unwrap();

    (catalog, tmp_dir)
}

/// Six snapshot-shaped card objects covering the projected columns:
/// nested image URIs, list-valued colors, struct-valued legalities, and
/// nulls in the optional fields.
pub fn sample_card_rows() -> Vec<serde_json::Value> {
    vec![
        serde_json::json!({
            "id": "a1b2-bolt",
            "name": "Lightning Bolt",
            "type_line": "Instant",
            "mana_cost": "{R}",
            "cmc": 1.0,
            "colors": ["R"],
            "color_identity": ["R"],
            "power": null,
            "toughness": null,
            "oracle_text": "Lightning Bolt deals 3 damage to any target.",
            "loyalty": null,
            "layout": "normal",
            "artist": "Christopher Moeller",
            "image_uris": {"normal": "https://img.example/bolt.jpg"},
            "legalities": {"commander": "legal", "modern": "legal"}
        }),
        serde_json::json!({
            "id": "c3d4-elves",
            "name": "Llanowar Elves",
            "type_line": "Creature \u{2014} Elf Druid",
            "mana_cost": "{G}",
            "cmc": 1.0,
            "colors": ["G"],
            "color_identity": ["G"],
            "power": "1",
            "toughness": "1",
            "oracle_text": "{T}: Add {G}.",
            "loyalty": null,
            "layout": "normal",
            "artist": "Kev Walker",
            "image_uris": {"normal": "https://img.example/elves.jpg"},
            "legalities": {"commander": "legal", "modern": "legal"}
        }),
        serde_json::json!({
            "id": "e5f6-solring",
            "name": "Sol Ring",
            "type_line": "Artifact",
            "mana_cost": "{1}",
            "cmc": 1.0,
            "colors": [],
            "color_identity": [],
            "power": null,
            "toughness": null,
            "oracle_text": "{T}: Add {C}{C}.",
            "loyalty": null,
            "layout": "normal",
            "artist": "Mike Bierek",
            "image_uris": {"normal": "https://img.example/solring.jpg"},
            "legalities": {"commander": "legal", "modern": "not_legal"}
        }),
        serde_json::json!({
            "id": "g7h8-forest",
            "name": "Forest",
            "type_line": "Basic Land \u{2014} Forest",
            "mana_cost": null,
            "cmc": 0.0,
            "colors": [],
            "color_identity": ["G"],
            "power": null,
            "toughness": null,
            "oracle_text": "({T}: Add {G}.)",
            "loyalty": null,
            "layout": "normal",
            "artist": "John Avon",
            "image_uris": {"normal": "https://img.example/forest.jpg"},
            "legalities": {"commander": "legal", "modern": "legal"}
        }),
        serde_json::json!({
            "id": "i9j0-jace",
            "name": "Jace Beleren",
            "type_line": "Legendary Planeswalker \u{2014} Jace",
            "mana_cost": "{1}{U}{U}",
            "cmc": 3.0,
            "colors": ["U"],
            "color_identity": ["U"],
            "power": null,
            "toughness": null,
            "oracle_text": "+2: Each player draws a card.",
            "loyalty": "3",
            "layout": "normal",
            "artist": "Aleksi Briclot",
            "image_uris": {"normal": "https://img.example/jace.jpg"},
            "legalities": {"commander": "legal", "modern": "legal"}
        }),
        serde_json::json!({
            "id": "k1l2-fireball",
            "name": "Fireball",
            "type_line": "Sorcery",
            "mana_cost": "{X}{R}",
            "cmc": 1.0,
            "colors": ["R"],
            "color_identity": ["R"],
            "power": null,
            "toughness": null,
            "oracle_text": "Fireball deals X damage divided evenly among any number of targets.",
            "loyalty": null,
            "layout": "normal",
            "artist": "Mark Tedin",
            "image_uris": {"normal": "https://img.example/fireball.jpg"},
            "legalities": {"commander": "legal", "modern": "legal"}
        }),
    ]
}
