use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use deckstack::engine::{compute_stats, group_for_display, mana_curve, resolve, validate};
use deckstack::{Deck, Format};

use crate::error::AppError;
use crate::state::AppState;

/// Render the deck plus every derived view as one JSON document.
pub fn deck_view(deck: &Deck) -> Value {
    let exclusions = resolve(deck.entries(), deck.format, deck.commander_name.as_deref());
    let layout = group_for_display(deck.entries(), &exclusions, None);
    json!({
        "name": deck.display_name(),
        "description": deck.description,
        "format": deck.format,
        "commander": deck.commander_name,
        "entries": deck.entries(),
        "totalCount": deck.total_count(),
        "stats": compute_stats(deck.entries()),
        "curve": mana_curve(deck.entries()),
        "layout": layout,
        "violations": validate(deck),
    })
}

/// GET /api/deck
///
/// The working deck with all derived views: entries, statistics, mana
/// curve, stack layout, and rule violations.
pub async fn get_deck(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let deck = state
        .deck
        .lock()
        .map_err(|_| AppError::internal("Deck lock poisoned"))?;
    Ok(Json(deck_view(&deck)))
}

#[derive(Deserialize)]
pub struct AddCardRequest {
    pub name: String,
}

/// POST /api/deck/cards
///
/// Add one copy of a card by exact name. The catalog is the authority:
/// a name it does not know is a 404, not a free-text entry.
pub async fn add_card(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AddCardRequest>,
) -> Result<Json<Value>, AppError> {
    let card = state
        .sdk
        .get_card(&body.name)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No card named '{}'", body.name.trim())))?;

    let mut deck = state
        .deck
        .lock()
        .map_err(|_| AppError::internal("Deck lock poisoned"))?;
    deck.add_card(card);
    Ok(Json(deck_view(&deck)))
}

/// DELETE /api/deck/cards/{name}
///
/// Remove one copy; the slot disappears at zero copies. Removing a card
/// that is not in the deck is a no-op rather than an error.
pub async fn remove_card(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AppError> {
    let mut deck = state
        .deck
        .lock()
        .map_err(|_| AppError::internal("Deck lock poisoned"))?;
    deck.remove_card(&name);
    Ok(Json(deck_view(&deck)))
}

#[derive(Deserialize)]
pub struct UpdateDeckRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub format: Option<String>,
    pub commander: Option<String>,
}

/// PUT /api/deck
///
/// Update deck metadata. Only fields present in the body change; an
/// empty commander string clears the designation.
pub async fn update_deck(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UpdateDeckRequest>,
) -> Result<Json<Value>, AppError> {
    let mut deck = state
        .deck
        .lock()
        .map_err(|_| AppError::internal("Deck lock poisoned"))?;
    if let Some(name) = body.name {
        deck.name = name;
    }
    if let Some(description) = body.description {
        deck.description = description;
    }
    if let Some(format) = body.format {
        deck.format = Format::from_name(&format);
    }
    if let Some(commander) = body.commander {
        deck.commander_name = if commander.trim().is_empty() {
            None
        } else {
            Some(commander)
        };
    }
    Ok(Json(deck_view(&deck)))
}
