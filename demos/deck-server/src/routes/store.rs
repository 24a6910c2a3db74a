use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use serde_json::{json, Value};

use deckstack::AuthContext;

use crate::error::AppError;
use crate::routes::deck::deck_view;
use crate::state::AppState;

/// Clone the logged-in auth context, or fail with 401.
fn current_auth(state: &AppState) -> Result<AuthContext, AppError> {
    let session = state
        .session
        .lock()
        .map_err(|_| AppError::internal("Session lock poisoned"))?;
    Ok(session.require()?.clone())
}

/// POST /api/decks/save
///
/// Persist the working deck for the logged-in user.
pub async fn save_deck(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let auth = current_auth(&state)?;
    let deck = {
        let guard = state
            .deck
            .lock()
            .map_err(|_| AppError::internal("Deck lock poisoned"))?;
        guard.clone()
    };
    let name = deck.display_name().to_string();
    state.sdk.save_deck(auth, deck).await?;
    Ok(Json(json!({ "saved": name })))
}

/// POST /api/decks/load/{name}
///
/// Load a saved deck into the working slot, replacing it.
pub async fn load_deck(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Value>, AppError> {
    let auth = current_auth(&state)?;
    let loaded = state.sdk.load_deck(auth, &name).await?;

    let mut deck = state
        .deck
        .lock()
        .map_err(|_| AppError::internal("Deck lock poisoned"))?;
    *deck = loaded;
    Ok(Json(deck_view(&deck)))
}

/// GET /api/decks
///
/// Summaries of the logged-in user's saved decks.
pub async fn list_decks(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let auth = current_auth(&state)?;
    let decks = state.sdk.list_decks(auth).await?;
    let count = decks.len();
    Ok(Json(json!({ "data": decks, "count": count })))
}
