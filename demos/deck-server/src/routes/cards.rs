use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SearchCardsParams {
    pub name: Option<String>,
}

/// GET /api/cards?name=bolt
///
/// Substring card search. Every dispatch takes a ticket from the search
/// sequence; when a newer dispatch supersedes this one before it
/// completes, the response is reported stale and carries no results, so
/// the frontend never paints an outdated list over a newer one.
pub async fn search_cards(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchCardsParams>,
) -> Result<Json<Value>, AppError> {
    let name = params
        .name
        .ok_or_else(|| AppError::bad_request("Missing required query parameter: name"))?;

    let ticket = state.sdk.run(|s| Ok(s.searches().begin())).await?;
    let (cards, current) = state
        .sdk
        .run(move |s| {
            let cards = s.cards().find_by_name(&name)?;
            Ok((cards, s.searches().is_current(ticket)))
        })
        .await?;

    if !current {
        return Ok(Json(json!({ "data": [], "count": 0, "superseded": true })));
    }

    let count = cards.len();
    Ok(Json(json!({ "data": cards, "count": count, "superseded": false })))
}
