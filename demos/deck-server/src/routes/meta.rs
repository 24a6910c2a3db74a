use axum::response::Json;
use serde_json::{json, Value};

use deckstack::Format;

/// GET /api/formats
///
/// The format list for deck pickers, with the commander-style flag the
/// frontend uses to show or hide the commander field.
pub async fn list_formats() -> Json<Value> {
    let formats: Vec<Value> = Format::ALL
        .iter()
        .map(|f| json!({ "name": f.name(), "hasCommander": f.has_commander() }))
        .collect();
    Json(json!({ "data": formats }))
}
