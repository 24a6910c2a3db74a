use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use deckstack::SessionToken;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub user: String,
}

/// POST /api/login
///
/// Demo login: accepts any non-blank user name and issues a fabricated
/// session token. There is no credential check and no token refresh.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let user = body.user.trim().to_string();
    if user.is_empty() {
        return Err(AppError::bad_request("User name is empty"));
    }

    let token = SessionToken::new(format!("demo-{:016x}", rand::random::<u64>()));
    let mut session = state
        .session
        .lock()
        .map_err(|_| AppError::internal("Session lock poisoned"))?;
    session.login(user.clone(), token);

    Ok(Json(json!({ "user": user, "loggedIn": true })))
}

/// POST /api/logout
pub async fn logout(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let mut session = state
        .session
        .lock()
        .map_err(|_| AppError::internal("Session lock poisoned"))?;
    session.logout();
    Ok(Json(json!({ "loggedIn": false })))
}
