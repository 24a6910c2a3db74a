use std::sync::Mutex;

use deckstack::{AsyncDeckstack, Deck, Session};

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// The async Deckstack SDK instance. Dispatches blocking catalog and
    /// store operations to a thread pool internally.
    pub sdk: AsyncDeckstack,

    /// The deck being edited. The demo serves a single shared working
    /// deck so the browser frontend needs no client-side state.
    pub deck: Mutex<Deck>,

    /// Login state gating the deck-store endpoints.
    pub session: Mutex<Session>,
}
