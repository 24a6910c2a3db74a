mod error;
mod routes;
mod state;

use std::sync::{Arc, Mutex};

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use deckstack::{Deck, Session};

use state::AppState;

#[tokio::main]
async fn main() {
    eprintln!("Initializing Deckstack SDK...");
    let sdk = deckstack::AsyncDeckstack::builder()
        .build()
        .await
        .expect("Failed to initialize Deckstack SDK");
    eprintln!("SDK ready.");

    let state = Arc::new(AppState {
        sdk,
        deck: Mutex::new(Deck::new("")),
        session: Mutex::new(Session::new()),
    });

    let app = Router::new()
        .route("/api/cards", get(routes::cards::search_cards))
        .route("/api/formats", get(routes::meta::list_formats))
        .route("/api/login", post(routes::session::login))
        .route("/api/logout", post(routes::session::logout))
        .route(
            "/api/deck",
            get(routes::deck::get_deck).put(routes::deck::update_deck),
        )
        .route("/api/deck/cards", post(routes::deck::add_card))
        .route("/api/deck/cards/{name}", delete(routes::deck::remove_card))
        .route("/api/decks", get(routes::store::list_decks))
        .route("/api/decks/save", post(routes::store::save_deck))
        .route("/api/decks/load/{name}", post(routes::store::load_deck))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = "0.0.0.0:3000";
    eprintln!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
