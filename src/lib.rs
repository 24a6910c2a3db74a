//! Deckstack SDK for Rust.
//!
//! Provides a high-level client for building and inspecting trading-card
//! decks. Card data comes from a bulk snapshot downloaded once, cached
//! locally, and queried in-process via DuckDB; decks themselves are plain
//! in-memory values with pure derived views (type-grouped stacks,
//! statistics, legality checks) and a JSON-file store.
//!
//! # Quick start
//!
//! ```no_run
//! use deckstack::{Deck, Deckstack, Format};
//! use deckstack::engine::{compute_stats, group_for_display, resolve};
//!
//! let sdk = Deckstack::builder().build().unwrap();
//!
//! // Look up cards in the local catalog
//! let cards = sdk.cards().find_by_name("Lightning").unwrap();
//!
//! // Build a deck and derive its display views
//! let mut deck = Deck::new("Izzet Tempo");
//! deck.format = Format::Modern;
//! for card in cards {
//!     deck.add_card(card);
//! }
//! let stats = compute_stats(deck.entries());
//! let exclusions = resolve(deck.entries(), deck.format, None);
//! let layout = group_for_display(deck.entries(), &exclusions, None);
//! println!("{} cards, {} lands", stats.card_count, stats.land_count);
//! println!("{} classified units", layout.classified_units());
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod auth;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod lookup;
pub mod models;
pub mod sequence;
pub mod sql_builder;
pub mod store;
pub mod upload;

#[cfg(feature = "async")]
pub use async_client::AsyncDeckstack;
pub use auth::{AuthContext, Session, SessionToken};
pub use cache::SnapshotCache;
pub use catalog::Catalog;
pub use error::{DeckstackError, Result};
pub use lookup::{CardFilter, CardLookup};
pub use models::{CardRecord, Deck, DeckEntry, DeckSummary, Format, SavedDeck};
pub use sequence::{SearchSequence, SearchTicket};
pub use sql_builder::SqlBuilder;
pub use store::DeckStore;
pub use upload::DecklistSource;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// DeckstackBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Deckstack`] instance.
///
/// Use [`Deckstack::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](DeckstackBuilder::build) to create the SDK.
pub struct DeckstackBuilder {
    cache_dir: Option<PathBuf>,
    store_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
}

impl Default for DeckstackBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            store_dir: None,
            offline: false,
            timeout: Duration::from_secs(120),
        }
    }
}

impl DeckstackBuilder {
    /// Set a custom snapshot cache directory.
    ///
    /// If not set, the platform-appropriate default cache directory is used
    /// (e.g. `~/.cache/deckstack` on Linux, `~/Library/Caches/deckstack`
    /// on macOS, `%LOCALAPPDATA%\deckstack` on Windows).
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set a custom deck store root directory.
    ///
    /// If not set, the platform-appropriate default data directory is used
    /// (e.g. `~/.local/share/deckstack/decks` on Linux).
    pub fn store_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.store_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    ///
    /// When offline, the SDK never downloads the snapshot and only uses
    /// previously cached data. Defaults to `false`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for snapshot downloads.
    ///
    /// Defaults to 120 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the SDK, initializing the cache, catalog, and deck store.
    ///
    /// Does **not** download any data eagerly -- the snapshot is fetched
    /// lazily on first card query.
    pub fn build(self) -> Result<Deckstack> {
        let cache = SnapshotCache::new(self.cache_dir, self.offline, self.timeout)?;
        let catalog = Catalog::new(cache)?;
        let store = DeckStore::new(self.store_dir);
        Ok(Deckstack {
            catalog,
            store,
            searches: SearchSequence::new(),
        })
    }
}

// ---------------------------------------------------------------------------
// Deckstack
// ---------------------------------------------------------------------------

/// The main entry point for the Deckstack SDK.
///
/// Owns the [`Catalog`] (snapshot cache plus DuckDB database), the
/// [`DeckStore`], and a [`SearchSequence`] for interactive callers, and
/// exposes the card query interface as a lightweight borrowing wrapper.
///
/// Created via [`Deckstack::builder()`].
pub struct Deckstack {
    catalog: Catalog,
    store: DeckStore,
    searches: SearchSequence,
}

impl Deckstack {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> DeckstackBuilder {
        DeckstackBuilder::default()
    }

    // -- Accessors ---------------------------------------------------------

    /// Access the card query interface.
    ///
    /// Returns a lightweight wrapper that borrows from the underlying
    /// catalog and provides methods for querying card data.
    pub fn cards(&self) -> CardLookup<'_> {
        CardLookup::new(&self.catalog)
    }

    /// Access the deck store.
    pub fn store(&self) -> &DeckStore {
        &self.store
    }

    /// Access the search supersession sequence.
    ///
    /// Interactive callers take a ticket per dispatched search and apply a
    /// response only while its ticket is still current.
    pub fn searches(&self) -> &SearchSequence {
        &self.searches
    }

    /// Return a reference to the underlying [`Catalog`] for advanced usage.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // -- Metadata and utility methods --------------------------------------

    /// The `updated_at` stamp of the cached snapshot, if one is cached.
    pub fn snapshot_version(&self) -> Option<String> {
        self.catalog.cache.borrow().local_stamp()
    }

    /// Execute a raw SQL query against the DuckDB database.
    ///
    /// Provides escape-hatch access for queries not covered by the card
    /// lookup interface.
    ///
    /// # Arguments
    ///
    /// * `query` - SQL string with `?` positional placeholders.
    /// * `params` - Parameter values corresponding to the placeholders.
    ///
    /// # Returns
    ///
    /// A vector of rows, each represented as a `HashMap<String, serde_json::Value>`.
    pub fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        self.catalog.execute(query, params)
    }

    /// Check for a newer snapshot and reset the cards view if stale.
    ///
    /// Returns `true` if the snapshot was stale and the view was reset
    /// (meaning the next query will re-download), or `false` if already
    /// up to date.
    pub fn refresh(&self) -> Result<bool> {
        let stale = self.catalog.cache.borrow_mut().is_stale()?;
        if stale {
            self.catalog.cache.borrow().clear()?;
            self.catalog.reset_cards();
            eprintln!("Card snapshot was stale; cache cleared and view reset");
        }
        Ok(stale)
    }

    /// Consume the SDK and release all resources.
    ///
    /// Closes the DuckDB connection and HTTP client. This is called
    /// automatically when the SDK is dropped, but can be invoked explicitly
    /// for deterministic cleanup.
    pub fn close(self) {
        // Catalog, DeckStore, and SnapshotCache are dropped automatically
        drop(self);
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Deckstack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.catalog.cache.borrow();
        write!(
            f,
            "Deckstack(cache_dir={}, store_dir={}, cards_ready={}, offline={})",
            cache.cache_dir.display(),
            self.store.root().display(),
            self.catalog.is_ready(),
            cache.offline
        )
    }
}
