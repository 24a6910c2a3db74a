//! Async wrapper around [`Deckstack`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//! DuckDB queries are CPU-bound but fast, making this approach efficient.
//!
//! # Example
//!
//! ```no_run
//! use deckstack::AsyncDeckstack;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncDeckstack::builder().build().await.unwrap();
//!
//!     // Run any sync SDK method via closure
//!     let cards = sdk.run(|s| {
//!         s.cards().find_by_name("Lightning")
//!     }).await.unwrap();
//!
//!     // Convenience method for the same lookup
//!     let more = sdk.find_cards("Bolt").await.unwrap();
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::auth::AuthContext;
use crate::error::{DeckstackError, Result};
use crate::lookup::CardFilter;
use crate::models::{CardRecord, Deck, DeckSummary};
use crate::Deckstack;

// ---------------------------------------------------------------------------
// AsyncDeckstackBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncDeckstack`] instance.
pub struct AsyncDeckstackBuilder {
    cache_dir: Option<PathBuf>,
    store_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
}

impl Default for AsyncDeckstackBuilder {
    fn default() -> Self {
        Self {
            cache_dir: None,
            store_dir: None,
            offline: false,
            timeout: Duration::from_secs(120),
        }
    }
}

impl AsyncDeckstackBuilder {
    /// Set a custom snapshot cache directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set a custom deck store root directory.
    pub fn store_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.store_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable offline mode.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Set the HTTP request timeout for snapshot downloads.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the async SDK, initializing the cache, catalog, and store.
    ///
    /// Initialization runs on the blocking thread pool so it won't block
    /// the async event loop.
    pub async fn build(self) -> Result<AsyncDeckstack> {
        tokio::task::spawn_blocking(move || {
            let mut builder = Deckstack::builder();
            if let Some(dir) = self.cache_dir {
                builder = builder.cache_dir(dir);
            }
            if let Some(dir) = self.store_dir {
                builder = builder.store_dir(dir);
            }
            builder = builder.offline(self.offline).timeout(self.timeout);
            let sdk = builder.build()?;
            Ok(AsyncDeckstack {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| DeckstackError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncDeckstack
// ---------------------------------------------------------------------------

/// Async wrapper around [`Deckstack`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`Deckstack`] is
/// protected by a [`Mutex`] since it uses `RefCell` internally.
///
/// # Usage
///
/// Use [`run()`](Self::run) to execute any sync SDK method:
///
/// ```no_run
/// # use deckstack::AsyncDeckstack;
/// # async fn example() -> deckstack::Result<()> {
/// let sdk = AsyncDeckstack::builder().build().await?;
/// let cards = sdk.run(|s| s.cards().find_by_name("Llanowar")).await?;
/// # Ok(())
/// # }
/// ```
pub struct AsyncDeckstack {
    inner: Arc<Mutex<Deckstack>>,
}

impl AsyncDeckstack {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncDeckstackBuilder {
        AsyncDeckstackBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives a `&Deckstack` reference and should return
    /// a `Result<T>`. The operation runs on a dedicated blocking thread,
    /// keeping the async event loop free.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use deckstack::AsyncDeckstack;
    /// # async fn example() -> deckstack::Result<()> {
    /// # let sdk = AsyncDeckstack::builder().build().await?;
    /// let card = sdk.run(|s| {
    ///     s.cards().get_exact("Sol Ring")
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Deckstack) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| DeckstackError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| DeckstackError::InvalidArgument(format!("Task join error: {e}")))?
    }

    // -- Card lookup -------------------------------------------------------

    /// Find cards by name substring asynchronously.
    ///
    /// Convenience wrapper around [`run()`](Self::run) for
    /// [`CardLookup::find_by_name`](crate::lookup::CardLookup::find_by_name).
    pub async fn find_cards(&self, name: &str) -> Result<Vec<CardRecord>> {
        let name = name.to_string();
        self.run(move |s| s.cards().find_by_name(&name)).await
    }

    /// Retrieve a single card by exact name asynchronously.
    pub async fn get_card(&self, name: &str) -> Result<Option<CardRecord>> {
        let name = name.to_string();
        self.run(move |s| s.cards().get_exact(&name)).await
    }

    /// Search for cards with filters asynchronously.
    pub async fn search_cards(&self, filter: CardFilter) -> Result<Vec<CardRecord>> {
        self.run(move |s| s.cards().search(&filter)).await
    }

    // -- Deck store --------------------------------------------------------

    /// Persist a deck for the given user asynchronously.
    pub async fn save_deck(&self, auth: AuthContext, deck: Deck) -> Result<()> {
        self.run(move |s| s.store().save(&auth, &deck)).await
    }

    /// Load a deck by name for the given user asynchronously.
    pub async fn load_deck(&self, auth: AuthContext, name: &str) -> Result<Deck> {
        let name = name.to_string();
        self.run(move |s| s.store().load(&auth, &name)).await
    }

    /// List all decks saved for the given user asynchronously.
    pub async fn list_decks(&self, auth: AuthContext) -> Result<Vec<DeckSummary>> {
        self.run(move |s| s.store().list(&auth)).await
    }

    // -- Metadata and utility methods --------------------------------------

    /// Execute a raw SQL query asynchronously.
    pub async fn sql(
        &self,
        query: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let query = query.to_string();
        let params = params.to_vec();
        self.run(move |s| s.sql(&query, &params)).await
    }

    /// The `updated_at` stamp of the cached snapshot, if one is cached.
    pub async fn snapshot_version(&self) -> Result<Option<String>> {
        self.run(|s| Ok(s.snapshot_version())).await
    }

    /// Check for a newer snapshot and reset the cards view if stale.
    pub async fn refresh(&self) -> Result<bool> {
        self.run(|s| s.refresh()).await
    }

    /// Close the SDK, releasing all resources.
    ///
    /// After calling this, subsequent operations will fail with a
    /// poisoned lock error.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || {
            let sdk = self
                .inner
                .lock()
                .map_err(|_| DeckstackError::InvalidArgument("SDK lock poisoned".into()))?;
            // Dropping the MutexGuard drops the SDK
            drop(sdk);
            Ok(())
        })
        .await
        .map_err(|e| DeckstackError::InvalidArgument(format!("Task join error: {e}")))?
    }
}
