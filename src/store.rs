//! JSON-file deck persistence, scoped per authenticated user.
//!
//! One subdirectory per user under the store root, one file per deck.
//! File names are sanitized slugs of the deck name, so loading uses the
//! same name the deck was saved under.

use std::fs;
use std::path::PathBuf;

use crate::auth::AuthContext;
use crate::config;
use crate::error::{DeckstackError, Result};
use crate::models::{Deck, DeckSummary, SavedDeck};

/// File-backed deck store.
pub struct DeckStore {
    root: PathBuf,
}

impl DeckStore {
    /// Create a store rooted at `root`, or the platform default when `None`.
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root: root.unwrap_or_else(config::default_store_dir),
        }
    }

    /// The store root directory.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn user_dir(&self, auth: &AuthContext) -> PathBuf {
        self.root.join(slug(auth.user()))
    }

    fn deck_path(&self, auth: &AuthContext, name: &str) -> PathBuf {
        self.user_dir(auth).join(format!("{}.json", slug(name)))
    }

    // -- Save --------------------------------------------------------------

    /// Persist a deck for the given user.
    ///
    /// An empty (post-trim) deck name is rejected as `InvalidArgument`.
    /// The file is written to a temporary path and renamed into place, so
    /// a failed save never leaves a truncated deck behind.
    pub fn save(&self, auth: &AuthContext, deck: &Deck) -> Result<()> {
        if deck.name.trim().is_empty() {
            return Err(DeckstackError::InvalidArgument(
                "Deck name is empty".to_string(),
            ));
        }

        let dir = self.user_dir(auth);
        fs::create_dir_all(&dir)?;

        let saved = SavedDeck::from_deck(deck);
        let json = serde_json::to_string_pretty(&saved)?;

        let dest = self.deck_path(auth, &deck.name);
        let tmp = dest.with_extension("json.tmp");

        let result = (|| -> Result<()> {
            fs::write(&tmp, json.as_bytes())?;
            fs::rename(&tmp, &dest)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }

    // -- Load --------------------------------------------------------------

    /// Load a deck by name for the given user.
    ///
    /// Returns `NotFound` when the user has no deck saved under that name.
    pub fn load(&self, auth: &AuthContext, name: &str) -> Result<Deck> {
        let path = self.deck_path(auth, name);
        if !path.exists() {
            return Err(DeckstackError::NotFound(format!(
                "No saved deck named '{}'",
                name
            )));
        }

        let json = fs::read_to_string(&path)?;
        let saved: SavedDeck = serde_json::from_str(&json)?;
        Ok(saved.into_deck())
    }

    // -- List --------------------------------------------------------------

    /// List all decks saved for the given user, sorted by name.
    ///
    /// A user with no saved decks gets an empty list. Unreadable files are
    /// skipped with a diagnostic rather than failing the whole listing.
    pub fn list(&self, auth: &AuthContext) -> Result<Vec<DeckSummary>> {
        let dir = self.user_dir(auth);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut summaries: Vec<DeckSummary> = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let parsed = fs::read_to_string(&path)
                .map_err(DeckstackError::from)
                .and_then(|json| serde_json::from_str::<SavedDeck>(&json).map_err(Into::into));
            match parsed {
                Ok(saved) => summaries.push(DeckSummary {
                    name: saved.name,
                    description: saved.description,
                }),
                Err(e) => {
                    eprintln!("Skipping unreadable deck file {}: {}", path.display(), e);
                }
            }
        }

        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(summaries)
    }
}

/// Reduce a name to a filesystem-safe slug.
///
/// Lowercases, keeps ASCII alphanumerics, and collapses every other run of
/// characters into a single hyphen. An empty result becomes `"deck"`.
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    if out.is_empty() {
        "deck".to_string()
    } else {
        out
    }
}
