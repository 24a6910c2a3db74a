use std::path::PathBuf;

/// Bulk-data index endpoint: a JSON list of snapshot descriptors, each
/// carrying `type`, `updated_at` and `download_uri`.
pub const BULK_INDEX_URL: &str = "https://api.scryfall.com/bulk-data";

/// Which snapshot kind the catalog is built from. `oracle_cards` holds one
/// record per distinct card name, which is what deck building wants.
pub const SNAPSHOT_KIND: &str = "oracle_cards";

/// Local file name of the cached snapshot. Stored gzip-compressed; DuckDB
/// reads it directly by extension.
pub const SNAPSHOT_FILE: &str = "oracle-cards.json.gz";

/// Local file name of the staleness stamp (the snapshot's `updated_at`).
pub const STAMP_FILE: &str = "snapshot.txt";

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("deckstack")
    } else {
        PathBuf::from(".deckstack-cache")
    }
}

pub fn default_store_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("deckstack").join("decks")
    } else {
        PathBuf::from(".deckstack-decks")
    }
}
