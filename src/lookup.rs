//! Card queries against the DuckDB-backed snapshot view.

use crate::catalog::Catalog;
use crate::error::{DeckstackError, Result};
use crate::models::CardRecord;
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// CardFilter
// ---------------------------------------------------------------------------

/// Parameters for the filtered card search.
///
/// All fields are optional. When `None`, the corresponding filter is skipped.
#[derive(Debug, Clone, Default)]
pub struct CardFilter {
    pub name: Option<String>,
    pub type_text: Option<String>,
    pub oracle_text: Option<String>,
    pub artist: Option<String>,
    pub cmc: Option<f64>,
    pub cmc_lte: Option<f64>,
    pub cmc_gte: Option<f64>,
    pub layout: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

// ---------------------------------------------------------------------------
// CardLookup
// ---------------------------------------------------------------------------

/// Query interface for cards backed by the `cards` snapshot view.
pub struct CardLookup<'a> {
    catalog: &'a Catalog,
}

impl<'a> CardLookup<'a> {
    /// Create a new `CardLookup` bound to the given catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    // -- Name search -------------------------------------------------------

    /// Find cards whose name contains the given text, case-insensitively,
    /// ordered by name.
    ///
    /// An empty (post-trim) name is rejected as `InvalidArgument`.
    pub fn find_by_name(&self, name: &str) -> Result<Vec<CardRecord>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DeckstackError::InvalidArgument(
                "Name parameter is empty".to_string(),
            ));
        }
        self.catalog.ensure_cards()?;

        let (sql, params) = SqlBuilder::new("cards")
            .where_like("name", &format!("%{}%", name))
            .order_by(&["name ASC"])
            .build();

        self.catalog.execute_into(&sql, &params)
    }

    // -- Exact lookup ------------------------------------------------------

    /// Retrieve a single card by its exact name (case-insensitive).
    ///
    /// Returns `Ok(None)` when no card matches.
    pub fn get_exact(&self, name: &str) -> Result<Option<CardRecord>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DeckstackError::InvalidArgument(
                "Name parameter is empty".to_string(),
            ));
        }
        self.catalog.ensure_cards()?;

        let (sql, params) = SqlBuilder::new("cards")
            .where_clause("LOWER(name) = LOWER(?)", &[name])
            .limit(1)
            .build();

        let rows: Vec<CardRecord> = self.catalog.execute_into(&sql, &params)?;
        Ok(rows.into_iter().next())
    }

    // -- Filtered search ---------------------------------------------------

    /// Search for cards using a set of optional filters.
    ///
    /// Translates each field of [`CardFilter`] into the corresponding SQL
    /// condition. Results are ordered by name; pagination defaults to
    /// `LIMIT 100 OFFSET 0`.
    pub fn search(&self, filter: &CardFilter) -> Result<Vec<CardRecord>> {
        if let Some(ref name) = filter.name {
            if name.trim().is_empty() {
                return Err(DeckstackError::InvalidArgument(
                    "Name parameter is empty".to_string(),
                ));
            }
        }
        self.catalog.ensure_cards()?;

        let mut qb = SqlBuilder::new("cards");

        // -- name: if contains '%' use LIKE, otherwise exact match ----------
        if let Some(ref name) = filter.name {
            if name.contains('%') {
                qb.where_like("name", name);
            } else {
                qb.where_clause("LOWER(name) = LOWER(?)", &[name.as_str()]);
            }
        }

        // -- type_text: LIKE %type_text% ------------------------------------
        if let Some(ref type_text) = filter.type_text {
            qb.where_like("\"typeLine\"", &format!("%{}%", type_text));
        }

        // -- oracle_text: LIKE %oracle_text% --------------------------------
        if let Some(ref text) = filter.oracle_text {
            qb.where_like("\"oracleText\"", &format!("%{}%", text));
        }

        // -- artist ---------------------------------------------------------
        if let Some(ref artist) = filter.artist {
            qb.where_like("artist", &format!("%{}%", artist));
        }

        // -- cmc (exact) ----------------------------------------------------
        if let Some(cmc) = filter.cmc {
            qb.where_eq("cmc", &cmc.to_string());
        }

        // -- cmc_lte --------------------------------------------------------
        if let Some(cmc) = filter.cmc_lte {
            qb.where_lte("cmc", &cmc.to_string());
        }

        // -- cmc_gte --------------------------------------------------------
        if let Some(cmc) = filter.cmc_gte {
            qb.where_gte("cmc", &cmc.to_string());
        }

        // -- layout ---------------------------------------------------------
        if let Some(ref layout) = filter.layout {
            qb.where_eq("layout", layout);
        }

        // -- pagination -----------------------------------------------------
        let limit = filter.limit.unwrap_or(100);
        let offset = filter.offset.unwrap_or(0);
        qb.order_by(&["name ASC"]);
        qb.limit(limit);
        qb.offset(offset);

        let (sql, params) = qb.build();
        self.catalog.execute_into(&sql, &params)
    }
}
