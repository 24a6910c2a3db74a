//! DuckDB-backed card catalog over the cached snapshot.
//!
//! The raw snapshot is registered once as a `cards` view projecting a
//! fixed column list; queries deserialize rows straight into
//! [`CardRecord`](crate::models::CardRecord) via serde.

use std::cell::RefCell;
use std::collections::HashMap;

use duckdb::{types::ValueRef, Connection as DuckDbConnection};
use serde::de::DeserializeOwned;

use crate::cache::SnapshotCache;
use crate::error::Result;

/// Columns projected from the raw snapshot into the `cards` view, as
/// `(snapshot expression, view column)` pairs. View column names match
/// the `CardRecord` serde names. The type line feeds both type fields,
/// the way card detail sources populate them.
pub const CARD_COLUMNS: [(&str, &str); 16] = [
    ("name", "name"),
    ("type_line", "cardType"),
    ("type_line", "typeLine"),
    ("image_uris.normal", "image"),
    ("mana_cost", "manaCost"),
    ("cmc", "cmc"),
    ("to_json(colors)", "colors"),
    ("to_json(color_identity)", "colorIdentity"),
    ("power", "power"),
    ("toughness", "toughness"),
    ("oracle_text", "oracleText"),
    ("loyalty", "loyalty"),
    ("layout", "layout"),
    ("artist", "artist"),
    ("id", "scryfallId"),
    ("to_json(legalities)", "legalities"),
];

/// View columns that carry JSON payloads as text; parsed into structured
/// values during row conversion.
const JSON_COLUMNS: [&str; 3] = ["colors", "colorIdentity", "legalities"];

/// Wraps an in-memory DuckDB database with the `cards` view over the
/// snapshot.
///
/// The view is registered lazily on first query; the snapshot download
/// happens then, not at construction.
pub struct Catalog {
    conn: DuckDbConnection,
    /// The cache used to locate (and download) the snapshot.
    pub cache: RefCell<SnapshotCache>,
    cards_ready: RefCell<bool>,
}

impl Catalog {
    /// Create a catalog backed by the given cache.
    ///
    /// Opens an in-memory DuckDB database.
    pub fn new(cache: SnapshotCache) -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self {
            conn,
            cache: RefCell::new(cache),
            cards_ready: RefCell::new(false),
        })
    }

    /// Ensure the `cards` view is registered, downloading the snapshot if
    /// needed.
    pub fn ensure_cards(&self) -> Result<()> {
        if *self.cards_ready.borrow() {
            return Ok(());
        }
        let path = self.cache.borrow_mut().ensure_snapshot()?;
        self.register_cards_from_json(&path.to_string_lossy())
    }

    /// Register the `cards` view over an explicit snapshot file (a JSON
    /// array of card objects, optionally gzip-compressed).
    ///
    /// Normally called through [`ensure_cards`](Self::ensure_cards); also
    /// the hook for pointing the catalog at a local snapshot directly.
    pub fn register_cards_from_json(&self, path: &str) -> Result<()> {
        // Use forward slashes for DuckDB compatibility
        let path_fwd = path.replace('\\', "/");
        let projection = CARD_COLUMNS
            .iter()
            .map(|(expr, alias)| format!("{} AS \"{}\"", expr, alias))
            .collect::<Vec<_>>()
            .join(", ");
        self.conn.execute_batch(&format!(
            "CREATE OR REPLACE VIEW cards AS SELECT {} FROM read_json_auto('{}', format = 'array')",
            projection, path_fwd
        ))?;
        *self.cards_ready.borrow_mut() = true;
        eprintln!("Registered cards view: {}", path_fwd);
        Ok(())
    }

    /// Whether the `cards` view has been registered.
    pub fn is_ready(&self) -> bool {
        *self.cards_ready.borrow()
    }

    /// Drop the view registration so the next query re-registers (and
    /// re-downloads if the cache was cleared).
    pub fn reset_cards(&self) {
        *self.cards_ready.borrow_mut() = false;
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is a `HashMap<String, serde_json::Value>`. NULL columns
    /// are omitted from the map so serde defaults apply downstream; JSON
    /// text columns are parsed into structured values.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();

        let mut rows_result = stmt.query(param_values.as_slice())?;

        // Get column metadata AFTER query execution (calling before panics in duckdb-rs)
        let column_names: Vec<String> = rows_result
            .as_ref()
            .unwrap()
            .column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        let column_count = rows_result.as_ref().unwrap().column_count();

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::new();
            for i in 0..column_count {
                let col_name = &column_names[i];
                let mut value = convert_value_ref(row.get_ref(i)?);
                if value.is_null() {
                    continue;
                }
                if JSON_COLUMNS.contains(&col_name.as_str()) {
                    if let serde_json::Value::String(text) = &value {
                        if let Ok(parsed) = serde_json::from_str(text) {
                            value = parsed;
                        }
                    }
                }
                map.insert(col_name.clone(), value);
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(&self, sql: &str, params: &[String]) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(
                row.into_iter()
                    .collect::<serde_json::Map<String, serde_json::Value>>(),
            );
            let item: T = serde_json::from_value(value)?;
            results.push(item);
        }
        Ok(results)
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &DuckDbConnection {
        &self.conn
    }
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => {
            // HugeInt may not fit in i64; try i64, fallback to string
            if let Ok(i) = i64::try_from(n) {
                serde_json::Value::Number(i.into())
            } else {
                serde_json::Value::String(n.to_string())
            }
        }
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).to_string())
        }
        ValueRef::Blob(bytes) => serde_json::Value::String(format!(
            "blob:{}",
            bytes
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<String>()
        )),
        _ => {
            // Other types (Date, Time, List, Struct, ...) never appear in
            // the cards view's projected columns
            serde_json::Value::Null
        }
    }
}
