//! News store abstraction.
//!
//! The hosted store is an external collaborator; this module only fixes the
//! query contract (`fetch_latest`: newest first, capped) and ships an
//! in-memory implementation for tests and headless replays.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::NewsError;
use crate::record::{NewsItem, RawNewsRecord, normalize};

/// Rows shown in the side panel.
pub const DEFAULT_NEWS_LIMIT: usize = 10;

/// Type alias for a boxed future that can be sent between threads.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A store of per-country news tables.
///
/// Implementations must be `Send + Sync`; methods return boxed futures for
/// dyn-compatibility.
pub trait NewsSource: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// Newest rows of `table` first (by `created_at`), at most `limit`.
    fn fetch_latest<'a>(
        &'a self,
        table: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<RawNewsRecord>, NewsError>>;
}

/// Fetch and normalize the latest rows of `table`.
///
/// Sources that ignore `limit` are truncated here.
pub async fn load_news(
    source: &dyn NewsSource,
    table: &str,
    limit: usize,
) -> Result<Vec<NewsItem>, NewsError> {
    let rows = source.fetch_latest(table, limit).await?;
    debug!(source = source.name(), table, rows = rows.len(), "news rows fetched");
    Ok(rows.iter().take(limit).map(normalize).collect())
}

/// Country name to news table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableMap {
    tables: BTreeMap<String, String>,
}

impl TableMap {
    pub fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
        }
    }

    pub fn with(mut self, country: impl Into<String>, table: impl Into<String>) -> Self {
        self.insert(country, table);
        self
    }

    pub fn insert(&mut self, country: impl Into<String>, table: impl Into<String>) {
        self.tables.insert(country.into(), table.into());
    }

    pub fn table_for(&self, country: &str) -> Result<&str, NewsError> {
        self.tables
            .get(country)
            .map(String::as_str)
            .ok_or_else(|| NewsError::NoSource {
                country: country.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Default for TableMap {
    /// One `<Country>_news` table per shipped marker.
    fn default() -> Self {
        ["India", "Russia", "China", "USA", "Australia"]
            .into_iter()
            .fold(TableMap::new(), |map, country| {
                map.with(country, format!("{country}_news"))
            })
    }
}

#[derive(Debug, Clone)]
struct StoredRow {
    seq: u64,
    record: RawNewsRecord,
}

/// How recent a row is. Variant order is oldest to newest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Recency<'a> {
    /// Stamp that is not RFC 3339; compared as text, older than any parsed stamp.
    Unparsed(&'a str),
    Stamped(DateTime<Utc>),
    /// The hosted store stamps rows on insert, so an unstamped row is the newest.
    Unstamped,
}

impl<'a> Recency<'a> {
    fn of(created_at: Option<&'a str>) -> Self {
        match created_at {
            None => Recency::Unstamped,
            Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
                .map(|t| Recency::Stamped(t.with_timezone(&Utc)))
                .unwrap_or(Recency::Unparsed(raw)),
        }
    }
}

/// In-memory news store.
///
/// Fixture format: `{ "<table>": [record, ...] }`, rows of each table in
/// insertion order.
#[derive(Debug, Default)]
pub struct InMemoryNewsSource {
    tables: RwLock<BTreeMap<String, Vec<StoredRow>>>,
    next_seq: std::sync::atomic::AtomicU64,
}

impl InMemoryNewsSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(text: &str) -> Result<Self, NewsError> {
        let tables: BTreeMap<String, Vec<RawNewsRecord>> = serde_json::from_str(text)?;
        let source = Self::new();
        for (table, rows) in tables {
            for row in rows {
                source.insert(&table, row)?;
            }
        }
        Ok(source)
    }

    /// Fixture JSON for the current contents, tables sorted by name.
    pub fn to_json_string(&self) -> Result<String, NewsError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| NewsError::Query("news table lock poisoned".to_string()))?;
        let snapshot: BTreeMap<&str, Vec<&RawNewsRecord>> = tables
            .iter()
            .map(|(name, rows)| (name.as_str(), rows.iter().map(|r| &r.record).collect()))
            .collect();
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    pub fn insert(&self, table: &str, record: RawNewsRecord) -> Result<(), NewsError> {
        let seq = self
            .next_seq
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let mut tables = self
            .tables
            .write()
            .map_err(|_| NewsError::Query("news table lock poisoned".to_string()))?;
        tables
            .entry(table.to_string())
            .or_default()
            .push(StoredRow { seq, record });
        Ok(())
    }

    pub fn row_count(&self, table: &str) -> usize {
        self.tables
            .read()
            .map(|t| t.get(table).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn latest(&self, table: &str, limit: usize) -> Result<Vec<RawNewsRecord>, NewsError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| NewsError::Query("news table lock poisoned".to_string()))?;
        let rows = tables
            .get(table)
            .ok_or_else(|| NewsError::Query(format!("relation \"{table}\" does not exist")))?;

        let mut ordered: Vec<&StoredRow> = rows.iter().collect();
        // Newest first; equal recency falls back to later inserts first.
        ordered.sort_by(|a, b| {
            let ra = Recency::of(a.record.created_at.as_deref());
            let rb = Recency::of(b.record.created_at.as_deref());
            rb.cmp(&ra).then_with(|| b.seq.cmp(&a.seq))
        });

        Ok(ordered
            .into_iter()
            .take(limit)
            .map(|row| row.record.clone())
            .collect())
    }
}

impl NewsSource for InMemoryNewsSource {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn fetch_latest<'a>(
        &'a self,
        table: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<RawNewsRecord>, NewsError>> {
        Box::pin(async move { self.latest(table, limit) })
    }
}
