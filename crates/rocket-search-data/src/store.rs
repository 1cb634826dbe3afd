use std::sync::Arc;

use ahash::AHashMap as HashMap;
use tracing::{debug, instrument};

use crate::{
    error::{DataError, Result},
    query::RowQuery,
    row::Row,
};

/// Read contract of the storage collaborator.
///
/// Implementations return the rows of `query.table` that pass the text filter
/// and are not excluded, in the table's natural row order. A store that cannot
/// run the query returns an error instead of an empty list.
pub trait RowSource: Send + Sync {
    fn query_rows(&self, query: &RowQuery<'_>) -> Result<Vec<Row>>;
}

impl<T: RowSource + ?Sized> RowSource for &T {
    fn query_rows(&self, query: &RowQuery<'_>) -> Result<Vec<Row>> {
        (**self).query_rows(query)
    }
}

impl<T: RowSource + ?Sized> RowSource for Arc<T> {
    fn query_rows(&self, query: &RowQuery<'_>) -> Result<Vec<Row>> {
        (**self).query_rows(query)
    }
}

impl<T: RowSource + ?Sized> RowSource for Box<T> {
    fn query_rows(&self, query: &RowQuery<'_>) -> Result<Vec<Row>> {
        (**self).query_rows(query)
    }
}

/// Tables held as plain vectors of rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: HashMap<String, Vec<Row>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a table.
    pub fn with_table(mut self, name: impl Into<String>, rows: Vec<Row>) -> Self {
        self.insert_table(name, rows);
        self
    }

    pub fn insert_table(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        self.tables.insert(name.into(), rows);
    }

    pub fn table(&self, name: &str) -> Option<&[Row]> {
        self.tables.get(name).map(Vec::as_slice)
    }
}

impl RowSource for MemoryStore {
    #[instrument(name = "MemoryStore query", level = "debug", skip_all, fields(table = query.table))]
    fn query_rows(&self, query: &RowQuery<'_>) -> Result<Vec<Row>> {
        let rows = self
            .tables
            .get(query.table)
            .ok_or_else(|| DataError::UnknownTable(query.table.to_owned()))?;

        let matched: Vec<Row> = rows
            .iter()
            .filter(|row| query.accepts(row))
            .cloned()
            .collect();
        debug!(scanned = rows.len(), matched = matched.len(), "Filtered rows");
        Ok(matched)
    }
}
