//! Tabular sinks that recipes report into.
//!
//! Sinks are shared by every worker visiting documents, so inserting takes
//! `&self`.
use parking_lot::Mutex;
use serde::Serialize;

pub trait DataTable<R> {
    fn insert_row(&self, row: R);
}

/// An append-only, thread-safe list of rows.
#[derive(Debug)]
pub struct Rows<R> {
    display_name: &'static str,
    description: &'static str,
    rows: Mutex<Vec<R>>,
}

impl<R> Rows<R> {
    pub fn new(display_name: &'static str, description: &'static str) -> Self {
        Self {
            display_name,
            description,
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn len(&self) -> usize {
        self.rows.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().is_empty()
    }

    pub fn into_inner(self) -> Vec<R> {
        self.rows.into_inner()
    }
}

impl<R: Clone> Rows<R> {
    pub fn snapshot(&self) -> Vec<R> {
        self.rows.lock().clone()
    }
}

impl<R> DataTable<R> for Rows<R> {
    fn insert_row(&self, row: R) {
        self.rows.lock().push(row);
    }
}

/// A query seen while searching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRow {
    pub source_path: String,
    pub query: String,
}
