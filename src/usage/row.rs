use derive_more::Display;
use serde::Serialize;

/// Whether a column is read or written, and how.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operation {
    #[display("SELECT")]
    Select,
    #[display("UPDATE")]
    Update,
    #[display("INSERT")]
    Insert,
    #[display("DELETE")]
    Delete,
}

/// Where a piece of SQL was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub source_path: String,
    pub line: usize,
    pub revision: Option<String>,
}

impl SourceLocation {
    pub fn new(source_path: impl Into<String>, line: usize) -> Self {
        Self {
            source_path: source_path.into(),
            line,
            revision: None,
        }
    }

    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    /// The path with `/` separators regardless of the platform it came from.
    pub fn unix_path(&self) -> String {
        self.source_path.replace('\\', "/")
    }
}

/// One table or column read or written by a statement.
///
/// `column` is `None` only for whole-table operations (DELETE). A wildcard
/// projection carries its token (`*`, `t.*`) as the column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRow {
    pub source_path: String,
    #[serde(rename = "lineNumber")]
    pub line: usize,
    pub revision: Option<String>,
    pub operation: Operation,
    pub table: String,
    pub column: Option<String>,
}
