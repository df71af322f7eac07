use crate::*;
use sqlparser::ast::Statement;

/// Re-serialization of a parsed statement back into SQL text.
///
/// `sql` is the raw text `statement` was parsed from, so implementations may
/// splice into it instead of printing the tree.
pub trait Rewrite {
    fn rewrite(&self, sql: &str, statement: &Statement) -> Result<String>;
}

/// Prints the statement as the parser renders it, changing nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reserialize;

impl Rewrite for Reserialize {
    fn rewrite(&self, _sql: &str, statement: &Statement) -> Result<String> {
        Ok(statement.to_string())
    }
}
