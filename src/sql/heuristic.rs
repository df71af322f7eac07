//! Cheap keyword gate run before any candidate text is handed to the parser.
//!
//! The gate never rejects a real statement (every statement of interest
//! contains one of the keywords) but accepts plenty of prose; the parser
//! sorts those out.
use crate::*;
use itertools::Itertools as _;
use regex::Regex;
use std::sync::LazyLock;

static DML_HEURISTIC: LazyLock<Regex> = LazyLock::new(|| gate(&Keyword::DML));
static DDL_HEURISTIC: LazyLock<Regex> = LazyLock::new(|| gate(&Keyword::DDL));

fn gate(keywords: &[Keyword]) -> Regex {
    let alternatives = keywords.iter().map(|k| k.as_str()).join("|");
    Regex::new(&format!("(?i){alternatives}")).expect("keyword alternation is a valid regex")
}

/// True if the text mentions `SELECT`, `UPDATE`, `DELETE` or `INSERT` in any case.
pub fn probably_sql(maybe_sql: Option<&str>) -> bool {
    let hit = maybe_sql.is_some_and(|sql| DML_HEURISTIC.is_match(sql));
    if !hit {
        trace!("Heuristic miss (dml) for {maybe_sql:?}");
    }
    hit
}

/// True if the text mentions `CREATE`, `ALTER`, `DROP` or `TRUNCATE` in any case.
pub fn probably_ddl(maybe_ddl: Option<&str>) -> bool {
    maybe_ddl.is_some_and(|sql| DDL_HEURISTIC.is_match(sql))
}
