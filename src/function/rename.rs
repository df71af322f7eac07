//! Renaming function calls without touching anything else in the query.
//!
//! The parser keeps the source position of every identifier, so renamed call
//! names are spliced into the raw text at those positions. The result carries
//! the byte range of each replacement.
use crate::*;
use sqlparser::ast::{Expr, Function, Ident, Statement, visit_expressions};
use sqlparser::tokenizer::Span;
use std::ops::{ControlFlow, Range};

/// Rewritten SQL plus the ranges of `text` that differ from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedSql {
    pub text: String,
    pub changes: Vec<Range<usize>>,
}

impl TrackedSql {
    pub fn is_changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct FunctionRenamer {
    pattern: GlobPattern,
    new_name: String,
}

struct Replacement {
    span: TextSpan,
    name: String,
}

impl FunctionRenamer {
    pub fn new(old_pattern: &str, new_name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            pattern: GlobPattern::new(old_pattern)?,
            new_name: new_name.into(),
        })
    }

    pub fn pattern(&self) -> &GlobPattern {
        &self.pattern
    }

    /// Number of calls in `statement` this renamer would rename.
    pub fn matches(&self, statement: &Statement) -> usize {
        function_names(statement)
            .iter()
            .filter(|name| self.pattern.matches(name))
            .count()
    }

    pub fn track(&self, sql: &str, statement: &Statement) -> Result<TrackedSql> {
        let mut replacements = self.replacements(sql, statement)?;
        replacements.sort_by_key(|r| r.span);

        let mut text = String::with_capacity(sql.len());
        let mut changes = Vec::with_capacity(replacements.len());
        let mut cursor = 0;
        for Replacement { span, name } in replacements {
            if span.start < cursor {
                warn!("Skipping overlapping rename at {span:?}");
                continue;
            }
            text.push_str(&sql[cursor..span.start]);
            let start = text.len();
            text.push_str(&name);
            changes.push(start..text.len());
            cursor = span.end;
        }
        text.push_str(&sql[cursor..]);
        Ok(TrackedSql { text, changes })
    }

    fn replacements(&self, sql: &str, statement: &Statement) -> Result<Vec<Replacement>> {
        let mut calls = Vec::new();
        let _ = visit_expressions(statement, |expr| {
            if let Expr::Function(function) = expr
                && self.pattern.matches(&dotted_name(&function.name))
            {
                calls.push(self.replacement(sql, function));
            }
            ControlFlow::<()>::Continue(())
        });
        calls.into_iter().collect()
    }

    fn replacement(&self, sql: &str, function: &Function) -> Result<Replacement> {
        let parts: Vec<&Ident> = name_parts(&function.name).collect();
        let (Some(first), Some(last)) = (parts.first(), parts.last()) else {
            return Err(Error::Internal(format!(
                "function without a name: {function}"
            )));
        };
        let span = TextSpan::resolve(sql, Span::new(first.span.start, last.span.end))
            .ok_or_else(|| {
                Error::Internal(format!("no source position for function {}", function.name))
            })?;
        let written = &sql[span.range()];
        if !written.to_lowercase().contains(&last.value.to_lowercase()) {
            return Err(Error::Internal(format!(
                "source position of {} points at {written:?}",
                function.name
            )));
        }
        Ok(Replacement {
            span,
            name: quote(self.cased(written), last.quote_style),
        })
    }

    /// The new name, upper-cased when the call was written in upper case.
    fn cased(&self, written: &str) -> String {
        let mut letters = written.chars().filter(|c| c.is_alphabetic()).peekable();
        let upper = letters.peek().is_some() && letters.all(char::is_uppercase);
        if upper {
            self.new_name.to_uppercase()
        } else {
            self.new_name.clone()
        }
    }
}

fn quote(name: String, style: Option<char>) -> String {
    match style {
        Some('[') => format!("[{name}]"),
        Some(q) => format!("{q}{name}{q}"),
        None => name,
    }
}

impl Rewrite for FunctionRenamer {
    fn rewrite(&self, sql: &str, statement: &Statement) -> Result<String> {
        Ok(self.track(sql, statement)?.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rename(sql: &str, old: &str, new: &str) -> TrackedSql {
        let statement = SqlParser::default().parse(sql).expect("valid sql");
        FunctionRenamer::new(old, new)
            .expect("valid pattern")
            .track(sql, &statement)
            .expect("renamed")
    }

    #[test]
    fn only_the_name_changes() {
        let tracked = rename("select nvl(a,b) from t", "nvl", "coalesce");
        assert_eq!(tracked.text, "select coalesce(a,b) from t");
        assert_eq!(tracked.changes, vec![7..15]);
        assert_eq!(&tracked.text[7..15], "coalesce");
    }

    #[test]
    fn formatting_around_calls_is_untouched() {
        let sql = "SELECT\n    nvl( a ,b )  AS x,\n    nvl(c, d)\nFROM t -- trailing\n";
        let tracked = rename(sql, "NVL", "coalesce");
        assert_eq!(
            tracked.text,
            "SELECT\n    coalesce( a ,b )  AS x,\n    coalesce(c, d)\nFROM t -- trailing\n"
        );
        assert_eq!(tracked.changes.len(), 2);
    }

    #[test]
    fn upper_case_calls_stay_upper_case() {
        let tracked = rename("SELECT NVL(a, b) FROM t", "nvl", "coalesce");
        assert_eq!(tracked.text, "SELECT COALESCE(a, b) FROM t");
    }

    #[test]
    fn nested_calls_are_all_renamed() {
        let tracked = rename("SELECT nvl(nvl(a, b), c) FROM t", "nvl", "coalesce");
        assert_eq!(tracked.text, "SELECT coalesce(coalesce(a, b), c) FROM t");
    }

    #[test]
    fn quoted_names_keep_quotes() {
        let tracked = rename("SELECT \"nvl\"(a, b) FROM t", "nvl", "coalesce");
        assert_eq!(tracked.text, "SELECT \"coalesce\"(a, b) FROM t");
    }

    #[test]
    fn qualified_names_are_replaced_whole() {
        let tracked = rename("SELECT pkg.nvl(a, b) FROM t", "pkg.nvl", "coalesce");
        assert_eq!(tracked.text, "SELECT coalesce(a, b) FROM t");
    }

    #[test]
    fn multi_byte_text_before_the_call() {
        let tracked = rename("SELECT 'café', nvl(a, b) FROM t", "nvl", "coalesce");
        assert_eq!(tracked.text, "SELECT 'café', coalesce(a, b) FROM t");
    }

    #[test]
    fn no_match_leaves_text_as_is() {
        let tracked = rename("select upper(a) from t", "nvl", "coalesce");
        assert_eq!(tracked.text, "select upper(a) from t");
        assert!(!tracked.is_changed());
    }

    #[test]
    fn renaming_back_restores_the_query() {
        let sql = "select nvl(a,b) from t where nvl(c, 1) > 0";
        let forward = rename(sql, "nvl", "coalesce");
        let back = rename(&forward.text, "coalesce", "nvl");
        let parser = SqlParser::default();
        assert_eq!(
            parser.parse(&back.text).expect("valid sql").to_string(),
            parser.parse(sql).expect("valid sql").to_string()
        );
    }

    #[test]
    fn counts_matching_calls() {
        let statement = SqlParser::default()
            .parse("SELECT nvl(a, b), NVL(c, d), upper(e) FROM t")
            .expect("valid sql");
        let renamer = FunctionRenamer::new("nvl", "coalesce").expect("valid pattern");
        assert_eq!(renamer.matches(&statement), 2);
    }

    #[test]
    fn renames_through_query_view() {
        let engine = Engine::default();
        let host = HostNode::quoted("select nvl(a,b) from t");
        let view = engine.view(&host).expect("valid sql");
        let renamer = FunctionRenamer::new("nvl", "coalesce").expect("valid pattern");
        let rewritten = view.rewrite(&renamer);
        assert_eq!(rewritten.text(), "select coalesce(a,b) from t");
        assert_eq!(rewritten.source(), Some("\"select coalesce(a,b) from t\""));
    }
}
