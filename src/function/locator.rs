use crate::*;
use serde::Serialize;
use sqlparser::ast::{Expr, Statement, visit_expressions};
use std::ops::ControlFlow;

/// A function call matched by [`find_calls`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionMatch {
    pub source_path: String,
    /// Dotted name of the call, lowercased.
    pub function_name: String,
    /// The whole statement as the parser prints it.
    pub query_text: String,
}

/// Names of every function call in `statement`, in visiting order.
pub fn function_names(statement: &Statement) -> Vec<String> {
    let mut names = Vec::new();
    let _ = visit_expressions(statement, |expr| {
        if let Expr::Function(function) = expr {
            names.push(dotted_name(&function.name));
        }
        ControlFlow::<()>::Continue(())
    });
    names
}

/// Every call in `statement` whose name matches `pattern`.
pub fn find_calls(
    statement: &Statement,
    pattern: &GlobPattern,
    location: &SourceLocation,
) -> Vec<FunctionMatch> {
    let matched: Vec<String> = function_names(statement)
        .into_iter()
        .filter(|name| pattern.matches(name))
        .collect();
    if matched.is_empty() {
        return Vec::new();
    }
    let query_text = statement.to_string();
    let source_path = location.unix_path();
    matched
        .into_iter()
        .map(|name| FunctionMatch {
            source_path: source_path.clone(),
            function_name: name.to_lowercase(),
            query_text: query_text.clone(),
        })
        .collect()
}
