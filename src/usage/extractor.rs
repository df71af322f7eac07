//! Table and column usage of a parsed statement.
//!
//! Extraction threads an immutable [`Scope`] through the recursion. A nested
//! query starts from a fresh scope, so nothing it sees leaks into its parent.
use crate::*;
use sqlparser::ast::{
    Assignment, AssignmentTarget, Delete, Expr, FromTable, Query, Select, SelectItem, SetExpr,
    Statement, TableFactor, TableWithJoins, Visit, Visitor,
};
use std::ops::ControlFlow;

/// Statement kinds the extractor distinguishes.
#[derive(Debug, Clone, Copy)]
pub enum StatementKind<'a> {
    Select(&'a Query),
    Update {
        table: &'a TableWithJoins,
        assignments: &'a [Assignment],
    },
    Delete(&'a Delete),
    Insert,
    Other,
}

impl<'a> StatementKind<'a> {
    pub fn of(statement: &'a Statement) -> Self {
        match statement {
            Statement::Query(query) => Self::Select(query),
            Statement::Update(update) => Self::Update {
                table: &update.table,
                assignments: &update.assignments,
            },
            Statement::Delete(delete) => Self::Delete(delete),
            Statement::Insert(_) => Self::Insert,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Scope<'a> {
    location: &'a SourceLocation,
    operation: Operation,
    table: Option<&'a str>,
}

impl<'a> Scope<'a> {
    fn new(location: &'a SourceLocation, operation: Operation) -> Self {
        Self {
            location,
            operation,
            table: None,
        }
    }

    fn with_table(self, table: Option<&'a str>) -> Self {
        Self { table, ..self }
    }

    /// A scope for a query nested inside this one.
    fn nested(self) -> Self {
        Self::new(self.location, Operation::Select)
    }

    fn row(&self, column: Option<String>) -> Option<UsageRow> {
        let table = self.table?;
        if column.as_deref().is_some_and(str::is_empty) {
            return None;
        }
        Some(UsageRow {
            source_path: self.location.unix_path(),
            line: self.location.line,
            revision: self.location.revision.clone(),
            operation: self.operation,
            table: table.to_string(),
            column,
        })
    }
}

/// Usage rows of `statement`, in the order the query mentions them.
pub fn extract_usage(statement: &Statement, location: &SourceLocation) -> Vec<UsageRow> {
    let mut rows = Vec::new();
    match StatementKind::of(statement) {
        StatementKind::Select(query) => {
            extract_query(query, Scope::new(location, Operation::Select), &mut rows)
        }
        StatementKind::Update { table, assignments } => extract_update(
            table,
            assignments,
            Scope::new(location, Operation::Update),
            &mut rows,
        ),
        StatementKind::Delete(delete) => {
            extract_delete(delete, Scope::new(location, Operation::Delete), &mut rows)
        }
        StatementKind::Insert => trace!("INSERT usage is not extracted"),
        StatementKind::Other => trace!("No usage extracted for statement kind"),
    }
    rows
}

fn extract_query(query: &Query, scope: Scope<'_>, rows: &mut Vec<UsageRow>) {
    extract_set_expr(&query.body, scope, rows);
    let ctes = query.with.iter().flat_map(|with| &with.cte_tables);
    for cte in ctes {
        extract_query(&cte.query, scope.nested(), rows);
    }
    extract_children(&query.order_by, scope, rows);
}

/// Each set-operation branch is followed by its own nested queries.
fn extract_set_expr(body: &SetExpr, scope: Scope<'_>, rows: &mut Vec<UsageRow>) {
    match body {
        SetExpr::Select(select) => {
            extract_select(select, scope, rows);
            extract_children(select.as_ref(), scope, rows);
        }
        SetExpr::SetOperation { left, right, .. } => {
            extract_set_expr(left, scope.nested(), rows);
            extract_set_expr(right, scope.nested(), rows);
        }
        SetExpr::Query(query) => extract_query(query, scope.nested(), rows),
        other => extract_children(other, scope, rows),
    }
}

fn extract_children<T: Visit + ?Sized>(node: &T, scope: Scope<'_>, rows: &mut Vec<UsageRow>) {
    for child in child_queries(node) {
        extract_query(&child, scope.nested(), rows);
    }
}

fn extract_select(select: &Select, scope: Scope<'_>, rows: &mut Vec<UsageRow>) {
    let Some(table) = select.from.first().and_then(primary_table) else {
        trace!("Projection has no named source table");
        return;
    };
    let scope = scope.with_table(Some(table));
    for item in &select.projection {
        for column in projected_columns(item) {
            rows.extend(scope.row(Some(column)));
        }
    }
}

fn extract_update(
    target: &TableWithJoins,
    assignments: &[Assignment],
    scope: Scope<'_>,
    rows: &mut Vec<UsageRow>,
) {
    let Some(table) = primary_table(target) else {
        trace!("UPDATE target is not a named table");
        return;
    };
    let scope = scope.with_table(Some(table));
    for assignment in assignments {
        let targets = match &assignment.target {
            AssignmentTarget::ColumnName(name) => std::slice::from_ref(name),
            AssignmentTarget::Tuple(names) => names.as_slice(),
        };
        for target in targets {
            rows.extend(scope.row(base_name(target).map(str::to_string)));
        }
    }
}

fn extract_delete(delete: &Delete, scope: Scope<'_>, rows: &mut Vec<UsageRow>) {
    for name in &delete.tables {
        rows.extend(scope.with_table(base_name(name)).row(None));
    }
    let from = match &delete.from {
        FromTable::WithFromKeyword(tables) | FromTable::WithoutKeyword(tables) => tables,
    };
    if let Some(table) = from.first().and_then(primary_table) {
        rows.extend(scope.with_table(Some(table)).row(None));
    }
}

fn primary_table(source: &TableWithJoins) -> Option<&str> {
    match &source.relation {
        TableFactor::Table { name, .. } => base_name(name),
        _ => None,
    }
}

/// Column names referenced by one projected item, in order.
fn projected_columns(item: &SelectItem) -> Vec<String> {
    match item {
        SelectItem::UnnamedExpr(expr) | SelectItem::ExprWithAlias { expr, .. } => {
            let mut collector = ColumnCollector::default();
            let _ = expr.visit(&mut collector);
            collector.columns
        }
        // `*`, `t.*`, dropping any EXCLUDE/REPLACE options that follow.
        SelectItem::Wildcard(_) | SelectItem::QualifiedWildcard(..) => item
            .to_string()
            .split_whitespace()
            .next()
            .map(|token| vec![token.to_string()])
            .unwrap_or_default(),
        #[allow(unreachable_patterns)]
        _ => Vec::new(),
    }
}

/// Collects column references of an expression without entering subqueries.
#[derive(Default)]
struct ColumnCollector {
    depth: usize,
    columns: Vec<String>,
}

impl Visitor for ColumnCollector {
    type Break = ();

    fn pre_visit_query(&mut self, _query: &Query) -> ControlFlow<Self::Break> {
        self.depth += 1;
        ControlFlow::Continue(())
    }

    fn post_visit_query(&mut self, _query: &Query) -> ControlFlow<Self::Break> {
        self.depth -= 1;
        ControlFlow::Continue(())
    }

    fn pre_visit_expr(&mut self, expr: &Expr) -> ControlFlow<Self::Break> {
        if self.depth > 0 {
            return ControlFlow::Continue(());
        }
        let column = match expr {
            Expr::Identifier(ident) => Some(&ident.value),
            Expr::CompoundIdentifier(parts) => parts.last().map(|ident| &ident.value),
            _ => None,
        };
        self.columns.extend(column.cloned());
        ControlFlow::Continue(())
    }
}

/// Outermost queries inside `node`, in the order the visitor reaches them.
fn child_queries<T: Visit + ?Sized>(node: &T) -> Vec<Query> {
    #[derive(Default)]
    struct Children {
        depth: usize,
        found: Vec<Query>,
    }

    impl Visitor for Children {
        type Break = ();

        fn pre_visit_query(&mut self, query: &Query) -> ControlFlow<Self::Break> {
            self.depth += 1;
            if self.depth == 1 {
                self.found.push(query.clone());
            }
            ControlFlow::Continue(())
        }

        fn post_visit_query(&mut self, _query: &Query) -> ControlFlow<Self::Break> {
            self.depth -= 1;
            ControlFlow::Continue(())
        }
    }

    let mut children = Children::default();
    let _ = node.visit(&mut children);
    children.found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(sql: &str) -> Vec<(Operation, String, Option<String>)> {
        extract_with(&SqlParser::default(), sql)
    }

    fn extract_with(parser: &SqlParser, sql: &str) -> Vec<(Operation, String, Option<String>)> {
        let statement = parser.parse(sql).expect("valid sql");
        extract_usage(&statement, &SourceLocation::new("q.sql", 1))
            .into_iter()
            .map(|row| (row.operation, row.table, row.column))
            .collect()
    }

    fn row(operation: Operation, table: &str, column: Option<&str>) -> (Operation, String, Option<String>) {
        (operation, table.to_string(), column.map(str::to_string))
    }

    #[test]
    fn select_distinct_column() {
        assert_eq!(
            extract("SELECT distinct(repository_origin) FROM recipe_run_repository WHERE run_id = :id"),
            vec![row(
                Operation::Select,
                "recipe_run_repository",
                Some("repository_origin")
            )]
        );
    }

    #[test]
    fn update_assigned_columns() {
        assert_eq!(
            extract("UPDATE commit SET state = 'CANCELED' WHERE state IN ('QUEUED', 'RUNNING')"),
            vec![row(Operation::Update, "commit", Some("state"))]
        );
    }

    #[test]
    fn delete_single_table() {
        assert_eq!(
            extract("DELETE FROM access_token WHERE email = :email"),
            vec![row(Operation::Delete, "access_token", None)]
        );
    }

    #[test]
    fn select_columns_in_declaration_order() {
        assert_eq!(
            extract("SELECT b, u.a, upper(c) AS d FROM public.users u"),
            vec![
                row(Operation::Select, "users", Some("b")),
                row(Operation::Select, "users", Some("a")),
                row(Operation::Select, "users", Some("c")),
            ]
        );
    }

    #[rstest]
    #[case("SELECT * FROM users", "*")]
    #[case("SELECT u.* FROM users u", "u.*")]
    fn wildcard_is_reported_as_token(#[case] sql: &str, #[case] token: &str) {
        assert_eq!(extract(sql), vec![row(Operation::Select, "users", Some(token))]);
    }

    #[test]
    fn update_with_several_assignments() {
        assert_eq!(
            extract("UPDATE users SET name = 'x', email = 'y' WHERE id = 1"),
            vec![
                row(Operation::Update, "users", Some("name")),
                row(Operation::Update, "users", Some("email")),
            ]
        );
    }

    #[test]
    fn multi_table_delete_reports_every_occurrence() {
        let parser = SqlParser::new(dialect_for("mysql").expect("known dialect"));
        assert_eq!(
            extract_with(
                &parser,
                "DELETE t1, t2 FROM t1 INNER JOIN t2 ON t1.id = t2.id WHERE t1.id = 1"
            ),
            vec![
                row(Operation::Delete, "t1", None),
                row(Operation::Delete, "t2", None),
                row(Operation::Delete, "t1", None),
            ]
        );
    }

    #[test]
    fn set_operation_branches_have_their_own_table() {
        assert_eq!(
            extract("SELECT a FROM t UNION SELECT b FROM u"),
            vec![
                row(Operation::Select, "t", Some("a")),
                row(Operation::Select, "u", Some("b")),
            ]
        );
    }

    #[test]
    fn subqueries_follow_outer_projection() {
        assert_eq!(
            extract("SELECT a FROM t WHERE a IN (SELECT b FROM u)"),
            vec![
                row(Operation::Select, "t", Some("a")),
                row(Operation::Select, "u", Some("b")),
            ]
        );
    }

    #[test]
    fn branch_subqueries_come_before_later_branches() {
        assert_eq!(
            extract("SELECT a FROM t WHERE a IN (SELECT c FROM v) UNION SELECT b FROM u"),
            vec![
                row(Operation::Select, "t", Some("a")),
                row(Operation::Select, "v", Some("c")),
                row(Operation::Select, "u", Some("b")),
            ]
        );
    }

    #[test]
    fn parenthesized_branches_are_extracted() {
        assert_eq!(
            extract("(SELECT a FROM t) UNION (SELECT b FROM u)"),
            vec![
                row(Operation::Select, "t", Some("a")),
                row(Operation::Select, "u", Some("b")),
            ]
        );
    }

    #[test]
    fn projection_subquery_does_not_leak_outer_table() {
        assert_eq!(
            extract("SELECT a, (SELECT max(b) FROM u) FROM t"),
            vec![
                row(Operation::Select, "t", Some("a")),
                row(Operation::Select, "u", Some("b")),
            ]
        );
    }

    #[test]
    fn derived_table_is_extracted_on_its_own() {
        assert_eq!(
            extract("SELECT x FROM (SELECT y FROM u) AS d"),
            vec![row(Operation::Select, "u", Some("y"))]
        );
    }

    #[test]
    fn common_table_expressions_are_extracted() {
        assert_eq!(
            extract("WITH recent AS (SELECT id FROM runs) SELECT id FROM recent"),
            vec![
                row(Operation::Select, "recent", Some("id")),
                row(Operation::Select, "runs", Some("id")),
            ]
        );
    }

    #[rstest]
    #[case("INSERT INTO users (id, name) VALUES (1, 'a')")]
    #[case("CREATE TABLE users (id INT)")]
    #[case("SELECT 1")]
    fn statements_without_usage(#[case] sql: &str) {
        assert!(extract(sql).is_empty());
    }

    #[test]
    fn rows_carry_location() {
        let statement = SqlParser::default()
            .parse("DELETE FROM t")
            .expect("valid sql");
        let location = SourceLocation::new(r"src\q.sql", 7).with_revision("abc");
        let rows = extract_usage(&statement, &location);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].source_path, "src/q.sql");
        assert_eq!(rows[0].line, 7);
        assert_eq!(rows[0].revision.as_deref(), Some("abc"));
    }

    #[rstest]
    #[case("SELECT a FROM t", "Select")]
    #[case("UPDATE t SET a = 1", "Update")]
    #[case("DELETE FROM t", "Delete")]
    #[case("INSERT INTO t VALUES (1)", "Insert")]
    #[case("DROP TABLE t", "Other")]
    fn statement_kinds(#[case] sql: &str, #[case] kind: &str) {
        let statement = SqlParser::default().parse(sql).expect("valid sql");
        let debug = format!("{:?}", StatementKind::of(&statement));
        assert!(debug.starts_with(kind), "{debug} should be {kind}");
    }
}
