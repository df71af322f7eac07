#![cfg(test)]
pub use rstest::*;

use crate::*;

pub(crate) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Only initialize once for all tests
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env()) // <- reads RUST_LOG
            .with_test_writer() // ensures it integrates with `cargo test` output
            .init();
    });
}

#[fixture]
pub fn engine() -> Engine {
    common_init();
    Engine::default()
}

#[fixture]
pub fn location() -> SourceLocation {
    common_init();
    SourceLocation::new("src/main/java/com/example/Repository.java", 12)
}

mod scenarios {
    use super::*;

    fn rows_of(engine: &Engine, host: &HostNode) -> Vec<UsageRow> {
        let location = SourceLocation::new("Test.java", 1);
        engine
            .view(host)
            .map(|view| extract_usage(view.statement(), &location))
            .unwrap_or_default()
    }

    #[rstest]
    #[case(
        "SELECT distinct(repository_origin) FROM recipe_run_repository WHERE run_id = :id",
        Operation::Select,
        "recipe_run_repository",
        Some("repository_origin")
    )]
    #[case(
        "UPDATE commit SET state = 'CANCELED' WHERE state IN ('QUEUED', 'RUNNING')",
        Operation::Update,
        "commit",
        Some("state")
    )]
    #[case(
        "DELETE FROM access_token WHERE email = :email",
        Operation::Delete,
        "access_token",
        None
    )]
    fn single_row_per_statement(
        engine: Engine,
        #[case] sql: &str,
        #[case] operation: Operation,
        #[case] table: &str,
        #[case] column: Option<&str>,
    ) {
        let rows = rows_of(&engine, &HostNode::quoted(sql));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].operation, operation);
        assert_eq!(rows[0].table, table);
        assert_eq!(rows[0].column.as_deref(), column);
    }

    #[rstest]
    fn prose_passes_heuristic_but_not_parser(engine: Engine) {
        let text = "This will be SELECTed by the heuristic but not parse as SQL";
        assert!(probably_sql(Some(text)));
        let host = HostNode::quoted(text);
        assert!(rows_of(&engine, &host).is_empty());
        let recipe = ChangeFunctionName::new("nvl", "coalesce").expect("valid pattern");
        assert_eq!(recipe.visit(&host, &SourceLocation::new("Test.java", 1)), host);
    }

    #[rstest]
    fn rename_changes_only_the_function(engine: Engine) {
        let host = HostNode::plain_text("select nvl(a,b) from t");
        let view = engine.view(&host).expect("valid sql");
        let renamer = FunctionRenamer::new("nvl", "coalesce").expect("valid pattern");
        assert_eq!(view.rewrite(&renamer).text(), "select coalesce(a,b) from t");
    }
}
