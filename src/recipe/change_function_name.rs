use crate::*;

/// Renames SQL function calls, e.g. Oracle's `NVL` to `COALESCE`.
#[derive(Debug)]
pub struct ChangeFunctionName {
    engine: Engine,
    renamer: FunctionRenamer,
    queries: Rows<QueryRow>,
}

impl Recipe for ChangeFunctionName {
    fn display_name(&self) -> &'static str {
        "Change a SQL function name"
    }

    fn description(&self) -> &'static str {
        "When migrating between dialects, often one name can be substituted for another."
    }
}

impl ChangeFunctionName {
    /// `old_function_name` is a case-insensitive glob. The new name follows
    /// the casing of each call it replaces.
    pub fn new(old_function_name: &str, new_function_name: &str) -> Result<Self> {
        Self::with_engine(Engine::default(), old_function_name, new_function_name)
    }

    pub fn with_engine(
        engine: Engine,
        old_function_name: &str,
        new_function_name: &str,
    ) -> Result<Self> {
        Ok(Self {
            engine,
            renamer: FunctionRenamer::new(old_function_name, new_function_name)?,
            queries: Rows::new("Database queries", "Queries found in the source."),
        })
    }

    pub fn queries(&self) -> &Rows<QueryRow> {
        &self.queries
    }

    pub fn visit(&self, host: &HostNode, location: &SourceLocation) -> HostNode {
        let Some(view) = self.engine.view(host) else {
            return host.clone();
        };
        let calls = self.renamer.matches(view.statement());
        if calls == 0 {
            return host.clone();
        }
        for _ in 0..calls {
            self.queries.insert_row(QueryRow {
                source_path: location.unix_path(),
                query: view.text().to_string(),
            });
        }
        view.rewrite(&self.renamer)
    }
}
