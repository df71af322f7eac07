use crate::*;

/// Finds SQL function calls by name.
#[derive(Debug)]
pub struct FindFunction {
    engine: Engine,
    pattern: GlobPattern,
    queries: Rows<QueryRow>,
    functions: Rows<FunctionMatch>,
}

impl Recipe for FindFunction {
    fn display_name(&self) -> &'static str {
        "Find SQL function"
    }

    fn description(&self) -> &'static str {
        "Find SQL functions by name."
    }
}

impl FindFunction {
    /// `function_name` is a case-insensitive glob.
    pub fn new(function_name: &str) -> Result<Self> {
        Self::with_engine(Engine::default(), function_name)
    }

    pub fn with_engine(engine: Engine, function_name: &str) -> Result<Self> {
        Ok(Self {
            engine,
            pattern: GlobPattern::new(function_name)?,
            queries: Rows::new("Database queries", "Queries found in the source."),
            functions: Rows::new(
                "Database functions",
                "Functions called by queries found in the source.",
            ),
        })
    }

    pub fn queries(&self) -> &Rows<QueryRow> {
        &self.queries
    }

    pub fn functions(&self) -> &Rows<FunctionMatch> {
        &self.functions
    }

    pub fn visit(&self, host: &HostNode, location: &SourceLocation) -> HostNode {
        let Some(view) = self.engine.view(host) else {
            return host.clone();
        };
        let matches = find_calls(view.statement(), &self.pattern, location);
        if matches.is_empty() {
            return host.clone();
        }
        for found in matches {
            self.queries.insert_row(QueryRow {
                source_path: found.source_path.clone(),
                query: view.text().to_string(),
            });
            self.functions.insert_row(found);
        }
        host.clone().mark_found(None)
    }
}
