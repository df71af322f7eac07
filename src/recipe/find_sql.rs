use crate::*;

/// Reports the tables and columns used by SQL in literals, scalars and `.sql`
/// files.
#[derive(Debug)]
pub struct FindSql {
    engine: Engine,
    used: Rows<UsageRow>,
}

impl Default for FindSql {
    fn default() -> Self {
        Self::new(Engine::default())
    }
}

impl Recipe for FindSql {
    fn display_name(&self) -> &'static str {
        "Find SQL in code and resource files"
    }

    fn description(&self) -> &'static str {
        "Find SQL in code (e.g. in string literals) and in resources like those ending with `.sql`."
    }
}

impl FindSql {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            used: Rows::new(
                "Database columns used",
                "Shows which database columns are read/written by a SQL statement.",
            ),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Engine::from_config(config)?))
    }

    pub fn used(&self) -> &Rows<UsageRow> {
        &self.used
    }

    pub fn visit(&self, host: &HostNode, location: &SourceLocation) -> HostNode {
        if let HostKind::PlainText { .. } = host.kind
            && !location.source_path.ends_with(".sql")
        {
            return host.clone();
        }
        let Some(view) = self.engine.view(host) else {
            return host.clone();
        };
        let rows = extract_usage(view.statement(), location);
        if rows.is_empty() {
            return host.clone();
        }
        debug!(
            "Found {} column usage(s) in {}:{}",
            rows.len(),
            location.source_path,
            location.line
        );
        for row in rows {
            self.used.insert_row(row);
        }
        host.clone().mark_found(None)
    }
}
