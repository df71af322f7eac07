//! Parser adapter: turns candidate text into a statement tree or a typed failure.
use crate::*;
use sqlparser::ast::Statement;
use sqlparser::parser::Parser;

pub struct SqlParser {
    dialect: SharedDialect,
}

impl Default for SqlParser {
    fn default() -> Self {
        Self {
            dialect: Box::new(sqlparser::dialect::GenericDialect {}),
        }
    }
}

impl std::fmt::Debug for SqlParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlParser")
            .field("dialect", &self.dialect)
            .finish()
    }
}

impl SqlParser {
    pub fn new(dialect: SharedDialect) -> Self {
        Self { dialect }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(dialect_for(&config.dialect)?))
    }

    /// Parse the whole text and return its first statement.
    pub fn parse(&self, sql: &str) -> Result<Statement> {
        self.parse_all(sql)?
            .into_iter()
            .next()
            .ok_or(Error::EmptyQuery)
    }

    pub fn parse_all(&self, sql: &str) -> Result<Vec<Statement>> {
        Ok(Parser::parse_sql(&*self.dialect, sql)?)
    }

    /// Validity check for text that may hold several `;`-separated statements.
    ///
    /// Every non-blank segment must parse on its own. A `;` inside a string
    /// literal or a procedural body splits the text too, so such SQL is
    /// reported as invalid.
    pub fn is_sql(&self, maybe_sql: Option<&str>) -> bool {
        let Some(sql) = maybe_sql else {
            return false;
        };
        if !(probably_sql(Some(sql)) || probably_ddl(Some(sql))) {
            return false;
        }
        sql.split(';')
            .filter(|segment| !segment.trim().is_empty())
            .all(|segment| match self.parse(segment) {
                Ok(_) => true,
                Err(e) => {
                    debug!("Segment is not valid SQL: {e}");
                    false
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest]
    #[case("SELECT 1")]
    #[case("select name from users where id = 1")]
    #[case("DELETE FROM access_token WHERE email = :email")]
    fn when_valid_statement_then_success(#[case] sql: &str) {
        let parser = SqlParser::default();
        let result = parser.parse(sql);
        assert!(result.is_ok(), "Expected Ok(Statement), got {result:?}");
    }

    #[rstest]
    #[case("This will be SELECTed by the heuristic but not parse as SQL")]
    #[case("UPDATE")]
    fn when_invalid_statement_then_typed_failure(#[case] sql: &str) {
        let parser = SqlParser::default();
        assert!(matches!(parser.parse(sql), Err(Error::InvalidQuery(_))));
    }

    #[test]
    fn when_blank_then_empty_query() {
        assert!(matches!(
            SqlParser::default().parse("  "),
            Err(Error::EmptyQuery)
        ));
    }

    #[test]
    fn parses_first_statement_only() {
        let statement = SqlParser::default()
            .parse("SELECT a FROM t; DELETE FROM t")
            .expect("both statements parse");
        assert!(matches!(statement, Statement::Query(_)));
    }

    #[rstest]
    #[case("UPDATE tab SET x = y")]
    #[case("DELETE FROM table_name WHERE condition = true;")]
    #[case("Truncate tab")]
    #[case("DROP FUNCTION func CASCADE")]
    #[case("SELECT a FROM t;\nSELECT b FROM u;\n")]
    fn is_sql(#[case] sql: &str) {
        assert!(SqlParser::default().is_sql(Some(sql)));
    }

    #[rstest]
    #[case("This will be SELECTed by the heuristic but not parse as SQL")]
    #[case("The heuristic won't match this at all")]
    #[case("SELECT a FROM t; not sql at all")]
    #[case("SELECT 'a;b' FROM t")]
    fn is_not_sql(#[case] sql: &str) {
        assert!(!SqlParser::default().is_sql(Some(sql)));
    }

    #[test]
    fn absent_text_is_not_sql() {
        assert!(!SqlParser::default().is_sql(None));
    }

    #[test]
    fn from_config_uses_dialect() {
        let config = Config {
            dialect: "postgresql".into(),
            tab_size: 4,
            use_tabs: false,
            indent: "  ".into(),
        };
        let parser = SqlParser::from_config(&config).expect("known dialect");
        assert!(parser.parse("SELECT $1::int").is_ok());
    }
}
