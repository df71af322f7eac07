use crate::*;
use sqlparser::ast::Statement;

/// Parser plus the host's indentation style: everything a view needs.
#[derive(Debug, Default)]
pub struct Engine {
    pub parser: SqlParser,
    pub style: IndentStyle,
}

impl Engine {
    pub fn new(parser: SqlParser, style: IndentStyle) -> Self {
        Self { parser, style }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            SqlParser::from_config(config)?,
            config.indent_style(),
        ))
    }

    /// View a host node as SQL.
    ///
    /// `None` when the heuristic rejects the text or the parser does; a view
    /// always holds a successfully parsed statement.
    pub fn view<'a>(&'a self, host: &'a HostNode) -> Option<QueryView<'a>> {
        let text = host.text();
        if !probably_sql(Some(text)) {
            return None;
        }
        match self.parser.parse(text) {
            Ok(statement) => Some(QueryView {
                engine: self,
                host,
                statement,
            }),
            Err(e) => {
                debug!("Skipping text that does not parse as SQL: {e}");
                None
            }
        }
    }
}

/// A host node paired with the statement parsed from its text.
#[derive(Debug)]
pub struct QueryView<'a> {
    engine: &'a Engine,
    host: &'a HostNode,
    statement: Statement,
}

impl QueryView<'_> {
    pub fn host(&self) -> &HostNode {
        self.host
    }

    pub fn text(&self) -> &str {
        self.host.text()
    }

    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Rewrite the query and embed the result into a new version of the host.
    ///
    /// Any failure leaves the host as it was.
    pub fn rewrite<R: Rewrite + ?Sized>(&self, rewriter: &R) -> HostNode {
        self.try_rewrite(rewriter).unwrap_or_else(|e| {
            warn!("Rewrite failed, keeping original text: {e}");
            self.host.clone()
        })
    }

    pub fn try_rewrite<R: Rewrite + ?Sized>(&self, rewriter: &R) -> Result<HostNode> {
        let sql = rewriter.rewrite(self.text(), &self.statement)?;
        if sql == self.text() {
            return Ok(self.host.clone());
        }
        if let Err(e) = self.engine.parser.parse(&sql) {
            warn!("Rewritten query no longer parses: {sql}");
            return Err(e);
        }
        Ok(self.host.with_sql(&sql, &self.engine.style))
    }
}
