use crate::*;
use itertools::Itertools as _;

/// Produces the canonical text of a SQL string.
pub trait SqlFormatter {
    fn format(&self, sql: &str) -> Result<String>;
}

const PRINTER_INDENT: &str = "  ";

/// Canonical formatting through the parser's pretty printer.
#[derive(Debug, Default)]
pub struct PrettyFormatter {
    parser: SqlParser,
    indent: Option<String>,
}

impl PrettyFormatter {
    pub fn new(parser: SqlParser) -> Self {
        Self {
            parser,
            indent: None,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(SqlParser::from_config(config)?).with_indent(&config.indent))
    }

    /// Use `indent` for every nesting level instead of two spaces.
    pub fn with_indent(mut self, indent: &str) -> Self {
        self.indent = (indent != PRINTER_INDENT).then(|| indent.to_string());
        self
    }

    fn render_indent(&self, line: &str) -> String {
        let Some(indent) = &self.indent else {
            return line.to_string();
        };
        let mut depth = 0;
        let mut rest = line;
        while let Some(stripped) = rest.strip_prefix(PRINTER_INDENT) {
            depth += 1;
            rest = stripped;
        }
        format!("{}{rest}", indent.repeat(depth))
    }
}

impl SqlFormatter for PrettyFormatter {
    fn format(&self, sql: &str) -> Result<String> {
        let statements = self.parser.parse_all(sql)?;
        if statements.is_empty() {
            return Err(Error::EmptyQuery);
        }
        let mut formatted = statements
            .iter()
            .map(|statement| {
                format!("{statement:#}")
                    .lines()
                    .map(|line| self.render_indent(line))
                    .join("\n")
            })
            .join(";\n\n");
        if sql.trim_end().ends_with(';') {
            formatted.push(';');
        }
        trace!("Formatted {} statement(s)", statements.len());
        Ok(formatted)
    }
}
