use crate::*;

/// Formats SQL held in text blocks.
#[derive(Debug)]
pub struct FormatSql<F = PrettyFormatter> {
    engine: Engine,
    formatter: F,
}

impl Default for FormatSql {
    fn default() -> Self {
        Self::new(PrettyFormatter::default())
    }
}

impl<F> Recipe for FormatSql<F> {
    fn display_name(&self) -> &'static str {
        "Format SQL in String Text Blocks"
    }

    fn description(&self) -> &'static str {
        "Checks whether a text block may contain SQL, and if so, formats the text accordingly."
    }
}

impl FormatSql {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::with_engine(
            Engine::from_config(config)?,
            PrettyFormatter::from_config(config)?,
        ))
    }
}

impl<F: SqlFormatter> FormatSql<F> {
    pub fn new(formatter: F) -> Self {
        Self::with_engine(Engine::default(), formatter)
    }

    pub fn with_engine(engine: Engine, formatter: F) -> Self {
        Self { engine, formatter }
    }

    pub fn visit(&self, host: &HostNode) -> HostNode {
        let Some(body) = host.text_block_body() else {
            return host.clone();
        };
        let value = host.text();
        if !self.engine.parser.is_sql(Some(value)) {
            return host.clone();
        }
        let formatted = match self.formatter.format(value) {
            Ok(formatted) => formatted,
            Err(e) => {
                debug!("Leaving text block unformatted: {e}");
                return host.clone();
            }
        };
        let current = if ends_with_line_break(body) {
            value.strip_suffix('\n').unwrap_or(value)
        } else {
            value
        };
        if formatted == current {
            return host.clone();
        }
        host.with_text_block(&formatted, &self.engine.style)
    }
}
