use sqlparser::parser::ParserError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid query: {0}")]
    InvalidQuery(ParserError),

    #[error("Empty query")]
    EmptyQuery,

    #[error("Invalid function pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    #[error("Unknown SQL dialect: {0}")]
    UnknownDialect(String),

    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T = ()> = std::result::Result<T, Error>;

impl From<ParserError> for Error {
    fn from(value: ParserError) -> Self {
        Error::InvalidQuery(value)
    }
}
