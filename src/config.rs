use confique::Config as _;
use std::sync::OnceLock;

use crate::*;

#[derive(Debug, Clone, confique::Config)]
pub struct Config {
    /// SQL dialect handed to the parser, see [`dialect_for`].
    #[config(env = "SQLSIFT_DIALECT", default = "generic")]
    pub dialect: String,
    /// Width of one tab character when measuring existing indentation.
    #[config(env = "SQLSIFT_TAB_SIZE", default = 4)]
    pub tab_size: usize,
    /// Render re-embedded indentation with tabs instead of spaces.
    #[config(env = "SQLSIFT_USE_TABS", default = false)]
    pub use_tabs: bool,
    /// Indent unit of the canonical formatter.
    #[config(env = "SQLSIFT_INDENT", default = "  ")]
    pub indent: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config::builder().env().load()?)
    }

    pub fn indent_style(&self) -> IndentStyle {
        IndentStyle {
            use_tabs: self.use_tabs,
            tab_size: self.tab_size,
        }
    }
}

pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        Config::from_env()
            .expect("Failed to load one or more value configuration from the current environment")
    })
}
