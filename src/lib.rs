//! Find SQL embedded in source artifacts, report which tables and columns it
//! touches, and rewrite it without disturbing the surrounding document.
//!
//! The pipeline for one candidate string is:
//!
//! 1. [`probably_sql`] rejects text that cannot be a statement.
//! 2. [`Engine::view`] parses the text and yields a [`QueryView`].
//! 3. Read-only consumers ([`extract_usage`], [`find_calls`]) pull facts
//!    from the view; writers ([`FunctionRenamer`], [`FormatSql`]) produce a
//!    new [`HostNode`] carrying the rewritten text.
//!
//! ```rust
//! use sqlsift::*;
//!
//! let engine = Engine::default();
//! let host = HostNode::plain_text("DELETE FROM access_token WHERE email = :email");
//! let view = engine.view(&host).expect("valid sql");
//! let rows = extract_usage(view.statement(), &SourceLocation::new("delete.sql", 1));
//! assert_eq!(rows[0].table, "access_token");
//! ```
reexport!(testing, test);
reexport!(error);
reexport!(config);
reexport!(sql);
reexport!(query);
reexport!(usage);
reexport!(function);
reexport!(format);
reexport!(table);
reexport!(recipe);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn};

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}
