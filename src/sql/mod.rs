//! Heuristic gate and parser adapter.
//!
//! Modules:
//! - `keyword`   : Statement keywords grouped into DML and DDL.
//! - `heuristic` : Regex gates built from those groups.
//! - `dialect`   : Dialect lookup by name.
//! - `parser`    : Single-statement parse and multi-statement validity check.
//! - `span`      : Parser positions converted to byte spans of the raw text.
//! - `names`     : Helpers over qualified object names.
crate::reexport!(keyword);
crate::reexport!(heuristic);
crate::reexport!(dialect);
crate::reexport!(parser);
crate::reexport!(span);
crate::reexport!(names);
