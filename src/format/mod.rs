//! Canonical formatting and re-embedding of formatted SQL.
crate::reexport!(formatter);
crate::reexport!(indent);
