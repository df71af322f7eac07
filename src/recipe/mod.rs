//! Recipes tie the engine to host nodes and sinks.
//!
//! A document-format adapter walks its document and calls `visit` once per
//! text-bearing node, replacing the node with the one returned.
crate::reexport!(find_sql);
crate::reexport!(find_function);
crate::reexport!(change_function_name);
crate::reexport!(format_sql);

pub trait Recipe {
    fn display_name(&self) -> &'static str;
    fn description(&self) -> &'static str;
}
