//! Finding and renaming function calls.
crate::reexport!(pattern);
crate::reexport!(locator);
crate::reexport!(rename);
