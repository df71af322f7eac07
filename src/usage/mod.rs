crate::reexport!(row);
crate::reexport!(extractor);
