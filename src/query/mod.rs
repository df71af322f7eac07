crate::reexport!(host);
crate::reexport!(rewrite);
crate::reexport!(view);
