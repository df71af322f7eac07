use itertools::Itertools as _;
use sqlparser::ast::{Ident, ObjectName, ObjectNamePart};

/// Identifier parts of a possibly qualified name, in order.
pub fn name_parts(name: &ObjectName) -> impl Iterator<Item = &Ident> {
    name.0.iter().filter_map(|part| match part {
        ObjectNamePart::Identifier(ident) => Some(ident),
        #[allow(unreachable_patterns)]
        _ => None,
    })
}

/// Unqualified, unquoted last part of a name (`schema.users` -> `users`).
pub fn base_name(name: &ObjectName) -> Option<&str> {
    name_parts(name)
        .last()
        .map(|ident| ident.value.as_str())
        .filter(|value| !value.is_empty())
}

/// Dotted name without quotes (`"pkg".nvl` -> `pkg.nvl`).
pub fn dotted_name(name: &ObjectName) -> String {
    name_parts(name).map(|ident| ident.value.as_str()).join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object_name(parts: &[&str]) -> ObjectName {
        ObjectName::from(parts.iter().map(|p| Ident::new(*p)).collect::<Vec<_>>())
    }

    #[test]
    fn base_name_is_last_part() {
        assert_eq!(base_name(&object_name(&["public", "users"])), Some("users"));
        assert_eq!(base_name(&object_name(&["users"])), Some("users"));
    }

    #[test]
    fn dotted_name_joins_parts() {
        assert_eq!(dotted_name(&object_name(&["pkg", "nvl"])), "pkg.nvl");
    }

    #[test]
    fn quoted_parts_lose_their_quotes() {
        let name = ObjectName::from(vec![Ident::with_quote('"', "Users")]);
        assert_eq!(base_name(&name), Some("Users"));
    }
}
