//! Statement keywords recognized by the heuristic gate.
//!
//! Only the leading verbs of the statements this crate cares about are listed.
//! They are split into two groups:
//! - `DML`: statements that read or write rows and produce usage facts.
//! - `DDL`: schema statements, only relevant for the validity check.
//!
//! `as_str` returns the canonical upper-case spelling used when the gate
//! patterns are assembled.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    Update,
    Delete,
    Insert,
    Create,
    Alter,
    Drop,
    Truncate,
}

impl Keyword {
    /// Statements that read or write rows.
    pub const DML: [Self; 4] = [
        Keyword::Select,
        Keyword::Update,
        Keyword::Delete,
        Keyword::Insert,
    ];

    /// Statements that change the schema.
    pub const DDL: [Self; 4] = [
        Keyword::Create,
        Keyword::Alter,
        Keyword::Drop,
        Keyword::Truncate,
    ];

    /// Canonical upper-case string form of the keyword.
    pub const fn as_str(self) -> &'static str {
        use Keyword::*;
        match self {
            Select => "SELECT",
            Update => "UPDATE",
            Delete => "DELETE",
            Insert => "INSERT",
            Create => "CREATE",
            Alter => "ALTER",
            Drop => "DROP",
            Truncate => "TRUNCATE",
        }
    }

    pub fn is_dml(self) -> bool {
        Self::DML.contains(&self)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_are_disjoint() {
        assert!(Keyword::DML.iter().all(|k| k.is_dml()));
        assert!(Keyword::DDL.iter().all(|k| !k.is_dml()));
    }

    #[test]
    fn display_is_upper_case() {
        assert_eq!(Keyword::Truncate.to_string(), "TRUNCATE");
    }
}
