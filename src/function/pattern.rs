use crate::*;
use glob::{MatchOptions, Pattern};
use std::hash::{Hash, Hasher};

const CASE_INSENSITIVE: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Case-insensitive glob over function names (`nvl`, `to_*`, `pkg.?et`).
#[derive(Debug, Clone, derive_more::Display)]
#[display("{text}")]
pub struct GlobPattern {
    text: String,
    pattern: Pattern,
}

impl GlobPattern {
    pub fn new(text: &str) -> Result<Self> {
        Ok(Self {
            text: text.to_string(),
            pattern: Pattern::new(text)?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn matches(&self, name: &str) -> bool {
        self.pattern.matches_with(name, CASE_INSENSITIVE)
    }
}

impl PartialEq for GlobPattern {
    fn eq(&self, other: &Self) -> bool {
        self.text.to_lowercase() == other.text.to_lowercase()
    }
}

impl Eq for GlobPattern {}

impl Hash for GlobPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.to_lowercase().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest]
    #[case("nvl", "NVL", true)]
    #[case("nvl", "nvl2", false)]
    #[case("to_*", "TO_CHAR", true)]
    #[case("nv?", "nvl", true)]
    #[case("[cn]vl", "cvl", true)]
    #[case("pkg.*", "pkg.nvl", true)]
    #[case("*", "anything", true)]
    fn glob_matching(#[case] pattern: &str, #[case] name: &str, #[case] expected: bool) {
        let pattern = GlobPattern::new(pattern).expect("valid pattern");
        assert_eq!(pattern.matches(name), expected);
    }

    #[test]
    fn equality_ignores_case() {
        assert_eq!(
            GlobPattern::new("NVL").expect("valid pattern"),
            GlobPattern::new("nvl").expect("valid pattern")
        );
        assert_ne!(
            GlobPattern::new("nvl").expect("valid pattern"),
            GlobPattern::new("nvl2").expect("valid pattern")
        );
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(matches!(
            GlobPattern::new("[nvl"),
            Err(Error::InvalidPattern(_))
        ));
    }
}
