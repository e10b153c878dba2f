//! String conversion helpers.
//!
//! These functions normalize names crossing the schema boundary: enum member
//! names are CONST_CASED from human-readable choice labels, and externally
//! supplied ordering names are converted to the internal snake_case field
//! naming convention.

use once_cell::sync::Lazy;
use regex::Regex;

/// Converts a string to CONST_CASE, suitable for an enum member name.
///
/// Runs of non-alphanumeric characters are collapsed into a single
/// underscore and the result is upper-cased. Leading and trailing
/// underscores are trimmed.
///
/// # Examples
///
/// ```
/// use modelgraph_core::utils::text::to_const_case;
///
/// assert_eq!(to_const_case("b1"), "B1");
/// assert_eq!(to_const_case("not applicable"), "NOT_APPLICABLE");
/// assert_eq!(to_const_case("n/a (unknown)"), "N_A_UNKNOWN");
/// ```
pub fn to_const_case(s: &str) -> String {
    static NON_ALNUM: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid regex"));

    let s = NON_ALNUM.replace_all(s, "_");
    s.trim_matches('_').to_uppercase()
}

/// Converts a camelCase or PascalCase string to snake_case.
///
/// Strings that are already snake_case pass through unchanged.
///
/// # Examples
///
/// ```
/// use modelgraph_core::utils::text::to_snake_case;
///
/// assert_eq!(to_snake_case("paginateBy"), "paginate_by");
/// assert_eq!(to_snake_case("CreatedAt"), "created_at");
/// assert_eq!(to_snake_case("already_snake"), "already_snake");
/// ```
pub fn to_snake_case(s: &str) -> String {
    static BOUNDARY: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid regex"));

    BOUNDARY.replace_all(s, "${1}_${2}").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_const_case_simple() {
        assert_eq!(to_const_case("a"), "A");
        assert_eq!(to_const_case("b1"), "B1");
        assert_eq!(to_const_case("steel"), "STEEL");
    }

    #[test]
    fn test_to_const_case_collapses_punctuation() {
        assert_eq!(to_const_case("wood & stone"), "WOOD_STONE");
        assert_eq!(to_const_case("  padded  "), "PADDED");
    }

    #[test]
    fn test_to_const_case_empty() {
        assert_eq!(to_const_case(""), "");
        assert_eq!(to_const_case("--"), "");
    }

    #[test]
    fn test_to_snake_case_camel() {
        assert_eq!(to_snake_case("orderBy"), "order_by");
        assert_eq!(to_snake_case("paginateBy"), "paginate_by");
    }

    #[test]
    fn test_to_snake_case_pascal() {
        assert_eq!(to_snake_case("DamageDealt"), "damage_dealt");
    }

    #[test]
    fn test_to_snake_case_passthrough() {
        assert_eq!(to_snake_case("name"), "name");
        assert_eq!(to_snake_case("created_at"), "created_at");
    }

    #[test]
    fn test_to_snake_case_digits() {
        assert_eq!(to_snake_case("level2Boss"), "level2_boss");
    }
}
