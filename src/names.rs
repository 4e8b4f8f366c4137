//! XML name validation and utilities
//!
//! Generated type and element names come straight from source identifiers,
//! so the schema compile pass checks each of them against the NCName
//! production before the schema is written.

use once_cell::sync::Lazy;
use regex::Regex;

// NameStartChar without ':'
const NAME_START_CHARS: &str = r"A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\u{370}-\u{37D}\u{37F}-\u{1FFF}\u{200C}-\u{200D}\u{2070}-\u{218F}\u{2C00}-\u{2FEF}\u{3001}-\u{D7FF}\u{F900}-\u{FDCF}\u{FDF0}-\u{FFFD}\u{10000}-\u{EFFFF}";

// NameChar additions on top of NameStartChar
const NAME_CHARS: &str = r"\-\.0-9\u{B7}\u{300}-\u{36F}\u{203F}-\u{2040}";

static NCNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "^[{start}][{start}{rest}]*$",
        start = NAME_START_CHARS,
        rest = NAME_CHARS
    ))
    .expect("NCName pattern is valid")
});

/// Check if a string is a valid NCName (non-colonized name)
pub fn is_valid_ncname(name: &str) -> bool {
    !name.is_empty() && NCNAME.is_match(name)
}

/// Last segment of a dotted or `::` separated type path
pub fn short_name(path: &str) -> &str {
    let tail = path.rsplit("::").next().unwrap_or(path);
    tail.rsplit('.').next().unwrap_or(tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_ncname() {
        assert!(is_valid_ncname("Person"));
        assert!(is_valid_ncname("ArrayOfAnimal"));
        assert!(is_valid_ncname("my-element"));
        assert!(is_valid_ncname("_private"));

        assert!(!is_valid_ncname(""));
        assert!(!is_valid_ncname("xs:int"));
        assert!(!is_valid_ncname("123abc"));
        assert!(!is_valid_ncname("Dictionary`2"));
        assert!(!is_valid_ncname("Animal[]"));
    }

    #[test]
    fn test_non_latin_ncname() {
        assert!(is_valid_ncname("Ελλάδα"));
        assert!(is_valid_ncname("Адрес"));
        assert!(is_valid_ncname("注文"));
        assert!(is_valid_ncname("e\u{301}tat"));
        assert!(is_valid_ncname("first\u{203F}last"));

        // combining marks and connectors may not start a name
        assert!(!is_valid_ncname("\u{301}tat"));
        assert!(!is_valid_ncname("\u{203F}tie"));
        assert!(!is_valid_ncname("a\u{D7}b"));
        assert!(!is_valid_ncname("注文:Line"));
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name("Zoo.Model.Animal"), "Animal");
        assert_eq!(short_name("zoo::model::Animal"), "Animal");
        assert_eq!(short_name("Animal"), "Animal");
    }
}
