//! # Proper Case
//!
//! Normalizes free-text labels (attribute values, item names) before they
//! are stored or compared.
//!
//! ## Rules
//! 1. Trim, then lowercase everything.
//! 2. Uppercase the character at the start and after a space, `-` or `.`.
//! 3. Uppercase any letter directly after a digit (`26ss` → `26Ss`).
//!
//! ```rust
//! use erpkit_core::case::to_proper_case;
//!
//! assert_eq!(to_proper_case("  dark-BLUE "), "Dark-Blue");
//! assert_eq!(to_proper_case("26ss"), "26Ss");
//! ```

const WORD_SEPARATORS: [char; 3] = [' ', '-', '.'];

/// Converts a label to proper case.
pub fn to_proper_case(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut prev: Option<char> = None;

    for c in lowered.chars() {
        let starts_word = match prev {
            None => true,
            Some(p) if WORD_SEPARATORS.contains(&p) => true,
            Some(p) => p.is_ascii_digit() && c.is_alphabetic(),
        };

        if starts_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }

    out
}

/// Checks if a label is already in proper case.
pub fn is_proper_case(input: &str) -> bool {
    to_proper_case(input) == input
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_words_are_capitalized() {
        assert_eq!(to_proper_case("red color"), "Red Color");
        assert_eq!(to_proper_case("NAVY BLUE"), "Navy Blue");
        assert_eq!(to_proper_case("dark-blue"), "Dark-Blue");
        assert_eq!(to_proper_case("st.john"), "St.John");
    }

    #[test]
    fn test_letter_after_digit() {
        assert_eq!(to_proper_case("26ss"), "26Ss");
        assert_eq!(to_proper_case("size 10xl"), "Size 10Xl");
        assert_eq!(to_proper_case("a1b"), "A1B");
    }

    #[test]
    fn test_trim_and_empty() {
        assert_eq!(to_proper_case("   olive  "), "Olive");
        assert_eq!(to_proper_case(""), "");
        assert_eq!(to_proper_case("   "), "");
    }

    #[test]
    fn test_inner_whitespace_is_kept() {
        assert_eq!(to_proper_case("off  white"), "Off  White");
    }

    #[test]
    fn test_is_proper_case() {
        assert!(is_proper_case("Red Color"));
        assert!(!is_proper_case("red color"));
        assert!(!is_proper_case(" Red"));
    }

    proptest! {
        #[test]
        fn prop_idempotent_for_ascii(input in "[ -~]{0,40}") {
            let once = to_proper_case(&input);
            prop_assert_eq!(to_proper_case(&once), once);
        }
    }
}
