//! Locale-style string ordering for file numbers.

use std::cmp::Ordering;

/// Compare the way a root-locale collator does for the ASCII-heavy strings
/// found in file numbers: letters compare case-insensitively first, lowercase
/// sorts before uppercase on a tie, and byte order breaks any remaining tie.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if primary != Ordering::Equal {
        return primary;
    }

    let tertiary = a
        .chars()
        .map(char::is_uppercase)
        .cmp(b.chars().map(char::is_uppercase));
    tertiary.then_with(|| a.cmp(b))
}
