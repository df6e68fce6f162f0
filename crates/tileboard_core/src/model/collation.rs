//! Locale-aware title ordering for board column sorting.
//!
//! Comparison is at base strength: case and foreign accents are ignored,
//! while Polish letters with diacritics (`ą`, `ł`, `ż`, ...) sort as letters of
//! their own right after their base letter, as in the Polish alphabet.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// One collation element: base letter plus its rank among Polish variants.
type CollationElement = (char, u8);

fn polish_letter(ch: char) -> Option<CollationElement> {
    let element = match ch {
        'ą' => ('a', 1),
        'ć' => ('c', 1),
        'ę' => ('e', 1),
        'ł' => ('l', 1),
        'ń' => ('n', 1),
        'ó' => ('o', 1),
        'ś' => ('s', 1),
        'ź' => ('z', 1),
        'ż' => ('z', 2),
        _ => return None,
    };
    Some(element)
}

/// Builds the primary-strength sort key for `title`.
///
/// Input is composed first so `a` + U+0328 is recognized as `ą`.
pub fn sort_key(title: &str) -> Vec<CollationElement> {
    let mut key = Vec::with_capacity(title.len());
    for ch in title.nfc().flat_map(char::to_lowercase) {
        if let Some(element) = polish_letter(ch) {
            key.push(element);
            continue;
        }
        key.extend(
            std::iter::once(ch)
                .nfd()
                .filter(|decomposed| !is_combining_mark(*decomposed))
                .map(|base| (base, 0)),
        );
    }
    key
}

/// Compares two titles at base strength.
pub fn compare_titles(left: &str, right: &str) -> Ordering {
    sort_key(left).cmp(&sort_key(right))
}

#[cfg(test)]
mod tests {
    use super::compare_titles;
    use std::cmp::Ordering;

    #[test]
    fn ignores_case() {
        assert_eq!(compare_titles("Alpha", "alpha"), Ordering::Equal);
        assert_eq!(compare_titles("beta", "ALPHA"), Ordering::Greater);
    }

    #[test]
    fn ignores_foreign_accents() {
        assert_eq!(compare_titles("café", "CAFE"), Ordering::Equal);
    }

    #[test]
    fn polish_letters_follow_their_base() {
        assert_eq!(compare_titles("łódź", "lody"), Ordering::Greater);
        assert_eq!(compare_titles("łódź", "mama"), Ordering::Less);
        assert_eq!(compare_titles("źle", "żaba"), Ordering::Less);
        assert_eq!(compare_titles("Żaba", "żaba"), Ordering::Equal);
    }

    #[test]
    fn decomposed_polish_letters_match_precomposed() {
        assert_eq!(compare_titles("a\u{328}", "\u{105}"), Ordering::Equal);
        assert_eq!(compare_titles("Z\u{307}aba", "żaba"), Ordering::Equal);
        assert_eq!(compare_titles("a\u{328}", "az"), Ordering::Greater);
        assert_eq!(compare_titles("\u{105}", "az"), Ordering::Greater);
    }

    #[test]
    fn shorter_prefix_sorts_first() {
        assert_eq!(compare_titles("abc", "abcd"), Ordering::Less);
    }
}
