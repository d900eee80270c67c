//! Locale-style string ordering for display sorts.
//!
//! Comparison runs in levels, as locale collation does:
//! 1. base letters, ignoring case and diacritics (`Élan` sorts with `elan`, before `Falco`);
//! 2. diacritics, unaccented first;
//! 3. case, lowercase first.
//!
//! Byte order is the last resort so the relation is total.

use icu_normalizer::DecomposingNormalizerBorrowed;
use std::cmp::Ordering;

/// Compares two display strings for sorting.
pub fn compare(left: &str, right: &str) -> Ordering {
    let left_nfd = decompose_lowercase(left);
    let right_nfd = decompose_lowercase(right);

    base_letters(&left_nfd)
        .cmp(base_letters(&right_nfd))
        .then_with(|| left_nfd.cmp(&right_nfd))
        .then_with(|| case_order(left, right))
        .then_with(|| left.cmp(right))
}

fn decompose_lowercase(value: &str) -> String {
    DecomposingNormalizerBorrowed::new_nfd()
        .normalize(value)
        .chars()
        .flat_map(char::to_lowercase)
        .collect()
}

fn base_letters(decomposed: &str) -> impl Iterator<Item = char> + '_ {
    decomposed.chars().filter(|ch| !is_combining_mark(*ch))
}

fn is_combining_mark(ch: char) -> bool {
    matches!(
        ch,
        '\u{0300}'..='\u{036F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{FE20}'..='\u{FE2F}'
    )
}

fn case_order(left: &str, right: &str) -> Ordering {
    for (l, r) in left.chars().zip(right.chars()) {
        if l == r {
            continue;
        }
        match (l.is_lowercase(), r.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::compare;
    use std::cmp::Ordering;

    #[test]
    fn comparison_ignores_case_first() {
        assert_eq!(compare("falco", "Semgrep"), Ordering::Less);
        assert_eq!(compare("in-toto", "OPA / Rego"), Ordering::Less);
        assert_eq!(compare("Trivy", "sigstore"), Ordering::Greater);
    }

    #[test]
    fn lowercase_wins_case_only_ties() {
        assert_eq!(compare("sast", "SAST"), Ordering::Less);
        assert_eq!(compare("SAST", "sast"), Ordering::Greater);
        assert_eq!(compare("Runtime", "Runtime"), Ordering::Equal);
    }

    #[test]
    fn accented_letters_sort_with_their_base_letter() {
        assert_eq!(compare("Élan", "Falco"), Ordering::Less);
        assert_eq!(compare("Ångström", "Apple"), Ordering::Less);
        assert_eq!(compare("Ångström", "Bazel"), Ordering::Less);

        let mut names = vec!["Zed", "Falco", "Élan", "Ångström", "elan"];
        names.sort_by(|l, r| compare(l, r));
        assert_eq!(names, vec!["Ångström", "elan", "Élan", "Falco", "Zed"]);
    }

    #[test]
    fn unaccented_form_sorts_before_accented() {
        assert_eq!(compare("resume", "résumé"), Ordering::Less);
        assert_eq!(compare("Zoë", "Zoe"), Ordering::Greater);
    }
}
