//! Character range algebra and context-sensitive escaping.

use itertools::Itertools;

/// Characters escaped outside a character class.
const GENERAL_ESCAPE: &[char] = &[
    '{', '}', '(', ')', '[', ']', '|', '?', '*', '+', '.', '^', '$', '\\',
];

/// Characters escaped inside a character class. `^` would negate the class
/// in leading position and `[` opens a nested class.
const CLASS_ESCAPE: &[char] = &['-', ']', '\\', '[', '^'];

/// An inclusive `(low, high)` character range.
pub type CharRange = (char, char);

fn escape_with(input: &str, set: &[char]) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if set.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape `input` for use outside a character class.
pub fn escape(input: &str) -> String {
    escape_with(input, GENERAL_ESCAPE)
}

/// Escape `input` for use inside a character class.
pub fn class_escape(input: &str) -> String {
    escape_with(input, CLASS_ESCAPE)
}

/// Test whether `ch` falls within `range`.
pub fn range_contains(range: CharRange, ch: char) -> bool {
    range.0 <= ch && ch <= range.1
}

fn contains_range(outer: CharRange, inner: CharRange) -> bool {
    outer.0 <= inner.0 && inner.1 <= outer.1
}

fn to_lower(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn to_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Split a range whose bounds mix lower- and uppercase letters into one
/// lowercase and one uppercase range: `a..Z` becomes `a..z` and `A..Z`.
pub fn split_mixed_case(range: CharRange) -> Vec<CharRange> {
    let (lo, hi) = range;
    let has_lower = lo.is_lowercase() || hi.is_lowercase();
    let has_upper = lo.is_uppercase() || hi.is_uppercase();
    if has_lower && has_upper {
        vec![(to_lower(lo), to_lower(hi)), (to_upper(lo), to_upper(hi))]
    } else {
        vec![range]
    }
}

/// Fold an all-uppercase letter range to lowercase. Other ranges are left
/// alone, since folding them would change which characters they cover.
pub fn fold_range(range: CharRange) -> CharRange {
    let (lo, hi) = range;
    if lo.is_uppercase() && hi.is_uppercase() {
        (to_lower(lo), to_lower(hi))
    } else {
        range
    }
}

fn is_numeric_range(range: CharRange) -> bool {
    range.0.is_ascii_digit() && range.1.is_ascii_digit()
}

/// Drop ranges contained within another range of the same list.
pub fn remove_subranges(ranges: &[CharRange]) -> Vec<CharRange> {
    let unique = ranges.iter().copied().unique().collect_vec();
    unique
        .iter()
        .copied()
        .filter(|r| {
            !unique
                .iter()
                .any(|other| other != r && contains_range(*other, *r))
        })
        .collect()
}

/// Merge overlapping or adjacent ranges after sorting by low bound:
/// `a..d, e..g` becomes `a..g`, `a..d, f..g` stays as is.
pub fn merge_ranges(ranges: &[CharRange]) -> Vec<CharRange> {
    let mut merged: Vec<CharRange> = Vec::with_capacity(ranges.len());
    for range in ranges.iter().copied().sorted_by_key(|r| r.0) {
        match merged.last_mut() {
            Some(prev) if prev.1 as u32 + 1 >= range.0 as u32 => {
                prev.1 = prev.1.max(range.1);
            }
            _ => merged.push(range),
        }
    }
    merged
}

/// Canonicalize a list of ranges: drop reversed ones, then remove subranges
/// and merge within the numeric and the non-numeric class separately.
/// Numeric ranges come first in the result.
pub fn normalize_ranges(ranges: &[CharRange]) -> Vec<CharRange> {
    let (numeric, other): (Vec<CharRange>, Vec<CharRange>) = ranges
        .iter()
        .copied()
        .filter(|r| {
            let keep = r.0 <= r.1;
            if !keep {
                log::debug!("dropping reversed range {:?}..{:?}", r.0, r.1);
            }
            keep
        })
        .partition(|r| is_numeric_range(*r));

    let mut out = merge_ranges(&remove_subranges(&numeric));
    out.extend(merge_ranges(&remove_subranges(&other)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_escape_covers_metacharacters() {
        assert_eq!(escape("$|^*+.[({})]?\\"), r"\$\|\^\*\+\.\[\(\{\}\)\]\?\\");
        assert_eq!(escape("hello"), "hello");
        assert_eq!(escape("a-b"), "a-b");
    }

    #[test]
    fn class_escape_is_minimal() {
        assert_eq!(class_escape("-"), r"\-");
        assert_eq!(class_escape("]"), r"\]");
        assert_eq!(class_escape("$"), "$");
        assert_eq!(class_escape("."), ".");
    }

    #[test]
    fn splits_mixed_case_bounds() {
        assert_eq!(split_mixed_case(('a', 'Z')), vec![('a', 'z'), ('A', 'Z')]);
        assert_eq!(split_mixed_case(('a', 'F')), vec![('a', 'f'), ('A', 'F')]);
        assert_eq!(split_mixed_case(('a', 'z')), vec![('a', 'z')]);
        assert_eq!(split_mixed_case(('0', '9')), vec![('0', '9')]);
    }

    #[test]
    fn removes_contained_ranges() {
        assert_eq!(remove_subranges(&[('a', 'z'), ('e', 'i')]), vec![('a', 'z')]);
        assert_eq!(remove_subranges(&[('a', 'z'), ('a', 'z')]), vec![('a', 'z')]);
        assert_eq!(
            remove_subranges(&[('a', 'd'), ('f', 'i')]),
            vec![('a', 'd'), ('f', 'i')]
        );
    }

    #[test]
    fn merges_adjacent_and_overlapping() {
        assert_eq!(merge_ranges(&[('0', '3'), ('4', '7')]), vec![('0', '7')]);
        assert_eq!(
            merge_ranges(&[('0', '3'), ('5', '7')]),
            vec![('0', '3'), ('5', '7')]
        );
        assert_eq!(merge_ranges(&[('c', 'k'), ('a', 'e')]), vec![('a', 'k')]);
    }

    #[test]
    fn merge_is_idempotent_for_nested_ranges() {
        assert_eq!(
            normalize_ranges(&[('a', 'd'), ('b', 'c')]),
            normalize_ranges(&[('a', 'd')])
        );
    }

    #[test]
    fn numeric_ranges_sort_first() {
        assert_eq!(
            normalize_ranges(&[('a', 'f'), ('0', '9'), ('A', 'F')]),
            vec![('0', '9'), ('A', 'F'), ('a', 'f')]
        );
    }

    #[test]
    fn reversed_ranges_are_dropped() {
        assert!(normalize_ranges(&[('z', 'a')]).is_empty());
        assert_eq!(normalize_ranges(&[('9', '0'), ('1', '2')]), vec![('1', '2')]);
    }

    #[test]
    fn fold_only_touches_uppercase_letter_ranges() {
        assert_eq!(fold_range(('A', 'Z')), ('a', 'z'));
        assert_eq!(fold_range(('a', 'z')), ('a', 'z'));
        assert_eq!(fold_range(('!', 'Z')), ('!', 'Z'));
    }

    #[test]
    fn contains() {
        assert!(range_contains(('a', 'z'), 'm'));
        assert!(range_contains(('a', 'z'), 'z'));
        assert!(!range_contains(('a', 'z'), 'A'));
    }
}
