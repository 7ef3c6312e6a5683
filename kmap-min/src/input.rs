// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::VariableCount;
use std::collections::BTreeSet;

/// Parses a free-form list of minterms such as `"0, 2 5-7"`.
///
/// Entries are separated by commas or whitespace. An entry is either a single index or an
/// inclusive range `a-b` (a reversed range `b-a` means the same thing). Entries that aren't numbers
/// and indices outside the map are dropped. The result is sorted and free of duplicates.
///
/// # Examples
///
/// ```
/// use kmap_min::{input::parse_terms, VariableCount};
///
/// let n = VariableCount::new(3).unwrap();
/// let terms: Vec<_> = parse_terms("7, 0 2-4 foo 3 12", n).into_iter().collect();
/// assert_eq!(terms, vec![0, 2, 3, 4, 7]);
/// ```
pub fn parse_terms(text: &str, variable_count: VariableCount) -> BTreeSet<u32> {
    let last = variable_count.universe_size() - 1;
    let mut terms = BTreeSet::new();

    for token in text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
    {
        match token.split_once('-') {
            Some((start, end)) => {
                let (start, end) = match (start.trim().parse::<u32>(), end.trim().parse::<u32>()) {
                    (Ok(start), Ok(end)) => (start.min(end), start.max(end)),
                    _ => continue,
                };
                if start <= last {
                    terms.extend(start..=end.min(last));
                }
            }
            None => {
                if let Ok(term) = token.parse::<u32>() {
                    if term <= last {
                        terms.insert(term);
                    }
                }
            }
        }
    }

    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str, n: u8) -> Vec<u32> {
        parse_terms(text, VariableCount::new(n).unwrap())
            .into_iter()
            .collect()
    }

    #[test]
    fn test_single_values() {
        assert_eq!(parse("", 4), Vec::<u32>::new());
        assert_eq!(parse("3,1,  2\t0\n", 4), vec![0, 1, 2, 3]);
        assert_eq!(parse("1,1,1", 4), vec![1]);
    }

    #[test]
    fn test_ranges() {
        assert_eq!(parse("2-5", 3), vec![2, 3, 4, 5]);
        assert_eq!(parse("5-2", 3), vec![2, 3, 4, 5], "reversed range");
        assert_eq!(parse("6-100", 3), vec![6, 7], "range clipped to the map");
        assert_eq!(parse("9-12", 3), Vec::<u32>::new());
        assert_eq!(parse("3-3", 3), vec![3]);
    }

    #[test]
    fn test_invalid_entries_are_dropped() {
        assert_eq!(parse("a, 1, -2, 3-, x-4, 2.5, 16, 4294967296", 4), vec![1]);
    }
}
