// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quine–McCluskey prime implicant generation and cover selection.

use crate::pattern::BitPattern;
use bitvec::prelude::*;
use log::{debug, warn};
use std::collections::{BTreeMap, BTreeSet};

/// The result of running Quine–McCluskey over a set of terms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Implicants {
    /// Every prime implicant found, in the order they were found.
    pub prime_implicants: Vec<BitPattern>,
    /// The prime implicants chosen to cover the terms: essential ones first, then the greedy picks.
    pub selected: Vec<BitPattern>,
}

/// Minimizes the function that is true on `terms`, using `dont_cares` to grow cubes.
///
/// Don't cares may end up inside selected cubes but are never required to be covered. If `terms`
/// is empty, so is the result.
///
/// # Examples
///
/// ```
/// use kmap_min::primes::quine_mccluskey;
///
/// let implicants = quine_mccluskey([0, 1, 2, 3], [], 3);
/// let selected: Vec<_> = implicants.selected.iter().map(|p| p.to_string()).collect();
/// assert_eq!(selected, vec!["0--"]);
/// ```
pub fn quine_mccluskey(
    terms: impl IntoIterator<Item = u32>,
    dont_cares: impl IntoIterator<Item = u32>,
    width: u8,
) -> Implicants {
    let terms: BTreeSet<u32> = terms.into_iter().collect();
    if terms.is_empty() {
        return Implicants::default();
    }

    let seeds: BTreeSet<u32> = terms.iter().copied().chain(dont_cares).collect();
    let prime_implicants = prime_implicants(&seeds, width);
    let selected = select_cover(&prime_implicants, &terms);
    Implicants {
        prime_implicants,
        selected,
    }
}

/// Computes every prime implicant of the function that is true exactly on `seeds`.
pub fn prime_implicants(seeds: &BTreeSet<u32>, width: u8) -> Vec<BitPattern> {
    let mut current: BTreeSet<BitPattern> = seeds
        .iter()
        .map(|&seed| BitPattern::minterm(seed, width))
        .collect();
    let mut primes = Vec::new();
    let mut round = 0;

    while !current.is_empty() {
        let cubes: Vec<BitPattern> = current.into_iter().collect();

        // Group the cubes by the number of 1s. Only neighbouring groups can merge.
        let mut buckets: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for (ix, cube) in cubes.iter().enumerate() {
            buckets.entry(cube.ones_count()).or_default().push(ix);
        }

        let mut used = bitvec![0; cubes.len()];
        let mut next = BTreeSet::new();
        for (weight, lower) in &buckets {
            let upper = match buckets.get(&(weight + 1)) {
                Some(upper) => upper,
                None => continue,
            };
            for &lower_ix in lower {
                for &upper_ix in upper {
                    if let Some(merged) = cubes[lower_ix].merge(&cubes[upper_ix]) {
                        used.set(lower_ix, true);
                        used.set(upper_ix, true);
                        next.insert(merged);
                    }
                }
            }
        }

        let round_primes = cubes
            .iter()
            .zip(used.iter().by_vals())
            .filter_map(|(cube, used)| (!used).then(|| *cube));
        let before = primes.len();
        primes.extend(round_primes);
        debug!(
            "round {}: {} cubes, {} merged, {} prime",
            round,
            cubes.len(),
            next.len(),
            primes.len() - before
        );

        current = next;
        round += 1;
    }

    primes
}

/// Chooses prime implicants that together cover every element of `terms`.
///
/// Essential prime implicants (the only cover of some term) are taken first. The rest of the
/// terms are covered greedily, each time picking the implicant that covers the most uncovered
/// terms and breaking ties by position in `primes`. If no implicant covers any of the remaining
/// terms, those terms are left uncovered.
pub fn select_cover(primes: &[BitPattern], terms: &BTreeSet<u32>) -> Vec<BitPattern> {
    let mut table = CoverTable::new(primes, terms);
    table.select_essentials();
    table.select_greedy();
    table.selected.iter().map(|&ix| primes[ix]).collect()
}

struct CoverTable<'a> {
    primes: &'a [BitPattern],
    terms: Vec<u32>,
    // Indexed by position in `terms`.
    covered: BitVec,
    // Indexed by position in `primes`.
    chosen: BitVec,
    selected: Vec<usize>,
}

impl<'a> CoverTable<'a> {
    fn new(primes: &'a [BitPattern], terms: &BTreeSet<u32>) -> Self {
        let terms: Vec<u32> = terms.iter().copied().collect();
        Self {
            primes,
            covered: bitvec![0; terms.len()],
            chosen: bitvec![0; primes.len()],
            terms,
            selected: Vec::new(),
        }
    }

    fn select_essentials(&mut self) {
        for term_ix in 0..self.terms.len() {
            let term = self.terms[term_ix];
            let primes = self.primes;
            let mut covering = primes
                .iter()
                .enumerate()
                .filter(|(_, prime)| prime.covers(term))
                .map(|(ix, _)| ix);
            if let (Some(prime_ix), None) = (covering.next(), covering.next()) {
                if !self.chosen[prime_ix] {
                    debug!("{} is essential (only cover of {})", primes[prime_ix], term);
                    self.select(prime_ix);
                }
            }
        }
    }

    fn select_greedy(&mut self) {
        while self.covered.not_all() {
            let mut best: Option<(usize, usize)> = None;
            for prime_ix in 0..self.primes.len() {
                if self.chosen[prime_ix] {
                    continue;
                }
                let gain = self.gain(prime_ix);
                match best {
                    Some((_, best_gain)) if best_gain >= gain => {}
                    _ => best = Some((prime_ix, gain)),
                }
            }

            match best {
                Some((prime_ix, gain)) if gain > 0 => {
                    debug!(
                        "greedily selected {} (covers {} more)",
                        self.primes[prime_ix], gain
                    );
                    self.select(prime_ix);
                }
                _ => {
                    warn!(
                        "{} terms cannot be covered by any prime implicant",
                        self.covered.count_zeros()
                    );
                    break;
                }
            }
        }
    }

    // The number of currently uncovered terms that a prime implicant covers.
    fn gain(&self, prime_ix: usize) -> usize {
        let prime = &self.primes[prime_ix];
        self.terms
            .iter()
            .zip(self.covered.iter().by_vals())
            .filter(|&(&term, covered)| !covered && prime.covers(term))
            .count()
    }

    fn select(&mut self, prime_ix: usize) {
        self.chosen.set(prime_ix, true);
        self.selected.push(prime_ix);
        let prime = self.primes[prime_ix];
        for (term_ix, &term) in self.terms.iter().enumerate() {
            if prime.covers(term) {
                self.covered.set(term_ix, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn strings(patterns: &[BitPattern]) -> Vec<String> {
        patterns.iter().map(|p| p.to_string()).collect()
    }

    fn set(terms: &[u32]) -> BTreeSet<u32> {
        terms.iter().copied().collect()
    }

    #[test]
    fn test_empty_terms() {
        assert_eq!(quine_mccluskey([], [], 3), Implicants::default());
        assert_eq!(
            quine_mccluskey([], [1, 2, 3], 3),
            Implicants::default(),
            "don't cares alone produce nothing"
        );
    }

    #[test]
    fn test_prime_implicants_textbook() {
        // f(a, b, c, d) = sum(4, 8, 10, 11, 12, 15) + d(9, 14)
        let seeds = set(&[4, 8, 9, 10, 11, 12, 14, 15]);
        let mut primes = strings(&prime_implicants(&seeds, 4));
        primes.sort();
        assert_eq!(primes, vec!["-100", "1--0", "1-1-", "10--"]);
    }

    #[test]
    fn test_select_cover_textbook() {
        let implicants = quine_mccluskey([4, 8, 10, 11, 12, 15], [9, 14], 4);
        let mut selected = strings(&implicants.selected);
        selected.sort();
        // -100 is the only cover of 4 and 1-1- the only cover of 15. 8 is left for 1--0 or 10--.
        assert_eq!(selected.len(), 3);
        assert!(selected.contains(&"-100".to_owned()));
        assert!(selected.contains(&"1-1-".to_owned()));
    }

    #[test]
    fn test_xor_has_no_merges() {
        let implicants = quine_mccluskey([1, 2], [], 2);
        assert_eq!(strings(&implicants.prime_implicants), vec!["01", "10"]);
        assert_eq!(strings(&implicants.selected), vec!["01", "10"]);
    }

    #[test]
    fn test_tautology() {
        let implicants = quine_mccluskey(0..8, [], 3);
        assert_eq!(strings(&implicants.prime_implicants), vec!["---"]);
        assert_eq!(strings(&implicants.selected), vec!["---"]);
    }

    #[test]
    fn test_cyclic_cover_uses_greedy() {
        // The cyclic function sum(0, 1, 2, 5, 6, 7) has six prime implicants, none essential.
        let implicants = quine_mccluskey([0, 1, 2, 5, 6, 7], [], 3);
        assert_eq!(
            strings(&implicants.prime_implicants),
            vec!["-01", "-10", "0-0", "00-", "1-1", "11-"]
        );
        // Every tie goes to the first candidate, which costs one cube over the optimum here.
        assert_eq!(
            strings(&implicants.selected),
            vec!["-01", "-10", "0-0", "1-1"]
        );
        for term in [0, 1, 2, 5, 6, 7] {
            assert!(
                implicants.selected.iter().any(|p| p.covers(term)),
                "{} is covered",
                term
            );
        }
    }

    #[test]
    fn test_select_cover_terminates_when_uncoverable() {
        let primes: Vec<BitPattern> = vec!["00".parse().unwrap()];
        let selected = select_cover(&primes, &set(&[0, 3]));
        assert_eq!(strings(&selected), vec!["00"], "3 is left uncovered");
    }

    #[test]
    fn test_scenario_with_dont_cares() {
        let implicants = quine_mccluskey([0, 1, 2, 3, 8, 9, 10], [11, 15], 4);
        let primes = strings(&implicants.prime_implicants);
        assert!(primes.contains(&"-0--".to_owned()), "primes: {:?}", primes);
        assert_eq!(strings(&implicants.selected), vec!["-0--"]);
    }
}
