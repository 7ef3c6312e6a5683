// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    display::{sort_for_display, ExpressionDisplay, Polarity},
    grid::{CellGrid, CellState},
    groups::{find_groups, Group},
    layout::GrayLayout,
    pattern::BitPattern,
    primes::{quine_mccluskey, Implicants},
    variables::{VariableCount, VariableNames},
};
use log::debug;
use std::{collections::BTreeSet, fmt};

/// A minimized expression of one polarity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize))]
pub struct Solution {
    pub polarity: Polarity,
    pub prime_implicants: Vec<BitPattern>,
    /// The chosen implicants, in the order they appear in `expression`.
    pub selected: Vec<BitPattern>,
    pub expression: String,
    pub var_names: Vec<String>,
    /// For each entry in `selected`, the terms it covers: minterms for a sum of products, maxterms
    /// for a product of sums. Don't cares are not listed.
    pub coverage: Vec<Vec<u32>>,
}

impl Solution {
    /// Builds a solution from the result of Quine–McCluskey over `terms`.
    pub fn new(
        polarity: Polarity,
        implicants: Implicants,
        terms: &BTreeSet<u32>,
        names: &VariableNames,
    ) -> Self {
        let Implicants {
            prime_implicants,
            mut selected,
        } = implicants;
        sort_for_display(&mut selected);

        let expression = ExpressionDisplay::new(&selected, names, polarity).to_string();
        let coverage = selected
            .iter()
            .map(|pattern| {
                terms
                    .iter()
                    .copied()
                    .filter(|&term| pattern.covers(term))
                    .collect()
            })
            .collect();

        Self {
            polarity,
            prime_implicants,
            selected,
            expression,
            var_names: names.to_vec(),
            coverage,
        }
    }

    /// Evaluates the expression for the variable assignment encoded by `minterm`.
    pub fn evaluate(&self, minterm: u32) -> bool {
        let any_covers = self.selected.iter().any(|pattern| pattern.covers(minterm));
        match self.polarity {
            Polarity::Sop => any_covers,
            // A product of sums is false exactly where one of its clauses is false.
            Polarity::Pos => !any_covers,
        }
    }
}

/// The output value of one row of the truth table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TruthValue {
    Zero,
    One,
    DontCare,
}

impl From<CellState> for TruthValue {
    fn from(state: CellState) -> Self {
        match state {
            CellState::Off => Self::Zero,
            CellState::On => Self::One,
            CellState::DontCare => Self::DontCare,
        }
    }
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Zero => "0",
            Self::One => "1",
            Self::DontCare => "X",
        };
        write!(f, "{}", s)
    }
}

#[cfg(feature = "serde1")]
impl serde::Serialize for TruthValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One row of the truth table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize))]
pub struct TruthRow {
    pub minterm: u32,
    /// Variable values, most significant variable first.
    pub inputs: Vec<bool>,
    pub output: TruthValue,
}

/// Everything computed for a map.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize))]
pub struct KmapSolution {
    pub variable_count: VariableCount,
    pub layout: GrayLayout,
    pub truth_table: Vec<TruthRow>,
    pub sop: Solution,
    pub pos: Solution,
    /// Highlight rectangles. These are found independently of `sop` and need not match its terms.
    pub groups: Vec<Group>,
}

/// Minimizes the function with the given minterms and don't cares.
///
/// Indices outside the map are ignored, and an index listed as both a minterm and a don't care
/// counts as a minterm.
///
/// # Examples
///
/// ```
/// use kmap_min::{solve, VariableCount};
///
/// let n = VariableCount::new(3).unwrap();
/// let solution = solve(n, [1, 3, 5, 7], [2]);
/// assert_eq!(solution.sop.expression, "C");
/// assert_eq!(solution.pos.expression, "(C)");
/// ```
pub fn solve(
    variable_count: VariableCount,
    minterms: impl IntoIterator<Item = u32>,
    dont_cares: impl IntoIterator<Item = u32>,
) -> KmapSolution {
    CellGrid::from_terms(variable_count, minterms, dont_cares).solve()
}

impl CellGrid {
    /// Minimizes the function described by this grid, using the default variable names.
    pub fn solve(&self) -> KmapSolution {
        self.solve_with_names(&VariableNames::new(self.variable_count()))
    }

    /// Minimizes the function described by this grid.
    ///
    /// The sum of products covers the `On` cells and the product of sums covers the `Off` cells.
    /// Both may use `DontCare` cells, independently of each other.
    pub fn solve_with_names(&self, names: &VariableNames) -> KmapSolution {
        let variable_count = self.variable_count();
        let width = variable_count.get();
        let minterms = self.minterms();
        let maxterms = self.maxterms();
        let dont_cares = self.dont_cares();
        debug!(
            "solving n = {}: minterms {:?}, don't cares {:?}",
            variable_count, minterms, dont_cares
        );

        let sop_implicants =
            quine_mccluskey(minterms.iter().copied(), dont_cares.iter().copied(), width);
        let sop = Solution::new(Polarity::Sop, sop_implicants, &minterms, names);

        let pos_implicants =
            quine_mccluskey(maxterms.iter().copied(), dont_cares.iter().copied(), width);
        let pos = Solution::new(Polarity::Pos, pos_implicants, &maxterms, names);

        debug!("sop: {}, pos: {}", sop.expression, pos.expression);

        KmapSolution {
            variable_count,
            layout: self.layout(),
            truth_table: self.truth_table(),
            sop,
            pos,
            groups: find_groups(self),
        }
    }

    /// The truth table of this grid, one row per minterm.
    pub fn truth_table(&self) -> Vec<TruthRow> {
        let width = self.variable_count().get();
        self.cells()
            .iter()
            .enumerate()
            .map(|(minterm, &state)| {
                let minterm = minterm as u32;
                let inputs = (0..width)
                    .rev()
                    .map(|bit| (minterm >> bit) & 1 == 1)
                    .collect();
                TruthRow {
                    minterm,
                    inputs,
                    output: state.into(),
                }
            })
            .collect()
    }
}
