// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rectangular groupings of map cells, used to highlight the map.
//!
//! The groups found here come from a search over the two-dimensional map and are independent of
//! the Quine–McCluskey cover. They usually line up with the terms of the minimized expression, but
//! nothing guarantees it: a group found here may not correspond to any selected implicant, and the
//! number of groups can differ from the number of terms.

use crate::{
    grid::{CellGrid, CellState},
    layout::GrayLayout,
};
use bitvec::prelude::*;
use log::debug;

/// A rectangle of cells on the map, possibly wrapping around the edges.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize))]
pub struct Group {
    pub row_origin: usize,
    pub col_origin: usize,
    pub height: usize,
    pub width: usize,
    /// The minterms inside the rectangle, row by row starting at the origin.
    pub minterms: Vec<u32>,
}

impl Group {
    #[inline]
    pub fn area(&self) -> usize {
        self.height * self.width
    }

    /// Iterates over the `(row, col)` positions inside the rectangle for a layout.
    pub fn cells<'a>(&'a self, layout: &'a GrayLayout) -> impl Iterator<Item = (usize, usize)> + 'a {
        window(layout, self.row_origin, self.col_origin, self.height, self.width)
    }

    #[inline]
    pub fn contains(&self, minterm: u32) -> bool {
        self.minterms.contains(&minterm)
    }
}

/// Greedily covers the `On` cells of the grid with maximal rectangles.
///
/// Rectangle sizes are powers of two, tried from the largest area down (wider first among equal
/// areas). Every cell of a rectangle must be `On` or `DontCare` and at least one must be `On`. A
/// rectangle is kept only if it covers a cell that no earlier rectangle covered.
pub fn find_groups(grid: &CellGrid) -> Vec<Group> {
    let layout = grid.layout();
    let mut covered = bitvec![0; layout.cell_count()];
    let mut groups = Vec::new();

    for (height, width) in candidate_sizes(&layout) {
        for row_origin in 0..layout.rows() {
            for col_origin in 0..layout.cols() {
                let positions: Vec<_> =
                    window(&layout, row_origin, col_origin, height, width).collect();
                let states = positions.iter().map(|&(row, col)| grid.state_at(row, col));

                let mut any_on = false;
                let mut all_groupable = true;
                for state in states {
                    any_on |= state == CellState::On;
                    all_groupable &= state.is_groupable();
                }
                if !(any_on && all_groupable) {
                    continue;
                }

                let minterms: Vec<u32> = positions
                    .iter()
                    .map(|&(row, col)| layout.cell_of(row, col))
                    .collect();
                if minterms.iter().all(|&minterm| covered[minterm as usize]) {
                    continue;
                }
                for &minterm in &minterms {
                    covered.set(minterm as usize, true);
                }

                debug!(
                    "group {}x{} at ({}, {}): {:?}",
                    height, width, row_origin, col_origin, minterms
                );
                groups.push(Group {
                    row_origin,
                    col_origin,
                    height,
                    width,
                    minterms,
                });
            }
        }
    }

    groups
}

// Power-of-two rectangle sizes, by descending area and then ascending height.
fn candidate_sizes(layout: &GrayLayout) -> Vec<(usize, usize)> {
    let heights = (0..=layout.row_bits()).map(|bits| 1_usize << bits);
    let mut sizes: Vec<(usize, usize)> = heights
        .flat_map(|height| (0..=layout.col_bits()).map(move |bits| (height, 1_usize << bits)))
        .collect();
    sizes.sort_by(|a, b| (b.0 * b.1).cmp(&(a.0 * a.1)).then(a.0.cmp(&b.0)));
    sizes
}

fn window(
    layout: &GrayLayout,
    row_origin: usize,
    col_origin: usize,
    height: usize,
    width: usize,
) -> impl Iterator<Item = (usize, usize)> {
    let (rows, cols) = (layout.rows(), layout.cols());
    (0..height).flat_map(move |dr| {
        (0..width).map(move |dc| ((row_origin + dr) % rows, (col_origin + dc) % cols))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VariableCount;
    use std::collections::BTreeSet;

    fn grid(n: u8, minterms: &[u32], dont_cares: &[u32]) -> CellGrid {
        CellGrid::from_terms(
            VariableCount::new(n).unwrap(),
            minterms.iter().copied(),
            dont_cares.iter().copied(),
        )
    }

    fn sorted(group: &Group) -> Vec<u32> {
        let mut minterms = group.minterms.clone();
        minterms.sort_unstable();
        minterms
    }

    #[test]
    fn test_candidate_sizes() {
        let layout = grid(3, &[], &[]).layout();
        assert_eq!(
            candidate_sizes(&layout),
            vec![(2, 4), (1, 4), (2, 2), (1, 2), (2, 1), (1, 1)]
        );
    }

    #[test]
    fn test_empty_and_full() {
        assert!(find_groups(&grid(4, &[], &[])).is_empty());
        assert!(
            find_groups(&grid(4, &[], &[0, 1, 2])).is_empty(),
            "don't cares alone never form a group"
        );

        let groups = find_groups(&grid(4, &(0..16).collect::<Vec<_>>(), &[]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].area(), 16);
    }

    #[test]
    fn test_corners_wrap() {
        // The four corners of a 4-variable map form a single group.
        let groups = find_groups(&grid(4, &[0, 2, 8, 10], &[]));
        assert_eq!(groups.len(), 1);
        let group = &groups[0];
        assert_eq!((group.height, group.width), (2, 2));
        assert_eq!((group.row_origin, group.col_origin), (3, 3));
        assert_eq!(sorted(group), vec![0, 2, 8, 10]);
    }

    #[test]
    fn test_dont_cares_extend_groups() {
        let groups = find_groups(&grid(4, &[0, 1, 2, 3, 8, 9, 10], &[11, 15]));
        assert_eq!(groups.len(), 1, "groups: {:?}", groups);
        assert_eq!(sorted(&groups[0]), vec![0, 1, 2, 3, 8, 9, 10, 11]);
    }

    #[test]
    fn test_groups_cover_every_on_cell() {
        let on = [1, 3, 4, 6, 9, 11, 12, 14, 16, 21, 31];
        let dc = [5, 7, 20];
        let grid = grid(5, &on, &dc);
        let layout = grid.layout();
        let groups = find_groups(&grid);

        let mut covered = BTreeSet::new();
        for group in &groups {
            assert!(group.height.is_power_of_two() && group.width.is_power_of_two());
            assert_eq!(group.minterms.len(), group.area());
            assert!(group.minterms.iter().any(|m| on.contains(m)));
            for (row, col) in group.cells(&layout) {
                assert!(grid.state_at(row, col).is_groupable());
            }
            covered.extend(group.minterms.iter().copied());
        }
        for m in on {
            assert!(covered.contains(&m), "{} is covered by a group", m);
        }
    }

    #[test]
    fn test_isolated_cells() {
        // 0 and 5 aren't adjacent on a 3-variable map.
        let groups = find_groups(&grid(3, &[0, 5], &[]));
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|group| group.area() == 1));
    }
}
