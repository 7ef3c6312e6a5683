// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{errors::MintermOutOfRange, layout::GrayLayout, VariableCount};
use arrayvec::ArrayVec;
use std::{collections::BTreeSet, fmt};

/// The largest number of cells a map can have.
pub const MAX_CELLS: usize = 1 << VariableCount::MAX;

/// The value of a single cell of the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize))]
pub enum CellState {
    Off,
    On,
    DontCare,
}

impl CellState {
    /// The state a cell moves to when toggled: `Off -> On -> DontCare -> Off`.
    #[inline]
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::DontCare,
            Self::DontCare => Self::Off,
        }
    }

    /// Returns true for cells that a group may cover.
    #[inline]
    pub fn is_groupable(self) -> bool {
        matches!(self, Self::On | Self::DontCare)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Off
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let ch = match self {
            Self::Off => '0',
            Self::On => '1',
            Self::DontCare => 'X',
        };
        write!(f, "{}", ch)
    }
}

/// The state of every cell of a map, indexed by minterm.
///
/// The grid always holds exactly `2^n` cells. To change the number of variables, build a new grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    variable_count: VariableCount,
    cells: ArrayVec<CellState, MAX_CELLS>,
}

impl CellGrid {
    /// Creates a grid with every cell `Off`.
    pub fn new(variable_count: VariableCount) -> Self {
        let cells = (0..variable_count.universe_size())
            .map(|_| CellState::Off)
            .collect();
        Self {
            variable_count,
            cells,
        }
    }

    /// Creates a grid from minterm and don't-care lists. See [`CellGrid::apply`].
    pub fn from_terms(
        variable_count: VariableCount,
        minterms: impl IntoIterator<Item = u32>,
        dont_cares: impl IntoIterator<Item = u32>,
    ) -> Self {
        let mut grid = Self::new(variable_count);
        grid.apply(minterms, dont_cares);
        grid
    }

    #[inline]
    pub fn variable_count(&self) -> VariableCount {
        self.variable_count
    }

    #[inline]
    pub fn layout(&self) -> GrayLayout {
        GrayLayout::build(self.variable_count)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    pub fn get(&self, minterm: u32) -> Result<CellState, MintermOutOfRange> {
        self.check(minterm)?;
        Ok(self.cells[minterm as usize])
    }

    pub fn set(&mut self, minterm: u32, state: CellState) -> Result<(), MintermOutOfRange> {
        self.check(minterm)?;
        self.cells[minterm as usize] = state;
        Ok(())
    }

    /// Advances one cell through `Off -> On -> DontCare -> Off` and returns its new state.
    pub fn toggle(&mut self, minterm: u32) -> Result<CellState, MintermOutOfRange> {
        self.check(minterm)?;
        let cell = &mut self.cells[minterm as usize];
        *cell = cell.next();
        Ok(*cell)
    }

    /// Overwrites the whole grid.
    ///
    /// Listed minterms become `On`, listed don't-cares become `DontCare` unless they are also
    /// listed as minterms, and everything else becomes `Off`. Indices outside the map are ignored.
    pub fn apply(
        &mut self,
        minterms: impl IntoIterator<Item = u32>,
        dont_cares: impl IntoIterator<Item = u32>,
    ) {
        self.clear();
        for minterm in minterms {
            if self.variable_count.contains(minterm) {
                self.cells[minterm as usize] = CellState::On;
            }
        }
        for minterm in dont_cares {
            if self.variable_count.contains(minterm) {
                let cell = &mut self.cells[minterm as usize];
                if *cell != CellState::On {
                    *cell = CellState::DontCare;
                }
            }
        }
    }

    /// Turns every cell `Off`.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = CellState::Off);
    }

    /// The state of the cell drawn at `(row, col)` in this grid's layout.
    pub fn state_at(&self, row: usize, col: usize) -> CellState {
        let minterm = self.layout().cell_of(row, col);
        self.cells[minterm as usize]
    }

    /// Minterms whose cell is `On`, ascending.
    pub fn minterms(&self) -> BTreeSet<u32> {
        self.indices_where(|state| state == CellState::On)
    }

    /// Minterms whose cell is `DontCare`, ascending.
    pub fn dont_cares(&self) -> BTreeSet<u32> {
        self.indices_where(|state| state == CellState::DontCare)
    }

    /// Minterms whose cell is `Off`, ascending.
    pub fn maxterms(&self) -> BTreeSet<u32> {
        self.indices_where(|state| state == CellState::Off)
    }

    fn indices_where(&self, mut pred: impl FnMut(CellState) -> bool) -> BTreeSet<u32> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(ix, &state)| pred(state).then(|| ix as u32))
            .collect()
    }

    fn check(&self, minterm: u32) -> Result<(), MintermOutOfRange> {
        if self.variable_count.contains(minterm) {
            Ok(())
        } else {
            Err(MintermOutOfRange {
                minterm,
                universe_size: self.variable_count.universe_size(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vc(n: u8) -> VariableCount {
        VariableCount::new(n).unwrap()
    }

    #[test]
    fn test_next_cycles() {
        let mut state = CellState::default();
        assert_eq!(state, CellState::Off);
        let mut seen = vec![state];
        for _ in 0..3 {
            state = state.next();
            seen.push(state);
        }
        assert_eq!(
            seen,
            vec![
                CellState::Off,
                CellState::On,
                CellState::DontCare,
                CellState::Off
            ]
        );
    }

    #[test]
    fn test_toggle() {
        let mut grid = CellGrid::new(vc(3));
        assert_eq!(grid.len(), 8);
        assert_eq!(grid.toggle(5).unwrap(), CellState::On);
        assert_eq!(grid.toggle(5).unwrap(), CellState::DontCare);
        assert_eq!(grid.get(5).unwrap(), CellState::DontCare);
        assert_eq!(grid.toggle(5).unwrap(), CellState::Off);

        let err = grid.toggle(8).unwrap_err();
        assert_eq!(
            err,
            MintermOutOfRange {
                minterm: 8,
                universe_size: 8
            }
        );
    }

    #[test]
    fn test_apply_overwrites() {
        let mut grid = CellGrid::new(vc(3));
        grid.set(7, CellState::On).unwrap();
        grid.set(6, CellState::DontCare).unwrap();

        grid.apply(vec![0, 1, 1, 42], vec![1, 2, 99]);
        assert_eq!(grid.minterms().into_iter().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(grid.dont_cares().into_iter().collect::<Vec<_>>(), vec![2]);
        assert_eq!(
            grid.maxterms().into_iter().collect::<Vec<_>>(),
            vec![3, 4, 5, 6, 7],
            "previous state is discarded"
        );
    }

    #[test]
    fn test_state_at() {
        let grid = CellGrid::from_terms(vc(4), vec![10], vec![15]);
        // 10 = 1010 sits in the last row and the last column, 15 in the middle.
        assert_eq!(grid.state_at(3, 3), CellState::On);
        assert_eq!(grid.state_at(2, 2), CellState::DontCare);
        assert_eq!(grid.state_at(0, 0), CellState::Off);
    }
}
