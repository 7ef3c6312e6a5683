// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::VariableCount;

/// The two-dimensional arrangement of a Karnaugh map.
///
/// The low `col_bits` bits of a minterm select the column and the remaining high bits select the
/// row. Rows and columns are both walked in Gray-code order, so any two cells that touch, including
/// across the edges of the map, differ in exactly one variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize))]
pub struct GrayLayout {
    rows: usize,
    cols: usize,
    row_bits: u8,
    col_bits: u8,
}

impl GrayLayout {
    pub fn build(variable_count: VariableCount) -> Self {
        let n = variable_count.get();
        let row_bits = n / 2;
        let col_bits = n - row_bits;
        Self {
            rows: 1 << row_bits,
            cols: 1 << col_bits,
            row_bits,
            col_bits,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn row_bits(&self) -> u8 {
        self.row_bits
    }

    #[inline]
    pub fn col_bits(&self) -> u8 {
        self.col_bits
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Returns the minterm shown at `(row, col)`.
    ///
    /// Panics if the position is outside the map.
    pub fn cell_of(&self, row: usize, col: usize) -> u32 {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) out of range for a {}x{} map",
            row,
            col,
            self.rows,
            self.cols
        );
        (gray_code(row as u32) << self.col_bits) | gray_code(col as u32)
    }

    /// Returns the `(row, col)` position at which `minterm` is shown.
    pub fn position_of(&self, minterm: u32) -> (usize, usize) {
        assert!(
            (minterm as usize) < self.cell_count(),
            "minterm {} out of range for a {}x{} map",
            minterm,
            self.rows,
            self.cols
        );
        let col_mask: u32 = (1 << self.col_bits) - 1;
        let row = gray_inverse(minterm >> self.col_bits);
        let col = gray_inverse(minterm & col_mask);
        (row as usize, col as usize)
    }

    /// The four neighbours of a cell, wrapping around the edges: up, down, left, right.
    ///
    /// On maps with only two rows or columns a neighbour can appear twice.
    pub fn neighbors(&self, row: usize, col: usize) -> [(usize, usize); 4] {
        let up = (row + self.rows - 1) % self.rows;
        let down = (row + 1) % self.rows;
        let left = (col + self.cols - 1) % self.cols;
        let right = (col + 1) % self.cols;
        [(up, col), (down, col), (row, left), (row, right)]
    }

    /// Header labels for the rows, e.g. `["0", "1"]` or `["00", "01", "11", "10"]`.
    pub fn row_labels(&self) -> Vec<String> {
        labels(self.rows, self.row_bits)
    }

    /// Header labels for the columns.
    pub fn col_labels(&self) -> Vec<String> {
        labels(self.cols, self.col_bits)
    }
}

/// Reflected binary Gray code.
#[inline]
pub fn gray_code(x: u32) -> u32 {
    x ^ (x >> 1)
}

/// Inverse of [`gray_code`].
pub fn gray_inverse(mut g: u32) -> u32 {
    let mut x = g;
    while g != 0 {
        g >>= 1;
        x ^= g;
    }
    x
}

fn labels(count: usize, bits: u8) -> Vec<String> {
    (0..count as u32)
        .map(|ix| format!("{:0width$b}", gray_code(ix), width = usize::from(bits)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(n: u8) -> GrayLayout {
        GrayLayout::build(VariableCount::new(n).unwrap())
    }

    #[test]
    fn test_dimensions() {
        let expected = [(2, 2, 2), (3, 2, 4), (4, 4, 4), (5, 4, 8)];
        for (n, rows, cols) in expected {
            let layout = layout(n);
            assert_eq!((layout.rows(), layout.cols()), (rows, cols), "dimensions for n = {}", n);
            assert_eq!(layout.cell_count(), 1 << n);
        }
    }

    #[test]
    fn test_four_variable_map() {
        let layout = layout(4);
        let grid: Vec<Vec<u32>> = (0..4)
            .map(|row| (0..4).map(|col| layout.cell_of(row, col)).collect())
            .collect();
        assert_eq!(
            grid,
            vec![
                vec![0, 1, 3, 2],
                vec![4, 5, 7, 6],
                vec![12, 13, 15, 14],
                vec![8, 9, 11, 10],
            ]
        );
        assert_eq!(layout.row_labels(), vec!["00", "01", "11", "10"]);
        assert_eq!(layout.col_labels(), vec!["00", "01", "11", "10"]);
    }

    #[test]
    fn test_adjacency() {
        for n in VariableCount::MIN..=VariableCount::MAX {
            let layout = layout(n);
            for row in 0..layout.rows() {
                for col in 0..layout.cols() {
                    let here = layout.cell_of(row, col);
                    for (r, c) in layout.neighbors(row, col) {
                        if (r, c) == (row, col) {
                            continue;
                        }
                        let there = layout.cell_of(r, c);
                        assert_eq!(
                            (here ^ there).count_ones(),
                            1,
                            "n = {}: ({}, {}) = {} and ({}, {}) = {} are adjacent",
                            n,
                            row,
                            col,
                            here,
                            r,
                            c,
                            there
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_position_of_inverts_cell_of() {
        for n in VariableCount::MIN..=VariableCount::MAX {
            let layout = layout(n);
            let mut seen = vec![false; layout.cell_count()];
            for row in 0..layout.rows() {
                for col in 0..layout.cols() {
                    let minterm = layout.cell_of(row, col);
                    assert!(!seen[minterm as usize], "minterm {} placed once", minterm);
                    seen[minterm as usize] = true;
                    assert_eq!(layout.position_of(minterm), (row, col));
                }
            }
        }
    }

    #[test]
    fn test_gray_inverse() {
        for x in 0..64 {
            assert_eq!(gray_inverse(gray_code(x)), x);
        }
    }
}
