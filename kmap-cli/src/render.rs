// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use kmap_min::{layout::GrayLayout, KmapSolution, Solution, TruthRow, VariableNames};
use std::fmt;

/// Displays the map, truth table, expressions and groups of a solution as plain text.
pub struct SolutionDisplay<'a> {
    solution: &'a KmapSolution,
    names: &'a VariableNames,
}

impl<'a> SolutionDisplay<'a> {
    pub fn new(solution: &'a KmapSolution, names: &'a VariableNames) -> Self {
        Self { solution, names }
    }
}

impl<'a> fmt::Display for SolutionDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let solution = self.solution;

        writeln!(f, "Karnaugh map")?;
        write_grid(f, &solution.layout, self.names, |minterm| {
            solution.truth_table[minterm as usize].output.to_string()
        })?;

        writeln!(f)?;
        writeln!(f, "Truth table")?;
        write_truth_table(f, &solution.truth_table, self.names)?;

        writeln!(f)?;
        write_solution(f, "SOP", &solution.sop)?;
        write_solution(f, "POS", &solution.pos)?;

        writeln!(f)?;
        writeln!(f, "Groups")?;
        if solution.groups.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for group in &solution.groups {
            writeln!(
                f,
                "  {}x{} at ({}, {}): {}",
                group.height,
                group.width,
                group.row_origin,
                group.col_origin,
                join(&group.minterms)
            )?;
        }
        Ok(())
    }
}

/// Displays the minterm index shown in each cell of a map.
pub struct LayoutDisplay<'a> {
    layout: &'a GrayLayout,
    names: &'a VariableNames,
}

impl<'a> LayoutDisplay<'a> {
    pub fn new(layout: &'a GrayLayout, names: &'a VariableNames) -> Self {
        Self { layout, names }
    }
}

impl<'a> fmt::Display for LayoutDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_grid(f, self.layout, self.names, |minterm| minterm.to_string())
    }
}

fn write_grid(
    f: &mut fmt::Formatter,
    layout: &GrayLayout,
    names: &VariableNames,
    cell: impl Fn(u32) -> String,
) -> fmt::Result {
    let row_bits = usize::from(layout.row_bits());
    let row_vars: String = names.iter().take(row_bits).collect();
    let col_vars: String = names.iter().skip(row_bits).collect();
    let col_labels = layout.col_labels();

    let label_width = row_vars.len().max(row_bits);
    let cell_width = col_labels
        .iter()
        .map(|label| label.len())
        .max()
        .unwrap_or(1)
        .max(2);

    writeln!(f, "{:>width$}\\{}", row_vars, col_vars, width = label_width)?;
    write!(f, "{:>width$} ", "", width = label_width)?;
    for label in &col_labels {
        write!(f, " {:>width$}", label, width = cell_width)?;
    }
    writeln!(f)?;

    for (row, row_label) in layout.row_labels().iter().enumerate() {
        write!(f, "{:>width$} ", row_label, width = label_width)?;
        for col in 0..layout.cols() {
            let minterm = layout.cell_of(row, col);
            write!(f, " {:>width$}", cell(minterm), width = cell_width)?;
        }
        writeln!(f)?;
    }
    Ok(())
}

fn write_truth_table(
    f: &mut fmt::Formatter,
    rows: &[TruthRow],
    names: &VariableNames,
) -> fmt::Result {
    let header: Vec<&str> = names.iter().collect();
    writeln!(f, "  {} | F", header.join(" "))?;
    for row in rows {
        // Right-align each value under its variable name.
        let inputs: Vec<String> = row
            .inputs
            .iter()
            .zip(names.iter())
            .map(|(&value, name)| format!("{:>width$}", u8::from(value), width = name.len()))
            .collect();
        writeln!(f, "  {} | {}", inputs.join(" "), row.output)?;
    }
    Ok(())
}

fn write_solution(f: &mut fmt::Formatter, label: &str, solution: &Solution) -> fmt::Result {
    writeln!(f, "{}: {}", label, solution.expression)?;
    let primes: Vec<String> = solution
        .prime_implicants
        .iter()
        .map(|pattern| pattern.to_string())
        .collect();
    writeln!(f, "  prime implicants: {}", primes.join(", "))?;
    for (pattern, covered) in solution.selected.iter().zip(&solution.coverage) {
        writeln!(f, "  {} covers {}", pattern, join(covered))?;
    }
    Ok(())
}

fn join(minterms: &[u32]) -> String {
    minterms
        .iter()
        .map(|minterm| minterm.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kmap_min::{solve, VariableCount};

    #[test]
    fn test_layout_display() {
        let n = VariableCount::new(3).unwrap();
        let names = VariableNames::new(n);
        let rendered = LayoutDisplay::new(&GrayLayout::build(n), &names).to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "A\\BC");
        assert_eq!(lines[1], "   00 01 11 10");
        assert_eq!(lines[2], "0   0  1  3  2");
        assert_eq!(lines[3], "1   4  5  7  6");
    }

    #[test]
    fn test_solution_display() {
        let n = VariableCount::new(2).unwrap();
        let names = VariableNames::new(n);
        let solution = solve(n, [1, 3], []);
        let rendered = SolutionDisplay::new(&solution, &names).to_string();
        assert!(rendered.contains("SOP: B\n"), "rendered:\n{}", rendered);
        assert!(rendered.contains("POS: (B)\n"), "rendered:\n{}", rendered);
        assert!(rendered.contains("  -1 covers 1, 3\n"), "rendered:\n{}", rendered);
        assert!(rendered.contains("  0 1 | 1\n"), "rendered:\n{}", rendered);
        assert!(rendered.contains("  2x1 at (0, 1): 1, 3\n"), "rendered:\n{}", rendered);
    }
}
