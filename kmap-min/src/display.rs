// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering patterns as Sum-of-Products and Product-of-Sums expressions.

use crate::{pattern::BitPattern, variables::VariableNames};
use itertools::{Itertools, Position};
use std::{borrow::Cow, cmp::Ordering, fmt};

/// Whether a pattern stands for a product term or a sum clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize))]
pub enum Polarity {
    /// Sum of products: patterns cover minterms.
    Sop,
    /// Product of sums: patterns cover maxterms.
    Pos,
}

/// Renders a pattern as a product term, e.g. `AB'D`.
///
/// A pattern with no fixed positions is the constant `1`.
pub fn sop_term(pattern: &BitPattern, names: &VariableNames) -> String {
    TermDisplay::new(pattern, names, Polarity::Sop).to_string()
}

/// Renders a pattern as a sum clause, e.g. `(A' + B + D')`.
///
/// A pattern with no fixed positions is the empty sum, the constant `0`.
pub fn pos_clause(pattern: &BitPattern, names: &VariableNames) -> String {
    TermDisplay::new(pattern, names, Polarity::Pos).to_string()
}

/// Sorts patterns so that, position by position, `1` comes before `0` and `0` before `-`.
///
/// Terms mentioning `A` show up first, then terms mentioning `A'`, then terms not mentioning `A`
/// at all.
pub fn sort_for_display(patterns: &mut [BitPattern]) {
    patterns.sort_unstable_by(display_order);
}

fn display_order(a: &BitPattern, b: &BitPattern) -> Ordering {
    for (x, y) in a.positions().zip(b.positions()) {
        match (x, y) {
            (Some(true), Some(true)) | (Some(false), Some(false)) | (None, None) => continue,
            (Some(true), Some(false) | None) => return Ordering::Less,
            (Some(false) | None, Some(true)) => return Ordering::Greater,
            (Some(false), None) => return Ordering::Less,
            (None, Some(false)) => return Ordering::Greater,
        }
    }
    Ordering::Equal
}

/// Displays a single pattern as a product term or a sum clause.
pub struct TermDisplay<'a> {
    pattern: &'a BitPattern,
    names: &'a VariableNames,
    polarity: Polarity,
}

impl<'a> TermDisplay<'a> {
    pub fn new(pattern: &'a BitPattern, names: &'a VariableNames, polarity: Polarity) -> Self {
        assert_eq!(
            usize::from(pattern.width()),
            names.len(),
            "pattern {} needs exactly one name per position",
            pattern
        );
        Self {
            pattern,
            names,
            polarity,
        }
    }
}

impl<'a> fmt::Display for TermDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // A literal is complemented when its value disagrees with the polarity: 0 in a product
        // term, 1 in a sum clause.
        let complemented_value = match self.polarity {
            Polarity::Sop => false,
            Polarity::Pos => true,
        };
        let literals = self
            .pattern
            .positions()
            .enumerate()
            .filter_map(|(ix, literal)| {
                literal.map(|value| (self.names.get(ix), value == complemented_value))
            });

        match self.polarity {
            Polarity::Sop => {
                if self.pattern.is_universe() {
                    return write!(f, "1");
                }
                for (name, complemented) in literals {
                    write_literal(f, name, complemented)?;
                }
            }
            Polarity::Pos => {
                if self.pattern.is_universe() {
                    return write!(f, "0");
                }
                write!(f, "(")?;
                for literal in literals.with_position() {
                    match literal {
                        Position::First((name, complemented))
                        | Position::Middle((name, complemented)) => {
                            write_literal(f, name, complemented)?;
                            write!(f, " + ")?;
                        }
                        Position::Last((name, complemented))
                        | Position::Only((name, complemented)) => {
                            write_literal(f, name, complemented)?;
                        }
                    }
                }
                write!(f, ")")?;
            }
        }
        Ok(())
    }
}

#[inline]
fn write_literal(f: &mut fmt::Formatter, name: &str, complemented: bool) -> fmt::Result {
    if complemented {
        write!(f, "{}'", name)
    } else {
        write!(f, "{}", name)
    }
}

/// Displays a list of patterns as a whole expression.
///
/// Sum-of-Products terms are joined with ` + ` by default, Product-of-Sums clauses are written
/// next to each other. An empty list renders as the identity of the outer operation: `0` for a sum
/// of products and `1` for a product of sums.
pub struct ExpressionDisplay<'a> {
    patterns: Vec<&'a BitPattern>,
    names: &'a VariableNames,
    polarity: Polarity,
    separator: Cow<'a, str>,
}

impl<'a> ExpressionDisplay<'a> {
    pub fn new(
        patterns: impl IntoIterator<Item = &'a BitPattern>,
        names: &'a VariableNames,
        polarity: Polarity,
    ) -> Self {
        let mut patterns: Vec<_> = patterns.into_iter().collect();
        patterns.sort_unstable_by(|a, b| display_order(a, b));
        let separator = match polarity {
            Polarity::Sop => Cow::Borrowed(" + "),
            Polarity::Pos => Cow::Borrowed(""),
        };
        Self {
            patterns,
            names,
            polarity,
            separator,
        }
    }

    pub fn sop(patterns: impl IntoIterator<Item = &'a BitPattern>, names: &'a VariableNames) -> Self {
        Self::new(patterns, names, Polarity::Sop)
    }

    pub fn pos(patterns: impl IntoIterator<Item = &'a BitPattern>, names: &'a VariableNames) -> Self {
        Self::new(patterns, names, Polarity::Pos)
    }

    pub fn with_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl<'a> fmt::Display for ExpressionDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.patterns.is_empty() {
            return match self.polarity {
                Polarity::Sop => write!(f, "0"),
                Polarity::Pos => write!(f, "1"),
            };
        }

        for pattern in self.patterns.iter().with_position() {
            match pattern {
                Position::First(pattern) | Position::Middle(pattern) => {
                    write!(
                        f,
                        "{}{}",
                        TermDisplay::new(pattern, self.names, self.polarity),
                        self.separator
                    )?;
                }
                Position::Last(pattern) | Position::Only(pattern) => {
                    write!(f, "{}", TermDisplay::new(pattern, self.names, self.polarity))?;
                }
            }
        }
        Ok(())
    }
}
