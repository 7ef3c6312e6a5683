// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Karnaugh map minimization for functions of 2 to 5 variables.
//!
//! Given the minterms and don't cares of a function, [`solve`] produces:
//!
//! * the map layout, with rows and columns in Gray-code order ([`layout`]),
//! * a minimized sum of products and a minimized product of sums, computed with Quine–McCluskey
//!   ([`primes`]) and rendered with [`display`],
//! * rectangular groups of cells for highlighting ([`groups`]).
//!
//! The groups are searched for on the map itself and are not derived from the minimized
//! expressions, so the two can disagree.
//!
//! ```
//! use kmap_min::{solve, VariableCount};
//!
//! let n = VariableCount::new(4).unwrap();
//! let solution = solve(n, [0, 1, 2, 3, 8, 9, 10], [11, 15]);
//! assert_eq!(solution.sop.expression, "B'");
//! ```

pub mod display;
pub mod errors;
pub mod grid;
pub mod groups;
pub mod input;
pub mod layout;
pub mod pattern;
pub mod primes;
#[cfg(any(test, feature = "proptest1"))]
mod proptest_helpers;
mod solve;
mod variables;

pub use solve::*;
pub use variables::*;
