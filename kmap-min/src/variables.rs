// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::InvalidVariableCount;
use arrayvec::ArrayVec;
use std::{borrow::Cow, convert::TryFrom, fmt};

/// The number of variables of a Karnaugh map, between 2 and 5 inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(serde::Serialize))]
#[cfg_attr(feature = "serde1", serde(transparent))]
pub struct VariableCount(u8);

impl VariableCount {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 5;

    pub fn new(count: u8) -> Result<Self, InvalidVariableCount> {
        if (Self::MIN..=Self::MAX).contains(&count) {
            Ok(Self(count))
        } else {
            Err(InvalidVariableCount {
                count: usize::from(count),
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    /// The number of cells in the map, `2^n`.
    #[inline]
    pub fn universe_size(self) -> u32 {
        1 << self.0
    }

    /// Iterates over every minterm index of the map.
    #[inline]
    pub fn minterms(self) -> impl Iterator<Item = u32> {
        0..self.universe_size()
    }

    #[inline]
    pub fn contains(self, minterm: u32) -> bool {
        minterm < self.universe_size()
    }
}

impl TryFrom<u8> for VariableCount {
    type Error = InvalidVariableCount;

    fn try_from(count: u8) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl TryFrom<usize> for VariableCount {
    type Error = InvalidVariableCount;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        u8::try_from(count)
            .ok()
            .and_then(|count| Self::new(count).ok())
            .ok_or(InvalidVariableCount {
                count,
                min: Self::MIN,
                max: Self::MAX,
            })
    }
}

impl fmt::Display for VariableCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

const MAX_VARIABLES: usize = VariableCount::MAX as usize;

const DEFAULT_NAMES: [&str; MAX_VARIABLES] = ["A", "B", "C", "D", "E"];

/// Names used when rendering expressions, most significant variable first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableNames {
    names: ArrayVec<Cow<'static, str>, MAX_VARIABLES>,
}

impl VariableNames {
    /// The default names `A`, `B`, ... for `count` variables.
    pub fn new(count: VariableCount) -> Self {
        let names = DEFAULT_NAMES[..usize::from(count.get())]
            .iter()
            .map(|&name| Cow::Borrowed(name))
            .collect();
        Self { names }
    }

    /// Uses custom names. Missing names fall back to the defaults and extra names are ignored.
    pub fn with_names<I, S>(count: VariableCount, custom: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        let mut names = Self::new(count);
        for (slot, name) in names.names.iter_mut().zip(custom) {
            *slot = name.into();
        }
        names
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    pub fn get(&self, ix: usize) -> &str {
        &self.names[ix]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(|name| &**name)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_owned).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_count_range() {
        for n in 0..=8_u8 {
            let result = VariableCount::new(n);
            assert_eq!(result.is_ok(), (2..=5).contains(&n), "validity of n = {}", n);
        }
        let err = VariableCount::try_from(300_usize).unwrap_err();
        assert_eq!(err.count, 300);

        let four = VariableCount::new(4).unwrap();
        assert_eq!(four.universe_size(), 16);
        assert!(four.contains(15));
        assert!(!four.contains(16));
    }

    #[test]
    fn test_variable_names() {
        let three = VariableCount::new(3).unwrap();
        assert_eq!(VariableNames::new(three).to_vec(), vec!["A", "B", "C"]);

        let custom = VariableNames::with_names(three, vec!["x".to_owned(), "y".to_owned()]);
        assert_eq!(custom.to_vec(), vec!["x", "y", "C"]);

        let extra = VariableNames::with_names(three, ["p", "q", "r", "s"]);
        assert_eq!(extra.to_vec(), vec!["p", "q", "r"]);
    }
}
