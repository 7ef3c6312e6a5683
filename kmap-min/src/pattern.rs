// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::{InvalidPattern, PatternErrorKind};
use std::{cmp::Ordering, fmt, str::FromStr};

/// The largest width a pattern can have.
pub const MAX_WIDTH: u8 = 32;

/// A cube over `width` Boolean variables.
///
/// A set bit in `mask` marks a fixed position, and `bits` holds the value at that position. Free
/// positions (don't cares, shown as `-`) are always zero in `bits`.
///
/// Position 0 refers to the most significant bit, so the pattern `10-` over 3 variables covers the
/// minterms 4 and 5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BitPattern {
    bits: u32,
    mask: u32,
    width: u8,
}

impl BitPattern {
    /// Returns the fully specified cube for a single minterm.
    pub fn minterm(value: u32, width: u8) -> Self {
        let mask = width_mask(width);
        assert_eq!(
            value & !mask,
            0,
            "minterm {} does not fit in {} bits",
            value,
            width
        );
        Self {
            bits: value,
            mask,
            width,
        }
    }

    /// Returns the cube where every position is free.
    pub fn universe(width: u8) -> Self {
        assert!(width <= MAX_WIDTH, "width {} is too large", width);
        Self {
            bits: 0,
            mask: 0,
            width,
        }
    }

    #[inline]
    pub fn width(&self) -> u8 {
        self.width
    }

    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    #[inline]
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Merges two cubes that differ in exactly one fixed position.
    ///
    /// Returns `None` if the free positions don't line up, or if the fixed positions differ in zero
    /// or more than one place.
    ///
    /// Panics if the two patterns have different widths.
    ///
    /// # Examples
    ///
    /// ```
    /// use kmap_min::pattern::BitPattern;
    ///
    /// let a: BitPattern = "100".parse().unwrap();
    /// let b: BitPattern = "101".parse().unwrap();
    /// assert_eq!(a.merge(&b).unwrap().to_string(), "10-");
    ///
    /// let c: BitPattern = "1-1".parse().unwrap();
    /// assert_eq!(a.merge(&c), None);
    /// ```
    pub fn merge(&self, other: &BitPattern) -> Option<BitPattern> {
        assert_eq!(
            self.width, other.width,
            "patterns {} and {} have different widths",
            self, other
        );
        if self.mask != other.mask {
            return None;
        }
        let diff = self.bits ^ other.bits;
        if diff.count_ones() != 1 {
            return None;
        }
        Some(Self {
            bits: self.bits & !diff,
            mask: self.mask & !diff,
            width: self.width,
        })
    }

    /// Returns true if `minterm` agrees with every fixed position of this pattern.
    #[inline]
    pub fn covers(&self, minterm: u32) -> bool {
        minterm & self.mask == self.bits
    }

    /// Returns true if every minterm covered by `other` is also covered by `self`.
    #[inline]
    pub fn contains(&self, other: &BitPattern) -> bool {
        self.mask & other.mask == self.mask && other.bits & self.mask == self.bits
    }

    /// The number of positions fixed to `1`.
    #[inline]
    pub fn ones_count(&self) -> u32 {
        self.bits.count_ones()
    }

    /// The number of fixed positions.
    #[inline]
    pub fn literal_count(&self) -> u32 {
        self.mask.count_ones()
    }

    /// The number of free positions.
    #[inline]
    pub fn free_count(&self) -> u32 {
        u32::from(self.width) - self.literal_count()
    }

    #[inline]
    pub fn is_universe(&self) -> bool {
        self.mask == 0
    }

    /// Returns the literal at position `ix`, counted from the most significant bit: `Some(true)`
    /// for `1`, `Some(false)` for `0` and `None` for a free position.
    pub fn position(&self, ix: usize) -> Option<bool> {
        assert!(
            ix < usize::from(self.width),
            "position {} out of range 0..{}",
            ix,
            self.width
        );
        let bit: u32 = 1 << (usize::from(self.width) - 1 - ix);
        (self.mask & bit != 0).then(|| self.bits & bit != 0)
    }

    /// Iterates over the literals of this pattern, most significant position first.
    pub fn positions(&self) -> impl Iterator<Item = Option<bool>> + '_ {
        (0..usize::from(self.width)).map(move |ix| self.position(ix))
    }

    /// Iterates over every minterm covered by this pattern, in ascending order.
    pub fn minterms(&self) -> impl Iterator<Item = u32> + '_ {
        let free = width_mask(self.width) & !self.mask;
        let count = 1_u64 << free.count_ones();
        (0..count).map(move |ix| self.bits | deposit(ix as u32, free))
    }
}

/// Ordered by textual form (`-` sorts before `0` and `1`), so sorted lists read naturally.
impl Ord for BitPattern {
    fn cmp(&self, other: &Self) -> Ordering {
        self.width
            .cmp(&other.width)
            .then_with(|| self.positions().cmp(other.positions()))
    }
}

impl PartialOrd for BitPattern {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BitPattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for literal in self.positions() {
            let ch = match literal {
                Some(true) => '1',
                Some(false) => '0',
                None => '-',
            };
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

impl FromStr for BitPattern {
    type Err = InvalidPattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |kind| InvalidPattern {
            input: s.to_owned(),
            kind,
        };

        let width = s.chars().count();
        if width == 0 {
            return Err(error(PatternErrorKind::Empty));
        }
        if width > usize::from(MAX_WIDTH) {
            return Err(error(PatternErrorKind::TooWide(width)));
        }

        let mut bits = 0;
        let mut mask = 0;
        for (position, ch) in s.chars().enumerate() {
            bits <<= 1;
            mask <<= 1;
            match ch {
                '0' => mask |= 1,
                '1' => {
                    mask |= 1;
                    bits |= 1;
                }
                '-' | 'x' | 'X' | '2' => {}
                _ => return Err(error(PatternErrorKind::InvalidChar { ch, position })),
            }
        }

        Ok(Self {
            bits,
            mask,
            width: width as u8,
        })
    }
}

#[cfg(feature = "serde1")]
impl serde::Serialize for BitPattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[inline]
fn width_mask(width: u8) -> u32 {
    assert!(width <= MAX_WIDTH, "width {} is too large", width);
    if width == MAX_WIDTH {
        u32::MAX
    } else {
        (1 << width) - 1
    }
}

// Scatters the low bits of `value` into the set positions of `positions`, lowest first.
fn deposit(mut value: u32, positions: u32) -> u32 {
    let mut out = 0;
    let mut remaining = positions;
    while remaining != 0 {
        let lowest = remaining & remaining.wrapping_neg();
        if value & 1 == 1 {
            out |= lowest;
        }
        value >>= 1;
        remaining &= !lowest;
    }
    out
}
