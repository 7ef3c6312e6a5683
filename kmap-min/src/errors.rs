// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// A variable count outside the supported range of a Karnaugh map.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("variable count {count} is out of range (expected {min}..={max})")]
pub struct InvalidVariableCount {
    pub count: usize,
    pub min: u8,
    pub max: u8,
}

/// A minterm index that does not fit in the map's universe.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("minterm {minterm} is out of range for a map with {universe_size} cells")]
pub struct MintermOutOfRange {
    pub minterm: u32,
    pub universe_size: u32,
}

/// An error parsing a [`BitPattern`](crate::pattern::BitPattern) from its textual form.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid pattern {input:?}: {kind}")]
pub struct InvalidPattern {
    pub input: String,
    pub kind: PatternErrorKind,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PatternErrorKind {
    #[error("pattern is empty")]
    Empty,
    #[error("pattern has {0} positions, at most 32 are supported")]
    TooWide(usize),
    #[error("unexpected character {ch:?} at position {position}")]
    InvalidChar { ch: char, position: usize },
}
