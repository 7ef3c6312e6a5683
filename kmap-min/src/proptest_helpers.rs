// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    grid::{CellGrid, CellState},
    pattern::BitPattern,
    VariableCount,
};
use proptest::prelude::*;

impl Arbitrary for CellState {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            Just(CellState::Off),
            Just(CellState::On),
            Just(CellState::DontCare),
        ]
        .boxed()
    }
}

impl Arbitrary for VariableCount {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (VariableCount::MIN..=VariableCount::MAX)
            .prop_map(|n| VariableCount::new(n).expect("n is in range"))
            .boxed()
    }
}

impl Arbitrary for CellGrid {
    /// Fixes the number of variables if set.
    type Parameters = Option<VariableCount>;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(params: Self::Parameters) -> Self::Strategy {
        let count_strategy = match params {
            Some(count) => Just(count).boxed(),
            None => any::<VariableCount>(),
        };
        count_strategy
            .prop_flat_map(|count| {
                let size = count.universe_size() as usize;
                prop::collection::vec(any::<CellState>(), size).prop_map(move |states| {
                    let mut grid = CellGrid::new(count);
                    for (minterm, state) in states.into_iter().enumerate() {
                        grid.set(minterm as u32, state).expect("one state per minterm");
                    }
                    grid
                })
            })
            .boxed()
    }
}

impl Arbitrary for BitPattern {
    /// The width of the generated patterns.
    type Parameters = u8;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(width: Self::Parameters) -> Self::Strategy {
        let width = if width == 0 { VariableCount::MAX } else { width };
        prop::collection::vec(any::<Option<bool>>(), usize::from(width))
            .prop_map(|literals| {
                let text: String = literals
                    .into_iter()
                    .map(|literal| match literal {
                        Some(true) => '1',
                        Some(false) => '0',
                        None => '-',
                    })
                    .collect();
                text.parse().expect("generated patterns are well-formed")
            })
            .boxed()
    }
}
