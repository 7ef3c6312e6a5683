// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod command;
mod render;

pub use command::*;
pub use render::*;
