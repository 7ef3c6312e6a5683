// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::render::{LayoutDisplay, SolutionDisplay};
use clap::{ArgEnum, Parser};
use color_eyre::Result;
use kmap_min::{
    grid::CellGrid, input::parse_terms, layout::GrayLayout, VariableCount, VariableNames,
};
use log::{debug, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[derive(Debug, Parser)]
#[clap(name = "kmap", about = "Minimize Boolean functions with Karnaugh maps")]
pub struct KmapApp {
    /// Log more: -v for debug output, -vv for trace output
    #[clap(long, short, global = true, parse(from_occurrences))]
    verbose: u8,

    #[clap(subcommand)]
    command: KmapCommand,
}

#[derive(Debug, Parser)]
pub enum KmapCommand {
    /// Minimize a function given by its minterms and don't cares
    Solve {
        /// Number of variables (2 to 5)
        #[clap(long, short = 'n')]
        vars: u8,

        /// Minterms, e.g. "0, 2 5-7"
        #[clap(long, short, default_value = "")]
        minterms: String,

        /// Don't-care terms, in the same format as the minterms
        #[clap(long, short, default_value = "")]
        dont_cares: String,

        /// Comma-separated variable names, most significant first
        #[clap(long)]
        names: Option<String>,

        #[clap(long, arg_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Print which minterm sits in each cell of a map
    Layout {
        /// Number of variables (2 to 5)
        #[clap(long, short = 'n')]
        vars: u8,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ArgEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl KmapApp {
    pub fn exec(self) -> Result<()> {
        let level = match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )?;
        self.command.exec()
    }
}

impl KmapCommand {
    pub fn exec(self) -> Result<()> {
        match self {
            Self::Solve {
                vars,
                minterms,
                dont_cares,
                names,
                format,
            } => {
                let variable_count = VariableCount::new(vars)?;
                let minterms = parse_terms(&minterms, variable_count);
                let dont_cares = parse_terms(&dont_cares, variable_count);
                debug!("parsed minterms {:?}, don't cares {:?}", minterms, dont_cares);

                let names = match names {
                    Some(names) => VariableNames::with_names(
                        variable_count,
                        names
                            .split(',')
                            .map(|name| name.trim().to_owned())
                            .filter(|name| !name.is_empty()),
                    ),
                    None => VariableNames::new(variable_count),
                };

                let grid = CellGrid::from_terms(variable_count, minterms, dont_cares);
                let solution = grid.solve_with_names(&names);
                match format {
                    OutputFormat::Text => print!("{}", SolutionDisplay::new(&solution, &names)),
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&solution)?)
                    }
                }
                Ok(())
            }
            Self::Layout { vars } => {
                let variable_count = VariableCount::new(vars)?;
                let names = VariableNames::new(variable_count);
                let layout = GrayLayout::build(variable_count);
                print!("{}", LayoutDisplay::new(&layout, &names));
                Ok(())
            }
        }
    }
}
