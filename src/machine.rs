// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use clap::ValueEnum;
use log::info;
use strum_macros::Display;

use crate::ast::Program;
use crate::dialect::Dialect;
use crate::error::{ErrKind, Error};
use crate::parse::parse;
use crate::stats::Statistics;
use crate::transform::{ArcRule, RuleSet};

/// A supported target machine, selecting both the dialect and the rules.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, ValueEnum)]
pub enum Machine {
    #[strum(serialize = "snapmaker")]
    Snapmaker,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Options {
    /// Points sampled per arc, including both endpoints.
    pub num_points: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options { num_points: ArcRule::DEFAULT_POINTS }
    }
}

/// The result of processing one file.
#[derive(Debug, Clone)]
pub struct Output {
    pub program: Program,
    pub stats: Statistics,
}

impl Machine {
    pub fn dialect(self) -> Result<Dialect, ErrKind> {
        match self {
            Machine::Snapmaker => Dialect::snapmaker(),
        }
    }

    pub fn rules(self, options: &Options) -> RuleSet {
        match self {
            Machine::Snapmaker => RuleSet::new().with(ArcRule::new(options.num_points)),
        }
    }

    /// Parse, expand and collect statistics for one file's contents.
    ///
    /// Each call gets its own machine state, so calls never influence
    /// each other.
    pub fn process(self, filename: &str, input: &str, options: &Options) -> Result<Output, Error> {
        let dialect = self.dialect().map_err(|e| e.at(filename, 0))?;
        let parsed = parse(filename, input, &dialect)?;
        let program = self.rules(options).expand(&parsed)?;
        let stats = Statistics::collect(&parsed, &program);
        info!("{}: {}", filename, stats);
        Ok(Output { program, stats })
    }
}
