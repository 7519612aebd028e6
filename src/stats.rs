// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt;
use std::collections::BTreeMap;
use itertools::Itertools;

use crate::ast::*;

/// What happened to the commands of one file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statistics {
    /// Number of input lines per command kind.
    pub inputs: BTreeMap<CommandKind, usize>,
    /// For each input kind that was rewritten: number of generated commands
    /// per output kind.
    pub transformed: BTreeMap<CommandKind, BTreeMap<CommandKind, usize>>,
    /// Line numbers of lines no command matched.
    pub unidentified: Vec<usize>,
}

impl Statistics {
    /// Compare a parsed program with its expansion.
    pub fn collect(input: &Program, output: &Program) -> Self {
        let mut generated = output.lines.iter()
            .map(|line| (line.lineno, &line.command))
            .into_group_map();
        let mut stats = Statistics::default();
        for line in &input.lines {
            let kind = line.command.kind();
            *stats.inputs.entry(kind).or_default() += 1;
            if kind == CommandKind::Unidentified {
                stats.unidentified.push(line.lineno);
            }
            let outputs = generated.remove(&line.lineno).unwrap_or_default();
            if outputs.len() == 1 && *outputs[0] == line.command {
                continue;
            }
            let counts = stats.transformed.entry(kind).or_default();
            for command in outputs {
                *counts.entry(command.kind()).or_default() += 1;
            }
        }
        stats
    }

    pub fn total_lines(&self) -> usize {
        self.inputs.values().sum()
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} lines", self.total_lines())?;
        for (kind, n) in &self.inputs {
            write!(f, ", {} {}", n, kind)?;
        }
        for (kind, outputs) in &self.transformed {
            let outputs = outputs.iter().map(|(k, n)| format!("{} {}", n, k)).join(", ");
            write!(f, "; {} rewritten as {}", kind, outputs)?;
        }
        Ok(())
    }
}
