// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Rule-based rewriting of parsed programs.

mod arc;

use log::debug;

use crate::ast::*;
use crate::error::{ErrKind, Error};

pub use self::arc::*;

/// A rewrite of a single command.
///
/// Rules see nothing but the command itself; everything they need (such
/// as the start position of a move) was captured when it was parsed.
pub trait Rule {
    fn name(&self) -> &str;

    fn matches(&self, command: &Command) -> bool;

    /// Produce the replacement for a matching command, which may be any
    /// number of commands.
    fn apply(&self, command: &Command) -> Result<Vec<Command>, ErrKind>;
}

/// An ordered list of rules.  For each command, the first rule that matches
/// replaces it; commands no rule matches are kept as they are.
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        RuleSet::default()
    }

    /// Append a rule; it is tried after all rules added before it.
    pub fn with(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn expand_command(&self, command: &Command) -> Result<Vec<Command>, ErrKind> {
        match self.rules.iter().find(|rule| rule.matches(command)) {
            Some(rule) => {
                let replacement = rule.apply(command)?;
                debug!("rule {} replaced {:?} with {} command(s)",
                       rule.name(), command.source, replacement.len());
                Ok(replacement)
            }
            None => Ok(vec![command.clone()]),
        }
    }

    /// Expand every line of the program.  Generated commands keep the line
    /// number of the command they replace.
    pub fn expand(&self, program: &Program) -> Result<Program, Error> {
        let mut lines = Vec::with_capacity(program.lines.len());
        for line in &program.lines {
            let expanded = self.expand_command(&line.command)
                               .map_err(|e| e.at(&program.filename, line.lineno))?;
            lines.extend(expanded.into_iter().map(|command| Line { lineno: line.lineno, command }));
        }
        Ok(Program { filename: program.filename.clone(), lines })
    }
}
