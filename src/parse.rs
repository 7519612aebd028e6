// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::collections::HashMap;
use itertools::Itertools;
use log::{debug, trace};

use crate::ast::*;
use crate::dialect::{Capture, Dialect};
use crate::error::{ErrKind, Error};
use crate::field::{num_to_int, resolve};
use crate::state::MachineState;

/// Classify one line into exactly one command.
///
/// Lines that no variant matches become `Unidentified`.  If several
/// variants match, only those with the highest priority are kept; more
/// than one left over is a conflict in the dialect.
///
/// Fields are resolved only after the winning variant has been chosen, and
/// the machine state is updated only if the whole line is valid.
pub fn classify(line: &str, dialect: &Dialect,
                state: &mut MachineState) -> Result<Command, ErrKind> {
    let line = line.trim_start();
    if line.is_empty() {
        return Ok(Command::new("", Instr::Empty));
    }

    let mut candidates = vec![];
    for variant in dialect.variants() {
        if let Some(captures) = variant.search(line)? {
            candidates.push((variant, captures));
        }
    }

    let top = match candidates.iter().map(|(variant, _)| variant.priority).max() {
        Some(top) => top,
        None => return Ok(Command::new(line, Instr::Unidentified)),
    };
    candidates.retain(|(variant, _)| variant.priority == top);
    let (variant, captures) = candidates.into_iter().exactly_one().map_err(
        |tied| ErrKind::Conflict(tied.map(|(variant, _)| variant.name.clone()).collect()))?;

    let mut next = *state;
    let instr = make_instr(variant.kind, captures, &mut next)?;
    *state = next;
    Ok(Command::new(line, instr))
}

/// Parse a whole file with a fresh machine state.
pub fn parse(filename: &str, input: &str, dialect: &Dialect) -> Result<Program, Error> {
    let mut state = MachineState::new();
    let mut prog = Program { filename: filename.into(), lines: vec![] };
    for (n, text) in input.lines().enumerate() {
        let lineno = n + 1;
        let command = classify(text, dialect, &mut state).map_err(|e| e.at(filename, lineno))?;
        match command.instr {
            Instr::Unidentified =>
                debug!("line {}: unidentified command {:?}", lineno, command.source),
            _ => trace!("line {}: {:?} parsed as {:?}", lineno, command.source, command.instr),
        }
        prog.lines.push(Line { lineno, command });
    }
    Ok(prog)
}

fn make_instr(kind: CommandKind, captures: Vec<Capture>,
              state: &mut MachineState) -> Result<Instr, ErrKind> {
    // snapshot before the modal fields of this line are committed
    let start = state.position();
    let mut values = Values(HashMap::new());
    for capture in captures {
        let value = resolve(capture.field, capture.policy, capture.text, state)?;
        values.0.insert(capture.field, value);
    }

    Ok(match kind {
        CommandKind::Empty => Instr::Empty,
        CommandKind::Comment => Instr::Comment,
        CommandKind::Unidentified => Instr::Unidentified,
        CommandKind::SpindleStart => Instr::SpindleStart {
            power: num_to_int("P", values.get("P")?, u32::MAX)?,
        },
        CommandKind::SpindleStop => Instr::SpindleStop,
        CommandKind::UnitsMetric => Instr::UnitsMetric,
        CommandKind::UnitsImperial => Instr::UnitsImperial,
        CommandKind::MoveModeAbsolute => Instr::MoveModeAbsolute,
        CommandKind::MoveModeRelative => Instr::MoveModeRelative,
        CommandKind::LinearMove => Instr::LinearMove(values.motion(start, &[0, 1])?),
        CommandKind::ArcMove => Instr::ArcMove(values.motion(start, &[2, 3])?, values.get("R")?),
    })
}

/// Helper for retrieving resolved field values of a line.
struct Values(HashMap<&'static str, f64>);

impl Values {
    fn get(&self, field: &'static str) -> Result<f64, ErrKind> {
        self.0.get(field).copied().ok_or(ErrKind::MissingField(field))
    }

    fn motion(&self, start: Coords, codes: &[u32]) -> Result<Move, ErrKind> {
        let code = num_to_int("G", self.get("G")?, 99)?;
        if !codes.contains(&code) {
            return Err(ErrKind::InvalidField { field: "G", value: code.to_string() });
        }
        Ok(Move {
            code: code as u8,
            target: Coords { x: self.get("X")?, y: self.get("Y")?, z: self.get("Z")? },
            feed: self.get("F")?,
            start,
        })
    }
}
