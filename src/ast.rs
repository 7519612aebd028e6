// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt::{self, Formatter};
use strum_macros::{Display, EnumDiscriminants};

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub filename: String,
    pub lines: Vec<Line>,
}

/// A command together with the (1-based) source line it came from.
///
/// Commands generated by a transformation carry the line number of the
/// command they replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub lineno: usize,
    pub command: Command,
}

/// One classified line of G-code.
///
/// `source` is the line as read (minus leading whitespace).  It is what
/// non-move commands render back to; generated commands have an empty
/// source and always render through their formatter.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub source: String,
    pub instr: Instr,
}

#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(CommandKind))]
#[strum_discriminants(derive(Hash, PartialOrd, Ord, Display))]
pub enum Instr {
    Empty,
    Comment,
    Unidentified,
    SpindleStart { power: u32 },  // M3 P..
    SpindleStop,                  // M5
    UnitsMetric,                  // G21
    UnitsImperial,                // G20
    MoveModeAbsolute,             // G90
    MoveModeRelative,             // G91
    LinearMove(Move),             // G0-1
    ArcMove(Move, f64),           // G2-3, with radius
}

/// Coordinates of the tool in the machine's current units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coords {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A motion command.
///
/// `start` is the position the machine was at before this command, fixed
/// when the line is recognized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    pub code: u8,
    pub target: Coords,
    pub feed: f64,
    pub start: Coords,
}

impl Command {
    pub fn new(source: impl Into<String>, instr: Instr) -> Self {
        Command { source: source.into(), instr }
    }

    /// A command that has no source text of its own.
    pub fn generated(instr: Instr) -> Self {
        Command { source: String::new(), instr }
    }

    pub fn kind(&self) -> CommandKind {
        CommandKind::from(&self.instr)
    }
}

impl Program {
    /// Render every line, in order.
    pub fn render(&self) -> Vec<String> {
        self.lines.iter().map(|line| line.command.to_string()).collect()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line.command)?;
        }
        Ok(())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.instr {
            Instr::LinearMove(mv) => write!(f, "{}", mv),
            Instr::ArcMove(mv, radius) => write!(f, "{} R{:.2}", mv, radius),
            _ => f.write_str(&self.source),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "G{} X{:.2} Y{:.2} Z{:.2}",
               self.code, self.target.x, self.target.y, self.target.z)?;
        // rapid moves ignore the feed rate
        if self.code == 1 {
            write!(f, " F{:.0}", self.feed)?;
        }
        Ok(())
    }
}
