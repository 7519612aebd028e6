// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use strum_macros::Display;

use crate::ast::Coords;

/// A modal value tracked across lines.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum Axis {
    X, Y, Z,
    /// Feed rate; not an axis, but modal in exactly the same way.
    F,
}

/// Last-known positions and feed rate of the machine.
///
/// One instance lives for exactly one file run.  It is owned by the loop
/// that classifies the file's lines and is never shared between runs.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct MachineState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub f: f64,
}

impl MachineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
            Axis::F => self.f,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
            Axis::F => self.f = value,
        }
    }

    /// The current tool position, without the feed rate.
    pub fn position(&self) -> Coords {
        Coords { x: self.x, y: self.y, z: self.z }
    }
}
