// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! A G-code post-processor for CNC and laser machines that only understand
//! a small dialect, such as the Snapmaker.
//!
//! Each line is recognized as one typed command of the machine's
//! [`Dialect`](dialect::Dialect), while the modal machine state (last axis
//! positions and feed rate) is tracked from line to line.  A
//! [`RuleSet`](transform::RuleSet) then rewrites commands the machine
//! cannot execute well; currently that means arc moves (G2/G3 with a
//! radius), which are replaced by a chain of G1 segments.  Finally every
//! command is rendered back into a line of text.
//!
//! ## Basic usage
//!
//! ```rust
//! use gcode_post::machine::{Machine, Options};
//!
//! let input = "G90\nG1 X10.00 Y10.00 Z0.00 F100\nG2 X20.00 Y10.00 Z0.00 F100 R5.00\n";
//! let output = Machine::Snapmaker.process("input.nc", input, &Options::default()).unwrap();
//! let lines = output.program.render();
//! assert_eq!(lines[0], "G90");
//! assert_eq!(lines.len(), 1 + 1 + 99);
//! ```
//!
//! Lines that no command of the dialect matches are passed through as they
//! are.  Conflicting dialect definitions, malformed numbers and impossible
//! arcs abort processing of the whole file.

pub mod ast;
pub mod dialect;
pub mod error;
pub mod field;
pub mod files;
pub mod machine;
pub mod parse;
pub mod state;
pub mod stats;
pub mod transform;

pub use error::{ErrKind, Error, GeometryError};
