// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use itertools::Itertools;
use thiserror::Error;

/// A fatal error while processing one file.
///
/// Any of these aborts the whole file; there is no partial output.
#[derive(Debug, Error)]
#[error("{filename}: error in line {lineno}: {kind}")]
pub struct Error {
    pub filename: String,
    pub lineno: usize,
    pub kind: ErrKind,
}

#[derive(Debug, Error)]
pub enum ErrKind {
    #[error("line matches several commands of equal priority: {}", .0.iter().join(", "))]
    Conflict(Vec<String>),
    #[error("invalid value {value:?} for field {field}")]
    InvalidField { field: &'static str, value: String },
    #[error("required field {0} is missing")]
    MissingField(&'static str),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("pattern error: {0}")]
    Pattern(#[from] fancy_regex::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("points too far apart for radius (chord {chord}, radius {radius})")]
    TooFarApart { chord: f64, radius: f64 },
    #[error("arc start and end points coincide, center is undetermined")]
    CoincidentPoints,
}

impl ErrKind {
    pub(crate) fn at(self, filename: &str, lineno: usize) -> Error {
        Error { filename: filename.into(), lineno, kind: self }
    }
}
