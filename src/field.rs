// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Conversion of captured text into field values.

use crate::error::ErrKind;
use crate::state::{Axis, MachineState};

/// How a field's value is obtained from its (possibly absent) capture.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Policy {
    /// The capture is required and parsed as a number.
    Literal,
    /// An absent capture means 0.
    ZeroDefault,
    /// Modal field: an absent capture means "unchanged", a present one
    /// updates the machine state.
    Previous(Axis),
}

/// Resolve one field.  Only `Policy::Previous` touches the state, and only
/// when the capture is present and valid.
pub fn resolve(field: &'static str, policy: Policy, capture: Option<&str>,
               state: &mut MachineState) -> Result<f64, ErrKind> {
    match policy {
        Policy::Literal => match capture {
            Some(text) => parse_number(field, text),
            None => Err(ErrKind::MissingField(field)),
        },
        Policy::ZeroDefault => capture.map_or(Ok(0.0), |text| parse_number(field, text)),
        Policy::Previous(axis) => match capture {
            Some(text) => {
                let value = parse_number(field, text)?;
                state.set(axis, value);
                Ok(value)
            }
            None => Ok(state.get(axis)),
        },
    }
}

pub fn parse_number(field: &'static str, text: &str) -> Result<f64, ErrKind> {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ErrKind::InvalidField { field, value: text.into() }),
    }
}

/// Helper for converting a floating number to an integer no larger than
/// `max`, or a suitable error.
pub fn num_to_int(field: &'static str, inp: f64, max: u32) -> Result<u32, ErrKind> {
    if (inp.round() - inp).abs() < 0.0001 && inp >= 0. && inp.round() <= max as f64 {
        Ok(inp.round() as u32)
    } else {
        Err(ErrKind::InvalidField { field, value: inp.to_string() })
    }
}
