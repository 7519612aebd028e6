// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! Command sets: which lines a machine understands, and how their fields
//! are read.
//!
//! A `Variant` describes one kind of command as an ordered list of
//! `Matcher`s, going from general to specific.  Related variants share
//! their leading matchers, e.g. both linear and arc moves start with the
//! general move matcher, which declares the axis and feed fields.

use fancy_regex::Regex;

use crate::ast::CommandKind;
use crate::error::ErrKind;
use crate::field::Policy;
use crate::state::Axis;

/// A field capture that survived merging, with the policy to resolve it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capture<'t> {
    pub field: &'static str,
    pub policy: Policy,
    pub text: Option<&'t str>,
}

/// A named sub-pattern with its field registry.
///
/// Every declared field should be a named group of the pattern; a field
/// whose group did not participate in the match is captured as absent.
#[derive(Debug, Clone)]
pub struct Matcher {
    pub name: &'static str,
    pattern: Option<Regex>,
    fields: Vec<(&'static str, Policy)>,
}

impl Matcher {
    pub fn new(name: &'static str, pattern: &str,
               fields: &[(&'static str, Policy)]) -> Result<Self, ErrKind> {
        Ok(Matcher { name, pattern: Some(Regex::new(pattern)?), fields: fields.to_vec() })
    }

    /// A structural matcher without a pattern; it always matches.
    pub fn placeholder(name: &'static str) -> Self {
        Matcher { name, pattern: None, fields: vec![] }
    }

    /// Search the line.  `None` means no match, which is not an error.
    pub fn search<'t>(&self, line: &'t str) -> Result<Option<Vec<Capture<'t>>>, ErrKind> {
        let caps = match &self.pattern {
            None => return Ok(Some(vec![])),
            Some(pattern) => match pattern.captures(line)? {
                None => return Ok(None),
                Some(caps) => caps,
            },
        };
        Ok(Some(self.fields.iter().map(|&(field, policy)| Capture {
            field,
            policy,
            text: caps.name(field).map(|m| m.as_str()),
        }).collect()))
    }
}

/// One recognizable kind of command.
#[derive(Debug, Clone)]
pub struct Variant {
    pub name: String,
    pub kind: CommandKind,
    /// Higher wins when several variants match the same line.
    pub priority: i32,
    matchers: Vec<Matcher>,
}

impl Variant {
    /// Create a variant that starts out with the `inherited` matchers.
    pub fn new(name: impl Into<String>, kind: CommandKind, inherited: &[Matcher]) -> Self {
        Variant { name: name.into(), kind, priority: 0, matchers: inherited.to_vec() }
    }

    pub fn with(mut self, matcher: Matcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn matchers(&self) -> &[Matcher] {
        &self.matchers
    }

    /// Match all matchers against the line, merging their captures.
    ///
    /// A field declared again by a later matcher replaces the earlier
    /// capture, keeping its position in the resolution order.
    pub fn search<'t>(&self, line: &'t str) -> Result<Option<Vec<Capture<'t>>>, ErrKind> {
        let mut merged: Vec<Capture<'t>> = vec![];
        for matcher in &self.matchers {
            let captures = match matcher.search(line)? {
                Some(captures) => captures,
                None => return Ok(None),
            };
            for capture in captures {
                match merged.iter_mut().find(|c| c.field == capture.field) {
                    Some(existing) => *existing = capture,
                    None => merged.push(capture),
                }
            }
        }
        Ok(Some(merged))
    }
}

/// An ordered, immutable set of command variants for one machine.
#[derive(Debug, Clone)]
pub struct Dialect {
    pub name: String,
    variants: Vec<Variant>,
}

// Motion words must come in X Y Z F order, which is what the CAM
// postprocessors for these machines emit.
const MOVE_PATTERN: &str = concat!(r"\bG(?P<G>\d) +(?:X(?P<X>[\d.-]+))? *(?:Y(?P<Y>[\d.-]+))?",
                                   r" *(?:Z(?P<Z>[\d.-]+))? *(?:F(?P<F>[\d.-]+))?");

impl Dialect {
    pub fn new(name: impl Into<String>, variants: Vec<Variant>) -> Self {
        Dialect { name: name.into(), variants }
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// The command set understood by Snapmaker machines.
    pub fn snapmaker() -> Result<Self, ErrKind> {
        let spindle = [Matcher::placeholder("spindle")];
        let units = [Matcher::new("units", r"\bG2[01]\b", &[])?];
        let move_mode = [Matcher::placeholder("move mode")];
        let moving = [Matcher::new("move", MOVE_PATTERN, &[
            ("G", Policy::Literal),
            ("X", Policy::Previous(Axis::X)),
            ("Y", Policy::Previous(Axis::Y)),
            ("Z", Policy::Previous(Axis::Z)),
            ("F", Policy::Previous(Axis::F)),
        ])?];

        Ok(Dialect::new("snapmaker", vec![
            // outranks the moves, since commented-out code still contains them
            Variant::new("Comment", CommandKind::Comment, &[])
                .with(Matcher::new("comment", r"^[;(]", &[])?)
                .with_priority(1),
            Variant::new("StartSpindle", CommandKind::SpindleStart, &spindle)
                .with(Matcher::new("M3", r"\bM3 +P(?P<P>\d+)", &[("P", Policy::Literal)])?),
            Variant::new("StopSpindle", CommandKind::SpindleStop, &spindle)
                .with(Matcher::new("M5", r"\bM5\b", &[])?),
            Variant::new("Metric", CommandKind::UnitsMetric, &units)
                .with(Matcher::new("G21", r"\bG21\b", &[])?),
            Variant::new("Imperial", CommandKind::UnitsImperial, &units)
                .with(Matcher::new("G20", r"\bG20\b", &[])?),
            Variant::new("Absolute", CommandKind::MoveModeAbsolute, &move_mode)
                .with(Matcher::new("G90", r"\bG90\b", &[])?),
            Variant::new("Relative", CommandKind::MoveModeRelative, &move_mode)
                .with(Matcher::new("G91", r"\bG91\b", &[])?),
            Variant::new("LinearMove", CommandKind::LinearMove, &moving)
                .with(Matcher::new("linear", r"\bG[01]\b", &[])?),
            Variant::new("ArcMove", CommandKind::ArcMove, &moving)
                .with(Matcher::new("arc", r"\bG[23]\b", &[])?)
                .with(Matcher::new("radius", r"\bR(?P<R>[\d.-]+)", &[("R", Policy::Literal)])?),
        ]))
    }
}
