// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::f64::consts::PI;
use itertools::Itertools;

use crate::ast::*;
use crate::error::{ErrKind, GeometryError};
use super::Rule;

/// Replaces arc moves by a chain of linear moves along the arc.
///
/// Arcs are always traversed clockwise along the shorter of the two
/// possible circles, whether they were written as G2 or G3.  The Z
/// coordinate stays at the arc's target Z for every segment.
#[derive(Debug, Clone, Copy)]
pub struct ArcRule {
    num_points: usize,
}

impl ArcRule {
    pub const DEFAULT_POINTS: usize = 100;

    /// Create a rule sampling `num_points` points per arc (including both
    /// endpoints), producing one segment less.  At least 2 points are used.
    pub fn new(num_points: usize) -> Self {
        ArcRule { num_points: num_points.max(2) }
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }
}

impl Default for ArcRule {
    fn default() -> Self {
        ArcRule::new(ArcRule::DEFAULT_POINTS)
    }
}

impl Rule for ArcRule {
    fn name(&self) -> &str {
        "arc"
    }

    fn matches(&self, command: &Command) -> bool {
        matches!(command.instr, Instr::ArcMove(..))
    }

    fn apply(&self, command: &Command) -> Result<Vec<Command>, ErrKind> {
        let (arc, radius) = match &command.instr {
            Instr::ArcMove(arc, radius) => (arc, *radius),
            _ => return Ok(vec![command.clone()]),
        };
        let z = arc.target.z;
        let points = interpolate_arc((arc.start.x, arc.start.y), (arc.target.x, arc.target.y),
                                     radius, self.num_points)?;
        Ok(points.iter().tuple_windows().map(|(&(x0, y0), &(x1, y1))| {
            Command::generated(Instr::LinearMove(Move {
                code: 1,
                target: Coords { x: x1, y: y1, z },
                feed: arc.feed,
                start: Coords { x: x0, y: y0, z },
            }))
        }).collect())
    }
}

/// Sample `num_points` points (at least 2) on the clockwise arc of the given
/// radius from `start` to `end`.
///
/// The first and last points are `start` and `end` themselves, not
/// recomputed from the circle.
pub fn interpolate_arc(start: (f64, f64), end: (f64, f64), radius: f64,
                       num_points: usize) -> Result<Vec<(f64, f64)>, GeometryError> {
    let (x, y) = start;
    let (xe, ye) = end;
    let (dx, dy) = (xe - x, ye - y);
    let chord = (dx * dx + dy * dy).sqrt();
    if chord > 2. * radius {
        return Err(GeometryError::TooFarApart { chord, radius });
    }
    if chord == 0. {
        return Err(GeometryError::CoincidentPoints);
    }

    let (mx, my) = ((x + xe) / 2., (y + ye) / 2.);
    // rounding can push this slightly below zero on a half circle
    let h = (radius * radius - (chord / 2.) * (chord / 2.)).max(0.).sqrt();

    // Of the two candidate centers, pick the one that makes the clockwise
    // way from start to end the short one.
    let c1 = (mx - h * dy / chord, my + h * dx / chord);
    let c2 = (mx + h * dy / chord, my - h * dx / chord);
    let (cx, cy) = if (x - c1.0) * (ye - c1.1) - (y - c1.1) * (xe - c1.0) < 0. { c1 } else { c2 };

    let start_angle = (y - cy).atan2(x - cx);
    let mut end_angle = (ye - cy).atan2(xe - cx);
    if end_angle > start_angle {
        end_angle -= 2. * PI;
    }

    let last = num_points.max(2) - 1;
    Ok((0..=last).map(|i| {
        if i == 0 {
            start
        } else if i == last {
            end
        } else {
            let angle = start_angle + (end_angle - start_angle) * i as f64 / last as f64;
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        }
    }).collect())
}
