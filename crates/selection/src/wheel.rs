//! Wheel geometry: sectors, rotation targets and SVG paths.
//!
//! Angles are in degrees, clockwise, with 0° at the top where the pointer
//! sits.

use std::f64::consts::PI;
use fate_core::{Participant, ParticipantId};
use serde::Serialize;
use crate::roulette::validate_weights;
use crate::Result;

/// One participant's slice of the wheel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sector {
    /// Owner of the slice
    pub participant: ParticipantId,
    /// Selection weight
    pub weight: f64,
    /// Start angle, inclusive
    pub start_angle: f64,
    /// End angle, exclusive
    pub end_angle: f64,
}

impl Sector {
    /// Angle halfway through the sector.
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// Angular size of the sector.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Share of the wheel, which is also the chance of being picked.
    pub fn probability(&self) -> f64 {
        self.sweep() / 360.0
    }
}

/// Split 360° among participants in proportion to their weights.
pub fn layout_sectors(participants: &[Participant], weights: &[f64]) -> Result<Vec<Sector>> {
    let total = validate_weights(participants.len(), weights)?;
    let mut current = 0.0;
    Ok(participants
        .iter()
        .zip(weights)
        .map(|(participant, &weight)| {
            let slice = weight / total * 360.0;
            let sector = Sector {
                participant: participant.id.clone(),
                weight,
                start_angle: current,
                end_angle: current + slice,
            };
            current += slice;
            sector
        })
        .collect())
}

/// Total rotation that lands `mid_angle` under the pointer after `full_spins` turns.
pub fn rotation_for(mid_angle: f64, full_spins: u32) -> f64 {
    full_spins as f64 * 360.0 + (360.0 - mid_angle)
}

/// A point in SVG user space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate, growing downwards
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Point at `radius` from `center` in the direction of `angle` degrees.
pub fn polar_to_cartesian(center: Point, radius: f64, angle: f64) -> Point {
    let radians = (angle - 90.0) * PI / 180.0;
    Point {
        x: center.x + radius * radians.cos(),
        y: center.y + radius * radians.sin(),
    }
}

/// Where to draw the participant's name inside a sector.
pub fn label_anchor(center: Point, radius: f64, sector: &Sector) -> Point {
    polar_to_cartesian(center, radius / 1.5, sector.mid_angle())
}

/// SVG path data for a filled pie slice.
///
/// A sector covering the whole wheel is drawn as two half arcs, since a
/// single arc whose endpoints coincide renders nothing.
pub fn arc_path(center: Point, radius: f64, sector: &Sector) -> String {
    if sector.sweep() >= 360.0 {
        let top = polar_to_cartesian(center, radius, 0.0);
        let bottom = polar_to_cartesian(center, radius, 180.0);
        return format!(
            "M {} {} A {r} {r} 0 1 0 {} {} A {r} {r} 0 1 0 {} {} Z",
            fmt(top.x), fmt(top.y), fmt(bottom.x), fmt(bottom.y), fmt(top.x), fmt(top.y),
            r = fmt(radius),
        );
    }

    let start = polar_to_cartesian(center, radius, sector.end_angle);
    let end = polar_to_cartesian(center, radius, sector.start_angle);
    let large_arc = if sector.sweep() <= 180.0 { 0 } else { 1 };

    format!(
        "M {} {} L {} {} A {r} {r} 0 {} 0 {} {} Z",
        fmt(center.x), fmt(center.y),
        fmt(start.x), fmt(start.y),
        large_arc,
        fmt(end.x), fmt(end.y),
        r = fmt(radius),
    )
}

// Three decimals, trailing zeros dropped, no negative zero.
fn fmt(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}", rounded)
}
