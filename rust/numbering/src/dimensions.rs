// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! True dimensions of rotated rectangular zones.
//!
//! A rectangle rotated by `θ` inside its axis-aligned bounding box touches
//! every box edge once, splitting each edge into two legs. With `t = tan θ`
//! the legs along the box length satisfy `b = (W·t − L) / (t² − 1)` and
//! `a = b·t`, so the rectangle sides are `√(a² + b²)` and
//! `√((L − b)² + (W − a)²)`. The system is singular at 45°.

use elemid_core::{BoundingBox, Error, Result};

const INCHES_PER_METER: f64 = 39.3701;

/// Side lengths of a rotated zone, in model units (meters).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneDimensions {
    pub width: f64,
    pub length: f64,
}

/// Maps a zone angle onto the solvable range.
///
/// Angles in (45, 90] are measured from the other axis and are mirrored to
/// `90 - angle`.
///
/// # Errors
///
/// [`Error::InvalidAngle`] for exactly 45°, for angles above 90° and for
/// non-finite input.
pub fn normalize_angle(angle: f64) -> Result<f64> {
    if !angle.is_finite() || angle > 90.0 {
        return Err(Error::InvalidAngle(angle));
    }
    let angle = if angle > 45.0 { 90.0 - angle } else { angle };
    if angle == 45.0 {
        return Err(Error::InvalidAngle(angle));
    }
    Ok(angle)
}

/// Solves the rectangle sides for a `box_width` (X) by `box_length` (Y)
/// bounding box and a rotation in degrees.
pub fn rotated_dimensions(box_width: f64, box_length: f64, angle: f64) -> Result<ZoneDimensions> {
    let tangent = normalize_angle(angle)?.to_radians().tan();

    let b = (box_width * tangent - box_length) / (tangent * tangent - 1.0);
    let a = b * tangent;
    let a1 = box_length - b;
    let b1 = box_width - a;

    Ok(ZoneDimensions {
        width: a.hypot(b),
        length: a1.hypot(b1),
    })
}

/// Formats a length in meters as `F'-I"`, rounded to the whole inch.
pub fn feet_inches(meters: f64) -> String {
    let inches = (meters * INCHES_PER_METER).round() as i64;
    format!("{}'-{}\"", inches / 12, inches % 12)
}

/// Dimension string of a zone: `W'-I" x L'-I"`.
pub fn dimension_label(bounds: &BoundingBox, angle: f64) -> Result<String> {
    let dims = rotated_dimensions(bounds.width(), bounds.depth(), angle)?;
    Ok(format!(
        "{} x {}",
        feet_inches(dims.width),
        feet_inches(dims.length)
    ))
}
