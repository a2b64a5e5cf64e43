// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Elements of a floor plan as the numbering sees them.
//!
//! An element is reduced to an opaque identifier and an axis-aligned bounding
//! box. Plan coordinates are Y-up: the `Top` side of a building has the
//! largest Y values and the `Right` side the largest X values.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Opaque element identifier (the host application's GUID).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Axis-aligned bounding box of an element.
///
/// 2D boxes leave the Z extent at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    #[serde(default)]
    pub z_min: f64,
    #[serde(default)]
    pub z_max: f64,
}

impl BoundingBox {
    /// Creates a plan (2D) bounding box.
    pub fn new_2d(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            z_min: 0.0,
            z_max: 0.0,
        }
    }

    /// Creates a 3D bounding box.
    pub fn new_3d(x_min: f64, x_max: f64, y_min: f64, y_max: f64, z_min: f64, z_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
            z_min,
            z_max,
        }
    }

    /// Plan position of the minimum corner.
    #[inline]
    pub fn min_corner(&self) -> Point2<f64> {
        Point2::new(self.x_min, self.y_min)
    }

    /// Plan position of the box center.
    #[inline]
    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Extent along X.
    #[inline]
    pub fn width(&self) -> f64 {
        (self.x_max - self.x_min).abs()
    }

    /// Extent along Y.
    #[inline]
    pub fn depth(&self) -> f64 {
        (self.y_max - self.y_min).abs()
    }
}

/// Perimeter edge of the building an exterior element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// All sides in clockwise order, starting at `Top`.
    pub const CLOCKWISE: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Position of this side in [`Side::CLOCKWISE`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Top => 0,
            Side::Right => 1,
            Side::Bottom => 2,
            Side::Left => 3,
        }
    }

    /// The side reached next when walking the perimeter clockwise.
    #[inline]
    pub fn clockwise(self) -> Side {
        Side::CLOCKWISE[(self.index() + 1) % 4]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Top => "Top",
            Side::Right => "Right",
            Side::Bottom => "Bottom",
            Side::Left => "Left",
        }
    }

    /// Parses the display value of an exterior side property.
    pub fn parse(value: &str) -> Option<Side> {
        match value.trim() {
            "Top" => Some(Side::Top),
            "Right" => Some(Side::Right),
            "Bottom" => Some(Side::Bottom),
            "Left" => Some(Side::Left),
            _ => None,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an element sits on the building envelope or inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionClass {
    Interior,
    Exterior,
}

impl PositionClass {
    pub fn parse(value: &str) -> Option<PositionClass> {
        match value.trim() {
            "Interior" => Some(PositionClass::Interior),
            "Exterior" => Some(PositionClass::Exterior),
            _ => None,
        }
    }
}
