// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-side parameters of the clockwise perimeter walk.
//!
//! The four sides run the same search rotated by a quarter turn. A
//! [`SideStrategy`] captures everything that differs between them: which
//! coordinate the walk advances along, in which direction, how ties and
//! inward elements are ordered, and which sides to try once the current side
//! is exhausted.

use elemid_core::{BoundingBox, Side};

/// Plan axis a coordinate is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Minimum coordinate of a box along this axis.
    #[inline]
    pub fn min_of(self, bounds: &BoundingBox) -> f64 {
        match self {
            Axis::X => bounds.x_min,
            Axis::Y => bounds.y_min,
        }
    }

    #[inline]
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Walk parameters for one side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideStrategy {
    pub side: Side,
    /// Axis the walk advances along.
    pub primary: Axis,
    /// `1.0` when the walk advances toward larger primary coordinates.
    pub walk: f64,
    /// Secondary order of elements sharing the current primary coordinate.
    pub tie: f64,
    /// Secondary order that lists the side's innermost elements first.
    pub inward: f64,
    /// Sides tried in turn once nothing is left ahead on this side.
    pub fallback: [Side; 3],
}

impl SideStrategy {
    pub fn of(side: Side) -> Self {
        let next = side.clockwise();
        let fallback = [next, next.clockwise(), next.clockwise().clockwise()];
        let (primary, walk, tie, inward) = match side {
            // left to right along the top edge
            Side::Top => (Axis::X, 1.0, 1.0, 1.0),
            // top to bottom along the right edge
            Side::Right => (Axis::Y, -1.0, -1.0, 1.0),
            // right to left along the bottom edge
            Side::Bottom => (Axis::X, -1.0, 1.0, -1.0),
            // bottom to top along the left edge
            Side::Left => (Axis::Y, 1.0, 1.0, -1.0),
        };
        Self {
            side,
            primary,
            walk,
            tie,
            inward,
            fallback,
        }
    }

    #[inline]
    pub fn secondary(&self) -> Axis {
        self.primary.other()
    }

    #[inline]
    pub fn primary_of(&self, bounds: &BoundingBox) -> f64 {
        self.primary.min_of(bounds)
    }

    #[inline]
    pub fn secondary_of(&self, bounds: &BoundingBox) -> f64 {
        self.secondary().min_of(bounds)
    }

    /// Sort key placing elements in walk order along this side.
    #[inline]
    pub fn walk_key(&self, bounds: &BoundingBox) -> f64 {
        self.walk * self.primary_of(bounds)
    }

    /// Whether `candidate` lies at or beyond `from` in walk direction.
    #[inline]
    pub fn is_ahead(&self, from: &BoundingBox, candidate: &BoundingBox) -> bool {
        self.walk_key(candidate) >= self.walk_key(from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_follows_clockwise_order() {
        assert_eq!(
            SideStrategy::of(Side::Top).fallback,
            [Side::Right, Side::Bottom, Side::Left]
        );
        assert_eq!(
            SideStrategy::of(Side::Bottom).fallback,
            [Side::Left, Side::Top, Side::Right]
        );
        assert_eq!(
            SideStrategy::of(Side::Left).fallback,
            [Side::Top, Side::Right, Side::Bottom]
        );
        assert_eq!(
            SideStrategy::of(Side::Right).fallback,
            [Side::Bottom, Side::Left, Side::Top]
        );
    }

    #[test]
    fn ahead_depends_on_walk_direction() {
        let a = BoundingBox::new_2d(0.0, 1.0, 5.0, 6.0);
        let b = BoundingBox::new_2d(3.0, 4.0, 2.0, 3.0);

        assert!(SideStrategy::of(Side::Top).is_ahead(&a, &b));
        assert!(!SideStrategy::of(Side::Bottom).is_ahead(&a, &b));
        assert!(!SideStrategy::of(Side::Left).is_ahead(&a, &b));
        assert!(SideStrategy::of(Side::Right).is_ahead(&a, &b));
        // an element is always ahead of itself
        assert!(SideStrategy::of(Side::Bottom).is_ahead(&a, &a));
    }

    #[test]
    fn secondary_axis_is_the_other_one() {
        let top = SideStrategy::of(Side::Top);
        assert_eq!(top.primary, Axis::X);
        assert_eq!(top.secondary(), Axis::Y);
        let right = SideStrategy::of(Side::Right);
        assert_eq!(right.primary, Axis::Y);
        assert_eq!(right.secondary(), Axis::X);
    }
}
