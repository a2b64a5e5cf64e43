// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordering by straight-line distance from a reference point.

use elemid_core::BoundingBox;
use nalgebra::{distance, Point2};
use std::cmp::Ordering;

/// Orders boxes by the plan distance of their minimum corner from `reference`.
///
/// Returns indices into `boxes`. Equal distances keep input order.
pub fn order_by_distance(boxes: &[BoundingBox], reference: Point2<f64>) -> Vec<usize> {
    let distances: Vec<f64> = boxes
        .iter()
        .map(|b| distance(&b.min_corner(), &reference))
        .collect();
    let mut order: Vec<usize> = (0..boxes.len()).collect();
    order.sort_by(|&a, &b| {
        distances[a]
            .partial_cmp(&distances[b])
            .unwrap_or(Ordering::Equal)
    });
    order
}
