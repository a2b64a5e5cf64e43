// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Label assignment.
//!
//! Story/building groups get `<prefix><story><sequence:02>` labels with the
//! sequence starting at 1 for every group. Interior doors grouped by zone get
//! `<zone><letter>` labels instead.

use elemid_core::{BoundingBox, ElementId, Result, Side};
use nalgebra::Point2;

use crate::distance::order_by_distance;
use crate::perimeter::{walk, WalkElement};

/// Formats a `<prefix><story><sequence:02>` label.
pub fn format_label(prefix: &str, story: usize, sequence: usize) -> String {
    format!("{prefix}{story}{sequence:02}")
}

/// Letter suffix for the `index`-th door of a zone: `a..z`, then `aa, ab, ...`.
pub fn zone_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Labels an ordered list, numbering from 1.
fn label_in_order(
    order: impl IntoIterator<Item = usize>,
    elements: &[ElementId],
    story: usize,
    prefix: &str,
) -> Vec<(ElementId, String)> {
    order
        .into_iter()
        .enumerate()
        .map(|(seq, i)| (elements[i].clone(), format_label(prefix, story, seq + 1)))
        .collect()
}

/// Labels one story/building group in clockwise perimeter order from `entry`.
///
/// `elements`, `sides` and `boxes` are positionally aligned.
pub fn compute_labels(
    entry: &ElementId,
    elements: &[ElementId],
    sides: &[Option<Side>],
    boxes: &[BoundingBox],
    story: usize,
    prefix: &str,
) -> Result<Vec<(ElementId, String)>> {
    let walk_elements: Vec<WalkElement> = elements
        .iter()
        .zip(sides)
        .zip(boxes)
        .map(|((id, side), bounds)| WalkElement::new(id.clone(), *bounds, *side))
        .collect();
    let order = walk(&walk_elements, entry)?;
    Ok(label_in_order(order, elements, story, prefix))
}

/// Labels one group by distance of each element's minimum corner from `reference`.
pub fn compute_labels_by_distance(
    elements: &[ElementId],
    boxes: &[BoundingBox],
    reference: Point2<f64>,
    story: usize,
    prefix: &str,
) -> Vec<(ElementId, String)> {
    label_in_order(order_by_distance(boxes, reference), elements, story, prefix)
}

/// Labels doors by zone: doors are ordered by the integer value of their zone
/// number (stable, so doors of one zone keep their input order) and get
/// `<zone><letter>` labels, letters restarting at `a` for every zone.
///
/// Zone numbers that are not integers sort after all numeric ones. Zone
/// numbers with equal integer values (`101`, `0101`) are ordered by their
/// text, so every distinct zone number forms one run of letters.
pub fn compute_zone_labels(doors: &[(ElementId, String)]) -> Vec<(ElementId, String)> {
    let zone_key = |zone: &str| match zone.trim().parse::<i64>() {
        Ok(n) => (0, n),
        Err(_) => (1, 0),
    };
    let mut sorted: Vec<&(ElementId, String)> = doors.iter().collect();
    sorted.sort_by(|(_, a), (_, b)| {
        zone_key(a.as_str())
            .cmp(&zone_key(b.as_str()))
            .then_with(|| a.as_str().cmp(b.as_str()))
    });

    let mut labels = Vec::with_capacity(sorted.len());
    let mut previous: Option<&str> = None;
    let mut index = 0;
    for (id, zone) in sorted {
        if previous != Some(zone.as_str()) {
            index = 0;
            previous = Some(zone.as_str());
        }
        labels.push((id.clone(), format!("{zone}{}", zone_letter(index))));
        index += 1;
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ElementId {
        ElementId::from(s)
    }

    #[test]
    fn label_format() {
        assert_eq!(format_label("", 0, 1), "001");
        assert_eq!(format_label("", 2, 14), "214");
        assert_eq!(format_label("D", 1, 3), "D103");
        assert_eq!(format_label("", 1, 120), "1120");
    }

    #[test]
    fn letters() {
        assert_eq!(zone_letter(0), "a");
        assert_eq!(zone_letter(2), "c");
        assert_eq!(zone_letter(25), "z");
        assert_eq!(zone_letter(26), "aa");
        assert_eq!(zone_letter(27), "ab");
        assert_eq!(zone_letter(52), "ba");
    }

    #[test]
    fn perimeter_labels_start_at_entry() {
        let elements = vec![id("s"), id("e"), id("w"), id("n")];
        let sides = vec![Some(Side::Right), Some(Side::Bottom), Some(Side::Left), Some(Side::Top)];
        let boxes = vec![
            BoundingBox::new_2d(10.0, 10.5, 4.0, 5.0),
            BoundingBox::new_2d(4.0, 5.0, 0.0, 0.5),
            BoundingBox::new_2d(0.0, 0.5, 4.0, 5.0),
            BoundingBox::new_2d(4.0, 5.0, 10.0, 10.5),
        ];
        let labels = compute_labels(&id("e"), &elements, &sides, &boxes, 1, "").unwrap();
        assert_eq!(labels[0], (id("e"), "101".to_string()));
        assert_eq!(labels.len(), 4);
    }

    #[test]
    fn distance_labels() {
        let elements = vec![id("far"), id("near"), id("mid")];
        let boxes = vec![
            BoundingBox::new_2d(3.0, 4.0, 4.0, 5.0),
            BoundingBox::new_2d(0.0, 1.0, 1.0, 2.0),
            BoundingBox::new_2d(3.0, 4.0, 0.0, 1.0),
        ];
        let labels = compute_labels_by_distance(&elements, &boxes, Point2::origin(), 0, "");
        assert_eq!(
            labels,
            vec![
                (id("near"), "001".to_string()),
                (id("mid"), "002".to_string()),
                (id("far"), "003".to_string()),
            ]
        );
    }

    #[test]
    fn zone_letters_restart_per_zone() {
        let doors = vec![
            (id("d1"), "102".to_string()),
            (id("d2"), "101".to_string()),
            (id("d3"), "102".to_string()),
            (id("d4"), "000".to_string()),
            (id("d5"), "101".to_string()),
        ];
        let labels = compute_zone_labels(&doors);
        assert_eq!(
            labels,
            vec![
                (id("d4"), "000a".to_string()),
                (id("d2"), "101a".to_string()),
                (id("d5"), "101b".to_string()),
                (id("d1"), "102a".to_string()),
                (id("d3"), "102b".to_string()),
            ]
        );
    }

    #[test]
    fn zone_labels_are_unique_for_mixed_zone_numbers() {
        let doors = vec![
            (id("d1"), "A".to_string()),
            (id("d2"), "B".to_string()),
            (id("d3"), "A".to_string()),
            (id("d4"), "101".to_string()),
            (id("d5"), "0101".to_string()),
            (id("d6"), "101".to_string()),
        ];
        let labels = compute_zone_labels(&doors);
        assert_eq!(
            labels,
            vec![
                (id("d5"), "0101a".to_string()),
                (id("d4"), "101a".to_string()),
                (id("d6"), "101b".to_string()),
                (id("d1"), "Aa".to_string()),
                (id("d3"), "Ab".to_string()),
                (id("d2"), "Ba".to_string()),
            ]
        );

        let mut values: Vec<&str> = labels.iter().map(|(_, l)| l.as_str()).collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), doors.len());
    }
}
