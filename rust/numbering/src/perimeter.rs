// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clockwise perimeter walk over exterior elements.
//!
//! Starting at a flagged entry element, the walk repeatedly picks the next
//! closest unvisited element, preferring to continue along the current side
//! and turning the corner clockwise (Top → Right → Bottom → Left) once a side
//! is exhausted. Elements are split into a bottom and a top row by height;
//! the bottom row is walked first, then the top row starting again from the
//! entry.
//!
//! ## Same-side continuation
//!
//! While elements remain ahead on the current side, the nearest one in walk
//! direction is the candidate. Two situations refine the choice:
//!
//! - **Column ties**: other elements share the current primary coordinate
//!   (e.g. stacked windows). They are taken in secondary order.
//! - **Divots**: the candidate is set in or out from the current element. The
//!   walk enters the candidate's column from the current element's side so
//!   indentations are numbered in and back out.
//!
//! A refined choice can still be replaced by a strictly closer element of the
//! same side, provided that element does not lie behind the element placed
//! two steps ago.

use elemid_core::{BoundingBox, ElementId, Error, PropertyKey, Result, Side};
use nalgebra::distance;
use std::cmp::Ordering;

use crate::strategy::SideStrategy;

/// An element taking part in a perimeter walk.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkElement {
    pub id: ElementId,
    pub bounds: BoundingBox,
    /// Perimeter side. Only the entry of a single-element walk may omit it.
    pub side: Option<Side>,
}

impl WalkElement {
    pub fn new(id: impl Into<ElementId>, bounds: BoundingBox, side: Option<Side>) -> Self {
        Self {
            id: id.into(),
            bounds,
            side,
        }
    }
}

/// Orders `elements` clockwise around the perimeter, starting at `entry`.
///
/// Returns indices into `elements`; every element appears exactly once and
/// the entry comes first.
///
/// # Errors
///
/// - [`Error::UnknownElement`] if `entry` is not among `elements`.
/// - [`Error::MissingProperty`] if there is more than one element and any of
///   them has no side.
/// - [`Error::UnreachableCandidate`] if the walk cannot continue.
pub fn walk(elements: &[WalkElement], entry: &ElementId) -> Result<Vec<usize>> {
    let entry = elements
        .iter()
        .position(|e| &e.id == entry)
        .ok_or_else(|| Error::UnknownElement(entry.clone()))?;

    if elements.len() == 1 {
        return Ok(vec![entry]);
    }

    let sides = elements
        .iter()
        .map(|e| {
            e.side.ok_or_else(|| Error::MissingProperty {
                element: e.id.clone(),
                property: PropertyKey::ExteriorSide,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let (bottom_row, top_row) = split_rows(elements);

    let mut walker = PerimeterWalker {
        elements,
        sides,
        visited: vec![false; elements.len()],
        placed: Vec::with_capacity(elements.len()),
    };

    walker.place(entry);
    walker.walk_row(entry, &bottom_row)?;

    if walker.has_unvisited(&top_row) {
        // The top row is entered from the entry, not from where the bottom row ended.
        let first = walker.next_closest(entry, &top_row)?;
        walker.place(first);
        walker.walk_row(first, &top_row)?;
    }

    tracing::trace!(
        elements = elements.len(),
        bottom_row = bottom_row.len(),
        top_row = top_row.len(),
        "Perimeter walk complete"
    );

    Ok(walker.placed)
}

/// Splits element indices into (bottom row, top row) at the height midpoint.
///
/// The lower bound is the base of the element that ends lowest, the upper
/// bound the top of the element that ends highest.
pub fn split_rows(elements: &[WalkElement]) -> (Vec<usize>, Vec<usize>) {
    let low = elements
        .iter()
        .min_by(|a, b| compare(a.bounds.z_max, b.bounds.z_max))
        .map(|e| e.bounds.z_min)
        .unwrap_or(0.0);
    let high = elements
        .iter()
        .map(|e| e.bounds.z_max)
        .fold(f64::NEG_INFINITY, f64::max);
    let midpoint = (low + high) / 2.0;

    (0..elements.len()).partition(|&i| elements[i].bounds.z_min <= midpoint)
}

#[inline]
fn compare(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

struct PerimeterWalker<'a> {
    elements: &'a [WalkElement],
    sides: Vec<Side>,
    visited: Vec<bool>,
    placed: Vec<usize>,
}

impl PerimeterWalker<'_> {
    #[inline]
    fn bounds(&self, index: usize) -> &BoundingBox {
        &self.elements[index].bounds
    }

    fn place(&mut self, index: usize) {
        self.visited[index] = true;
        self.placed.push(index);
    }

    fn has_unvisited(&self, row: &[usize]) -> bool {
        row.iter().any(|&i| !self.visited[i])
    }

    fn walk_row(&mut self, start: usize, row: &[usize]) -> Result<()> {
        let mut current = start;
        while self.has_unvisited(row) {
            let next = self.next_closest(current, row)?;
            self.place(next);
            current = next;
        }
        Ok(())
    }

    /// Stable sort of element indices by a coordinate key.
    fn sort_by_key(&self, indices: &mut [usize], key: impl Fn(&BoundingBox) -> f64) {
        indices.sort_by(|&a, &b| compare(key(self.bounds(a)), key(self.bounds(b))));
    }

    /// Picks the element to place after `point` from the unvisited part of `row`.
    fn next_closest(&self, point: usize, row: &[usize]) -> Result<usize> {
        let side = self.sides[point];
        let strategy = SideStrategy::of(side);

        let mut buckets: [Vec<usize>; 4] = Default::default();
        for &i in row {
            if i == point {
                continue;
            }
            let own = self.sides[i];
            // Placed elements of the current side never count as candidates.
            if own == side && self.visited[i] {
                continue;
            }
            buckets[own.index()].push(i);
        }

        let same = &buckets[side.index()];
        let from = self.bounds(point);

        let mut ahead: Vec<usize> = same
            .iter()
            .copied()
            .filter(|&i| strategy.is_ahead(from, self.bounds(i)))
            .collect();

        if ahead.is_empty() {
            return self.turn_corner(point, &strategy, &buckets);
        }

        self.sort_by_key(&mut ahead, |b| strategy.walk_key(b));
        let candidate = ahead[0];

        let Some(pick) = self.column_pick(&strategy, from, candidate, &ahead) else {
            return Ok(candidate);
        };

        Ok(self
            .closer_unpassed(point, pick, same, &strategy)
            .unwrap_or(pick))
    }

    /// Resolves column ties and divots.
    ///
    /// Returns `None` when `candidate` continues the side in a straight line.
    fn column_pick(
        &self,
        strategy: &SideStrategy,
        from: &BoundingBox,
        candidate: usize,
        ahead: &[usize],
    ) -> Option<usize> {
        let cand = self.bounds(candidate);
        let from_primary = strategy.primary_of(from);
        let cand_primary = strategy.primary_of(cand);

        let (column, order) = if cand_primary == from_primary {
            (from_primary, strategy.tie)
        } else {
            match compare(strategy.secondary_of(from), strategy.secondary_of(cand)) {
                // divot set below the current element: enter from the high end
                Ordering::Greater => (cand_primary, -1.0),
                // divot set above: enter from the low end
                Ordering::Less => (cand_primary, 1.0),
                Ordering::Equal => return None,
            }
        };

        let mut members: Vec<usize> = ahead
            .iter()
            .copied()
            .filter(|&i| strategy.primary_of(self.bounds(i)) == column)
            .collect();
        self.sort_by_key(&mut members, |b| order * strategy.secondary_of(b));
        members.first().copied()
    }

    /// A same-side element strictly closer to `point` than `pick` that does
    /// not lie behind the element placed two steps ago, innermost first.
    fn closer_unpassed(
        &self,
        point: usize,
        pick: usize,
        same: &[usize],
        strategy: &SideStrategy,
    ) -> Option<usize> {
        let mut inward = same.to_vec();
        self.sort_by_key(&mut inward, |b| strategy.inward * strategy.secondary_of(b));

        let origin = self.bounds(point).center();
        let reach = distance(&origin, &self.bounds(pick).center());
        let passed = self.bounds(self.placed[self.placed.len().saturating_sub(2)]);

        inward.into_iter().find(|&i| {
            let b = self.bounds(i);
            distance(&origin, &b.center()) < reach && strategy.is_ahead(passed, b)
        })
    }

    /// Leaves the current side: the first unvisited element of the next side
    /// clockwise that has one, in that side's walk order. When every other
    /// side is done, the current side restarts from its beginning.
    fn turn_corner(
        &self,
        point: usize,
        strategy: &SideStrategy,
        buckets: &[Vec<usize>; 4],
    ) -> Result<usize> {
        for side in strategy.fallback {
            let next = SideStrategy::of(side);
            let mut open: Vec<usize> = buckets[side.index()]
                .iter()
                .copied()
                .filter(|&i| !self.visited[i])
                .collect();
            self.sort_by_key(&mut open, |b| next.walk_key(b));
            if let Some(&first) = open.first() {
                return Ok(first);
            }
        }

        let mut rest = buckets[strategy.side.index()].clone();
        self.sort_by_key(&mut rest, |b| strategy.walk_key(b));
        rest.first().copied().ok_or_else(|| Error::UnreachableCandidate {
            element: self.elements[point].id.clone(),
            side: strategy.side,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Door or window on a plan wall: 1.0 wide along its side, 0.2 deep.
    fn opening(id: &str, x: f64, y: f64, side: Side) -> WalkElement {
        let bounds = match side {
            Side::Top | Side::Bottom => BoundingBox::new_3d(x, x + 1.0, y, y + 0.2, 0.0, 2.1),
            Side::Left | Side::Right => BoundingBox::new_3d(x, x + 0.2, y, y + 1.0, 0.0, 2.1),
        };
        WalkElement::new(id, bounds, Some(side))
    }

    fn ids(elements: &[WalkElement], order: &[usize]) -> Vec<String> {
        order.iter().map(|&i| elements[i].id.to_string()).collect()
    }

    fn walk_ids(elements: &[WalkElement], entry: &str) -> Vec<String> {
        let order = walk(elements, &ElementId::from(entry)).unwrap();
        ids(elements, &order)
    }

    #[test]
    fn single_element_needs_no_side() {
        let elements = vec![WalkElement::new(
            "only",
            BoundingBox::new_2d(0.0, 1.0, 0.0, 1.0),
            None,
        )];
        assert_eq!(walk_ids(&elements, "only"), vec!["only"]);
    }

    #[test]
    fn one_per_side_goes_clockwise_from_bottom() {
        let elements = vec![
            opening("top", 5.0, 10.0, Side::Top),
            opening("right", 10.0, 5.0, Side::Right),
            opening("bottom", 5.0, 0.0, Side::Bottom),
            opening("left", 0.0, 5.0, Side::Left),
        ];
        assert_eq!(
            walk_ids(&elements, "bottom"),
            vec!["bottom", "left", "top", "right"]
        );
        assert_eq!(
            walk_ids(&elements, "top"),
            vec!["top", "right", "bottom", "left"]
        );
    }

    #[test]
    fn continues_along_side_before_turning() {
        let elements = vec![
            opening("t2", 4.0, 10.0, Side::Top),
            opening("t3", 8.0, 10.0, Side::Top),
            opening("t1", 0.0, 10.0, Side::Top),
            opening("r1", 10.0, 7.0, Side::Right),
            opening("r2", 10.0, 2.0, Side::Right),
        ];
        assert_eq!(
            walk_ids(&elements, "t1"),
            vec!["t1", "t2", "t3", "r1", "r2"]
        );
    }

    #[test]
    fn entry_between_two_same_side_elements() {
        let elements = vec![
            opening("behind", 2.0, 10.0, Side::Top),
            opening("entry", 5.0, 10.0, Side::Top),
            opening("ahead", 9.0, 10.0, Side::Top),
        ];
        assert_eq!(
            walk_ids(&elements, "entry"),
            vec!["entry", "ahead", "behind"]
        );
    }

    #[test]
    fn bottom_side_walks_right_to_left() {
        let elements = vec![
            opening("b1", 8.0, 0.0, Side::Bottom),
            opening("b2", 5.0, 0.0, Side::Bottom),
            opening("b3", 1.0, 0.0, Side::Bottom),
        ];
        assert_eq!(walk_ids(&elements, "b1"), vec!["b1", "b2", "b3"]);
    }

    #[test]
    fn divot_is_numbered_in_and_out() {
        let elements = vec![
            opening("e", 0.0, 10.0, Side::Top),
            opening("a", 4.0, 10.0, Side::Top),
            opening("dip", 6.0, 8.0, Side::Top),
            opening("lip", 6.0, 10.0, Side::Top),
            opening("g", 9.0, 10.0, Side::Top),
        ];
        assert_eq!(
            walk_ids(&elements, "e"),
            vec!["e", "a", "lip", "dip", "g"]
        );
    }

    #[test]
    fn closer_inward_element_beats_column_tie() {
        let elements = vec![
            opening("e", 5.0, 10.0, Side::Top),
            opening("stacked", 5.0, 14.0, Side::Top),
            opening("near", 6.0, 9.5, Side::Top),
        ];
        assert_eq!(
            walk_ids(&elements, "e"),
            vec!["e", "near", "stacked"]
        );
    }

    #[test]
    fn closer_element_behind_is_not_taken() {
        let elements = vec![
            opening("e", 5.0, 10.0, Side::Top),
            opening("stacked", 5.0, 14.0, Side::Top),
            opening("behind", 4.0, 9.5, Side::Top),
        ];
        assert_eq!(
            walk_ids(&elements, "e"),
            vec!["e", "stacked", "behind"]
        );
    }

    #[test]
    fn top_row_restarts_from_entry() {
        let window = |id: &str, x: f64, y: f64, side: Side| {
            let mut w = opening(id, x, y, side);
            w.bounds.z_min = 4.0;
            w.bounds.z_max = 5.0;
            w
        };
        let elements = vec![
            opening("entry", 5.0, 0.0, Side::Bottom),
            opening("left", 0.0, 5.0, Side::Left),
            window("w-bottom", 8.0, 0.0, Side::Bottom),
            window("w-top", 5.0, 10.0, Side::Top),
        ];

        let (bottom, top) = split_rows(&elements);
        assert_eq!(bottom, vec![0, 1]);
        assert_eq!(top, vec![2, 3]);

        assert_eq!(
            walk_ids(&elements, "entry"),
            vec!["entry", "left", "w-top", "w-bottom"]
        );
    }

    #[test]
    fn entry_in_top_row_still_covers_everything() {
        let mut elements = vec![
            opening("low-a", 2.0, 0.0, Side::Bottom),
            opening("low-b", 0.0, 5.0, Side::Left),
            opening("high", 5.0, 10.0, Side::Top),
        ];
        elements[2].bounds.z_min = 4.0;
        elements[2].bounds.z_max = 5.0;

        let order = walk(&elements, &ElementId::from("high")).unwrap();
        assert_eq!(order[0], 2);
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2]);
    }

    #[test]
    fn missing_side_is_reported() {
        let elements = vec![
            opening("a", 0.0, 0.0, Side::Bottom),
            WalkElement::new("b", BoundingBox::new_2d(3.0, 4.0, 0.0, 0.2), None),
        ];
        let err = walk(&elements, &ElementId::from("a")).unwrap_err();
        match err {
            Error::MissingProperty { element, property } => {
                assert_eq!(element, ElementId::from("b"));
                assert_eq!(property, PropertyKey::ExteriorSide);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_entry_is_reported() {
        let elements = vec![opening("a", 0.0, 0.0, Side::Bottom)];
        assert!(matches!(
            walk(&elements, &ElementId::from("zz")),
            Err(Error::UnknownElement(_))
        ));
    }

    #[test]
    fn exhausted_row_is_unreachable() {
        let elements = vec![
            opening("a", 0.0, 0.0, Side::Bottom),
            opening("b", 3.0, 0.0, Side::Bottom),
        ];
        let walker = PerimeterWalker {
            elements: &elements,
            sides: vec![Side::Bottom, Side::Bottom],
            visited: vec![true, true],
            placed: vec![0, 1],
        };
        assert!(matches!(
            walker.next_closest(1, &[0, 1]),
            Err(Error::UnreachableCandidate { side: Side::Bottom, .. })
        ));
    }

    /// Deterministic pseudo-random perimeter layout.
    fn scattered(count: usize, seed: u64) -> Vec<WalkElement> {
        let mut state = seed;
        let mut next = move || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) as f64 / (1u64 << 31) as f64
        };
        (0..count)
            .map(|i| {
                let side = Side::CLOCKWISE[(next() * 4.0) as usize % 4];
                let along = (next() * 20.0).floor();
                let inset = (next() * 3.0).floor();
                let (x, y) = match side {
                    Side::Top => (along, 20.0 - inset),
                    Side::Bottom => (along, inset),
                    Side::Left => (inset, along),
                    Side::Right => (20.0 - inset, along),
                };
                let mut e = opening(&format!("e{i}"), x, y, side);
                if next() > 0.7 {
                    e.bounds.z_min = 3.0;
                    e.bounds.z_max = 4.5;
                }
                e
            })
            .collect()
    }

    #[test]
    fn walk_is_a_permutation_starting_at_entry() {
        for seed in 1..40 {
            let elements = scattered(25, seed);
            let entry = elements
                .iter()
                .find(|e| e.bounds.z_min == 0.0)
                .map(|e| e.id.clone())
                .unwrap();
            let order = walk(&elements, &entry).unwrap();

            assert_eq!(elements[order[0]].id, entry);
            let mut sorted = order.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted, (0..elements.len()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn walk_is_deterministic() {
        let elements = scattered(30, 7);
        let entry = elements[0].id.clone();
        let first = walk(&elements, &entry).unwrap();
        for _ in 0..5 {
            assert_eq!(walk(&elements, &entry).unwrap(), first);
        }
    }
}
