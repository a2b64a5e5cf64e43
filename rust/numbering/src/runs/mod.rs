// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Batch numbering runs against an [`ElementStore`].
//!
//! A run reads everything it needs, computes every value in memory and hands
//! the result to the store in one [`ElementStore::set_property_values`] call.
//! A fatal error returns before that call, so an aborted run writes nothing.

mod exterior;
mod interior;
mod zones;

pub use exterior::number_exterior;
pub use interior::{number_interior_by_distance, number_interior_by_zone};
pub use zones::{dimension_zones, number_zones};

use elemid_core::property::parse_position;
use elemid_core::{
    ElementFilter, ElementId, ElementStore, Error, PositionClass, PropertyKey, PropertyWrite,
    Result,
};
use rustc_hash::FxHashSet;

/// Outcome of one run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Written `(element, value)` pairs, sorted by value.
    pub labels: Vec<(ElementId, String)>,
    /// Elements left unchanged by a non-fatal error.
    pub skipped: Vec<(ElementId, Error)>,
}

impl RunReport {
    fn new(mut labels: Vec<(ElementId, String)>, skipped: Vec<(ElementId, Error)>) -> Self {
        labels.sort_by(|a, b| a.1.cmp(&b.1));
        Self { labels, skipped }
    }
}

/// Elements matching any of `filters`, narrowed to the selection when the
/// selection contains at least one of them.
fn candidates<S: ElementStore>(store: &S, filters: &[ElementFilter]) -> Vec<ElementId> {
    let mut seen = FxHashSet::default();
    let all: Vec<ElementId> = filters
        .iter()
        .flat_map(|filter| store.elements(filter))
        .filter(|id| seen.insert(id.clone()))
        .collect();

    let selected: FxHashSet<ElementId> = store
        .elements(&ElementFilter::Selected)
        .into_iter()
        .collect();
    let picked: Vec<ElementId> = all
        .iter()
        .filter(|id| selected.contains(*id))
        .cloned()
        .collect();

    if picked.is_empty() {
        all
    } else {
        tracing::debug!(selected = picked.len(), "Using selected elements only");
        picked
    }
}

/// Keeps the elements whose position class is `class`.
fn with_position<S: ElementStore>(
    store: &S,
    ids: Vec<ElementId>,
    class: PositionClass,
) -> Result<Vec<ElementId>> {
    let positions = store.property_values(&ids, PropertyKey::Position)?;
    Ok(ids
        .into_iter()
        .zip(positions)
        .filter(|(_, position)| parse_position(position.as_ref()) == Some(class))
        .map(|(id, _)| id)
        .collect())
}

/// Writes `labels` to `key` in one batch and builds the report.
fn commit<S: ElementStore>(
    store: &mut S,
    key: PropertyKey,
    labels: Vec<(ElementId, String)>,
    skipped: Vec<(ElementId, Error)>,
) -> Result<RunReport> {
    if labels.is_empty() {
        tracing::warn!(property = %key, "Nothing to write");
    } else {
        let writes = labels
            .iter()
            .map(|(id, value)| PropertyWrite::new(id.clone(), key, value.as_str()))
            .collect();
        store.set_property_values(writes)?;
        tracing::info!(property = %key, written = labels.len(), "Wrote property values");
    }
    Ok(RunReport::new(labels, skipped))
}
