// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use elemid_core::{ElementFilter, ElementId, ElementStore, Error, PropertyKey, Result};

use super::{candidates, commit, RunReport};
use crate::cluster::create_clusters;
use crate::config::NumberingConfig;
use crate::dimensions::dimension_label;
use crate::grouping::find_entry;
use crate::label::compute_labels_by_distance;

/// Numbers zones story by story, by distance from each story's `FirstZone`,
/// and writes the labels to `ZoneNumber`.
///
/// Stories are elevation clusters of the bases of *all* zones, so the story
/// digit stays stable when only some zones are selected. A story without any
/// zone to number is skipped but keeps its index.
pub fn number_zones<S: ElementStore>(store: &mut S, config: &NumberingConfig) -> Result<RunReport> {
    let filter = ElementFilter::Kind(config.zone_kind.clone());
    let all = store.elements(&filter);
    let clusters = create_clusters(
        store.bounding_boxes(&all)?.iter().map(|b| b.z_min),
        config.story_grouping_limit,
    );

    let ids = candidates(store, &[filter]);
    let boxes = store.bounding_boxes(&ids)?;
    tracing::info!(
        zones = ids.len(),
        stories = clusters.len(),
        "Numbering zones by distance"
    );

    let mut labels = Vec::with_capacity(ids.len());
    for (story, cluster) in clusters.iter().enumerate() {
        let on_story: Vec<usize> = (0..ids.len())
            .filter(|&i| cluster.contains(boxes[i].z_min))
            .collect();
        if on_story.is_empty() {
            tracing::debug!(story, "No zones to number on story");
            continue;
        }

        let members: Vec<ElementId> = on_story.iter().map(|&i| ids[i].clone()).collect();
        let member_boxes: Vec<_> = on_story.iter().map(|&i| boxes[i]).collect();
        let flags = store.property_values(&members, PropertyKey::FirstZone)?;
        let entry = find_entry(&members, &flags, story, 1)?
            .ok_or(Error::NoEntryFound { story, building: 1 })?;

        tracing::debug!(
            story,
            zones = members.len(),
            entry = %members[entry].as_str(),
            "Ordering zones by distance"
        );
        labels.extend(compute_labels_by_distance(
            &members,
            &member_boxes,
            member_boxes[entry].min_corner(),
            story,
            &config.label_prefix,
        ));
    }

    commit(store, PropertyKey::ZoneNumber, labels, Vec::new())
}

/// Writes the true `W'-I" x L'-I"` dimensions of every zone to
/// `ZoneDimension`, using its plan bounding box and `ZoneAngle`.
///
/// Zones whose angle cannot be solved are left unchanged and listed in the
/// report; a missing or non-numeric angle aborts the run.
pub fn dimension_zones<S: ElementStore>(
    store: &mut S,
    config: &NumberingConfig,
) -> Result<RunReport> {
    let ids = candidates(store, &[ElementFilter::Kind(config.zone_kind.clone())]);
    tracing::info!(zones = ids.len(), "Dimensioning zones");

    let angles = ids
        .iter()
        .zip(store.property_values(&ids, PropertyKey::ZoneAngle)?)
        .map(|(id, value)| {
            let value = value.ok_or_else(|| Error::MissingProperty {
                element: id.clone(),
                property: PropertyKey::ZoneAngle,
            })?;
            value.as_real().ok_or_else(|| Error::InvalidPropertyValue {
                element: id.clone(),
                property: PropertyKey::ZoneAngle,
                reason: format!("expected degrees, found {value:?}"),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let boxes = store.bounding_boxes(&ids)?;

    let mut labels = Vec::with_capacity(ids.len());
    let mut skipped = Vec::new();
    for ((id, bounds), angle) in ids.into_iter().zip(&boxes).zip(angles) {
        match dimension_label(bounds, angle) {
            Ok(label) => labels.push((id, label)),
            Err(err) => {
                tracing::warn!(zone = %id, angle, "Skipping zone: {err}");
                skipped.push((id, err));
            }
        }
    }

    commit(store, PropertyKey::ZoneDimension, labels, skipped)
}
