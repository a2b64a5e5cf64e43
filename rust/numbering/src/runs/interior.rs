// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use elemid_core::{
    ElementFilter, ElementId, ElementStore, Error, PositionClass, PropertyKey, PropertyValue,
    Result,
};

use super::{candidates, commit, with_position, RunReport};
use crate::config::NumberingConfig;
use crate::grouping::{find_entry, group_by_story_and_building};
use crate::label::{compute_labels_by_distance, compute_zone_labels};

fn interior_doors<S: ElementStore>(store: &S, config: &NumberingConfig) -> Result<Vec<ElementId>> {
    let ids = candidates(
        store,
        &[ElementFilter::Classification(config.door_classification.clone())],
    );
    with_position(store, ids, PositionClass::Interior)
}

/// Numbers interior doors of every story/building group by distance from
/// the group's `FirstDoor` and writes the labels to `ElementId`.
///
/// Groups partition the doors, so every door is labelled exactly once.
pub fn number_interior_by_distance<S: ElementStore>(
    store: &mut S,
    config: &NumberingConfig,
) -> Result<RunReport> {
    let ids = interior_doors(store, config)?;
    tracing::info!(doors = ids.len(), "Numbering interior doors by distance");

    let stories = store.property_values(&ids, PropertyKey::StoryNumber)?;
    let buildings = store.property_values(&ids, PropertyKey::BuildingNumber)?;
    let groups = group_by_story_and_building(&ids, &stories, &buildings, config.number_of_stories)?;

    let mut labels = Vec::with_capacity(ids.len());
    for group in &groups {
        let members: Vec<ElementId> = group.members.iter().map(|&i| ids[i].clone()).collect();
        let flags = store.property_values(&members, PropertyKey::FirstDoor)?;
        let entry = find_entry(&members, &flags, group.story, group.building)?.ok_or(
            Error::NoEntryFound {
                story: group.story,
                building: group.building,
            },
        )?;

        let boxes = store.bounding_boxes(&members)?;
        let reference = boxes[entry].min_corner();
        tracing::debug!(
            story = group.story,
            building = group.building,
            doors = members.len(),
            entry = %members[entry].as_str(),
            "Ordering by distance"
        );
        labels.extend(compute_labels_by_distance(
            &members,
            &boxes,
            reference,
            group.story,
            &config.label_prefix,
        ));
    }

    commit(store, PropertyKey::ElementId, labels, Vec::new())
}

/// Labels interior doors `<zone><letter>` from their `RelatedZoneNumber`
/// and writes the labels to `ElementId`.
///
/// Doors without a related zone get the configured default zone number.
pub fn number_interior_by_zone<S: ElementStore>(
    store: &mut S,
    config: &NumberingConfig,
) -> Result<RunReport> {
    let ids = interior_doors(store, config)?;
    tracing::info!(doors = ids.len(), "Numbering interior doors by zone");

    let related = store.property_values(&ids, PropertyKey::RelatedZoneNumber)?;
    let doors = ids
        .into_iter()
        .zip(related)
        .map(|(id, value)| {
            let zone = match zone_number(&id, value.as_ref())? {
                Some(zone) => zone,
                None => {
                    tracing::warn!(
                        door = %id,
                        zone = %config.default_zone_number,
                        "Door has no related zone, using the default zone number"
                    );
                    config.default_zone_number.clone()
                }
            };
            Ok((id, zone))
        })
        .collect::<Result<Vec<_>>>()?;

    commit(store, PropertyKey::ElementId, compute_zone_labels(&doors), Vec::new())
}

/// Related zone number as text; absent or blank reads as `None`.
fn zone_number(door: &ElementId, value: Option<&PropertyValue>) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(PropertyValue::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(PropertyValue::Text(text)) => Ok(Some(text.trim().to_string())),
        Some(other) => other
            .as_int()
            .map(|n| Some(n.to_string()))
            .ok_or_else(|| Error::InvalidPropertyValue {
                element: door.clone(),
                property: PropertyKey::RelatedZoneNumber,
                reason: format!("expected a zone number, found {other:?}"),
            }),
    }
}
