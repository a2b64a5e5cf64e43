// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use elemid_core::property::parse_side;
use elemid_core::{
    ElementFilter, ElementId, ElementStore, Error, PositionClass, PropertyKey, Result,
};

use super::{candidates, commit, with_position, RunReport};
use crate::config::NumberingConfig;
use crate::grouping::{find_entry, group_by_story_and_building, StoryGroup};
use crate::label::compute_labels;

/// Numbers exterior doors and windows clockwise around the perimeter of
/// every story/building group and writes the labels to `ElementId`.
///
/// # Errors
///
/// Aborts without writing on a missing story, building or side, on a group
/// without an entry (`FirstDoor`, else `FirstWindow`) and on a stuck walk.
pub fn number_exterior<S: ElementStore>(
    store: &mut S,
    config: &NumberingConfig,
) -> Result<RunReport> {
    let ids = candidates(
        store,
        &[
            ElementFilter::Classification(config.door_classification.clone()),
            ElementFilter::Classification(config.window_classification.clone()),
        ],
    );
    let ids = with_position(store, ids, PositionClass::Exterior)?;
    tracing::info!(elements = ids.len(), "Numbering exterior doors and windows");

    let stories = store.property_values(&ids, PropertyKey::StoryNumber)?;
    let buildings = store.property_values(&ids, PropertyKey::BuildingNumber)?;
    let groups = group_by_story_and_building(&ids, &stories, &buildings, config.number_of_stories)?;

    let mut labels = Vec::with_capacity(ids.len());
    for group in &groups {
        let members: Vec<ElementId> = group.members.iter().map(|&i| ids[i].clone()).collect();
        let entry = exterior_entry(store, &members, group)?;

        let boxes = store.bounding_boxes(&members)?;
        let sides = members
            .iter()
            .zip(store.property_values(&members, PropertyKey::ExteriorSide)?)
            .map(|(id, value)| parse_side(id, value.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            story = group.story,
            building = group.building,
            elements = members.len(),
            entry = %members[entry].as_str(),
            "Walking perimeter"
        );
        labels.extend(compute_labels(
            &members[entry],
            &members,
            &sides,
            &boxes,
            group.story,
            &config.label_prefix,
        )?);
    }

    commit(store, PropertyKey::ElementId, labels, Vec::new())
}

/// Entry of an exterior group: the `FirstDoor`, or the `FirstWindow` when no
/// door is flagged.
fn exterior_entry<S: ElementStore>(
    store: &S,
    members: &[ElementId],
    group: &StoryGroup,
) -> Result<usize> {
    let doors = store.property_values(members, PropertyKey::FirstDoor)?;
    if let Some(entry) = find_entry(members, &doors, group.story, group.building)? {
        return Ok(entry);
    }
    let windows = store.property_values(members, PropertyKey::FirstWindow)?;
    find_entry(members, &windows, group.story, group.building)?.ok_or(Error::NoEntryFound {
        story: group.story,
        building: group.building,
    })
}
