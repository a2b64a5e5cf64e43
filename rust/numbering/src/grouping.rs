// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Partitioning of elements into story/building groups.
//!
//! Each group is numbered independently, so the partition decides where
//! sequence numbers restart. Story numbers are mandatory. Building numbers
//! are only required once some element of a story names a building other
//! than the first.

use elemid_core::property::require_int;
use elemid_core::{ElementId, Error, PropertyKey, PropertyValue, Result};
use rustc_hash::FxHashMap;

/// Elements of one story and building, as indices into the run's element list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryGroup {
    pub story: usize,
    pub building: i64,
    pub members: Vec<usize>,
}

/// Groups elements by story (`0..number_of_stories`), then by building
/// (`1..=` highest building number seen on that story).
///
/// `stories` and `buildings` hold the property values of `ids`, positionally
/// aligned. Empty stories and buildings produce no group.
///
/// # Errors
///
/// [`Error::MissingProperty`] when any element has no story number, or when a
/// story has several buildings and one of its elements has no building number.
pub fn group_by_story_and_building(
    ids: &[ElementId],
    stories: &[Option<PropertyValue>],
    buildings: &[Option<PropertyValue>],
    number_of_stories: usize,
) -> Result<Vec<StoryGroup>> {
    let story_numbers = ids
        .iter()
        .zip(stories)
        .map(|(id, value)| require_int(id, PropertyKey::StoryNumber, value.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let building_numbers = ids
        .iter()
        .zip(buildings)
        .map(|(id, value)| match value {
            Some(v) => require_int(id, PropertyKey::BuildingNumber, Some(v)).map(Some),
            None => Ok(None),
        })
        .collect::<Result<Vec<_>>>()?;

    let out_of_range = story_numbers
        .iter()
        .filter(|&&s| s < 0 || s >= number_of_stories as i64)
        .count();
    if out_of_range > 0 {
        tracing::warn!(
            count = out_of_range,
            number_of_stories,
            "Elements on stories outside the configured range are not numbered"
        );
    }

    let mut groups = Vec::new();
    for story in 0..number_of_stories {
        let on_story: Vec<usize> = (0..ids.len())
            .filter(|&i| story_numbers[i] == story as i64)
            .collect();
        if on_story.is_empty() {
            tracing::debug!(story, "No elements on story");
            continue;
        }

        let buildings_on_story = on_story
            .iter()
            .filter_map(|&i| building_numbers[i])
            .max()
            .unwrap_or(1)
            .max(1);

        let mut by_building: FxHashMap<i64, Vec<usize>> = FxHashMap::default();
        for &i in &on_story {
            let building = match building_numbers[i] {
                Some(b) => b,
                None if buildings_on_story == 1 => 1,
                None => {
                    return Err(Error::MissingProperty {
                        element: ids[i].clone(),
                        property: PropertyKey::BuildingNumber,
                    })
                }
            };
            by_building.entry(building).or_default().push(i);
        }

        for building in 1..=buildings_on_story {
            match by_building.remove(&building) {
                Some(members) => groups.push(StoryGroup {
                    story,
                    building,
                    members,
                }),
                None => tracing::debug!(story, building, "No elements in building"),
            }
        }
        if !by_building.is_empty() {
            tracing::warn!(
                story,
                "Elements with building numbers below 1 are not numbered"
            );
        }
    }

    Ok(groups)
}

/// Finds the single element of a group flagged as entry.
///
/// `flags` holds the entry-flag values of `ids`, positionally aligned.
/// Returns the position of the flagged element, `None` if nothing is flagged.
///
/// # Errors
///
/// [`Error::MultipleEntries`] when more than one element is flagged.
pub fn find_entry(
    ids: &[ElementId],
    flags: &[Option<PropertyValue>],
    story: usize,
    building: i64,
) -> Result<Option<usize>> {
    let mut flagged = ids
        .iter()
        .zip(flags)
        .enumerate()
        .filter(|(_, (_, flag))| flag.as_ref().and_then(PropertyValue::as_bool) == Some(true))
        .map(|(i, (id, _))| (i, id));

    let Some((first, first_id)) = flagged.next() else {
        return Ok(None);
    };
    if let Some((_, second_id)) = flagged.next() {
        return Err(Error::MultipleEntries {
            story,
            building,
            first: first_id.clone(),
            second: second_id.clone(),
        });
    }
    Ok(Some(first))
}
