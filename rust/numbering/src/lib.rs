// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # ElemID Numbering
//!
//! Spatially ordered numbering of doors, windows and zones on a floor plan.
//!
//! Exterior doors and windows are numbered by walking the building
//! perimeter clockwise from a flagged entry element ([`perimeter`]).
//! Interior doors and zones are numbered by distance from their entry
//! ([`distance`]). Elements are grouped by story and building first
//! ([`grouping`]) and every group gets `<story><sequence:02>` labels
//! ([`label`]).
//!
//! The [`runs`] module ties these together against an
//! [`elemid_core::ElementStore`], writing every computed value in a single
//! batch per run.

pub mod cluster;
pub mod config;
pub mod dimensions;
pub mod distance;
pub mod grouping;
pub mod label;
pub mod perimeter;
pub mod runs;
pub mod strategy;

pub use config::NumberingConfig;
pub use distance::order_by_distance;
pub use grouping::{find_entry, group_by_story_and_building, StoryGroup};
pub use label::{compute_labels, compute_labels_by_distance, compute_zone_labels, format_label};
pub use perimeter::{walk, WalkElement};
pub use runs::{
    dimension_zones, number_exterior, number_interior_by_distance, number_interior_by_zone,
    number_zones, RunReport,
};
pub use strategy::SideStrategy;
