// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for element numbering.

use crate::element::{ElementId, Side};
use crate::property::PropertyKey;

/// Result type alias for numbering operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, ordering or labelling elements.
///
/// Every variant except [`Error::InvalidAngle`] is fatal for a whole run:
/// the run aborts before any property is written back.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An element lacks a property the run needs.
    #[error("element {element} has no {property} property")]
    MissingProperty {
        element: ElementId,
        property: PropertyKey,
    },

    /// A property is present but its value cannot be used.
    #[error("element {element} has an invalid {property} value: {reason}")]
    InvalidPropertyValue {
        element: ElementId,
        property: PropertyKey,
        reason: String,
    },

    /// A story/building group has no flagged entry element.
    #[error("no entry element flagged in building {building} on story {story}")]
    NoEntryFound { story: usize, building: i64 },

    /// More than one element of a group is flagged as the entry.
    #[error(
        "building {building} on story {story} has more than one entry element: {first} and {second}"
    )]
    MultipleEntries {
        story: usize,
        building: i64,
        first: ElementId,
        second: ElementId,
    },

    /// The perimeter walk found no unvisited element to continue with.
    #[error("perimeter walk is stuck after element {element} on the {side} side")]
    UnreachableCandidate { element: ElementId, side: Side },

    /// An angle outside the supported range was supplied.
    #[error("angle {0} is outside the supported range")]
    InvalidAngle(f64),

    /// The store was asked about an element it does not hold.
    #[error("unknown element: {0}")]
    UnknownElement(ElementId),

    /// Snapshot load/save error.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Snapshot(err.to_string())
    }
}
