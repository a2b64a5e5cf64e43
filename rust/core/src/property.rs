// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named element properties read from and written to the host model.

use serde::{Deserialize, Serialize};

use crate::element::{ElementId, PositionClass, Side};
use crate::error::{Error, Result};

/// Properties the numbering runs read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PropertyKey {
    /// Element ID label of doors and windows (written).
    ElementId,
    /// Zone number label (written).
    ZoneNumber,
    /// Interior/Exterior position class.
    Position,
    /// Top/Bottom/Left/Right side of an exterior element.
    ExteriorSide,
    StoryNumber,
    BuildingNumber,
    /// Entry flag for doors.
    FirstDoor,
    /// Entry flag for windows, consulted when no door is flagged.
    FirstWindow,
    /// Entry flag for zones.
    FirstZone,
    /// Number of the zone an interior door opens into.
    RelatedZoneNumber,
    /// Rotation of a zone inside its bounding box, in degrees.
    ZoneAngle,
    /// Zone dimension string (written).
    ZoneDimension,
}

impl PropertyKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKey::ElementId => "ElementId",
            PropertyKey::ZoneNumber => "ZoneNumber",
            PropertyKey::Position => "Position",
            PropertyKey::ExteriorSide => "ExteriorSide",
            PropertyKey::StoryNumber => "StoryNumber",
            PropertyKey::BuildingNumber => "BuildingNumber",
            PropertyKey::FirstDoor => "FirstDoor",
            PropertyKey::FirstWindow => "FirstWindow",
            PropertyKey::FirstZone => "FirstZone",
            PropertyKey::RelatedZoneNumber => "RelatedZoneNumber",
            PropertyKey::ZoneAngle => "ZoneAngle",
            PropertyKey::ZoneDimension => "ZoneDimension",
        }
    }
}

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Real(f64),
    Text(String),
}

impl PropertyValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer value. Whole reals are accepted, since hosts often store
    /// counters as lengths.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(i) => Some(*i),
            PropertyValue::Real(r) if r.fract() == 0.0 => Some(*r as i64),
            PropertyValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            PropertyValue::Int(i) => Some(*i as f64),
            PropertyValue::Real(r) => Some(*r),
            PropertyValue::Text(s) => s.trim().parse().ok(),
            PropertyValue::Bool(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Int(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(r: f64) -> Self {
        PropertyValue::Real(r)
    }
}

/// One pending property write, collected during a run and applied in a
/// single batch at its end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyWrite {
    pub element: ElementId,
    pub key: PropertyKey,
    pub value: PropertyValue,
}

impl PropertyWrite {
    pub fn new(element: ElementId, key: PropertyKey, value: impl Into<PropertyValue>) -> Self {
        Self {
            element,
            key,
            value: value.into(),
        }
    }
}

/// Reads a required integer property.
pub fn require_int(
    element: &ElementId,
    key: PropertyKey,
    value: Option<&PropertyValue>,
) -> Result<i64> {
    let value = value.ok_or_else(|| Error::MissingProperty {
        element: element.clone(),
        property: key,
    })?;
    value.as_int().ok_or_else(|| Error::InvalidPropertyValue {
        element: element.clone(),
        property: key,
        reason: format!("expected an integer, found {value:?}"),
    })
}

/// Reads an optional exterior side. A present but unrecognised value is an error.
pub fn parse_side(element: &ElementId, value: Option<&PropertyValue>) -> Result<Option<Side>> {
    let Some(value) = value else {
        return Ok(None);
    };
    value
        .as_text()
        .and_then(Side::parse)
        .map(Some)
        .ok_or_else(|| Error::InvalidPropertyValue {
            element: element.clone(),
            property: PropertyKey::ExteriorSide,
            reason: format!("expected Top, Right, Bottom or Left, found {value:?}"),
        })
}

/// Reads an optional position class; unknown values read as `None`.
pub fn parse_position(value: Option<&PropertyValue>) -> Option<PositionClass> {
    value.and_then(|v| v.as_text()).and_then(PositionClass::parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_accepts_whole_reals_and_text() {
        assert_eq!(PropertyValue::Int(3).as_int(), Some(3));
        assert_eq!(PropertyValue::Real(2.0).as_int(), Some(2));
        assert_eq!(PropertyValue::Real(2.5).as_int(), None);
        assert_eq!(PropertyValue::from("12").as_int(), Some(12));
        assert_eq!(PropertyValue::Bool(true).as_int(), None);
    }

    #[test]
    fn require_int_reports_missing_property() {
        let id = ElementId::from("door-1");
        let err = require_int(&id, PropertyKey::StoryNumber, None).unwrap_err();
        match err {
            Error::MissingProperty { element, property } => {
                assert_eq!(element, id);
                assert_eq!(property, PropertyKey::StoryNumber);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_side_rejects_unknown_text() {
        let id = ElementId::from("w");
        assert_eq!(parse_side(&id, None).unwrap(), None);
        assert_eq!(
            parse_side(&id, Some(&PropertyValue::from("Top"))).unwrap(),
            Some(Side::Top)
        );
        assert!(matches!(
            parse_side(&id, Some(&PropertyValue::from("Up"))),
            Err(Error::InvalidPropertyValue { .. })
        ));
    }

    #[test]
    fn untagged_json_values() {
        let values: Vec<PropertyValue> =
            serde_json::from_str(r#"[true, 2, 1.5, "Exterior"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                PropertyValue::Bool(true),
                PropertyValue::Int(2),
                PropertyValue::Real(1.5),
                PropertyValue::from("Exterior"),
            ]
        );
    }
}
