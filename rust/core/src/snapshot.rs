// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON snapshots of a project's elements.
//!
//! A snapshot is the exchange format between the host application and the
//! command-line tool: element ids, kinds, classifications, selection state,
//! bounding boxes and property values. Loading a snapshot yields a
//! [`MemoryStore`]; saving one captures the store after a run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::element::{BoundingBox, ElementId};
use crate::error::Result;
use crate::property::{PropertyKey, PropertyValue};
use crate::store::{ElementRecord, MemoryStore};

/// Serializable representation of a project.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub elements: Vec<ElementSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub id: ElementId,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
    pub bounding_box: BoundingBox,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<PropertyKey, PropertyValue>,
}

impl Snapshot {
    /// Parses a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the snapshot to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Builds a store holding the snapshot's elements in file order.
    pub fn into_store(self) -> MemoryStore {
        let mut store = MemoryStore::new();
        for element in self.elements {
            let record = ElementRecord {
                kind: element.kind,
                classification: element.classification,
                selected: element.selected,
                bounding_box: element.bounding_box,
                properties: element.properties.into_iter().collect(),
            };
            store.insert(element.id, record);
        }
        store
    }

    /// Captures the current state of a store.
    pub fn from_store(store: &MemoryStore) -> Self {
        let elements = store
            .iter()
            .map(|(id, record)| ElementSnapshot {
                id: id.clone(),
                kind: record.kind.clone(),
                classification: record.classification.clone(),
                selected: record.selected,
                bounding_box: record.bounding_box,
                properties: record
                    .properties
                    .iter()
                    .map(|(k, v)| (*k, v.clone()))
                    .collect(),
            })
            .collect();
        Self { elements }
    }
}
