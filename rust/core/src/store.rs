// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Access to the host model's elements and their properties.
//!
//! The numbering never talks to a CAD application directly. It reads element
//! lists, bounding boxes and property values through [`ElementStore`] and
//! hands back every computed value in one [`ElementStore::set_property_values`]
//! call per run. [`MemoryStore`] is the in-process implementation used by the
//! command-line tool (after loading a snapshot) and by tests.

use rustc_hash::FxHashMap;

use crate::element::{BoundingBox, ElementId};
use crate::error::{Error, Result};
use crate::property::{PropertyKey, PropertyValue, PropertyWrite};

/// Which elements to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementFilter {
    /// Elements carrying a classification item, e.g. `"Door"` or `"Window"`.
    Classification(String),
    /// Elements of a host element type, e.g. `"Zone"`.
    Kind(String),
    /// The user's current selection.
    Selected,
}

/// The host model as seen by the numbering runs.
pub trait ElementStore {
    /// Lists element ids matching `filter`, in model order.
    fn elements(&self, filter: &ElementFilter) -> Vec<ElementId>;

    /// Bounding boxes of `ids`, positionally aligned.
    fn bounding_boxes(&self, ids: &[ElementId]) -> Result<Vec<BoundingBox>>;

    /// Values of `key` for `ids`, positionally aligned; `None` where absent.
    fn property_values(
        &self,
        ids: &[ElementId],
        key: PropertyKey,
    ) -> Result<Vec<Option<PropertyValue>>>;

    /// Applies a batch of writes.
    fn set_property_values(&mut self, writes: Vec<PropertyWrite>) -> Result<()>;
}

/// Stored data for one element of a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct ElementRecord {
    pub kind: String,
    pub classification: Option<String>,
    pub selected: bool,
    pub bounding_box: BoundingBox,
    pub properties: FxHashMap<PropertyKey, PropertyValue>,
}

impl ElementRecord {
    pub fn new(kind: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            kind: kind.into(),
            classification: None,
            selected: false,
            bounding_box,
            properties: FxHashMap::default(),
        }
    }

    pub fn classified(mut self, classification: impl Into<String>) -> Self {
        self.classification = Some(classification.into());
        self
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    pub fn with(mut self, key: PropertyKey, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key, value.into());
        self
    }

    fn matches(&self, filter: &ElementFilter) -> bool {
        match filter {
            ElementFilter::Classification(name) => self.classification.as_deref() == Some(name),
            ElementFilter::Kind(name) => &self.kind == name,
            ElementFilter::Selected => self.selected,
        }
    }
}

/// In-memory element store that keeps insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    order: Vec<ElementId>,
    records: FxHashMap<ElementId, ElementRecord>,
    write_batches: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element, replacing any record with the same id.
    pub fn insert(&mut self, id: impl Into<ElementId>, record: ElementRecord) {
        let id = id.into();
        if self.records.insert(id.clone(), record).is_none() {
            self.order.push(id);
        }
    }

    pub fn record(&self, id: &ElementId) -> Option<&ElementRecord> {
        self.records.get(id)
    }

    /// Current value of a property.
    pub fn property(&self, id: &ElementId, key: PropertyKey) -> Option<&PropertyValue> {
        self.records.get(id).and_then(|r| r.properties.get(&key))
    }

    /// Element ids and records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ElementId, &ElementRecord)> {
        self.order
            .iter()
            .filter_map(move |id| self.records.get(id).map(|r| (id, r)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of `set_property_values` batches applied so far.
    pub fn write_batches(&self) -> usize {
        self.write_batches
    }

    fn get(&self, id: &ElementId) -> Result<&ElementRecord> {
        self.records
            .get(id)
            .ok_or_else(|| Error::UnknownElement(id.clone()))
    }
}

impl ElementStore for MemoryStore {
    fn elements(&self, filter: &ElementFilter) -> Vec<ElementId> {
        self.iter()
            .filter(|(_, r)| r.matches(filter))
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn bounding_boxes(&self, ids: &[ElementId]) -> Result<Vec<BoundingBox>> {
        ids.iter().map(|id| Ok(self.get(id)?.bounding_box)).collect()
    }

    fn property_values(
        &self,
        ids: &[ElementId],
        key: PropertyKey,
    ) -> Result<Vec<Option<PropertyValue>>> {
        ids.iter()
            .map(|id| Ok(self.get(id)?.properties.get(&key).cloned()))
            .collect()
    }

    fn set_property_values(&mut self, writes: Vec<PropertyWrite>) -> Result<()> {
        // Validate the whole batch first so a bad id leaves the store untouched.
        for write in &writes {
            self.get(&write.element)?;
        }
        for write in writes {
            if let Some(record) = self.records.get_mut(&write.element) {
                record.properties.insert(write.key, write.value);
            }
        }
        self.write_batches += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert(
            "d1",
            ElementRecord::new("Door", BoundingBox::new_2d(0.0, 1.0, 0.0, 0.2))
                .classified("Door")
                .with(PropertyKey::Position, "Exterior"),
        );
        store.insert(
            "w1",
            ElementRecord::new("Window", BoundingBox::new_2d(2.0, 3.0, 0.0, 0.2))
                .classified("Window")
                .selected(),
        );
        store.insert(
            "z1",
            ElementRecord::new("Zone", BoundingBox::new_2d(0.0, 5.0, 0.0, 5.0)),
        );
        store
    }

    #[test]
    fn filters_keep_insertion_order() {
        let store = store();
        assert_eq!(
            store.elements(&ElementFilter::Classification("Door".into())),
            vec![ElementId::from("d1")]
        );
        assert_eq!(
            store.elements(&ElementFilter::Kind("Zone".into())),
            vec![ElementId::from("z1")]
        );
        assert_eq!(
            store.elements(&ElementFilter::Selected),
            vec![ElementId::from("w1")]
        );
    }

    #[test]
    fn property_values_are_aligned() {
        let store = store();
        let ids = [ElementId::from("w1"), ElementId::from("d1")];
        let values = store.property_values(&ids, PropertyKey::Position).unwrap();
        assert_eq!(values, vec![None, Some(PropertyValue::from("Exterior"))]);
    }

    #[test]
    fn unknown_id_is_an_error() {
        let store = store();
        let err = store
            .bounding_boxes(&[ElementId::from("nope")])
            .unwrap_err();
        assert!(matches!(err, Error::UnknownElement(_)));
    }

    #[test]
    fn bad_batch_is_not_applied() {
        let mut store = store();
        let writes = vec![
            PropertyWrite::new("d1".into(), PropertyKey::ElementId, "001"),
            PropertyWrite::new("ghost".into(), PropertyKey::ElementId, "002"),
        ];
        assert!(store.set_property_values(writes).is_err());
        assert_eq!(store.property(&"d1".into(), PropertyKey::ElementId), None);
        assert_eq!(store.write_batches(), 0);

        store
            .set_property_values(vec![PropertyWrite::new(
                "d1".into(),
                PropertyKey::ElementId,
                "001",
            )])
            .unwrap();
        assert_eq!(
            store.property(&"d1".into(), PropertyKey::ElementId),
            Some(&PropertyValue::from("001"))
        );
        assert_eq!(store.write_batches(), 1);
    }
}
