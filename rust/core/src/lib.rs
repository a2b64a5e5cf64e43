// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # ElemID Core
//!
//! Data model shared by the numbering runs: elements reduced to axis-aligned
//! bounding boxes, the Top/Right/Bottom/Left perimeter sides, typed property
//! values, and the [`ElementStore`] seam through which a host application
//! supplies elements and receives the computed labels.

pub mod element;
pub mod error;
pub mod property;
pub mod snapshot;
pub mod store;

pub use element::{BoundingBox, ElementId, PositionClass, Side};
pub use error::{Error, Result};
pub use property::{PropertyKey, PropertyValue, PropertyWrite};
pub use snapshot::Snapshot;
pub use store::{ElementFilter, ElementRecord, ElementStore, MemoryStore};
