//! Element registry: every manipulable element's geometry and z-order.
//!
//! The registry is the single writer-visible source of truth on the client.
//! The input engine writes geometry here on every pointer-move; the renderer
//! and the commit path only read. Geometry is stored in canvas-local units
//! so it stays valid across viewport scroll and zoom.
//!
//! Snapshots (`RegistrySnapshot`) are the serialized form written to local
//! persistence on commit and read back on project load.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use wire::ElementSummary;

use crate::camera::Point;
use crate::consts::{DEFAULT_ELEMENT_ID, DEFAULT_ELEMENT_RECT};
use crate::geometry::{Rect, Size};

/// Stable identifier of an element; the value of its identifier attribute.
pub type ElementId = String;

/// One manipulable element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
    pub id: ElementId,
    /// Component kind, e.g. `"button"`. Informational only.
    pub kind: String,
    /// Top-left corner in canvas-local units.
    pub position: Point,
    pub size: Size,
    /// Stacking order; lower values are drawn beneath higher values.
    pub z_index: i64,
}

impl ElementRecord {
    #[must_use]
    pub fn new(id: impl Into<ElementId>, kind: impl Into<String>, position: Point, size: Size) -> Self {
        Self { id: id.into(), kind: kind.into(), position, size: size.clamped(), z_index: 0 }
    }

    #[must_use]
    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = z_index;
        self
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    /// Seed a record from an element listed in a source document.
    ///
    /// Missing or non-pixel lengths fall back to zero position and minimum size.
    #[must_use]
    pub fn from_summary(summary: &ElementSummary, z_index: i64) -> Self {
        let position = Point::new(
            summary.length("left").unwrap_or_default(),
            summary.length("top").unwrap_or_default(),
        );
        let size = Size::new(
            summary.length("width").unwrap_or_default(),
            summary.length("height").unwrap_or_default(),
        );
        Self::new(summary.id.clone(), summary.tag.to_ascii_lowercase(), position, size)
            .with_z_index(z_index)
    }
}

/// Serialized registry contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub elements: Vec<ElementRecord>,
}

/// In-memory store of element records.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    elements: HashMap<ElementId, ElementRecord>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { elements: HashMap::new() }
    }

    /// A registry holding the elements every new project starts with.
    #[must_use]
    pub fn with_defaults() -> Self {
        let (left, top, width, height) = DEFAULT_ELEMENT_RECT;
        let mut registry = Self::new();
        registry.insert(ElementRecord::new(
            DEFAULT_ELEMENT_ID,
            "button",
            Point::new(left, top),
            Size::new(width, height),
        ));
        registry
    }

    /// Seed from elements listed in a source document. Later elements stack higher.
    #[must_use]
    pub fn from_summaries(summaries: &[ElementSummary]) -> Self {
        let mut registry = Self::new();
        for (z_index, summary) in (0_i64..).zip(summaries) {
            registry.insert(ElementRecord::from_summary(summary, z_index));
        }
        registry
    }

    /// Insert or replace a record. Its size is clamped to the minimum.
    pub fn insert(&mut self, mut record: ElementRecord) {
        record.size = record.size.clamped();
        self.elements.insert(record.id.clone(), record);
    }

    /// Remove a record by id, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<ElementRecord> {
        self.elements.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ElementRecord> {
        self.elements.get(id)
    }

    /// Overwrite an element's geometry. Returns `false` if it doesn't exist.
    pub fn set_geometry(&mut self, id: &str, position: Point, size: Size) -> bool {
        let Some(record) = self.elements.get_mut(id) else {
            return false;
        };
        record.position = position;
        record.size = size.clamped();
        true
    }

    /// All records sorted by `(z_index, id)` for draw order.
    #[must_use]
    pub fn list(&self) -> Vec<&ElementRecord> {
        let mut records: Vec<&ElementRecord> = self.elements.values().collect();
        records.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
        records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Replace all records with a snapshot.
    pub fn load_snapshot(&mut self, snapshot: RegistrySnapshot) {
        self.elements.clear();
        for record in snapshot.elements {
            self.insert(record);
        }
    }

    /// Copy of all records in draw order.
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot { elements: self.list().into_iter().cloned().collect() }
    }
}
