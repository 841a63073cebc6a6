use std::time::Duration;

use bevy::prelude::*;
use constants::placement::{DEFAULT_OVERLAY_TTL_SECS, DEFAULT_SELECTED_INDEX};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Descriptive text shown next to a placed item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub name: String,
    pub price: String,
    pub material: String,
}

/// One placeable model and the size it is placed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Asset path of the glTF model.
    pub model: String,
    /// Uniform scale applied on placement, independent of surface distance.
    pub scale: f32,
    pub info: ItemInfo,
}

impl CatalogItem {
    pub fn new(model: impl Into<String>, scale: f32, info: ItemInfo) -> Self {
        Self {
            model: model.into(),
            scale,
            info,
        }
    }

    /// Label text for the placement annotation.
    pub fn summary(&self) -> String {
        format!(
            "{}\nPrice: {}\nMaterial: {}",
            self.info.name, self.info.price, self.info.material
        )
    }
}

/// Render template for an item, shared by every instance placed from it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TemplateSlot {
    #[default]
    Pending,
    Ready(Handle<Scene>),
}

impl TemplateSlot {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog index {index} is out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    item: CatalogItem,
    template: TemplateSlot,
}

/// Ordered catalog plus the current selection.
#[derive(Resource, Debug, Default, Clone)]
pub struct PlacementCatalog {
    entries: Vec<CatalogEntry>,
    selected: usize,
}

impl PlacementCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        let entries = items
            .into_iter()
            .map(|item| CatalogEntry {
                item,
                template: TemplateSlot::Pending,
            })
            .collect();
        Self {
            entries,
            selected: DEFAULT_SELECTED_INDEX,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.entries.iter().map(|entry| &entry.item)
    }

    pub fn item(&self, index: usize) -> Option<&CatalogItem> {
        self.entries.get(index).map(|entry| &entry.item)
    }

    /// Slot for `index`. Unknown indices read as `Pending`, never as an error.
    pub fn template(&self, index: usize) -> &TemplateSlot {
        const PENDING: &TemplateSlot = &TemplateSlot::Pending;
        self.entries
            .get(index)
            .map(|entry| &entry.template)
            .unwrap_or(PENDING)
    }

    pub fn is_ready(&self, index: usize) -> bool {
        self.template(index).is_ready()
    }

    /// Fill the slot for `index` once its template has been prepared.
    pub fn fill_template(
        &mut self,
        index: usize,
        template: Handle<Scene>,
    ) -> Result<(), CatalogError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(CatalogError::IndexOutOfRange { index, len })?;
        entry.template = TemplateSlot::Ready(template);
        Ok(())
    }

    /// Change the selection. Out-of-range indices are rejected and the
    /// current selection is kept.
    pub fn select(&mut self, index: usize) -> Result<usize, CatalogError> {
        if index >= self.entries.len() {
            return Err(CatalogError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        self.selected = index;
        Ok(index)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&CatalogItem> {
        self.item(self.selected)
    }
}

/// Tunables supplied alongside the catalog.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PlacementSettings {
    /// How long an annotation stays on screen after placement.
    pub overlay_ttl: Duration,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self {
            overlay_ttl: Duration::from_secs_f32(DEFAULT_OVERLAY_TTL_SECS),
        }
    }
}
