// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::error::{check_position, EditError, ValidationError};
use super::ids::{IdAllocator, ItemId, ItemIdTag};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    item_id: ItemId,
    label: String,
}

impl Item {
    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// The ordered item sequence.
///
/// Positions are always `0..len` with no gaps; the order is the narrative order of the
/// exported diagram. Labels may repeat.
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<Item>,
    ids: IdAllocator<ItemIdTag>,
}

impl PartialEq for ItemStore {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for ItemStore {}

impl ItemStore {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn get(&self, position: usize) -> Option<&Item> {
        self.items.get(position)
    }

    pub fn position_of(&self, item_id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.item_id == item_id)
    }

    pub fn label_of(&self, item_id: ItemId) -> Option<&str> {
        self.items.iter().find(|item| item.item_id == item_id).map(Item::label)
    }

    pub fn contains(&self, item_id: ItemId) -> bool {
        self.position_of(item_id).is_some()
    }

    /// Appends a trimmed label and returns the new item's id.
    pub fn add_item(&mut self, label: &str) -> Result<ItemId, EditError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(ValidationError::EmptyLabel.into());
        }
        let item_id = self.ids.allocate();
        self.items.push(Item { item_id, label: label.to_owned() });
        Ok(item_id)
    }

    pub fn remove_item(&mut self, position: usize) -> Result<Item, EditError> {
        check_position(position, self.items.len())?;
        Ok(self.items.remove(position))
    }

    /// Moves the item at `source` so it ends up at `destination`.
    ///
    /// A `None` destination is a cancelled gesture and leaves the sequence alone. Returns whether
    /// the order changed.
    pub fn move_item(
        &mut self,
        source: usize,
        destination: Option<usize>,
    ) -> Result<bool, EditError> {
        let len = self.items.len();
        check_position(source, len)?;
        let Some(destination) = destination else {
            return Ok(false);
        };
        check_position(destination, len)?;
        if source == destination {
            return Ok(false);
        }

        let item = self.items.remove(source);
        self.items.insert(destination, item);
        Ok(true)
    }

    /// Replaces the label at `position`, keeping the item's id.
    pub fn rename_item(&mut self, position: usize, label: &str) -> Result<String, EditError> {
        check_position(position, self.items.len())?;
        let label = label.trim();
        if label.is_empty() {
            return Err(ValidationError::EmptyLabel.into());
        }
        Ok(std::mem::replace(&mut self.items[position].label, label.to_owned()))
    }

    /// Replaces the whole sequence with `labels`, verbatim.
    ///
    /// Unlike [`ItemStore::add_item`] this does not trim or reject empty labels: imported text is
    /// taken as-is. Every item gets a fresh id.
    pub fn replace_labels<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids = &mut self.ids;
        self.items = labels
            .into_iter()
            .map(|label| Item { item_id: ids.allocate(), label: label.into() })
            .collect();
    }

    pub fn snapshot(&self) -> Vec<&str> {
        self.items.iter().map(Item::label).collect()
    }
}
