// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::error::{EditError, ValidationError};
use super::ids::ItemId;

/// A directed, labeled edge between two items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    source: ItemId,
    target: ItemId,
    text: String,
}

impl Relation {
    pub fn source(&self) -> ItemId {
        self.source
    }

    pub fn target(&self) -> ItemId {
        self.target
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn involves(&self, item_id: ItemId) -> bool {
        self.source == item_id || self.target == item_id
    }
}

/// Ordered relations, in the order they were added.
///
/// The store does not check that endpoints exist in the item sequence; callers pick endpoints
/// from live items and prune with [`RelationStore::retain_endpoints`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationStore {
    relations: Vec<Relation>,
}

impl RelationStore {
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    pub fn add_relation(
        &mut self,
        source: Option<ItemId>,
        target: Option<ItemId>,
        text: &str,
    ) -> Result<usize, EditError> {
        let source = source.ok_or(ValidationError::MissingSource)?;
        let target = target.ok_or(ValidationError::MissingTarget)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyRelationText.into());
        }

        self.relations.push(Relation { source, target, text: text.to_owned() });
        Ok(self.relations.len() - 1)
    }

    /// Drops every relation with an endpoint for which `is_live` returns false.
    pub fn retain_endpoints(&mut self, mut is_live: impl FnMut(ItemId) -> bool) -> usize {
        let before = self.relations.len();
        self.relations.retain(|relation| is_live(relation.source) && is_live(relation.target));
        before - self.relations.len()
    }

    pub fn snapshot(&self) -> &[Relation] {
        &self.relations
    }
}
