// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::item::ItemStore;
use super::relation::RelationStore;

/// The structured half of the editor state: items plus the relations between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    items: ItemStore,
    relations: RelationStore,
    rev: u64,
}

impl Document {
    pub fn items(&self) -> &ItemStore {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut ItemStore {
        &mut self.items
    }

    pub fn relations(&self) -> &RelationStore {
        &self.relations
    }

    pub fn relations_mut(&mut self) -> &mut RelationStore {
        &mut self.relations
    }

    /// Drops relations whose endpoints are no longer in the item sequence.
    pub fn prune_dangling_relations(&mut self) -> usize {
        let items = &self.items;
        self.relations.retain_endpoints(|item_id| items.contains(item_id))
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }
}
