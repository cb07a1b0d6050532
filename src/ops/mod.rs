// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for documents.
//!
//! A batch of ops is applied all-or-nothing against a working copy and produces a minimal delta
//! that the UI can use to refresh derived state (list cursor, rendered script).

use std::collections::HashSet;

use tracing::debug;

use crate::model::{Document, EditError, ItemId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    AddItem { label: String },
    RemoveItem { position: usize },
    MoveItem { source: usize, destination: Option<usize> },
    RenameItem { position: usize, label: String },
    AddRelation { source: Option<ItemId>, target: Option<ItemId>, text: String },
    ReplaceItems { labels: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: Delta,
}

/// Which items changed as the result of applying ops.
///
/// Relations have no ids of their own, so they are only counted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<ItemId>,
    pub removed: Vec<ItemId>,
    pub updated: Vec<ItemId>,
    pub reordered: bool,
    pub relations_added: usize,
    pub relations_removed: usize,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.updated.is_empty()
            && !self.reordered
            && self.relations_added == 0
            && self.relations_removed == 0
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: HashSet<ItemId>,
    removed: HashSet<ItemId>,
    updated: HashSet<ItemId>,
    reordered: bool,
    relations_added: usize,
    relations_removed: usize,
}

impl DeltaBuilder {
    fn record_added(&mut self, item_id: ItemId) {
        self.removed.remove(&item_id);
        self.updated.remove(&item_id);
        self.added.insert(item_id);
    }

    fn record_removed(&mut self, item_id: ItemId) {
        // Added and removed in one batch: it never existed as far as the caller is concerned.
        if self.added.remove(&item_id) {
            self.updated.remove(&item_id);
            return;
        }
        self.updated.remove(&item_id);
        self.removed.insert(item_id);
    }

    fn record_updated(&mut self, item_id: ItemId) {
        if self.added.contains(&item_id) || self.removed.contains(&item_id) {
            return;
        }
        self.updated.insert(item_id);
    }

    fn finish(self) -> Delta {
        let mut added = self.added.into_iter().collect::<Vec<_>>();
        let mut removed = self.removed.into_iter().collect::<Vec<_>>();
        let mut updated = self.updated.into_iter().collect::<Vec<_>>();

        added.sort();
        removed.sort();
        updated.sort();

        Delta {
            added,
            removed,
            updated,
            reordered: self.reordered,
            relations_added: self.relations_added,
            relations_removed: self.relations_removed,
        }
    }
}

/// Applies `ops` in order. Either every op applies or the document is left untouched.
///
/// The revision only advances when something actually changed, so a cancelled drag or a
/// same-position move does not trigger a re-render.
pub fn apply_ops(document: &mut Document, ops: &[Op]) -> Result<ApplyResult, EditError> {
    let current_rev = document.rev();
    if ops.is_empty() {
        return Ok(ApplyResult { new_rev: current_rev, applied: 0, delta: Delta::default() });
    }

    let mut working = document.clone();
    let mut delta = DeltaBuilder::default();
    for op in ops {
        apply_op(&mut working, op, &mut delta)?;
    }

    let delta = delta.finish();
    if delta.is_empty() {
        return Ok(ApplyResult { new_rev: current_rev, applied: ops.len(), delta });
    }

    *document = working;
    document.bump_rev();
    let new_rev = document.rev();
    debug!(new_rev, applied = ops.len(), "applied document ops");

    Ok(ApplyResult { new_rev, applied: ops.len(), delta })
}

// Extracted op-application implementation for item/relation mutations.
include!("ops_impl.rs");
