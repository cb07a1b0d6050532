// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Item/relation mutation helpers used by `apply_ops`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn apply_op(document: &mut Document, op: &Op, delta: &mut DeltaBuilder) -> Result<(), EditError> {
    match op {
        Op::AddItem { label } => {
            let item_id = document.items_mut().add_item(label)?;
            delta.record_added(item_id);
            Ok(())
        }
        Op::RemoveItem { position } => {
            let removed = document.items_mut().remove_item(*position)?;
            delta.record_removed(removed.item_id());
            delta.relations_removed += document.prune_dangling_relations();
            Ok(())
        }
        Op::MoveItem { source, destination } => {
            let moved_id = document.items().get(*source).map(|item| item.item_id());
            if document.items_mut().move_item(*source, *destination)? {
                delta.reordered = true;
                if let Some(item_id) = moved_id {
                    delta.record_updated(item_id);
                }
            }
            Ok(())
        }
        Op::RenameItem { position, label } => {
            let previous = document.items_mut().rename_item(*position, label)?;
            let Some(item) = document.items().get(*position) else {
                return Ok(());
            };
            if item.label() != previous {
                delta.record_updated(item.item_id());
            }
            Ok(())
        }
        Op::AddRelation { source, target, text } => {
            for endpoint in [source, target].into_iter().flatten() {
                check_endpoint(document, *endpoint)?;
            }
            document.relations_mut().add_relation(*source, *target, text)?;
            delta.relations_added += 1;
            Ok(())
        }
        Op::ReplaceItems { labels } => {
            let old_ids =
                document.items().items().iter().map(|item| item.item_id()).collect::<Vec<_>>();
            document.items_mut().replace_labels(labels.iter().cloned());
            for item_id in old_ids {
                delta.record_removed(item_id);
            }
            let new_ids =
                document.items().items().iter().map(|item| item.item_id()).collect::<Vec<_>>();
            for item_id in new_ids {
                delta.record_added(item_id);
            }
            delta.relations_removed += document.prune_dangling_relations();
            Ok(())
        }
    }
}

/// Relation endpoints must be live items with a non-blank label.
fn check_endpoint(document: &Document, item_id: ItemId) -> Result<(), EditError> {
    match document.items().label_of(item_id) {
        Some(label) if !label.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::EmptyEndpoint.into()),
    }
}
