// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use crate::model::{Document, ItemId};

const SYNC_ARROW: &str = "->>";

/// Renders a document as a Mermaid `sequenceDiagram` script for the diagram view.
///
/// Every item becomes a participant in list order, aliased by its id so duplicate labels stay
/// distinct lifelines. Relations become sync messages in insertion order. Relations whose
/// endpoints are gone are skipped rather than reported.
pub fn project_sequence_diagram(document: &Document) -> String {
    let mut out = String::new();
    out.push_str("sequenceDiagram\n");

    let mut aliases = HashMap::<ItemId, String>::with_capacity(document.items().len());
    for item in document.items().items() {
        let alias = participant_alias(item.item_id());
        out.push_str("    participant ");
        out.push_str(&alias);
        let label = escape_text(item.label());
        if !label.trim().is_empty() {
            out.push_str(" as ");
            out.push_str(label.trim());
        }
        out.push('\n');
        aliases.insert(item.item_id(), alias);
    }

    for relation in document.relations().snapshot() {
        let endpoints = (aliases.get(&relation.source()), aliases.get(&relation.target()));
        let (Some(from), Some(to)) = endpoints else {
            continue;
        };
        out.push_str("    ");
        out.push_str(from);
        out.push_str(SYNC_ARROW);
        out.push_str(to);
        out.push_str(": ");
        out.push_str(&escape_text(relation.text()));
        out.push('\n');
    }

    out
}

fn participant_alias(item_id: ItemId) -> String {
    format!("p{item_id}")
}

/// Line breaks would end the statement early; Mermaid spells them `<br/>`.
fn escape_text(text: &str) -> String {
    text.replace("\r\n", "<br/>").replace(['\n', '\r'], "<br/>")
}
