// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::document::Document;

/// Diagram script the free-text editor starts with unless told to start empty.
pub const SAMPLE_SCRIPT: &str = "sequenceDiagram
    participant Alice
    participant Bob
    Alice->>John: Hello John, how are you?
    loop Healthcheck
        John->>John: Fight against hypochondria
    end
    Note right of John: Rational thoughts <br/>prevail!
    John-->>Alice: Great!
    John->>Bob: How about you?
    Bob-->>John: Jolly good!
";

/// Items and relations the list editor starts with unless told to start empty.
pub fn sample_document() -> Document {
    let mut doc = Document::default();
    let ids = ["Alice", "John", "Bob"]
        .into_iter()
        .filter_map(|label| doc.items_mut().add_item(label).ok())
        .collect::<Vec<_>>();

    if let [alice, john, bob] = ids[..] {
        let relations = doc.relations_mut();
        for (from, to, text) in [
            (alice, john, "Hello John, how are you?"),
            (john, alice, "Great!"),
            (john, bob, "How about you?"),
            (bob, john, "Jolly good!"),
        ] {
            let _ = relations.add_relation(Some(from), Some(to), text);
        }
    }

    doc
}
