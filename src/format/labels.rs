// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::TextCodec;

pub const LABEL_SEPARATOR: char = ',';

/// Comma-joined item labels.
///
/// The format carries no escaping and no positional metadata, so the round trip only holds for
/// labels that are non-empty and contain no `,`. Anything else comes back reshaped:
/// - a label containing `,` splits into several labels;
/// - a trailing empty label is swallowed by the trailing-separator strip;
/// - duplicate labels are indistinguishable from each other.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LabelListCodec;

impl LabelListCodec {
    pub fn encode_labels<S: AsRef<str>>(&self, labels: &[S]) -> String {
        let mut text = String::new();
        for (idx, label) in labels.iter().enumerate() {
            if idx > 0 {
                text.push(LABEL_SEPARATOR);
            }
            text.push_str(label.as_ref());
        }
        // Exactly one, even if the last label itself ends with the separator.
        if text.ends_with(LABEL_SEPARATOR) {
            text.pop();
        }
        text
    }
}

impl TextCodec for LabelListCodec {
    type Value = Vec<String>;

    fn encode(&self, value: &Self::Value) -> String {
        self.encode_labels(value)
    }

    /// Splits on every `,`; entries are neither trimmed nor filtered.
    fn decode(&self, text: &str) -> Self::Value {
        text.split(LABEL_SEPARATOR).map(ToOwned::to_owned).collect()
    }
}
