// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::TextCodec;

/// The diagram script as-is. No parsing, no normalization of line endings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RawScriptCodec;

impl TextCodec for RawScriptCodec {
    type Value = String;

    fn encode(&self, value: &Self::Value) -> String {
        value.clone()
    }

    fn decode(&self, text: &str) -> Self::Value {
        text.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::RawScriptCodec;
    use crate::format::TextCodec;
    use crate::model::SAMPLE_SCRIPT;

    #[test]
    fn raw_codec_is_identity() {
        let script = SAMPLE_SCRIPT.to_owned();
        assert_eq!(RawScriptCodec.encode(&script), script);
        assert_eq!(RawScriptCodec.decode(&script), script);
    }

    #[test]
    fn raw_codec_keeps_crlf_and_trailing_whitespace() {
        let text = "sequenceDiagram\r\n  A->>B: x  \r\n\n";
        assert_eq!(RawScriptCodec.decode(text), text);
    }
}
