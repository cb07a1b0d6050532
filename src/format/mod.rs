// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text formats for export/import.
//!
//! Two flat codecs are supported (comma-joined labels and raw diagram script), plus a one-way
//! projection from a structured document to a Mermaid `sequenceDiagram` script.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

pub mod labels;
pub mod script;
pub mod sequence;

pub use labels::LabelListCodec;
pub use script::RawScriptCodec;
pub use sequence::project_sequence_diagram;

/// A flat text encoding of some editor value.
///
/// `decode` is infallible: every string is a valid encoding of something. Byte-level problems
/// (invalid UTF-8) are caught before a codec ever sees the text.
pub trait TextCodec {
    type Value;

    fn encode(&self, value: &Self::Value) -> String;

    fn decode(&self, text: &str) -> Self::Value;
}

/// Which representation an editor treats as authoritative, and therefore exports.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Ordered item labels, comma-joined.
    #[default]
    #[serde(alias = "list")]
    Labels,
    /// The free-text diagram script, verbatim.
    #[serde(alias = "text")]
    Script,
}

impl ExportMode {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Labels => "MermaidNotes.txt",
            Self::Script => "sequencediagram.txt",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Labels => "labels",
            Self::Script => "script",
        }
    }
}

impl fmt::Display for ExportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown export mode {0:?} (expected 'labels' or 'script')")]
pub struct ParseExportModeError(String);

impl FromStr for ExportMode {
    type Err = ParseExportModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "labels" | "list" => Ok(Self::Labels),
            "script" | "text" => Ok(Self::Script),
            _ => Err(ParseExportModeError(s.to_owned())),
        }
    }
}
