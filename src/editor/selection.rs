// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::ItemId;

/// Progress towards a new relation: pick a source, pick a target, then type the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    SourceSelected {
        source: ItemId,
    },
    TargetSelected {
        source: ItemId,
        target: ItemId,
    },
}

impl Selection {
    pub fn source(self) -> Option<ItemId> {
        match self {
            Self::Idle => None,
            Self::SourceSelected { source } | Self::TargetSelected { source, .. } => Some(source),
        }
    }

    pub fn target(self) -> Option<ItemId> {
        match self {
            Self::TargetSelected { target, .. } => Some(target),
            Self::Idle | Self::SourceSelected { .. } => None,
        }
    }

    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }

    pub fn involves(self, item_id: ItemId) -> bool {
        self.source() == Some(item_id) || self.target() == Some(item_id)
    }
}
