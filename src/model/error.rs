// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use thiserror::Error;

/// Why an edit was rejected. A rejected edit never changes state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("position {position} is out of range (len={len})")]
    Range { position: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("item label must not be empty")]
    EmptyLabel,
    #[error("relation text must not be empty")]
    EmptyRelationText,
    #[error("relation source is not set")]
    MissingSource,
    #[error("relation target is not set")]
    MissingTarget,
    #[error("relation endpoint has an empty label")]
    EmptyEndpoint,
}

pub(crate) fn check_position(position: usize, len: usize) -> Result<(), EditError> {
    if position >= len {
        return Err(EditError::Range { position, len });
    }
    Ok(())
}
