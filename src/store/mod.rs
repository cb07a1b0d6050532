// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Byte I/O for exported and imported artifacts.
//!
//! Exports are delivered through an [`ArtifactSink`]; the default sink writes atomically into a
//! directory. Imports are read in full, either synchronously or on a background thread.

pub mod artifact;

pub use artifact::{
    read_artifact, spawn_read, write_atomic, ArtifactSink, DirectorySink, PendingRead, StoreError,
    WriteDurability,
};
