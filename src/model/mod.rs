// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A document is an ordered item sequence plus relations between items. Items carry stable ids;
//! relations reference those ids and only resolve to labels when serialized.

pub mod document;
pub mod error;
pub mod fixtures;
pub mod ids;
pub mod item;
pub mod relation;

pub use document::Document;
pub use error::{EditError, ValidationError};
pub use fixtures::{sample_document, SAMPLE_SCRIPT};
pub use ids::{Id, IdAllocator, ItemId};
pub use item::{Item, ItemStore};
pub use relation::{Relation, RelationStore};
