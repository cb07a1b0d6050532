// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Seqnotes: an ordered participant list with labeled relations, edited in the terminal and
//! exported as plain text.
//!
//! Two editors share the same shell. The list editor keeps items and relations and exports the
//! item labels comma-joined; the script editor keeps a free-text sequence diagram and exports it
//! verbatim.

pub mod config;
pub mod editor;
pub mod format;
pub mod logging;
pub mod model;
pub mod ops;
pub mod store;
pub mod tui;
