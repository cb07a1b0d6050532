// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editing session state: the document or script being edited, relation selection, draft input,
//! and the export/import plumbing around them.
//!
//! The controller is UI-agnostic; the TUI maps key presses onto these methods and renders from
//! the accessors.

mod script_buffer;
mod selection;

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::format::{
    project_sequence_diagram, ExportMode, LabelListCodec, RawScriptCodec, TextCodec,
};
use crate::model::{sample_document, Document, EditError, ItemId, ValidationError, SAMPLE_SCRIPT};
use crate::ops::{apply_ops, ApplyResult, Op};
use crate::store::{read_artifact, spawn_read, ArtifactSink, PendingRead, StoreError};

pub use script_buffer::ScriptBuffer;
pub use selection::Selection;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot read import: {0}")]
    Read(#[from] StoreError),
    #[error("import is not UTF-8 text: {0}")]
    Decode(#[from] FromUtf8Error),
    #[error("import could not be applied: {0}")]
    Rejected(#[from] EditError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A one-line message for the user about the last export or import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

#[derive(Debug)]
pub struct EditorController {
    mode: ExportMode,
    document: Document,
    script: ScriptBuffer,
    selection: Selection,
    draft_item: String,
    draft_relation: String,
    pending_imports: Vec<PendingRead>,
    notice: Option<Notice>,
}

impl EditorController {
    /// An editor for `mode`. With `seed_sample` the list starts with the sample participants and
    /// the script with the sample diagram.
    pub fn new(mode: ExportMode, seed_sample: bool) -> Self {
        let (document, script) = if seed_sample {
            (sample_document(), ScriptBuffer::new(SAMPLE_SCRIPT))
        } else {
            (Document::default(), ScriptBuffer::default())
        };
        Self::with_state(mode, document, script)
    }

    pub fn with_state(mode: ExportMode, document: Document, script: ScriptBuffer) -> Self {
        Self {
            mode,
            document,
            script,
            selection: Selection::Idle,
            draft_item: String::new(),
            draft_relation: String::new(),
            pending_imports: Vec::new(),
            notice: None,
        }
    }

    pub fn mode(&self) -> ExportMode {
        self.mode
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn script(&self) -> &ScriptBuffer {
        &self.script
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Changes whenever anything visible in the diagram view may have changed.
    pub fn rev(&self) -> u64 {
        self.document.rev().wrapping_add(self.script.rev())
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn draft_item(&self) -> &str {
        &self.draft_item
    }

    pub fn draft_item_mut(&mut self) -> &mut String {
        &mut self.draft_item
    }

    pub fn draft_relation(&self) -> &str {
        &self.draft_relation
    }

    pub fn draft_relation_mut(&mut self) -> &mut String {
        &mut self.draft_relation
    }

    pub fn add_item(&mut self, label: &str) -> Result<ApplyResult, EditError> {
        self.apply(Op::AddItem { label: label.to_owned() })
    }

    /// Adds the item draft and clears it. A rejected draft stays for the user to fix.
    pub fn submit_item_draft(&mut self) -> Result<ApplyResult, EditError> {
        let draft = self.draft_item.clone();
        let result = self.add_item(&draft)?;
        self.draft_item.clear();
        Ok(result)
    }

    pub fn remove_item(&mut self, position: usize) -> Result<ApplyResult, EditError> {
        let removed_id = self.document.items().get(position).map(|item| item.item_id());
        let result = self.apply(Op::RemoveItem { position })?;
        if removed_id.is_some_and(|item_id| self.selection.involves(item_id)) {
            debug!(position, "selected item removed; selection reset");
            self.selection = Selection::Idle;
        }
        Ok(result)
    }

    /// Moves the item at `source` to `destination`. `None` means the gesture was cancelled.
    pub fn reorder(
        &mut self,
        source: usize,
        destination: Option<usize>,
    ) -> Result<ApplyResult, EditError> {
        self.apply(Op::MoveItem { source, destination })
    }

    pub fn rename_item(&mut self, position: usize, label: &str) -> Result<ApplyResult, EditError> {
        self.apply(Op::RenameItem { position, label: label.to_owned() })
    }

    /// Starts a relation at the item at `position`, discarding any earlier pick.
    pub fn select_source(&mut self, position: usize) -> Result<(), EditError> {
        let source = self.endpoint_at(position)?;
        self.selection = Selection::SourceSelected { source };
        Ok(())
    }

    /// Picks the relation target. Needs a source; picking again replaces the target.
    pub fn select_target(&mut self, position: usize) -> Result<(), EditError> {
        let target = self.endpoint_at(position)?;
        let source = self.selection.source().ok_or(ValidationError::MissingSource)?;
        self.selection = Selection::TargetSelected { source, target };
        Ok(())
    }

    /// Records the relation between the selected items and returns to [`Selection::Idle`].
    ///
    /// Nothing changes on error, including the selection.
    pub fn submit_relation_text(&mut self, text: &str) -> Result<ApplyResult, EditError> {
        let result = self.apply(Op::AddRelation {
            source: self.selection.source(),
            target: self.selection.target(),
            text: text.to_owned(),
        })?;
        self.selection = Selection::Idle;
        Ok(result)
    }

    pub fn submit_relation_draft(&mut self) -> Result<ApplyResult, EditError> {
        let draft = self.draft_relation.clone();
        let result = self.submit_relation_text(&draft)?;
        self.draft_relation.clear();
        Ok(result)
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::Idle;
    }

    pub fn insert_char(&mut self, ch: char) {
        self.script.insert_char(ch);
    }

    pub fn insert_newline(&mut self) {
        self.script.insert_newline();
    }

    pub fn script_mut(&mut self) -> &mut ScriptBuffer {
        &mut self.script
    }

    /// Text for the diagram view.
    pub fn diagram_script(&self) -> Cow<'_, str> {
        match self.mode {
            ExportMode::Labels => Cow::Owned(project_sequence_diagram(&self.document)),
            ExportMode::Script => Cow::Borrowed(self.script.text()),
        }
    }

    /// The exported text for the current mode.
    pub fn encode_export(&self) -> String {
        match self.mode {
            ExportMode::Labels => LabelListCodec.encode_labels(&self.document.items().snapshot()),
            ExportMode::Script => RawScriptCodec.encode(&self.script.text().to_owned()),
        }
    }

    /// Encodes the current state and hands it to `sink` under the mode's file name.
    pub fn export(&mut self, sink: &mut dyn ArtifactSink) -> Result<PathBuf, StoreError> {
        let file_name = self.mode.file_name();
        let text = self.encode_export();
        match sink.deliver(file_name, text.as_bytes()) {
            Ok(path) => {
                info!(path = %path.display(), bytes = text.len(), "exported");
                self.notice = Some(Notice::info(format!("exported {}", path.display())));
                Ok(path)
            }
            Err(err) => {
                warn!(file_name, error = %err, "export failed");
                self.notice = Some(Notice::error(format!("export failed: {err}")));
                Err(err)
            }
        }
    }

    /// Replaces the items (labels mode) or the script (script mode) with the decoded `bytes`.
    ///
    /// On failure the editor is untouched and the error is also left as a notice.
    pub fn import(&mut self, bytes: Vec<u8>) -> Result<(), ImportError> {
        match self.replace_from(bytes) {
            Ok(message) => {
                self.notice = Some(Notice::info(message));
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "import rejected");
                self.notice = Some(Notice::error(err.to_string()));
                Err(err)
            }
        }
    }

    fn replace_from(&mut self, bytes: Vec<u8>) -> Result<String, ImportError> {
        let text = String::from_utf8(bytes)?;
        match self.mode {
            ExportMode::Labels => {
                let labels = LabelListCodec.decode(&text);
                let count = labels.len();
                // Fresh ids: every relation and the selection refer to items that are gone.
                self.apply(Op::ReplaceItems { labels })?;
                self.selection = Selection::Idle;
                info!(items = count, "imported labels");
                Ok(format!("imported {count} items"))
            }
            ExportMode::Script => {
                let script = RawScriptCodec.decode(&text);
                info!(bytes = script.len(), "imported script");
                self.script.set_text(script);
                Ok("imported script".to_owned())
            }
        }
    }

    /// Reads `path` and imports it, blocking until done.
    pub fn import_file(&mut self, path: &Path) -> Result<(), ImportError> {
        match read_artifact(path) {
            Ok(bytes) => self.import(bytes),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "import read failed");
                self.notice = Some(Notice::error(format!("import failed: {err}")));
                Err(err.into())
            }
        }
    }

    /// Starts reading `path` in the background. The result is applied by [`Self::poll_imports`].
    ///
    /// Edits made before it lands are overwritten by it.
    pub fn begin_import(&mut self, path: impl Into<PathBuf>) -> Result<(), ImportError> {
        let pending = spawn_read(path)?;
        debug!(path = %pending.path().display(), "import started");
        self.pending_imports.push(pending);
        Ok(())
    }

    pub fn has_pending_imports(&self) -> bool {
        !self.pending_imports.is_empty()
    }

    /// Applies every background import whose read has finished since the last poll.
    ///
    /// Imports land in completion order; reads that finished before the same poll land in start
    /// order. Returns how many finished, successful or not.
    pub fn poll_imports(&mut self) -> usize {
        let mut finished = Vec::new();
        self.pending_imports.retain(|pending| match pending.try_take() {
            Some(result) => {
                finished.push(result);
                false
            }
            None => true,
        });

        let count = finished.len();
        for result in finished {
            match result {
                Ok(bytes) => {
                    // Already reported through the notice.
                    let _ = self.import(bytes);
                }
                Err(err) => {
                    self.notice = Some(Notice::error(format!("import failed: {err}")));
                }
            }
        }
        count
    }

    fn apply(&mut self, op: Op) -> Result<ApplyResult, EditError> {
        apply_ops(&mut self.document, std::slice::from_ref(&op))
    }

    /// Items with a blank label (possible after an import) cannot take part in a relation.
    fn endpoint_at(&self, position: usize) -> Result<ItemId, EditError> {
        let item = self
            .document
            .items()
            .get(position)
            .ok_or(EditError::Range { position, len: self.document.items().len() })?;
        if item.label().trim().is_empty() {
            return Err(ValidationError::EmptyEndpoint.into());
        }
        Ok(item.item_id())
    }
}

#[cfg(test)]
mod tests;
