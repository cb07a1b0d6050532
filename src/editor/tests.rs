// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use rstest::{fixture, rstest};

use super::{EditorController, ImportError, NoticeLevel, Selection};
use crate::format::ExportMode;
use crate::model::{EditError, ValidationError};
use crate::store::{ArtifactSink, StoreError};

#[derive(Default)]
struct MemorySink {
    delivered: Vec<(String, Vec<u8>)>,
}

impl ArtifactSink for MemorySink {
    fn deliver(&mut self, file_name: &str, contents: &[u8]) -> Result<PathBuf, StoreError> {
        self.delivered.push((file_name.to_owned(), contents.to_vec()));
        Ok(PathBuf::from(file_name))
    }
}

struct FailingSink;

impl ArtifactSink for FailingSink {
    fn deliver(&mut self, file_name: &str, _contents: &[u8]) -> Result<PathBuf, StoreError> {
        Err(StoreError::SymlinkRefused { path: PathBuf::from(file_name) })
    }
}

#[fixture]
fn list_editor() -> EditorController {
    EditorController::new(ExportMode::Labels, false)
}

#[fixture]
fn sample_editor() -> EditorController {
    EditorController::new(ExportMode::Labels, true)
}

fn labels(editor: &EditorController) -> Vec<String> {
    editor.document().items().snapshot().into_iter().map(ToOwned::to_owned).collect()
}

fn wait_for_imports(editor: &mut EditorController) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while editor.has_pending_imports() {
        editor.poll_imports();
        assert!(Instant::now() < deadline, "import did not finish in time");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[rstest]
fn add_then_export_writes_comma_joined_labels(mut list_editor: EditorController) {
    for label in ["A", "B", "C"] {
        list_editor.add_item(label).expect("add");
    }

    let mut sink = MemorySink::default();
    list_editor.export(&mut sink).expect("export");

    assert_eq!(sink.delivered, vec![("MermaidNotes.txt".to_owned(), b"A,B,C".to_vec())]);
    assert_eq!(list_editor.notice().map(|n| n.level), Some(NoticeLevel::Info));
}

#[rstest]
fn import_replaces_items(mut sample_editor: EditorController) {
    sample_editor.import(b"X,Y,Z".to_vec()).expect("import");

    assert_eq!(labels(&sample_editor), ["X", "Y", "Z"]);
    assert!(sample_editor.document().relations().is_empty());
}

#[rstest]
fn import_of_invalid_utf8_leaves_state_untouched(mut sample_editor: EditorController) {
    let before = labels(&sample_editor);
    let rev = sample_editor.rev();

    let err = sample_editor.import(vec![0x41, 0xff, 0x42]).unwrap_err();

    assert!(matches!(err, ImportError::Decode(_)));
    assert_eq!(labels(&sample_editor), before);
    assert_eq!(sample_editor.rev(), rev);
    assert_eq!(sample_editor.notice().map(|n| n.level), Some(NoticeLevel::Error));
}

#[rstest]
fn relation_flow_returns_to_idle(mut sample_editor: EditorController) {
    let relations_before = sample_editor.document().relations().len();

    sample_editor.select_source(0).expect("source");
    assert!(matches!(sample_editor.selection(), Selection::SourceSelected { .. }));
    sample_editor.select_target(2).expect("target");
    assert!(matches!(sample_editor.selection(), Selection::TargetSelected { .. }));

    sample_editor.submit_relation_text("ping").expect("submit");

    assert_eq!(sample_editor.selection(), Selection::Idle);
    let relations = sample_editor.document().relations().snapshot();
    assert_eq!(relations.len(), relations_before + 1);
    let added = &relations[relations_before];
    assert_eq!(added.text(), "ping");
    assert_eq!(sample_editor.document().items().label_of(added.source()), Some("Alice"));
    assert_eq!(sample_editor.document().items().label_of(added.target()), Some("Bob"));
}

#[rstest]
fn empty_relation_text_keeps_target_selected(mut sample_editor: EditorController) {
    sample_editor.select_source(0).expect("source");
    sample_editor.select_target(1).expect("target");
    let selection = sample_editor.selection();
    let relations_before = sample_editor.document().relations().len();

    let err = sample_editor.submit_relation_text("   ").unwrap_err();

    assert_eq!(err, EditError::Validation(ValidationError::EmptyRelationText));
    assert_eq!(sample_editor.selection(), selection);
    assert_eq!(sample_editor.document().relations().len(), relations_before);
}

#[rstest]
fn selecting_target_while_idle_is_rejected(mut sample_editor: EditorController) {
    let err = sample_editor.select_target(1).unwrap_err();
    assert_eq!(err, EditError::Validation(ValidationError::MissingSource));
    assert_eq!(sample_editor.selection(), Selection::Idle);
}

#[rstest]
fn submitting_without_target_is_rejected(mut sample_editor: EditorController) {
    sample_editor.select_source(1).expect("source");
    let err = sample_editor.submit_relation_text("hi").unwrap_err();
    assert_eq!(err, EditError::Validation(ValidationError::MissingTarget));
}

#[rstest]
fn selecting_out_of_range_is_a_range_error(mut sample_editor: EditorController) {
    let err = sample_editor.select_source(9).unwrap_err();
    assert_eq!(err, EditError::Range { position: 9, len: 3 });
}

#[rstest]
fn clear_selection_returns_to_idle(mut sample_editor: EditorController) {
    sample_editor.select_source(0).expect("source");
    sample_editor.clear_selection();
    assert!(sample_editor.selection().is_idle());
}

#[rstest]
fn edits_keep_selection(mut sample_editor: EditorController) {
    sample_editor.select_source(0).expect("source");
    let selection = sample_editor.selection();

    sample_editor.add_item("Dana").expect("add");
    sample_editor.reorder(0, Some(3)).expect("reorder");
    sample_editor.rename_item(1, "Johnny").expect("rename");

    assert_eq!(sample_editor.selection(), selection);
}

#[rstest]
fn removing_selected_item_resets_selection(mut sample_editor: EditorController) {
    sample_editor.select_source(0).expect("source");
    sample_editor.select_target(1).expect("target");

    sample_editor.remove_item(1).expect("remove");

    assert_eq!(sample_editor.selection(), Selection::Idle);
}

#[rstest]
fn removing_unselected_item_keeps_selection(mut sample_editor: EditorController) {
    sample_editor.select_source(0).expect("source");
    sample_editor.remove_item(2).expect("remove");
    assert!(matches!(sample_editor.selection(), Selection::SourceSelected { .. }));
}

#[rstest]
fn reorder_moves_item(mut list_editor: EditorController) {
    for label in ["A", "B", "C"] {
        list_editor.add_item(label).expect("add");
    }

    list_editor.reorder(0, Some(2)).expect("reorder");
    assert_eq!(labels(&list_editor), ["B", "C", "A"]);

    let rev = list_editor.rev();
    list_editor.reorder(1, None).expect("cancelled");
    assert_eq!(labels(&list_editor), ["B", "C", "A"]);
    assert_eq!(list_editor.rev(), rev);
}

#[rstest]
fn item_draft_is_cleared_only_on_success(mut list_editor: EditorController) {
    list_editor.draft_item_mut().push_str("   ");
    assert!(list_editor.submit_item_draft().is_err());
    assert_eq!(list_editor.draft_item(), "   ");

    list_editor.draft_item_mut().clear();
    list_editor.draft_item_mut().push_str("Eve");
    list_editor.submit_item_draft().expect("submit");
    assert_eq!(list_editor.draft_item(), "");
    assert_eq!(labels(&list_editor), ["Eve"]);
}

#[rstest]
fn relation_draft_is_cleared_only_on_success(mut sample_editor: EditorController) {
    sample_editor.draft_relation_mut().push_str("hello");
    assert!(sample_editor.submit_relation_draft().is_err());
    assert_eq!(sample_editor.draft_relation(), "hello");

    sample_editor.select_source(0).expect("source");
    sample_editor.select_target(1).expect("target");
    sample_editor.submit_relation_draft().expect("submit");
    assert_eq!(sample_editor.draft_relation(), "");
}

#[test]
fn script_mode_exports_and_imports_verbatim() {
    let mut editor = EditorController::new(ExportMode::Script, true);
    let mut sink = MemorySink::default();
    editor.export(&mut sink).expect("export");

    let (file_name, contents) = &sink.delivered[0];
    assert_eq!(file_name, "sequencediagram.txt");
    assert_eq!(contents.as_slice(), crate::model::SAMPLE_SCRIPT.as_bytes());

    editor.import(b"sequenceDiagram\n  A->>B: x\n".to_vec()).expect("import");
    assert_eq!(editor.diagram_script(), "sequenceDiagram\n  A->>B: x\n");
}

#[test]
fn script_mode_newline_auto_indents() {
    let mut editor = EditorController::new(ExportMode::Script, false);
    for ch in "    A->>B: hi".chars() {
        editor.insert_char(ch);
    }
    editor.insert_newline();
    editor.insert_char('x');

    assert_eq!(editor.script().text(), "    A->>B: hi\n    x");
}

#[rstest]
fn list_mode_diagram_script_follows_items(mut list_editor: EditorController) {
    list_editor.add_item("Ann").expect("add");
    let script = list_editor.diagram_script();
    assert!(script.starts_with("sequenceDiagram\n"));
    assert!(script.contains("participant p0 as Ann"));
}

#[rstest]
fn failed_export_leaves_error_notice(mut sample_editor: EditorController) {
    assert!(sample_editor.export(&mut FailingSink).is_err());
    assert_eq!(sample_editor.notice().map(|n| n.level), Some(NoticeLevel::Error));
    assert_eq!(labels(&sample_editor), ["Alice", "John", "Bob"]);
}

#[rstest]
fn pending_import_overwrites_later_edits(mut sample_editor: EditorController) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("MermaidNotes.txt");
    fs::write(&path, "X,Y,Z").expect("write");

    sample_editor.begin_import(&path).expect("begin");
    sample_editor.add_item("Late").expect("add");
    wait_for_imports(&mut sample_editor);

    assert_eq!(labels(&sample_editor), ["X", "Y", "Z"]);
}

#[rstest]
fn failed_background_import_becomes_notice(mut sample_editor: EditorController) {
    let dir = tempfile::tempdir().expect("tempdir");

    sample_editor.begin_import(dir.path().join("missing.txt")).expect("begin");
    wait_for_imports(&mut sample_editor);

    assert_eq!(sample_editor.notice().map(|n| n.level), Some(NoticeLevel::Error));
    assert_eq!(labels(&sample_editor), ["Alice", "John", "Bob"]);
}

#[rstest]
fn import_file_reads_synchronously(mut list_editor: EditorController) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("in.txt");
    fs::write(&path, "Q,R").expect("write");

    list_editor.import_file(&path).expect("import");
    assert_eq!(labels(&list_editor), ["Q", "R"]);

    let err = list_editor.import_file(&dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, ImportError::Read(_)));
}

#[rstest]
fn blank_imported_item_cannot_be_a_relation_endpoint(mut list_editor: EditorController) {
    list_editor.import(b"A,,B".to_vec()).expect("import");
    assert_eq!(labels(&list_editor), ["A", "", "B"]);

    let err = list_editor.select_source(1).unwrap_err();
    assert_eq!(err, EditError::Validation(ValidationError::EmptyEndpoint));
    assert_eq!(list_editor.selection(), Selection::Idle);

    list_editor.select_source(0).expect("source");
    let err = list_editor.select_target(1).unwrap_err();
    assert_eq!(err, EditError::Validation(ValidationError::EmptyEndpoint));
    assert!(matches!(list_editor.selection(), Selection::SourceSelected { .. }));

    assert!(list_editor.submit_relation_text("hello").is_err());
    assert!(list_editor.document().relations().is_empty());
    assert!(!list_editor.diagram_script().contains("hello"));
}

#[rstest]
fn import_errors_share_one_notice_path(mut list_editor: EditorController) {
    let rejected = ImportError::from(EditError::Range { position: 4, len: 2 });
    assert!(matches!(rejected, ImportError::Rejected(_)));
    assert!(rejected.to_string().contains("position 4 is out of range"));

    list_editor.import(b"Q".to_vec()).expect("import");
    let notice = list_editor.take_notice().expect("notice");
    assert_eq!(notice.level, NoticeLevel::Info);
    assert_eq!(notice.message, "imported 1 items");
}
