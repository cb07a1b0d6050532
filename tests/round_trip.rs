// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Export to a directory, import back from disk, through the public API only.

use std::fs;

use rstest::{fixture, rstest};
use seqnotes::editor::{EditorController, ImportError};
use seqnotes::format::ExportMode;
use seqnotes::model::SAMPLE_SCRIPT;
use seqnotes::store::DirectorySink;
use tempfile::TempDir;

#[fixture]
fn export_dir() -> TempDir {
    seqnotes::logging::test();
    tempfile::tempdir().expect("tempdir")
}

fn labels(editor: &EditorController) -> Vec<String> {
    editor.document().items().snapshot().into_iter().map(ToOwned::to_owned).collect()
}

#[rstest]
fn labels_survive_export_and_import(export_dir: TempDir) {
    let mut editor = EditorController::new(ExportMode::Labels, false);
    for label in ["Alice", "Bob", "Carol"] {
        editor.add_item(label).expect("add");
    }
    editor.reorder(2, Some(0)).expect("reorder");

    let mut sink = DirectorySink::new(export_dir.path());
    let path = editor.export(&mut sink).expect("export");
    assert_eq!(path.file_name().and_then(|name| name.to_str()), Some("MermaidNotes.txt"));
    assert_eq!(fs::read_to_string(&path).expect("read"), "Carol,Alice,Bob");

    let mut fresh = EditorController::new(ExportMode::Labels, true);
    fresh.import_file(&path).expect("import");
    assert_eq!(labels(&fresh), ["Carol", "Alice", "Bob"]);
    assert!(fresh.document().relations().is_empty());
}

#[rstest]
fn script_survives_export_and_import(export_dir: TempDir) {
    let mut editor = EditorController::new(ExportMode::Script, true);
    editor.script_mut().set_cursor(usize::MAX);
    editor.insert_newline();
    for ch in "Alice->>Bob: bye".chars() {
        editor.insert_char(ch);
    }

    let mut sink = DirectorySink::new(export_dir.path());
    let path = editor.export(&mut sink).expect("export");
    assert_eq!(path.file_name().and_then(|name| name.to_str()), Some("sequencediagram.txt"));

    let mut fresh = EditorController::new(ExportMode::Script, false);
    fresh.import_file(&path).expect("import");
    assert_eq!(fresh.diagram_script(), editor.diagram_script());
    assert!(fresh.diagram_script().starts_with(SAMPLE_SCRIPT));
}

#[rstest]
fn exporting_twice_replaces_the_file(export_dir: TempDir) {
    let mut editor = EditorController::new(ExportMode::Labels, false);
    let mut sink = DirectorySink::new(export_dir.path());

    editor.add_item("A").expect("add");
    editor.export(&mut sink).expect("export");
    editor.add_item("B").expect("add");
    let path = editor.export(&mut sink).expect("export");

    assert_eq!(fs::read_to_string(path).expect("read"), "A,B");
}

#[rstest]
fn binary_import_is_rejected(export_dir: TempDir) {
    let path = export_dir.path().join("blob.txt");
    fs::write(&path, [0xc3, 0x28]).expect("write");

    let mut editor = EditorController::new(ExportMode::Labels, true);
    let err = editor.import_file(&path).unwrap_err();

    assert!(matches!(err, ImportError::Decode(_)));
    assert_eq!(labels(&editor), ["Alice", "John", "Bob"]);
}
