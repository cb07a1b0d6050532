// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("refusing to write through symlink at {path:?}")]
    SymlinkRefused { path: PathBuf },
    #[error("background read of {path:?} stopped before finishing")]
    ReadAbandoned { path: PathBuf },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Writes a temp file and renames atomically into place, without fsync.
    #[default]
    BestEffort,

    /// Also flushes the file and (on unix) the parent directory to stable storage.
    Durable,
}

/// Receives exported artifacts. The UI's "download" step.
pub trait ArtifactSink {
    /// Stores `contents` under `file_name` and returns where it ended up.
    fn deliver(&mut self, file_name: &str, contents: &[u8]) -> Result<PathBuf, StoreError>;
}

/// Writes artifacts into a directory, replacing files of the same name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    durability: WriteDurability,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), durability: WriteDurability::default() }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirectorySink {
    fn deliver(&mut self, file_name: &str, contents: &[u8]) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir)
            .map_err(|source| StoreError::Io { path: self.dir.clone(), source })?;
        let path = self.dir.join(file_name);
        write_atomic(&path, contents, self.durability)?;
        debug!(path = %path.display(), bytes = contents.len(), "delivered artifact");
        Ok(path)
    }
}

/// Reads a whole file. No size limit is enforced.
pub fn read_artifact(path: &Path) -> Result<Vec<u8>, StoreError> {
    fs::read(path).map_err(|source| StoreError::Io { path: path.to_path_buf(), source })
}

/// Writes `contents` to `path` via a sibling temp file and a rename.
pub fn write_atomic(
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused { path: path.to_path_buf() });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => return Err(StoreError::Io { path: path.to_path_buf(), source }),
    }

    let Some(parent) = path.parent() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no parent"),
        });
    };
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let tmp_path =
        parent.join(format!(".seqnotes.tmp.{}.{}", file_name.to_string_lossy(), nanos));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;

    file.write_all(contents).map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;
    }
    drop(file);

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io { path: path.to_path_buf(), source });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent)
                .map_err(|source| StoreError::Io { path: parent.to_path_buf(), source })?;
            dir.sync_all()
                .map_err(|source| StoreError::Io { path: parent.to_path_buf(), source })?;
        }
    }

    Ok(())
}

/// A file read running on a background thread.
///
/// There is no cancellation: once started, the read runs to completion and its result waits
/// in the channel until someone polls it.
#[derive(Debug)]
pub struct PendingRead {
    path: PathBuf,
    rx: Receiver<Result<Vec<u8>, StoreError>>,
}

impl PendingRead {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the result once the read has finished, `None` while it is still running.
    pub fn try_take(&self) -> Option<Result<Vec<u8>, StoreError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(Err(StoreError::ReadAbandoned { path: self.path.clone() }))
            }
        }
    }

    /// Blocks until the read finishes.
    pub fn wait(self) -> Result<Vec<u8>, StoreError> {
        self.rx.recv().unwrap_or(Err(StoreError::ReadAbandoned { path: self.path }))
    }
}

/// Starts reading `path` on a named worker thread.
pub fn spawn_read(path: impl Into<PathBuf>) -> Result<PendingRead, StoreError> {
    let path = path.into();
    let (tx, rx) = mpsc::channel();

    std::thread::Builder::new()
        .name("seqnotes-import".to_owned())
        .spawn({
            let path = path.clone();
            move || {
                let result = read_artifact(&path);
                if let Err(err) = &result {
                    warn!(path = %path.display(), error = %err, "import read failed");
                }
                // The receiver may be gone if the editor shut down; nothing to do then.
                let _ = tx.send(result);
            }
        })
        .map_err(|source| StoreError::Io { path: path.clone(), source })?;

    Ok(PendingRead { path, rx })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::{read_artifact, spawn_read, write_atomic, ArtifactSink, DirectorySink, StoreError};
    use super::WriteDurability;

    #[fixture]
    fn tmp() -> TempDir {
        tempfile::tempdir().expect("tempdir")
    }

    #[rstest]
    fn directory_sink_writes_named_file(tmp: TempDir) {
        let mut sink = DirectorySink::new(tmp.path().join("exports"));
        let path = sink.deliver("MermaidNotes.txt", b"A,B,C").expect("deliver");

        assert_eq!(path, tmp.path().join("exports").join("MermaidNotes.txt"));
        assert_eq!(fs::read_to_string(&path).expect("read"), "A,B,C");
    }

    #[rstest]
    #[case(WriteDurability::BestEffort)]
    #[case(WriteDurability::Durable)]
    fn write_atomic_replaces_existing_contents(tmp: TempDir, #[case] durability: WriteDurability) {
        let path = tmp.path().join("out.txt");
        write_atomic(&path, b"first", durability).expect("write");
        write_atomic(&path, b"second", durability).expect("write");

        assert_eq!(fs::read(&path).expect("read"), b"second");
        let leftovers = fs::read_dir(tmp.path())
            .expect("read dir")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with(".seqnotes.tmp."))
            .count();
        assert_eq!(leftovers, 0);
    }

    #[cfg(unix)]
    #[rstest]
    fn write_atomic_refuses_symlink_targets(tmp: TempDir) {
        let real = tmp.path().join("real.txt");
        fs::write(&real, "x").expect("write");
        let link = tmp.path().join("link.txt");
        std::os::unix::fs::symlink(&real, &link).expect("symlink");

        let err = write_atomic(&link, b"y", WriteDurability::BestEffort).unwrap_err();
        assert!(matches!(err, StoreError::SymlinkRefused { .. }));
        assert_eq!(fs::read_to_string(&real).expect("read"), "x");
    }

    #[rstest]
    fn read_artifact_reports_missing_file(tmp: TempDir) {
        let err = read_artifact(&tmp.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[rstest]
    fn spawn_read_delivers_contents(tmp: TempDir) {
        let path = tmp.path().join("in.txt");
        fs::write(&path, "X,Y,Z").expect("write");

        let pending = spawn_read(&path).expect("spawn");
        assert_eq!(pending.path(), path.as_path());
        assert_eq!(pending.wait().expect("read"), b"X,Y,Z");
    }

    #[rstest]
    fn spawn_read_delivers_errors(tmp: TempDir) {
        let pending = spawn_read(tmp.path().join("missing.txt")).expect("spawn");
        assert!(matches!(pending.wait(), Err(StoreError::Io { .. })));
    }
}
