// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! File logging.
//!
//! The terminal belongs to the TUI, so logs only ever go to a file.
//!
//! Filter priority: `SEQNOTES_LOG` > `RUST_LOG` > `warn`. A bare level in `SEQNOTES_LOG`
//! (`SEQNOTES_LOG=debug`) applies to this crate only; anything with directive syntax is used
//! as-is.
//!
//! Default file: `<data_local_dir>/seqnotes/logs/seqnotes-<pid>.log`. A `--log-file` path with an
//! extension is used as the file, one without is used as the directory.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

pub const ENV_LOG: &str = "SEQNOTES_LOG";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Keeps the background writer alive; dropping it flushes pending lines.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Debug, Default, Clone)]
pub struct LogConfig {
    pub log_file_path: Option<PathBuf>,
}

pub fn init(config: LogConfig) -> Result<LogGuard, BoxError> {
    let (log_dir, file_name) = resolve_log_path(config.log_file_path.as_deref());
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &file_name);
    let (writer, file_guard) = tracing_appender::non_blocking(file_appender);

    let filter = create_filter(|key| std::env::var(key).ok());
    let file_layer = fmt::layer().with_writer(writer).with_ansi(false).with_filter(filter);

    Registry::default().with(file_layer).try_init()?;

    Ok(LogGuard { _file_guard: file_guard, log_file: log_dir.join(file_name) })
}

/// Test logging to the captured test output. Safe to call from every test.
pub fn test() {
    let filter = create_filter(|key| std::env::var(key).ok());
    let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
}

fn resolve_log_path(override_path: Option<&Path>) -> (PathBuf, String) {
    let file_name = format!("seqnotes-{}.log", std::process::id());

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or(file_name);
            return (dir.to_path_buf(), name);
        }
        return (path.to_path_buf(), file_name);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("seqnotes")
        .join("logs");
    (dir, file_name)
}

fn create_filter(lookup: impl Fn(&str) -> Option<String>) -> EnvFilter {
    EnvFilter::new(filter_directives(lookup))
}

fn filter_directives(lookup: impl Fn(&str) -> Option<String>) -> String {
    if let Some(level) = lookup(ENV_LOG) {
        if level.contains(['=', ':', ',']) {
            return level;
        }
        return format!("warn,seqnotes={level}");
    }
    if let Some(rust_log) = lookup("RUST_LOG") {
        return rust_log;
    }
    "warn".to_owned()
}
