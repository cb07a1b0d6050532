// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Seqnotes CLI entrypoint.
//!
//! By default this runs the interactive TUI. `--print` runs headless: it optionally imports a
//! file and prints the diagram script to stdout.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use seqnotes::config::Config;
use seqnotes::editor::EditorController;
use seqnotes::format::ExportMode;
use seqnotes::logging::{self, LogConfig};
use seqnotes::store::{DirectorySink, WriteDurability};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "seqnotes", version)]
#[command(about = "Edit the participants and messages of a sequence diagram")]
struct Cli {
    /// Which representation to edit and export: `list` (comma-joined labels) or `script`.
    #[arg(long, value_parser = parse_mode)]
    mode: Option<ExportMode>,

    /// File to import at startup.
    #[arg(long, value_name = "FILE")]
    import: Option<PathBuf>,

    /// Directory exports are written to.
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Config file; defaults to `seqnotes.toml` or the user config directory.
    #[arg(long, value_name = "FILE", env = "SEQNOTES_CONFIG")]
    config: Option<PathBuf>,

    /// Log file, or a directory to put `seqnotes-<pid>.log` in.
    #[arg(long, value_name = "PATH", env = "SEQNOTES_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Start without the sample content.
    #[arg(long)]
    empty: bool,

    /// Fsync exports before reporting them written.
    #[arg(long)]
    durable_writes: bool,

    /// Print the diagram script and exit instead of starting the TUI.
    #[arg(long)]
    print: bool,
}

fn parse_mode(raw: &str) -> Result<ExportMode, String> {
    raw.parse().map_err(|err| format!("{err}"))
}

/// Flags win over the config file and environment.
fn resolve_settings(cli: &Cli, mut config: Config) -> Config {
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(dir) = &cli.export_dir {
        config.export_dir = dir.clone();
    }
    if let Some(path) = &cli.log_file {
        config.log_file = Some(path.clone());
    }
    if cli.empty {
        config.seed_sample = false;
    }
    config
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let cli = Cli::parse();
        let settings = resolve_settings(&cli, Config::load(cli.config.as_deref())?);

        let log_config = LogConfig { log_file_path: settings.log_file.clone() };
        let _log_guard = match logging::init(log_config) {
            Ok(guard) => Some(guard),
            Err(err) => {
                eprintln!("seqnotes: logging disabled: {err}");
                None
            }
        };
        info!(mode = %settings.mode, export_dir = %settings.export_dir.display(), "starting");

        let mut editor = EditorController::new(settings.mode, settings.seed_sample);

        if cli.print {
            if let Some(path) = &cli.import {
                editor.import_file(path)?;
            }
            print!("{}", editor.diagram_script());
            return Ok(());
        }

        if let Some(path) = &cli.import {
            editor.begin_import(path)?;
        }
        let durability = if cli.durable_writes {
            WriteDurability::Durable
        } else {
            WriteDurability::BestEffort
        };
        let sink = DirectorySink::new(settings.export_dir).with_durability(durability);
        seqnotes::tui::run(editor, sink)
    })();

    if let Err(err) = result {
        eprintln!("seqnotes: {err}");
        std::process::exit(1);
    }
}
