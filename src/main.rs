// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Matchtally CLI entrypoint.
//!
//! By default this runs the interactive TUI against the data folder. `--import`, `--export-json`
//! and `--export-csv` run once against the same folder and exit.

use std::error::Error;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use matchtally::model::Catalog;
use matchtally::ops::{self, ImportFormat, Startup};
use matchtally::store::{DataFolder, WriteDurability};

const DATA_DIR_ENV: &str = "MATCHTALLY_DATA_DIR";
const LOG_FILE: &str = "matchtally.log";
const DEFAULT_LOG_FILTER: &str = "matchtally=info,warn";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--data-dir <dir>] [--durable-writes]\n  {program} [--data-dir <dir>] --import <file.json|file.csv>\n  {program} [--data-dir <dir>] --export-json <file>\n  {program} [--data-dir <dir>] --export-csv <file>\n\nWithout --data-dir, ${DATA_DIR_ENV} is used, then the platform data directory.\n\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported)."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Tui,
    Import(PathBuf),
    ExportJson(PathBuf),
    ExportCsv(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    data_dir: Option<PathBuf>,
    durable_writes: bool,
    action: Action,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            data_dir: None,
            durable_writes: false,
            action: Action::Tui,
        }
    }
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data-dir" => {
                if options.data_dir.is_some() {
                    return Err(());
                }
                let dir = args.next().ok_or(())?;
                options.data_dir = Some(PathBuf::from(dir));
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            "--import" | "--export-json" | "--export-csv" => {
                if options.action != Action::Tui {
                    return Err(());
                }
                let path = PathBuf::from(args.next().ok_or(())?);
                options.action = match arg.as_str() {
                    "--import" => Action::Import(path),
                    "--export-json" => Action::ExportJson(path),
                    _ => Action::ExportCsv(path),
                };
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf, Box<dyn Error>> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|dir| dir.join("matchtally"))
        .ok_or_else(|| "cannot determine a data directory; pass --data-dir".into())
}

/// Logs to a file in the data folder; the terminal belongs to the TUI.
fn init_logging(dir: &Path) -> Result<WorkerGuard, Box<dyn Error>> {
    std::fs::create_dir_all(dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(dir)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()?;
    Ok(guard)
}

fn run(options: CliOptions) -> Result<(), Box<dyn Error>> {
    let data_dir = resolve_data_dir(options.data_dir)?;
    let _log_guard = match init_logging(&data_dir) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("matchtally: logging disabled: {err}");
            None
        }
    };

    let folder = if options.durable_writes {
        DataFolder::new(&data_dir).with_durability(WriteDurability::Durable)
    } else {
        DataFolder::new(&data_dir)
    };
    let catalog = Catalog::builtin();
    let now = Utc::now();
    let loaded = folder.load_all(&catalog, now);
    let Startup {
        mut state,
        ended_session,
    } = ops::startup(catalog, loaded, now);
    tracing::info!(dir = %data_dir.display(), matches = state.log.len(), "loaded data folder");

    match options.action {
        Action::Tui => matchtally::tui::run(state, Some(folder), ended_session),
        Action::Import(path) => {
            let format = ImportFormat::from_path(&path).ok_or_else(|| {
                format!("{}: expected a .json or .csv file", path.display())
            })?;
            let text = std::fs::read_to_string(&path)?;
            let report = ops::import_text(&mut state, format, &text, Utc::now())?;
            folder.save_state(&state)?;
            println!("{report}");
            Ok(())
        }
        Action::ExportJson(path) => {
            let json = ops::export_json(&state, Utc::now())?;
            std::fs::write(&path, json)?;
            println!("Exported {} matches to {}", state.log.len(), path.display());
            Ok(())
        }
        Action::ExportCsv(path) => {
            let csv = ops::export_csv_text(&state)?;
            std::fs::write(&path, csv)?;
            println!("Exported {} matches to {}", state.log.len(), path.display());
            Ok(())
        }
    }
}

fn main() {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "matchtally".to_owned());

    let options = match parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    if let Err(err) = run(options) {
        eprintln!("matchtally: {err}");
        std::process::exit(1);
    }
}
