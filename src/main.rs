//! qr-history: command-line front-end.
//!
//! Generates QR codes, keeps the history in the platform data directory, and
//! downloads or exports entries into the current (or a given) directory.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use qr_history::app::App;
use qr_history::logging;
use qr_history::services::settings_engine::SettingsEngineTrait;
use qr_history::types::errors::AppError;
use qr_history::types::notification::NotificationKind;
use qr_history::types::qr::ErrorCorrection;

#[derive(Parser)]
#[command(name = "qr-history", version, about = "QR code generator with a local history")]
struct Cli {
    /// Directory holding the persisted history
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Path to the settings file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a link and add it to the history
    Generate {
        link: String,
        /// Dark module color, e.g. #000000
        #[arg(long)]
        fg: Option<String>,
        /// Light module color, e.g. #ffffff
        #[arg(long)]
        bg: Option<String>,
        /// Minimum image edge in pixels
        #[arg(long)]
        size: Option<u32>,
        /// Error correction level: L, M, Q or H
        #[arg(long)]
        level: Option<ErrorCorrection>,
        /// Also write the PNG into this directory
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Show the history, newest first
    List,
    /// Write the current QR, or a history entry, as a PNG
    Download {
        /// Display position from `list`
        #[arg(long)]
        index: Option<usize>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Remove one history entry by display position
    Delete { index: usize },
    /// Remove every history entry
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Write the whole history as a JSON file
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn prompt_yes_no(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn run(cli: Cli) -> Result<(), AppError> {
    // No notifier exists yet, so an open failure is printed directly
    let mut app = App::open(cli.data_dir.as_deref(), cli.config).map_err(|e| {
        eprintln!("{}", e);
        e
    })?;

    let result = match cli.command {
        Command::Generate { link, fg, bg, size, level, save } => {
            let mut style = app.settings_engine.get_settings().qr.clone();
            if let Some(fg) = fg {
                style.foreground = fg;
            }
            if let Some(bg) = bg {
                style.background = bg;
            }
            if let Some(size) = size {
                style.size = size;
            }
            if let Some(level) = level {
                style.error_correction = level;
            }
            app.generate_with_style(&link, &style).and_then(|_| match save {
                Some(dir) => app.download_current(Some(&dir)).map(|path| {
                    println!("{}", path.display());
                }),
                None => Ok(()),
            })
        }
        Command::List => {
            println!("{}", app.history_view().render_text());
            return Ok(());
        }
        Command::Download { index, out } => {
            let written = match index {
                Some(i) => app.download_from_history(i, out.as_deref()),
                None => app.download_current(out.as_deref()),
            };
            written.map(|path| println!("{}", path.display()))
        }
        Command::Delete { index } => app.remove_from_history(index).map(|_| ()),
        Command::Clear { yes } => {
            let confirm = |prompt: &str| yes || prompt_yes_no(prompt);
            app.clear_history(&confirm).map(|_| ())
        }
        Command::Export { out } => app
            .export_history(out.as_deref())
            .map(|path| println!("{}", path.display())),
    };

    if let Some(note) = app.notifier.latest() {
        match note.kind {
            NotificationKind::Success => println!("{}", note.message),
            NotificationKind::Error => eprintln!("{}", note.message),
        }
    }
    result
}

fn main() -> ExitCode {
    logging::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
