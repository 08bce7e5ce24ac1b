use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::debug;

use crate::board::Board;
use crate::config::BoardConfig;
use crate::entity::NoteColor;
use crate::error::{BoardError, Result};
use crate::search::SearchFilter;
use crate::snapshot::{format_timestamp, parse_snapshot};
use crate::view::Surface;
use crate::warnings::check_snapshot;

use super::output::note_row;
use super::session::Session;

/// An explicit `--config` must exist; otherwise `./stickyboard.yaml` is
/// used when present.
pub fn load_config(path: Option<PathBuf>) -> Result<BoardConfig> {
    match path {
        Some(path) => BoardConfig::from_file(&path),
        None => {
            let cwd = std::env::current_dir()?;
            BoardConfig::load_or_default(&cwd)
        }
    }
}

pub fn handle_session(
    config: BoardConfig,
    import: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<()> {
    let mut board = Board::new(config, seed);

    if let Some(path) = import {
        let raw = fs::read_to_string(&path)?;
        let count = board.import_snapshot(&raw)?;
        for warning in check_snapshot(board.notes(), raw.len() as u64, board.config()) {
            eprintln!("{}", warning);
        }
        eprintln!("Imported {} notes from {}", count, path.display());
    }

    let interactive = atty::is(atty::Stream::Stdin);
    debug!(interactive, "starting session");
    if interactive {
        println!("stickyboard {} - type 'help' for commands", env!("CARGO_PKG_VERSION"));
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(Surface::new(board), stdin.lock(), stdout.lock())
        .interactive(interactive);
    session.run()
}

pub fn handle_inspect(
    config: BoardConfig,
    file: PathBuf,
    search: Option<String>,
    color: Option<String>,
    json: bool,
) -> Result<()> {
    let raw = fs::read_to_string(&file)?;
    let notes = parse_snapshot(&raw)?;

    for warning in check_snapshot(&notes, raw.len() as u64, &config) {
        eprintln!("{}", warning);
    }

    let mut filter = SearchFilter::term(search.unwrap_or_default());
    if let Some(color) = color {
        let color: NoteColor = color.parse().map_err(BoardError::InvalidArgument)?;
        filter = filter.with_color(color);
    }
    let matches = filter.apply(&notes);

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        if notes.is_empty() {
            println!("Snapshot is empty.");
        } else {
            println!("No matching notes.");
        }
        return Ok(());
    }

    for note in &matches {
        println!("{}", note_row(note));
    }
    println!();
    if !filter.is_empty() {
        println!("{} of {} notes match", matches.len(), notes.len());
    }
    if let Some(latest) = notes.iter().map(|n| n.updated_at).max() {
        println!("Last edited {}", format_timestamp(&latest));
    }
    Ok(())
}
