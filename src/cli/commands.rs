use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stickyboard")]
#[command(version, about = "A freeform sticky-notes board")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (defaults to ./stickyboard.yaml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open an in-memory board and drive it with commands read from stdin
    Session {
        /// Load this snapshot before the first command
        #[arg(long, value_name = "FILE")]
        import: Option<PathBuf>,

        /// Seed for note placement and colors
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Validate a snapshot file and list its notes
    Inspect {
        /// Snapshot file (JSON array of notes)
        file: PathBuf,

        /// Only list notes whose content contains this text
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Only list notes with this color
        #[arg(long)]
        color: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
