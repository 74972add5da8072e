//! Command-line interface for strictly_board.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use strictly_board::StoreBackend;

/// Strictly Board - bingo boards you can shuffle, play and share
#[derive(Parser, Debug)]
#[command(name = "strictly_board")]
#[command(about = "Bingo board tool and board-sharing server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, global = true, default_value = strictly_board::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the board endpoint over HTTP
    Serve {
        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Store backend: memory, sqlite or upstash (overrides config)
        #[arg(long)]
        backend: Option<StoreBackend>,
    },

    /// Write the stock board to a file
    New {
        /// Output file
        #[arg(short, long, default_value = strictly_bingo::BOARD_FILE_NAME)]
        out: PathBuf,
    },

    /// Shuffle a board file in place, keeping the free space centered
    Shuffle {
        /// Board file
        #[arg(short, long, default_value = strictly_bingo::BOARD_FILE_NAME)]
        file: PathBuf,

        /// Seed for a repeatable shuffle
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Mark cells on a board file and report any win
    Play {
        /// Board file
        #[arg(short, long, default_value = strictly_bingo::BOARD_FILE_NAME)]
        file: PathBuf,

        /// Cell indices (0-24, row-major) to mark in order
        #[arg(required = true, num_args = 1..)]
        cells: Vec<usize>,
    },

    /// Save a board file to a board server and print its share link
    Push {
        /// Board file
        #[arg(short, long, default_value = strictly_bingo::BOARD_FILE_NAME)]
        file: PathBuf,

        /// Board server URL
        #[arg(long, default_value = "http://127.0.0.1:3000/")]
        server_url: String,

        /// Existing share link; the board is saved under its id
        #[arg(long)]
        share_url: Option<String>,
    },

    /// Fetch a shared board into a file
    Pull {
        /// Share link carrying a `board` parameter
        share_url: String,

        /// Board server URL
        #[arg(long, default_value = "http://127.0.0.1:3000/")]
        server_url: String,

        /// Output file
        #[arg(short, long, default_value = strictly_bingo::BOARD_FILE_NAME)]
        out: PathBuf,
    },

    /// Print the share link for a board id
    Share {
        /// Board id
        id: String,
    },
}
