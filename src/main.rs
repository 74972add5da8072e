//! Strictly Board - Unified CLI
//!
//! Bingo board editing, play and sharing, plus the board server.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use cli::{Cli, Command};
use std::path::{Path, PathBuf};
use strictly_bingo::{BingoGame, CellIndex, SeededRng, SystemRng, TriggerOutcome};
use strictly_board::{
    BingoApp, BoardConfig, BoardId, HttpBoardClient, StoreBackend, board_id_from_url,
    load_file, save_file, serve, with_board_id,
};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;
use url::Url;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,strictly_board=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = BoardConfig::load(&cli.config)?;
    debug!(?config, "Configuration resolved");

    match cli.command {
        Command::Serve {
            port,
            host,
            backend,
        } => run_server(config, host, port, backend).await,
        Command::New { out } => new_board(&out),
        Command::Shuffle { file, seed } => shuffle_board(&file, seed),
        Command::Play { file, cells } => play_board(&file, &cells),
        Command::Push {
            file,
            server_url,
            share_url,
        } => push_board(&config, file, &server_url, share_url.as_deref()).await,
        Command::Pull {
            share_url,
            server_url,
            out,
        } => pull_board(&config, &share_url, &server_url, out).await,
        Command::Share { id } => share_link(&config, &id),
    }
}

/// Run the board endpoint
#[instrument(skip(config))]
async fn run_server(
    config: BoardConfig,
    host: Option<String>,
    port: Option<u16>,
    backend: Option<StoreBackend>,
) -> Result<()> {
    let config = match backend {
        Some(backend) => config.with_backend(backend),
        None => config,
    };
    let host = host.unwrap_or_else(|| config.host().clone());
    let port = port.unwrap_or(*config.port());

    info!(backend = %config.backend(), "Starting board server");
    let service = config.board_service()?;

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;
    info!("Server ready at http://{}:{}/", host, port);

    serve(listener, service).await?;
    Ok(())
}

#[instrument]
fn new_board(out: &Path) -> Result<()> {
    save_file(BingoGame::new().board(), out)?;
    println!("Wrote stock board to {}", out.display());
    Ok(())
}

#[instrument]
fn shuffle_board(file: &Path, seed: Option<u64>) -> Result<()> {
    let mut game = BingoGame::with_board(load_file(file)?);
    match seed {
        Some(seed) => game.shuffle(&mut SeededRng::from_seed(seed), true)?,
        None => game.shuffle(&mut SystemRng, true)?,
    }
    save_file(game.board(), file)?;
    println!("{}", game.board().display());
    Ok(())
}

#[instrument]
fn play_board(file: &Path, cells: &[usize]) -> Result<()> {
    let mut game = BingoGame::with_board(load_file(file)?);
    let mut rng = SystemRng;
    game.enter_play();

    for &index in cells {
        let cell = CellIndex::try_from(index)?;
        if let TriggerOutcome::Won { prize, lines } = game.toggle(cell, &mut rng)? {
            let lines: Vec<String> = lines.iter().map(ToString::to_string).collect();
            println!("BINGO! ({}) You win: {}", lines.join(", "), prize);
        }
    }

    println!("{}", game.board().display());
    if let Some(session) = game.session() {
        let marked: Vec<String> = session.triggered().iter().map(ToString::to_string).collect();
        println!("Marked: {}", marked.join(" "));
    }
    if !game.has_won() {
        println!("No bingo yet");
    }
    Ok(())
}

fn server_base(server_url: &str) -> Result<Url> {
    Url::parse(server_url).with_context(|| format!("Invalid server URL '{}'", server_url))
}

#[instrument(skip(config))]
async fn push_board(
    config: &BoardConfig,
    file: PathBuf,
    server_url: &str,
    share_url: Option<&str>,
) -> Result<()> {
    let client = HttpBoardClient::new(server_base(server_url)?);
    let mut app = BingoApp::new(client, config.share_base()?);

    if let Some(share_url) = share_url {
        let share_url = Url::parse(share_url).context("Invalid share link")?;
        if !app.resume_from_url(&share_url).await? {
            bail!("Share link has no board id");
        }
    }

    app.load_file(&file)?;
    let id = app.save_remote().await?;
    info!(board_id = %id, "Board pushed");
    println!("{}", app.share_url());
    Ok(())
}

#[instrument(skip(config))]
async fn pull_board(
    config: &BoardConfig,
    share_url: &str,
    server_url: &str,
    out: PathBuf,
) -> Result<()> {
    let share_url = Url::parse(share_url).context("Invalid share link")?;
    let id = board_id_from_url(&share_url).ok_or_else(|| anyhow!("Share link has no board id"))?;

    let client = HttpBoardClient::new(server_base(server_url)?);
    let mut app = BingoApp::new(client, config.share_base()?);
    app.load_remote(id).await?;
    app.save_file(&out)?;

    println!("{}", app.board().display());
    println!("Saved to {}", out.display());
    Ok(())
}

#[instrument(skip(config))]
fn share_link(config: &BoardConfig, id: &str) -> Result<()> {
    let id = BoardId::parse(id).ok_or_else(|| anyhow!("Invalid board id '{}'", id))?;
    println!("{}", with_board_id(&config.share_base()?, &id));
    Ok(())
}
