mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod prefs;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::board::{self, BoardCommandArgs};
use crate::cmd::prefs::{self as prefs_cmd, PrefsArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::board_api::BoardApiClient;

#[derive(Parser)]
#[command(name = "trellis", author, version, about = "Terminal ticket board")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[command(flatten)]
    board: BoardArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the board and render it as grouped, sorted columns.
    Board(BoardArgs),
    /// Inspect or set the persisted view preferences.
    Prefs(PrefsArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct BoardArgs {
    /// Group columns by status, priority, or user (persisted).
    #[arg(short, long)]
    group_by: Option<String>,
    /// Order tickets within a column by priority or title (persisted).
    #[arg(short, long)]
    sort_by: Option<String>,
    /// Render the board once as plain text instead of the interactive view.
    #[arg(long)]
    plain: bool,
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Prefs(args)) => prefs_cmd::run(args.command),
        Some(Commands::Board(args)) => run_board(args).await,
        None => run_board(cli.board).await,
    }
}

async fn run_board(args: BoardArgs) -> AppResult<()> {
    let config = AppConfig::load();
    let board_data = Arc::new(BoardApiClient::new(config.api_url.clone()));
    let context = AppContext::new(config, board_data);

    let command_args = BoardCommandArgs {
        group_by: args.group_by.as_deref().map(str::parse).transpose()?,
        sort_by: args.sort_by.as_deref().map(str::parse).transpose()?,
        plain: args.plain,
    };

    board::run(&context, command_args).await
}
