mod bracket;
mod config;
mod standings;
mod storage;
mod utils;

use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use thiserror::Error;

use config::{Config, ConfigError};
use storage::LocalStorage;

#[derive(Debug, Parser)]
#[clap(version, about)]
pub struct Args {
    /// Path of the config file. A missing file uses the defaults.
    #[clap(short, long, default_value = "config.toml")]
    config: PathBuf,
    /// Overrides the data directory of the config.
    #[clap(short, long)]
    data_dir: Option<PathBuf>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Bracket {
        #[clap(subcommand)]
        command: bracket::Command,
    },
    Standings {
        #[clap(subcommand)]
        command: standings::Command,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("failed to load config: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Board(#[from] tournament_board_core::Error),
}

fn main() {
    let args = Args::parse();

    if let Err(err) = run(args) {
        eprintln!("{}", err);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::load(&args.config)?.with_environment();
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    pretty_env_logger::formatted_builder()
        .filter_level(config.loglevel)
        .init();

    log::debug!("Using config: {:?}", config);

    let storage = LocalStorage::new(&config.data_dir);

    match args.command {
        Command::Bracket { command } => command.run(&storage),
        Command::Standings { command } => command.run(&storage),
    }
}
