//! Delve CLI entry point.

use std::env;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use delve_foundation::AnsiStylist;
use delve_runtime::{FileStore, Game, GameConfig, Repl, SaveFormat, run_batch};
use delve_storage::DirectorySource;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// CLI configuration parsed from arguments.
struct CliConfig {
    data_dir: PathBuf,
    save_dir: PathBuf,
    seed: Option<u64>,
    name: Option<String>,
    debug_commands: bool,
    msgpack: bool,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            save_dir: PathBuf::from("saves"),
            seed: None,
            name: None,
            debug_commands: false,
            msgpack: false,
            batch_mode: false,
            show_help: false,
            show_version: false,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0} requires a value")]
    MissingValue(&'static str),
    #[error("invalid --seed value: {0}")]
    InvalidSeed(String),
    #[error("unknown option: {0}")]
    UnknownOption(String),
    #[error(transparent)]
    Game(#[from] delve_foundation::Error),
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn value(args: &[String], i: usize, flag: &'static str) -> Result<String, CliError> {
    args.get(i).cloned().ok_or(CliError::MissingValue(flag))
}

fn parse_args(args: &[String]) -> Result<CliConfig, CliError> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--debug" => config.debug_commands = true,
            "--msgpack" => config.msgpack = true,
            "--data" => {
                i += 1;
                config.data_dir = PathBuf::from(value(args, i, "--data")?);
            }
            "--save-dir" => {
                i += 1;
                config.save_dir = PathBuf::from(value(args, i, "--save-dir")?);
            }
            "--name" => {
                i += 1;
                config.name = Some(value(args, i, "--name")?);
            }
            "--seed" => {
                i += 1;
                let raw = value(args, i, "--seed")?;
                config.seed = Some(raw.parse().map_err(|_| CliError::InvalidSeed(raw))?);
            }
            other => return Err(CliError::UnknownOption(other.to_string())),
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), CliError> {
    let cli = parse_args(&args)?;

    if cli.show_help {
        print_help();
        return Ok(());
    }

    if cli.show_version {
        println!("delve {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut config = GameConfig::default()
        .with_seed(cli.seed)
        .with_debug_commands(cli.debug_commands);
    if let Some(name) = cli.name {
        config = config.with_player_name(name);
    }
    if cli.msgpack {
        config = config.with_save_format(SaveFormat::MessagePack);
    }

    info!(data = %cli.data_dir.display(), saves = %cli.save_dir.display(), "starting");
    let source = Arc::new(DirectorySource::new(cli.data_dir));
    let store = Box::new(FileStore::new(cli.save_dir));
    let mut game = Game::new(config, source, store)?;

    if cli.batch_mode {
        let stdin = io::stdin();
        run_batch(&mut game, stdin.lock(), &mut io::stdout())?;
        return Ok(());
    }

    if io::stdout().is_terminal() {
        game = game.with_stylist(Box::new(AnsiStylist));
    }
    Repl::new()?.run(&mut game)?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mDelve\x1b[0m - A room-based text adventure

\x1b[1mUSAGE:\x1b[0m
    delve [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help          Print help information
    -V, --version       Print version information
    -b, --batch         Read commands from stdin, resolve fights inline, and exit
    --data DIR          Directory holding <area>.json files (default: data)
    --save-dir DIR      Directory for saved games (default: saves)
    --seed N            Seed the random number generator
    --name NAME         Name of a new character (default: Adventurer)
    --msgpack           Write saves as MessagePack instead of JSON
    --debug             Enable debug commands such as 'levelup'

\x1b[1mENVIRONMENT:\x1b[0m
    RUST_LOG            Log filter, e.g. RUST_LOG=delve_engine=debug

\x1b[1mEXAMPLES:\x1b[0m
    delve                            Start playing
    delve --seed 42 --name Tess      Reproducible run as Tess
    delve -b < walkthrough.txt       Play a script

\x1b[1mIN-GAME:\x1b[0m
    help                 List commands
    save / load          Save or restore your progress
    quit                 Leave the game
    Ctrl+D               Leave the game"
    );
}
