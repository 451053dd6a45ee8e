mod achievements;
mod app;
mod challenges;
mod command;
mod config;
mod consts;
mod engine;
mod game;
mod profile;
mod skins;
mod store;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::game::Game;
use crate::profile::Profile;
use anyhow::Context;
use lexopt::{Arg, Parser};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

/// Command-line invocations of the program
#[derive(Clone, Debug, Eq, PartialEq)]
enum Invocation {
    Run {
        /// Configuration file given with `--config`
        config: Option<PathBuf>,
        /// File to write log messages to
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Invocation {
    fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut config = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('l') | Arg::Long("log-file") => {
                    log_file = Some(PathBuf::from(parser.value()?));
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Run { config, log_file })
    }
}

fn main() -> ExitCode {
    match Invocation::from_parser(Parser::from_env()) {
        Ok(Invocation::Run { config, log_file }) => match setup(config, log_file) {
            Ok(game) => {
                let terminal = ratatui::init();
                let r = App::new(game).run(terminal);
                ratatui::restore();
                io_exit(r)
            }
            Err(e) => {
                eprintln!("powersnake: {e:?}");
                ExitCode::from(2)
            }
        },
        Ok(Invocation::Help) => {
            println!("Usage: powersnake [-c|--config <PATH>] [-l|--log-file <PATH>]");
            println!();
            println!("Snake with power-ups in the terminal");
            println!();
            println!("Options:");
            println!("  -c, --config <PATH>    Read configuration from the given file");
            println!("  -l, --log-file <PATH>  Write log messages to the given file");
            println!("  -h, --help             Show this help message and exit");
            println!("  -V, --version          Show the program version and exit");
            ExitCode::SUCCESS
        }
        Ok(Invocation::Version) => {
            println!("powersnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("powersnake: {e}");
            ExitCode::from(2)
        }
    }
}

/// Load configuration & saved progress and set up the first game
fn setup(config: Option<PathBuf>, log_file: Option<PathBuf>) -> anyhow::Result<Game> {
    if let Some(path) = log_file {
        init_logging(path)?;
    }
    let config = match config {
        Some(path) => Config::load(&path, false),
        None => Config::default_path().and_then(|path| Config::load(&path, true)),
    }
    .context("failed to load configuration")?;
    let store = config
        .open_store()
        .context("failed to open saved progress")?;
    log::debug!("Using store at {:?}", store.path());
    let profile = Profile::load(store, chrono::Local::now().date_naive());
    Game::new(config.engine.to_tuning(), profile, rand::rng())
        .context("failed to set up the game board")
}

/// Send log messages to `path`, at the level given by `RUST_LOG` (default
/// "info")
fn init_logging(path: PathBuf) -> anyhow::Result<()> {
    let file = fs_err::File::create(path).context("failed to open log file")?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialize logging")?;
    log::info!("powersnake {} starting", env!("CARGO_PKG_VERSION"));
    Ok(())
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("powersnake: {e}");
            ExitCode::from(2)
        }
    }
}
