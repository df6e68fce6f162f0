//! Headless tileboard driver.
//!
//! # Responsibility
//! - Map CLI flags into `AppConfig` and open the configured storage.
//! - Feed stdin line commands through the core command handlers and print
//!   the reconciled visual tree after each one.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tileboard_core::{AppConfig, StorageBackend};

mod session;

use session::{BoardSession, GallerySession, Session};

#[derive(Parser)]
#[command(name = "tileboard")]
#[command(about = "Shape gallery and Kanban board over a persisted store")]
#[command(after_help = "\
GALLERY COMMANDS:
  add square|circle       recolor square|circle
  remove <id>             show

BOARD COMMANDS:
  add <column>            move <column> <id> left|right
  sort <column>           recolor-column <column>
  recolor <column> <id>   delete <column> <id>
  title <column> <id> <text...>
  show")]
struct Cli {
    /// SQLite file for snapshots (in-memory when omitted)
    #[arg(long, env = "TILEBOARD_DB", value_name = "PATH")]
    db: Option<PathBuf>,
    /// Absolute directory for rotating log files (stderr only when omitted)
    #[arg(long, env = "TILEBOARD_LOG_DIR", value_name = "DIR")]
    log_dir: Option<PathBuf>,
    #[arg(long, env = "TILEBOARD_LOG_LEVEL")]
    log_level: Option<String>,
    /// Seed for color generation
    #[arg(long)]
    seed: Option<u64>,
    #[command(subcommand)]
    screen: Screen,
}

#[derive(Subcommand, Clone, Copy)]
enum Screen {
    /// Square and circle tiles
    Gallery,
    /// Three-column Kanban board
    Board,
}

impl Cli {
    /// Without a log directory only warnings reach stderr unless a level is given.
    fn stderr_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("warn")
    }

    fn config(&self) -> AppConfig {
        let defaults = AppConfig::default();
        AppConfig {
            storage: self
                .db
                .clone()
                .map_or(StorageBackend::Memory, StorageBackend::Sqlite),
            log_level: self.log_level.clone().unwrap_or(defaults.log_level),
            log_dir: self.log_dir.clone(),
            rng_seed: self.seed,
            ..AppConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config();
    config.validate().context("invalid configuration")?;

    let logging = match &config.log_dir {
        Some(dir) => tileboard_core::init_logging(&config.log_level, dir),
        None => tileboard_core::init_stderr_logging(cli.stderr_log_level()),
    };
    logging.context("failed to start logging")?;
    log::info!(
        "event=cli_start module=cli status=ok version={}",
        tileboard_core::core_version()
    );

    let storage = config.open_storage().context("failed to open storage")?;
    let mut session: Box<dyn Session> = match cli.screen {
        Screen::Gallery => Box::new(GallerySession::open(storage, &config)),
        Screen::Board => Box::new(BoardSession::open(storage, &config)),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}", session.render())?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        if line == "show" {
            write!(out, "{}", session.render())?;
            continue;
        }
        match session.execute(line) {
            Ok(outcome) => writeln!(out, "> {outcome}")?,
            Err(err) => writeln!(out, "! {err:#}")?,
        }
        write!(out, "{}", session.render())?;
        out.flush()?;
    }
    Ok(())
}
