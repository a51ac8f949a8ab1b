use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{BalanceLedger, FriendsApp};
use shared::protocol::StateEvent;
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod view;

use controller::{Command, Outcome};

#[derive(Parser, Debug)]
#[command(name = "friends-split", about = "Track balances with friends and split bills")]
struct Args {
    /// TOML settings file; `friends-split.toml` is used when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start with an empty friend list.
    #[arg(long)]
    no_seed: bool,
    /// Print each state event as a JSON line instead of the text view.
    #[arg(long)]
    json: bool,
    /// Read commands from a file instead of stdin.
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = config::load_settings(args.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    tracing::debug!(?settings, "settings loaded");

    let ledger = if args.no_seed || !settings.seed_friends {
        BalanceLedger::new()
    } else {
        BalanceLedger::seeded()
    };
    let mut app = FriendsApp::new(ledger, settings.avatar_base_url.clone());
    let events = app.subscribe();

    let mut input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path)
                .with_context(|| format!("failed to open script '{}'", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let interactive = args.script.is_none();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if !args.json {
        write!(out, "{}", view::render(&app.snapshot()))?;
    }

    let mut line = String::new();
    loop {
        if interactive {
            write!(out, "> ")?;
            out.flush()?;
        }
        line.clear();
        if input.read_line(&mut line).context("failed to read command")? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let outcome = trimmed
            .parse::<Command>()
            .and_then(|command| controller::apply(&mut app, command));

        let published: Vec<StateEvent> = events.try_iter().collect();
        if args.json {
            for event in &published {
                writeln!(out, "{}", serde_json::to_string(event)?)?;
            }
        } else if let Some(event) = published.last() {
            write!(out, "{}", view::render(&event.snapshot))?;
        }

        match outcome {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Notice(notice)) => writeln!(out, "note: {notice}")?,
            Ok(Outcome::Redraw) if args.json => {
                writeln!(out, "{}", serde_json::to_string(&app.snapshot())?)?
            }
            Ok(Outcome::Redraw) => write!(out, "{}", view::render(&app.snapshot()))?,
            Ok(Outcome::Help) => writeln!(out, "{}", controller::HELP)?,
            Ok(Outcome::Quit) => break,
            Err(err) => {
                tracing::debug!(category = ?err.category(), context = ?err.context(), "command failed");
                writeln!(out, "error: {}", err.message())?;
            }
        }
    }

    Ok(())
}
