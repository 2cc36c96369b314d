//! Triage CLI
//!
//! Interactive emergency-room queue, with optional batch replay of command files.

use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use u_triage::triage::{Session, SessionConfig};

#[derive(Parser)]
#[command(name = "triage")]
#[command(about = "Triage - severity-ordered patient admission shell", long_about = None)]
#[command(version)]
struct Cli {
    /// Command files replayed in order before the shell starts
    #[arg(short = 'f', long = "load")]
    load: Vec<PathBuf>,

    /// Exit after replaying files instead of reading stdin
    #[arg(short, long)]
    batch: bool,

    /// Shell prompt
    #[arg(long, default_value = "triage> ")]
    prompt: String,

    /// Do not echo lines replayed from files
    #[arg(long)]
    no_echo: bool,

    /// Log level (overridden by a valid RUST_LOG)
    #[arg(
        short,
        long,
        default_value = "warn",
        value_parser = ["trace", "debug", "info", "warn", "error"]
    )]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level)?;

    let config = SessionConfig::default()
        .with_prompt(cli.prompt)
        .with_echo_replayed(!cli.no_echo);
    config.validate().map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    let mut session = Session::new(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for path in &cli.load {
        info!(path = %path.display(), "loading command file");
        session.load(path, &mut out)?;
    }

    if cli.batch {
        info!(waiting = session.queue().len(), "batch replay finished");
        return Ok(());
    }

    welcome(&mut out)?;
    session.run(io::stdin().lock(), &mut out)?;
    goodbye(&mut out)?;

    Ok(())
}

fn setup_logging(level: &str) -> Result<()> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = log_filter(rust_log.as_deref(), level);

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    Ok(())
}

/// `RUST_LOG` wins when it parses; otherwise the `--log-level` value applies.
fn log_filter(rust_log: Option<&str>, level: &str) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}

fn welcome(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "+-------------------------------------------------+")?;
    writeln!(out, "Welcome to the emergency room triage system.")?;
    writeln!(out, "Patients are seen by priority code, then arrival.")?;
    writeln!(out, "Enter \"help\" to see the menu.")?;
    writeln!(out, "+-------------------------------------------------+")
}

fn goodbye(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Thank you for using the triage system.")
}
