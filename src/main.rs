mod debug_report;

use anyhow::{Context, Result};
use clap::Parser;
use phatic::{Catalog, Engine, LoadOptions};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

const PROMPT: &str = "Ви: ";
const REPLY_PREFIX: &str = "Бот: ";

/// Rule-based phatic dialog bot.
///
/// With INPUT, prints a single reply and exits. Without it, reads lines from
/// stdin and answers each one until EOF, `/exit` or `/quit`.
#[derive(Parser, Debug)]
#[command(name = "phatic", version)]
struct Cli {
    /// Text to reply to (words are joined with spaces).
    input: Vec<String>,

    /// Load rules from a TOML catalog instead of the built-in one.
    #[arg(short, long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Seed for randomized replies.
    #[arg(long)]
    seed: Option<u64>,

    /// Print how each reply was selected (to stderr).
    #[arg(long)]
    explain: bool,

    /// Force ANSI color in the --explain report.
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI color in the --explain report.
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli) {
        tracing::error!("phatic failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt::Subscriber::builder().with_env_filter(env_filter).with_writer(io::stderr).with_target(false).compact().init();
}

fn run(cli: Cli) -> Result<()> {
    let options = LoadOptions { seed: cli.seed };
    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_path(path, options)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => Catalog::embedded_with(options).context("built-in catalog is invalid")?,
    };
    let engine = Engine::from_catalog(catalog);
    let color = if cli.no_color { false } else { cli.color || io::stderr().is_terminal() };

    let input = cli.input.join(" ");
    if !input.trim().is_empty() {
        reply_once(&engine, &input, cli.explain, color)?;
        return Ok(());
    }

    interactive(&engine, cli.explain, color)
}

fn reply_once(engine: &Engine, input: &str, explain: bool, color: bool) -> Result<()> {
    let out = engine.respond_verbose(input);
    writeln!(io::stdout(), "{}", out.reply).context("failed to write reply")?;
    if explain {
        debug_report::print_details(&out.details, color);
    }
    Ok(())
}

fn interactive(engine: &Engine, explain: bool, color: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        write!(stdout, "{PROMPT}").and_then(|_| stdout.flush()).context("failed to write prompt")?;

        let Some(line) = lines.next() else {
            writeln!(stdout).context("failed to write to stdout")?;
            return Ok(());
        };
        let line = line.context("failed to read stdin")?;

        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("/exit") || trimmed.eq_ignore_ascii_case("/quit") {
            return Ok(());
        }

        let out = engine.respond_verbose(&line);
        writeln!(stdout, "{REPLY_PREFIX}{}", out.reply).context("failed to write reply")?;
        if explain {
            debug_report::print_details(&out.details, color);
        }
    }
}
