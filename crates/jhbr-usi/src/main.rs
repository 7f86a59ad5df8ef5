// USI entry point of the JHBR engine

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use jhbr_core::amplify::SelectorConfig;
use jhbr_core::engine::EngineConfig;
use jhbr_core::observer::{LogObserver, SearchObserver};
use jhbr_core::search::DEPTH_LIMIT;
use jhbr_usi::{Journal, Session, UsiEngine, UsiOutput};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Search horizon in plies
    #[arg(long, default_value_t = DEPTH_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    depth: u32,

    /// Width of the amplified selector's index space in bits
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=16))]
    index_bits: u32,

    /// Sampled outcomes per amplified selection
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u32).range(1..))]
    shots: u32,

    /// Seed for all random choices (shuffling, sampling)
    #[arg(long)]
    seed: Option<u64>,

    /// Append position commands and selections to this file
    #[arg(long)]
    journal: Option<std::path::PathBuf>,
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    );
    builder
        .format(|buf, record| {
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
        })
        .write_style(env_logger::WriteStyle::Never)
        // stdout carries protocol output only
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(args) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = EngineConfig {
        depth_limit: args.depth,
        selector: SelectorConfig { index_bits: args.index_bits, shots: args.shots },
    };

    let mut observers: Vec<Arc<dyn SearchObserver>> = Vec::new();
    observers.push(Arc::new(LogObserver));
    if let Some(path) = &args.journal {
        let journal =
            Journal::open(path).with_context(|| format!("cannot open journal {}", path.display()))?;
        observers.push(Arc::new(journal));
    }

    let output = UsiOutput::stdout();
    let session = Session::new(config, args.seed, Arc::new(observers), output.clone());
    let mut engine = UsiEngine::new(session, output);
    engine.run(io::stdin().lock())
}
