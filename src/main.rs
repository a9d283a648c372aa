//! Fortuna Generator CLI
//!
//! Command-line interface for drawing pseudo-random output from the
//! Fortuna generator, either seeded from OS entropy or deterministically.

use clap::{Parser, Subcommand, ValueEnum};
use fortuna_generator::{
    config::{FileConfig, OutputFormat},
    metrics::{MetricsRegistry, MetricsSnapshot},
    Aes256Factory, Generator, GeneratorError,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "fortuna-gen", version, about = "Fortuna generator CLI")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Deterministic seed; output is reproducible. Omit to seed from the OS.
    #[arg(long, global = true, allow_hyphen_values = true)]
    seed: Option<i64>,

    /// Print Prometheus metrics to stderr on exit.
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Emit pseudo-random bytes.
    Bytes {
        /// Number of bytes.
        #[arg(long, short = 'n')]
        count: Option<usize>,
        /// Output encoding.
        #[arg(long, value_enum)]
        format: Option<Format>,
    },
    /// Emit non-negative 63-bit integers, one per line.
    Int63 {
        /// Number of integers.
        #[arg(long, short = 'n')]
        count: Option<usize>,
    },
    /// Write raw bytes to stdout until interrupted.
    Stream {
        /// Bytes per generator request.
        #[arg(long)]
        chunk: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Hex,
    Raw,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Hex => OutputFormat::Hex,
            Format::Raw => OutputFormat::Raw,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] fortuna_generator::config::ConfigError),
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Metrics(#[from] fortuna_generator::metrics::MetricsError),
    #[error("output error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

fn main() {
    // Initialize logging; stdout carries generator output only.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("fortuna-gen: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    if cli.seed.is_some() {
        config.generator.seed = cli.seed;
    }
    config.metrics.print |= cli.metrics;

    info!("Fortuna generator v{}", fortuna_generator::VERSION);

    let mut gen = Generator::new(Aes256Factory::new())?;
    match config.generator.seed {
        Some(seed) => {
            warn!(seed, "using deterministic seed; output is reproducible");
            gen.seed(seed)?;
        }
        None => gen.reseed_from_os(config.generator.os_seed_bytes)?,
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let written = match cli.command {
        Command::Bytes { count, format } => {
            let count = count.unwrap_or(config.output.count);
            let format = format.map(OutputFormat::from).unwrap_or(config.output.format);
            let data = gen.pseudo_random_data(count)?;
            match format {
                OutputFormat::Raw => out.write_all(&data).map_err(CliError::from),
                OutputFormat::Hex => {
                    write_hex(&mut out, &data, config.output.line_width).map_err(CliError::from)
                }
            }
        }
        Command::Int63 { count } => {
            write_int63(&mut gen, &mut out, count.unwrap_or(config.output.count))
        }
        Command::Stream { chunk } => {
            let chunk = chunk.unwrap_or(config.output.stream_chunk).max(1);
            stream(&mut gen, &mut out, chunk)
        }
    };
    stop_on_closed_pipe(written.and_then(|()| out.flush().map_err(CliError::from)))?;

    let stats = gen.stats();
    info!(
        reseeds = stats.reseeds,
        rekeys = stats.rekeys,
        bytes = stats.bytes_generated,
        "Done"
    );

    if config.metrics.print {
        let registry = MetricsRegistry::new()?;
        registry.update(&MetricsSnapshot::from_generator(&gen));
        eprint!("{}", registry.encode()?);
    }

    Ok(())
}

fn write_hex(out: &mut impl Write, data: &[u8], line_width: usize) -> io::Result<()> {
    let text: String = data.iter().map(|b| format!("{:02x}", b)).collect();
    if line_width == 0 {
        return writeln!(out, "{}", text);
    }

    for line in text.as_bytes().chunks(line_width) {
        out.write_all(line)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// A reader closing the pipe (`fortuna-gen bytes | head -c 4`) ends output
/// normally.
fn stop_on_closed_pipe(result: Result<(), CliError>) -> Result<(), CliError> {
    match result {
        Err(CliError::Io(e)) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn write_int63(
    gen: &mut Generator<Aes256Factory>,
    out: &mut impl Write,
    count: usize,
) -> Result<(), CliError> {
    for _ in 0..count {
        writeln!(out, "{}", gen.int63()?)?;
    }
    Ok(())
}

fn stream(
    gen: &mut Generator<Aes256Factory>,
    out: &mut impl Write,
    chunk: usize,
) -> Result<(), CliError> {
    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))?;

    info!(chunk, "Streaming; press Ctrl-C to stop");

    while running.load(Ordering::SeqCst) {
        let data = gen.pseudo_random_data(chunk)?;
        out.write_all(&data)?;
    }

    Ok(())
}
