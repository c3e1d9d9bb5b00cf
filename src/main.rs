use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use tracing::Level;

use bandgraph::{DotConfig, Source};

#[derive(Parser)]
#[command(
    name = "bandgraph",
    about = "Turn a band/musician outline into a Graphviz digraph"
)]
struct Cli {
    /// Input file (reads from stdin if not provided)
    file: Option<PathBuf>,

    /// Input format
    #[arg(long, value_enum, default_value_t = InputFormat::Outline)]
    from: InputFormat,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Dot)]
    emit: OutputFormat,

    /// TOML file with graph header attributes
    #[arg(long)]
    config: Option<PathBuf>,

    /// Layout engine, overriding the config file
    #[arg(long)]
    layout: Option<String>,

    /// Leave out the repulsiveforce attribute
    #[arg(long)]
    no_repulsive_force: bool,

    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum InputFormat {
    Outline,
    Script,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Dot,
    Script,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match run(&cli) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let input = match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let source = match cli.from {
        InputFormat::Outline => Source::Outline,
        InputFormat::Script => Source::Script,
    };

    match cli.emit {
        OutputFormat::Script => {
            if source != Source::Outline {
                bail!("--emit script needs an outline as input");
            }
            Ok(bandgraph::outline_to_script(&input)?)
        }
        OutputFormat::Dot => {
            let mut config = match &cli.config {
                Some(path) => DotConfig::load(path)?,
                None => DotConfig::default(),
            };
            if let Some(layout) = &cli.layout {
                config.layout = layout.clone();
            }
            if cli.no_repulsive_force {
                config.repulsive_force = None;
            }
            tracing::info!(layout = %config.layout, "rendering");
            Ok(bandgraph::render_with_options(&input, source, &config)?)
        }
    }
}
