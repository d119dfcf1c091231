use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use pomxml::{Config, Model, WriterConfig};

#[derive(Debug, Parser)]
#[command(
    name = "pomxml",
    version,
    about = "Parse, normalize and summarize Maven POM files"
)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// Spaces per nesting level when re-serializing (0 for compact output)
    #[arg(long, default_value_t = 2)]
    indent: usize,
    /// Maximum element nesting depth (at least 1)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    max_depth: Option<u16>,
    /// Print coordinates and section counts instead of the document
    #[arg(long)]
    summary: bool,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let input_data = read_input(&args.input)?;
    let mut config = Config::default();
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }

    let model = pomxml::from_str_with_config(&input_data, config).with_context(|| {
        format!("failed to parse {}", describe_input(&args.input))
    })?;
    info!(coordinates = %model.coordinates(), "parsed project");

    let output = if args.summary {
        summarize(&model)
    } else {
        let writer_config = if args.indent == 0 {
            WriterConfig::compact()
        } else {
            WriterConfig::pretty(args.indent)
        };
        pomxml::to_string_with_config(&model, writer_config)
            .context("failed to serialize project")?
    };

    write_output(&args.output, output.as_bytes())?;
    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn summarize(model: &Model) -> String {
    let packaging = match model.packaging.trim() {
        "" => "jar",
        packaging => packaging,
    };
    format!(
        "coordinates: {}\npackaging: {packaging}\ndependencies: {}\nplugins: {}\n",
        model.coordinates(),
        model.dependencies().len(),
        model.plugins().len(),
    )
}

fn describe_input(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "stdin".to_string(),
    }
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "reading input file");
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read input file {}", path.display()))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
