use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use matchbook::command::{run_threaded, CommandProcessor};

/// FIFO limit order book matching engine.
///
/// Reads commands from stdin (or a file), writes trades and PRINT renderings
/// to stdout. Diagnostics go to stderr, controlled by RUST_LOG.
#[derive(Debug, Parser)]
#[command(name = "matchbook", version)]
struct Args {
    /// Command file to execute; reads stdin when omitted.
    input: Option<PathBuf>,

    /// Parse input on a separate thread from matching.
    #[arg(long)]
    threaded: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let out = BufWriter::new(io::stdout());

    match args.input {
        Some(path) => dispatch(BufReader::new(File::open(path)?), out, args.threaded)?,
        None => dispatch(BufReader::new(io::stdin()), out, args.threaded)?,
    }
    Ok(())
}

fn dispatch<R, W>(input: R, out: W, threaded: bool) -> io::Result<()>
where
    R: BufRead + Send,
    W: Write,
{
    if threaded {
        run_threaded(input, out)
    } else {
        CommandProcessor::new(out).run(input)
    }
}
