//! CLI tool for gridselect - replays a pointer event script and outputs JSON
//!
//! Usage:
//!   gridselect_cli <script.json>              # Output JSON to stdout
//!   gridselect_cli <script.json> -o out.json  # Output JSON to file
//!
//! Set `RUST_LOG=gridselect=debug` to trace selection transitions on stderr.

#![allow(clippy::exit)]

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use gridselect::script::{run_script, Script};
use gridselect::Result;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: gridselect_cli <script.json> [-o output.json]";

struct Args {
    input: PathBuf,
    output: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Option<Self> {
        let input = PathBuf::from(args.next()?);
        let output = match (args.next().as_deref(), args.next()) {
            (Some("-o"), Some(path)) => Some(PathBuf::from(path)),
            (None, _) => None,
            _ => return None,
        };
        Some(Self { input, output })
    }
}

fn run(args: &Args) -> Result<()> {
    let script = Script::from_path(&args.input)?;
    let reports = run_script(&script)?;
    let json = serde_json::to_string_pretty(&reports)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &json)?;
            eprintln!("Written: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let Some(args) = Args::parse(env::args().skip(1)) else {
        eprintln!("{USAGE}");
        std::process::exit(1);
    };

    if let Err(e) = run(&args) {
        eprintln!("Error processing {}: {}", args.input.display(), e);
        std::process::exit(1);
    }
}
