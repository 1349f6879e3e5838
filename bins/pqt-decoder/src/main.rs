mod cmd;
mod config;

use std::io::{BufWriter, Write};

use clap::Parser;
use config::{Cli, DecoderConfig};
use pipeline::{PipelineError, RunStats};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let _cli = Cli::parse();
    let config = DecoderConfig::from_defaults();

    let result = cmd::decode::run(&config, BufWriter::new(std::io::stdout().lock()));
    std::process::exit(exit_code(&result, &mut std::io::stderr()));
}

/// Skipped rows still exit 0. A fatal error prints `Error: ...` to `err` and exits 1.
fn exit_code(result: &Result<RunStats, PipelineError>, err: &mut impl Write) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => {
            let _ = writeln!(err, "Error: {e}");
            1
        }
    }
}
