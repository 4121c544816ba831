//! Command-line plumbing shared by the converter binaries.

use crate::commands::ConvertCommand;
use crate::config::Config;
use crate::retailer::Retailer;
use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Options every converter accepts.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Path to config file
    #[arg(short, long, env = "GROCERY_CSV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print extracted records as JSON instead of writing the CSV
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses arguments, exiting with status 1 on usage errors.
///
/// `--help` and `--version` still print to stdout and exit 0.
pub fn parse_args<T: clap::Parser>() -> T {
    T::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { 1 } else { 0 };
        let _ = err.print();
        std::process::exit(code);
    })
}

/// Builds the log filter: `--verbose` forces debug, otherwise `RUST_LOG`
/// applies and an unset or invalid value falls back to warn.
pub fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new(Level::DEBUG.to_string());
    }

    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(Level::WARN.to_string()))
}

/// Installs the stderr log subscriber.
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one conversion and returns the line to print on stdout.
pub fn run(
    retailer: Retailer,
    input: &Path,
    output: Option<&Path>,
    args: &CommonArgs,
) -> Result<String> {
    let config = Config::load(args.config.as_deref())?.with_env();
    let cmd = ConvertCommand::new(retailer, &config);

    if args.json {
        let products = cmd.extract(input)?;
        return Ok(serde_json::to_string_pretty(&products)?);
    }

    let output = output.map(Path::to_path_buf).unwrap_or_else(|| config.default_output.clone());
    let summary = cmd.execute(input, &output)?;
    Ok(summary.to_string())
}

/// Prints the outcome of a run and maps it to the process exit status.
pub fn finish(result: Result<String>) -> ExitCode {
    match result {
        Ok(line) => {
            println!("{}", line);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
