//! harbour-to-csv - Convert a saved Harbour listing page into the shared product CSV

use clap::Parser;
use grocery_csv::cli::{self, CommonArgs};
use grocery_csv::Retailer;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "harbour-to-csv",
    version,
    about = "Convert a saved Harbour listing page into the shared product CSV"
)]
struct Cli {
    /// Saved listing page (HTML)
    input: PathBuf,

    /// CSV file to create or append to (not needed with --json)
    #[arg(required_unless_present = "json")]
    output: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let args: Cli = cli::parse_args();
    cli::init_logging(args.common.verbose);

    cli::finish(cli::run(Retailer::Harbour, &args.input, args.output.as_deref(), &args.common))
}
