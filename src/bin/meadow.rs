//! meadow-to-csv - Convert a saved Meadow listing page into the shared product CSV

use clap::Parser;
use grocery_csv::cli::{self, CommonArgs};
use grocery_csv::Retailer;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "meadow-to-csv",
    version,
    about = "Convert a saved Meadow listing page into the shared product CSV",
    long_about = "Reads a saved Meadow listing page, unescaping rich-text embedded markup when \
                  present, and appends one CSV row per product. The CSV header is written only \
                  when the output file does not exist yet."
)]
struct Cli {
    /// Saved listing page (HTML)
    input: PathBuf,

    /// CSV file to create or append to [default: main.csv]
    output: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let args: Cli = cli::parse_args();
    cli::init_logging(args.common.verbose);

    cli::finish(cli::run(Retailer::Meadow, &args.input, args.output.as_deref(), &args.common))
}
