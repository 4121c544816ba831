//! Convert command implementation.

use crate::config::Config;
use crate::error::ConvertError;
use crate::format::append_products;
use crate::retailer::{Parser, Product, Retailer};
use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    /// CSV file written to
    pub path: PathBuf,
    /// Number of records written
    pub records: usize,
    /// True if the CSV file was created by this run
    pub created: bool,
}

impl fmt::Display for ConvertSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.created {
            write!(f, "Created {} with {} records", self.path.display(), self.records)
        } else {
            write!(f, "Appended {} records to {}", self.records, self.path.display())
        }
    }
}

/// Converts a saved listing page into rows of the shared CSV.
pub struct ConvertCommand {
    parser: Parser,
}

impl ConvertCommand {
    /// Creates a convert command for a retailer.
    pub fn new(retailer: Retailer, config: &Config) -> Self {
        Self { parser: Parser::new(retailer, config.profile(retailer)) }
    }

    /// Reads and parses the listing without writing anything.
    pub fn extract(&self, input: &Path) -> Result<Vec<Product>> {
        info!("Reading {} listing: {}", self.parser.retailer(), input.display());

        let html = std::fs::read_to_string(input)
            .map_err(|source| ConvertError::ReadInput { path: input.to_path_buf(), source })?;
        debug!("Read {} bytes", html.len());

        Ok(self.parser.parse_listing(&html))
    }

    /// Converts the listing at `input` and appends the records to `output`.
    pub fn execute(&self, input: &Path, output: &Path) -> Result<ConvertSummary> {
        let products = self.extract(input)?;

        let outcome = append_products(output, &products)
            .with_context(|| format!("Failed to save {} records", products.len()))?;

        Ok(ConvertSummary {
            path: output.to_path_buf(),
            records: outcome.records,
            created: outcome.created,
        })
    }
}
