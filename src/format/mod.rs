//! CSV output in the shared product schema.
//!
//! Every converter writes the same ten columns. The first run against a
//! file writes the header; later runs append rows only.

use crate::error::{ConvertError, Result};
use crate::retailer::Product;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// Column names, in output order.
pub const HEADER: [&str; 10] = [
    "barcode",
    "product_name",
    "amount",
    "unit",
    "brand",
    "categories_tags",
    "categories_en",
    "countries",
    "source_id",
    "source_ref",
];

/// A product projected onto the output columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvRow<'a> {
    pub barcode: &'a str,
    pub product_name: &'a str,
    pub amount: &'a str,
    pub unit: &'a str,
    pub brand: &'a str,
    pub categories_tags: &'a str,
    pub categories_en: &'a str,
    pub countries: &'a str,
    pub source_id: &'a str,
    pub source_ref: &'a str,
}

impl<'a> CsvRow<'a> {
    /// Returns the fields in column order.
    pub fn fields(&self) -> [&'a str; 10] {
        [
            self.barcode,
            self.product_name,
            self.amount,
            self.unit,
            self.brand,
            self.categories_tags,
            self.categories_en,
            self.countries,
            self.source_id,
            self.source_ref,
        ]
    }
}

impl<'a> From<&'a Product> for CsvRow<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            // Listing pages never expose barcodes.
            barcode: "",
            product_name: &product.name,
            amount: &product.amount,
            unit: &product.unit,
            brand: &product.brand,
            categories_tags: &product.categories_tags,
            categories_en: &product.categories_en,
            countries: &product.country,
            source_id: &product.source_id,
            source_ref: &product.source_ref,
        }
    }
}

/// What an append did to the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    /// True if the file did not exist and the header was written
    pub created: bool,
    /// Number of data rows written
    pub records: usize,
}

/// Encodes products as CSV lines, optionally preceded by the header.
///
/// Fields containing a comma, quote, or line break are quoted with
/// embedded quotes doubled; every other field is written bare.
pub fn encode(products: &[Product], with_header: bool) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut wtr = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut buf);

        if with_header {
            wtr.write_record(HEADER)?;
        }
        for product in products {
            wtr.write_record(CsvRow::from(product).fields())?;
        }
        wtr.flush().map_err(csv::Error::from)?;
    }
    Ok(buf)
}

/// Appends products to the CSV file at `path`, creating it with a header
/// if it does not exist yet.
///
/// All rows go out in a single write; nothing is locked or rolled back.
pub fn append_products(path: &Path, products: &[Product]) -> Result<WriteOutcome> {
    let created = !path.exists();
    let data = encode(products, created)?;

    debug!("Writing {} bytes to {} (header: {})", data.len(), path.display(), created);

    let write_err = |source| ConvertError::WriteOutput { path: path.to_path_buf(), source };

    let mut file =
        OpenOptions::new().create(true).append(true).open(path).map_err(write_err)?;
    file.write_all(&data).map_err(write_err)?;

    info!(
        "{} {} rows to {}",
        if created { "Wrote" } else { "Appended" },
        products.len(),
        path.display()
    );

    Ok(WriteOutcome { created, records: products.len() })
}
