//! Retailer identities, listing parsers, and the product record model.

pub mod models;
pub mod parser;
pub mod selectors;
pub mod unescape;

pub use models::Product;
pub use parser::{NodeQuery, Parser};

use std::fmt;

/// Retailers whose saved listing pages can be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Retailer {
    /// Listing markup is shipped entity-escaped inside a rich-text field.
    Meadow,
    /// Listing markup is a plain product list with link-based references.
    Harbour,
}

impl Retailer {
    /// Returns the human-readable retailer name.
    pub fn name(&self) -> &'static str {
        match self {
            Retailer::Meadow => "Meadow",
            Retailer::Harbour => "Harbour",
        }
    }

    /// Returns whether saved pages may embed the listing as escaped markup.
    pub fn embeds_escaped_listing(&self) -> bool {
        matches!(self, Retailer::Meadow)
    }

    /// Returns whether brand text is normalised to title case.
    pub fn title_cases_brand(&self) -> bool {
        matches!(self, Retailer::Meadow)
    }
}

impl fmt::Display for Retailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Retailer::Meadow => "meadow",
            Retailer::Harbour => "harbour",
        };
        write!(f, "{}", code)
    }
}
