//! Product records extracted from listing pages.

use serde::Serialize;

/// A grocery product extracted from one listing container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    /// Display name, never empty
    pub name: String,
    /// Brand, or the retailer's own-brand fallback
    pub brand: String,
    /// Free-text quantity ("500g", "6 x 330ml"), may be empty
    pub amount: String,
    /// Unit of measurement when given separately from the amount
    pub unit: String,
    /// Tag identifying the source that produced the record
    pub source_id: String,
    /// Retailer-native product reference, never empty
    pub source_ref: String,
    /// Country code
    pub country: String,
    /// Comma-separated taxonomy tags
    pub categories_tags: String,
    /// Human-readable category names
    pub categories_en: String,
}
