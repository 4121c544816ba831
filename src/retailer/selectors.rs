//! CSS selectors for retailer listing pages.
//!
//! All selectors used while extracting products live here. Update this
//! file when a retailer changes its markup, and add a fixture covering
//! the new layout under `tests/fixtures/`.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for Meadow's escaped rich-text wrapper.
pub mod embedded {
    use super::*;

    /// Text node holding the escaped listing markup.
    pub static LISTING_TEXT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".rich-text-content > pre").unwrap());

    /// First paragraph-like element, used when the text node is missing.
    pub static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

    /// Raw-content marker proving the file itself is the escaped listing.
    pub const MARKER: &str = "&lt;div";
}

/// Selectors for Meadow listing pages.
pub mod meadow {
    use super::*;

    /// Product container, identified by its id prefix.
    pub static CONTAINER: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("[id^='product-']").unwrap());

    /// Prefix stripped from the container id to get the product reference.
    pub const ID_PREFIX: &str = "product-";

    /// Product name.
    pub static NAME: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".product-name").unwrap());

    /// Brand line.
    pub static BRAND: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".product-brand").unwrap());

    /// Pack size.
    pub static AMOUNT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".product-quantity").unwrap());
}

/// Selectors for Harbour listing pages.
pub mod harbour {
    use super::*;

    /// Product container, any direct item of the product list.
    pub static CONTAINER: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("ul.product-list > li").unwrap());

    /// Product link whose last path segment is the product reference.
    pub static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

    /// Product name.
    pub static NAME: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".product-title").unwrap());

    /// Brand line.
    pub static BRAND: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".product-brand").unwrap());

    /// Pack weight.
    pub static AMOUNT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".product-weight").unwrap());
}
