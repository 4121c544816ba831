//! Listing parser: maps product containers to product records.

use crate::config::RetailerProfile;
use crate::retailer::models::Product;
use crate::retailer::selectors::{harbour, meadow};
use crate::retailer::unescape::unwrap_listing;
use crate::retailer::Retailer;
use crate::text::{non_empty, title_case};
use scraper::{ElementRef, Html, Selector};
use std::borrow::Cow;
use tracing::{debug, trace};

/// Tree queries the extractor needs from a container element.
///
/// Keeping extraction behind this trait means the record mapping does
/// not care which DOM implementation produced the container.
pub trait NodeQuery {
    /// Returns an attribute of the container itself.
    fn attr(&self, name: &str) -> Option<&str>;

    /// Returns the trimmed text of the first matching descendant, if non-empty.
    fn select_text(&self, selector: &Selector) -> Option<String>;

    /// Returns an attribute of the first matching descendant.
    fn select_attr(&self, selector: &Selector, name: &str) -> Option<String>;
}

impl NodeQuery for ElementRef<'_> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn select_text(&self, selector: &Selector) -> Option<String> {
        self.select(selector).next().and_then(|e| non_empty(&e.text().collect::<String>()))
    }

    fn select_attr(&self, selector: &Selector, name: &str) -> Option<String> {
        self.select(selector).next().and_then(|e| e.value().attr(name)).map(String::from)
    }
}

/// Where a container's product reference is read from.
#[derive(Debug, Clone, Copy)]
pub enum ReferenceSource {
    /// The container id, minus a fixed prefix.
    IdSuffix(&'static str),
    /// The last path segment of a descendant link's `href`.
    LinkPath(&'static Selector),
}

/// Selector set describing how one retailer lays out its listing.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionMap {
    pub container: &'static Selector,
    pub reference: ReferenceSource,
    pub name: &'static Selector,
    pub brand: &'static Selector,
    pub amount: &'static Selector,
    pub title_case_brand: bool,
}

impl ExtractionMap {
    /// Returns the extraction map for a retailer.
    pub fn for_retailer(retailer: Retailer) -> Self {
        match retailer {
            Retailer::Meadow => Self {
                container: &meadow::CONTAINER,
                reference: ReferenceSource::IdSuffix(meadow::ID_PREFIX),
                name: &meadow::NAME,
                brand: &meadow::BRAND,
                amount: &meadow::AMOUNT,
                title_case_brand: retailer.title_cases_brand(),
            },
            Retailer::Harbour => Self {
                container: &harbour::CONTAINER,
                reference: ReferenceSource::LinkPath(&harbour::LINK),
                name: &harbour::NAME,
                brand: &harbour::BRAND,
                amount: &harbour::AMOUNT,
                title_case_brand: retailer.title_cases_brand(),
            },
        }
    }
}

/// Returns the percent-decoded last path segment of a link, ignoring
/// query string, fragment, and trailing slashes.
pub fn trailing_segment(href: &str) -> Option<String> {
    let path = href.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
    let segment = path.trim_end_matches('/').rsplit('/').next()?;
    let decoded = urlencoding::decode(segment)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| segment.to_string());
    non_empty(&decoded)
}

/// Maps one container to a product.
///
/// Returns `None` when the container has no product reference or no name.
pub fn extract_product<N: NodeQuery>(
    node: &N,
    map: &ExtractionMap,
    profile: &RetailerProfile,
) -> Option<Product> {
    let source_ref = match map.reference {
        ReferenceSource::IdSuffix(prefix) => {
            node.attr("id").and_then(|id| id.strip_prefix(prefix)).and_then(non_empty)
        }
        ReferenceSource::LinkPath(link) => {
            node.select_attr(link, "href").and_then(|href| trailing_segment(&href))
        }
    }?;

    let name = node.select_text(map.name)?;

    let brand = node
        .select_text(map.brand)
        .map(|brand| if map.title_case_brand { title_case(&brand) } else { brand })
        .unwrap_or_else(|| profile.brand_fallback.clone());

    let amount = node.select_text(map.amount).unwrap_or_default();

    Some(Product {
        name,
        brand,
        amount,
        unit: String::new(),
        source_id: profile.source_id.clone(),
        source_ref,
        country: profile.country.clone(),
        categories_tags: profile.categories_tags.clone(),
        categories_en: profile.categories_en.clone(),
    })
}

/// Parser for a retailer's saved listing pages.
pub struct Parser {
    retailer: Retailer,
    profile: RetailerProfile,
    map: ExtractionMap,
}

impl Parser {
    /// Creates a parser for the given retailer and profile.
    pub fn new(retailer: Retailer, profile: RetailerProfile) -> Self {
        Self { retailer, profile, map: ExtractionMap::for_retailer(retailer) }
    }

    /// Returns the retailer this parser handles.
    pub fn retailer(&self) -> Retailer {
        self.retailer
    }

    /// Parses listing HTML into products, in document order.
    ///
    /// Containers missing a reference or a name are skipped.
    pub fn parse_listing(&self, html: &str) -> Vec<Product> {
        let markup = if self.retailer.embeds_escaped_listing() {
            Cow::Owned(unwrap_listing(html))
        } else {
            Cow::Borrowed(html)
        };

        let document = Html::parse_document(&markup);

        let mut products = Vec::new();
        let mut skipped = 0usize;

        for element in document.select(self.map.container) {
            match extract_product(&element, &self.map, &self.profile) {
                Some(product) => {
                    trace!("Parsed product: {} - {}", product.source_ref, product.name);
                    products.push(product);
                }
                None => {
                    trace!("Skipping incomplete container");
                    skipped += 1;
                }
            }
        }

        debug!(
            "Parsed {} {} products ({} containers skipped)",
            products.len(),
            self.retailer,
            skipped
        );

        products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Container stand-in keyed by selector identity.
    #[derive(Default)]
    struct FakeNode {
        attrs: HashMap<&'static str, &'static str>,
        texts: Vec<(&'static Selector, &'static str)>,
        links: Vec<(&'static Selector, &'static str)>,
    }

    impl NodeQuery for FakeNode {
        fn attr(&self, name: &str) -> Option<&str> {
            self.attrs.get(name).copied()
        }

        fn select_text(&self, selector: &Selector) -> Option<String> {
            self.texts
                .iter()
                .find(|(s, _)| std::ptr::eq(*s, selector))
                .and_then(|(_, text)| non_empty(text))
        }

        fn select_attr(&self, selector: &Selector, _name: &str) -> Option<String> {
            self.links
                .iter()
                .find(|(s, _)| std::ptr::eq(*s, selector))
                .map(|(_, href)| href.to_string())
        }
    }

    fn meadow_parts() -> (ExtractionMap, RetailerProfile) {
        (
            ExtractionMap::for_retailer(Retailer::Meadow),
            RetailerProfile::builtin(Retailer::Meadow),
        )
    }

    #[test]
    fn test_extract_fake_meadow_node() {
        let (map, profile) = meadow_parts();
        let node = FakeNode {
            attrs: HashMap::from([("id", "product-8812")]),
            texts: vec![
                (&*meadow::NAME, "  Free Range Eggs "),
                (&*meadow::BRAND, "happy EGG co"),
                (&*meadow::AMOUNT, "6 pack"),
            ],
            ..Default::default()
        };

        let product = extract_product(&node, &map, &profile).unwrap();
        assert_eq!(product.source_ref, "8812");
        assert_eq!(product.name, "Free Range Eggs");
        assert_eq!(product.brand, "Happy Egg Co");
        assert_eq!(product.amount, "6 pack");
        assert_eq!(product.unit, "");
        assert_eq!(product.source_id, "meadow");
        assert_eq!(product.country, "GB");
        assert_eq!(product.categories_tags, "en:groceries");
        assert_eq!(product.categories_en, "Groceries");
    }

    #[test]
    fn test_extract_fake_node_missing_name() {
        let (map, profile) = meadow_parts();
        let node = FakeNode {
            attrs: HashMap::from([("id", "product-1")]),
            texts: vec![(&*meadow::NAME, "   ")],
            ..Default::default()
        };
        assert!(extract_product(&node, &map, &profile).is_none());
    }

    #[test]
    fn test_extract_fake_node_empty_reference() {
        let (map, profile) = meadow_parts();
        let node = FakeNode {
            attrs: HashMap::from([("id", "product- ")]),
            texts: vec![(&*meadow::NAME, "Butter")],
            ..Default::default()
        };
        assert!(extract_product(&node, &map, &profile).is_none());
    }

    #[test]
    fn test_extract_fake_node_brand_fallback() {
        let (map, profile) = meadow_parts();
        let node = FakeNode {
            attrs: HashMap::from([("id", "product-2")]),
            texts: vec![(&*meadow::NAME, "Butter"), (&*meadow::BRAND, "  ")],
            ..Default::default()
        };
        let product = extract_product(&node, &map, &profile).unwrap();
        assert_eq!(product.brand, "Meadow");
        assert_eq!(product.amount, "");
    }

    #[test]
    fn test_extract_fake_harbour_node() {
        let map = ExtractionMap::for_retailer(Retailer::Harbour);
        let profile = RetailerProfile::builtin(Retailer::Harbour);
        let node = FakeNode {
            links: vec![(&*harbour::LINK, "/groceries/oat-drink/556677?ref=list")],
            texts: vec![(&*harbour::NAME, "Oat Drink"), (&*harbour::BRAND, "OATLY")],
            ..Default::default()
        };

        let product = extract_product(&node, &map, &profile).unwrap();
        assert_eq!(product.source_ref, "556677");
        assert_eq!(product.brand, "OATLY");
        assert_eq!(product.source_id, "harbour");
    }

    #[test]
    fn test_trailing_segment() {
        assert_eq!(trailing_segment("/p/12345"), Some("12345".to_string()));
        assert_eq!(trailing_segment("https://harbour.example/p/abc/"), Some("abc".to_string()));
        assert_eq!(trailing_segment("/p/abc?x=1#top"), Some("abc".to_string()));
        assert_eq!(trailing_segment("/p/tea%20bags"), Some("tea bags".to_string()));
        assert_eq!(trailing_segment("plain"), Some("plain".to_string()));
    }

    #[test]
    fn test_trailing_segment_empty() {
        assert_eq!(trailing_segment(""), None);
        assert_eq!(trailing_segment("/"), None);
        assert_eq!(trailing_segment("?only=query"), None);
    }

    #[test]
    fn test_parse_meadow_literal_markup() {
        let parser = Parser::new(Retailer::Meadow, RetailerProfile::builtin(Retailer::Meadow));
        let html = r#"
            <div id="product-101">
                <h3 class="product-name">Greek Yoghurt</h3>
                <span class="product-brand">fage TOTAL</span>
                <span class="product-quantity">500g</span>
            </div>
            <div id="product-102">
                <span class="product-brand">Nameless</span>
            </div>
            <div id="product-103">
                <h3 class="product-name">Honey</h3>
            </div>
        "#;

        let products = parser.parse_listing(html);
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].source_ref, "101");
        assert_eq!(products[0].brand, "Fage Total");
        assert_eq!(products[0].amount, "500g");
        assert_eq!(products[1].source_ref, "103");
        assert_eq!(products[1].brand, "Meadow");
    }

    #[test]
    fn test_parse_meadow_escaped_markup() {
        let parser = Parser::new(Retailer::Meadow, RetailerProfile::builtin(Retailer::Meadow));
        let html = "&lt;div id=&quot;product-5&quot;&gt;\
                    &lt;p class=&quot;product-name&quot;&gt;Widget&lt;/p&gt;\
                    &lt;/div&gt;";

        let products = parser.parse_listing(html);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Widget");
        assert_eq!(products[0].source_ref, "5");
    }

    #[test]
    fn test_parse_harbour_ignores_escaped_markup() {
        let parser = Parser::new(Retailer::Harbour, RetailerProfile::builtin(Retailer::Harbour));
        let html = "&lt;ul class=&quot;product-list&quot;&gt;&lt;/ul&gt;";
        assert!(parser.parse_listing(html).is_empty());
    }

    #[test]
    fn test_parse_harbour_list() {
        let parser = Parser::new(Retailer::Harbour, RetailerProfile::builtin(Retailer::Harbour));
        let html = r#"
            <ul class="product-list">
                <li>
                    <a href="/products/baked-beans/9001">
                        <span class="product-title">Baked Beans</span>
                    </a>
                    <span class="product-brand">heinz</span>
                    <span class="product-weight">415g</span>
                </li>
                <li><span class="product-title">No Link</span></li>
            </ul>
            <ul class="related"><li><a href="/products/x/1"><span class="product-title">X</span></a></li></ul>
        "#;

        let products = parser.parse_listing(html);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].source_ref, "9001");
        assert_eq!(products[0].name, "Baked Beans");
        assert_eq!(products[0].brand, "heinz");
        assert_eq!(products[0].amount, "415g");
    }

    #[test]
    fn test_parse_empty_document() {
        let parser = Parser::new(Retailer::Harbour, RetailerProfile::builtin(Retailer::Harbour));
        assert!(parser.parse_listing("").is_empty());
        assert_eq!(parser.retailer(), Retailer::Harbour);
    }
}
