//! Detection and decoding of listing markup shipped as escaped text.
//!
//! Some saved Meadow pages do not contain the product markup directly.
//! Instead the listing sits inside a rich-text field as entity-escaped
//! text (`&lt;div id=&quot;product-1&quot;&gt;...`). This module finds
//! that text and turns it back into markup before the real parse.

use crate::retailer::selectors::embedded;
use crate::text::non_empty;
use scraper::{Html, Selector};
use tracing::{debug, warn};

/// Entity replacements, applied in this order.
const ENTITIES: [(&str, &str); 5] =
    [("&lt;", "<"), ("&gt;", ">"), ("&amp;", "&"), ("&quot;", "\""), ("&#39;", "'")];

/// Returns true if the content looks like escaped markup rather than markup.
pub fn is_escaped(content: &str) -> bool {
    content.trim_start().starts_with("&lt;")
        || content.contains("&lt;div")
        || content.contains("&lt;p")
}

/// Decodes the five basic HTML entities, leaving everything else untouched.
pub fn decode_basic_entities(s: &str) -> String {
    ENTITIES.iter().fold(s.to_string(), |acc, (entity, ch)| acc.replace(entity, ch))
}

/// Returns the markup that should be handed to the listing parser.
///
/// Literal markup passes through unchanged. Escaped content is located
/// with a progressively weaker chain of lookups:
///
/// 1. the rich-text `<pre>` node of the wrapper document,
/// 2. the first paragraph of the wrapper document,
/// 3. the raw file itself, if it carries the escaped-listing marker.
///
/// If every lookup fails the raw content is returned undecoded, which
/// usually yields zero products downstream.
pub fn unwrap_listing(raw: &str) -> String {
    if !is_escaped(raw) {
        return raw.to_string();
    }

    debug!("Listing markup appears to be entity-escaped");

    let wrapper = Html::parse_document(raw);
    let first_text = |selector: &Selector| {
        wrapper.select(selector).next().and_then(|e| non_empty(&e.text().collect::<String>()))
    };

    let listing = first_text(&*embedded::LISTING_TEXT)
        .or_else(|| {
            debug!("No rich-text node found, trying first paragraph");
            first_text(&*embedded::PARAGRAPH)
        })
        .or_else(|| {
            raw.contains(embedded::MARKER).then(|| {
                debug!("Using raw content as the escaped listing");
                raw.to_string()
            })
        });

    match listing {
        Some(text) => decode_basic_entities(&text),
        None => {
            warn!("Escaped listing detected but no embedded markup could be located");
            raw.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_escaped_leading_entity() {
        assert!(is_escaped("   &lt;section&gt;"));
        assert!(is_escaped("&lt;ul&gt;"));
    }

    #[test]
    fn test_is_escaped_embedded_tags() {
        assert!(is_escaped("<html><body>&lt;div class=x&gt;</body></html>"));
        assert!(is_escaped("<body>text &lt;p&gt; more</body>"));
    }

    #[test]
    fn test_is_escaped_literal_markup() {
        assert!(!is_escaped("<div id=\"product-1\">Milk</div>"));
        assert!(!is_escaped("<p>5 &lt; 6</p>"));
        assert!(!is_escaped(""));
    }

    #[test]
    fn test_decode_basic_entities() {
        assert_eq!(
            decode_basic_entities("&lt;a href=&quot;x&quot;&gt;Tom&#39;s&lt;/a&gt;"),
            "<a href=\"x\">Tom's</a>"
        );
    }

    #[test]
    fn test_decode_leaves_other_entities() {
        assert_eq!(decode_basic_entities("&nbsp;&pound;2 &#163;"), "&nbsp;&pound;2 &#163;");
    }

    #[test]
    fn test_decode_order_is_single_pass_per_entity() {
        // "&amp;lt;" is decoded after "&lt;", so it only loses one level.
        assert_eq!(decode_basic_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_basic_entities("&amp;quot;"), "\"");
    }

    #[test]
    fn test_unwrap_literal_passthrough() {
        let html = "<div id=\"product-1\"><span class=\"product-name\">Milk</span></div>";
        assert_eq!(unwrap_listing(html), html);
    }

    #[test]
    fn test_unwrap_bare_escaped_content() {
        let raw = "&lt;div&gt;&lt;p&gt;Widget&lt;/p&gt;&lt;/div&gt;";
        assert_eq!(unwrap_listing(raw), "<div><p>Widget</p></div>");
    }

    #[test]
    fn test_unwrap_rich_text_node() {
        let raw = r#"<html><body>
            <p>Intro paragraph</p>
            <div class="rich-text-content"><pre>&lt;div id=&quot;product-7&quot;&gt;Eggs&lt;/div&gt;</pre></div>
        </body></html>"#;
        assert_eq!(unwrap_listing(raw), r#"<div id="product-7">Eggs</div>"#);
    }

    #[test]
    fn test_unwrap_falls_back_to_first_paragraph() {
        let raw = r#"<html><body><p>&lt;div id=&quot;product-9&quot;&gt;Tea&lt;/div&gt;</p></body></html>"#;
        assert_eq!(unwrap_listing(raw), r#"<div id="product-9">Tea</div>"#);
    }

    #[test]
    fn test_unwrap_gives_up_without_marker() {
        // Escaped, but no wrapper node, no paragraph, and no `&lt;div` marker.
        let raw = "&lt;span&gt;Tea&lt;/span&gt;";
        assert_eq!(unwrap_listing(raw), raw);
    }
}
