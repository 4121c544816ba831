//! Small text normalisation helpers shared by the extractors.

/// Upper-cases the first character of every space-separated token and
/// lower-cases the rest. Tokens are kept exactly as split, so runs of
/// spaces survive.
///
/// Only the leading character of an upper-case expansion stays upper
/// case (`ß` becomes `Ss`), which keeps the function idempotent.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|token| {
            let mut chars = token.chars();
            match chars.next() {
                Some(first) => {
                    let mut upper = first.to_uppercase();
                    let head = upper.next();
                    head.into_iter()
                        .chain(upper.flat_map(char::to_lowercase))
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Returns the trimmed text, or `None` when nothing but whitespace remains.
pub fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
