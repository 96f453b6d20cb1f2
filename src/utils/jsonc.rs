use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;

static BLOCK_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\*[\s\S]*?\*/").expect("valid block comment regex"));
static LINE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)//.*$").expect("valid line comment regex"));

/// Remove `/* */` and `//` comments from JSONC text.
///
/// A `//` run is kept when an odd number of `"` characters precede it, which
/// treats it as sitting inside a string. Escaped quotes throw the count off;
/// inputs with `\"` before a URL-like value may be mangled, and `/* */` inside
/// a string is removed. Only used for tolerant credential detection; never
/// feed its output back to disk.
pub fn strip_comments(text: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(text, "");
    let source: &str = &without_blocks;

    LINE_COMMENT
        .replace_all(source, |caps: &Captures| {
            let whole = &caps[0];
            let offset = caps.get(0).map(|m| m.start()).unwrap_or(0);
            let quotes = source[..offset].matches('"').count();
            if quotes % 2 == 1 {
                whole.to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

/// Parse JSONC text into a JSON value.
pub fn parse(text: &str) -> serde_json::Result<Value> {
    serde_json::from_str(&strip_comments(text))
}
