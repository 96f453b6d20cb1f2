//! The one place that splices text around a markdown frontmatter block.

const OPEN: &str = "---\n";
const CLOSE: &str = "\n---\n";

/// Split `content` into its leading frontmatter block (delimiters included)
/// and the remaining body. Returns `None` when there is no closed block.
pub fn split(content: &str) -> Option<(&str, &str)> {
    if !content.starts_with(OPEN) {
        return None;
    }
    let search_from = OPEN.len() - 1;
    let close = content[search_from..].find(CLOSE)? + search_from;
    let end = close + CLOSE.len();
    Some((&content[..end], &content[end..]))
}

/// Insert `preamble` between the frontmatter block and the body.
///
/// The body is trimmed at the start so the preamble is followed by exactly
/// one blank line. Without frontmatter the preamble is prepended.
pub fn insert_after_frontmatter(content: &str, preamble: &str) -> String {
    match split(content) {
        Some((frontmatter, body)) => {
            format!("{}\n{}\n\n{}", frontmatter, preamble, body.trim_start())
        }
        None => format!("{}\n\n{}", preamble, content),
    }
}
