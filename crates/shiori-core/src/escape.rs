//! Escaping for untrusted text interpolated into markup and URLs.

use std::sync::LazyLock;

use regex::Regex;
use url::form_urlencoded;

static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Maximum length of a cleaned description, in characters.
pub const DESCRIPTION_LIMIT: usize = 200;

/// Escape text for use in element content or a quoted attribute value.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a single path segment or query value.
///
/// Only ASCII alphanumerics and `*-._` pass through; space becomes `%20`.
pub fn encode_component(input: &str) -> String {
    form_urlencoded::byte_serialize(input.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Strip tags from a free-text description, collapse `&nbsp;` and newlines,
/// and truncate to [`DESCRIPTION_LIMIT`] characters with an ellipsis.
///
/// The result is plain text and still needs [`escape_html`].
pub fn clean_description(raw: &str) -> String {
    let stripped = RE_TAG
        .replace_all(raw, "")
        .replace("&nbsp;", " ")
        .replace('\n', " ");
    if stripped.chars().count() > DESCRIPTION_LIMIT {
        let mut truncated: String = stripped.chars().take(DESCRIPTION_LIMIT).collect();
        truncated.push_str("...");
        truncated
    } else {
        stripped
    }
}
