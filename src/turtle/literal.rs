//! Plain-text extraction from string literal tokens.

use std::sync::LazyLock;

use regex::Regex;

static RE_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)^"(.*)"(@[A-Za-z0-9_-]+)?$"#).unwrap());

/// Strip the quotes and any `@lang` tag from a literal token.
///
/// Datatype suffixes (`^^xsd:int`) are not removed, so typed literals come
/// back unchanged. Anything that is not a quoted literal is also returned
/// unchanged; callers compare input and output to tell literals from terms.
pub fn clean_literal(token: &str) -> &str {
    match RE_LITERAL.captures(token).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str(),
        None => token,
    }
}

/// Whether [`clean_literal`] would change this token.
pub fn is_plain_literal(token: &str) -> bool {
    RE_LITERAL.is_match(token)
}
