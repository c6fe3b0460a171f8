//! Article body sanitization.
//!
//! Two output paths:
//! - Content containing the substring `</` is treated as HTML and run through
//!   an allow-list sanitizer. Tags outside the allow-list are removed but their
//!   text is kept; `script` and `style` are removed together with their body.
//! - Anything else is plain text. It is passed through verbatim and escaped by
//!   the template, never emitted as raw markup.
//!
//! The `</` test is a heuristic: a body with a lone `<br>` and no closing tag
//! is rendered as escaped text.

use std::collections::HashSet;

use crate::site::view_models::ArticleContent;

/// Tags dropped together with everything inside them.
pub const STRIPPED_WITH_BODY: [&str; 2] = ["script", "style"];

pub fn looks_like_html(content: &str) -> bool {
    content.contains("</")
}

pub fn sanitize_html(raw: &str) -> String {
    let clean_content: HashSet<&str> = STRIPPED_WITH_BODY.iter().copied().collect();
    ammonia::Builder::default()
        .clean_content_tags(clean_content)
        .clean(raw)
        .to_string()
}

pub fn render_article_content(raw: &str) -> ArticleContent {
    if looks_like_html(raw) {
        ArticleContent::Html(sanitize_html(raw))
    } else {
        ArticleContent::PlainText(raw.to_string())
    }
}
