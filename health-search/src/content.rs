//! HTML content extraction: strips boilerplate and returns a bounded excerpt.
//!
//! Medical sites vary widely in markup, so the main text is located by
//! trying semantic containers first and progressively looser selectors
//! after that, falling back to the whole document when nothing matches.

use std::sync::Arc;

use scraper::{Html, Selector};

use crate::fetch::PageFetcher;
use crate::text::{collapse_whitespace, truncate_chars};
use crate::types::Outcome;

/// Maximum characters returned by [`extract_text`].
pub const MAX_CONTENT_CHARS: usize = 2000;

/// Selectors tried in order; the first with at least one match wins.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    ".content",
    ".article-content",
    ".post-content",
    ".entry-content",
    "p",
];

/// Elements that never hold page content.
const BOILERPLATE_TAGS: &[&str] = &["script", "style", "nav", "header", "footer", "aside"];

/// Fetches pages and reduces them to plain-text excerpts.
#[derive(Clone)]
pub struct ContentExtractor {
    fetcher: Arc<dyn PageFetcher>,
}

impl ContentExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetch `url` and extract at most [`MAX_CONTENT_CHARS`] of readable text.
    ///
    /// Fetch failures come back as [`Outcome::Degraded`]; pages with no
    /// text at all come back as [`Outcome::Empty`].
    pub async fn extract(&self, url: &str) -> Outcome<String> {
        let html = match self.fetcher.fetch(url).await {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!(url, error = %err, "page fetch failed");
                return Outcome::Degraded(err.to_string());
            }
        };

        let text = extract_text(&html);
        if text.is_empty() {
            tracing::debug!(url, "page had no extractable text");
            return Outcome::Empty;
        }

        tracing::debug!(url, chars = text.chars().count(), "page content extracted");
        Outcome::Ready(text)
    }
}

/// Extract readable text from raw HTML.
///
/// Boilerplate elements are removed from the parsed tree first, then
/// [`CONTENT_SELECTORS`] are tried in priority order. Text nodes inside one
/// element are concatenated as-is, so inline markup adds no spacing; separate
/// matched elements are joined with a space. Whitespace is collapsed to single
/// spaces and the result is truncated to [`MAX_CONTENT_CHARS`] characters.
pub fn extract_text(html: &str) -> String {
    let mut document = Html::parse_document(html);
    remove_boilerplate(&mut document);

    let raw = select_main_text(&document)
        .unwrap_or_else(|| document.root_element().text().collect::<String>());

    truncate_chars(&collapse_whitespace(&raw), MAX_CONTENT_CHARS)
}

/// Text of every element matched by the first selector that matches anything.
fn select_main_text(document: &Html) -> Option<String> {
    for selector_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        let parts: Vec<String> = document
            .select(&selector)
            .map(|el| el.text().collect::<String>().trim().to_owned())
            .collect();
        if !parts.is_empty() {
            return Some(parts.join(" "));
        }
    }
    None
}

/// Detach boilerplate elements, and everything under them, from the tree.
///
/// Works on parsed elements, so tag-like text inside comments, attributes
/// or script bodies is never mistaken for markup.
fn remove_boilerplate(document: &mut Html) {
    let Ok(selector) = Selector::parse(&BOILERPLATE_TAGS.join(", ")) else {
        return;
    };
    let ids: Vec<_> = document.select(&selector).map(|el| el.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}
