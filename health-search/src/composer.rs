//! Templated answer assembly with inline source citations.
//!
//! The answer is built by direct concatenation of up to three sections,
//! each included only when it has data:
//!
//! 1. Up to three leading sentences from each of the first two extracted pages
//! 2. Key points: the snippets of the first three results
//! 3. A short list of trusted sources as `title - domain`

use crate::text::truncate_chars;
use crate::types::{DetailedInfo, SearchResult};

/// Answer used when there are no search results at all.
pub const FALLBACK_RESPONSE: &str = "I couldn't find current information about your query. Please consult with a healthcare professional.";

const LEAD_IN: &str = "Based on current medical information:";
const MAX_DETAILED_SOURCES: usize = 2;
const SENTENCES_PER_SOURCE: usize = 3;
const MAX_KEY_POINTS: usize = 3;
const SNIPPET_CHARS: usize = 150;
const MAX_LISTED_SOURCES: usize = 3;

/// Compose the answer text for `query`.
pub fn compose_response(
    query: &str,
    results: &[SearchResult],
    detailed: &[DetailedInfo],
) -> String {
    if results.is_empty() {
        return FALLBACK_RESPONSE.to_owned();
    }

    let mut response = String::new();

    if !detailed.is_empty() {
        response.push_str(LEAD_IN);
        for info in detailed.iter().take(MAX_DETAILED_SOURCES) {
            let key_info = leading_sentences(&info.content);
            if !key_info.is_empty() {
                response.push_str(&format!("\nFrom {}: {key_info}", info.source));
            }
        }
    }

    response.push_str(&format!("\n\nKey points about '{query}':"));
    for result in results
        .iter()
        .take(MAX_KEY_POINTS)
        .filter(|r| !r.snippet.is_empty())
    {
        response.push_str(&format!(
            "\n• {}",
            truncate_chars(&result.snippet, SNIPPET_CHARS)
        ));
    }

    let mut trusted = results.iter().filter(|r| r.is_trusted_source).peekable();
    if trusted.peek().is_some() {
        response.push_str("\n\nTrusted medical sources:");
        for source in trusted.take(MAX_LISTED_SOURCES) {
            response.push_str(&format!("\n• {} - {}", source.title, source.domain));
        }
    }

    response
}

/// First pieces of `content` split on `.`, rejoined with `". "` and trimmed.
fn leading_sentences(content: &str) -> String {
    content
        .split('.')
        .take(SENTENCES_PER_SOURCE)
        .collect::<Vec<_>>()
        .join(". ")
        .trim()
        .to_owned()
}
