pub mod context;
pub mod doi;
pub mod locate;
pub mod tag;

pub use context::rescan;
pub use doi::{find_occurrence, longest_match, TargetIdentifier};
pub use locate::{citation_content, locate};
pub use tag::extract_ref_tag;

use crate::common::{Contextualized, Extraction, Tagged};
use crate::pdf::Page;

/// Drive the three-stage pipeline over one document: locate the identifier,
/// derive the recurring tag, re-scan for other occurrences of the tag.
/// Each stage short-circuits into a terminal state when its input is absent.
pub fn extract_citation(pages: &[Page], target: &TargetIdentifier) -> Extraction {
    let Some(located) = locate(pages, target) else {
        return Extraction::NotFound;
    };

    let Some(tag) = extract_ref_tag(&located.content) else {
        return Extraction::FoundNoTag(located);
    };

    let contexts = rescan(pages, &tag);
    Extraction::FoundWithContexts(Contextualized {
        tagged: Tagged { located, tag },
        contexts,
    })
}

/// Last `n` characters of `s` (chars, not bytes)
pub(crate) fn suffix_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return &s[s.len()..];
    }
    let cut = s
        .char_indices()
        .rev()
        .nth(n - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &s[cut..]
}

/// First `n` characters of `s` (chars, not bytes)
pub(crate) fn prefix_chars(s: &str, n: usize) -> &str {
    let cut = s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len());
    &s[..cut]
}
