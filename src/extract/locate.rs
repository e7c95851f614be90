use lazy_static::lazy_static;
use regex::Regex;

use crate::common::Located;
use crate::extract::doi::{find_occurrence, Occurrence, TargetIdentifier};
use crate::extract::suffix_chars;
use crate::pdf::Page;

/// Number of characters taken before the identifier occurrence
const PRE_WINDOW: usize = 256;

lazy_static! {
    /// A bibliography-entry prefix: line start, capital letter, a
    /// parenthesized year, anything up to the end of the window. DOTALL so
    /// entries wrapped across lines still match.
    static ref REF_ENTRY: Regex =
        Regex::new(r"(?s)(?:\n|^)[A-Z].*?\((?:19|20)\d\d\).*?$").unwrap();
}

/// Scan pages in order for the first occurrence of the target identifier
/// and cut out the citation text preceding it. Scanning stops at the first
/// page with a hit; one location is enough to derive a tag for the re-scan
/// phase.
pub fn locate(pages: &[Page], target: &TargetIdentifier) -> Option<Located> {
    for page in pages {
        let text = page
            .blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        if let Some(occ) = find_occurrence(&text, target) {
            return Some(Located {
                page_num: page.number,
                content: citation_content(&text, &occ),
            });
        }
    }
    None
}

/// Cut the citation content for one identifier occurrence: up to 256
/// characters of preceding text, narrowed to the first bibliography-entry
/// shaped prefix when one exists, concatenated with the occurrence as it
/// literally appears in the text. Falls back to the raw window when the
/// entry pattern misses.
pub fn citation_content(text: &str, occ: &Occurrence) -> String {
    let found = &text[occ.start..occ.end];
    let window = suffix_chars(&text[..occ.start], PRE_WINDOW);

    match REF_ENTRY.find(window) {
        Some(m) => format!("{}{}", m.as_str(), found).trim().to_string(),
        None => format!("{}{}", window, found).trim().to_string(),
    }
}
