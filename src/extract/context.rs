use crate::common::CitationContext;
use crate::extract::{prefix_chars, suffix_chars};
use crate::pdf::Page;

/// Characters of context kept before a tag occurrence
const BEFORE_WINDOW: usize = 256;
/// Characters of context kept after a tag occurrence
const AFTER_WINDOW: usize = 128;

/// Re-scan the whole document for other occurrences of the derived tag.
///
/// Every block is whitespace-normalized (runs collapsed to one space) and
/// contributes at most one context, around the first occurrence of the tag
/// within it. Windows are clipped at block boundaries. Emission order is
/// page order, then block order.
pub fn rescan(pages: &[Page], tag: &str) -> Vec<CitationContext> {
    let mut contexts = Vec::new();

    for page in pages {
        for block in &page.blocks {
            let normalized = normalize_whitespace(&block.text);
            if let Some(idx) = normalized.find(tag) {
                let before = suffix_chars(&normalized[..idx], BEFORE_WINDOW);
                let after = prefix_chars(&normalized[idx + tag.len()..], AFTER_WINDOW);
                contexts.push(CitationContext {
                    page: page.number,
                    content: format!("{}{}{}", before, tag, after),
                });
            }
        }
    }

    contexts
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
