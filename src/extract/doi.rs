use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Trailing dataset version suffix, e.g. ".v3"
    static ref VERSION_SUFFIX: Regex = Regex::new(r"\.v\d+$").unwrap();
}

const CANONICAL_RESOLVER: &str = "https://doi.org/";

/// Alternate resolver prefixes unified into [`CANONICAL_RESOLVER`]
const RESOLVER_PREFIXES: &[&str] = &[
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
];

/// Lead-in keywords for the fuzzy reconciliation scan, matched on
/// lower-cased text. Longer keywords first so "doi.org/" wins over "doi".
const DOI_KEYWORDS: &[&str] = &["doi.org/", "doi"];

/// A target dataset identifier in canonical form.
///
/// Normalization strips a trailing `.v<digits>` version suffix, lower-cases
/// the identifier, and rewrites alternate resolver prefixes to
/// `https://doi.org/`. The bare form is the suffix after the resolver host
/// (the whole identifier when no resolver prefix is present).
#[derive(Debug, Clone, PartialEq)]
pub struct TargetIdentifier {
    normalized: String,
    bare: String,
}

impl TargetIdentifier {
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim();
        let unversioned = VERSION_SUFFIX.replace(trimmed, "").to_lowercase();

        let (normalized, bare) = RESOLVER_PREFIXES
            .iter()
            .find_map(|prefix| {
                unversioned
                    .strip_prefix(prefix)
                    .map(|suffix| (format!("{}{}", CANONICAL_RESOLVER, suffix), suffix.to_string()))
            })
            .unwrap_or_else(|| (unversioned.clone(), unversioned.clone()));

        Self { normalized, bare }
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn bare(&self) -> &str {
        &self.bare
    }
}

/// Byte range of one identifier occurrence within a scanned text
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    pub start: usize,
    pub end: usize,
}

/// Find the longest trailing substring of `doi` that occurs literally in
/// `text`, case-insensitively. Returns the matched slice of `text` as it
/// appears in the source, or `None` when even the single last character of
/// `doi` is absent.
pub fn longest_match<'t>(text: &'t str, doi: &str) -> Option<&'t str> {
    longest_occurrence(text, doi).map(|occ| &text[occ.start..occ.end])
}

/// Position-reporting variant of [`longest_match`]
pub fn longest_occurrence(text: &str, doi: &str) -> Option<Occurrence> {
    let text_lower = text.to_ascii_lowercase();
    let doi_lower = doi.to_ascii_lowercase();

    for (idx, _) in doi_lower.char_indices() {
        let suffix = &doi_lower[idx..];
        if let Some(start) = text_lower.find(suffix) {
            return Some(Occurrence {
                start,
                end: start + suffix.len(),
            });
        }
    }
    None
}

/// Find one occurrence of the target identifier in `text`.
///
/// The cheap path requires the bare identifier to appear contiguously
/// (case-insensitively) and then reports the longest-match position. When
/// extraction noise breaks the identifier apart, [`reconcile`] takes over.
pub fn find_occurrence(text: &str, target: &TargetIdentifier) -> Option<Occurrence> {
    let text_lower = text.to_ascii_lowercase();
    if text_lower.contains(target.bare()) {
        if let Some(occ) = longest_occurrence(text, target.normalized()) {
            return Some(occ);
        }
    }
    reconcile(text, target)
}

/// State of the reconciliation scanner
enum ScanState {
    SeekKeyword,
    Accumulate { keyword_start: usize, keyword_len: usize },
}

/// Aggressive reconciliation pass for identifiers fragmented by stray line
/// breaks or case changes.
///
/// Scans for a lead-in keyword, then accumulates the following characters
/// (whitespace stripped, lower-cased) and compares the accumulation against
/// the bare and full candidate strings after every character. Accepting
/// requires exact equality with either candidate; the scan restarts past the
/// consumed keyword as soon as the accumulation is a prefix of neither.
/// Every failed keyword occurrence advances the position strictly forward,
/// so the scan terminates.
pub fn reconcile(text: &str, target: &TargetIdentifier) -> Option<Occurrence> {
    let lower = text.to_ascii_lowercase();
    let candidates = [target.bare(), target.normalized()];

    let mut pos = 0;
    let mut state = ScanState::SeekKeyword;

    while pos < lower.len() {
        match state {
            ScanState::SeekKeyword => match keyword_at(&lower, pos) {
                Some(len) => {
                    state = ScanState::Accumulate {
                        keyword_start: pos,
                        keyword_len: len,
                    };
                }
                None => {
                    pos += next_char_len(&lower, pos);
                }
            },
            ScanState::Accumulate {
                keyword_start,
                keyword_len,
            } => {
                match accumulate(&lower, keyword_start + keyword_len, &candidates) {
                    Some(end) => {
                        return Some(Occurrence {
                            start: keyword_start,
                            end,
                        });
                    }
                    None => {
                        // Advance past the consumed keyword occurrence
                        pos = keyword_start + keyword_len;
                        state = ScanState::SeekKeyword;
                    }
                }
            }
        }
    }
    None
}

fn keyword_at(lower: &str, pos: usize) -> Option<usize> {
    DOI_KEYWORDS
        .iter()
        .find(|kw| lower[pos..].starts_with(*kw))
        .map(|kw| kw.len())
}

fn next_char_len(s: &str, pos: usize) -> usize {
    s[pos..].chars().next().map_or(1, |c| c.len_utf8())
}

/// Accumulate identifier characters starting after a keyword occurrence.
/// Returns the byte position one past the last accumulated character when
/// the accumulation equals one of the candidates.
fn accumulate(lower: &str, from: usize, candidates: &[&str]) -> Option<usize> {
    let mut acc = String::new();
    let mut seen_identifier_char = false;

    for (offset, c) in lower[from..].char_indices() {
        if c.is_whitespace() {
            continue;
        }
        // A separator run (e.g. the colon in "DOI: 10.x") may precede the
        // identifier itself
        if !seen_identifier_char && c == ':' {
            continue;
        }
        seen_identifier_char = true;

        acc.push(c);
        if candidates.iter().any(|cand| **cand == acc) {
            return Some(from + offset + c.len_utf8());
        }
        if !candidates.iter().any(|cand| cand.starts_with(&acc)) {
            return None;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_is_idempotent() {
        let once = TargetIdentifier::new("HTTP://doi.org/10.17882/49388.v2");
        let twice = TargetIdentifier::new(once.normalized());
        assert_eq!(once.normalized(), twice.normalized());
        assert_eq!(once.bare(), twice.bare());
    }

    #[test]
    fn test_normalize_unifies_resolver_prefixes() {
        for raw in [
            "https://doi.org/10.17882/49388",
            "http://doi.org/10.17882/49388",
            "https://dx.doi.org/10.17882/49388",
            "http://dx.doi.org/10.17882/49388",
        ] {
            let target = TargetIdentifier::new(raw);
            assert_eq!(target.normalized(), "https://doi.org/10.17882/49388");
            assert_eq!(target.bare(), "10.17882/49388");
        }
    }

    #[test]
    fn test_normalize_strips_version_suffix() {
        let target = TargetIdentifier::new("https://doi.org/10.5061/dryad.v2t58.v3");
        assert_eq!(target.bare(), "10.5061/dryad.v2t58");
    }

    #[test]
    fn test_normalize_lowercases_suffix() {
        let target = TargetIdentifier::new("https://doi.org/10.1/XYZ");
        assert_eq!(target.normalized(), "https://doi.org/10.1/xyz");
    }

    #[test]
    fn test_normalize_without_resolver_prefix() {
        let target = TargetIdentifier::new("10.17882/49388");
        assert_eq!(target.normalized(), "10.17882/49388");
        assert_eq!(target.bare(), "10.17882/49388");
    }

    #[test]
    fn test_longest_match_full_identifier() {
        let text = "data at https://doi.org/10.17882/49388 repository";
        assert_eq!(
            longest_match(text, "https://doi.org/10.17882/49388"),
            Some("https://doi.org/10.17882/49388")
        );
    }

    #[test]
    fn test_longest_match_partial_suffix() {
        let text = "broken identifier tail 17882/49388 only";
        assert_eq!(
            longest_match(text, "https://doi.org/10.17882/49388"),
            Some("17882/49388")
        );
    }

    #[test]
    fn test_longest_match_case_insensitive_returns_source_slice() {
        let text = "see HTTPS://DOI.ORG/10.1/XYZ today";
        assert_eq!(
            longest_match(text, "https://doi.org/10.1/xyz"),
            Some("HTTPS://DOI.ORG/10.1/XYZ")
        );
    }

    #[test]
    fn test_longest_match_absent() {
        assert_eq!(longest_match("no digits here", "10.1/xyz8"), None);
    }

    #[test]
    fn test_find_occurrence_exact() {
        let target = TargetIdentifier::new("https://doi.org/10.1/XYZ");
        let text = "Doe, J. (2020). Some Title. https://doi.org/10.1/xyz";
        let occ = find_occurrence(text, &target).unwrap();
        assert_eq!(&text[occ.start..occ.end], "https://doi.org/10.1/xyz");
    }

    #[test]
    fn test_find_occurrence_none() {
        let target = TargetIdentifier::new("https://doi.org/10.1/xyz");
        assert_eq!(find_occurrence("unrelated text entirely", &target), None);
    }

    #[test]
    fn test_reconcile_fragmented_url() {
        let target = TargetIdentifier::new("https://doi.org/10.5061/dryad.v2t58.v3");
        let text = "Data available from https://doi.org/10.5061/\ndryad.v2t58 repository.";
        let occ = reconcile(text, &target).unwrap();
        assert!(text[occ.start..occ.end].starts_with("doi.org/10.5061/"));
        assert!(text[occ.start..occ.end].ends_with("dryad.v2t58"));
    }

    #[test]
    fn test_reconcile_doi_colon_prefix() {
        let target = TargetIdentifier::new("https://doi.org/10.17882/49388");
        let text = "Argo float data (DOI: 10.17882/49388) were used.";
        let occ = reconcile(text, &target).unwrap();
        assert_eq!(&text[occ.start..occ.end], "DOI: 10.17882/49388");
    }

    #[test]
    fn test_reconcile_restarts_past_failed_keyword() {
        let target = TargetIdentifier::new("https://doi.org/10.17882/49388");
        // First "DOI" mention is followed by unrelated text; second one matches
        let text = "the DOI system assigns identifiers; cite as doi:10.17882/49388 please";
        let occ = reconcile(text, &target).unwrap();
        assert_eq!(&text[occ.start..occ.end], "doi:10.17882/49388");
    }

    #[test]
    fn test_reconcile_terminates_on_pathological_text() {
        let target = TargetIdentifier::new("https://doi.org/10.17882/49388");
        let text = "doi doi doi doi doi doi doi doi doi doi".repeat(100);
        assert_eq!(reconcile(&text, &target), None);
    }

    #[test]
    fn test_reconcile_whitespace_inside_identifier() {
        let target = TargetIdentifier::new("https://doi.org/10.17882/49388");
        let text = "available at DOI 10.17882/\n49388 online";
        let occ = reconcile(text, &target).unwrap();
        assert!(text[occ.start..occ.end].ends_with("49388"));
    }

    #[test]
    fn test_version_suffix_reconciliation_via_find_occurrence() {
        let target = TargetIdentifier::new("https://doi.org/10.5061/dryad.v2t58.v3");
        let text = "deposited in Dryad: 10.5061/dryad.v2t58 (accessed 2020)";
        let occ = find_occurrence(text, &target).unwrap();
        assert!(text[occ.start..occ.end].ends_with("10.5061/dryad.v2t58"));
    }
}
