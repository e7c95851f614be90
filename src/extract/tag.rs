use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Single author surname opening a bibliography entry, e.g. "Barbieux, M."
    static ref AUTHOR_PATTERN: Regex = Regex::new(r"^([A-Z][a-z]+),\s+[A-Z]\.").unwrap();

    /// Parenthesized publication year, 1900-2099
    static ref YEAR_PATTERN: Regex = Regex::new(r"\(((?:19|20)\d\d)\)").unwrap();

    /// Bracketed reference number opening an entry, e.g. "[12]"
    static ref REF_NUM_PATTERN: Regex = Regex::new(r"^\[(\d+)\]").unwrap();
}

/// Derive the recurring reference marker from a citation-content string.
///
/// Author-year entries yield `"(<surname> et al., <year>)"`; numeric entries
/// yield `"[<digits>]"`. Only the first candidate per pattern is used: the
/// content is assumed to hold exactly one bibliography entry. Returns `None`
/// when neither heuristic applies.
pub fn extract_ref_tag(content: &str) -> Option<String> {
    if let Some(author) = AUTHOR_PATTERN.captures(content) {
        if let Some(year) = YEAR_PATTERN.captures(content) {
            return Some(format!("({} et al., {})", &author[1], &year[1]));
        }
    }

    REF_NUM_PATTERN
        .captures(content)
        .map(|c| format!("[{}]", &c[1]))
}
