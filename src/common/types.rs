use serde::{Deserialize, Serialize};

/// Sentinel used for classification labels that were never assigned
pub const MISSING_LABEL: &str = "Missing";

/// One bounded text window around a tag occurrence, with its 1-based page number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationContext {
    pub page: u32,
    pub content: String,
}

/// Result of the locate stage: the identifier was found on a page and the
/// surrounding citation text was cut out
#[derive(Debug, Clone, PartialEq)]
pub struct Located {
    pub page_num: u32,
    pub content: String,
}

/// Result of the tag stage: a recurring reference marker was derived from
/// the located citation content
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged {
    pub located: Located,
    pub tag: String,
}

/// Result of the re-scan stage: every block containing the tag contributed
/// one context window
#[derive(Debug, Clone, PartialEq)]
pub struct Contextualized {
    pub tagged: Tagged,
    pub contexts: Vec<CitationContext>,
}

/// Terminal state of the three-stage extraction pipeline.
///
/// Each stage short-circuits: no identifier hit means no tag derivation,
/// no tag means no context re-scan.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    NotFound,
    FoundNoTag(Located),
    FoundWithContexts(Contextualized),
}

/// One citation record: manifest identity plus extraction results.
///
/// Constructed from a manifest row with sentinel values, folded together
/// with a terminal [`Extraction`] exactly once, then serialized read-only.
#[derive(Debug, Clone)]
pub struct CitationRecord {
    pub row_id: i64,
    pub article_id: String,
    pub dataset_id: String,
    pub type_true: String,
    pub type_pred: String,
    pub page_num: i64,
    pub content: String,
    pub tag: Option<String>,
    pub ref_contexts: Vec<CitationContext>,
}

impl CitationRecord {
    pub fn new(row_id: i64, article_id: String, dataset_id: String, type_true: Option<String>) -> Self {
        Self {
            row_id,
            article_id,
            dataset_id,
            type_true: type_true.unwrap_or_else(|| MISSING_LABEL.to_string()),
            type_pred: MISSING_LABEL.to_string(),
            page_num: -1,
            content: String::new(),
            tag: None,
            ref_contexts: Vec::new(),
        }
    }

    /// Fold a terminal extraction state into the record
    pub fn with_extraction(mut self, extraction: Extraction) -> Self {
        match extraction {
            Extraction::NotFound => {}
            Extraction::FoundNoTag(located) => {
                self.page_num = located.page_num as i64;
                self.content = located.content;
            }
            Extraction::FoundWithContexts(contextualized) => {
                self.page_num = contextualized.tagged.located.page_num as i64;
                self.content = contextualized.tagged.located.content;
                self.tag = Some(contextualized.tagged.tag);
                self.ref_contexts = contextualized.contexts;
            }
        }
        self
    }
}

/// Statistics from one extract run
#[derive(Debug, Clone, Default)]
pub struct ExtractStats {
    pub total_articles: usize,
    pub documents_failed: usize,
    pub citations_located: usize,
    pub tags_derived: usize,
    pub contexts_found: usize,
    pub records_written: usize,
}
