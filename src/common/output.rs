use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::common::CitationRecord;

/// Default export filename, with the run timestamp embedded
pub fn default_output_path() -> Result<String> {
    let timestamp = OffsetDateTime::now_utc()
        .format(format_description!("[year][month][day]_[hour][minute][second]"))
        .context("Failed to format run timestamp")?;
    Ok(format!("dataset_citations_{}.csv", timestamp))
}

/// Write all citation records to a CSV file in a single full write.
///
/// `ref_contexts` is serialized as a JSON array of `{page, content}` objects.
pub fn write_records(records: &[CitationRecord], path: &Path) -> Result<()> {
    let ref_contexts = records
        .iter()
        .map(|r| serde_json::to_string(&r.ref_contexts))
        .collect::<Result<Vec<_>, _>>()
        .context("Failed to serialize ref_contexts")?;

    let mut df = df!(
        "row_id" => records.iter().map(|r| r.row_id).collect::<Vec<_>>(),
        "article_id" => records.iter().map(|r| r.article_id.as_str()).collect::<Vec<_>>(),
        "dataset_id" => records.iter().map(|r| r.dataset_id.as_str()).collect::<Vec<_>>(),
        "type_true" => records.iter().map(|r| r.type_true.as_str()).collect::<Vec<_>>(),
        "type_pred" => records.iter().map(|r| r.type_pred.as_str()).collect::<Vec<_>>(),
        "page_num" => records.iter().map(|r| r.page_num).collect::<Vec<_>>(),
        "content" => records.iter().map(|r| r.content.as_str()).collect::<Vec<_>>(),
        "tag" => records.iter().map(|r| r.tag.clone()).collect::<Vec<Option<String>>>(),
        "ref_contexts" => ref_contexts,
    )?;

    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;

    Ok(())
}
