use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use crate::common::CitationRecord;

/// Read the input manifest CSV into citation records.
///
/// Required columns: `article_id`, `dataset_id`. Optional columns: `type`
/// (ground-truth label) and `row_id`; when `row_id` is absent, sequential
/// 1-based ids are assigned in input order.
pub fn read_manifest(path: &Path) -> Result<Vec<CitationRecord>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to open manifest: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to parse manifest: {}", path.display()))?;

    // Schema inference types purely numeric ids as integers; cast every
    // column to its expected dtype before reading.
    let article_id = df
        .column("article_id")
        .context("Manifest is missing the 'article_id' column")?
        .cast(&DataType::String)?;
    let article_id = article_id.str()?;
    let dataset_id = df
        .column("dataset_id")
        .context("Manifest is missing the 'dataset_id' column")?
        .cast(&DataType::String)?;
    let dataset_id = dataset_id.str()?;
    let type_col = df
        .column("type")
        .ok()
        .map(|c| c.cast(&DataType::String))
        .transpose()?;
    let type_col = type_col.as_ref().map(|c| c.str()).transpose()?;
    let row_id_col = df
        .column("row_id")
        .ok()
        .map(|c| c.cast(&DataType::Int64))
        .transpose()?;
    let row_id_col = row_id_col.as_ref().map(|c| c.i64()).transpose()?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let row_id = row_id_col
            .and_then(|c| c.get(i))
            .unwrap_or(i as i64 + 1);
        let type_true = type_col
            .and_then(|c| c.get(i))
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string());

        records.push(CitationRecord::new(
            row_id,
            article_id.get(i).unwrap_or("").to_string(),
            dataset_id.get(i).unwrap_or("").to_string(),
            type_true,
        ));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_manifest(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_read_manifest_minimal_columns() {
        let (_dir, path) = write_manifest(
            "article_id,dataset_id\nA1,https://doi.org/10.1/x\nA2,https://doi.org/10.2/y\n",
        );
        let records = read_manifest(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].article_id, "A1");
        assert_eq!(records[0].row_id, 1);
        assert_eq!(records[1].row_id, 2);
        assert_eq!(records[0].type_true, "Missing");
    }

    #[test]
    fn test_read_manifest_with_optional_columns() {
        let (_dir, path) = write_manifest(
            "row_id,article_id,dataset_id,type\n7,A1,https://doi.org/10.1/x,Primary\n",
        );
        let records = read_manifest(&path).unwrap();
        assert_eq!(records[0].row_id, 7);
        assert_eq!(records[0].type_true, "Primary");
    }

    #[test]
    fn test_read_manifest_numeric_article_id() {
        // Ids made of digits only must still come back as strings
        let (_dir, path) = write_manifest(
            "article_id,dataset_id\n123,https://doi.org/10.1/x\n456,https://doi.org/10.2/y\n",
        );
        let records = read_manifest(&path).unwrap();
        assert_eq!(records[0].article_id, "123");
        assert_eq!(records[1].article_id, "456");
    }

    #[test]
    fn test_read_manifest_missing_required_column() {
        let (_dir, path) = write_manifest("article_id\nA1\n");
        assert!(read_manifest(&path).is_err());
    }
}
