use anyhow::Result;
use indicatif::ProgressBar;
use log::{error, info};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::cli::ExtractArgs;
use crate::common::{
    create_count_progress_bar, default_output_path, format_elapsed, read_manifest, setup_logging,
    write_records, CitationRecord, ExtractStats,
};
use crate::extract::{extract_citation, TargetIdentifier};
use crate::pdf::{MupdfBackend, PdfBackend};

/// Run the extract command: read the manifest, drive the citation pipeline
/// over each article's PDF, export all records as CSV.
pub fn run_extract(args: ExtractArgs) -> Result<ExtractStats> {
    let start_time = Instant::now();

    setup_logging(&args.log_level)?;

    let output = match &args.output {
        Some(path) => path.clone(),
        None => default_output_path()?,
    };

    info!("Starting dataset citation extraction");
    info!("Manifest: {}", args.manifest);
    info!("PDF directory: {}", args.pdf_dir);
    info!("Output: {}", output);

    if !Path::new(&args.manifest).exists() {
        return Err(anyhow::anyhow!("Manifest does not exist: {}", args.manifest));
    }
    let pdf_dir = PathBuf::from(&args.pdf_dir);
    if !pdf_dir.is_dir() {
        return Err(anyhow::anyhow!(
            "PDF directory does not exist: {}",
            args.pdf_dir
        ));
    }

    let num_threads = if args.threads == 0 {
        let cores = num_cpus::get();
        info!("Auto-detected {} CPU cores. Using {} threads.", cores, cores);
        cores
    } else {
        info!("Using specified {} threads.", args.threads);
        args.threads
    };

    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
    {
        error!("Failed to build thread pool: {}. Using default.", e);
    }

    let records = read_manifest(Path::new(&args.manifest))?;
    info!("Manifest rows: {}", records.len());

    let progress = create_count_progress_bar(records.len() as u64);
    let backend = MupdfBackend::new();
    let failures = AtomicUsize::new(0);

    let results = extract_records(records, &pdf_dir, &backend, &failures, &progress);

    progress.finish_with_message("Extraction complete");

    let stats = ExtractStats {
        total_articles: results.len(),
        documents_failed: failures.load(Ordering::Relaxed),
        citations_located: results.iter().filter(|r| r.page_num > 0).count(),
        tags_derived: results.iter().filter(|r| r.tag.is_some()).count(),
        contexts_found: results.iter().map(|r| r.ref_contexts.len()).sum(),
        records_written: results.len(),
    };

    write_records(&results, Path::new(&output))?;

    let total_time = start_time.elapsed();

    info!("==================== FINAL SUMMARY ====================");
    info!("Total execution time: {}", format_elapsed(total_time));
    info!("Articles processed: {}", stats.total_articles);
    info!("Documents failed to open/decode: {}", stats.documents_failed);
    info!("Citations located: {}", stats.citations_located);
    info!("Tags derived: {}", stats.tags_derived);
    info!("Tag contexts found: {}", stats.contexts_found);
    info!("Records written to output: {}", stats.records_written);
    info!("Output file: {}", output);
    info!("========================================================");

    Ok(stats)
}

/// Process every manifest record against its article PDF. Articles are
/// independent units of work; failures are contained per article and leave
/// the record at its default values.
fn extract_records(
    records: Vec<CitationRecord>,
    pdf_dir: &Path,
    backend: &dyn PdfBackend,
    failures: &AtomicUsize,
    progress: &ProgressBar,
) -> Vec<CitationRecord> {
    records
        .into_par_iter()
        .map(|record| {
            let pdf_path = pdf_dir.join(format!("{}.pdf", record.article_id));

            let result = match backend.extract_blocks(&pdf_path) {
                Ok(pages) => {
                    let target = TargetIdentifier::new(&record.dataset_id);
                    let extraction = extract_citation(&pages, &target);
                    record.with_extraction(extraction)
                }
                Err(e) => {
                    failures.fetch_add(1, Ordering::Relaxed);
                    error!(
                        "Failed to process article {} ({}): {}",
                        record.article_id,
                        pdf_path.display(),
                        e
                    );
                    record
                }
            };

            progress.inc(1);
            result
        })
        .collect()
}
