use anyhow::Result;
use log::info;
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;

use crate::cli::LocateArgs;
use crate::common::{format_elapsed, setup_logging};
use crate::extract::{citation_content, extract_ref_tag, find_occurrence, TargetIdentifier};
use crate::pdf::{MupdfBackend, Page, PdfBackend};

/// One matching block in a located document
#[derive(Debug, PartialEq)]
struct BlockReport {
    page: u32,
    bbox: [f32; 4],
    matched: String,
    content: String,
    tag: Option<String>,
}

/// Run the locate command: report every block of one PDF containing the
/// target identifier, with the cut citation content and the derived tag.
pub fn run_locate(args: LocateArgs) -> Result<()> {
    let start_time = Instant::now();

    setup_logging(&args.log_level)?;

    info!("Locating dataset citations");
    info!("PDF: {}", args.pdf);
    info!("Target identifier: {}", args.doi);

    let pdf_path = Path::new(&args.pdf);
    if !pdf_path.exists() {
        return Err(anyhow::anyhow!("PDF does not exist: {}", args.pdf));
    }

    let backend = MupdfBackend::new();
    let pages = backend.extract_blocks(pdf_path)?;
    let target = TargetIdentifier::new(&args.doi);

    let reports = collect_reports(&pages, &target);

    for (i, report) in reports.iter().enumerate() {
        info!("Citation {} on page {}", i + 1, report.page);
        info!(
            "  Position: ({:.2}, {:.2}, {:.2}, {:.2})",
            report.bbox[0], report.bbox[1], report.bbox[2], report.bbox[3]
        );
        info!("  Match: {}", report.matched);
        info!("  Content: {}", report.content);
        info!("  Tag: {}", report.tag.as_deref().unwrap_or("none"));
    }

    if reports.is_empty() {
        info!("No citations found");
    } else {
        info!("Found {} citation(s)", reports.len());
    }
    info!("Total execution time: {}", format_elapsed(start_time.elapsed()));

    Ok(())
}

/// Collect one report per matching block, in page-then-block order. Block
/// positions are deduplicated within a page only; the same column geometry
/// recurs from page to page and each page's match is a distinct citation.
fn collect_reports(pages: &[Page], target: &TargetIdentifier) -> Vec<BlockReport> {
    let mut reports = Vec::new();

    for page in pages {
        let mut seen_positions: HashSet<String> = HashSet::new();

        for block in &page.blocks {
            let text = block.text.trim();
            let Some(occ) = find_occurrence(text, target) else {
                continue;
            };

            let position = format!(
                "{}__{}__{}__{}",
                block.bbox[0], block.bbox[1], block.bbox[2], block.bbox[3]
            );
            if !seen_positions.insert(position) {
                continue;
            }

            let content = citation_content(text, &occ);
            let tag = extract_ref_tag(&content);

            reports.push(BlockReport {
                page: page.number,
                bbox: block.bbox,
                matched: text[occ.start..occ.end].to_string(),
                content,
                tag,
            });
        }
    }

    reports
}
