use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dataset-citation-extraction")]
#[command(about = "Locate dataset DOI citations in article PDFs and extract their recurring citation contexts")]
#[command(version = "1.0.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process a manifest of (article, dataset DOI) pairs and export citation records as CSV
    Extract(ExtractArgs),

    /// Locate every occurrence of one dataset DOI in one PDF and print the findings
    Locate(LocateArgs),
}

#[derive(Parser, Clone)]
pub struct ExtractArgs {
    /// Input manifest CSV (columns: article_id, dataset_id, optional type, optional row_id)
    #[arg(short, long, required = true)]
    pub manifest: String,

    /// Directory containing article PDFs, named <article_id>.pdf
    #[arg(short, long, required = true)]
    pub pdf_dir: String,

    /// Output CSV file (default: dataset_citations_<timestamp>.csv)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Number of worker threads (0 = auto-detect)
    #[arg(short, long, default_value = "0")]
    pub threads: usize,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}

#[derive(Parser, Clone)]
pub struct LocateArgs {
    /// Path to the article PDF
    #[arg(short, long, required = true)]
    pub pdf: String,

    /// Target dataset identifier (DOI-like string)
    #[arg(short, long, required = true)]
    pub doi: String,

    /// Logging level (DEBUG, INFO, WARN, ERROR)
    #[arg(short, long, default_value = "INFO")]
    pub log_level: String,
}
