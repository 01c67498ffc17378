//! Batch estimation command for multiple documents.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::{debug, error, warn};

use folio_core::{deep_estimate, AnalysisResult, FolioConfig};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Base price per dense page (overrides config)
    #[arg(short, long)]
    base_price: Option<Decimal>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome for a single file.
struct BatchRecord {
    path: PathBuf,
    result: Option<AnalysisResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;
    let base_price = args.base_price.unwrap_or(config.pricing.base_price_per_page);

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_lowercase();
            config.batch.extensions.iter().any(|e| e == &ext)
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to estimate",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let mut records = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        let record = match estimate_file(&path, base_price) {
            Ok(result) => BatchRecord {
                path,
                result: Some(result),
                error: None,
                processing_time_ms: file_start.elapsed().as_millis() as u64,
            },
            Err(e) => {
                let message = e.to_string();
                if !args.continue_on_error {
                    error!("Failed to estimate {}: {}", path.display(), message);
                    anyhow::bail!("Estimation failed: {}", message);
                }
                warn!("Failed to estimate {}: {}", path.display(), message);
                BatchRecord {
                    path,
                    result: None,
                    error: Some(message),
                    processing_time_ms: file_start.elapsed().as_millis() as u64,
                }
            }
        };
        records.push(record);
        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let successful: Vec<_> = records.iter().filter(|r| r.result.is_some()).collect();
    let failed: Vec<_> = records.iter().filter(|r| r.error.is_some()).collect();

    // Per-file JSON outputs
    if let Some(output_dir) = &args.output_dir {
        for record in &successful {
            if let Some(result) = &record.result {
                let output_name = record
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("document");
                let output_path = output_dir.join(format!("{}.json", output_name));
                fs::write(&output_path, serde_json::to_string_pretty(result)?)?;
                debug!("wrote estimate to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));
        write_summary(&summary_path, &records, &config)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Estimated {} files in {:?}",
        style("✓").green(),
        records.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for record in &failed {
            println!(
                "  - {}: {}",
                record.path.display(),
                record.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Batch runs only the deep pass; the fast pass exists for interactive
/// latency, which an offline batch does not need.
fn estimate_file(path: &PathBuf, base_price: Decimal) -> anyhow::Result<AnalysisResult> {
    let buffer = fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("upload.bin");
    Ok(deep_estimate(&buffer, file_name, base_price))
}

fn write_summary(
    path: &PathBuf,
    records: &[BatchRecord],
    config: &FolioConfig,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "file_type",
        "total_pages",
        "total_price",
        "currency",
        "processing_time_ms",
        "error",
    ])?;

    for record in records {
        let filename = record
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(result) = &record.result {
            wtr.write_record([
                filename,
                "success",
                result.file_type.as_str(),
                &result.total_pages.to_string(),
                &result.total_price.to_string(),
                &config.pricing.currency,
                &record.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                &record.processing_time_ms.to_string(),
                record.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
