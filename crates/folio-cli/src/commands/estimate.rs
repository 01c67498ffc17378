//! Estimate command - price a single uploaded document.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::debug;

use folio_core::AnalysisResult;
use folio_worker::{AnalysisRequest, AnalysisResponse, AnalysisWorker, PassKind};

/// Arguments for the estimate command.
#[derive(Args)]
pub struct EstimateArgs {
    /// Input file (PDF, DOCX, or image)
    #[arg(required = true)]
    input: PathBuf,

    /// Base price per dense page (overrides config)
    #[arg(short, long)]
    base_price: Option<Decimal>,

    /// Skip the deep pass and report only the instant heuristic estimate
    #[arg(long)]
    fast_only: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Per-page CSV
    Csv,
    /// Plain text breakdown
    Text,
}

pub async fn run(args: EstimateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let buffer = fs::read(&args.input)?;
    let file_name = args
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("upload.bin")
        .to_string();
    let base_price = args.base_price.unwrap_or(config.pricing.base_price_per_page);

    let (worker, mut responses) = AnalysisWorker::spawn();

    worker.submit(AnalysisRequest {
        kind: PassKind::FastPass,
        id: "fast".to_string(),
        buffer: buffer.clone(),
        file_name: file_name.clone(),
        base_price_per_page: base_price,
    })?;

    if !args.fast_only {
        worker.submit(AnalysisRequest {
            kind: PassKind::DeepPass,
            id: "deep".to_string(),
            buffer,
            file_name,
            base_price_per_page: base_price,
        })?;
    }

    let spinner = if args.fast_only {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message("Analyzing document...");
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    };

    let mut fast_result: Option<AnalysisResult> = None;
    let mut deep_result: Option<AnalysisResult> = None;
    let expected = if args.fast_only { 1 } else { 2 };

    for _ in 0..expected {
        let response = responses
            .recv()
            .await
            .ok_or_else(|| anyhow::anyhow!("analysis worker stopped unexpectedly"))?;

        match response {
            AnalysisResponse::FastPassDone { result, .. } => {
                if let Some(pb) = &spinner {
                    // The instant quote; the deep pass will supersede it.
                    pb.println(format!(
                        "{} Fast estimate: {} pages, {} {} (refining...)",
                        style("ℹ").blue(),
                        result.total_pages,
                        result.total_price,
                        config.pricing.currency,
                    ));
                }
                fast_result = Some(result);
            }
            AnalysisResponse::DeepPassDone { result, .. } => {
                deep_result = Some(result);
            }
            AnalysisResponse::Error { id, message } => {
                if let Some(pb) = &spinner {
                    pb.finish_and_clear();
                }
                anyhow::bail!("analysis request {id} failed: {message}");
            }
        }
    }

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }

    // Deep supersedes fast when both are present.
    let result = deep_result
        .or(fast_result)
        .ok_or_else(|| anyhow::anyhow!("no analysis result received"))?;

    let output = format_result(&result, &config.pricing.currency, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("total estimation time: {:?}", start.elapsed());

    Ok(())
}

pub(crate) fn format_result(
    result: &AnalysisResult,
    currency: &str,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result, currency)),
    }
}

fn format_csv(result: &AnalysisResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["page_number", "word_count", "density", "fraction", "price"])?;

    for page in &result.pages {
        wtr.write_record([
            page.page_number.to_string(),
            page.word_count.to_string(),
            page.density.as_str().to_string(),
            page.fraction.to_string(),
            page.price.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &AnalysisResult, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "File type: {} ({} pass)\n",
        result.file_type.as_str(),
        match result.phase {
            folio_core::Phase::Fast => "fast",
            folio_core::Phase::Deep => "deep",
        }
    ));
    output.push_str(&format!("Pages: {}\n\n", result.total_pages));

    output.push_str("  Page   Words  Density   Fraction  Price\n");
    for page in &result.pages {
        output.push_str(&format!(
            "  {:>4}  {:>6}  {:<8}  {:>8}  {}\n",
            page.page_number,
            page.word_count,
            page.density.as_str(),
            page.fraction,
            page.price,
        ));
    }

    output.push_str(&format!(
        "\nTotal: {} {}\n",
        result.total_price, currency
    ));

    output
}
