//! Batch command - extract fields from many documents concurrently.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use socialink_core::{DocumentProcessor, ExtractedFields, ProcessingResult};

use super::{load_config, load_recognizer};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching the documents
    #[arg(required = true)]
    input: String,

    /// Directory receiving one JSON result per document
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write summary.csv
    #[arg(long)]
    summary: bool,

    /// Number of documents processed at once
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Result of processing a single file.
struct DocumentOutcome {
    index: usize,
    path: PathBuf,
    output_name: String,
    result: ProcessingResult,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let processor = Arc::new(DocumentProcessor::new(load_recognizer(
        &config,
        args.model_dir.as_deref(),
    )));
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();

    let names = output_names(&files);

    for (index, (path, output_name)) in files.into_iter().zip(names).enumerate() {
        let processor = Arc::clone(&processor);
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let file_start = Instant::now();
            let worker_path = path.clone();
            let result =
                tokio::task::spawn_blocking(move || processor.process_document(&worker_path)).await?;

            anyhow::Ok(DocumentOutcome {
                index,
                path,
                output_name,
                result,
                processing_time_ms: file_start.elapsed().as_millis() as u64,
            })
        });
    }

    let mut outcomes = Vec::new();

    while let Some(joined) = tasks.join_next().await {
        let outcome = joined??;

        if let Some(error) = outcome.result.error() {
            warn!("Failed to process {}: {}", outcome.path.display(), error);
        }

        if let Some(ref output_dir) = args.output_dir {
            let output_path = output_dir.join(&outcome.output_name);
            fs::write(&output_path, serde_json::to_string_pretty(&outcome.result)?)?;
            debug!("Wrote output to {}", output_path.display());
        }

        pb.inc(1);
        outcomes.push(outcome);
    }

    pb.finish_and_clear();
    outcomes.sort_by_key(|o| o.index);

    if args.summary {
        let summary_path = args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("summary.csv");
        fs::write(&summary_path, format_summary(&outcomes)?)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed = outcomes.iter().filter(|o| !o.result.is_success()).count();
    let warned = outcomes.iter().filter(|o| o.result.warning().is_some()).count();
    let succeeded = outcomes.len() - failed - warned;

    println!(
        "{} {} extracted, {} with warnings, {} failed in {:.1}s",
        style("✓").green(),
        succeeded,
        warned,
        failed,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// `<file name>.json` for every document, in order. A file name seen before
/// (same name in another directory) gets a numeric suffix.
fn output_names(files: &[PathBuf]) -> Vec<String> {
    let mut used = HashSet::new();

    files
        .iter()
        .map(|path| {
            let file_name = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("document");
            let mut name = format!("{}.json", file_name);
            let mut n = 1;
            while !used.insert(name.clone()) {
                n += 1;
                name = format!("{}-{}.json", file_name, n);
            }
            name
        })
        .collect()
}

fn format_summary(outcomes: &[DocumentOutcome]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "file",
        "status",
        "title",
        "institution",
        "issue_date",
        "document_number",
        "confidence",
        "message",
        "processing_time_ms",
    ])?;

    for outcome in outcomes {
        let status = match &outcome.result {
            ProcessingResult::Success { .. } => "success",
            ProcessingResult::SuccessWithWarning { .. } => "warning",
            ProcessingResult::Failure { .. } => "failed",
        };
        let data = outcome.result.data();
        let field = |get: fn(&ExtractedFields) -> Option<&str>| {
            data.and_then(get).unwrap_or("").to_string()
        };
        let message = outcome
            .result
            .error()
            .or(outcome.result.warning())
            .unwrap_or("");

        wtr.write_record([
            outcome.path.display().to_string(),
            status.to_string(),
            field(ExtractedFields::title),
            field(ExtractedFields::institution),
            field(ExtractedFields::issue_date),
            field(ExtractedFields::document_number),
            data.map(|d| d.confidence().to_string()).unwrap_or_default(),
            message.to_string(),
            outcome.processing_time_ms.to_string(),
        ])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_names_keep_extension() {
        let files = vec![PathBuf::from("docs/a.jpg"), PathBuf::from("docs/a.pdf")];
        assert_eq!(output_names(&files), vec!["a.jpg.json", "a.pdf.json"]);
    }

    #[test]
    fn test_output_names_never_repeat() {
        let files = vec![
            PathBuf::from("2018/scan.png"),
            PathBuf::from("2019/scan.png"),
            PathBuf::from("2020/scan.png"),
        ];
        assert_eq!(
            output_names(&files),
            vec!["scan.png.json", "scan.png-2.json", "scan.png-3.json"]
        );
    }
}
