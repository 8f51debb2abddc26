//! Extract command - pre-fill document details from a single file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use socialink_core::{DocumentProcessor, FieldExtractor, ProcessingResult, ProgressSink};

use super::{load_config, load_recognizer};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input document (image or PDF)
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    input: Option<PathBuf>,

    /// Plain-text file of already recognized text; skips OCR
    #[arg(long, value_name = "TXTFILE")]
    text: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON result envelope
    Json,
    /// Plain text summary
    Text,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let source = match (&args.text, &args.input) {
        (Some(path), _) | (None, Some(path)) => path.clone(),
        (None, None) => anyhow::bail!("No input document given"),
    };

    if !source.exists() {
        anyhow::bail!("Input file not found: {}", source.display());
    }

    info!("Processing file: {}", source.display());

    let result = if args.text.is_some() {
        let text = fs::read_to_string(&source)?;
        ProcessingResult::Success {
            data: FieldExtractor::new().extract(&text),
        }
    } else {
        run_processor(&source, &args, config_path).await?
    };

    let output = match args.format {
        OutputFormat::Json if args.pretty => serde_json::to_string_pretty(&result)?,
        OutputFormat::Json => serde_json::to_string(&result)?,
        OutputFormat::Text => format_text(&source, &result),
    };

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

    debug!("Total processing time: {:?}", start.elapsed());

    if let Some(error) = result.error() {
        anyhow::bail!("{}", error);
    }

    Ok(())
}

async fn run_processor(
    input: &Path,
    args: &ExtractArgs,
    config_path: Option<&str>,
) -> anyhow::Result<ProcessingResult> {
    let config = load_config(config_path)?;
    let recognizer = load_recognizer(&config, args.model_dir.as_deref());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    let listener = pb.clone();
    let processor = DocumentProcessor::new(recognizer).with_progress(ProgressSink::new(move |event| {
        listener.set_message(event.status.clone());
        listener.set_position((event.progress * 100.0).round() as u64);
    }));

    let input = input.to_path_buf();
    let result = tokio::task::spawn_blocking(move || processor.process_document(&input)).await?;

    pb.finish_and_clear();

    Ok(result)
}

pub fn format_text(path: &Path, result: &ProcessingResult) -> String {
    let mut output = String::new();

    let status = match result {
        ProcessingResult::Success { .. } => "success",
        ProcessingResult::SuccessWithWarning { .. } => "warning",
        ProcessingResult::Failure { .. } => "failed",
    };

    output.push_str(&format!("Document: {}\n", path.display()));
    output.push_str(&format!("Status: {}\n", status));

    if let Some(data) = result.data() {
        let show = |value: Option<&str>| value.unwrap_or("-").to_string();
        output.push_str(&format!("Title: {}\n", show(data.title())));
        output.push_str(&format!("Institution: {}\n", show(data.institution())));
        output.push_str(&format!("Issue date: {}\n", show(data.issue_date())));
        output.push_str(&format!("Document number: {}\n", show(data.document_number())));
        output.push_str(&format!("Confidence: {}%\n", data.confidence()));
    }

    if let Some(warning) = result.warning() {
        output.push_str(&format!("Warning: {}\n", warning));
    }
    if let Some(error) = result.error() {
        output.push_str(&format!("Error: {}\n", error));
    }

    output
}
