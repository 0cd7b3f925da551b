use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use presscheck::core::model::{BatchReport, Severity};
use presscheck::export::text_export::render_batch;
use presscheck::ocr::ocr_space::{DEFAULT_ENDPOINT, DEMO_API_KEY};
use presscheck::pipeline::{build_report, export_report, OcrBackend, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "presscheck")]
#[command(version, about = "Cross-check print specs in artwork file names against the document body", long_about = None)]
struct Cli {
    /// Increase log verbosity (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a single print-ready file
    Check {
        /// Input file (PDF or image)
        input: PathBuf,

        #[command(flatten)]
        options: CheckOptions,
    },

    /// Check multiple files; results are grouped per file
    Batch {
        /// Input files
        inputs: Vec<PathBuf>,

        #[command(flatten)]
        options: CheckOptions,
    },

    /// Parse a file name only and print the declared specification
    ParseName {
        /// File name, with or without extension
        name: String,
    },

    /// Show information about a PDF file
    Info {
        /// Input PDF file path
        input: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
struct CheckOptions {
    /// Directory for report.json / report.md / report.txt
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// OCR backend used when a file has no text layer
    #[arg(long, value_enum, default_value_t = OcrChoice::OcrSpace)]
    ocr: OcrChoice,

    /// OCR.Space API key
    #[arg(long, env = "OCR_SPACE_API_KEY", default_value = DEMO_API_KEY, hide_env_values = true)]
    api_key: String,

    /// OCR.Space endpoint
    #[arg(long, env = "OCR_SPACE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    ocr_endpoint: String,

    /// OCR language
    #[arg(long, default_value = "eng")]
    lang: String,

    /// OCR request timeout in milliseconds
    #[arg(long, default_value_t = 60_000)]
    timeout_ms: u64,

    /// Rendering DPI for local OCR
    #[arg(long, default_value_t = 200)]
    dpi: u32,

    /// Characters of extracted text kept for diagnostics
    #[arg(long, default_value_t = 500)]
    preview: usize,

    /// Process files one at a time
    #[arg(long)]
    sequential: bool,

    /// Exit non-zero when any hard check fails
    #[arg(long)]
    strict: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum OcrChoice {
    None,
    OcrSpace,
    Tesseract,
}

impl From<OcrChoice> for OcrBackend {
    fn from(choice: OcrChoice) -> Self {
        match choice {
            OcrChoice::None => OcrBackend::None,
            OcrChoice::OcrSpace => OcrBackend::OcrSpace,
            OcrChoice::Tesseract => OcrBackend::Tesseract,
        }
    }
}

impl CheckOptions {
    fn pipeline_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig::new(self.ocr.into());
        config.output_dir = self.output.clone();
        config.ocr_space.api_key = self.api_key.clone();
        config.ocr_space.endpoint = self.ocr_endpoint.clone();
        config.ocr_space.language = self.lang.clone();
        config.ocr_space.timeout_ms = self.timeout_ms;
        config.dpi = self.dpi;
        config.preview_chars = self.preview;
        config.parallel = !self.sequential;
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Check { input, options } => {
            if !input.exists() {
                anyhow::bail!("Input file does not exist: {}", input.display());
            }
            if !input.is_file() {
                anyhow::bail!("Input is not a file: {}", input.display());
            }
            run_checks(vec![input], options)
        }
        Commands::Batch { inputs, options } => {
            if inputs.is_empty() {
                anyhow::bail!("No input files specified");
            }
            run_checks(inputs, options)
        }
        Commands::ParseName { name } => parse_name(&name),
        Commands::Info { input } => show_info(input),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "presscheck=debug" } else { "presscheck=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn run_checks(inputs: Vec<PathBuf>, options: CheckOptions) -> Result<()> {
    let config = options.pipeline_config();
    let report = build_report(&config, &inputs)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_batch(&report));
    }

    if let Some(output_dir) = &config.output_dir {
        export_report(&report, output_dir)
            .with_context(|| format!("Failed to export to: {}", output_dir.display()))?;
        if !options.json {
            println!("[✓] Results saved to: {}", output_dir.display());
        }
    }

    finish(&report, options.strict)
}

fn finish(report: &BatchReport, strict: bool) -> Result<()> {
    if !report.failures.is_empty() {
        anyhow::bail!("{} file(s) failed to load", report.failures.len());
    }
    if strict && report.worst_severity() == Severity::Error {
        anyhow::bail!("one or more files failed validation");
    }
    Ok(())
}

fn parse_name(name: &str) -> Result<()> {
    use presscheck::parse::HeaderParser;
    use presscheck::pipeline::SourceDocument;

    let document = SourceDocument::new(name, Vec::new());
    let header = HeaderParser::default().parse(document.header_text());
    println!("{}", serde_json::to_string_pretty(&header)?);
    println!(
        "Size: {}",
        header
            .size
            .map(|size| size.to_string())
            .unwrap_or_else(|| presscheck::core::model::NOT_FOUND.to_string())
    );
    println!("Bleed: {}", header.bleed_label());
    println!("Material: {}", header.material_label());
    Ok(())
}

fn show_info(input: PathBuf) -> Result<()> {
    use presscheck::extract::{EmbeddedTextExtractor, PdfReader, TextExtractor};

    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let reader = PdfReader::new(input.clone())
        .with_context(|| format!("Failed to open PDF: {}", input.display()))?;
    let page_count = reader.page_count()?;

    let bytes = std::fs::read(&input)
        .with_context(|| format!("Failed to read: {}", input.display()))?;
    let text_layer = match EmbeddedTextExtractor::new().extract(&bytes) {
        Ok(text) if !text.trim().is_empty() => "yes",
        Ok(_) => "no (OCR required)",
        Err(_) => "unreadable (OCR required)",
    };

    println!("PDF Information");
    println!("===============");
    println!("File: {}", input.display());
    println!("Pages: {}", page_count);
    println!("Text layer: {}", text_layer);

    Ok(())
}
