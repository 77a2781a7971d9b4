use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};

use biblioscan_core::config_file::{self, ConfigFile};
use biblioscan_core::model::HuggingFaceModel;
use biblioscan_core::{
    BibliographyRecord, ExtractedText, REQUIRED_CREDENTIAL, Summarizer, SummaryText,
};
use biblioscan_export::{ExportFormat, export_file_name, format_bibliography};
use biblioscan_parsing::BibliographyExtractor;

mod output;
mod settings;

use output::ColorMode;
use settings::SummarizeFlags;

/// Bibliography scanner - Pull title, author and year out of PDFs and scanned pages
#[derive(Parser, Debug)]
#[command(name = "biblioscan", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract title, author and year from a PDF or image
    Extract {
        /// Path to the PDF, PNG or JPEG file
        file_path: PathBuf,

        /// Path to output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Also print the raw extracted text
        #[arg(long)]
        show_text: bool,
    },

    /// Summarize the text of a PDF or image
    Summarize {
        /// Path to the PDF, PNG or JPEG file
        file_path: PathBuf,

        /// Minimum summary length in tokens
        #[arg(long)]
        min_length: Option<usize>,

        /// Maximum summary length in tokens
        #[arg(long)]
        max_length: Option<usize>,

        /// Hugging Face model id
        #[arg(long)]
        model: Option<String>,

        /// Path to output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Also print the raw extracted text
        #[arg(long)]
        show_text: bool,
    },

    /// List export formats and the file names they are saved under
    Formats,

    /// Write the effective settings to the platform config file
    InitConfig {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let config = config_file::load_config();
    biblioscan_core::require_credential(REQUIRED_CREDENTIAL)?;

    match cli.command {
        Command::Extract {
            file_path,
            output,
            no_color,
            show_text,
        } => extract(&file_path, output, no_color, show_text, &config),
        Command::Summarize {
            file_path,
            min_length,
            max_length,
            model,
            output,
            no_color,
            show_text,
        } => {
            let flags = SummarizeFlags {
                model,
                min_length,
                max_length,
            };
            summarize(&file_path, &flags, output, no_color, show_text, &config)
        }
        Command::Formats => formats(&config),
        Command::InitConfig { force } => init_config(&config, force),
    }
}

/// Logs go to stderr so stdout carries only results. `RUST_LOG` overrides the default.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Where a command's results go.
///
/// Without `--output` everything is printed to stdout. With it, progress and
/// notices go to stderr and the file receives only the payload, written once
/// the payload exists so a failed run leaves an existing file alone.
struct Destination {
    output: Option<PathBuf>,
    color: ColorMode,
}

impl Destination {
    fn new(output: Option<PathBuf>, no_color: bool) -> Self {
        let color = ColorMode(!no_color && output.is_none());
        Self { output, color }
    }

    fn diagnostics(&self) -> Box<dyn Write> {
        if self.output.is_some() {
            Box::new(std::io::stderr())
        } else {
            Box::new(std::io::stdout())
        }
    }

    /// Write `payload` to the output file. Returns the path, or `None` when
    /// results go to the terminal.
    fn save(&self, payload: &str) -> anyhow::Result<Option<&Path>> {
        let Some(path) = self.output.as_deref() else {
            return Ok(None);
        };
        std::fs::write(path, payload)
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;
        Ok(Some(path))
    }
}

/// Load and acquire the document, printing notices along the way.
///
/// Returns `None` when there is no text to work with.
fn acquire(
    file_path: &Path,
    config: &ConfigFile,
    show_text: bool,
    writer: &mut dyn Write,
    color: ColorMode,
) -> anyhow::Result<Option<ExtractedText>> {
    if !file_path.exists() {
        anyhow::bail!("File not found: {}", file_path.display());
    }

    let document = biblioscan_ingest::load_document(file_path)?;
    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.display().to_string());
    output::print_header(writer, &file_name, document.kind(), color)?;

    let acquirer = biblioscan_ingest::default_acquirer(&settings::resolve_ocr(config, env_var));
    let (text, failure) = acquirer.extract_text(document).into_parts();
    if let Some(failure) = failure {
        output::print_notice(writer, &failure, color)?;
    }

    if text.is_blank() {
        output::print_no_text(writer, color)?;
        return Ok(None);
    }
    if show_text {
        output::print_extracted_text(writer, text.as_str(), color)?;
    }
    Ok(Some(text))
}

fn report_record(
    record: &BibliographyRecord,
    dest: &Destination,
    diag: &mut dyn Write,
) -> anyhow::Result<()> {
    match dest.save(&format_bibliography(record))? {
        Some(path) => output::print_saved(diag, path, dest.color)?,
        None => output::print_record(diag, record, dest.color)?,
    }
    Ok(())
}

fn report_summary(
    summary: &SummaryText,
    dest: &Destination,
    diag: &mut dyn Write,
) -> anyhow::Result<()> {
    if !summary.is_empty()
        && let Some(path) = dest.save(summary.as_str())?
    {
        output::print_saved(diag, path, dest.color)?;
        return Ok(());
    }
    output::print_summary(diag, summary, dest.color)?;
    Ok(())
}

fn extract(
    file_path: &Path,
    output: Option<PathBuf>,
    no_color: bool,
    show_text: bool,
    config: &ConfigFile,
) -> anyhow::Result<()> {
    let dest = Destination::new(output, no_color);
    let mut diag = dest.diagnostics();

    if let Some(text) = acquire(file_path, config, show_text, &mut *diag, dest.color)? {
        let record = BibliographyExtractor::new().extract(&text);
        report_record(&record, &dest, &mut *diag)?;
    }
    diag.flush()?;
    Ok(())
}

fn summarize(
    file_path: &Path,
    flags: &SummarizeFlags,
    output: Option<PathBuf>,
    no_color: bool,
    show_text: bool,
    config: &ConfigFile,
) -> anyhow::Result<()> {
    let dest = Destination::new(output, no_color);
    let mut diag = dest.diagnostics();

    let Some(text) = acquire(file_path, config, show_text, &mut *diag, dest.color)? else {
        diag.flush()?;
        return Ok(());
    };

    let resolved = settings::resolve_summarizer(flags, config, env_var);
    tracing::debug!(model = %resolved.model, endpoint = %resolved.endpoint, "summarizer configured");
    let model = HuggingFaceModel::new(resolved.model, resolved.timeout)?
        .with_endpoint(resolved.endpoint)
        .with_api_token(resolved.api_token);
    let summarizer = Summarizer::new(Arc::new(model));

    let (summary, failure) = summarizer.summarize(&text, resolved.bounds).into_parts();
    if let Some(failure) = failure {
        output::print_notice(&mut *diag, &failure, dest.color)?;
    }
    report_summary(&summary, &dest, &mut *diag)?;
    diag.flush()?;
    Ok(())
}

fn init_config(config: &ConfigFile, force: bool) -> anyhow::Result<()> {
    let path = config_file::config_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    settings::write_config(&path, &settings::effective_config(config, env_var), force)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn formats(config: &ConfigFile) -> anyhow::Result<()> {
    let base = config
        .export
        .as_ref()
        .and_then(|e| e.file_name.as_deref())
        .unwrap_or("");

    let mut stdout = std::io::stdout();
    for &format in ExportFormat::all() {
        writeln!(
            stdout,
            "{:<12} {:<12} {}",
            format.tag(),
            format.label(),
            export_file_name(base, format)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> BibliographyRecord {
        BibliographyRecord {
            title: "Systems Design".into(),
            author: "John Smith,".into(),
            year: "2001".into(),
        }
    }

    #[test]
    fn output_file_holds_only_the_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.txt");
        std::fs::write(&path, "previous contents").unwrap();
        let dest = Destination::new(Some(path.clone()), false);

        let mut diag = Vec::new();
        report_record(&record(), &dest, &mut diag).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            format_bibliography(&record())
        );
        let diag = String::from_utf8(diag).unwrap();
        assert!(diag.contains("record.txt"));
        assert!(!diag.contains("Title:"));
    }

    #[test]
    fn without_output_record_is_printed() {
        let dest = Destination::new(None, true);
        let mut out = Vec::new();
        report_record(&record(), &dest, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{}\n", format_bibliography(&record()))
        );
    }

    #[test]
    fn summary_file_holds_only_the_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.txt");
        let dest = Destination::new(Some(path.clone()), false);

        let mut diag = Vec::new();
        report_summary(&SummaryText::new("Budget approved.\nSchools next."), &dest, &mut diag)
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Budget approved.\nSchools next."
        );
    }

    #[test]
    fn empty_summary_does_not_touch_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.txt");
        std::fs::write(&path, "keep me").unwrap();
        let dest = Destination::new(Some(path.clone()), false);

        let mut diag = Vec::new();
        report_summary(&SummaryText::default(), &dest, &mut diag).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");
        assert_eq!(String::from_utf8(diag).unwrap(), "No summary produced.\n");
    }

    #[test]
    fn bad_input_leaves_existing_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("record.txt");
        std::fs::write(&out, "keep me").unwrap();

        let missing = dir.path().join("missing.pdf");
        assert!(extract(&missing, Some(out.clone()), true, false, &ConfigFile::default()).is_err());

        let unsupported = dir.path().join("notes.txt");
        std::fs::write(&unsupported, "by Jane Doe 1999").unwrap();
        assert!(
            extract(&unsupported, Some(out.clone()), true, false, &ConfigFile::default()).is_err()
        );

        assert_eq!(std::fs::read_to_string(&out).unwrap(), "keep me");
    }
}
