use std::io::Write;
use std::path::Path;

use biblioscan_core::{BibliographyRecord, MediaKind, PipelineError, SummaryText};
use owo_colors::OwoColorize;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the line announcing which file is being processed.
pub fn print_header(
    w: &mut dyn Write,
    file_name: &str,
    kind: MediaKind,
    color: ColorMode,
) -> std::io::Result<()> {
    let method = if kind.is_image() {
        "OCR"
    } else {
        "PDF text layer"
    };
    if color.enabled() {
        writeln!(
            w,
            "Reading {} {}",
            file_name.bold(),
            format!("({})", method).dimmed()
        )?;
    } else {
        writeln!(w, "Reading {} ({})", file_name, method)?;
    }
    writeln!(w)?;
    Ok(())
}

/// Print a non-fatal pipeline failure.
pub fn print_notice(
    w: &mut dyn Write,
    failure: &PipelineError,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} {}", "WARNING:".yellow(), failure)?;
    } else {
        writeln!(w, "WARNING: {}", failure)?;
    }
    Ok(())
}

pub fn print_no_text(w: &mut dyn Write, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", "No text could be extracted.".red())?;
    } else {
        writeln!(w, "No text could be extracted.")?;
    }
    Ok(())
}

/// Print the raw acquired text, framed so it is easy to tell apart from the results.
pub fn print_extracted_text(
    w: &mut dyn Write,
    text: &str,
    color: ColorMode,
) -> std::io::Result<()> {
    let rule = "-".repeat(60);
    if color.enabled() {
        writeln!(w, "{}", "Extracted text".bold())?;
        writeln!(w, "{}", rule.dimmed())?;
    } else {
        writeln!(w, "Extracted text")?;
        writeln!(w, "{}", rule)?;
    }
    writeln!(w, "{}", text.trim_end())?;
    if color.enabled() {
        writeln!(w, "{}", rule.dimmed())?;
    } else {
        writeln!(w, "{}", rule)?;
    }
    writeln!(w)?;
    Ok(())
}

/// Print the record. Without color this is the export payload followed by a
/// newline.
pub fn print_record(
    w: &mut dyn Write,
    record: &BibliographyRecord,
    color: ColorMode,
) -> std::io::Result<()> {
    if !color.enabled() {
        writeln!(w, "{}", biblioscan_export::format_bibliography(record))?;
        return Ok(());
    }

    let fields = [
        ("Title:", &record.title),
        ("Author:", &record.author),
        ("Year:", &record.year),
    ];
    for (i, (label, value)) in fields.iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        if value.is_empty() {
            writeln!(w, "{} {}", label.bold(), "(not found)".dimmed())?;
        } else {
            writeln!(w, "{} {}", label.bold(), value)?;
        }
    }
    Ok(())
}

/// Confirm where the payload was written.
pub fn print_saved(w: &mut dyn Write, path: &Path, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} {}", "Saved to".green(), path.display())?;
    } else {
        writeln!(w, "Saved to {}", path.display())?;
    }
    Ok(())
}

pub fn print_summary(
    w: &mut dyn Write,
    summary: &SummaryText,
    color: ColorMode,
) -> std::io::Result<()> {
    if summary.is_empty() {
        if color.enabled() {
            writeln!(w, "{}", "No summary produced.".dimmed())?;
        } else {
            writeln!(w, "No summary produced.")?;
        }
        return Ok(());
    }

    if color.enabled() {
        writeln!(w, "{}", "Summary".bold().cyan())?;
        writeln!(w, "{}", summary)?;
        writeln!(
            w,
            "{}",
            format!("({} words)", summary.token_count()).dimmed()
        )?;
    } else {
        writeln!(w, "Summary")?;
        writeln!(w, "{}", summary)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use biblioscan_core::{BackendError, ModelError};

    use super::*;

    const PLAIN: ColorMode = ColorMode(false);

    fn render(f: impl FnOnce(&mut dyn Write) -> std::io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn plain_record_is_export_payload() {
        let record = BibliographyRecord {
            title: "Systems Design".into(),
            author: "John Smith,".into(),
            year: "2001".into(),
        };
        let out = render(|w| print_record(w, &record, PLAIN));
        assert_eq!(out, "Title: Systems Design\n\nAuthor: John Smith,\n\nYear: 2001\n");
    }

    #[test]
    fn plain_empty_record_keeps_labels() {
        let out = render(|w| print_record(w, &BibliographyRecord::default(), PLAIN));
        assert_eq!(out, "Title: \n\nAuthor: \n\nYear: \n");
    }

    #[test]
    fn notices_are_warnings() {
        let failure = PipelineError::AcquisitionFailure {
            kind: MediaKind::Png,
            source: BackendError::DecodeError("truncated".into()),
        };
        let out = render(|w| print_notice(w, &failure, PLAIN));
        assert_eq!(
            out,
            "WARNING: could not extract text from png document: failed to decode image: truncated\n"
        );

        let failure = PipelineError::SummarizationFailure(ModelError::EmptyResponse);
        let out = render(|w| print_notice(w, &failure, PLAIN));
        assert!(out.starts_with("WARNING: summarization failed"));
    }

    #[test]
    fn header_names_method() {
        let out = render(|w| print_header(w, "scan.jpg", MediaKind::Jpeg, PLAIN));
        assert_eq!(out, "Reading scan.jpg (OCR)\n\n");
        let out = render(|w| print_header(w, "paper.pdf", MediaKind::Pdf, PLAIN));
        assert!(out.contains("PDF text layer"));
    }

    #[test]
    fn empty_summary_message() {
        let out = render(|w| print_summary(w, &SummaryText::default(), PLAIN));
        assert_eq!(out, "No summary produced.\n");

        let out = render(|w| print_summary(w, &SummaryText::new("Short and sweet."), PLAIN));
        assert_eq!(out, "Summary\nShort and sweet.\n");
    }

    #[test]
    fn saved_line_names_path() {
        let out = render(|w| print_saved(w, Path::new("out/record.txt"), PLAIN));
        assert_eq!(out, "Saved to out/record.txt\n");
    }

    #[test]
    fn extracted_text_is_framed() {
        let out = render(|w| print_extracted_text(w, "line one\nline two\n\n", PLAIN));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Extracted text");
        assert_eq!(lines[2], "line one");
        assert_eq!(lines[3], "line two");
        assert_eq!(lines[4], lines[1]);
    }
}
