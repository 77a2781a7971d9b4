use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Target document format for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    Word,
    Pdf,
    #[serde(rename = "powerpoint")]
    PowerPoint,
    Excel,
    PngImage,
    JpgImage,
}

impl ExportFormat {
    pub fn all() -> &'static [ExportFormat] {
        &[
            ExportFormat::Word,
            ExportFormat::Pdf,
            ExportFormat::PowerPoint,
            ExportFormat::Excel,
            ExportFormat::PngImage,
            ExportFormat::JpgImage,
        ]
    }

    /// Stable machine tag, as accepted by [`FromStr`].
    pub fn tag(self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Pdf => "pdf",
            Self::PowerPoint => "powerpoint",
            Self::Excel => "excel",
            Self::PngImage => "png-image",
            Self::JpgImage => "jpg-image",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Word => "Word",
            Self::Pdf => "PDF",
            Self::PowerPoint => "PowerPoint",
            Self::Excel => "Excel",
            Self::PngImage => "PNG Image",
            Self::JpgImage => "JPG Image",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Word => "docx",
            Self::Pdf => "pdf",
            Self::PowerPoint => "pptx",
            Self::Excel => "xlsx",
            Self::PngImage => "png",
            Self::JpgImage => "jpg",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Word => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Pdf => "application/pdf",
            Self::PowerPoint => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            Self::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::PngImage => "image/png",
            Self::JpgImage => "image/jpeg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    /// Accepts the machine tag or the display label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|f| f.tag().eq_ignore_ascii_case(wanted) || f.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let tags: Vec<&str> = Self::all().iter().map(|f| f.tag()).collect();
                format!("unknown export format '{}' (expected one of: {})", s, tags.join(", "))
            })
    }
}

/// Bytes produced by a formatter, with the MIME type to serve or save them under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedExport {
    pub bytes: Vec<u8>,
    pub mime: String,
}
