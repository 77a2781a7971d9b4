//! Tesseract backend for image OCR.
//!
//! Like the MuPDF crate, this isolates a native library (libtesseract and
//! leptonica) behind [`OcrBackend`] so the rest of the workspace builds
//! without it.

use image::RgbImage;
use tesseract::Tesseract;

use biblioscan_core::{BackendError, OcrBackend};

pub const DEFAULT_LANGUAGE: &str = "eng";

/// Tesseract-based implementation of [`OcrBackend`].
///
/// The engine handle is neither `Send` nor `Sync` and its builder consumes
/// itself, so this backend keeps only the read-only engine settings and
/// starts a fresh engine per image. [`TesseractBackend::new`] tries the
/// engine once so missing language data fails at startup, not per request.
///
/// No preprocessing is applied: the decoded raster goes to Tesseract as-is.
#[derive(Debug, Clone)]
pub struct TesseractBackend {
    language: String,
    datapath: Option<String>,
}

impl TesseractBackend {
    /// Configure and test-start the engine. `datapath` is the tessdata directory;
    /// `None` uses Tesseract's own lookup (`TESSDATA_PREFIX` or the install default).
    pub fn new(language: Option<&str>, datapath: Option<&str>) -> Result<Self, BackendError> {
        let backend = Self {
            language: language
                .filter(|l| !l.trim().is_empty())
                .unwrap_or(DEFAULT_LANGUAGE)
                .to_string(),
            datapath: datapath.map(str::to_string),
        };
        backend.engine()?;
        tracing::debug!(language = %backend.language, datapath = ?backend.datapath, "tesseract ready");
        Ok(backend)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn engine(&self) -> Result<Tesseract, BackendError> {
        Tesseract::new(self.datapath.as_deref(), Some(&self.language))
            .map_err(|e| BackendError::OpenError(format!("tesseract init: {}", e)))
    }
}

/// A decoded 8-bit RGB frame ready for Tesseract.
#[derive(Debug)]
pub struct Frame {
    pub pixels: RgbImage,
}

impl Frame {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    const BYTES_PER_PIXEL: u32 = 3;

    fn bytes_per_line(&self) -> u32 {
        self.width() * Self::BYTES_PER_PIXEL
    }
}

/// Decode PNG or JPEG bytes into an RGB frame.
pub fn decode_frame(bytes: &[u8]) -> Result<Frame, BackendError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| BackendError::DecodeError(e.to_string()))?;
    Ok(Frame {
        pixels: decoded.to_rgb8(),
    })
}

fn to_i32(value: u32, what: &str) -> Result<i32, BackendError> {
    i32::try_from(value).map_err(|_| BackendError::DecodeError(format!("{what} too large")))
}

impl OcrBackend for TesseractBackend {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, bytes: &[u8]) -> Result<String, BackendError> {
        let frame = decode_frame(bytes)?;
        tracing::debug!(width = frame.width(), height = frame.height(), "running OCR");

        let mut engine = self
            .engine()?
            .set_frame(
                frame.pixels.as_raw(),
                to_i32(frame.width(), "image width")?,
                to_i32(frame.height(), "image height")?,
                Frame::BYTES_PER_PIXEL as i32,
                to_i32(frame.bytes_per_line(), "image row")?,
            )
            .map_err(|e| BackendError::ExtractionError(format!("tesseract image: {}", e)))?
            .recognize()
            .map_err(|e| BackendError::ExtractionError(format!("tesseract recognize: {}", e)))?;

        engine
            .get_text()
            .map_err(|e| BackendError::ExtractionError(format!("tesseract text: {}", e)))
    }
}
