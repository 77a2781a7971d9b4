//! End-to-end text-layer extraction against small PDFs built in memory.

use std::sync::Arc;

use biblioscan_core::{
    BackendError, MediaKind, OcrBackend, PdfBackend, PipelineError, SourceDocument, TextAcquirer,
};
use biblioscan_pdf_mupdf::MupdfBackend;

/// Build a minimal PDF with one Helvetica line per page.
///
/// Object layout: 1 catalog, 2 page tree, 3 font, then a (page, content)
/// pair per page. Offsets in the xref table are computed exactly.
fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut objects: Vec<String> = Vec::new();
    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", 4 + i * 2))
        .collect();

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    ));
    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    for (i, text) in pages.iter().enumerate() {
        let content_id = 5 + i * 2;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {content_id} 0 R >>"
        ));
        let stream = format!("BT /F1 24 Tf 72 700 Td ({text}) Tj ET");
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            stream.len(),
            stream
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for off in &offsets {
        out.push_str(&format!("{:010} 00000 n \n", off));
    }
    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));
    out.into_bytes()
}

struct NoOcr;

impl OcrBackend for NoOcr {
    fn name(&self) -> &str {
        "none"
    }

    fn recognize(&self, _bytes: &[u8]) -> Result<String, BackendError> {
        Err(BackendError::DecodeError("OCR not available in this test".into()))
    }
}

#[test]
fn one_entry_per_page_in_order() {
    let pdf = build_pdf(&["Alpha page", "Bravo page", "Charlie page"]);
    let pages = MupdfBackend::new().page_texts(&pdf).unwrap();

    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0].trim(), "Alpha page");
    assert_eq!(pages[1].trim(), "Bravo page");
    assert_eq!(pages[2].trim(), "Charlie page");
    // Each extracted line ends with the extractor's own newline.
    assert!(pages.iter().all(|p| p.ends_with('\n')));
}

#[test]
fn acquirer_concatenates_pages_ascending() {
    let texts = ["Page one by Ada Lovelace", "Page two 1843", "Page three end"];
    let pdf = build_pdf(&texts);
    let acquirer = TextAcquirer::new(Arc::new(MupdfBackend::new()), Arc::new(NoOcr));

    let outcome = acquirer.extract_text(SourceDocument::new(pdf, MediaKind::Pdf));
    assert!(outcome.is_ok(), "{:?}", outcome.failure);

    let text = outcome.value.as_str();
    let positions: Vec<usize> = texts
        .iter()
        .map(|t| text.find(t).unwrap_or_else(|| panic!("{t:?} missing from {text:?}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
}

#[test]
fn garbage_bytes_degrade_to_empty_text() {
    let acquirer = TextAcquirer::new(Arc::new(MupdfBackend::new()), Arc::new(NoOcr));
    let outcome = acquirer.extract_text(SourceDocument::new(
        b"this is definitely not a pdf".to_vec(),
        MediaKind::Pdf,
    ));

    // MuPDF either refuses the bytes or repairs them into a document with no
    // text; both must come back as empty text without panicking.
    assert!(outcome.value.is_empty());
    if let Some(failure) = outcome.failure {
        assert!(matches!(
            failure,
            PipelineError::AcquisitionFailure {
                kind: MediaKind::Pdf,
                ..
            }
        ));
    }
}
