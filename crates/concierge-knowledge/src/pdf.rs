//! PDF text extraction for guides exported as PDF

use std::path::Path;

/// Every PDF file starts with this marker
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Whether `bytes` (read from `path`) should be treated as a PDF
pub(crate) fn is_pdf(path: &Path, bytes: &[u8]) -> bool {
    bytes.starts_with(PDF_MAGIC)
        || path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Extract the text of every page, in page order
pub(crate) fn extract_text(bytes: &[u8]) -> Result<String, String> {
    // pdf-extract panics on some malformed documents
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(format!("failed to extract PDF text: {e}")),
        Err(_) => Err("failed to extract PDF text: malformed document".to_string()),
    }
}
