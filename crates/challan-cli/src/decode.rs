//! The decode collaborator: turns input files into [`RawDocument`]s.
//!
//! Two input shapes are accepted:
//! - `.json`: a serialized [`RawDocument`] dump from any external decoder
//!   (this is the only path that carries table matrices);
//! - `.pdf`: embedded-text extraction via `pdf-extract`. No table recovery
//!   happens here, so TDS Returns line-items require the JSON path.

use std::fs;
use std::path::Path;

use anyhow::Context;
use lopdf::Document;
use tracing::debug;

use challan_core::RawDocument;

/// Load one input file into a decoded document.
pub fn load_document(path: &Path) -> anyhow::Result<RawDocument> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let id = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("document")
        .to_string();

    match extension.as_str() {
        "json" => load_json(path, id),
        "pdf" => load_pdf(path, id),
        other => anyhow::bail!("unsupported input format: '{other}' (expected .json or .pdf)"),
    }
}

fn load_json(path: &Path, id: String) -> anyhow::Result<RawDocument> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut doc: RawDocument = serde_json::from_str(&content)
        .with_context(|| format!("invalid document dump in {}", path.display()))?;

    if doc.id.is_empty() {
        doc.id = id;
    }

    debug!(
        document = %doc.id,
        pages = doc.pages.len(),
        tables = doc.tables.len(),
        "loaded document dump"
    );
    Ok(doc)
}

fn load_pdf(path: &Path, id: String) -> anyhow::Result<RawDocument> {
    let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    let mut doc = Document::load_mem(&data)
        .with_context(|| format!("failed to parse PDF {}", path.display()))?;

    // Handle PDFs with empty password encryption
    let raw_data = if doc.is_encrypted() {
        if doc.decrypt("").is_err() {
            anyhow::bail!("PDF is encrypted: {}", path.display());
        }
        debug!("decrypted PDF with empty password");

        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted)
            .with_context(|| "failed to save decrypted PDF")?;
        decrypted
    } else {
        data
    };

    let page_count = doc.get_pages().len();
    if page_count == 0 {
        anyhow::bail!("PDF has no pages: {}", path.display());
    }

    let text = pdf_extract::extract_text_from_mem(&raw_data)
        .with_context(|| format!("failed to extract text from {}", path.display()))?;
    if text.trim().is_empty() {
        anyhow::bail!("no embedded text in {} (scanned PDFs need an external decoder)", path.display());
    }

    debug!(document = %id, pages = page_count, chars = text.len(), "extracted PDF text");
    Ok(RawDocument::from_pages(id, vec![text]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_json_dump_roundtrip() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"id": "", "pages": ["period Q1"], "tables": [[["a","b","c","d","e","f"]]]}}"#
        )
        .unwrap();

        let doc = load_document(file.path()).unwrap();
        // Empty id falls back to the file name.
        assert!(doc.id.ends_with(".json"));
        assert_eq!(doc.pages, vec!["period Q1"]);
        assert_eq!(doc.tables.len(), 1);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = load_document(Path::new("document.docx")).unwrap_err();
        assert!(err.to_string().contains("unsupported input format"));
    }
}
