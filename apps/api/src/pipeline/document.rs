//! Transient storage of the uploaded résumé and text extraction from it.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::DocumentLimits;
use crate::text::truncate_text;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document is not a PDF")]
    NotPdf,

    #[error("PDF text extraction failed: {0}")]
    Extraction(String),

    #[error("document I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// The uploaded document on disk for the duration of one request.
///
/// The file is removed exactly once, when the guard is dropped.
pub struct TransientDocument {
    path: PathBuf,
    file: Option<NamedTempFile>,
}

impl TransientDocument {
    /// Writes `bytes` to a fresh `resume-*.pdf` file in `dir`, or in the
    /// system temp directory when `dir` is `None`.
    pub fn create(bytes: &[u8], dir: Option<&Path>) -> Result<Self, DocumentError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("resume-").suffix(".pdf");

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(bytes)?;
        file.flush()?;

        let path = file.path().to_path_buf();
        debug!("Stored transient document at {}", path.display());
        Ok(Self {
            path,
            file: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TransientDocument {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            match file.close() {
                Ok(()) => debug!("Removed transient document {}", self.path.display()),
                Err(e) => warn!(
                    "Failed to remove transient document {}: {e}",
                    self.path.display()
                ),
            }
        }
    }
}

/// Turns a stored document into plain text (possibly empty).
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, path: &Path) -> Result<String, DocumentError>;
}

/// `pdf-extract` backed extractor, bounded by page and character limits.
pub struct PdfTextExtractor {
    limits: DocumentLimits,
}

impl PdfTextExtractor {
    pub fn new(limits: DocumentLimits) -> Self {
        Self { limits }
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, path: &Path) -> Result<String, DocumentError> {
        let path = path.to_path_buf();
        let limits = self.limits.clone();

        // PDF parsing is CPU-bound and may panic on malformed input.
        tokio::task::spawn_blocking(move || extract_pdf_text(&path, &limits))
            .await
            .map_err(|e| DocumentError::Extraction(format!("PDF parser task failed: {e}")))?
    }
}

fn extract_pdf_text(path: &Path, limits: &DocumentLimits) -> Result<String, DocumentError> {
    let bytes = std::fs::read(path)?;
    if !bytes.starts_with(b"%PDF") {
        return Err(DocumentError::NotPdf);
    }

    let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes)
        .map_err(|e| DocumentError::Extraction(e.to_string()))?;
    if pages.len() > limits.max_pages {
        warn!(
            "PDF has {} pages, reading only the first {}",
            pages.len(),
            limits.max_pages
        );
    }

    let text = join_pages(&pages, limits);
    debug!("Extracted {} characters from PDF", text.chars().count());
    Ok(text)
}

fn join_pages(pages: &[String], limits: &DocumentLimits) -> String {
    let joined = pages
        .iter()
        .take(limits.max_pages)
        .map(|page| page.trim())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    truncate_text(&joined, limits.max_chars, "")
}
