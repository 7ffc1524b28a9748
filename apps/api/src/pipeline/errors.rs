use thiserror::Error;

use super::document::DocumentError;

/// Why a request produced no cover letter. `Display` is the user-facing message.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Please provide a job description.")]
    MissingJobDescription,

    #[error("Please upload a resume PDF.")]
    MissingDocument,

    #[error("Error: Could not read the PDF file. Please try a different file.")]
    UnreadableDocument,

    #[error("Error: Could not extract sufficient text from PDF. Please ensure the PDF is readable.")]
    InsufficientText,

    #[error("Error: Could not extract sufficient information from the provided documents.")]
    InsufficientInformation,

    #[error("Error: Could not generate cover letter. Please try again.")]
    GenerationFailed,

    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

impl PipelineError {
    /// Missing inputs are rejected before any work or side effect happens.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            PipelineError::MissingJobDescription | PipelineError::MissingDocument
        )
    }
}

impl From<DocumentError> for PipelineError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::NotPdf | DocumentError::Extraction(_) => {
                tracing::warn!("Document unreadable: {err}");
                PipelineError::UnreadableDocument
            }
            DocumentError::Io(e) => PipelineError::Internal(e.to_string()),
        }
    }
}
