//! Orchestrator: one request from uploaded résumé + posting text to a letter.
//!
//! Flow: validate inputs → store transient document → extract text →
//!       {résumé extraction ∥ job extraction} → generate letter →
//!       strip reasoning markup.
//!
//! The transient document is owned here and removed on every exit path. The
//! stages run in their own task, so a panic anywhere in them surfaces as
//! `PipelineError::Internal` instead of tearing down the request.

pub mod document;
pub mod errors;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinError;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

use crate::config::{DocumentLimits, KeywordTables};
use crate::extraction::{
    extract_job_description, extract_resume, validate_job_extraction, validate_resume_extraction,
    JobDescriptionExtraction, ResumeExtraction,
};
use crate::generation::{generate_cover_letter, CoverLetter};
use crate::llm_client::GenerationService;
use crate::text::remove_thinking_tags;

pub use document::{PdfTextExtractor, TextExtractor, TransientDocument};
pub use errors::PipelineError;

/// Per-deployment knobs for the pipeline, taken from `Config`.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub documents: DocumentLimits,
    pub keywords: KeywordTables,
    /// Response-length cap for the letter generation call.
    pub max_tokens: u32,
    /// Where transient documents are written; the system temp dir when `None`.
    pub temp_dir: Option<PathBuf>,
}

#[derive(Clone)]
pub struct CoverLetterPipeline {
    service: Arc<dyn GenerationService>,
    extractor: Arc<dyn TextExtractor>,
    settings: Arc<PipelineSettings>,
}

impl CoverLetterPipeline {
    pub fn new(
        service: Arc<dyn GenerationService>,
        extractor: Arc<dyn TextExtractor>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            service,
            extractor,
            settings: Arc::new(settings),
        }
    }

    /// Produces a cover letter for the résumé in `document` and the posting
    /// in `job_description`.
    pub async fn process(
        &self,
        document: Option<&[u8]>,
        job_description: &str,
    ) -> Result<CoverLetter, PipelineError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("cover_letter", %request_id);
        self.run(document, job_description).instrument(span).await
    }

    async fn run(
        &self,
        document: Option<&[u8]>,
        job_description: &str,
    ) -> Result<CoverLetter, PipelineError> {
        if job_description.trim().is_empty() {
            return Err(PipelineError::MissingJobDescription);
        }
        let bytes = match document {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => return Err(PipelineError::MissingDocument),
        };

        let transient = TransientDocument::create(bytes, self.settings.temp_dir.as_deref())?;
        info!("Processing résumé ({} bytes)", bytes.len());

        let pipeline = self.clone();
        let path = transient.path().to_path_buf();
        let job_text = job_description.to_string();
        let outcome = tokio::spawn(
            async move { pipeline.run_stages(&path, &job_text).await }.in_current_span(),
        )
        .await;

        drop(transient);

        match outcome {
            Ok(result) => result,
            Err(e) => {
                error!("Cover letter pipeline task failed: {e}");
                Err(PipelineError::Internal(e.to_string()))
            }
        }
    }

    async fn run_stages(&self, path: &Path, job_text: &str) -> Result<CoverLetter, PipelineError> {
        let resume_text = self.extractor.extract_text(path).await?;
        let text_length = resume_text.trim().chars().count();
        if text_length < self.settings.documents.min_text_length {
            info!("Résumé text too short ({text_length} characters)");
            return Err(PipelineError::InsufficientText);
        }

        let (resume, job) = extract_concurrently(
            Arc::clone(&self.service),
            resume_text,
            job_text.to_string(),
            &self.settings.keywords,
        )
        .await;
        let (Some(resume), Some(job)) = (resume, job) else {
            return Err(PipelineError::InsufficientInformation);
        };
        log_audits(&resume, &job);

        let letter =
            generate_cover_letter(&*self.service, &resume, &job, self.settings.max_tokens).await;
        let letter = remove_thinking_tags(&letter);
        if letter.is_empty() {
            return Err(PipelineError::GenerationFailed);
        }

        info!("Cover letter ready ({} characters)", letter.chars().count());
        Ok(CoverLetter::new(letter, &job))
    }
}

/// Runs both extractors side by side. A failed task yields `None` for its
/// record and leaves the other untouched.
pub(crate) async fn extract_concurrently(
    service: Arc<dyn GenerationService>,
    resume_text: String,
    job_text: String,
    tables: &KeywordTables,
) -> (Option<ResumeExtraction>, Option<JobDescriptionExtraction>) {
    let resume_task = {
        let service = Arc::clone(&service);
        let tables = tables.clone();
        tokio::spawn(
            async move { extract_resume(&*service, &resume_text, &tables).await }
                .in_current_span(),
        )
    };
    let job_task = {
        let tables = tables.clone();
        tokio::spawn(
            async move { extract_job_description(&*service, &job_text, &tables).await }
                .in_current_span(),
        )
    };

    let (resume, job) = tokio::join!(resume_task, job_task);
    (settle("résumé", resume), settle("job description", job))
}

fn log_audits(resume: &ResumeExtraction, job: &JobDescriptionExtraction) {
    for audit in [validate_resume_extraction(resume), validate_job_extraction(job)] {
        if let Some(issues) = &audit.error_message {
            debug!(
                kind = ?audit.extraction_type,
                success = audit.success,
                "Extraction audit: {issues}"
            );
        }
    }
}

fn settle<T>(stage: &str, joined: Result<T, JoinError>) -> Option<T> {
    joined
        .map_err(|e| error!("{stage} extraction task failed: {e}"))
        .ok()
}
