//! Résumé Extractor: résumé text → `ResumeExtraction`, via the model with a
//! keyword heuristic fallback.

use tracing::{info, warn};

use super::models::{ExtractionKind, ExtractionResult, RawResumeExtraction, ResumeExtraction};
use super::prompts::RESUME_EXTRACTION_PROMPT;
use super::{request_json, MIN_EXTRACTION_CHARS};
use crate::config::KeywordTables;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::GenerationService;
use crate::text::{
    contains_any, dedup_preserving_order, extract_email, extract_keywords, extract_phone,
    truncate_text,
};

/// Prefix of the résumé sent to the model, in characters.
const PROMPT_TEXT_CHARS: usize = 2500;
const FALLBACK_SCAN_LINES: usize = 50;
const MAX_SKILLS: usize = 8;
const MAX_EXPERIENCE: usize = 4;
const MAX_EDUCATION: usize = 3;

/// Section headings that mention an experience marker but are not roles.
const GENERIC_EXPERIENCE_HEADINGS: &[&str] = &["experience", "work history", "employment"];

/// Extracts structured candidate data. Never fails: any model or parse
/// problem routes to `fallback_resume_extraction`.
pub async fn extract_resume(
    service: &dyn GenerationService,
    resume_text: &str,
    tables: &KeywordTables,
) -> ResumeExtraction {
    if resume_text.trim().chars().count() < MIN_EXTRACTION_CHARS {
        warn!("Resume text is too short for meaningful extraction");
        return fallback_resume_extraction(resume_text, tables);
    }

    let prompt = RESUME_EXTRACTION_PROMPT
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{resume_text}", &truncate_text(resume_text, PROMPT_TEXT_CHARS, ""));

    match request_json::<RawResumeExtraction>(service, &prompt).await {
        Ok(raw) => {
            info!("Resume extracted by {}", service.model_name());
            raw.into()
        }
        Err(reason) => {
            info!("Using fallback resume extraction: {reason}");
            fallback_resume_extraction(resume_text, tables)
        }
    }
}

/// Keyword/regex heuristic over the raw résumé text. Pure and infallible.
pub fn fallback_resume_extraction(resume_text: &str, tables: &KeywordTables) -> ResumeExtraction {
    if resume_text.trim().is_empty() {
        return default_resume_extraction();
    }

    let mut skills = extract_keywords(resume_text, &tables.skills);

    let contact_info = [extract_email(resume_text), extract_phone(resume_text)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" | ");

    let mut experience = Vec::new();
    let mut education = Vec::new();

    for line in resume_text.lines().take(FALLBACK_SCAN_LINES) {
        let line = line.trim();
        let length = line.chars().count();
        if length < 5 {
            continue;
        }
        let lower = line.to_lowercase();

        if length > 10
            && contains_any(&lower, &tables.experience_markers)
            && !contains_any(&lower, GENERIC_EXPERIENCE_HEADINGS)
        {
            experience.push(line.to_string());
        }

        if contains_any(&lower, &tables.education_markers) {
            education.push(line.to_string());
        }
    }

    skills.truncate(MAX_SKILLS);
    let mut experience = dedup_preserving_order(experience);
    experience.truncate(MAX_EXPERIENCE);
    let mut education = dedup_preserving_order(education);
    education.truncate(MAX_EDUCATION);

    ResumeExtraction::new(experience, skills, education, contact_info)
}

/// Used when there is no text at all to scan.
fn default_resume_extraction() -> ResumeExtraction {
    ResumeExtraction::new(
        vec![],
        vec![
            "Software development".to_string(),
            "Problem solving".to_string(),
            "Team collaboration".to_string(),
            "Technical communication".to_string(),
        ],
        vec![],
        String::new(),
    )
}

/// Audits how much of the record is real data rather than placeholders.
/// Succeeds with fewer than three issues.
pub fn validate_resume_extraction(extraction: &ResumeExtraction) -> ExtractionResult {
    let mut issues = Vec::new();

    if extraction
        .experience()
        .iter()
        .all(|e| e.to_lowercase().contains("professional"))
    {
        issues.push("Generic experience information");
    }
    if extraction.skills().len() < 2 {
        issues.push("Insufficient skills extracted");
    }
    if extraction
        .education()
        .iter()
        .all(|e| e.to_lowercase().contains("computer science"))
    {
        issues.push("Generic education information");
    }
    if extraction
        .contact_info()
        .to_lowercase()
        .contains("contact information")
    {
        issues.push("No specific contact information");
    }

    ExtractionResult::from_issues(extraction, issues, 3, ExtractionKind::Resume)
}
