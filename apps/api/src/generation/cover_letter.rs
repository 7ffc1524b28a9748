//! Cover Letter Generator: prompts the model with both extracted records,
//! post-processes the reply, and falls back to a fixed template.
//!
//! Flow: build prompt → generate → strip reasoning markup → quality gate →
//!       format (greeting / closing / date) → letter text.
//!
//! Never fails. A service error or a rejected reply yields
//! `fallback_cover_letter`, which makes no model call.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::format::{date_line, format_cover_letter, greeting, has_closing, SIGN_OFF};
use super::prompts::COVER_LETTER_PROMPT;
use crate::extraction::{JobDescriptionExtraction, ResumeExtraction};
use crate::llm_client::GenerationService;
use crate::text::{remove_thinking_tags, validate_response_quality};

/// Replies (and letters) shorter than this are rejected.
pub const MIN_LETTER_CHARS: usize = 200;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// A finished letter together with the job it targets.
#[derive(Debug, Clone, Serialize)]
pub struct CoverLetter {
    pub content: String,
    pub job_title: String,
    pub company_name: String,
    pub generated_at: DateTime<Utc>,
}

impl CoverLetter {
    pub fn new(content: String, job: &JobDescriptionExtraction) -> Self {
        Self {
            content,
            job_title: job.job_title().to_string(),
            company_name: job.company_name().to_string(),
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverLetterStats {
    pub character_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    pub avg_words_per_sentence: f64,
}

impl CoverLetterStats {
    pub fn from_content(content: &str) -> Self {
        let word_count = content.split_whitespace().count();
        let sentence_count = content.split('.').filter(|s| !s.trim().is_empty()).count();
        let paragraph_count = content.split("\n\n").filter(|p| !p.trim().is_empty()).count();

        Self {
            character_count: content.chars().count(),
            word_count,
            sentence_count,
            paragraph_count,
            avg_words_per_sentence: word_count as f64 / sentence_count.max(1) as f64,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

/// Generates a letter for `job` from the candidate data in `resume`.
pub async fn generate_cover_letter(
    service: &dyn GenerationService,
    resume: &ResumeExtraction,
    job: &JobDescriptionExtraction,
    max_tokens: u32,
) -> String {
    let today = Local::now().date_naive();
    let prompt = build_prompt(resume, job);

    match service.generate(&prompt, max_tokens).await {
        Ok(response) => {
            let cleaned = remove_thinking_tags(&response);
            if validate_response_quality(&cleaned, MIN_LETTER_CHARS) {
                let letter = format_cover_letter(&cleaned, job.known_company(), today);
                info!("Generated cover letter length: {} characters", letter.chars().count());
                return letter;
            }
            warn!(
                "Cover letter reply rejected by quality gate ({} characters)",
                cleaned.chars().count()
            );
        }
        Err(e) => warn!("Cover letter generation failed: {e}"),
    }

    fallback_cover_letter(resume, job, today)
}

fn build_prompt(resume: &ResumeExtraction, job: &JobDescriptionExtraction) -> String {
    COVER_LETTER_PROMPT
        .replace("{job_title}", job.job_title())
        .replace("{company_name}", job.company_name())
        .replace("{requirements}", &join_first(job.requirements(), 3))
        .replace("{skills}", &join_first(resume.skills(), 4))
        .replace("{experience}", resume.primary_experience())
        .replace("{education}", resume.primary_education())
}

fn join_first(items: &[String], count: usize) -> String {
    items
        .iter()
        .take(count)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Deterministic letter built only from the two records.
pub fn fallback_cover_letter(
    resume: &ResumeExtraction,
    job: &JobDescriptionExtraction,
    today: NaiveDate,
) -> String {
    info!("Using fallback cover letter template");

    let company = job.company_name();
    let title = job.job_title();
    let experience = resume.primary_experience();
    let skills = join_first(resume.skills(), 3);
    let requirements = join_first(job.requirements(), 2);

    format!(
        "{date}\n\n\
        {greeting}\n\n\
        I am writing to express my strong interest in the {title} position at {company}. \
        Having reviewed the job requirements, I am confident that my background and skills \
        make me an excellent candidate for this role.\n\n\
        My experience includes {experience}, which has provided me with a solid foundation \
        in software development and problem-solving. This background aligns well with your \
        requirements for {requirements}.\n\n\
        My technical skills include {skills}, which I believe will contribute significantly \
        to your team's success. I am particularly drawn to this opportunity because it \
        combines my passion for technology with the chance to make a meaningful impact at \
        {company}.\n\n\
        I would welcome the opportunity to discuss how my background and enthusiasm can \
        contribute to your team. Thank you for considering my application, and I look \
        forward to hearing from you.\n\n\
        {sign_off}",
        date = date_line(today),
        greeting = greeting(job.known_company()),
        sign_off = SIGN_OFF,
    )
}

/// Structural check on a finished letter: long enough, greets, and closes.
pub fn validate_cover_letter(content: &str) -> bool {
    let trimmed = content.trim();
    trimmed.chars().count() >= MIN_LETTER_CHARS
        && trimmed.to_lowercase().contains("dear")
        && has_closing(trimmed)
}
