//! Structured records produced by the extractors.
//!
//! Invariant: once constructed, no required list or string is empty. The
//! constructors substitute a representative placeholder for anything missing.

use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_EXPERIENCE: &str = "Professional software development experience";
pub const PLACEHOLDER_SKILLS: &[&str] = &[
    "Software development",
    "Problem solving",
    "Team collaboration",
];
pub const PLACEHOLDER_EDUCATION: &str = "Computer Science or related degree";
pub const PLACEHOLDER_CONTACT: &str = "Contact information from resume";

pub const PLACEHOLDER_JOB_TITLE: &str = "Software Engineer";
pub const PLACEHOLDER_COMPANY: &str = "Company";
pub const PLACEHOLDER_REQUIREMENTS: &[&str] = &[
    "Relevant technical experience",
    "Strong problem-solving skills",
    "Team collaboration abilities",
    "Bachelor's degree preferred",
];
pub const PLACEHOLDER_DESCRIPTION: &str =
    "Software engineering position with competitive compensation and benefits.";

/// Candidate data extracted from a résumé.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeExtraction {
    experience: Vec<String>,
    skills: Vec<String>,
    education: Vec<String>,
    contact_info: String,
}

impl ResumeExtraction {
    pub fn new(
        experience: Vec<String>,
        skills: Vec<String>,
        education: Vec<String>,
        contact_info: String,
    ) -> Self {
        Self {
            experience: non_empty_list(experience, &[PLACEHOLDER_EXPERIENCE]),
            skills: non_empty_list(skills, PLACEHOLDER_SKILLS),
            education: non_empty_list(education, &[PLACEHOLDER_EDUCATION]),
            contact_info: non_empty_string(contact_info, PLACEHOLDER_CONTACT),
        }
    }

    pub fn experience(&self) -> &[String] {
        &self.experience
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn education(&self) -> &[String] {
        &self.education
    }

    pub fn contact_info(&self) -> &str {
        &self.contact_info
    }

    /// First experience entry; always present by construction.
    pub fn primary_experience(&self) -> &str {
        self.experience
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_EXPERIENCE)
    }

    pub fn primary_education(&self) -> &str {
        self.education
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_EDUCATION)
    }
}

/// Shape the model is asked to return. Every field is required; a response
/// missing one fails deserialization and routes the extractor to its fallback.
#[derive(Debug, Deserialize)]
pub(crate) struct RawResumeExtraction {
    pub experience: Vec<String>,
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub contact_info: String,
}

impl From<RawResumeExtraction> for ResumeExtraction {
    fn from(raw: RawResumeExtraction) -> Self {
        ResumeExtraction::new(raw.experience, raw.skills, raw.education, raw.contact_info)
    }
}

/// Job data extracted from a posting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDescriptionExtraction {
    job_title: String,
    company_name: String,
    requirements: Vec<String>,
    description: String,
}

impl JobDescriptionExtraction {
    pub fn new(
        job_title: String,
        company_name: String,
        requirements: Vec<String>,
        description: String,
    ) -> Self {
        Self {
            job_title: non_empty_string(job_title, PLACEHOLDER_JOB_TITLE),
            company_name: non_empty_string(company_name, PLACEHOLDER_COMPANY),
            requirements: non_empty_list(requirements, PLACEHOLDER_REQUIREMENTS),
            description: non_empty_string(description, PLACEHOLDER_DESCRIPTION),
        }
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The company name, unless it is only the placeholder.
    pub fn known_company(&self) -> Option<&str> {
        (self.company_name != PLACEHOLDER_COMPANY).then_some(self.company_name.as_str())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawJobDescriptionExtraction {
    pub job_title: String,
    pub company_name: String,
    pub requirements: Vec<String>,
    pub description: String,
}

impl From<RawJobDescriptionExtraction> for JobDescriptionExtraction {
    fn from(raw: RawJobDescriptionExtraction) -> Self {
        JobDescriptionExtraction::new(
            raw.job_title,
            raw.company_name,
            raw.requirements,
            raw.description,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionKind {
    Resume,
    JobDescription,
}

/// Quality audit of an extraction. Diagnostic only; the pipeline does not branch on it.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    pub success: bool,
    /// The extracted record, present only when judged good enough.
    pub data: Option<serde_json::Value>,
    pub error_message: Option<String>,
    pub extraction_type: ExtractionKind,
}

impl ExtractionResult {
    pub(crate) fn from_issues<T: Serialize>(
        record: &T,
        issues: Vec<&str>,
        max_issues: usize,
        extraction_type: ExtractionKind,
    ) -> Self {
        let success = issues.len() < max_issues;
        Self {
            success,
            data: success.then(|| serde_json::to_value(record).ok()).flatten(),
            error_message: (!issues.is_empty()).then(|| issues.join("; ")),
            extraction_type,
        }
    }
}

fn non_empty_list(items: Vec<String>, placeholder: &[&str]) -> Vec<String> {
    let cleaned: Vec<String> = items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if cleaned.is_empty() {
        placeholder.iter().map(|s| s.to_string()).collect()
    } else {
        cleaned
    }
}

fn non_empty_string(value: String, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_extraction_fills_placeholders() {
        let r = ResumeExtraction::new(vec![], vec!["  ".to_string()], vec![], " ".to_string());
        assert_eq!(r.experience(), [PLACEHOLDER_EXPERIENCE]);
        assert_eq!(r.skills().len(), PLACEHOLDER_SKILLS.len());
        assert_eq!(r.education(), [PLACEHOLDER_EDUCATION]);
        assert_eq!(r.contact_info(), PLACEHOLDER_CONTACT);
    }

    #[test]
    fn test_resume_extraction_trims_and_keeps_values() {
        let r = ResumeExtraction::new(
            vec![" Engineer at Acme ".to_string(), "".to_string()],
            vec!["Rust".to_string()],
            vec!["BSc".to_string()],
            "jane@example.com".to_string(),
        );
        assert_eq!(r.experience(), ["Engineer at Acme"]);
        assert_eq!(r.primary_experience(), "Engineer at Acme");
        assert_eq!(r.primary_education(), "BSc");
    }

    #[test]
    fn test_raw_resume_requires_every_field() {
        let missing = r#"{"experience": [], "skills": [], "education": []}"#;
        assert!(serde_json::from_str::<RawResumeExtraction>(missing).is_err());
    }

    #[test]
    fn test_job_extraction_fills_placeholders() {
        let j = JobDescriptionExtraction::new(String::new(), String::new(), vec![], String::new());
        assert_eq!(j.job_title(), PLACEHOLDER_JOB_TITLE);
        assert_eq!(j.company_name(), PLACEHOLDER_COMPANY);
        assert_eq!(j.requirements().len(), 4);
        assert_eq!(j.description(), PLACEHOLDER_DESCRIPTION);
        assert!(j.known_company().is_none());
    }

    #[test]
    fn test_known_company() {
        let j = JobDescriptionExtraction::new(
            "Backend Engineer".to_string(),
            "Acme".to_string(),
            vec![],
            String::new(),
        );
        assert_eq!(j.known_company(), Some("Acme"));
    }

    #[test]
    fn test_extraction_result_success_carries_data() {
        let j =
            JobDescriptionExtraction::new(String::new(), "Acme".to_string(), vec![], String::new());
        let result = ExtractionResult::from_issues(&j, vec!["Generic job title"], 2, ExtractionKind::JobDescription);
        assert!(result.success);
        assert_eq!(result.data.unwrap()["company_name"], "Acme");
        assert_eq!(result.error_message.as_deref(), Some("Generic job title"));
    }

    #[test]
    fn test_extraction_result_failure_drops_data() {
        let j = JobDescriptionExtraction::new(String::new(), String::new(), vec![], String::new());
        let result =
            ExtractionResult::from_issues(&j, vec!["a", "b"], 2, ExtractionKind::JobDescription);
        assert!(!result.success);
        assert!(result.data.is_none());
        assert_eq!(result.error_message.as_deref(), Some("a; b"));
    }

    #[test]
    fn test_extraction_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ExtractionKind::JobDescription).unwrap();
        assert_eq!(json, r#""job_description""#);
    }
}
