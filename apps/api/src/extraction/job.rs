//! Job Extractor: posting text → `JobDescriptionExtraction`, via the model
//! with a line-scanning heuristic fallback.

use tracing::{info, warn};

use super::models::{
    ExtractionKind, ExtractionResult, JobDescriptionExtraction, RawJobDescriptionExtraction,
    PLACEHOLDER_COMPANY, PLACEHOLDER_DESCRIPTION, PLACEHOLDER_JOB_TITLE,
};
use super::prompts::JOB_EXTRACTION_PROMPT;
use super::{request_json, MIN_EXTRACTION_CHARS};
use crate::config::KeywordTables;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::GenerationService;
use crate::text::{contains_any, dedup_preserving_order, truncate_text};

const PROMPT_TEXT_CHARS: usize = 3000;
const TITLE_SCAN_LINES: usize = 20;
const COMPANY_SCAN_LINES: usize = 10;
const MAX_TITLE_CHARS: usize = 100;
const MAX_COMPANY_CHARS: usize = 50;
const MAX_REQUIREMENTS: usize = 4;
/// Lines inspected from each requirement marker onward.
const REQUIREMENT_WINDOW: usize = 5;
const DESCRIPTION_CHARS: usize = 400;

const TITLE_INDICATORS: &[&str] = &[
    "engineer", "developer", "manager", "analyst", "position", "role", "specialist",
];

/// Recruiting boilerplate: lines with these read as prose, not as a title.
const BOILERPLATE_PHRASES: &[&str] = &[
    "we are", "looking for", "seeking", "hiring", "join our", "opportunity",
];

const COMPANY_SKIP_PHRASES: &[&str] =
    &["job", "position", "role", "we are", "about", "description"];
const COMPANY_SUFFIXES: &[&str] = &["inc", "inc.", "llc", "ltd", "ltd.", "corp", "corp.", "gmbh"];

/// Extracts structured job data. Never fails: any model or parse problem
/// routes to `fallback_job_extraction`.
pub async fn extract_job_description(
    service: &dyn GenerationService,
    job_text: &str,
    tables: &KeywordTables,
) -> JobDescriptionExtraction {
    if job_text.trim().chars().count() < MIN_EXTRACTION_CHARS {
        warn!("Job description is too short for meaningful extraction");
        return fallback_job_extraction(job_text, tables);
    }

    let prompt = JOB_EXTRACTION_PROMPT
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{job_text}", &truncate_text(job_text, PROMPT_TEXT_CHARS, ""));

    match request_json::<RawJobDescriptionExtraction>(service, &prompt).await {
        Ok(raw) => {
            info!("Job description extracted by {}", service.model_name());
            raw.into()
        }
        Err(reason) => {
            info!("Using fallback job extraction: {reason}");
            fallback_job_extraction(job_text, tables)
        }
    }
}

/// Line-scanning heuristic over the raw posting. Pure and infallible.
pub fn fallback_job_extraction(job_text: &str, tables: &KeywordTables) -> JobDescriptionExtraction {
    let text = job_text.trim();
    if text.is_empty() {
        return JobDescriptionExtraction::new(
            PLACEHOLDER_JOB_TITLE.to_string(),
            PLACEHOLDER_COMPANY.to_string(),
            vec![],
            PLACEHOLDER_DESCRIPTION.to_string(),
        );
    }

    let lines: Vec<&str> = text.lines().map(str::trim).collect();

    let job_title = find_job_title(&lines);
    let company_name = find_company_name(&lines, job_title);
    let requirements = find_requirements(&lines, &tables.requirement_markers);

    JobDescriptionExtraction::new(
        job_title.unwrap_or(PLACEHOLDER_JOB_TITLE).to_string(),
        company_name.unwrap_or(PLACEHOLDER_COMPANY).to_string(),
        requirements,
        truncate_text(text, DESCRIPTION_CHARS, "..."),
    )
}

/// First short early line naming a role that is not recruiting prose.
fn find_job_title<'a>(lines: &[&'a str]) -> Option<&'a str> {
    lines.iter().take(TITLE_SCAN_LINES).copied().find(|line| {
        let length = line.chars().count();
        let lower = line.to_lowercase();
        length >= 5
            && length < MAX_TITLE_CHARS
            && contains_any(&lower, TITLE_INDICATORS)
            && !contains_any(&lower, BOILERPLATE_PHRASES)
    })
}

/// First short early line that reads like a company name: an explicit
/// `Company:` label, an alphanumeric run of words, or a legal-entity suffix.
fn find_company_name<'a>(lines: &[&'a str], job_title: Option<&str>) -> Option<&'a str> {
    for &line in lines.iter().take(COMPANY_SCAN_LINES) {
        if let Some(labelled) = strip_label(line, "company:") {
            if !labelled.is_empty() {
                return Some(labelled);
            }
        }

        let length = line.chars().count();
        if length <= 2 || length >= MAX_COMPANY_CHARS || Some(line) == job_title {
            continue;
        }

        let lower = line.to_lowercase();
        if contains_any(&lower, COMPANY_SKIP_PHRASES) || contains_any(&lower, TITLE_INDICATORS) {
            continue;
        }

        let alphanumeric = line
            .chars()
            .filter(|c| !c.is_whitespace())
            .all(char::is_alphanumeric);
        let has_suffix = lower
            .split(|c: char| c.is_whitespace() || c == ',')
            .any(|word| COMPANY_SUFFIXES.contains(&word));

        if alphanumeric || has_suffix {
            return Some(line);
        }
    }
    None
}

fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    head.eq_ignore_ascii_case(label)
        .then(|| line[label.len()..].trim())
}

/// Collects lines from each requirement marker onward, up to `MAX_REQUIREMENTS`.
fn find_requirements(lines: &[&str], markers: &[String]) -> Vec<String> {
    let mut requirements = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if !contains_any(&line.to_lowercase(), markers) {
            continue;
        }
        for candidate in lines.iter().skip(i).take(REQUIREMENT_WINDOW) {
            let candidate = candidate.trim_start_matches(['-', '*', '•', ' ']).trim();
            let length = candidate.chars().count();
            if length > 15 && length < 200 {
                requirements.push(candidate.to_string());
            }
        }
        requirements = dedup_preserving_order(requirements);
        if requirements.len() >= MAX_REQUIREMENTS {
            break;
        }
    }

    requirements.truncate(MAX_REQUIREMENTS);
    requirements
}

/// Audits how much of the record is real data rather than placeholders.
/// Succeeds with fewer than two issues.
pub fn validate_job_extraction(extraction: &JobDescriptionExtraction) -> ExtractionResult {
    let mut issues = Vec::new();

    if extraction.job_title() == PLACEHOLDER_JOB_TITLE {
        issues.push("Generic job title");
    }
    if extraction.company_name() == PLACEHOLDER_COMPANY {
        issues.push("Generic company name");
    }
    if extraction.requirements().len() < 2 {
        issues.push("Insufficient requirements extracted");
    }
    if extraction.description().chars().count() < 50 {
        issues.push("Description too short");
    }

    ExtractionResult::from_issues(extraction, issues, 2, ExtractionKind::JobDescription)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::models::PLACEHOLDER_REQUIREMENTS;
    use crate::llm_client::testing::StubService;

    const POSTING: &str = "Acme Robotics\n\
        Senior Rust Engineer\n\
        We are looking for an engineer to join our platform team.\n\
        About the role: build reliable distributed systems.\n\
        Requirements:\n\
        - 5+ years of Rust experience required\n\
        - Experience with Kubernetes and Docker\n\
        - Knowledge of distributed consensus protocols\n\
        - Strong written communication\n\
        - Familiar with PostgreSQL tuning";

    const GOOD_JSON: &str = r#"{"job_title": "Senior Rust Engineer", "company_name": "Acme Robotics",
        "requirements": ["5+ years Rust", "Kubernetes"], "description": "Build distributed systems."}"#;

    fn tables() -> KeywordTables {
        KeywordTables::default()
    }

    #[tokio::test]
    async fn test_model_json_is_used() {
        let service = StubService::replying(GOOD_JSON);
        let result = extract_job_description(&service, POSTING, &tables()).await;
        assert_eq!(result.job_title(), "Senior Rust Engineer");
        assert_eq!(result.company_name(), "Acme Robotics");
        assert_eq!(result.requirements(), ["5+ years Rust", "Kubernetes"]);
    }

    #[tokio::test]
    async fn test_prompt_truncates_posting() {
        let long_posting = format!("{}{}", "b".repeat(3100), "TAIL_MARKER");
        let service = StubService::new(|prompt| {
            assert!(!prompt.contains("TAIL_MARKER"));
            assert!(prompt.contains("expert job description parser"));
            Ok(GOOD_JSON.to_string())
        });
        extract_job_description(&service, &long_posting, &tables()).await;
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn test_short_posting_skips_model_call() {
        let service = StubService::replying(GOOD_JSON);
        let result = extract_job_description(&service, "Rust Engineer", &tables()).await;
        assert_eq!(service.calls(), 0);
        assert_eq!(result.job_title(), "Rust Engineer");
    }

    #[tokio::test]
    async fn test_unreachable_service_falls_back() {
        let service = StubService::unreachable();
        let result = extract_job_description(&service, POSTING, &tables()).await;
        assert_eq!(service.calls(), 1);
        assert_eq!(result.job_title(), "Senior Rust Engineer");
    }

    fn assert_heuristic_record(result: &JobDescriptionExtraction) {
        assert_eq!(result.job_title(), "Senior Rust Engineer");
        assert_eq!(result.company_name(), "Acme Robotics");
        assert!(!result.requirements().is_empty());
        assert!(result.requirements().iter().all(|r| !r.is_empty()));
        assert!(!result.description().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_falls_back() {
        let service = StubService::replying("{\"job_title\": \"Senior Rust Eng");
        let result = extract_job_description(&service, POSTING, &tables()).await;
        assert_eq!(service.calls(), 1);
        assert_heuristic_record(&result);
    }

    #[tokio::test]
    async fn test_missing_field_falls_back() {
        let service = StubService::replying(
            r#"{"job_title": "Platform Lead", "requirements": ["Go"], "description": "x"}"#,
        );
        let result = extract_job_description(&service, POSTING, &tables()).await;
        assert_heuristic_record(&result);
    }

    #[tokio::test]
    async fn test_provider_error_text_falls_back() {
        let service = StubService::replying("API Error: 500. Please check if Ollama is running.");
        let result = extract_job_description(&service, POSTING, &tables()).await;
        assert_heuristic_record(&result);
    }

    #[test]
    fn test_fallback_finds_title_and_company() {
        let result = fallback_job_extraction(POSTING, &tables());
        assert_eq!(result.job_title(), "Senior Rust Engineer");
        assert_eq!(result.company_name(), "Acme Robotics");
    }

    #[test]
    fn test_fallback_title_skips_recruiting_prose() {
        let posting = "We are hiring a Backend Developer!\nStaff Backend Developer\nMore text";
        let result = fallback_job_extraction(posting, &tables());
        assert_eq!(result.job_title(), "Staff Backend Developer");
    }

    #[test]
    fn test_fallback_requirements_follow_markers() {
        let result = fallback_job_extraction(POSTING, &tables());
        assert_eq!(
            result.requirements(),
            [
                "5+ years of Rust experience required",
                "Experience with Kubernetes and Docker",
                "Knowledge of distributed consensus protocols",
                "Strong written communication",
            ]
        );
    }

    #[test]
    fn test_fallback_description_truncated_with_ellipsis() {
        let posting = format!("Data Analyst\n{}", "x".repeat(600));
        let result = fallback_job_extraction(&posting, &tables());
        assert_eq!(result.description().chars().count(), DESCRIPTION_CHARS + 3);
        assert!(result.description().ends_with("..."));
    }

    #[test]
    fn test_fallback_placeholders_when_nothing_matches() {
        let result = fallback_job_extraction("lorem ipsum; dolor sit amet!", &tables());
        assert_eq!(result.job_title(), PLACEHOLDER_JOB_TITLE);
        assert_eq!(result.company_name(), PLACEHOLDER_COMPANY);
        assert_eq!(result.requirements().len(), PLACEHOLDER_REQUIREMENTS.len());
        assert!(!result.description().is_empty());
    }

    #[test]
    fn test_fallback_empty_text() {
        let result = fallback_job_extraction("  \n ", &tables());
        assert_eq!(result.description(), PLACEHOLDER_DESCRIPTION);
    }

    #[test]
    fn test_company_label_and_suffix() {
        let labelled =
            fallback_job_extraction("Company: Globex & Partners\nData Analyst", &tables());
        assert_eq!(labelled.company_name(), "Globex & Partners");

        let suffixed = fallback_job_extraction("Data Analyst\nInitech, LLC", &tables());
        assert_eq!(suffixed.company_name(), "Initech, LLC");
    }

    #[test]
    fn test_validate_fallback_posting_passes() {
        let audit = validate_job_extraction(&fallback_job_extraction(POSTING, &tables()));
        assert!(audit.success);
        assert_eq!(audit.extraction_type, ExtractionKind::JobDescription);
    }

    #[test]
    fn test_validate_placeholder_record_fails() {
        let audit = validate_job_extraction(&fallback_job_extraction("", &tables()));
        assert!(!audit.success);
        assert!(audit
            .error_message
            .unwrap()
            .contains("Generic company name"));
    }
}
