use std::str::FromStr;

use anyhow::{bail, Context, Result};

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "deepseek-r1:latest";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

const DEFAULT_SKILL_KEYWORDS: &[&str] = &[
    "python", "java", "javascript", "react", "node", "sql", "aws", "docker", "git", "html", "css",
    "typescript", "angular", "vue", "kubernetes", "jenkins",
];

const DEFAULT_EXPERIENCE_KEYWORDS: &[&str] = &[
    "engineer", "developer", "manager", "analyst", "intern", "specialist", "consultant",
    "architect", "lead", "senior", "junior",
];

const DEFAULT_EDUCATION_KEYWORDS: &[&str] = &[
    "university", "college", "degree", "bachelor", "master", "phd", "certification", "diploma",
    "institute", "school",
];

const DEFAULT_REQUIREMENT_KEYWORDS: &[&str] = &[
    "required", "must have", "experience with", "proficient", "knowledge of", "familiar with",
    "skilled in", "expertise in",
];

/// Application configuration loaded from environment variables.
/// Fails at startup if a required variable is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub provider: ProviderSettings,
    pub generation: GenerationParams,
    pub documents: DocumentLimits,
    pub keywords: KeywordTables,
    pub max_upload_bytes: usize,
}

/// Which Generation Service backend to talk to, and how.
#[derive(Debug, Clone)]
pub enum ProviderSettings {
    Ollama {
        base_url: String,
        model: String,
        timeout_secs: u64,
    },
    Gemini {
        api_key: String,
        model: String,
        timeout_secs: u64,
    },
}

/// Sampling parameters forwarded to every provider call.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    /// Response-length cap for cover letter generation.
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            top_k: 40,
            max_tokens: 2000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocumentLimits {
    pub max_pages: usize,
    pub max_chars: usize,
    /// Below this many characters a document (or résumé text) is not worth a model call.
    pub min_text_length: usize,
}

impl Default for DocumentLimits {
    fn default() -> Self {
        Self {
            max_pages: 50,
            max_chars: 20_000,
            min_text_length: 50,
        }
    }
}

/// Keyword tables driving the non-LLM fallback heuristics.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordTables {
    pub skills: Vec<String>,
    pub experience_markers: Vec<String>,
    pub education_markers: Vec<String>,
    pub requirement_markers: Vec<String>,
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self {
            skills: to_owned_list(DEFAULT_SKILL_KEYWORDS),
            experience_markers: to_owned_list(DEFAULT_EXPERIENCE_KEYWORDS),
            education_markers: to_owned_list(DEFAULT_EDUCATION_KEYWORDS),
            requirement_markers: to_owned_list(DEFAULT_REQUIREMENT_KEYWORDS),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            provider: provider_from_env()?,
            generation: GenerationParams {
                temperature: env_or("GENERATION_TEMPERATURE", 0.7)?,
                top_p: env_or("GENERATION_TOP_P", 0.9)?,
                top_k: env_or("GENERATION_TOP_K", 40)?,
                max_tokens: env_or("GENERATION_MAX_TOKENS", 2000)?,
            },
            documents: DocumentLimits {
                max_pages: env_or("PDF_MAX_PAGES", 50)?,
                max_chars: env_or("PDF_MAX_CHARS", 20_000)?,
                min_text_length: env_or("MIN_TEXT_LENGTH", 50)?,
            },
            keywords: KeywordTables {
                skills: env_list("SKILL_KEYWORDS", DEFAULT_SKILL_KEYWORDS),
                experience_markers: env_list("EXPERIENCE_KEYWORDS", DEFAULT_EXPERIENCE_KEYWORDS),
                education_markers: env_list("EDUCATION_KEYWORDS", DEFAULT_EDUCATION_KEYWORDS),
                requirement_markers: env_list("REQUIREMENT_KEYWORDS", DEFAULT_REQUIREMENT_KEYWORDS),
            },
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

fn provider_from_env() -> Result<ProviderSettings> {
    let provider = std::env::var("LLM_PROVIDER").unwrap_or_else(|_| "ollama".to_string());

    match provider.trim().to_lowercase().as_str() {
        "ollama" => Ok(ProviderSettings::Ollama {
            base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OLLAMA_BASE_URL.to_string()),
            model: std::env::var("OLLAMA_MODEL")
                .unwrap_or_else(|_| DEFAULT_OLLAMA_MODEL.to_string()),
            timeout_secs: env_or("OLLAMA_TIMEOUT_SECS", 180)?,
        }),
        "gemini" => Ok(ProviderSettings::Gemini {
            api_key: require_env("GEMINI_API_KEY")?,
            model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            timeout_secs: env_or("GEMINI_TIMEOUT_SECS", 60)?,
        }),
        other => bail!("LLM_PROVIDER must be 'ollama' or 'gemini', got '{other}'"),
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn env_list(key: &str, default: &[&str]) -> Vec<String> {
    std::env::var(key)
        .ok()
        .map(|raw| parse_list(&raw))
        .filter(|list| !list.is_empty())
        .unwrap_or_else(|| to_owned_list(default))
}

/// Splits a comma-separated override into lowercase, non-empty entries.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_trims_and_lowercases() {
        assert_eq!(parse_list(" Rust, Go ,,SQL "), vec!["rust", "go", "sql"]);
    }

    #[test]
    fn test_parse_list_empty() {
        assert!(parse_list(" , ,").is_empty());
    }

    #[test]
    fn test_default_keyword_tables_are_populated() {
        let tables = KeywordTables::default();
        assert!(tables.skills.contains(&"python".to_string()));
        assert!(tables.experience_markers.contains(&"engineer".to_string()));
        assert!(tables.education_markers.contains(&"bachelor".to_string()));
        assert!(tables.requirement_markers.contains(&"must have".to_string()));
    }

    #[test]
    fn test_generation_defaults() {
        let params = GenerationParams::default();
        assert_eq!(params.max_tokens, 2000);
        assert_eq!(params.top_k, 40);
        assert_eq!(DocumentLimits::default().min_text_length, 50);
    }
}
