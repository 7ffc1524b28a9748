// Cover letter generation: structured résumé + job records → letter text.
// All model calls go through llm_client; failures end in the deterministic template.

pub mod cover_letter;
pub mod format;
pub mod handlers;
pub mod prompts;

pub use cover_letter::{generate_cover_letter, validate_cover_letter, CoverLetter, CoverLetterStats};
