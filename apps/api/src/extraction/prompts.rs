// All LLM prompt templates for the extraction module.
// Replace `{json_only}` first, then the document placeholder.

pub const RESUME_EXTRACTION_PROMPT: &str = r#"You are an expert resume parser. Extract information from this resume and return ONLY valid JSON.

Resume Text:
{resume_text}

Return ONLY this JSON format with no additional text or explanation:
{
    "experience": ["job title at company name (duration)", "previous role at company (duration)"],
    "skills": ["technical skill 1", "technical skill 2", "technical skill 3", "technical skill 4", "technical skill 5"],
    "education": ["degree from institution (year)", "certification or additional education"],
    "contact_info": "email address and phone number"
}

Requirements:
- Extract real information from the resume text
- Keep job titles and company names accurate
- Focus on technical skills relevant to software development
- Include actual contact information if present
- {json_only}"#;

pub const JOB_EXTRACTION_PROMPT: &str = r#"You are an expert job description parser. Extract key information and return ONLY valid JSON.

Job Description:
{job_text}

Return ONLY this JSON format with no additional text or explanation:
{
    "job_title": "exact job title from the posting",
    "company_name": "company name from the posting",
    "requirements": ["requirement 1", "requirement 2", "requirement 3", "requirement 4"],
    "description": "brief 2-3 sentence summary of the role and responsibilities"
}

Requirements:
- Extract the exact job title as posted
- Find the actual company name
- Focus on technical requirements and qualifications
- Provide a concise role summary
- {json_only}"#;
