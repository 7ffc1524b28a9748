// LLM prompt template for the cover letter generator.
// Replace every `{placeholder}` before sending.

/// Cover letter prompt. Placeholders: `{job_title}`, `{company_name}`,
/// `{requirements}`, `{skills}`, `{experience}`, `{education}`.
pub const COVER_LETTER_PROMPT: &str = r#"Write a professional, compelling cover letter for this job application. Use a formal business letter format.

**Job Details:**
- Position: {job_title}
- Company: {company_name}
- Key Requirements: {requirements}

**Candidate Profile:**
- Top Skills: {skills}
- Experience: {experience}
- Education: {education}

**Instructions:**
Write a professional cover letter with exactly 4 paragraphs:

1. **Opening**: Express interest in the specific position and company
2. **Experience**: Highlight relevant experience and how it aligns with job requirements
3. **Skills & Value**: Emphasize technical skills and what you can contribute
4. **Closing**: Professional closing with call to action

**Requirements:**
- Professional, confident tone
- Specific to the job and company
- 250-350 words total
- No generic phrases
- Start with "Dear Hiring Manager,"
- End with professional closing

Write the complete cover letter now:"#;
