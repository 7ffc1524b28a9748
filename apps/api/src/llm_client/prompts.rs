// Cross-cutting prompt fragments shared by every extraction prompt.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Instruction appended to prompts whose answer must be a bare JSON object.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Return only valid JSON. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
