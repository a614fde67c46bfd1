// Resume extraction LLM prompt templates.

use serde_json::{json, Value};

pub const RESUME_PARSE_SYSTEM: &str = "You are a resume-parsing assistant.";

pub const RESUME_PARSE_PROMPT: &str =
    "Extract the name, email, skills, and years of experience from this resume:\n\n{resume_text}";

pub const EXTRACT_FUNCTION_NAME: &str = "extract_details";

pub const EXTRACT_FUNCTION_DESCRIPTION: &str = "Extract applicant details from a resume";

/// JSON schema of the `extract_details` function arguments.
pub fn extract_function_parameters() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": {"type": "string"},
            "email": {"type": "string"},
            "skills": {"type": "array", "items": {"type": "string"}},
            "experience_years": {"type": "number"}
        },
        "required": ["name", "email", "skills", "experience_years"]
    })
}
