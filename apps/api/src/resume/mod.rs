// Resume extraction: free-form resume text in, structured applicant record out.
// All LLM calls go through llm_client.

pub mod extractor;
pub mod handlers;
pub mod prompts;
