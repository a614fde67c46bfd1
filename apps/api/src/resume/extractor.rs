//! Applicant extraction — pulls name, email, skills and experience out of free-form
//! resume text.
//!
//! `AppState` holds an `Arc<dyn ApplicantExtractor>` so tests can swap in a
//! fixed backend without touching the handlers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::{FunctionSpec, LlmClient};
use crate::resume::prompts::{
    extract_function_parameters, EXTRACT_FUNCTION_DESCRIPTION, EXTRACT_FUNCTION_NAME,
    RESUME_PARSE_PROMPT, RESUME_PARSE_SYSTEM,
};

/// Structured record extracted from one resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantDetails {
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
    pub experience_years: f64,
}

#[async_trait]
pub trait ApplicantExtractor: Send + Sync {
    async fn extract(&self, resume_text: &str) -> Result<ApplicantDetails, AppError>;
}

/// Extractor backed by a forced `extract_details` function call.
pub struct LlmApplicantExtractor {
    llm: LlmClient,
}

impl LlmApplicantExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ApplicantExtractor for LlmApplicantExtractor {
    async fn extract(&self, resume_text: &str) -> Result<ApplicantDetails, AppError> {
        let prompt = build_prompt(resume_text);
        let function = FunctionSpec {
            name: EXTRACT_FUNCTION_NAME,
            description: EXTRACT_FUNCTION_DESCRIPTION,
            parameters: extract_function_parameters(),
        };

        let details = self
            .llm
            .call_structured::<ApplicantDetails>(RESUME_PARSE_SYSTEM, &prompt, &function)
            .await?;
        Ok(details)
    }
}

fn build_prompt(resume_text: &str) -> String {
    RESUME_PARSE_PROMPT.replace("{resume_text}", resume_text)
}

/// Runs `extractor` over the first `limit` resumes, in order.
///
/// Stops at the first failure; no partial batch is returned.
pub async fn extract_batch(
    extractor: &dyn ApplicantExtractor,
    resumes: &[String],
    limit: usize,
) -> Result<Vec<ApplicantDetails>, AppError> {
    let mut applicants = Vec::with_capacity(limit.min(resumes.len()));
    for resume in resumes.iter().take(limit) {
        applicants.push(extractor.extract(resume).await?);
    }
    Ok(applicants)
}
