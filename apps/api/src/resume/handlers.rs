//! Axum route handlers for the resume extraction API.

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{json_body, AppError};
use crate::resume::extractor::{extract_batch, ApplicantDetails, ApplicantExtractor};
use crate::state::AppState;

/// Number of resumes processed by a batch request that names no limit.
pub const DEFAULT_BATCH_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ExtractBatchRequest {
    pub resumes: Vec<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ExtractBatchResponse {
    pub applicants: Vec<ApplicantDetails>,
}

fn extractor(state: &AppState) -> Result<Arc<dyn ApplicantExtractor>, AppError> {
    state
        .extractor
        .clone()
        .ok_or_else(|| AppError::Unavailable("OPENAI_API_KEY is not configured".to_string()))
}

/// POST /api/v1/resumes/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    body: Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ApplicantDetails>, AppError> {
    let request = json_body(body)?;
    if request.resume_text.trim().is_empty() {
        return Err(AppError::BadRequest(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let extractor = extractor(&state)?;
    let details = extractor.extract(&request.resume_text).await?;
    Ok(Json(details))
}

/// POST /api/v1/resumes/extract/batch
///
/// Extracts the first `limit` resumes (default 5). Blank entries inside the
/// window are rejected before any upstream call.
pub async fn handle_extract_batch(
    State(state): State<AppState>,
    body: Result<Json<ExtractBatchRequest>, JsonRejection>,
) -> Result<Json<ExtractBatchResponse>, AppError> {
    let request = json_body(body)?;
    let limit = request.limit.unwrap_or(DEFAULT_BATCH_LIMIT);
    if let Some(index) = request
        .resumes
        .iter()
        .take(limit)
        .position(|r| r.trim().is_empty())
    {
        return Err(AppError::BadRequest(format!(
            "resumes[{index}] cannot be empty"
        )));
    }

    let extractor = extractor(&state)?;
    let applicants = extract_batch(extractor.as_ref(), &request.resumes, limit).await?;
    info!("Extracted {} applicant record(s)", applicants.len());

    Ok(Json(ExtractBatchResponse { applicants }))
}
