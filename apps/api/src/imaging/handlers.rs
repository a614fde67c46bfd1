use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::imaging::{OutputFormat, SourceImage};
use crate::state::AppState;

/// POST /remove-bg
///
/// Multipart form: `file` (required) and `output_format` (optional, default webp).
pub async fn handle_remove_bg(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut image: Option<SourceImage> = None;
    let mut output_format = OutputFormat::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                image = Some(SourceImage {
                    file_name,
                    content_type,
                    data,
                });
            }
            Some("output_format") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                output_format = value.parse().map_err(AppError::BadRequest)?;
            }
            _ => {}
        }
    }

    let image = image.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    if image.data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
    }

    let remover = state
        .bg_remover
        .clone()
        .ok_or_else(|| AppError::Unavailable("STABILITY_API_KEY is not configured".to_string()))?;

    let result = remover.remove_background(image, output_format).await?;

    Ok(([(header::CONTENT_TYPE, output_format.content_type())], result).into_response())
}
