//! Background removal through the Stability AI image-edit API.
//!
//! One multipart request per image. A non-200 answer is returned as
//! `ImageApiError::Api` carrying the upstream's message; nothing is retried.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::errors::AppError;

pub mod handlers;

pub const STABILITY_REMOVE_BG_URL: &str =
    "https://api.stability.ai/v2beta/stable-image/edit/remove-background";

#[derive(Debug, Error)]
pub enum ImageApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Image encodings the upstream can return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Webp,
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Webp => "webp",
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Webp => "image/webp",
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "webp" => Ok(OutputFormat::Webp),
            "png" => Ok(OutputFormat::Png),
            "jpeg" => Ok(OutputFormat::Jpeg),
            other => Err(format!(
                "unsupported output_format '{other}', expected webp, png or jpeg"
            )),
        }
    }
}

/// An uploaded image as received from the client.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

#[async_trait]
pub trait BackgroundRemover: Send + Sync {
    async fn remove_background(
        &self,
        image: SourceImage,
        output_format: OutputFormat,
    ) -> Result<Bytes, AppError>;
}

#[derive(Clone)]
pub struct StabilityClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl StabilityClient {
    pub fn new(api_key: String) -> Result<Self, ImageApiError> {
        Self::with_api_url(api_key, STABILITY_REMOVE_BG_URL.to_string())
    }

    pub fn with_api_url(api_key: String, api_url: String) -> Result<Self, ImageApiError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            api_key,
            api_url,
        })
    }

    pub async fn call(
        &self,
        image: SourceImage,
        output_format: OutputFormat,
    ) -> Result<Bytes, ImageApiError> {
        let size = image.data.len();
        let part = Part::bytes(image.data.to_vec())
            .file_name(image.file_name)
            .mime_str(&image.content_type)?;
        let form = Form::new()
            .part("image", part)
            .text("output_format", output_format.as_str());

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .header("accept", "image/*")
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImageApiError::Api {
                status: status.as_u16(),
                message: upstream_message(&body),
            });
        }

        let data = response.bytes().await?;
        debug!(
            "Background removed: {} bytes in, {} bytes out ({})",
            size,
            data.len(),
            output_format
        );
        Ok(data)
    }
}

#[async_trait]
impl BackgroundRemover for StabilityClient {
    async fn remove_background(
        &self,
        image: SourceImage,
        output_format: OutputFormat,
    ) -> Result<Bytes, AppError> {
        Ok(self.call(image, output_format).await?)
    }
}

#[derive(Debug, Deserialize)]
struct StabilityError {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
}

/// Joins the `errors` array of a Stability error body, falling back to the raw text.
fn upstream_message(body: &str) -> String {
    match serde_json::from_str::<StabilityError>(body) {
        Ok(err) if !err.errors.is_empty() => err.errors.join("; "),
        Ok(StabilityError {
            name: Some(name), ..
        }) => name,
        _ => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("webp".parse::<OutputFormat>(), Ok(OutputFormat::Webp));
        assert_eq!("png".parse::<OutputFormat>(), Ok(OutputFormat::Png));
        assert_eq!("jpeg".parse::<OutputFormat>(), Ok(OutputFormat::Jpeg));
        assert!("gif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_rejects_aliases_and_other_case() {
        assert!("jpg".parse::<OutputFormat>().is_err());
        assert!("PNG".parse::<OutputFormat>().is_err());
        assert!("Webp".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_default_output_format_is_webp() {
        assert_eq!(OutputFormat::default().content_type(), "image/webp");
    }

    #[test]
    fn test_upstream_message_joins_errors() {
        let body = r#"{"id": "abc", "name": "bad_request", "errors": ["image: is required", "output_format: invalid"]}"#;
        assert_eq!(
            upstream_message(body),
            "image: is required; output_format: invalid"
        );
    }

    #[test]
    fn test_upstream_message_uses_name_without_errors() {
        assert_eq!(
            upstream_message(r#"{"name": "content_moderation"}"#),
            "content_moderation"
        );
    }

    #[test]
    fn test_upstream_message_raw_fallback() {
        assert_eq!(upstream_message("upstream timeout"), "upstream timeout");
    }
}
