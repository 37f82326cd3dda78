//! Submission client: one multipart upload to `POST /check`, one JSON answer.

use crate::config::AppConfig;
use crate::domain::{CheckResponse, SessionParams, SubmissionResult};
use crate::error::{MoleScanError, Result};
use crate::repositories::file_system;
use log::{error, info};
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use std::path::Path;

pub const PHOTO_FIELD: &str = "file";
pub const PHOTO_FILE_NAME: &str = "photo.jpg";
pub const PHOTO_MIME: &str = "image/jpeg";

#[derive(Debug, Clone)]
pub struct SubmissionClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SubmissionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.endpoint.clone())
    }

    /// Uploads the photo together with the questionnaire answers.
    ///
    /// A single attempt: no retry and no timeout beyond the transport's own.
    ///
    /// # Errors
    ///
    /// Returns `PhotoMissing` before any network I/O if the photo is gone,
    /// `UploadFailed` on a non-success status, `Network` on transport failure,
    /// `MalformedResponse` or `UnrecognizedClassification` on an unexpected body
    pub async fn submit(&self, photo: &Path, params: &SessionParams) -> Result<SubmissionResult> {
        if !file_system::file_exists(photo).await {
            return Err(MoleScanError::PhotoMissing(photo.display().to_string()));
        }

        let bytes = tokio::fs::read(photo).await?;
        let form = build_form(bytes, params)?;

        info!("Uploading {} to {}", photo.display(), self.endpoint);
        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Upload failed: {}", e);
                MoleScanError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Network response was not ok: {}", status);
            return Err(MoleScanError::UploadFailed {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: CheckResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Unexpected response body: {}", e);
            MoleScanError::MalformedResponse(e.to_string())
        })?;

        let result = SubmissionResult::try_from(parsed)?;
        info!("Received {} classification", result.classification);
        Ok(result)
    }
}

/// `file` part first, then `age` and `q1`..`q8` as text parts.
pub fn build_form(photo: Vec<u8>, params: &SessionParams) -> Result<Form> {
    let part = Part::bytes(photo)
        .file_name(PHOTO_FILE_NAME)
        .mime_str(PHOTO_MIME)?;

    Ok(params
        .form_fields()
        .into_iter()
        .fold(Form::new().part(PHOTO_FIELD, part), |form, (name, value)| {
            form.text(name, value)
        }))
}
