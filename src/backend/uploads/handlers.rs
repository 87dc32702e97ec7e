//! Image Upload Handler
//!
//! Accepts a single multipart field named `file`, stores it under the
//! configured upload directory with a random name and returns its public URL.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::extract::Json;
use crate::backend::middleware::AuthUser;
use crate::backend::server::ServerConfig;

/// File extensions accepted as images
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// URL prefix under which stored files are served
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
    pub filename: String,
    pub size: usize,
}

/// Lowercased extension of an uploaded file name, if it is an allowed image type
pub fn image_extension(file_name: &str) -> Option<String> {
    let extension = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    ALLOWED_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

fn invalid_upload(err: MultipartError) -> BackendError {
    tracing::warn!("Rejected upload: {}", err.body_text());
    BackendError::bad_request(format!("Invalid upload: {}", err.body_text()))
}

pub async fn upload_file(
    State(config): State<Arc<ServerConfig>>,
    AuthUser(auth): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), BackendError> {
    let mut multipart = multipart?;
    while let Some(field) = multipart.next_field().await.map_err(invalid_upload)? {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let extension = image_extension(&original_name).ok_or_else(|| {
            BackendError::bad_request("Only image files (jpg, jpeg, png, gif, webp) are allowed")
        })?;

        let data = field.bytes().await.map_err(invalid_upload)?;
        if data.is_empty() {
            return Err(BackendError::bad_request("Uploaded file is empty"));
        }
        if data.len() > config.max_upload_bytes {
            return Err(BackendError::bad_request(format!(
                "File is too large (max {} bytes)",
                config.max_upload_bytes
            )));
        }

        let filename = format!("{}.{}", Uuid::new_v4(), extension);
        tokio::fs::write(config.upload_dir.join(&filename), &data).await?;
        tracing::info!("User {} uploaded {} ({} bytes)", auth.user_id, filename, data.len());

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                url: format!("{UPLOADS_URL_PREFIX}/{filename}"),
                filename,
                size: data.len(),
            }),
        ));
    }

    Err(BackendError::bad_request("No file uploaded"))
}
