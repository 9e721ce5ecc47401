//! Profile photo upload.

use crate::api::{DiaryClient, ProfileUpload};
use crate::errors::{AppError, AppResult};
use std::path::Path;
use tracing::{debug, info};

/// What the user filled into the upload form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadRequest {
    /// Path to the photo; `~` and `$VARS` are expanded.
    pub file: String,
    pub name: String,
    pub email: String,
}

impl UploadRequest {
    /// Checks that every field is filled in.
    pub fn validate(&self) -> AppResult<()> {
        let missing: Vec<&str> = [
            ("file", &self.file),
            ("name", &self.name),
            ("email", &self.email),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| *field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Missing upload fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Reads the photo from disk and uploads it with the owner's details.
///
/// # Errors
///
/// `AppError::Validation` if a field is blank (nothing is read or sent),
/// `AppError::Config` if the path cannot be expanded, `AppError::Io` if the
/// file cannot be read, `AppError::Api` if the upload is rejected.
pub async fn upload_profile_photo(client: &DiaryClient, request: &UploadRequest) -> AppResult<()> {
    request.validate()?;

    let expanded = shellexpand::full(request.file.trim())
        .map_err(|e| AppError::Config(format!("Failed to expand path '{}': {}", request.file, e)))?;
    let path = Path::new(&*expanded);
    debug!("Reading upload from {:?}", path);

    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::Validation(format!("'{}' is not a file path", request.file)))?;

    client
        .upload_profile_image(ProfileUpload {
            file_name: file_name.clone(),
            bytes,
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
        })
        .await?;

    info!("Uploaded profile photo {}", file_name);
    Ok(())
}
