//! Async client for the diary service REST API.
//!
//! Not-found answers on single-resource lookups are expected outcomes and come
//! back as `Ok(None)`. Every other non-success status becomes
//! `ApiError::Status`; transport failures become `ApiError::Transport`.

use crate::config::Config;
use crate::constants::{
    ALL_IMAGES_PATH, DIARIES_BY_DATE_PATH, DIARIES_PATH, IMAGES_PATH, IMAGE_UPLOAD_PATH,
};
use crate::date_codec::DiaryDate;
use crate::diary::{DiaryId, DiaryRecord};
use crate::errors::{ApiError, AppResult};
use crate::images::{ImageRecord, UserImage};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Request body for creating or updating a diary.
///
/// The date serializes as its `YYYYMMDD` integer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiaryDraft {
    pub body: String,
    pub date: DiaryDate,
}

/// A profile photo together with the owner's details.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub name: String,
    pub email: String,
}

/// Client for interacting with the diary service.
#[derive(Debug, Clone)]
pub struct DiaryClient {
    base_url: String,
    client: Client,
}

impl DiaryClient {
    /// Creates a client for the service configured in `config`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the underlying HTTP client cannot be
    /// built (e.g. the TLS backend fails to initialize).
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self {
            base_url: config.api_base_url.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetches every diary, soft-deleted ones included if the service sends them.
    pub async fn list_diaries(&self) -> AppResult<Vec<DiaryRecord>> {
        let url = self.url(DIARIES_PATH);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let records: Vec<DiaryRecord> = decode(response, "diary list").await?;
        debug!("Fetched {} diary records", records.len());
        Ok(records)
    }

    /// Fetches one diary by id; `None` when it does not exist.
    pub async fn get_diary(&self, id: DiaryId) -> AppResult<Option<DiaryRecord>> {
        let url = self.url(&format!("{}/{}", DIARIES_PATH, id));
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        decode_optional(response, "diary").await
    }

    /// Fetches the diary written on `date`; `None` when that day has no entry.
    pub async fn get_diary_by_date(&self, date: DiaryDate) -> AppResult<Option<DiaryRecord>> {
        let url = self.url(&format!("{}/{}", DIARIES_BY_DATE_PATH, date.to_int()));
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        decode_optional(response, "diary").await
    }

    /// Creates a diary. The service scores it and generates a new image.
    pub async fn create_diary(&self, draft: &DiaryDraft) -> AppResult<DiaryRecord> {
        let url = self.url(DIARIES_PATH);
        debug!("POST {} (date {})", url, draft.date);
        let response = self
            .client
            .post(&url)
            .json(draft)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        decode(response, "created diary").await
    }

    /// Replaces the body of diary `id`.
    pub async fn update_diary(&self, id: DiaryId, draft: &DiaryDraft) -> AppResult<DiaryRecord> {
        let url = self.url(&format!("{}/{}", DIARIES_PATH, id));
        debug!("PUT {} (date {})", url, draft.date);
        let response = self
            .client
            .put(&url)
            .json(draft)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        decode(response, "updated diary").await
    }

    /// Soft-deletes diary `id`.
    pub async fn delete_diary(&self, id: DiaryId) -> AppResult<()> {
        let url = self.url(&format!("{}/{}", DIARIES_PATH, id));
        debug!("DELETE {}", url);
        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        ensure_success(response).await?;
        Ok(())
    }

    /// Fetches the latest image of every diary.
    pub async fn list_all_images(&self) -> AppResult<Vec<ImageRecord>> {
        let url = self.url(ALL_IMAGES_PATH);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let images: Vec<ImageRecord> = decode(response, "image list").await?;
        debug!("Fetched {} image records", images.len());
        Ok(images)
    }

    /// Fetches the most recent image of `user_id`; `None` if the user has none.
    pub async fn latest_image(&self, user_id: i64) -> AppResult<Option<UserImage>> {
        let url = self.url(IMAGES_PATH);
        debug!("GET {}?user_id={}", url, user_id);
        let response = self
            .client
            .get(&url)
            .query(&[("user_id", user_id)])
            .send()
            .await
            .map_err(ApiError::Transport)?;
        decode_optional(response, "user image").await
    }

    /// Uploads a profile photo as `multipart/form-data` with fields
    /// `file`, `name` and `email`.
    pub async fn upload_profile_image(&self, upload: ProfileUpload) -> AppResult<()> {
        let url = self.url(IMAGE_UPLOAD_PATH);
        debug!("POST {} ({} bytes)", url, upload.bytes.len());
        let form = Form::new()
            .part("file", Part::bytes(upload.bytes).file_name(upload.file_name))
            .text("name", upload.name)
            .text("email", upload.email);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> AppResult<T> {
    let response = ensure_success(response).await?;
    let value = response
        .json::<T>()
        .await
        .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse {}: {}", what, e)))?;
    Ok(value)
}

async fn decode_optional<T: DeserializeOwned>(
    response: Response,
    what: &str,
) -> AppResult<Option<T>> {
    if response.status() == StatusCode::NOT_FOUND {
        debug!("No {} found", what);
        return Ok(None);
    }
    decode(response, what).await.map(Some)
}
