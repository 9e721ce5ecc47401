//! Load the diary collection and its images in one go.

use crate::api::DiaryClient;
use crate::date_codec::DiaryDate;
use crate::diary::{distinct_dates, normalize, DiaryId, DiaryView};
use crate::errors::{AppError, AppResult};
use crate::images::{ImageIndex, ImageRecord};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Snapshot of everything the list, calendar and gallery views need.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Journal {
    /// Live diaries in service order.
    pub diaries: Vec<DiaryView>,
    pub images: ImageIndex,
}

impl Journal {
    /// Dates that have an entry, for calendar highlighting.
    pub fn diary_dates(&self) -> Vec<DiaryDate> {
        distinct_dates(&self.diaries)
    }

    pub fn image_for(&self, id: &DiaryId) -> Option<&ImageRecord> {
        self.images.lookup(id)
    }
}

/// Fetches diaries and images concurrently and normalizes both.
///
/// # Errors
///
/// Fails with the first error of either request, or with `AppError::Date`
/// when a live diary carries a malformed date.
pub async fn load_journal(client: &DiaryClient) -> AppResult<Journal> {
    info!("Loading diaries and images");

    let (records, images) =
        futures::try_join!(client.list_diaries(), client.list_all_images())?;

    let diaries = normalize(records)?;
    let images = ImageIndex::build(images);

    debug!(
        "Journal loaded: {} diaries, {} with images",
        diaries.len(),
        images.len()
    );
    Ok(Journal { diaries, images })
}

/// Like [`load_journal`], but gives up as soon as `token` is cancelled.
///
/// A cancelled load never yields a snapshot, so a view that went away
/// cannot be updated with late data.
pub async fn load_journal_cancellable(
    client: &DiaryClient,
    token: &CancellationToken,
) -> AppResult<Journal> {
    tokio::select! {
        biased;
        _ = token.cancelled() => {
            debug!("Journal load cancelled");
            Err(AppError::Cancelled)
        }
        result = load_journal(client) => result,
    }
}
