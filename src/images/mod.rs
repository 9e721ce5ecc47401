//! Association between diaries and their generated images.
//!
//! The service returns images as a flat list; views need "the image for this
//! diary". `ImageIndex` is that lookup, rebuilt on every load.

use crate::diary::DiaryId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// A generated image as listed by `GET /api/v1/all_images`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: i64,
    pub diary_id: DiaryId,
    pub uri: String,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// The latest image of a user, as returned by `GET /api/v1/images`.
///
/// Older deployments named the URI field `image_uri`; both spellings are
/// accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserImage {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(alias = "image_uri")]
    pub uri: String,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Active images keyed by the diary they belong to.
///
/// Conflict policy: when several active images name the same diary, the one
/// seen last in the input wins. The service lists the newest image per diary
/// last, so this keeps the most recent one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageIndex {
    by_diary: HashMap<DiaryId, ImageRecord>,
}

impl ImageIndex {
    /// Builds the index, skipping soft-deleted images.
    ///
    /// # Examples
    ///
    /// ```
    /// use mirai::diary::DiaryId;
    /// use mirai::images::{ImageIndex, ImageRecord};
    ///
    /// let image = |id, uri: &str| ImageRecord {
    ///     id,
    ///     diary_id: DiaryId::new(5),
    ///     uri: uri.to_string(),
    ///     is_deleted: false,
    ///     created_at: None,
    ///     updated_at: None,
    /// };
    ///
    /// let index = ImageIndex::build(vec![image(1, "old.png"), image(2, "new.png")]);
    /// assert_eq!(index.lookup(&DiaryId::new(5)).unwrap().uri, "new.png");
    /// ```
    pub fn build(images: Vec<ImageRecord>) -> Self {
        let mut by_diary = HashMap::new();
        let mut skipped = 0usize;
        for image in images {
            if image.is_deleted {
                skipped += 1;
                continue;
            }
            by_diary.insert(image.diary_id, image);
        }
        debug!(
            "Indexed images for {} diaries ({} deleted images skipped)",
            by_diary.len(),
            skipped
        );
        ImageIndex { by_diary }
    }

    /// The image associated with `diary_id`, if any.
    pub fn lookup(&self, diary_id: &DiaryId) -> Option<&ImageRecord> {
        self.by_diary.get(diary_id)
    }

    /// Number of diaries with an image.
    pub fn len(&self) -> usize {
        self.by_diary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_diary.is_empty()
    }
}
