//! Diary records and their display model.
//!
//! Raw records come from the diary service as `DiaryRecord`. They are turned
//! into `DiaryView`s exactly once per fetch: soft-deleted records are
//! dropped, the title is derived from the body, and the date is validated.
//!
//! The `query` submodule holds the pure helpers that list and calendar views
//! run over a collection of views.

pub mod query;

use crate::constants::{
    SCORE_HIGH_THRESHOLD, SCORE_MID_THRESHOLD, TITLE_ELLIPSIS, TITLE_MAX_CHARS,
    UNTITLED_PLACEHOLDER,
};
use crate::date_codec::DiaryDate;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub use query::{
    distinct_dates, filter_by_date, find_by_id, sort_by_date, DiaryFilter, SortOrder,
};

/// Identifier of a diary entry.
///
/// The service uses integers; list keys and CLI arguments use strings. All
/// coercion between the two goes through this type, so a lookup can never
/// silently miss because one side held `"5"` and the other `5`.
///
/// # Examples
///
/// ```
/// use mirai::diary::DiaryId;
///
/// let id: DiaryId = " 42 ".parse().unwrap();
/// assert_eq!(id, DiaryId::new(42));
/// assert_eq!(id.to_string(), "42");
/// assert!("forty-two".parse::<DiaryId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiaryId(i64);

impl DiaryId {
    /// Wraps a numeric id as returned by the service.
    pub fn new(id: i64) -> Self {
        DiaryId(id)
    }

    /// The numeric form used in request paths.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for DiaryId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(DiaryId)
            .map_err(|_| AppError::Validation(format!("Invalid diary id '{}'", s)))
    }
}

impl fmt::Display for DiaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A diary entry exactly as the service returns it.
///
/// `score` is absent from create/update responses, and timestamps may be
/// null, so those fields default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryRecord {
    pub id: i64,
    pub user_id: i64,
    pub body: String,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
    /// `YYYYMMDD`, validated during normalization.
    pub date: u32,
}

/// A diary entry prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub struct DiaryView {
    pub id: DiaryId,
    pub date: DiaryDate,
    /// Derived from the first line of the body, see [`derive_title`].
    pub title: String,
    pub content: String,
    pub score: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl DiaryView {
    /// Converts one live record. Callers filter soft-deleted records first.
    fn from_record(record: DiaryRecord) -> AppResult<Self> {
        let date = DiaryDate::from_int(record.date)?;
        Ok(DiaryView {
            id: DiaryId::new(record.id),
            date,
            title: derive_title(&record.body),
            content: record.body,
            score: record.score,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Band a diary score falls into; decides the frame around the future-self image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    /// Not scored yet.
    Pending,
    Low,
    Mid,
    High,
}

impl ScoreTier {
    /// Classifies a score; thresholds are inclusive lower bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use mirai::diary::ScoreTier;
    ///
    /// assert_eq!(ScoreTier::from_score(Some(70)), ScoreTier::High);
    /// assert_eq!(ScoreTier::from_score(Some(40)), ScoreTier::Mid);
    /// assert_eq!(ScoreTier::from_score(Some(39)), ScoreTier::Low);
    /// assert_eq!(ScoreTier::from_score(None), ScoreTier::Pending);
    /// ```
    pub fn from_score(score: Option<i64>) -> Self {
        match score {
            None => ScoreTier::Pending,
            Some(s) if s >= SCORE_HIGH_THRESHOLD => ScoreTier::High,
            Some(s) if s >= SCORE_MID_THRESHOLD => ScoreTier::Mid,
            Some(_) => ScoreTier::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreTier::Pending => "pending",
            ScoreTier::Low => "low",
            ScoreTier::Mid => "mid",
            ScoreTier::High => "high",
        }
    }
}

/// Maps raw records to views, preserving order and dropping soft-deleted ones.
///
/// # Errors
///
/// Returns `AppError::Date` if a live record carries a date that is not a
/// valid `YYYYMMDD` calendar day.
pub fn normalize(records: Vec<DiaryRecord>) -> AppResult<Vec<DiaryView>> {
    let total = records.len();
    let views = records
        .into_iter()
        .filter(|record| !record.is_deleted)
        .map(DiaryView::from_record)
        .collect::<AppResult<Vec<_>>>()?;
    debug!(
        "Normalized {} diary records ({} soft-deleted)",
        views.len(),
        total - views.len()
    );
    Ok(views)
}

/// Derives a display title from a diary body.
///
/// Takes the text up to the first line break. Longer than
/// [`TITLE_MAX_CHARS`] characters gets truncated with an ellipsis; a blank
/// line yields the untitled placeholder.
///
/// # Examples
///
/// ```
/// use mirai::diary::derive_title;
///
/// assert_eq!(derive_title("Hello\nWorld"), "Hello");
/// assert_eq!(derive_title(""), "無題の日記");
/// assert_eq!(derive_title(&"a".repeat(60)), format!("{}...", "a".repeat(50)));
/// ```
pub fn derive_title(body: &str) -> String {
    let first_line = body.split('\n').next().unwrap_or_default();
    let first_line = first_line.strip_suffix('\r').unwrap_or(first_line);

    if first_line.trim().is_empty() {
        return UNTITLED_PLACEHOLDER.to_string();
    }

    if first_line.chars().count() > TITLE_MAX_CHARS {
        let truncated: String = first_line.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}{}", truncated, TITLE_ELLIPSIS)
    } else {
        first_line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, date: u32, body: &str, is_deleted: bool) -> DiaryRecord {
        DiaryRecord {
            id,
            user_id: 1,
            body: body.to_string(),
            score: Some(50),
            created_at: Some("2024-12-15T09:00:00".to_string()),
            updated_at: Some("2024-12-15T09:30:00".to_string()),
            is_deleted,
            date,
        }
    }

    #[test]
    fn test_title_from_first_line() {
        assert_eq!(derive_title("Hello\nWorld"), "Hello");
        assert_eq!(derive_title("Hello\r\nWorld"), "Hello");
        assert_eq!(derive_title("single line"), "single line");
    }

    #[test]
    fn test_title_truncation_counts_characters() {
        let body = "a".repeat(60);
        assert_eq!(derive_title(&body), format!("{}...", "a".repeat(50)));

        let exactly_fifty = "b".repeat(50);
        assert_eq!(derive_title(&exactly_fifty), exactly_fifty);

        let japanese = "あ".repeat(51);
        assert_eq!(derive_title(&japanese), format!("{}...", "あ".repeat(50)));
    }

    #[test]
    fn test_title_placeholder() {
        assert_eq!(derive_title(""), UNTITLED_PLACEHOLDER);
        assert_eq!(derive_title("\nsecond line"), UNTITLED_PLACEHOLDER);
        assert_eq!(derive_title("   \t"), UNTITLED_PLACEHOLDER);
    }

    #[test]
    fn test_normalize_drops_soft_deleted() {
        let records = vec![
            record(1, 20241201, "one", false),
            record(2, 20241202, "two", true),
            record(3, 20241203, "three", false),
            record(4, 20241204, "four", true),
            record(5, 20241205, "five", false),
        ];

        let views = normalize(records).unwrap();

        assert_eq!(views.len(), 3);
        let ids: Vec<String> = views.iter().map(|v| v.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "3", "5"]);
    }

    #[test]
    fn test_normalize_passes_fields_through() {
        let views = normalize(vec![record(7, 20241215, "Title\nBody text", false)]).unwrap();
        let view = &views[0];

        assert_eq!(view.id, DiaryId::new(7));
        assert_eq!(view.date.to_int(), 20241215);
        assert_eq!(view.title, "Title");
        assert_eq!(view.content, "Title\nBody text");
        assert_eq!(view.score, Some(50));
        assert_eq!(view.created_at.as_deref(), Some("2024-12-15T09:00:00"));
        assert_eq!(view.updated_at.as_deref(), Some("2024-12-15T09:30:00"));
    }

    #[test]
    fn test_normalize_rejects_malformed_dates() {
        let result = normalize(vec![record(1, 2024121, "x", false)]);
        assert!(matches!(result, Err(AppError::Date(_))));
    }

    #[test]
    fn test_normalize_ignores_malformed_dates_on_deleted_records() {
        let views = normalize(vec![record(1, 0, "gone", true)]).unwrap();
        assert!(views.is_empty());
    }

    #[test]
    fn test_record_deserializes_without_score() {
        let json = r#"{
            "id": 3,
            "user_id": 1,
            "body": "posted",
            "created_at": null,
            "updated_at": null,
            "is_deleted": false,
            "date": 20241215
        }"#;

        let record: DiaryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.score, None);
        assert_eq!(record.created_at, None);
        assert_eq!(record.date, 20241215);
    }

    #[test]
    fn test_diary_id_parse() {
        assert_eq!("5".parse::<DiaryId>().unwrap(), DiaryId::new(5));
        assert!(matches!(
            "".parse::<DiaryId>(),
            Err(AppError::Validation(_))
        ));
    }
}
