//! Writing and editing diaries.
//!
//! `DiaryForm` is the state behind the write/edit screen: the body being
//! typed, the chosen date, the status message and the "generating" flag that
//! blocks double submission. Submitting validates locally, sends the diary,
//! clears the form and then fetches the freshly generated image.

use crate::api::{DiaryClient, DiaryDraft};
use crate::constants::{PROMPT_CONTINUE_ENTRY, PROMPT_NEW_ENTRY};
use crate::date_codec::DiaryDate;
use crate::diary::{DiaryId, DiaryRecord, ScoreTier};
use crate::errors::{AppError, AppResult};
use crate::images::UserImage;
use tracing::{debug, info, warn};

const MESSAGE_EMPTY_BODY: &str = "日記を入力してください。";
const MESSAGE_SENDING: &str = "日記を送信中です...";
const MESSAGE_SAVED: &str = "日記が保存されました！画像を生成しています...";
const MESSAGE_FAILED: &str = "日記の送信に失敗しました。";

/// Whether the form creates a new diary or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(DiaryId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Inline status shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl FormMessage {
    fn success(text: &str) -> Self {
        FormMessage {
            kind: MessageKind::Success,
            text: text.to_string(),
        }
    }

    fn error(text: &str) -> Self {
        FormMessage {
            kind: MessageKind::Error,
            text: text.to_string(),
        }
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub diary: DiaryRecord,
    /// The user's latest image after the service regenerated it. `None` when
    /// the user has no image or fetching it failed.
    pub image: Option<UserImage>,
    pub score_tier: ScoreTier,
}

/// State of the write/edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct DiaryForm {
    mode: FormMode,
    date: DiaryDate,
    body: String,
    message: Option<FormMessage>,
    is_generating: bool,
}

impl DiaryForm {
    /// Empty form for a new diary on `date`.
    pub fn new(date: DiaryDate) -> Self {
        DiaryForm {
            mode: FormMode::Create,
            date,
            body: String::new(),
            message: None,
            is_generating: false,
        }
    }

    /// Form prefilled from an existing diary.
    pub fn editing(record: &DiaryRecord) -> AppResult<Self> {
        Ok(DiaryForm {
            mode: FormMode::Edit(DiaryId::new(record.id)),
            date: DiaryDate::from_int(record.date)?,
            body: record.body.clone(),
            message: None,
            is_generating: false,
        })
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn date(&self) -> DiaryDate {
        self.date
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn message(&self) -> Option<&FormMessage> {
        self.message.as_ref()
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn set_date(&mut self, date: DiaryDate) {
        self.date = date;
    }

    /// Builds the request body, rejecting a blank diary.
    pub fn validate(&self) -> AppResult<DiaryDraft> {
        if self.body.trim().is_empty() {
            return Err(AppError::Validation("Diary body is empty".to_string()));
        }
        Ok(DiaryDraft {
            body: self.body.clone(),
            date: self.date,
        })
    }

    /// Sends the diary and refreshes the generated image.
    ///
    /// Nothing is sent when the body is blank or a submission is already in
    /// flight. On success the body is cleared; a failure to fetch the image
    /// afterwards is logged and does not fail the submission.
    pub async fn submit(&mut self, client: &DiaryClient, user_id: i64) -> AppResult<SubmitOutcome> {
        if self.is_generating {
            return Err(AppError::Validation(
                "A submission is already in progress".to_string(),
            ));
        }

        let draft = match self.validate() {
            Ok(draft) => draft,
            Err(e) => {
                self.message = Some(FormMessage::error(MESSAGE_EMPTY_BODY));
                return Err(e);
            }
        };

        self.is_generating = true;
        self.message = Some(FormMessage::success(MESSAGE_SENDING));

        let sent = match self.mode {
            FormMode::Create => client.create_diary(&draft).await,
            FormMode::Edit(id) => client.update_diary(id, &draft).await,
        };
        let diary = match sent {
            Ok(diary) => diary,
            Err(e) => {
                self.message = Some(FormMessage::error(MESSAGE_FAILED));
                self.is_generating = false;
                return Err(e);
            }
        };

        info!("Saved diary {} for {}", diary.id, draft.date);
        self.message = Some(FormMessage::success(MESSAGE_SAVED));
        self.body.clear();

        let image = match client.latest_image(user_id).await {
            Ok(image) => image,
            Err(e) => {
                warn!("Failed to fetch generated image: {}", e);
                None
            }
        };
        self.is_generating = false;

        debug!("Latest image present: {}", image.is_some());
        Ok(SubmitOutcome {
            score_tier: ScoreTier::from_score(diary.score),
            diary,
            image,
        })
    }
}

/// What the write screen offers for a given date.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryPrompt {
    /// The date already has this diary; writing continues it.
    Continue(DiaryRecord),
    /// Nothing written on the date yet.
    New,
}

impl EntryPrompt {
    pub fn text(&self) -> &'static str {
        match self {
            EntryPrompt::Continue(_) => PROMPT_CONTINUE_ENTRY,
            EntryPrompt::New => PROMPT_NEW_ENTRY,
        }
    }
}

/// Looks `date` up; a missing diary is a normal `EntryPrompt::New`.
pub async fn entry_prompt(client: &DiaryClient, date: DiaryDate) -> AppResult<EntryPrompt> {
    Ok(match client.get_diary_by_date(date).await? {
        Some(record) => EntryPrompt::Continue(record),
        None => EntryPrompt::New,
    })
}

/// Opens the form for the diary on `date`, or `None` if there is none.
pub async fn open_for_edit(client: &DiaryClient, date: DiaryDate) -> AppResult<Option<DiaryForm>> {
    match entry_prompt(client, date).await? {
        EntryPrompt::Continue(record) => DiaryForm::editing(&record).map(Some),
        EntryPrompt::New => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn date(value: u32) -> DiaryDate {
        DiaryDate::from_int(value).unwrap()
    }

    #[test]
    fn test_validate_rejects_blank_body() {
        let mut form = DiaryForm::new(date(20241215));
        assert!(matches!(form.validate(), Err(AppError::Validation(_))));

        form.set_body("  \n\t ");
        assert!(matches!(form.validate(), Err(AppError::Validation(_))));

        form.set_body("雨だった");
        let draft = form.validate().unwrap();
        assert_eq!(draft.date.to_int(), 20241215);
        assert_eq!(draft.body, "雨だった");
    }

    #[test]
    fn test_editing_prefills_from_record() {
        let record = DiaryRecord {
            id: 12,
            user_id: 1,
            body: "old text".to_string(),
            score: Some(80),
            created_at: None,
            updated_at: None,
            is_deleted: false,
            date: 20241201,
        };
        let form = DiaryForm::editing(&record).unwrap();
        assert_eq!(form.mode(), FormMode::Edit(DiaryId::new(12)));
        assert_eq!(form.body(), "old text");
        assert_eq!(form.date(), date(20241201));
    }

    #[tokio::test]
    async fn test_blank_submit_sets_inline_error_without_network() {
        // Port 9 (discard) is never contacted: validation fails first.
        let client = DiaryClient::new(&Config::with_base_url("http://127.0.0.1:9")).unwrap();
        let mut form = DiaryForm::new(date(20241215));

        let result = form.submit(&client, 1).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        let message = form.message().unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert_eq!(message.text, MESSAGE_EMPTY_BODY);
        assert!(!form.is_generating());
    }

    #[test]
    fn test_prompt_text() {
        assert_eq!(EntryPrompt::New.text(), PROMPT_NEW_ENTRY);
    }
}
