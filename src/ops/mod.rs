//! High-level operations against the diary service.
//!
//! These orchestrate the API client and the pure view modules: loading the
//! whole journal in parallel, writing or editing a diary and uploading a
//! profile photo.

pub mod load;
pub mod submit;
pub mod upload;

// Re-export commonly used functions
pub use load::{load_journal, load_journal_cancellable, Journal};
pub use submit::{
    entry_prompt, open_for_edit, DiaryForm, EntryPrompt, FormMessage, FormMode, MessageKind,
    SubmitOutcome,
};
pub use upload::{upload_profile_photo, UploadRequest};
