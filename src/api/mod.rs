//! HTTP access to the diary service.
//!
//! The service exposes diary CRUD, the per-diary image list, the latest image
//! of a user and a profile photo upload. This module wraps those endpoints in
//! a typed async client.
//!
//! # Module Structure
//!
//! - `client`: the `DiaryClient` and its request/response types
//!
//! # Example
//!
//! ```no_run
//! use mirai::api::DiaryClient;
//! use mirai::Config;
//!
//! # async fn run() -> mirai::AppResult<()> {
//! let client = DiaryClient::new(&Config::default())?;
//! let diaries = client.list_diaries().await?;
//! println!("{} diaries", diaries.len());
//! # Ok(())
//! # }
//! ```

pub mod client;

// Re-export commonly used types
pub use client::{DiaryClient, DiaryDraft, ProfileUpload};
