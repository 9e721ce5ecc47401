/*!
# mirai

mirai is a client for a diary service that scores each entry and generates an
image of the writer's "future self" from it. It lists and searches diaries,
writes and edits them, lays them out on a month calendar and walks through
the generated images with a slider.

## Architecture

- `api`: async HTTP client for the diary service
- `cli`: command-line parsing, command dispatch and text views
- `config`: configuration loading and validation
- `constants`: shared names, paths and thresholds
- `date_codec`: conversion between `YYYYMMDD` integers, ISO strings and the Japanese long form
- `diary`: record normalization and the query helpers over views
- `images`: diary-to-image association
- `calendar`: month grid computation and selection
- `gallery`: slider positioning
- `errors`: error handling infrastructure
- `ops`: high-level operations (parallel load, submit, upload)

## Usage Example

```rust,no_run
use mirai::{Config, DiaryClient};
use mirai::calendar::CalendarView;
use mirai::date_codec::DiaryDate;
use mirai::ops::load_journal;

# async fn run() -> mirai::AppResult<()> {
let config = Config::load()?;
let client = DiaryClient::new(&config)?;

let journal = load_journal(&client).await?;
let view = CalendarView::new(DiaryDate::today());
let cells = view.cells(&journal.diary_dates());
println!("{} cells", cells.len());
# Ok(())
# }
```
*/

/// HTTP client for the diary service
pub mod api;
/// Month grid for the calendar view
pub mod calendar;
/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Shared constants
pub mod constants;
/// Diary date conversions
pub mod date_codec;
/// Diary records, views and queries
pub mod diary;
/// Error types and utilities for error handling
pub mod errors;
/// Gallery slider positioning
pub mod gallery;
/// Diary image association
pub mod images;
/// High-level operations
pub mod ops;

// Re-export important types for convenience
pub use api::DiaryClient;
pub use cli::CliArgs;
pub use config::Config;
pub use date_codec::DiaryDate;
pub use diary::{DiaryId, DiaryView};
pub use errors::{AppError, AppResult};
