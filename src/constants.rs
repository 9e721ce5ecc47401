//! Constants used throughout the application.
//!
//! This module contains all constants used in the mirai client, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "mirai";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A diary client that shows your future self";

// Logging Defaults
/// Default log level; `--verbose` raises it to debug.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Configuration Keys & Environment Variables
/// Environment variable for the diary service base URL.
pub const ENV_VAR_API_BASE_URL: &str = "MIRAI_API_BASE_URL";
/// Environment variable for the user whose images are fetched.
pub const ENV_VAR_USER_ID: &str = "MIRAI_USER_ID";
/// Environment variable for the per-request timeout in seconds.
pub const ENV_VAR_TIMEOUT_SECS: &str = "MIRAI_TIMEOUT_SECS";
/// Default base URL of the diary service.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
/// Default user id (the service is single-user for now).
pub const DEFAULT_USER_ID: i64 = 1;
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// REST Endpoints
/// Diary collection path.
pub const DIARIES_PATH: &str = "/api/v1/diaries";
/// Path for looking a diary up by its YYYYMMDD date.
pub const DIARIES_BY_DATE_PATH: &str = "/api/v1/diaries/date";
/// Path listing the latest image of every diary.
pub const ALL_IMAGES_PATH: &str = "/api/v1/all_images";
/// Path returning the latest image of a user.
pub const IMAGES_PATH: &str = "/api/v1/images";
/// Profile photo upload path.
pub const IMAGE_UPLOAD_PATH: &str = "/image/upload";

// Diary Presentation
/// Maximum number of characters kept from the first line when deriving a title.
pub const TITLE_MAX_CHARS: usize = 50;
/// Marker appended to a truncated title.
pub const TITLE_ELLIPSIS: &str = "...";
/// Title used when the first line of a diary body is empty.
pub const UNTITLED_PLACEHOLDER: &str = "無題の日記";
/// Prompt shown when the selected date already has an entry.
pub const PROMPT_CONTINUE_ENTRY: &str = "日記の続きを書く";
/// Prompt shown when the selected date has no entry yet.
pub const PROMPT_NEW_ENTRY: &str = "新しい日記を書く";
/// Scores at or above this value get the brightest frame.
pub const SCORE_HIGH_THRESHOLD: i64 = 70;
/// Scores at or above this value (and below the high one) get the middle frame.
pub const SCORE_MID_THRESHOLD: i64 = 40;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Japanese weekday names, Sunday first.
pub const WEEKDAY_NAMES_JA: [&str; 7] = [
    "日曜日", "月曜日", "火曜日", "水曜日", "木曜日", "金曜日", "土曜日",
];
/// Short weekday labels used in the calendar header, Sunday first.
pub const WEEKDAY_LABELS_JA: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];
/// Number of days in a calendar week row.
pub const DAYS_PER_WEEK: usize = 7;

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "mirai";
