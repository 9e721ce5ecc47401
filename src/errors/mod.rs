//! Error handling utilities for the mirai client.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use thiserror::Error;

/// Represents the ways a diary date can be malformed.
///
/// Dates travel as 8-digit `YYYYMMDD` integers and as `YYYY-MM-DD` strings.
/// Anything that does not describe a real calendar day is rejected instead of
/// being coerced into a nearby date.
///
/// # Examples
///
/// ```
/// use mirai::errors::DateError;
///
/// let error = DateError::WrongDigitCount { input: "2024121".to_string() };
/// assert!(format!("{}", error).contains("8-digit"));
///
/// let error = DateError::NotACalendarDay { year: 2023, month: 2, day: 29 };
/// assert!(format!("{}", error).contains("2023-02-29"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Integer form does not have exactly eight digits.
    #[error("Date must be an 8-digit number (YYYYMMDD), got '{input}'")]
    WrongDigitCount {
        /// The offending input, rendered as text
        input: String,
    },

    /// String form is neither `YYYY-MM-DD` nor `YYYYMMDD`.
    #[error("Invalid date format '{input}'. Expected YYYY-MM-DD or YYYYMMDD")]
    InvalidFormat {
        /// The offending input
        input: String,
    },

    /// Components are well formed but name a day that does not exist.
    #[error("{year:04}-{month:02}-{day:02} is not a calendar day")]
    NotACalendarDay {
        /// Year component
        year: i32,
        /// Month component
        month: u32,
        /// Day component
        day: u32,
    },

    /// A month key outside 1..=12, or an unparsable `YYYY-MM` string.
    #[error("Invalid month '{input}'. Expected YYYY-MM")]
    InvalidMonth {
        /// The offending input
        input: String,
    },
}

/// Represents failures talking to the diary service.
///
/// Not-found responses on lookups are not errors: the client maps them to
/// `Ok(None)` before this type is involved.
///
/// # Examples
///
/// ```
/// use mirai::errors::ApiError;
///
/// let error = ApiError::Status { status: 500, body: "boom".to_string() };
/// assert!(format!("{}", error).contains("500"));
/// ```
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, refused connection, timeout).
    #[error("Could not reach the diary service: {0}. Is the backend running?")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Diary service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        body: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("Invalid response from diary service: {0}")]
    InvalidResponse(String),
}

/// Represents all possible errors that can occur in the mirai client.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use mirai::errors::AppError;
///
/// let error = AppError::Config("Missing base URL".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing base URL");
/// ```
///
/// Converting from a date error:
/// ```
/// use mirai::errors::{AppError, DateError};
///
/// let date_error = DateError::InvalidFormat { input: "soon".to_string() };
/// let app_error: AppError = date_error.into();
///
/// match app_error {
///     AppError::Date(DateError::InvalidFormat { input }) => assert_eq!(input, "soon"),
///     _ => panic!("Expected Date variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or impossible dates.
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    /// Input rejected before any request was sent (e.g. an empty diary body).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Errors related to the diary service.
    ///
    /// This variant uses a dedicated ApiError type to distinguish transport
    /// failures, error statuses and undecodable payloads.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The operation was abandoned because its caller went away.
    #[error("Operation cancelled")]
    Cancelled,
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use mirai::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Validation("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
