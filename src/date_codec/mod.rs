//! Conversions between the diary service's date encodings.
//!
//! The backend stores and exchanges dates as 8-digit `YYYYMMDD` integers;
//! user-facing code works with `YYYY-MM-DD` strings and localized long
//! forms. All conversions here operate on the naive calendar date only, so
//! no timezone can shift a diary onto a neighbouring day.

use crate::constants::{DATE_FORMAT_ISO, WEEKDAY_NAMES_JA};
use crate::errors::DateError;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MIN_EIGHT_DIGIT: u32 = 10_000_000;
const MAX_EIGHT_DIGIT: u32 = 99_999_999;
const MIN_YEAR: i32 = 1000;
const MAX_YEAR: i32 = 9999;

/// A validated calendar day as used by diary entries.
///
/// Serializes to and from the `YYYYMMDD` integer the service speaks, and
/// displays as `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// use mirai::date_codec::DiaryDate;
///
/// let date = DiaryDate::from_int(20241215).unwrap();
/// assert_eq!(date.to_iso(), "2024-12-15");
/// assert_eq!(date.to_int(), 20241215);
///
/// let parsed: DiaryDate = "2024-12-15".parse().unwrap();
/// assert_eq!(parsed, date);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DiaryDate(NaiveDate);

impl DiaryDate {
    /// Builds a date from its components, rejecting days that do not exist
    /// and years that do not fit the four-digit encoding.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DateError::WrongDigitCount {
                input: format!("{}{:02}{:02}", year, month, day),
            });
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(DiaryDate)
            .ok_or(DateError::NotACalendarDay { year, month, day })
    }

    /// Decodes an 8-digit `YYYYMMDD` integer.
    ///
    /// # Errors
    ///
    /// - `DateError::WrongDigitCount` if the value is not exactly eight digits
    /// - `DateError::NotACalendarDay` if month or day are out of range
    pub fn from_int(value: u32) -> Result<Self, DateError> {
        if !(MIN_EIGHT_DIGIT..=MAX_EIGHT_DIGIT).contains(&value) {
            return Err(DateError::WrongDigitCount {
                input: value.to_string(),
            });
        }
        let (year, month, day) = split_digits(value);
        Self::from_ymd(year, month, day)
    }

    /// Encodes the date as its `YYYYMMDD` integer.
    pub fn to_int(self) -> u32 {
        // from_ymd keeps the year within four digits.
        self.0.year() as u32 * 10_000 + self.0.month() * 100 + self.0.day()
    }

    /// Renders the date as `YYYY-MM-DD`.
    pub fn to_iso(self) -> String {
        self.0.format(DATE_FORMAT_ISO).to_string()
    }

    /// Today's date on the local clock.
    pub fn today() -> Self {
        DiaryDate(Local::now().date_naive())
    }

    /// Year component.
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Month component (1-12).
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// Day-of-month component.
    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// The underlying naive date.
    pub fn naive(self) -> NaiveDate {
        self.0
    }

    /// Renders the Japanese long form, e.g. `2024年12月15日` or
    /// `2024年12月15日 日曜日` when `with_weekday` is set.
    pub fn format_localized(self, with_weekday: bool) -> String {
        let base = format!("{}年{}月{}日", self.year(), self.month(), self.day());
        if with_weekday {
            let weekday = WEEKDAY_NAMES_JA[self.0.weekday().num_days_from_sunday() as usize];
            format!("{} {}", base, weekday)
        } else {
            base
        }
    }

    /// Renders the zero-padded short form used on gallery labels, e.g.
    /// `2024年01月05日`.
    pub fn format_simple(self) -> String {
        format!("{}年{:02}月{:02}日", self.year(), self.month(), self.day())
    }
}

impl TryFrom<NaiveDate> for DiaryDate {
    type Error = DateError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        DiaryDate::from_ymd(date.year(), date.month(), date.day())
    }
}

impl TryFrom<u32> for DiaryDate {
    type Error = DateError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        DiaryDate::from_int(value)
    }
}

impl From<DiaryDate> for u32 {
    fn from(date: DiaryDate) -> Self {
        date.to_int()
    }
}

impl fmt::Display for DiaryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iso())
    }
}

impl FromStr for DiaryDate {
    type Err = DateError;

    /// Accepts `YYYY-MM-DD` or `YYYYMMDD`, digits only, fixed width.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DateError::InvalidFormat {
            input: s.to_string(),
        };
        let compact = match s.len() {
            10 => {
                let bytes = s.as_bytes();
                if bytes[4] != b'-' || bytes[7] != b'-' {
                    return Err(invalid());
                }
                format!("{}{}{}", &s[0..4], &s[5..7], &s[8..10])
            }
            8 => s.to_string(),
            _ => return Err(invalid()),
        };
        if !compact.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: u32 = compact.parse().map_err(|_| invalid())?;
        DiaryDate::from_int(value)
    }
}

fn split_digits(value: u32) -> (i32, u32, u32) {
    ((value / 10_000) as i32, (value / 100) % 100, value % 100)
}

/// Converts a `YYYYMMDD` integer to `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// use mirai::date_codec::int_to_iso;
///
/// assert_eq!(int_to_iso(20241215).unwrap(), "2024-12-15");
/// assert!(int_to_iso(2024125).is_err());
/// ```
pub fn int_to_iso(value: u32) -> Result<String, DateError> {
    DiaryDate::from_int(value).map(DiaryDate::to_iso)
}

/// Converts `YYYY-MM-DD` to a `YYYYMMDD` integer.
///
/// # Examples
///
/// ```
/// use mirai::date_codec::iso_to_int;
///
/// assert_eq!(iso_to_int("2024-12-15").unwrap(), 20241215);
/// assert!(iso_to_int("2024-02-30").is_err());
/// ```
pub fn iso_to_int(iso: &str) -> Result<u32, DateError> {
    iso.parse::<DiaryDate>().map(DiaryDate::to_int)
}

/// Formats a `YYYYMMDD` integer in the Japanese long form.
pub fn format_localized(value: u32, with_weekday: bool) -> Result<String, DateError> {
    DiaryDate::from_int(value).map(|d| d.format_localized(with_weekday))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_to_iso() {
        assert_eq!(int_to_iso(20241215).unwrap(), "2024-12-15");
        assert_eq!(int_to_iso(20240105).unwrap(), "2024-01-05");
    }

    #[test]
    fn test_iso_to_int() {
        assert_eq!(iso_to_int("2024-12-15").unwrap(), 20241215);
        assert_eq!(iso_to_int("20240105").unwrap(), 20240105);
    }

    #[test]
    fn test_round_trip_across_a_leap_year() {
        let mut day = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        while day <= end {
            let value = DiaryDate::try_from(day).unwrap().to_int();
            let iso = int_to_iso(value).unwrap();
            assert_eq!(iso_to_int(&iso).unwrap(), value);
            assert_eq!(int_to_iso(iso_to_int(&iso).unwrap()).unwrap(), iso);
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_wrong_digit_count_is_rejected() {
        assert!(matches!(
            DiaryDate::from_int(2024121),
            Err(DateError::WrongDigitCount { .. })
        ));
        assert!(matches!(
            DiaryDate::from_int(202412150),
            Err(DateError::WrongDigitCount { .. })
        ));
        assert!(matches!(
            DiaryDate::from_int(0),
            Err(DateError::WrongDigitCount { .. })
        ));
    }

    #[test]
    fn test_impossible_days_are_rejected() {
        assert_eq!(
            DiaryDate::from_int(20241315),
            Err(DateError::NotACalendarDay {
                year: 2024,
                month: 13,
                day: 15
            })
        );
        assert!(DiaryDate::from_int(20230229).is_err());
        assert!(DiaryDate::from_int(20240229).is_ok());
        assert!(DiaryDate::from_int(20240400).is_err());
    }

    #[test]
    fn test_years_outside_four_digits_are_rejected() {
        assert!(DiaryDate::from_ymd(999, 12, 31).is_err());
        assert!(DiaryDate::from_ymd(10000, 1, 1).is_err());
        assert!(DiaryDate::from_ymd(1000, 1, 1).is_ok());
    }

    #[test]
    fn test_from_str_rejects_loose_formats() {
        assert!("2024-1-5".parse::<DiaryDate>().is_err());
        assert!("2024/12/15".parse::<DiaryDate>().is_err());
        assert!("２０２４１２１５".parse::<DiaryDate>().is_err());
        assert!("+2024121".parse::<DiaryDate>().is_err());
        assert!("".parse::<DiaryDate>().is_err());
    }

    #[test]
    fn test_format_localized() {
        let date = DiaryDate::from_int(20241215).unwrap();
        assert_eq!(date.format_localized(false), "2024年12月15日");
        assert_eq!(date.format_localized(true), "2024年12月15日 日曜日");

        assert_eq!(format_localized(20240105, false).unwrap(), "2024年1月5日");
        assert_eq!(format_localized(20240105, true).unwrap(), "2024年1月5日 金曜日");
    }

    #[test]
    fn test_format_simple_is_zero_padded() {
        let date = DiaryDate::from_int(20240105).unwrap();
        assert_eq!(date.format_simple(), "2024年01月05日");
        assert_eq!(DiaryDate::from_int(20241215).unwrap().format_simple(), "2024年12月15日");
    }

    #[test]
    fn test_serde_uses_integer_form() {
        let date = DiaryDate::from_int(20241215).unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "20241215");

        let parsed: DiaryDate = serde_json::from_str("20240229").unwrap();
        assert_eq!(parsed.to_iso(), "2024-02-29");

        assert!(serde_json::from_str::<DiaryDate>("20241301").is_err());
    }

    #[test]
    fn test_ordering_matches_integer_ordering() {
        let a = DiaryDate::from_int(20231231).unwrap();
        let b = DiaryDate::from_int(20240101).unwrap();
        assert!(a < b);
        assert!(a.to_int() < b.to_int());
    }
}
