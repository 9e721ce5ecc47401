//! Month grid computation for the calendar view.
//!
//! A grid always starts on a Sunday and ends on a Saturday, so it contains
//! whole weeks: the days of the displayed month plus padding from the
//! neighbouring months. Cells outside the month are shown but cannot be
//! selected.

use crate::constants::DAYS_PER_WEEK;
use crate::date_codec::DiaryDate;
use crate::errors::DateError;
use chrono::{Datelike, Duration, Months, NaiveDate};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// The month currently displayed.
///
/// Always holds the first day of a month within the four-digit year range
/// diary dates use; navigation past either end stays put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    /// Cursor for `year`/`month` (1-12).
    pub fn new(year: i32, month: u32) -> Result<Self, DateError> {
        DiaryDate::from_ymd(year, month, 1)
            .map(|d| MonthCursor { first: d.naive() })
            .map_err(|_| DateError::InvalidMonth {
                input: format!("{:04}-{:02}", year, month),
            })
    }

    /// The month that contains `date`.
    pub fn containing(date: DiaryDate) -> Self {
        let naive = date.naive();
        MonthCursor {
            first: naive - Duration::days(i64::from(naive.day0())),
        }
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    pub fn month(self) -> u32 {
        self.first.month()
    }

    /// The previous month, rolling back into December of the prior year.
    pub fn prev(self) -> Self {
        self.shift(self.first.checked_sub_months(Months::new(1)))
    }

    /// The next month, rolling over into January of the following year.
    pub fn next(self) -> Self {
        self.shift(self.first.checked_add_months(Months::new(1)))
    }

    fn shift(self, target: Option<NaiveDate>) -> Self {
        target
            .and_then(|d| DiaryDate::try_from(d).ok())
            .map(|d| MonthCursor { first: d.naive() })
            .unwrap_or(self)
    }

    pub fn first_day(self) -> NaiveDate {
        self.first
    }

    pub fn last_day(self) -> NaiveDate {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(self.first)
    }

    /// Header label, e.g. `2024年 12月`.
    pub fn label_ja(self) -> String {
        format!("{}年 {}月", self.year(), self.month())
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthCursor {
    type Err = DateError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DateError::InvalidMonth {
            input: s.to_string(),
        };
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4
            || month.len() != 2
            || !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthCursor::new(year, month).map_err(|_| invalid())
    }
}

/// One day in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub has_entry: bool,
    pub is_selected: bool,
}

/// Builds the padded grid for `cursor`.
///
/// `diary_dates` may contain duplicates; only membership matters.
///
/// # Examples
///
/// ```
/// use mirai::calendar::{build_grid, MonthCursor};
///
/// let cursor = MonthCursor::new(2018, 2).unwrap();
/// let grid = build_grid(cursor, &[], None);
/// assert_eq!(grid.len() % 7, 0);
/// ```
pub fn build_grid(
    cursor: MonthCursor,
    diary_dates: &[DiaryDate],
    selected: Option<DiaryDate>,
) -> Vec<CalendarCell> {
    let first = cursor.first_day();
    let last = cursor.last_day();
    let lead = i64::from(first.weekday().num_days_from_sunday());
    let trail = (DAYS_PER_WEEK as i64 - 1) - i64::from(last.weekday().num_days_from_sunday());
    let start = first - Duration::days(lead);
    let end = last + Duration::days(trail);

    let entries: HashSet<NaiveDate> = diary_dates.iter().map(|d| d.naive()).collect();
    let selected = selected.map(DiaryDate::naive);

    start
        .iter_days()
        .take_while(|d| *d <= end)
        .map(|date| CalendarCell {
            date,
            is_current_month: first <= date && date <= last,
            has_entry: entries.contains(&date),
            is_selected: selected == Some(date),
        })
        .collect()
}

/// Selection after clicking `cell`.
///
/// Clicking the selected day clears the selection, clicking another day of
/// the displayed month selects it, and clicking a padding day changes nothing.
pub fn toggle_selection(cell: &CalendarCell, selected: Option<DiaryDate>) -> Option<DiaryDate> {
    if !cell.is_current_month {
        return selected;
    }
    match DiaryDate::try_from(cell.date) {
        Ok(date) if selected == Some(date) => None,
        Ok(date) => Some(date),
        Err(_) => selected,
    }
}

/// Calendar state owned by a single view: the displayed month and the
/// selected day.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarView {
    cursor: MonthCursor,
    selected: Option<DiaryDate>,
}

impl CalendarView {
    /// Starts on the month containing `today` with nothing selected.
    pub fn new(today: DiaryDate) -> Self {
        CalendarView {
            cursor: MonthCursor::containing(today),
            selected: None,
        }
    }

    /// Starts on an explicit month.
    pub fn at(cursor: MonthCursor) -> Self {
        CalendarView {
            cursor,
            selected: None,
        }
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn selected(&self) -> Option<DiaryDate> {
        self.selected
    }

    pub fn prev_month(&mut self) {
        self.cursor = self.cursor.prev();
    }

    pub fn next_month(&mut self) {
        self.cursor = self.cursor.next();
    }

    /// Applies a click on `date`; returns the resulting selection.
    pub fn click(&mut self, date: DiaryDate) -> Option<DiaryDate> {
        let cell = CalendarCell {
            date: date.naive(),
            is_current_month: MonthCursor::containing(date) == self.cursor,
            has_entry: false,
            is_selected: self.selected == Some(date),
        };
        self.selected = toggle_selection(&cell, self.selected);
        self.selected
    }

    /// Grid for the displayed month.
    pub fn cells(&self, diary_dates: &[DiaryDate]) -> Vec<CalendarCell> {
        build_grid(self.cursor, diary_dates, self.selected)
    }
}
