//! Pure list helpers over normalized diaries.
//!
//! None of these mutate their input; the ones that produce a collection
//! return a fresh `Vec`.

use super::{DiaryId, DiaryView};
use crate::date_codec::DiaryDate;

/// Direction for [`sort_by_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    /// Newest first, as the list view shows them.
    #[default]
    Descending,
}

/// Sorts views by date.
///
/// The sort is stable: entries sharing a date keep their relative order in
/// either direction.
pub fn sort_by_date(views: &[DiaryView], order: SortOrder) -> Vec<DiaryView> {
    let mut sorted = views.to_vec();
    match order {
        SortOrder::Ascending => sorted.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::Descending => sorted.sort_by(|a, b| b.date.cmp(&a.date)),
    }
    sorted
}

/// All views written on `date`. Several entries may share a date.
pub fn filter_by_date(views: &[DiaryView], date: DiaryDate) -> Vec<DiaryView> {
    views.iter().filter(|v| v.date == date).cloned().collect()
}

/// Looks a view up by id. Absence is a normal outcome (nothing selected).
pub fn find_by_id<'a>(views: &'a [DiaryView], id: &DiaryId) -> Option<&'a DiaryView> {
    views.iter().find(|v| &v.id == id)
}

/// Dates of all views, duplicates included, for calendar highlighting.
pub fn distinct_dates(views: &[DiaryView]) -> Vec<DiaryDate> {
    views.iter().map(|v| v.date).collect()
}

/// Optional narrowing applied by the list view.
///
/// Both range ends are inclusive. The search query matches title or content,
/// case-insensitively.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiaryFilter {
    pub date_range: Option<(DiaryDate, DiaryDate)>,
    pub search_query: Option<String>,
}

impl DiaryFilter {
    /// Returns the views that satisfy every configured criterion, in input order.
    pub fn apply(&self, views: &[DiaryView]) -> Vec<DiaryView> {
        let needle = self
            .search_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        views
            .iter()
            .filter(|v| match self.date_range {
                Some((start, end)) => start <= v.date && v.date <= end,
                None => true,
            })
            .filter(|v| match &needle {
                Some(q) => {
                    v.title.to_lowercase().contains(q) || v.content.to_lowercase().contains(q)
                }
                None => true,
            })
            .cloned()
            .collect()
    }
}
