//! Plain-text views printed to stdout.

use crate::calendar::{CalendarCell, CalendarView};
use crate::constants::{DAYS_PER_WEEK, PROMPT_NEW_ENTRY, WEEKDAY_LABELS_JA};
use crate::date_codec::DiaryDate;
use crate::diary::{DiaryView, ScoreTier};
use crate::gallery::Gallery;
use crate::images::{ImageIndex, ImageRecord};
use crate::ops::{DiaryForm, SubmitOutcome};
use chrono::Datelike;

const EMPTY_LIST: &str = "日記はまだありません。";

/// One line per diary: date, id and title.
pub fn diary_list(views: &[DiaryView]) -> String {
    if views.is_empty() {
        return EMPTY_LIST.to_string();
    }
    views
        .iter()
        .map(|view| format!("{}  #{:<5} {}", view.date, view.id, view.title))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A diary card: title, localized date, score and the generated image.
pub fn diary_card(view: &DiaryView, image: Option<&ImageRecord>) -> String {
    let tier = ScoreTier::from_score(view.score);
    let score = match view.score {
        Some(score) => format!("score: {} ({})", score, tier.label()),
        None => format!("score: {}", tier.label()),
    };

    let mut lines = vec![
        view.title.clone(),
        view.date.format_localized(true),
        score,
    ];
    if let Some(image) = image {
        lines.push(format!("image: {}", image.uri));
    }
    format!("{}\n\n{}", lines.join("\n"), view.content)
}

/// Shown for a date that has no diary yet.
pub fn empty_day(date: DiaryDate) -> String {
    format!(
        "{}\n{} has no diary yet. Run `mirai write --date {}` to write one.",
        PROMPT_NEW_ENTRY, date, date
    )
}

/// Month grid in rows of seven, Sunday first.
///
/// Days with an entry carry a `*`, the selected day is bracketed and padding
/// days from neighbouring months are left blank.
pub fn calendar(view: &CalendarView, cells: &[CalendarCell]) -> String {
    let header: Vec<String> = WEEKDAY_LABELS_JA.iter().map(|l| format!(" {} ", l)).collect();
    let mut out = format!("{}\n{}", view.cursor().label_ja(), header.join(""));

    for week in cells.chunks(DAYS_PER_WEEK) {
        out.push('\n');
        let row: Vec<String> = week.iter().map(calendar_cell).collect();
        out.push_str(row.join("").trim_end());
    }
    out
}

fn calendar_cell(cell: &CalendarCell) -> String {
    if !cell.is_current_month {
        return "    ".to_string();
    }
    let day = cell.date.day();
    match (cell.is_selected, cell.has_entry) {
        (true, true) => format!("[{:>2}*", day),
        (true, false) => format!("[{:>2}]", day),
        (false, true) => format!(" {:>2}*", day),
        (false, false) => format!(" {:>2} ", day),
    }
}

/// Slider summary followed by the diary and image on screen.
pub fn gallery(gallery: &Gallery, images: &ImageIndex) -> String {
    let (Some(oldest), Some(newest), Some(current)) =
        (gallery.oldest(), gallery.newest(), gallery.current())
    else {
        return EMPTY_LIST.to_string();
    };

    let slider = gallery.slider();
    format!(
        "{} ... {}\n{} ({}/{}, {:.1}%)\n\n{}",
        oldest.date.format_simple(),
        newest.date.format_simple(),
        gallery.label(),
        slider.committed() + 1,
        slider.total(),
        slider.label_percent(),
        diary_card(current, gallery.current_image(images))
    )
}

/// Status after a write or edit.
pub fn submission(form: &DiaryForm, outcome: &SubmitOutcome) -> String {
    let mut lines = Vec::new();
    if let Some(message) = form.message() {
        lines.push(message.text.clone());
    }
    lines.push(format!("#{} {}", outcome.diary.id, form.date()));
    lines.push(format!("score: {}", outcome.score_tier.label()));
    if let Some(image) = &outcome.image {
        lines.push(format!("image: {}", image.uri));
    }
    lines.join("\n")
}
