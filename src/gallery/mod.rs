//! Slider positioning for the gallery view.
//!
//! The gallery walks through diaries oldest to newest with a horizontal
//! slider. Three coordinate spaces meet here: the discrete index into the
//! date sequence, the percentage used to place the floating date label, and
//! the pixel offset of a pointer along the track.
//!
//! The slider distinguishes the *committed* index, which decides the diary
//! and image on screen, from the *hovered* index, which only changes the
//! label while the pointer moves over the track.

use crate::date_codec::DiaryDate;
use crate::diary::{sort_by_date, DiaryView, SortOrder};
use crate::images::{ImageIndex, ImageRecord};

/// Label position for `index`, as a percentage of the track width.
///
/// # Examples
///
/// ```
/// use mirai::gallery::percent_for_index;
///
/// assert_eq!(percent_for_index(0, 1), 0.0);
/// assert_eq!(percent_for_index(4, 5), 100.0);
/// assert_eq!(percent_for_index(2, 5), 50.0);
/// ```
pub fn percent_for_index(index: usize, total: usize) -> f64 {
    if total <= 1 {
        return 0.0;
    }
    let max = total - 1;
    (index.min(max) as f64 / max as f64) * 100.0
}

/// Horizontal extent of the slider track in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub left: f64,
    pub width: f64,
}

/// Index under a pointer at `client_x`.
///
/// Positions left of the track map to the first index and right of it to the
/// last, infinite positions included. Degenerate input maps to 0, and so
/// does a NaN position.
pub fn index_for_client_x(client_x: f64, track: Track, total: usize) -> usize {
    if total == 0 || track.width.is_nan() || track.width <= 0.0 {
        return 0;
    }
    let ratio = (client_x - track.left) / track.width;
    if ratio.is_nan() {
        return 0;
    }
    let ratio = ratio.clamp(0.0, 1.0);
    (ratio * (total - 1) as f64).round() as usize
}

/// Interaction state of the slider.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SliderState {
    total: usize,
    committed: usize,
    hovered: Option<usize>,
    interacting: bool,
}

impl SliderState {
    pub fn new(total: usize) -> Self {
        SliderState {
            total,
            ..Default::default()
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn committed(&self) -> usize {
        self.committed
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Pointer entered the track or a touch started.
    pub fn enter(&mut self) {
        self.interacting = true;
    }

    /// Pointer moved over the track. Never touches the committed index.
    pub fn hover(&mut self, client_x: f64, track: Track) -> usize {
        let index = index_for_client_x(client_x, track, self.total);
        self.hovered = Some(index);
        index
    }

    /// Pointer left the track or the touch ended.
    pub fn leave(&mut self) {
        self.interacting = false;
        self.hovered = None;
    }

    /// Commits a new position, clamped into range.
    pub fn commit(&mut self, index: usize) -> usize {
        self.committed = index.min(self.total.saturating_sub(1));
        self.committed
    }

    /// The index whose date the label shows: the hovered one while
    /// interacting, otherwise the committed one.
    pub fn label_index(&self) -> usize {
        match (self.interacting, self.hovered) {
            (true, Some(index)) => index,
            _ => self.committed,
        }
    }

    /// Where the label sits; follows the committed index.
    pub fn label_percent(&self) -> f64 {
        percent_for_index(self.committed, self.total)
    }
}

/// Diaries in gallery order together with the slider over them.
#[derive(Debug, Clone, PartialEq)]
pub struct Gallery {
    diaries: Vec<DiaryView>,
    slider: SliderState,
}

impl Gallery {
    /// Orders `views` oldest first and puts the slider on the oldest entry.
    pub fn new(views: &[DiaryView]) -> Self {
        let diaries = sort_by_date(views, SortOrder::Ascending);
        let slider = SliderState::new(diaries.len());
        Gallery { diaries, slider }
    }

    pub fn len(&self) -> usize {
        self.diaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diaries.is_empty()
    }

    pub fn slider(&self) -> &SliderState {
        &self.slider
    }

    pub fn slider_mut(&mut self) -> &mut SliderState {
        &mut self.slider
    }

    /// Commits `index` and returns the diary now on screen.
    pub fn select(&mut self, index: usize) -> Option<&DiaryView> {
        self.slider.commit(index);
        self.current()
    }

    /// The diary at the committed index.
    pub fn current(&self) -> Option<&DiaryView> {
        self.diaries.get(self.slider.committed())
    }

    pub fn oldest(&self) -> Option<&DiaryView> {
        self.diaries.first()
    }

    pub fn newest(&self) -> Option<&DiaryView> {
        self.diaries.last()
    }

    /// Dates in slider order.
    pub fn dates(&self) -> Vec<DiaryDate> {
        self.diaries.iter().map(|d| d.date).collect()
    }

    /// Text of the floating label, empty when there is nothing to show.
    pub fn label(&self) -> String {
        self.diaries
            .get(self.slider.label_index())
            .map(|d| d.date.format_simple())
            .unwrap_or_default()
    }

    /// Generated image for the diary on screen.
    pub fn current_image<'a>(&self, images: &'a ImageIndex) -> Option<&'a ImageRecord> {
        self.current().and_then(|d| images.lookup(&d.id))
    }
}
