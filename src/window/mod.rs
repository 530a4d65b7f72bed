//! Windowed list computation.
//!
//! The free functions in here are pure: given the scroll position, the viewport size and
//! the shape of a list of uniformly sized items, work out which items have to
//! be materialized and where the materialized block sits inside the full
//! scroll space.

pub use error::{Result, WindowError};
pub use memo::WindowMemo;

use std::ops::RangeInclusive;

mod error;
mod memo;

pub const DEFAULT_OVERSCAN: usize = 4;

/// Item height and overscan, fixed for the lifetime of a list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    item_height: f64,
    overscan: usize,
}

impl LayoutParams {
    pub fn new(item_height: f64, overscan: usize) -> Result<Self> {
        error::check_item_height(item_height)?;

        Ok(Self {
            item_height,
            overscan,
        })
    }

    /// Layout for a terminal list where every item spans `rows` rows.
    pub fn rows(rows: u16, overscan: usize) -> Self {
        Self {
            item_height: f64::from(rows.max(1)),
            overscan,
        }
    }

    pub fn item_height(&self) -> f64 {
        self.item_height
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }
}

/// Inclusive range of item indices. Never empty: an empty list has no range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize,
}

impl VisibleRange {
    pub fn count(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Everything the engine needs to place a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowInput {
    pub scroll_offset: f64,
    pub container_height: f64,
    pub item_count: usize,
    pub layout: LayoutParams,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub range: Option<VisibleRange>,
    /// Scroll offset after clamping to the scrollable range.
    pub scroll_offset: f64,
    pub total_height: f64,
    pub render_offset: f64,
}

impl Window {
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match self.range {
            Some(range) => slice_visible_items(items, range),
            None => &[],
        }
    }
}

pub fn total_height(item_height: f64, item_count: usize) -> f64 {
    item_height * item_count as f64
}

pub fn render_offset(start_index: usize, item_height: f64) -> f64 {
    start_index as f64 * item_height
}

pub fn max_scroll_offset(total_height: f64, container_height: f64) -> f64 {
    (total_height - container_height).max(0.0)
}

/// Pulls over-scrolled offsets (inertial bounce, a shrinking list) back into
/// `[0, total_height - container_height]`.
pub fn clamp_scroll_offset(scroll_offset: f64, total_height: f64, container_height: f64) -> f64 {
    scroll_offset.clamp(0.0, max_scroll_offset(total_height, container_height))
}

/// Computes the inclusive range of items to materialize.
///
/// The range covers every item intersecting the viewport, padded by `overscan`
/// items on both sides and clamped to the list bounds. Returns `None` for an
/// empty list.
///
/// # Examples
///
/// ```
/// use quad::window::{compute_visible_range, VisibleRange};
///
/// let range = compute_visible_range(5000.0, 100.0, 600.0, 1000, 5).unwrap();
/// assert_eq!(range, Some(VisibleRange { start: 45, end: 61 }));
///
/// let range = compute_visible_range(0.0, 100.0, 600.0, 3, 5).unwrap();
/// assert_eq!(range, Some(VisibleRange { start: 0, end: 2 }));
///
/// assert_eq!(compute_visible_range(0.0, 100.0, 600.0, 0, 5).unwrap(), None);
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn compute_visible_range(
    scroll_offset: f64,
    item_height: f64,
    container_height: f64,
    item_count: usize,
    overscan: usize,
) -> Result<Option<VisibleRange>> {
    error::check_item_height(item_height)?;
    error::check_container_height(container_height)?;
    error::check_scroll_offset(scroll_offset)?;

    if item_count == 0 {
        return Ok(None);
    }

    let last = item_count - 1;
    let offset = clamp_scroll_offset(
        scroll_offset,
        total_height(item_height, item_count),
        container_height,
    );

    // offset is non-negative here, so the float to usize casts only saturate
    // at the top end
    let first_visible = (offset / item_height).floor() as usize;
    let past_visible = ((offset + container_height) / item_height).ceil() as usize;

    Ok(Some(VisibleRange {
        start: first_visible.saturating_sub(overscan).min(last),
        end: past_visible.saturating_add(overscan).min(last),
    }))
}

/// Borrows `items[range.start..=range.end]`, truncated to what `items` holds.
pub fn slice_visible_items<T>(items: &[T], range: VisibleRange) -> &[T] {
    let end = range.end.min(items.len().saturating_sub(1));
    items.get(range.start..=end).unwrap_or(&[])
}

pub fn compute_window(input: &WindowInput) -> Result<Window> {
    let WindowInput {
        scroll_offset,
        container_height,
        item_count,
        layout,
    } = *input;

    let range = compute_visible_range(
        scroll_offset,
        layout.item_height,
        container_height,
        item_count,
        layout.overscan,
    )?;
    let total_height = total_height(layout.item_height, item_count);

    Ok(Window {
        range,
        scroll_offset: clamp_scroll_offset(scroll_offset, total_height, container_height),
        total_height,
        render_offset: range.map_or(0.0, |range| render_offset(range.start, layout.item_height)),
    })
}
