//! Scroll state for a windowed list.
//!
//! [`Viewport`] owns the only mutable piece of a list's geometry, the scroll
//! offset, and derives everything else through the pure functions in
//! [`crate::window`]. [`VirtualList`] is the widget that draws a list through
//! it.

pub use widget::VirtualList;

use crate::{
    follow::{AutoFollow, FollowPolicy, FollowState, ScrollMetrics},
    window::{self, LayoutParams, Result, Window, WindowError, WindowInput, WindowMemo},
};

mod widget;

#[derive(Debug)]
pub struct Viewport {
    layout: LayoutParams,
    scroll_offset: f64,
    container_height: f64,
    item_count: usize,
    memo: WindowMemo,
    follow: Option<AutoFollow>,
}

impl Viewport {
    pub fn new(layout: LayoutParams) -> Self {
        Self {
            layout,
            scroll_offset: 0.0,
            container_height: 0.0,
            item_count: 0,
            memo: WindowMemo::default(),
            follow: None,
        }
    }

    /// Enables stick-to-bottom behavior for appended items.
    pub fn following(mut self, policy: FollowPolicy) -> Self {
        self.follow = Some(AutoFollow::new(policy));
        self
    }

    pub fn layout(&self) -> LayoutParams {
        self.layout
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn container_height(&self) -> f64 {
        self.container_height
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn total_height(&self) -> f64 {
        window::total_height(self.layout.item_height(), self.item_count)
    }

    pub fn max_scroll_offset(&self) -> f64 {
        window::max_scroll_offset(self.total_height(), self.container_height)
    }

    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_height: self.total_height(),
            scroll_offset: self.scroll_offset,
            container_height: self.container_height,
        }
    }

    pub fn distance_from_bottom(&self) -> f64 {
        self.metrics().distance_from_bottom()
    }

    pub fn is_at_bottom(&self) -> bool {
        self.distance_from_bottom() <= 0.0
    }

    pub fn follow_state(&self) -> FollowState {
        self.follow
            .as_ref()
            .map_or(FollowState::Idle, AutoFollow::state)
    }

    /// Handles a scroll event. Offsets past either end are clamped.
    pub fn scroll_to(&mut self, scroll_offset: f64) -> Result<()> {
        if !scroll_offset.is_finite() {
            return Err(WindowError::InvalidScrollOffset(scroll_offset));
        }

        self.scroll_offset = window::clamp_scroll_offset(
            scroll_offset,
            self.total_height(),
            self.container_height,
        );

        Ok(())
    }

    pub fn scroll_by(&mut self, delta: f64) -> Result<()> {
        self.scroll_to(self.scroll_offset + delta)
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0.0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll_offset();
    }

    /// Brings the item at `index` to the top edge, or as close as the list
    /// allows.
    pub fn scroll_to_index(&mut self, index: usize) {
        self.scroll_offset = window::clamp_scroll_offset(
            window::render_offset(index, self.layout.item_height()),
            self.total_height(),
            self.container_height,
        );
    }

    /// Moves by whole viewports; a negative `pages` scrolls up.
    pub fn scroll_pages(&mut self, pages: f64) -> Result<()> {
        self.scroll_by(pages * self.container_height.max(self.layout.item_height()))
    }

    pub fn resize(&mut self, container_height: f64) -> Result<()> {
        if !container_height.is_finite() || container_height < 0.0 {
            return Err(WindowError::InvalidContainerHeight(container_height));
        }

        self.container_height = container_height;
        self.clamp();

        Ok(())
    }

    /// Records the current length of the item collection.
    ///
    /// Growth counts as a tail append and is run past the follow policy with
    /// the geometry from before the new items. The scroll itself is deferred
    /// to [`Viewport::settle`].
    pub fn observe_item_count(&mut self, item_count: usize) {
        if item_count > self.item_count {
            let before_append = self.metrics();

            if let Some(follow) = &mut self.follow {
                follow.on_append(&before_append);
            }
        }

        self.item_count = item_count;
        self.clamp();
    }

    /// Applies a pending follow. Call once the container height and item count
    /// reflect the appended items.
    pub fn settle(&mut self) {
        if self.follow.as_mut().is_some_and(AutoFollow::take_pending) {
            self.scroll_to_bottom();
        }
    }

    pub fn window(&mut self) -> Result<Window> {
        self.memo.get(WindowInput {
            scroll_offset: self.scroll_offset,
            container_height: self.container_height,
            item_count: self.item_count,
            layout: self.layout,
        })
    }

    /// Back to the freshly mounted state.
    pub fn reset(&mut self) {
        self.scroll_offset = 0.0;
        self.item_count = 0;
        self.memo.invalidate();

        if let Some(follow) = &mut self.follow {
            follow.reset();
        }
    }

    fn clamp(&mut self) {
        self.scroll_offset = window::clamp_scroll_offset(
            self.scroll_offset,
            self.total_height(),
            self.container_height,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::Viewport;
    use crate::{
        follow::{FollowPolicy, FollowState},
        window::{LayoutParams, VisibleRange, WindowError},
    };

    fn viewport(item_height: f64, container_height: f64, item_count: usize) -> Viewport {
        let mut viewport =
            Viewport::new(LayoutParams::new(item_height, 5).unwrap()).following(FollowPolicy::default());
        viewport.resize(container_height).unwrap();
        viewport.observe_item_count(item_count);
        viewport.settle();
        viewport
    }

    #[test]
    fn mounting_a_history_starts_at_the_bottom() {
        let viewport = viewport(100.0, 600.0, 1000);

        assert_eq!(viewport.scroll_offset(), 99_400.0);
        assert!(viewport.is_at_bottom());
    }

    #[test]
    fn scroll_events_recompute_the_window() {
        let mut viewport = viewport(100.0, 600.0, 1000);
        viewport.scroll_to(5000.0).unwrap();

        let window = viewport.window().unwrap();

        assert_eq!(window.range, Some(VisibleRange { start: 45, end: 61 }));
        assert_eq!(window.render_offset, 4500.0);
        assert_eq!(window.total_height, 100_000.0);
    }

    #[test]
    fn scroll_offset_is_clamped() {
        let mut viewport = viewport(100.0, 600.0, 10);

        viewport.scroll_to(-50.0).unwrap();
        assert_eq!(viewport.scroll_offset(), 0.0);

        viewport.scroll_to(10_000.0).unwrap();
        assert_eq!(viewport.scroll_offset(), 400.0);

        viewport.scroll_by(-150.0).unwrap();
        assert_eq!(viewport.scroll_offset(), 250.0);

        assert_eq!(
            viewport.scroll_to(f64::INFINITY),
            Err(WindowError::InvalidScrollOffset(f64::INFINITY))
        );
        assert_eq!(viewport.scroll_offset(), 250.0);
    }

    #[test]
    fn follows_append_near_bottom() {
        let mut viewport = viewport(100.0, 100.0, 10);
        viewport.scroll_to(850.0).unwrap();

        viewport.observe_item_count(11);
        assert_eq!(viewport.follow_state(), FollowState::Following);

        viewport.settle();

        assert_eq!(viewport.follow_state(), FollowState::Idle);
        assert_eq!(viewport.scroll_offset(), 1000.0);
        assert_eq!(
            viewport.scroll_offset(),
            viewport.total_height() - viewport.container_height()
        );
    }

    #[test]
    fn keeps_reading_position_far_from_bottom() {
        let mut viewport = viewport(100.0, 100.0, 10);
        viewport.scroll_to(200.0).unwrap();

        viewport.observe_item_count(11);
        viewport.settle();

        assert_eq!(viewport.follow_state(), FollowState::Idle);
        assert_eq!(viewport.scroll_offset(), 200.0);
    }

    #[test]
    fn shrinking_clamps_without_following() {
        let mut viewport = viewport(100.0, 100.0, 10);
        viewport.scroll_to(600.0).unwrap();

        viewport.observe_item_count(3);

        assert_eq!(viewport.follow_state(), FollowState::Idle);
        assert_eq!(viewport.scroll_offset(), 200.0);
    }

    #[test]
    fn plain_viewport_never_follows() {
        let mut viewport = Viewport::new(LayoutParams::new(1.0, 0).unwrap());
        viewport.resize(10.0).unwrap();
        viewport.observe_item_count(50);
        viewport.settle();

        assert_eq!(viewport.scroll_offset(), 0.0);
    }

    #[test]
    fn scroll_to_index_top_aligns() {
        let mut viewport = viewport(2.0, 10.0, 100);

        viewport.scroll_to_index(40);
        assert_eq!(viewport.scroll_offset(), 80.0);

        viewport.scroll_to_index(99);
        assert_eq!(viewport.scroll_offset(), 190.0);
    }

    #[test]
    fn paging_moves_by_container_height() {
        let mut viewport = viewport(1.0, 10.0, 100);
        viewport.scroll_to_top();

        viewport.scroll_pages(2.0).unwrap();
        assert_eq!(viewport.scroll_offset(), 20.0);

        viewport.scroll_pages(-0.5).unwrap();
        assert_eq!(viewport.scroll_offset(), 15.0);
    }

    #[test]
    fn resize_rejects_negative_height() {
        let mut viewport = viewport(1.0, 10.0, 100);

        assert!(viewport.resize(-1.0).is_err());
        assert_eq!(viewport.container_height(), 10.0);
    }

    #[test]
    fn reset_returns_to_mount_state() {
        let mut viewport = viewport(1.0, 10.0, 100);

        viewport.reset();

        assert_eq!(viewport.scroll_offset(), 0.0);
        assert_eq!(viewport.item_count(), 0);
        assert_eq!(viewport.follow_state(), FollowState::Idle);
    }
}
