use super::Viewport;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::BlockExt,
    style::Style,
    text::Text,
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

/// Draws only the items inside the viewport's window.
///
/// Every item gets a slot exactly `item_height` rows tall. Content taller than
/// the slot is cut off rather than wrapped so the drawn layout always matches
/// the arithmetic one, and slots straddling an edge are clipped.
pub struct VirtualList<'a, T, F> {
    items: &'a [T],
    render_item: F,
    block: Option<Block<'a>>,
    style: Style,
    scrollbar: bool,
}

impl<'a, T, F> VirtualList<'a, T, F>
where
    F: Fn(&'a T, usize) -> Text<'a>,
{
    pub fn new(items: &'a [T], render_item: F) -> Self {
        Self {
            items,
            render_item,
            block: None,
            style: Style::default(),
            scrollbar: false,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn scrollbar(mut self, scrollbar: bool) -> Self {
        self.scrollbar = scrollbar;
        self
    }
}

impl<'a, T, F> StatefulWidget for VirtualList<'a, T, F>
where
    F: Fn(&'a T, usize) -> Text<'a>,
{
    type State = Viewport;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        buf.set_style(area, self.style);
        if let Some(block) = &self.block {
            block.render(area, buf);
        }
        let mut list_area = self.block.inner_if_some(area);
        let scrollbar_area = Rect {
            x: list_area.right().saturating_sub(1),
            width: list_area.width.min(1),
            ..list_area
        };

        if self.scrollbar {
            list_area.width = list_area.width.saturating_sub(1);
        }

        if let Err(e) = state.resize(f64::from(list_area.height)) {
            tracing::error!("{e}");
            return;
        }
        state.observe_item_count(self.items.len());
        state.settle();

        let window = match state.window() {
            Ok(window) => window,
            Err(e) => {
                tracing::error!("{e}");
                return;
            }
        };

        if list_area.is_empty() {
            return;
        }

        let item_height = state.layout().item_height();

        if let Some(range) = window.range {
            for (index, item) in range.indices().zip(window.slice(self.items)) {
                let offset = index - range.start;
                let top = window.render_offset + offset as f64 * item_height - window.scroll_offset;

                let Some(slot) = clip_slot(top, item_height, list_area) else {
                    continue;
                };

                Paragraph::new((self.render_item)(item, index))
                    .scroll((slot.skip, 0))
                    .render(slot.area, buf);
            }
        }

        if self.scrollbar && window.total_height > state.container_height() {
            let mut scrollbar_state = scrollbar_state(state);

            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .render(scrollbar_area, buf, &mut scrollbar_state);
        }
    }
}

struct Slot {
    area: Rect,
    /// Rows of the item hidden above the top edge.
    skip: u16,
}

#[allow(clippy::cast_possible_truncation)]
fn clip_slot(top: f64, item_height: f64, area: Rect) -> Option<Slot> {
    let slot_top = top.floor() as i64;
    let slot_bottom = (top + item_height).floor() as i64;

    let visible_top = slot_top.max(0);
    let visible_bottom = slot_bottom.min(i64::from(area.height));

    if visible_top >= visible_bottom {
        return None;
    }

    // both bounds are within 0..=area.height here
    Some(Slot {
        area: Rect {
            y: area.y + visible_top as u16,
            height: (visible_bottom - visible_top) as u16,
            ..area
        },
        skip: (visible_top - slot_top) as u16,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scrollbar_state(viewport: &Viewport) -> ScrollbarState {
    ScrollbarState::new(viewport.max_scroll_offset().ceil() as usize + 1)
        .position(viewport.scroll_offset().round() as usize)
        .viewport_content_length(viewport.container_height() as usize)
}
