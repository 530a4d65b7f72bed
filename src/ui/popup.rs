use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// A centered rectangle of at most `height` x `width` cells inside `r`,
/// leaving a one cell margin.
pub fn window_from_dimensions(height: u16, width: u16, r: Rect) -> Rect {
    let [vertical] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .vertical_margin(1)
        .areas(r);

    let [window] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .horizontal_margin(1)
        .areas(vertical);

    window
}
