use super::{Result, Window, WindowInput, compute_window};

/// Remembers the last computed window so repeated draws with an unchanged
/// scroll position, container size, item count and layout skip the math.
#[derive(Debug, Default)]
pub struct WindowMemo {
    cached: Option<(WindowInput, Window)>,
    hits: u64,
    misses: u64,
}

impl WindowMemo {
    pub fn get(&mut self, input: WindowInput) -> Result<Window> {
        if let Some((cached_input, window)) = &self.cached
            && *cached_input == input
        {
            self.hits += 1;
            return Ok(*window);
        }

        let window = compute_window(&input)?;

        tracing::trace!(
            scroll_offset = window.scroll_offset,
            container_height = input.container_height,
            item_count = input.item_count,
            start = window.range.map(|range| range.start),
            end = window.range.map(|range| range.end),
            "window recomputed"
        );

        self.misses += 1;
        self.cached = Some((input, window));
        Ok(window)
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
