use thiserror::Error;

pub type Result<T> = std::result::Result<T, WindowError>;

/// Caller contract violations. None of these are recoverable at runtime.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum WindowError {
    #[error("item height must be a positive finite number, got {0}")]
    InvalidItemHeight(f64),

    #[error("container height must be a non-negative finite number, got {0}")]
    InvalidContainerHeight(f64),

    #[error("scroll offset must be finite, got {0}")]
    InvalidScrollOffset(f64),
}

pub(super) fn check_item_height(item_height: f64) -> Result<()> {
    if item_height.is_finite() && item_height > 0.0 {
        Ok(())
    } else {
        Err(WindowError::InvalidItemHeight(item_height))
    }
}

pub(super) fn check_container_height(container_height: f64) -> Result<()> {
    if container_height.is_finite() && container_height >= 0.0 {
        Ok(())
    } else {
        Err(WindowError::InvalidContainerHeight(container_height))
    }
}

pub(super) fn check_scroll_offset(scroll_offset: f64) -> Result<()> {
    if scroll_offset.is_finite() {
        Ok(())
    } else {
        Err(WindowError::InvalidScrollOffset(scroll_offset))
    }
}
