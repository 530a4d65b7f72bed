use crate::input::Input;
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{DefaultTerminal, Frame, Terminal, layout::Rect, prelude::CrosstermBackend};
use std::{io::stdout, panic, sync::Once};

pub use draw::draw;

mod draw;
mod popup;

static ALTERNATE_SCREEN: Once = Once::new();

pub fn init() -> Result<DefaultTerminal> {
    set_panic_hook();

    enable_raw_mode()?;

    let mut res = Ok(());
    ALTERNATE_SCREEN.call_once(|| {
        res = execute!(stdout(), EnterAlternateScreen, EnableMouseCapture);
    });
    res?;

    let backend = CrosstermBackend::new(stdout());
    Ok(Terminal::new(backend)?)
}

fn set_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        restore();
        default_hook(info);
    }));
}

pub fn restore() {
    if let Err(e) = disable_raw_mode() {
        tracing::error!("couldn't disable raw mode: {e}");
    }

    if ALTERNATE_SCREEN.is_completed()
        && let Err(e) = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen)
    {
        tracing::error!("couldn't leave alternate screen: {e}");
    }
}

fn set_cursor(f: &mut Frame, input: &Input, area: Rect) {
    f.set_cursor_position((area.x + input.cursor_position(), area.y));
}
