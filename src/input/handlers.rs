use super::Mode;
use crate::{
    app::App,
    commands::{Command, HelpCommand},
    config::{KEY_BINDINGS, OPTIONS},
    help::Help,
    search::Direction,
};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

const WHEEL_ROWS: f64 = 3.0;

// shift is already part of `G` or `?`, bindings never carry it
fn normalize(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(ch) = key.code
        && !ch.is_lowercase()
    {
        key.modifiers.remove(KeyModifiers::SHIFT);
    }

    key
}

/// Returns true when the application should quit.
pub fn handle_event(key: KeyEvent, app: &mut App) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }

    let key = normalize(key);

    if app.help.visible {
        return handle_key_help_mode(key, &mut app.help);
    }

    match app.mode {
        Mode::Normal => return handle_key_normal_mode(key, app),
        Mode::Compose | Mode::Search(_) => handle_key_editing_mode(key, app),
    }

    false
}

pub fn handle_mouse_event(mouse: MouseEvent, app: &mut App) {
    let rows = match mouse.kind {
        MouseEventKind::ScrollDown => WHEEL_ROWS,
        MouseEventKind::ScrollUp => -WHEEL_ROWS,
        _ => return,
    };

    if app.help.visible {
        let _ = app.help.viewport.scroll_by(rows);
    } else {
        app.scroll_rows(rows);
    }
}

fn handle_key_normal_mode(key: KeyEvent, app: &mut App) -> bool {
    if let Some(command) = KEY_BINDINGS.get(&key) {
        match command {
            Command::ScrollDown => app.scroll_messages(1.0),
            Command::ScrollUp => app.scroll_messages(-1.0),
            Command::HalfPageDown => app.scroll_pages(0.5),
            Command::HalfPageUp => app.scroll_pages(-0.5),
            Command::PageDown => app.scroll_pages(1.0),
            Command::PageUp => app.scroll_pages(-1.0),
            Command::GoToTop => app.viewport.scroll_to_top(),
            Command::GoToBottom => app.viewport.scroll_to_bottom(),
            Command::Compose => app.take_input(Mode::Compose),
            Command::EnterSearch => app.take_input(Mode::Search(Direction::Forward)),
            Command::RepeatLastSearch => app.repeat_search(false),
            Command::RepeatLastSearchBackward => app.repeat_search(true),
            Command::ToggleScrollbar => app.scrollbar = !app.scrollbar,
            Command::ToggleHelp => app.help.toggle(),
            Command::Quit => return true,
        }
    }

    false
}

fn handle_key_help_mode(key: KeyEvent, help: &mut Help) -> bool {
    if let Some(command) = KEY_BINDINGS.help.get(&key) {
        match command {
            HelpCommand::ScrollUp => help.scroll_up(),
            HelpCommand::ScrollDown => help.scroll_down(),
            HelpCommand::GoToTop => help.scroll_top(),
            HelpCommand::GoToBottom => help.scroll_bottom(),
            HelpCommand::Abort => help.toggle(),
        }
    } else if let Some(command) = KEY_BINDINGS.get(&key) {
        match command {
            Command::ScrollDown => help.scroll_down(),
            Command::ScrollUp => help.scroll_up(),
            Command::GoToTop => help.scroll_top(),
            Command::GoToBottom => help.scroll_bottom(),
            Command::ToggleHelp => help.toggle(),
            Command::Quit => return true,
            _ => (),
        }
    }

    false
}

fn handle_key_editing_mode(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => complete(app),
        KeyCode::Esc => abort(app),
        _ => {
            let Some(input) = &mut app.footer_input else {
                return;
            };

            if input.update(key) && matches!(app.mode, Mode::Search(_)) && OPTIONS.incremental_search
            {
                let query = input.text.clone();
                app.preview_search(&query);
            }
        }
    }
}

fn complete(app: &mut App) {
    let res = match app.mode {
        Mode::Compose => app.send_composed(),
        Mode::Search(_) => {
            app.complete_search();
            Ok(())
        }
        Mode::Normal => Ok(()),
    };

    app.status.set_if_error(res);
}

fn abort(app: &mut App) {
    match app.mode {
        Mode::Compose => app.abort_input(),
        Mode::Search(_) => app.abort_search(),
        Mode::Normal => (),
    }
}
