use crate::{
    commands::{Command, HelpCommand},
    config::keys::{KeyBindings, binding_to_string},
    viewport::Viewport,
    window::LayoutParams,
};
use crossterm::event::KeyEvent;
use indexmap::IndexMap;

const DESCRIPTIONS_LEN: usize = 15;
const DESCRIPTIONS: [&str; DESCRIPTIONS_LEN] = [
    "Scroll one message down",    // Scroll Down
    "Scroll one message up",      // Scroll Up
    "Scroll half a page down",    // Half Page Down
    "Scroll half a page up",      // Half Page Up
    "Scroll one page down",       // Page Down
    "Scroll one page up",         // Page Up
    "Jump to the oldest message", // Go To Top
    "Jump to the newest message", // Go To Bottom
    "Write a message",            // Compose
    "Search messages",            // Enter Search
    "Jump to the next match",     // Repeat Last Search
    "Jump to the previous match", // Repeat Last Search Backward
    "Show or hide the scrollbar", // Toggle Scrollbar
    "Open help window",           // Toggle Help
    "Quit application",           // Quit
];

const HELP_DESCRIPTIONS_LEN: usize = 5;
const HELP_DESCRIPTIONS: [&str; HELP_DESCRIPTIONS_LEN] = [
    "Scroll help up",         // Scroll Up
    "Scroll help down",       // Scroll Down
    "Jump to the first line", // Go To Top
    "Jump to the last line",  // Go To Bottom
    "Close help",             // Abort
];

fn entries<T: Copy + Into<usize>>(
    bindings: &IndexMap<KeyEvent, T>,
    descriptions: &[&'static str],
) -> Vec<(String, &'static str)> {
    let mut entries: Vec<(String, &'static str)> = descriptions
        .iter()
        .map(|description| (String::new(), *description))
        .collect();

    for (key, command) in bindings {
        let Some((keys, _)) = entries.get_mut((*command).into()) else {
            continue;
        };

        if !keys.is_empty() {
            keys.push_str(", ");
        }
        keys.push_str(&binding_to_string(key));
    }

    entries
}

impl From<Command> for usize {
    fn from(command: Command) -> Self {
        command as usize
    }
}

impl From<HelpCommand> for usize {
    fn from(command: HelpCommand) -> Self {
        command as usize
    }
}

/// Key bindings rendered as `keys  description` lines.
pub struct Bindings {
    pub lines: Vec<String>,
}

impl Bindings {
    pub fn new(key_bindings: &KeyBindings) -> Self {
        let general = entries(&key_bindings.general, &DESCRIPTIONS);
        let help = entries(&key_bindings.help, &HELP_DESCRIPTIONS);
        let width = general
            .iter()
            .chain(&help)
            .map(|(keys, _)| keys.chars().count())
            .max()
            .unwrap_or_default();

        let format = |(keys, description): &(String, &str)| format!("{keys:width$}  {description}");
        let mut lines: Vec<String> = general.iter().map(format).collect();

        lines.push(String::new());
        lines.push("In this window:".to_owned());
        lines.extend(help.iter().map(format));

        Self { lines }
    }
}

/// The help popup. Lines are one row tall and scrolled through a plain
/// [`Viewport`].
pub struct Help {
    pub bindings: Bindings,
    pub viewport: Viewport,
    pub visible: bool,
}

impl Help {
    pub fn new(key_bindings: &KeyBindings) -> Self {
        Self {
            bindings: Bindings::new(key_bindings),
            viewport: Viewport::new(LayoutParams::rows(1, 0)),
            visible: false,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn scroll_up(&mut self) {
        let _ = self.viewport.scroll_by(-1.0);
    }

    pub fn scroll_down(&mut self) {
        let _ = self.viewport.scroll_by(1.0);
    }

    pub fn scroll_top(&mut self) {
        self.viewport.scroll_to_top();
    }

    pub fn scroll_bottom(&mut self) {
        self.viewport.scroll_to_bottom();
    }
}
