use crate::commands::{Command, HelpCommand};
use anyhow::{Context, Result, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use indexmap::IndexMap;
use serde::Deserialize;
use std::{
    collections::HashMap,
    ops::{Deref, DerefMut},
};

#[derive(Deserialize)]
pub struct UserKeyBindings {
    #[serde(flatten)]
    general: Option<HashMap<String, String>>,
    help: Option<HashMap<String, String>>,
}

const KEY_NAMES: [(&str, KeyCode); 16] = [
    ("backspace", KeyCode::Backspace),
    ("space", KeyCode::Char(' ')),
    ("enter", KeyCode::Enter),
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("pageup", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
    ("tab", KeyCode::Tab),
    ("backtab", KeyCode::BackTab),
    ("delete", KeyCode::Delete),
    ("insert", KeyCode::Insert),
    ("esc", KeyCode::Esc),
];

fn parse_key_code(token: &str) -> Result<KeyCode> {
    let token = match token {
        "del" => "delete",
        "escape" => "esc",
        _ => token,
    };

    if let Some((_, code)) = KEY_NAMES.iter().find(|(name, _)| *name == token) {
        return Ok(*code);
    }

    let mut chars = token.chars();

    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(KeyCode::Char(ch)),
        _ => match token.strip_prefix('f').map(str::parse::<u8>) {
            Some(Ok(number)) => Ok(KeyCode::F(number)),
            _ => bail!("\"{}\" is not a valid key", token),
        },
    }
}

/// Formats a key the way [`parse_binding`] reads it.
pub fn binding_to_string(key: &KeyEvent) -> String {
    let mut binding = String::new();

    for (modifier, name) in [
        (KeyModifiers::CONTROL, "ctrl-"),
        (KeyModifiers::SHIFT, "shift-"),
        (KeyModifiers::ALT, "alt-"),
    ] {
        if key.modifiers.contains(modifier) {
            binding.push_str(name);
        }
    }

    match KEY_NAMES.iter().find(|(_, code)| *code == key.code) {
        Some((name, _)) => binding.push_str(name),
        None => match key.code {
            KeyCode::Char(ch) => binding.push(ch),
            KeyCode::F(number) => binding.push_str(&format!("f{number}")),
            _ => binding.push('?'),
        },
    }

    binding
}

/// Parses bindings such as `j`, `pagedown` or `ctrl-shift-f5`.
pub fn parse_binding(binding: &str) -> Result<KeyEvent> {
    // "-" on its own or at the end ("ctrl--") is the minus key
    let (modifiers, key) = match binding.strip_suffix('-') {
        Some(rest) if rest.is_empty() || rest.ends_with('-') => {
            (rest.strip_suffix('-').unwrap_or_default(), "-")
        }
        _ => binding.rsplit_once('-').unwrap_or(("", binding)),
    };

    if key.is_empty() {
        bail!("\"{}\" is not a valid binding", binding);
    }

    let code = parse_key_code(key)?;
    let mut event_modifiers = KeyModifiers::NONE;

    for token in modifiers.split('-').filter(|token| !token.is_empty()) {
        match token {
            "ctrl" => event_modifiers.insert(KeyModifiers::CONTROL),
            "shift" => event_modifiers.insert(KeyModifiers::SHIFT),
            "alt" => event_modifiers.insert(KeyModifiers::ALT),
            _ => bail!("\"{}\" is not a valid modifier", token),
        }
    }

    Ok(KeyEvent::new(code, event_modifiers))
}

#[derive(PartialEq, Eq, Debug)]
pub struct KeyBindings {
    pub general: IndexMap<KeyEvent, Command>,
    pub help: IndexMap<KeyEvent, HelpCommand>,
}

impl Default for KeyBindings {
    #[rustfmt::skip]
    fn default() -> Self {
        let mut general = IndexMap::new();
        let mut help = IndexMap::new();

        macro_rules! insert_binding {
            ($map: expr, $key: expr, $command: expr) => {
                if let Ok(key) = parse_binding($key) {
                    $map.insert(key, $command);
                }
            };
        }

        insert_binding!(general, "j", Command::ScrollDown);
        insert_binding!(general, "down", Command::ScrollDown);
        insert_binding!(general, "k", Command::ScrollUp);
        insert_binding!(general, "up", Command::ScrollUp);
        insert_binding!(general, "ctrl-d", Command::HalfPageDown);
        insert_binding!(general, "ctrl-u", Command::HalfPageUp);
        insert_binding!(general, "ctrl-f", Command::PageDown);
        insert_binding!(general, "pagedown", Command::PageDown);
        insert_binding!(general, "space", Command::PageDown);
        insert_binding!(general, "ctrl-b", Command::PageUp);
        insert_binding!(general, "pageup", Command::PageUp);
        insert_binding!(general, "g", Command::GoToTop);
        insert_binding!(general, "home", Command::GoToTop);
        insert_binding!(general, "G", Command::GoToBottom);
        insert_binding!(general, "end", Command::GoToBottom);
        insert_binding!(general, "i", Command::Compose);
        insert_binding!(general, "/", Command::EnterSearch);
        insert_binding!(general, "n", Command::RepeatLastSearch);
        insert_binding!(general, "N", Command::RepeatLastSearchBackward);
        insert_binding!(general, "s", Command::ToggleScrollbar);
        insert_binding!(general, "?", Command::ToggleHelp);
        insert_binding!(general, "f1", Command::ToggleHelp);
        insert_binding!(general, "q", Command::Quit);
        insert_binding!(general, "ctrl-c", Command::Quit);

        insert_binding!(help, "ctrl-y", HelpCommand::ScrollUp);
        insert_binding!(help, "ctrl-e", HelpCommand::ScrollDown);
        insert_binding!(help, "g", HelpCommand::GoToTop);
        insert_binding!(help, "G", HelpCommand::GoToBottom);
        insert_binding!(help, "esc", HelpCommand::Abort);

        Self { general, help }
    }
}

fn set_bindings<'a, T, E>(
    key_bindings: &mut IndexMap<KeyEvent, T>,
    user_key_bindings: &'a HashMap<String, String>,
) -> Result<(), anyhow::Error>
where
    T: TryFrom<&'a str, Error = E>,
    E: Into<anyhow::Error>,
{
    for (bindings, command) in user_key_bindings {
        for binding in bindings.split_whitespace() {
            let binding = parse_binding(binding)
                .with_context(|| format!("Error: failed to parse binding \"{binding}\""))?;
            if command.is_empty() {
                key_bindings.swap_remove(&binding);
            } else {
                key_bindings.insert(
                    binding,
                    T::try_from(command.as_str())
                        .map_err(Into::into)
                        .with_context(|| format!("Error: failed to parse command \"{command}\""))?,
                );
            }
        }
    }

    Ok(())
}

impl TryFrom<UserKeyBindings> for KeyBindings {
    type Error = anyhow::Error;

    fn try_from(user_key_bindings: UserKeyBindings) -> Result<Self, Self::Error> {
        let mut key_bindings = KeyBindings::default();

        if let Some(bindings) = user_key_bindings.general {
            set_bindings(&mut key_bindings.general, &bindings)?;
        }

        if let Some(bindings) = user_key_bindings.help {
            set_bindings(&mut key_bindings.help, &bindings)?;
        }

        Ok(key_bindings)
    }
}

impl Deref for KeyBindings {
    type Target = IndexMap<KeyEvent, Command>;

    fn deref(&self) -> &Self::Target {
        &self.general
    }
}

impl DerefMut for KeyBindings {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.general
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyBindings, UserKeyBindings, binding_to_string, parse_binding};
    use crate::commands::Command;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn bindings() {
        assert_eq!(
            parse_binding("j").unwrap(),
            KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE)
        );
        assert_eq!(
            parse_binding("ctrl-shift-f5").unwrap(),
            KeyEvent::new(KeyCode::F(5), KeyModifiers::CONTROL | KeyModifiers::SHIFT)
        );
        assert_eq!(
            parse_binding("-").unwrap(),
            KeyEvent::new(KeyCode::Char('-'), KeyModifiers::NONE)
        );
        assert_eq!(
            parse_binding("alt--").unwrap(),
            KeyEvent::new(KeyCode::Char('-'), KeyModifiers::ALT)
        );

        assert!(parse_binding("hyper-j").is_err());
        assert!(parse_binding("ctrl-").is_err());
        assert!(parse_binding("pgdn").is_err());
    }

    #[test]
    fn bindings_print_back() {
        for binding in ["j", "G", "ctrl-d", "space", "alt-pagedown", "ctrl-shift-f5", "-", "esc"] {
            assert_eq!(binding_to_string(&parse_binding(binding).unwrap()), binding);
        }

        assert_eq!(binding_to_string(&parse_binding("escape").unwrap()), "esc");
    }

    #[test]
    fn every_default_binding_parses() {
        let bindings = KeyBindings::default();

        assert_eq!(bindings.general.len(), 24);
        assert_eq!(bindings.help.len(), 5);
    }

    #[test]
    fn user_bindings_override_and_unbind() {
        let user_bindings: UserKeyBindings = toml::from_str(
            r#"
"ctrl-n" = "scroll_down"
"q" = ""
"#,
        )
        .unwrap();
        let bindings = KeyBindings::try_from(user_bindings).unwrap();

        assert_eq!(
            bindings.get(&parse_binding("ctrl-n").unwrap()),
            Some(&Command::ScrollDown)
        );
        assert_eq!(bindings.get(&parse_binding("q").unwrap()), None);
    }

    #[test]
    fn unknown_command_is_an_error() {
        let user_bindings: UserKeyBindings = toml::from_str(r#""x" = "explode""#).unwrap();

        assert!(KeyBindings::try_from(user_bindings).is_err());
    }
}
