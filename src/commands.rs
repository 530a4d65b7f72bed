#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Command {
    ScrollDown,
    ScrollUp,
    HalfPageDown,
    HalfPageUp,
    PageDown,
    PageUp,
    GoToTop,
    GoToBottom,
    Compose,
    EnterSearch,
    RepeatLastSearch,
    RepeatLastSearchBackward,
    ToggleScrollbar,
    ToggleHelp,
    Quit,
}

impl TryFrom<&str> for Command {
    type Error = anyhow::Error;

    fn try_from(command: &str) -> Result<Self, Self::Error> {
        let command = match command {
            "scroll_down" => Command::ScrollDown,
            "scroll_up" => Command::ScrollUp,
            "half_page_down" => Command::HalfPageDown,
            "half_page_up" => Command::HalfPageUp,
            "page_down" => Command::PageDown,
            "page_up" => Command::PageUp,
            "go_to_top" => Command::GoToTop,
            "go_to_bottom" => Command::GoToBottom,
            "compose" => Command::Compose,
            "enter_search" => Command::EnterSearch,
            "repeat_last_search" => Command::RepeatLastSearch,
            "repeat_last_search_backward" => Command::RepeatLastSearchBackward,
            "toggle_scrollbar" => Command::ToggleScrollbar,
            "toggle_help" => Command::ToggleHelp,
            "quit" => Command::Quit,
            _ => anyhow::bail!("\"{}\" is an invalid command", command),
        };

        Ok(command)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum HelpCommand {
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,
    Abort,
}

impl TryFrom<&str> for HelpCommand {
    type Error = anyhow::Error;

    fn try_from(command: &str) -> Result<Self, Self::Error> {
        let command = match command {
            "scroll_up" => HelpCommand::ScrollUp,
            "scroll_down" => HelpCommand::ScrollDown,
            "go_to_top" => HelpCommand::GoToTop,
            "go_to_bottom" => HelpCommand::GoToBottom,
            "abort" => HelpCommand::Abort,
            _ => anyhow::bail!("\"{}\" is an invalid command", command),
        };

        Ok(command)
    }
}
