use crate::chat::ChatMessage;
use crossterm::event::Event as CrosstermEvent;

pub enum Event {
    Crossterm(CrosstermEvent),
    TranscriptChanged,
    Incoming(ChatMessage),
    ClearMessage,
}
