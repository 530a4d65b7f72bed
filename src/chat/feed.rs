//! Synthetic campus chatter for the `demo` subcommand.

use super::ChatMessage;
use crate::event::Event;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

const AUTHORS: [&str; 8] = [
    "ada", "grace", "linus", "barbara", "ken", "margaret", "dennis", "frances",
];

const SNIPPETS: [&str; 12] = [
    "anyone at the library?",
    "the 9am lecture moved to room 204",
    "who has the notes from Tuesday",
    "study group tonight at 7",
    "dining hall is serving pho again",
    "lab report due friday, not thursday",
    "lost a blue umbrella near the quad",
    "office hours are cancelled this week",
    "does anyone know the wifi password for the annex",
    "shuttle is running late",
    "club fair starts at noon",
    "can someone share the problem set link",
];

pub struct Feed {
    rng: fastrand::Rng,
    sequence: usize,
}

impl Feed {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            sequence: 0,
        }
    }

    pub fn history(&mut self, count: usize) -> Vec<ChatMessage> {
        std::iter::repeat_with(|| self.next_message())
            .take(count)
            .collect()
    }

    pub fn next_message(&mut self) -> ChatMessage {
        let author = AUTHORS[self.rng.usize(..AUTHORS.len())];
        let snippet = SNIPPETS[self.rng.usize(..SNIPPETS.len())];
        let minutes = self.sequence;
        self.sequence += 1;

        ChatMessage::new(author, snippet).with_time(format!(
            "{:02}:{:02}",
            (minutes / 60) % 24,
            minutes % 60
        ))
    }

    /// Sends one message every `interval` until the returned token is
    /// cancelled.
    pub fn spawn(mut self, tx: UnboundedSender<Event>, interval: Duration) -> CancellationToken {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        tokio::task::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;

            loop {
                tokio::select! {
                    () = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        if tx.send(Event::Incoming(self.next_message())).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        token
    }
}
