use crate::event::Event;
use std::{ops::Deref, time::Duration};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

const ERROR_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Info,
    Error,
    Warning,
}

/// One-line notice shown in the footer until it times out or is replaced.
pub struct Status {
    text: String,
    pub kind: Kind,
    token: CancellationToken,
    tx: UnboundedSender<Event>,
}

impl Status {
    pub fn new(tx: UnboundedSender<Event>) -> Self {
        Status {
            text: String::new(),
            kind: Kind::Info,
            token: CancellationToken::new(),
            tx,
        }
    }

    pub fn set_info(&mut self, text: String) {
        self.token.cancel();

        if !text.is_empty() {
            self.text = text;
            self.kind = Kind::Info;
            self.token = CancellationToken::new();
        }
    }

    pub fn set_info_with_timeout(&mut self, text: String, duration: Duration) {
        self.set_info(text);
        self.clear_timeout(duration);
    }

    pub fn set_error(&mut self, text: String) {
        tracing::warn!(%text, "showing error");
        self.set_info(text);
        self.kind = Kind::Error;
        self.clear_timeout(ERROR_TIMEOUT);
    }

    pub fn set_warning(&mut self, text: String) {
        self.set_info(text);
        self.kind = Kind::Warning;
        self.clear_timeout(ERROR_TIMEOUT);
    }

    /// Shows the error chain of `result` if it failed.
    pub fn set_if_error<T>(&mut self, result: anyhow::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.set_error(format!("{e:#}"));
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.token.cancel();
    }

    fn clear_timeout(&mut self, duration: Duration) {
        let token = self.token.clone();
        let tx = self.tx.clone();

        tokio::task::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {},
                () = tokio::time::sleep(duration) => {
                    // receiver is gone once the app shuts down
                    let _ = tx.send(Event::ClearMessage);
                }
            }
        });
    }
}

impl Deref for Status {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::{Kind, Status};
    use crate::event::Event;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn timeout_sends_clear() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut status = Status::new(tx);

        status.set_info_with_timeout("saved".to_owned(), Duration::from_secs(2));
        assert_eq!(status.as_str(), "saved");

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(matches!(rx.try_recv(), Ok(Event::ClearMessage)));
    }

    #[tokio::test(start_paused = true)]
    async fn replacing_cancels_previous_timeout() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut status = Status::new(tx);

        status.set_info_with_timeout("first".to_owned(), Duration::from_secs(1));
        status.set_info("second".to_owned());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(status.as_str(), "second");
    }

    #[tokio::test]
    async fn errors_are_displayed() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut status = Status::new(tx);

        let value = status.set_if_error::<()>(Err(anyhow::anyhow!("disk full")));

        assert!(value.is_none());
        assert_eq!(status.kind, Kind::Error);
        assert_eq!(status.as_str(), "disk full");
    }
}
