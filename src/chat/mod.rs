use crate::utils;
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};

pub mod feed;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub author: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<String>,
}

impl ChatMessage {
    pub fn new(author: &str, body: &str) -> Self {
        Self {
            author: author.to_owned(),
            body: body.to_owned(),
            sent_at: None,
        }
    }

    pub fn with_time(mut self, sent_at: String) -> Self {
        self.sent_at = Some(sent_at);
        self
    }
}

impl Display for ChatMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.author, self.body)
    }
}

#[derive(Default, Deserialize, Serialize)]
struct TranscriptFile {
    #[serde(default)]
    messages: Vec<ChatMessage>,
}

/// How the history changed after a reload.
#[derive(Debug, PartialEq, Eq)]
pub enum Change {
    Unchanged,
    /// New messages were added at the tail.
    Appended(usize),
    /// The history was rewritten; positions into the old one are meaningless.
    Replaced,
}

/// An ordered chat history, oldest message first.
///
/// File-backed transcripts are TOML documents made of `[[messages]]` tables.
pub struct Transcript {
    pub messages: Vec<ChatMessage>,
    path: Option<PathBuf>,
}

impl Transcript {
    pub fn in_memory(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            path: None,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self {
            messages: read_messages(path)?,
            path: Some(path.to_owned()),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn name(&self) -> String {
        self.path
            .as_ref()
            .and_then(|path| path.file_stem())
            .map_or_else(|| "demo".to_owned(), |name| name.to_string_lossy().into_owned())
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Re-reads the backing file. In-memory transcripts never change here.
    pub fn reload(&mut self) -> Result<Change> {
        let Some(path) = &self.path else {
            return Ok(Change::Unchanged);
        };

        let messages = read_messages(path)?;
        let change = diff(&self.messages, &messages);

        tracing::debug!(path = %path.display(), ?change, "transcript reloaded");

        if change != Change::Unchanged {
            self.messages = messages;
        }

        Ok(change)
    }

    /// Adds a message at the tail, persisting it when file-backed.
    pub fn push(&mut self, message: ChatMessage) -> Result<()> {
        ensure!(!message.body.trim().is_empty(), "Message can't be empty.");

        // the history only grows once the file holds the message too
        if let Some(path) = &self.path {
            let mut messages = self.messages.clone();
            messages.push(message.clone());

            let content = toml::to_string(&TranscriptFile { messages })?;
            utils::write_atomic(path, content.as_bytes())
                .with_context(|| format!("Couldn't save {}", path.display()))?;
        }

        self.messages.push(message);
        Ok(())
    }
}

fn read_messages(path: &Path) -> Result<Vec<ChatMessage>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e).with_context(|| format!("Couldn't read {}", path.display())),
    };

    let file: TranscriptFile = toml::from_str(&content)
        .with_context(|| format!("{} is not a valid transcript", path.display()))?;

    Ok(file.messages)
}

fn diff(old: &[ChatMessage], new: &[ChatMessage]) -> Change {
    if new.len() >= old.len() && new.starts_with(old) {
        match new.len() - old.len() {
            0 => Change::Unchanged,
            count => Change::Appended(count),
        }
    } else {
        Change::Replaced
    }
}

#[cfg(test)]
mod tests {
    use super::{Change, ChatMessage, Transcript, diff};
    use std::fs;

    fn messages(bodies: &[&str]) -> Vec<ChatMessage> {
        bodies
            .iter()
            .map(|body| ChatMessage::new("ada", body))
            .collect()
    }

    #[test]
    fn diff_detects_tail_appends() {
        let old = messages(&["a", "b"]);

        assert_eq!(diff(&old, &messages(&["a", "b"])), Change::Unchanged);
        assert_eq!(diff(&old, &messages(&["a", "b", "c", "d"])), Change::Appended(2));
        assert_eq!(diff(&old, &messages(&["x", "a", "b"])), Change::Replaced);
        assert_eq!(diff(&old, &messages(&["a"])), Change::Replaced);
    }

    #[test]
    fn missing_file_is_an_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let transcript = Transcript::load(&dir.path().join("general.toml")).unwrap();

        assert!(transcript.is_empty());
        assert_eq!(transcript.name(), "general");
    }

    #[test]
    fn push_persists_and_reload_sees_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("general.toml");
        let mut transcript = Transcript::load(&path).unwrap();

        transcript.push(ChatMessage::new("ada", "hello")).unwrap();
        assert_eq!(transcript.reload().unwrap(), Change::Unchanged);

        let mut other = Transcript::load(&path).unwrap();
        other
            .push(ChatMessage::new("grace", "hi").with_time("09:41".to_owned()))
            .unwrap();

        assert_eq!(transcript.reload().unwrap(), Change::Appended(1));
        assert_eq!(transcript.messages[1].sent_at.as_deref(), Some("09:41"));
    }

    #[test]
    fn failed_save_keeps_history_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut transcript = Transcript::load(&dir.path().join("gone").join("chat.toml")).unwrap();

        assert!(transcript.push(ChatMessage::new("ada", "hello")).is_err());
        assert!(transcript.is_empty());
        assert_eq!(transcript.reload().unwrap(), Change::Unchanged);
    }

    #[test]
    fn reads_hand_written_transcripts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cs101.toml");
        fs::write(
            &path,
            r#"
[[messages]]
author = "ada"
body = "Is the lab open tonight?"
sent_at = "2026-10-12 18:02"

[[messages]]
author = "linus"
body = "Until ten."
"#,
        )
        .unwrap();

        let transcript = Transcript::load(&path).unwrap();

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages[1].to_string(), "linus: Until ten.");
        assert_eq!(transcript.messages[1].sent_at, None);
    }

    #[test]
    fn rejects_blank_messages() {
        let mut transcript = Transcript::in_memory(Vec::new());

        assert!(transcript.push(ChatMessage::new("ada", "   ")).is_err());
        assert!(transcript.is_empty());
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "messages = 3").unwrap();

        assert!(Transcript::load(&path).is_err());
    }
}
