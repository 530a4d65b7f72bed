use crate::event::Event;
use anyhow::{Context, Result};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedSender;

/// Reports changes to a transcript file made by other programs.
///
/// The parent directory is watched instead of the file itself so that editors
/// replacing the file through a rename are still noticed.
pub struct Watcher {
    inner: RecommendedWatcher,
    dir: PathBuf,
}

impl Watcher {
    pub fn new(transcript: &Path, tx: UnboundedSender<Event>) -> Result<Self> {
        let target = std::path::absolute(transcript)?;
        let dir = target
            .parent()
            .with_context(|| format!("{} has no parent directory", target.display()))?
            .to_owned();
        let file_name = target.file_name().map(ToOwned::to_owned);

        let mut inner =
            notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
                let event = match res {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::warn!("file watcher error: {e}");
                        return;
                    }
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => (),
                    _ => return,
                }

                if event
                    .paths
                    .iter()
                    .any(|path| path.file_name().map(ToOwned::to_owned) == file_name)
                {
                    let _ = tx.send(Event::TranscriptChanged);
                }
            })?;

        inner
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Error: couldn't watch {}", dir.display()))?;
        tracing::debug!(dir = %dir.display(), "watching transcript directory");

        Ok(Self { inner, dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        let _ = self.inner.unwatch(&self.dir);
    }
}

#[cfg(test)]
mod tests {
    use super::Watcher;
    use crate::event::Event;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn reports_writes_to_the_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.toml");
        std::fs::write(&path, "").unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let watcher = Watcher::new(&path, tx).unwrap();
        assert_eq!(watcher.dir(), dir.path());

        std::fs::write(&path, "[[messages]]\nauthor = \"a\"\nbody = \"b\"\n").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap();
        assert!(matches!(event, Some(Event::TranscriptChanged)));
    }
}
