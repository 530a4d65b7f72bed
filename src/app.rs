use crate::{
    chat::{Change, ChatMessage, Transcript, feed::Feed},
    config::{KEY_BINDINGS, OPTIONS},
    event::Event,
    follow::FollowPolicy,
    help::Help,
    input::{self, Input, Mode},
    search::{Direction, Search},
    status::Status,
    ui,
    viewport::Viewport,
    watcher::Watcher,
    window::LayoutParams,
};
use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, EventStream};
use futures::StreamExt;
use std::time::Duration;

const NOTICE_TIMEOUT: Duration = Duration::from_secs(3);
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

pub struct App {
    pub transcript: Transcript,
    pub viewport: Viewport,
    pub footer_input: Option<Input>,
    pub mode: Mode,
    pub help: Help,
    pub status: Status,
    pub search: Search,
    pub scrollbar: bool,
    /// Scroll offset to return to when a search is aborted.
    search_origin: f64,
    watcher: Option<Watcher>,
    feed: Option<CancellationToken>,
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
}

impl App {
    pub fn new(transcript: Transcript) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let layout = LayoutParams::rows(OPTIONS.item_height, OPTIONS.overscan);

        let mut app = Self {
            transcript,
            viewport: Viewport::new(layout).following(FollowPolicy::new(OPTIONS.follow_threshold)),
            footer_input: None,
            mode: Mode::Normal,
            help: Help::new(&KEY_BINDINGS),
            status: Status::new(tx.clone()),
            search: Search::default(),
            scrollbar: OPTIONS.scrollbar,
            search_origin: 0.0,
            watcher: None,
            feed: None,
            tx,
            rx,
        };

        if let Some(path) = app.transcript.path() {
            match Watcher::new(path, app.tx.clone()) {
                Ok(watcher) => app.watcher = Some(watcher),
                Err(e) => app
                    .status
                    .set_warning(format!("Live reload is off: {e:#}")),
            }
        }

        app
    }

    /// Starts a synthetic feed that appends a message every `interval`.
    pub fn with_feed(mut self, feed: Feed, interval: Duration) -> Self {
        self.feed = Some(feed.spawn(self.tx.clone(), interval));
        self
    }

    pub async fn run(mut self) -> Result<()> {
        let mut terminal = ui::init()?;
        let mut term_events = EventStream::new();

        tracing::info!(
            transcript = %self.transcript.name(),
            messages = self.transcript.len(),
            "viewer started"
        );

        let res = loop {
            if let Err(e) = terminal.draw(|f| ui::draw(f, &mut self)) {
                break Err(e.into());
            }

            let event = tokio::select! {
                Some(Ok(term_event)) = term_events.next() => Event::Crossterm(term_event),
                Some(event) = self.rx.recv() => event,
            };

            match event {
                Event::Crossterm(CrosstermEvent::Key(key)) => {
                    if input::handle_event(key, &mut self) {
                        break Ok(());
                    }
                }
                Event::Crossterm(CrosstermEvent::Mouse(mouse)) => {
                    input::handle_mouse_event(mouse, &mut self);
                }
                Event::Crossterm(_) => (),
                Event::Incoming(message) => self.on_incoming(message),
                Event::TranscriptChanged => self.on_transcript_changed(),
                Event::ClearMessage => self.status.clear(),
            }
        };

        if let Some(feed) = self.feed.take() {
            feed.cancel();
        }

        ui::restore();
        res
    }

    fn on_incoming(&mut self, message: ChatMessage) {
        let res = self.transcript.push(message);
        self.status.set_if_error(res);
    }

    pub fn on_transcript_changed(&mut self) {
        match self.transcript.reload() {
            Ok(Change::Replaced) => {
                tracing::info!("transcript rewritten, remounting");
                self.viewport.reset();
                self.search.invalidate();
                self.status
                    .set_info_with_timeout("Transcript was rewritten".to_owned(), NOTICE_TIMEOUT);
            }
            Ok(Change::Appended(_) | Change::Unchanged) => (),
            Err(e) => self.status.set_error(format!("{e:#}")),
        }
    }

    pub fn scroll_rows(&mut self, rows: f64) {
        let res = self.viewport.scroll_by(rows);
        self.status.set_if_error(res.map_err(Into::into));
    }

    pub fn scroll_messages(&mut self, count: f64) {
        self.scroll_rows(count * self.viewport.layout().item_height());
    }

    pub fn scroll_pages(&mut self, pages: f64) {
        let res = self.viewport.scroll_pages(pages);
        self.status.set_if_error(res.map_err(Into::into));
    }

    /// Index of the message at the top edge of the list.
    pub fn top_index(&self) -> usize {
        (self.viewport.scroll_offset() / self.viewport.layout().item_height()).floor() as usize
    }

    /// Messages lying entirely under the bottom edge of the list.
    pub fn below_count(&self) -> usize {
        let bottom_edge = self.viewport.scroll_offset() + self.viewport.container_height();
        let past_bottom = (bottom_edge / self.viewport.layout().item_height()).ceil() as usize;

        self.transcript.len().saturating_sub(past_bottom)
    }

    fn is_on_screen(&self, index: usize) -> bool {
        index >= self.top_index() && self.transcript.len() - index > self.below_count()
    }

    pub fn take_input(&mut self, mode: Mode) {
        if let Mode::Search(_) = mode {
            self.search_origin = self.viewport.scroll_offset();
        }

        self.footer_input = Some(Input::from(&mode));
        self.mode = mode;
        self.status.clear();
    }

    pub fn extract_input(&mut self) -> String {
        self.mode = Mode::Normal;
        self.footer_input
            .take()
            .map(|input| input.text)
            .unwrap_or_default()
    }

    pub fn abort_input(&mut self) {
        self.mode = Mode::Normal;
        self.footer_input = None;
    }

    pub fn send_composed(&mut self) -> Result<()> {
        let text = self.extract_input();

        if text.trim().is_empty() {
            return Ok(());
        }

        self.transcript
            .push(ChatMessage::new(&OPTIONS.author, text.trim()))?;

        // own messages always land in view
        self.viewport.observe_item_count(self.transcript.len());
        self.viewport.settle();
        self.viewport.scroll_to_bottom();

        Ok(())
    }

    fn jump_to(&mut self, index: usize) {
        self.viewport.observe_item_count(self.transcript.len());
        self.viewport.settle();
        self.viewport.scroll_to_index(index);
    }

    fn search_origin_index(&self) -> usize {
        (self.search_origin / self.viewport.layout().item_height()).floor() as usize
    }

    /// Moves to the first match at or after where the search started.
    pub fn preview_search(&mut self, query: &str) {
        self.search.set_query(query);
        self.search.update(&self.transcript.messages);

        let origin = self.search_origin_index();
        let target = if self.search.is_match(origin) {
            Some(origin)
        } else {
            self.search.next_from(origin, Direction::Forward)
        };

        self.search.current = target;

        match target {
            Some(index) => self.jump_to(index),
            None => self.restore_search_origin(),
        }
    }

    pub fn complete_search(&mut self) {
        let direction = match self.mode {
            Mode::Search(direction) => direction,
            _ => Direction::Forward,
        };
        let query = self.extract_input();

        if query.trim().is_empty() {
            return;
        }

        self.search = Search::new(&query, direction);
        self.preview_search(&query);

        if self.search.matches.is_empty() {
            self.status.set_warning(format!("Pattern not found: {query}"));
        }
    }

    pub fn abort_search(&mut self) {
        self.abort_input();
        self.restore_search_origin();
    }

    fn restore_search_origin(&mut self) {
        let res = self.viewport.scroll_to(self.search_origin);
        self.status.set_if_error(res.map_err(Into::into));
    }

    pub fn repeat_search(&mut self, reverse: bool) {
        if self.search.is_empty() {
            self.status.set_warning("No previous search".to_owned());
            return;
        }

        self.search.update(&self.transcript.messages);

        let direction = if reverse {
            self.search.direction.reverse()
        } else {
            self.search.direction
        };

        // near the bottom the match can't reach the top edge, so resume from
        // the match itself while it's still in view
        let from = match self.search.current {
            Some(current) if current < self.transcript.len() && self.is_on_screen(current) => {
                current
            }
            _ => self.top_index(),
        };

        match self.search.next_from(from, direction) {
            Some(index) => {
                self.search.current = Some(index);
                self.jump_to(index);
            }
            None => self
                .status
                .set_warning(format!("Pattern not found: {}", self.search.query)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::App;
    use crate::{
        chat::{ChatMessage, Transcript},
        config::SKIP_CONFIG,
        input::Mode,
        search::Direction,
    };

    fn app_with(messages: Vec<ChatMessage>) -> App {
        SKIP_CONFIG.call_once(|| ());

        let mut app = App::new(Transcript::in_memory(messages));
        let count = app.transcript.len();

        app.viewport.resize(10.0).unwrap();
        app.viewport.observe_item_count(count);
        app.viewport.settle();

        app
    }

    fn chatter(count: usize) -> Vec<ChatMessage> {
        (0..count)
            .map(|idx| {
                if idx % 10 == 3 {
                    ChatMessage::new("ada", "lunch anyone?")
                } else {
                    ChatMessage::new("lin", "studying")
                }
            })
            .collect()
    }

    #[tokio::test]
    async fn opens_at_the_newest_message() {
        let app = app_with(chatter(50));

        assert!(app.viewport.is_at_bottom());
        assert_eq!(app.top_index(), 45);
    }

    #[tokio::test]
    async fn composing_jumps_to_bottom() {
        let mut app = app_with(chatter(50));
        app.viewport.scroll_to_top();

        app.take_input(Mode::Compose);
        if let Some(input) = &mut app.footer_input {
            input.set_text("  on my way ");
        }
        app.send_composed().unwrap();

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.transcript.len(), 51);
        assert_eq!(app.transcript.messages[50].body, "on my way");
        assert!(app.viewport.is_at_bottom());
    }

    #[tokio::test]
    async fn blank_compose_is_dropped() {
        let mut app = app_with(chatter(5));

        app.take_input(Mode::Compose);
        app.send_composed().unwrap();

        assert_eq!(app.transcript.len(), 5);
    }

    #[tokio::test]
    async fn search_walks_through_matches() {
        let mut app = app_with(chatter(50));
        app.viewport.scroll_to_top();

        app.take_input(Mode::Search(Direction::Forward));
        if let Some(input) = &mut app.footer_input {
            input.set_text("lunch");
        }
        app.complete_search();
        assert_eq!(app.top_index(), 3);

        app.repeat_search(false);
        assert_eq!(app.top_index(), 13);

        app.repeat_search(true);
        app.repeat_search(true);
        assert_eq!(app.top_index(), 43);
    }

    #[tokio::test]
    async fn repeat_search_reaches_matches_in_the_last_screen() {
        let mut messages = chatter(50);
        for message in &mut messages {
            message.body = "studying".to_owned();
        }
        messages[47].body = "lunch?".to_owned();
        messages[48].body = "lunch!".to_owned();

        let mut app = app_with(messages);
        app.viewport.scroll_to_top();

        app.take_input(Mode::Search(Direction::Forward));
        if let Some(input) = &mut app.footer_input {
            input.set_text("lunch");
        }
        app.complete_search();
        assert_eq!(app.search.current, Some(47));
        assert_eq!(app.top_index(), 45);

        let mut visited = Vec::new();
        for _ in 0..3 {
            app.repeat_search(false);
            visited.push(app.search.current);
        }
        assert_eq!(visited, vec![Some(48), Some(47), Some(48)]);

        app.repeat_search(true);
        assert_eq!(app.search.current, Some(47));
        assert!(app.viewport.is_at_bottom());
    }

    #[tokio::test]
    async fn repeat_search_resumes_from_view_after_scrolling_away() {
        let mut app = app_with(chatter(50));
        app.viewport.scroll_to_top();

        app.take_input(Mode::Search(Direction::Forward));
        if let Some(input) = &mut app.footer_input {
            input.set_text("lunch");
        }
        app.complete_search();
        assert_eq!(app.search.current, Some(3));

        app.viewport.scroll_to_index(30);
        app.repeat_search(false);

        assert_eq!(app.search.current, Some(33));
        assert_eq!(app.top_index(), 33);
    }

    #[tokio::test]
    async fn counts_messages_below_the_screen() {
        let mut app = app_with(chatter(50));
        assert_eq!(app.below_count(), 0);

        app.viewport.scroll_to_top();
        assert_eq!(app.below_count(), 45);

        app.scroll_rows(1.0);
        assert_eq!(app.below_count(), 44);
    }

    #[tokio::test]
    async fn aborted_search_restores_position() {
        let mut app = app_with(chatter(50));
        app.viewport.scroll_to_index(20);

        app.take_input(Mode::Search(Direction::Forward));
        app.preview_search("lunch");
        assert_eq!(app.top_index(), 23);

        app.abort_search();
        assert_eq!(app.top_index(), 20);
        assert_eq!(app.mode, Mode::Normal);
    }

    #[tokio::test]
    async fn missing_pattern_warns() {
        let mut app = app_with(chatter(5));

        app.take_input(Mode::Search(Direction::Forward));
        if let Some(input) = &mut app.footer_input {
            input.set_text("zzz");
        }
        app.complete_search();

        assert!(app.status.starts_with("Pattern not found"));
    }

    #[tokio::test]
    async fn rewritten_transcript_remounts() {
        SKIP_CONFIG.call_once(|| ());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat.toml");
        let mut transcript = Transcript::load(&path).unwrap();
        for message in chatter(3) {
            transcript.push(message).unwrap();
        }

        let mut app = App::new(Transcript::load(&path).unwrap());
        app.viewport.resize(10.0).unwrap();
        app.viewport.observe_item_count(3);

        std::fs::write(
            &path,
            "[[messages]]\nauthor = \"sam\"\nbody = \"fresh start\"\n",
        )
        .unwrap();

        app.on_transcript_changed();

        assert_eq!(app.transcript.messages, vec![ChatMessage::new("sam", "fresh start")]);
        assert_eq!(app.viewport.item_count(), 0);
        assert_eq!(*app.status, "Transcript was rewritten");
    }
}
