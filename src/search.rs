use crate::chat::ChatMessage;
use nucleo_matcher::{
    Config, Matcher, Utf32String,
    pattern::{CaseMatching, Normalization, Pattern},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Fuzzy search over the `author: body` text of each message.
pub struct Search {
    pub query: String,
    pub direction: Direction,
    /// Indices of matching messages, ascending.
    pub matches: Vec<usize>,
    /// The match last jumped to, where `n` and `N` continue from.
    pub current: Option<usize>,
    pattern: Pattern,
    matcher: Matcher,
    searched: usize,
}

impl Default for Search {
    fn default() -> Self {
        Self {
            query: String::new(),
            direction: Direction::Forward,
            matches: Vec::new(),
            current: None,
            pattern: Pattern::default(),
            matcher: Matcher::new(Config::DEFAULT),
            searched: 0,
        }
    }
}

impl Search {
    pub fn new(query: &str, direction: Direction) -> Self {
        let mut search = Self::default();

        search.set_query(query);
        search.direction = direction;

        search
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_owned();
        self.pattern
            .reparse(query, CaseMatching::Smart, Normalization::Smart);
        self.invalidate();
    }

    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
    }

    /// Matches messages that arrived since the last call.
    pub fn update(&mut self, messages: &[ChatMessage]) {
        if self.searched > messages.len() {
            self.invalidate();
        }

        if self.is_empty() {
            self.searched = messages.len();
            return;
        }

        for (idx, message) in messages.iter().enumerate().skip(self.searched) {
            let haystack = Utf32String::from(message.to_string());

            if self
                .pattern
                .score(haystack.slice(..), &mut self.matcher)
                .is_some()
            {
                self.matches.push(idx);
            }
        }

        self.searched = messages.len();
    }

    /// Forgets every match so the next `update` starts over.
    pub fn invalidate(&mut self) {
        self.matches.clear();
        self.current = None;
        self.searched = 0;
    }

    pub fn is_match(&self, idx: usize) -> bool {
        self.matches.binary_search(&idx).is_ok()
    }

    /// The nearest match strictly past `from` in `direction`, wrapping around.
    pub fn next_from(&self, from: usize, direction: Direction) -> Option<usize> {
        let pivot = self.matches.partition_point(|&idx| idx <= from);

        match direction {
            Direction::Forward => self
                .matches
                .get(pivot)
                .or_else(|| self.matches.first())
                .copied(),
            Direction::Backward => {
                let before = self.matches.partition_point(|&idx| idx < from);

                before
                    .checked_sub(1)
                    .and_then(|idx| self.matches.get(idx))
                    .or_else(|| self.matches.last())
                    .copied()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Search};
    use crate::chat::ChatMessage;

    fn messages() -> Vec<ChatMessage> {
        vec![
            ChatMessage::new("ada", "lunch at noon?"),
            ChatMessage::new("lin", "library closes early"),
            ChatMessage::new("ada", "then lunch at one"),
            ChatMessage::new("sam", "ok"),
        ]
    }

    #[test]
    fn fuzzy_matches() {
        let mut search = Search::new("lnch", Direction::Forward);

        search.update(&messages());

        assert_eq!(search.matches, vec![0, 2]);
        assert!(search.is_match(2));
        assert!(!search.is_match(1));
    }

    #[test]
    fn matches_author() {
        let mut search = Search::new("sam", Direction::Forward);

        search.update(&messages());

        assert_eq!(search.matches, vec![3]);
    }

    #[test]
    fn smart_case() {
        let mut search = Search::new("Lunch", Direction::Forward);

        search.update(&messages());

        assert!(search.matches.is_empty());
    }

    #[test]
    fn update_is_incremental() {
        let mut messages = messages();
        let mut search = Search::new("lunch", Direction::Forward);

        search.update(&messages);
        messages.push(ChatMessage::new("lin", "lunch is fine"));
        search.update(&messages);

        assert_eq!(search.matches, vec![0, 2, 4]);

        messages.truncate(1);
        search.update(&messages);

        assert_eq!(search.matches, vec![0]);
    }

    #[test]
    fn current_match_is_forgotten_with_the_matches() {
        let mut messages = messages();
        let mut search = Search::new("lunch", Direction::Forward);
        search.update(&messages);
        search.current = Some(2);

        messages.truncate(1);
        search.update(&messages);
        assert_eq!(search.current, None);

        search.current = Some(0);
        search.set_query("library");
        assert_eq!(search.current, None);
    }

    #[test]
    fn next_wraps_around() {
        let mut search = Search::new("lunch", Direction::Forward);
        search.update(&messages());

        assert_eq!(search.next_from(0, Direction::Forward), Some(2));
        assert_eq!(search.next_from(2, Direction::Forward), Some(0));
        assert_eq!(search.next_from(2, Direction::Backward), Some(0));
        assert_eq!(search.next_from(0, Direction::Backward), Some(2));
        assert_eq!(search.next_from(1, Direction::Backward), Some(0));
    }

    #[test]
    fn empty_query_matches_nothing() {
        let mut search = Search::new("  ", Direction::Forward);
        search.update(&messages());

        assert!(search.is_empty());
        assert_eq!(search.next_from(0, Direction::Forward), None);
    }
}
