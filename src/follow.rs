//! Stick-to-bottom behavior for append-heavy lists.

/// Distance from the bottom edge under which an append pulls the viewport down.
pub const FOLLOW_THRESHOLD: f64 = 100.0;

/// Scroll geometry captured before an append is accounted for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_height: f64,
    pub scroll_offset: f64,
    pub container_height: f64,
}

impl ScrollMetrics {
    pub fn distance_from_bottom(&self) -> f64 {
        self.scroll_height - self.scroll_offset - self.container_height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowPolicy {
    threshold: f64,
}

impl Default for FollowPolicy {
    fn default() -> Self {
        Self {
            threshold: FOLLOW_THRESHOLD,
        }
    }
}

impl FollowPolicy {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn should_follow(&self, before_append: &ScrollMetrics) -> bool {
        before_append.distance_from_bottom() < self.threshold
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FollowState {
    #[default]
    Idle,
    /// An append arrived near the bottom; scroll to the bottom once the new
    /// item is laid out.
    Following,
}

#[derive(Debug, Default)]
pub struct AutoFollow {
    policy: FollowPolicy,
    state: FollowState,
}

impl AutoFollow {
    pub fn new(policy: FollowPolicy) -> Self {
        Self {
            policy,
            state: FollowState::Idle,
        }
    }

    pub fn state(&self) -> FollowState {
        self.state
    }

    /// Must be fed the metrics from before the appended items grew the scroll
    /// height, otherwise every append looks like it landed at the bottom.
    pub fn on_append(&mut self, before_append: &ScrollMetrics) -> FollowState {
        if self.policy.should_follow(before_append) {
            self.state = FollowState::Following;
        }

        tracing::debug!(
            distance_from_bottom = before_append.distance_from_bottom(),
            threshold = self.policy.threshold,
            following = self.state == FollowState::Following,
            "items appended"
        );

        self.state
    }

    /// Returns whether a scroll to the bottom is owed, going back to idle.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.state) == FollowState::Following
    }

    pub fn reset(&mut self) {
        self.state = FollowState::Idle;
    }
}
