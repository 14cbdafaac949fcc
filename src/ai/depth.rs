use std::collections::VecDeque;
use std::time::Duration;

use super::minimax::{SearchOutcome, SearchStats};

/// Record of recent searches, owned by whoever drives the search.
#[derive(Debug, Clone)]
pub struct SearchHistory {
    last: Option<SearchOutcome>,
    decision_times: VecDeque<Duration>,
    capacity: usize,
    total_searches: usize, // lifetime count, never capped
}

impl SearchHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        SearchHistory {
            last: None,
            decision_times: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            total_searches: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record(&mut self, outcome: &SearchOutcome) {
        self.total_searches += 1;
        self.last = Some(*outcome);
        self.decision_times.push_back(outcome.elapsed);
        if self.decision_times.len() > self.capacity {
            self.decision_times.pop_front();
        }
    }

    /// Most recent search, if any.
    pub fn last(&self) -> Option<&SearchOutcome> {
        self.last.as_ref()
    }

    pub fn last_stats(&self) -> Option<&SearchStats> {
        self.last.as_ref().map(|outcome| &outcome.stats)
    }

    /// Decision times, oldest first.
    pub fn decision_times(&self) -> impl Iterator<Item = Duration> + '_ {
        self.decision_times.iter().copied()
    }

    pub fn average_decision_time(&self) -> Option<Duration> {
        let n = self.decision_times.len();
        if n == 0 {
            return None;
        }
        let total: Duration = self.decision_times.iter().sum();
        Some(total / n as u32)
    }

    pub fn total_searches(&self) -> usize {
        self.total_searches
    }

    pub fn clear(&mut self) {
        self.last = None;
        self.decision_times.clear();
    }
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Chooses the ply budget for the next search.
pub trait DepthPolicy: Send {
    fn select_depth(&self, history: &SearchHistory) -> usize;

    fn name(&self) -> &str;
}

/// Always search to the same depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDepth(pub usize);

impl DepthPolicy for FixedDepth {
    fn select_depth(&self, _history: &SearchHistory) -> usize {
        self.0
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Switch between two depths based on the last search.
///
/// Goes deep when the maximizer's mean node score trailed the minimizer's
/// (the position looked worse for us), shallow otherwise. The first search
/// goes deep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptiveDepth {
    pub shallow: usize,
    pub deep: usize,
}

impl Default for AdaptiveDepth {
    fn default() -> Self {
        AdaptiveDepth {
            shallow: 5,
            deep: 7,
        }
    }
}

impl DepthPolicy for AdaptiveDepth {
    fn select_depth(&self, history: &SearchHistory) -> usize {
        let Some(stats) = history.last_stats() else {
            return self.deep;
        };

        match (stats.maximizer_mean(), stats.minimizer_mean()) {
            (Some(ours), Some(theirs)) if ours < theirs => self.deep,
            _ => self.shallow,
        }
    }

    fn name(&self) -> &str {
        "adaptive"
    }
}
