use crate::game::{Board, Player};

use super::depth::{AdaptiveDepth, DepthPolicy, FixedDepth, SearchHistory};
use super::minimax::Minimax;

/// Universal interface for the computer opponents.
pub trait Agent: Send {
    /// Select a column for `player` to play. `None` means no column is
    /// playable and the game is over.
    fn select_action(&mut self, board: &Board, player: Player) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// Searches run so far, for agents that search.
    fn history(&self) -> Option<&SearchHistory> {
        None
    }

    /// Forget anything carried over from a previous game.
    fn reset(&mut self) {}
}

/// Minimax agent whose ply budget comes from a [`DepthPolicy`].
pub struct MinimaxAgent {
    policy: Box<dyn DepthPolicy>,
    history: SearchHistory,
}

impl MinimaxAgent {
    pub fn new(policy: Box<dyn DepthPolicy>) -> Self {
        MinimaxAgent {
            policy,
            history: SearchHistory::new(),
        }
    }

    pub fn fixed(depth: usize) -> Self {
        Self::new(Box::new(FixedDepth(depth)))
    }

    pub fn adaptive() -> Self {
        Self::new(Box::new(AdaptiveDepth::default()))
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history = SearchHistory::with_capacity(capacity);
        self
    }

    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, board: &Board, player: Player) -> Option<usize> {
        let depth = self.policy.select_depth(&self.history);
        tracing::debug!(policy = self.policy.name(), depth, "selected search depth");

        let outcome = Minimax::new(player).search(board, depth);
        self.history.record(&outcome);
        outcome.best.column
    }

    fn name(&self) -> &str {
        "Minimax"
    }

    fn history(&self) -> Option<&SearchHistory> {
        Some(&self.history)
    }

    fn reset(&mut self) {
        self.history.clear();
    }
}
