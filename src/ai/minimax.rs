use std::time::{Duration, Instant};

use crate::game::{Board, Player, Score, COLS};

/// Best column found at a node, and the score it guarantees.
///
/// `column` is `None` at the recursion base case (depth exhausted or board
/// full), and at the root it means there is no move left to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub column: Option<usize>,
    pub score: Score,
}

/// Node counts and evaluation totals gathered during one search.
///
/// Every node is evaluated once; the score is attributed to the side whose
/// layer produced the node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub maximizer_nodes: u64,
    pub maximizer_total: i64,
    pub minimizer_nodes: u64,
    pub minimizer_total: i64,
}

impl SearchStats {
    fn record(&mut self, layer: Layer, score: Score) {
        self.nodes += 1;
        match layer {
            Layer::Max => {
                self.maximizer_nodes += 1;
                self.maximizer_total += i64::from(score);
            }
            Layer::Min => {
                self.minimizer_nodes += 1;
                self.minimizer_total += i64::from(score);
            }
        }
    }

    /// Mean evaluation over maximize-layer nodes.
    pub fn maximizer_mean(&self) -> Option<f64> {
        mean(self.maximizer_total, self.maximizer_nodes)
    }

    /// Mean evaluation over minimize-layer nodes.
    pub fn minimizer_mean(&self) -> Option<f64> {
        mean(self.minimizer_total, self.minimizer_nodes)
    }
}

fn mean(total: i64, count: u64) -> Option<f64> {
    (count > 0).then(|| total as f64 / count as f64)
}

/// Everything a caller learns from one root search.
#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    pub best: SearchResult,
    pub depth: usize,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Max,
    Min,
}

impl Layer {
    fn next(self) -> Layer {
        match self {
            Layer::Max => Layer::Min,
            Layer::Min => Layer::Max,
        }
    }

    fn improves(self, candidate: Score, best: Score) -> bool {
        match self {
            Layer::Max => candidate > best,
            Layer::Min => candidate < best,
        }
    }
}

/// Depth-limited minimax without pruning.
///
/// Columns are tried in increasing order and only a strictly better score
/// replaces the current best, so ties always go to the lowest column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Minimax {
    maximizer: Player,
}

impl Minimax {
    pub fn new(maximizer: Player) -> Self {
        Minimax { maximizer }
    }

    /// Pick a column for the maximizer, or `None` if the board is full.
    pub fn choose_move(&self, board: &Board, depth: usize) -> Option<usize> {
        self.search(board, depth).best.column
    }

    /// Run a root search and report the result with its statistics.
    ///
    /// The root always looks at least one ply ahead, so a depth of 0 ranks
    /// each candidate by the evaluation of the position it creates.
    pub fn search(&self, board: &Board, depth: usize) -> SearchOutcome {
        let depth = depth.max(1);
        let start = Instant::now();
        let mut stats = SearchStats::default();

        let best = self.maximize(board, depth, &mut stats);
        let elapsed = start.elapsed();

        tracing::debug!(
            maximizer = self.maximizer.name(),
            depth,
            column = ?best.column,
            score = best.score,
            nodes = stats.nodes,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "search finished"
        );

        SearchOutcome {
            best,
            depth,
            stats,
            elapsed,
        }
    }

    /// The maximizer's layer: the column with the highest reachable score.
    pub fn maximize(&self, board: &Board, depth: usize, stats: &mut SearchStats) -> SearchResult {
        self.expand(board, depth, Layer::Max, stats)
    }

    /// The minimizer's layer: the column with the lowest reachable score.
    pub fn minimize(&self, board: &Board, depth: usize, stats: &mut SearchStats) -> SearchResult {
        self.expand(board, depth, Layer::Min, stats)
    }

    fn expand(
        &self,
        board: &Board,
        depth: usize,
        layer: Layer,
        stats: &mut SearchStats,
    ) -> SearchResult {
        let score = board.evaluate(self.maximizer);
        stats.record(layer, score);

        if board.is_full() || depth == 0 {
            return SearchResult {
                column: None,
                score,
            };
        }

        let mover = match layer {
            Layer::Max => self.maximizer,
            Layer::Min => self.maximizer.other(),
        };

        let mut best: Option<SearchResult> = None;
        for column in 0..COLS {
            let mut child = *board;
            if !child.try_drop(column, mover) {
                continue;
            }

            let reply = self.expand(&child, depth - 1, layer.next(), stats);
            if best.map_or(true, |b| layer.improves(reply.score, b.score)) {
                best = Some(SearchResult {
                    column: Some(column),
                    score: reply.score,
                });
            }
        }

        // A board that is not full always has a legal column
        best.unwrap_or(SearchResult {
            column: None,
            score,
        })
    }
}

impl Default for Minimax {
    fn default() -> Self {
        Minimax::new(Player::Ai)
    }
}
