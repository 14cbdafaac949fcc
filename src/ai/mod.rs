//! Computer opponents: the minimax search engine, depth policies, and the
//! agents and background worker that put them in front of the game loop.

mod agent;
pub mod depth;
pub mod minimax;
mod random;
pub mod worker;

pub use agent::{Agent, MinimaxAgent};
pub use depth::{AdaptiveDepth, DepthPolicy, FixedDepth, SearchHistory};
pub use minimax::{Minimax, SearchOutcome, SearchResult, SearchStats};
pub use random::RandomAgent;
pub use worker::{SearchReply, SearchWorker};
