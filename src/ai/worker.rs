use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::error::WorkerError;
use crate::game::{Board, Player};

use super::agent::Agent;

/// The agent handed back by a finished search, with the column it picked.
pub struct SearchReply {
    pub agent: Box<dyn Agent>,
    pub column: Option<usize>,
}

/// One AI turn running on a background thread.
///
/// The agent moves onto the thread together with a copy of the board and
/// comes back in the [`SearchReply`], so no state is shared while it runs.
pub struct SearchWorker {
    rx: Receiver<SearchReply>,
}

impl SearchWorker {
    pub fn spawn(mut agent: Box<dyn Agent>, board: Board, player: Player) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let column = agent.select_action(&board, player);
            // The receiver may have been dropped by a restart; nothing to do then
            let _ = tx.send(SearchReply { agent, column });
        });
        SearchWorker { rx }
    }

    /// Non-blocking check for the reply.
    pub fn try_recv(&self) -> Result<Option<SearchReply>, WorkerError> {
        match self.rx.try_recv() {
            Ok(reply) => Ok(Some(reply)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(WorkerError::Disconnected),
        }
    }

    /// Block until the reply arrives or `timeout` passes.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<SearchReply, WorkerError> {
        self.rx.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => WorkerError::Timeout(timeout),
            RecvTimeoutError::Disconnected => WorkerError::Disconnected,
        })
    }
}
