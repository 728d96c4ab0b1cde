//! Background execution for scans, renames and undo passes.
//!
//! Long-running work runs on a small fixed-size pool; outcomes come back
//! over a channel so file-list and preview state are only ever touched
//! from the coordinating thread. Submissions past the pool width queue up
//! behind running jobs, and nothing here supports cancellation: an
//! in-flight job always runs to completion.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

use thiserror::Error;

use crate::executor::RenameReport;
use crate::oplog::OplogError;
use crate::scanner::ScannerError;
use crate::undo::UndoReport;

/// Fixed pool width
pub const WORKER_THREADS: usize = 4;

/// Result of one unit of background work
#[derive(Debug)]
pub enum TaskOutcome {
    Scan(Result<Vec<PathBuf>, ScannerError>),
    Rename(Result<RenameReport, OplogError>),
    Undo(Result<UndoReport, OplogError>),
}

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("Worker pool disconnected before delivering a result")]
    Disconnected,
}

/// A fixed-size worker pool with a single outcome channel back to the
/// submitting thread.
pub struct TaskPool {
    pool: rayon::ThreadPool,
    sender: Sender<TaskOutcome>,
    receiver: Receiver<TaskOutcome>,
}

impl TaskPool {
    pub fn new() -> Result<Self, TaskError> {
        Self::with_threads(WORKER_THREADS)
    }

    pub fn with_threads(threads: usize) -> Result<Self, TaskError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("eprename-worker-{}", i))
            .build()?;
        let (sender, receiver) = channel();

        Ok(Self {
            pool,
            sender,
            receiver,
        })
    }

    /// Run a job on the pool; its outcome is delivered to [`TaskPool::recv`].
    pub fn submit<F>(&self, job: F)
    where
        F: FnOnce() -> TaskOutcome + Send + 'static,
    {
        let sender = self.sender.clone();
        self.pool.spawn(move || {
            // The receiving side lives as long as the pool itself
            let _ = sender.send(job());
        });
    }

    /// Block until the next outcome arrives.
    pub fn recv(&self) -> Result<TaskOutcome, TaskError> {
        self.receiver.recv().map_err(|_| TaskError::Disconnected)
    }
}
