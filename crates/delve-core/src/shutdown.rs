use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, error};

use crate::error::{Error, Result};

/// A shutdown signal that supports interruptible waits.
///
/// Unlike `thread::sleep()`, waits on this signal can be interrupted
/// immediately when shutdown is triggered.
pub struct ShutdownSignal {
    shutdown: AtomicBool,
    condvar: Condvar,
    mutex: Mutex<()>,
}

impl ShutdownSignal {
    /// Create a new shutdown signal in the non-shutdown state.
    pub fn new() -> Self {
        Self {
            shutdown: AtomicBool::new(false),
            condvar: Condvar::new(),
            mutex: Mutex::new(()),
        }
    }

    /// Trigger the shutdown signal, waking all waiting threads.
    pub fn trigger(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        let _guard = self.mutex.lock().unwrap_or_else(PoisonError::into_inner);
        self.condvar.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Wait for the specified duration or until shutdown is triggered.
    ///
    /// Returns `true` if shutdown was triggered, `false` if the wait completed normally.
    pub fn wait(&self, duration: Duration) -> bool {
        if self.is_shutdown() {
            return true;
        }

        let guard = self.mutex.lock().unwrap_or_else(PoisonError::into_inner);
        match self
            .condvar
            .wait_timeout_while(guard, duration, |_| !self.is_shutdown())
        {
            Ok((_, timeout_result)) => !timeout_result.timed_out(),
            // Mutex poisoned, treat as shutdown
            Err(_) => true,
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Named background thread that can be joined with a deadline.
///
/// The thread reports completion on a channel, so `join` can give up after a
/// timeout instead of blocking on `JoinHandle::join`.
pub struct Worker {
    name: &'static str,
    done: Receiver<()>,
    handle: JoinHandle<()>,
}

impl Worker {
    pub fn spawn<F>(name: &'static str, body: F) -> Result<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        let (tx, done) = mpsc::channel();
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                body();
                let _ = tx.send(());
            })?;
        debug!("Started worker {}", name);
        Ok(Self { name, done, handle })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Wait up to `timeout` for the thread to finish.
    ///
    /// On timeout the thread is detached and `WorkerJoinTimeout` is returned.
    /// A thread that panicked is reported as `WorkerPanicked`.
    pub fn join(self, timeout: Duration) -> Result<()> {
        match self.done.recv_timeout(timeout) {
            // Disconnected: the sender was dropped while the body unwound
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if self.handle.join().is_err() {
                    error!("Worker {} panicked", self.name);
                    return Err(Error::WorkerPanicked(self.name));
                }
                debug!("Stopped worker {}", self.name);
                Ok(())
            }
            Err(RecvTimeoutError::Timeout) => {
                error!(
                    "Worker {} did not stop within {:?}, detaching",
                    self.name, timeout
                );
                Err(Error::WorkerJoinTimeout(self.name))
            }
        }
    }
}
