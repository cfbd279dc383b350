//! Periodic background workers with a cooperative shutdown.
//!
//! Each task runs on its own thread and sleeps on an mpsc channel, so
//! `stop()` wakes it immediately instead of waiting out the interval.
//! A task returns the delay until its next run, which lets the surge
//! worker re-randomize its interval every iteration.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

struct Worker {
    name: String,
    stop_tx: mpsc::Sender<()>,
    handle: JoinHandle<()>,
}

#[derive(Default)]
pub struct Scheduler {
    workers: Vec<Worker>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a named worker. It waits `initial_delay`, then loops:
    /// run `task`, wait however long the task asked for.
    pub fn spawn<F>(&mut self, name: &str, initial_delay: Duration, mut task: F)
    where
        F: FnMut() -> Duration + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let thread_name = name.to_string();
        let handle = thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || {
                let mut delay = initial_delay;
                loop {
                    match stop_rx.recv_timeout(delay) {
                        Err(RecvTimeoutError::Timeout) => {}
                        // A stop signal or a dropped scheduler both end
                        // the worker.
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                    delay = task();
                }
                log::debug!("worker '{thread_name}' stopped");
            })
            .expect("spawn scheduler worker thread");
        self.workers.push(Worker { name: name.to_string(), stop_tx, handle });
    }

    /// Signal every worker and join them all.
    pub fn stop(self) {
        for worker in &self.workers {
            // A worker that already exited has dropped its receiver.
            let _ = worker.stop_tx.send(());
        }
        for worker in self.workers {
            if worker.handle.join().is_err() {
                log::error!("worker '{}' panicked", worker.name);
            }
        }
    }
}
