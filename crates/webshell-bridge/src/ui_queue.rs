// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Deferred UI task queue.
//
// Bridge callbacks arrive on arbitrary threads. Anything that touches the
// WebView or the layout is pushed here and executed when the host's UI loop
// calls `pump()`. An optional waker lets the host schedule that pump (on
// Android: post a Runnable to the main Handler).

use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, trace};

use crate::traits::{UiTask, UiThread};

type Waker = Box<dyn Fn() + Send + Sync>;

/// FIFO of UI tasks, drained on the UI thread.
pub struct UiQueue {
    tx: Sender<UiTask>,
    rx: Mutex<Receiver<UiTask>>,
    waker: Option<Waker>,
}

impl UiQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx: Mutex::new(rx),
            waker: None,
        }
    }

    /// Queue that calls `waker` after every push.
    pub fn with_waker(waker: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            waker: Some(Box::new(waker)),
            ..Self::new()
        }
    }

    /// Run every queued task in submission order. Returns how many ran.
    ///
    /// Tasks queued while pumping run in the same pass. Must be called from
    /// the UI thread.
    pub fn pump(&self) -> usize {
        let mut ran = 0;
        loop {
            // Release the lock before running the task so it may enqueue more.
            let next = match self.rx.lock() {
                Ok(rx) => rx.try_recv().ok(),
                Err(poisoned) => poisoned.into_inner().try_recv().ok(),
            };
            let Some(task) = next else { break };
            task();
            ran += 1;
        }
        if ran > 0 {
            trace!(ran, "UI tasks pumped");
        }
        ran
    }
}

impl Default for UiQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl UiThread for UiQueue {
    fn run_on_ui_thread(&self, task: UiTask) {
        // The receiver lives in `self`, so the channel cannot be disconnected.
        if self.tx.send(task).is_err() {
            debug!("UI queue receiver gone, task dropped");
            return;
        }
        if let Some(waker) = &self.waker {
            waker();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn tasks_run_only_when_pumped() {
        let queue = UiQueue::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let h = hits.clone();
        queue.run_on_ui_thread(Box::new(move || {
            h.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        assert_eq!(queue.pump(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(queue.pump(), 0);
    }

    #[test]
    fn tasks_run_in_submission_order() {
        let queue = UiQueue::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..5 {
            let order = order.clone();
            queue.run_on_ui_thread(Box::new(move || order.lock().unwrap().push(i)));
        }
        queue.pump();
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn tasks_from_other_threads_are_delivered() {
        let queue = Arc::new(UiQueue::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let queue = queue.clone();
                let hits = hits.clone();
                std::thread::spawn(move || {
                    queue.run_on_ui_thread(Box::new(move || {
                        hits.fetch_add(1, Ordering::SeqCst);
                    }));
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(queue.pump(), 4);
        assert_eq!(hits.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn waker_fires_per_task() {
        let wakes = Arc::new(AtomicUsize::new(0));
        let w = wakes.clone();
        let queue = UiQueue::with_waker(move || {
            w.fetch_add(1, Ordering::SeqCst);
        });

        queue.run_on_ui_thread(Box::new(|| {}));
        queue.run_on_ui_thread(Box::new(|| {}));
        assert_eq!(wakes.load(Ordering::SeqCst), 2);
    }
}
