//! Bounded-concurrency worker pool
//!
//! A [`Pool`] owns a batch of [`Task`]s and runs them with exactly `concurrency`
//! workers pulling from a single-slot hand-off channel. Every task runs to completion:
//! a failing task never cancels the others. Outcomes come back in submission order, so
//! [`merge`] can rebuild page order no matter which worker finished first.

mod merge;
mod task;

pub use merge::merge;
pub use task::Task;

use crate::error::{Error, Result};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::debug;

/// Runs a batch of tasks at a fixed concurrency
pub struct Pool<T> {
    tasks: Vec<Task<T>>,
    concurrency: usize,
}

impl<T: Send + 'static> Pool<T> {
    /// Create a pool; a concurrency of 0 is treated as 1
    pub fn new(tasks: Vec<Task<T>>, concurrency: usize) -> Self {
        Self {
            tasks,
            concurrency: concurrency.max(1),
        }
    }

    /// Number of tasks in the batch
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the batch is empty
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run every task and wait for all of them
    ///
    /// The returned vector has one outcome per task, at the task's submission index.
    pub async fn run(self) -> Vec<Result<T>> {
        let total = self.tasks.len();
        debug!(tasks = total, concurrency = self.concurrency, "starting pool");

        let (tx, rx) = mpsc::channel::<(usize, Task<T>)>(1);
        let rx = Arc::new(Mutex::new(rx));

        let mut workers = JoinSet::new();
        for _ in 0..self.concurrency {
            let rx = Arc::clone(&rx);
            workers.spawn(async move {
                let mut finished = Vec::new();
                loop {
                    let next = rx.lock().await.recv().await;
                    let Some((index, task)) = next else {
                        break;
                    };
                    finished.push((index, task.run().await));
                }
                finished
            });
        }

        for (index, task) in self.tasks.into_iter().enumerate() {
            if tx.send((index, task)).await.is_err() {
                break;
            }
        }
        // closing the channel lets idle workers exit
        drop(tx);

        let mut slots: Vec<Option<Result<T>>> = (0..total).map(|_| None).collect();
        let mut worker_failure = None;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(finished) => {
                    for (index, outcome) in finished {
                        slots[index] = Some(outcome);
                    }
                }
                Err(e) => worker_failure = Some(e.to_string()),
            }
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    Err(Error::WorkerFailed(match &worker_failure {
                        Some(reason) => format!("task {index} lost: {reason}"),
                        None => format!("task {index} never ran"),
                    }))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Tasks whose latency decreases with their index, so later pages finish first.
    fn reversed_latency_tasks(count: usize) -> Vec<Task<Vec<usize>>> {
        (0..count)
            .map(|page| {
                Task::new(move || async move {
                    let delay = (count - page) as u64 * 3;
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    Ok(vec![page * 10, page * 10 + 1])
                })
            })
            .collect()
    }

    #[tokio::test]
    async fn outcomes_follow_submission_order() {
        let outcomes = Pool::new(reversed_latency_tasks(8), 8).run().await;

        let pages: Vec<Vec<usize>> = outcomes
            .into_iter()
            .map(|o| o.expect("every task succeeds"))
            .collect();
        assert_eq!(pages.len(), 8);
        for (page, records) in pages.iter().enumerate() {
            assert_eq!(records, &vec![page * 10, page * 10 + 1]);
        }
    }

    #[tokio::test]
    async fn sequential_and_parallel_runs_merge_identically() {
        let sequential = merge(
            vec![usize::MAX],
            Pool::new(reversed_latency_tasks(12), 1).run().await,
        )
        .expect("sequential merge");
        let parallel = merge(
            vec![usize::MAX],
            Pool::new(reversed_latency_tasks(12), 20).run().await,
        )
        .expect("parallel merge");

        assert_eq!(sequential, parallel);
        assert_eq!(sequential.len(), 1 + 12 * 2);
    }

    #[tokio::test]
    async fn never_exceeds_the_concurrency_limit() {
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let tasks = (0..30)
            .map(|_| {
                let running = Arc::clone(&running);
                let peak = Arc::clone(&peak);
                Task::new(move || async move {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    running.fetch_sub(1, Ordering::SeqCst);
                    Ok(())
                })
            })
            .collect();

        let outcomes = Pool::new(tasks, 4).run().await;

        assert_eq!(outcomes.len(), 30);
        assert!(outcomes.iter().all(Result::is_ok));
        let peak = peak.load(Ordering::SeqCst);
        assert!(peak <= 4, "peak concurrency {peak} exceeds limit");
        assert!(peak >= 2, "tasks should overlap, peak was {peak}");
    }

    #[tokio::test]
    async fn a_failing_task_cancels_nothing() {
        let completed = Arc::new(AtomicUsize::new(0));

        let tasks = (0..10)
            .map(|i| {
                let completed = Arc::clone(&completed);
                Task::new(move || async move {
                    if i == 0 {
                        return Err(Error::HttpStatus {
                            status: 502,
                            url: format!("http://x/page-{}", i + 2),
                        });
                    }
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    completed.fetch_add(1, Ordering::SeqCst);
                    Ok(i)
                })
            })
            .collect();

        let outcomes = Pool::new(tasks, 3).run().await;

        assert_eq!(completed.load(Ordering::SeqCst), 9);
        assert!(matches!(outcomes[0], Err(Error::HttpStatus { status: 502, .. })));
        assert!(outcomes[1..].iter().all(Result::is_ok));
    }

    #[tokio::test]
    async fn panicking_task_is_reported_in_its_slot() {
        let tasks = (0..3)
            .map(|i| {
                Task::new(move || async move {
                    let pages = vec![0usize; 2];
                    Ok(pages[i])
                })
            })
            .collect::<Vec<_>>();

        let outcomes = Pool::new(tasks, 2).run().await;

        assert!(outcomes[0].is_ok());
        assert!(outcomes[1].is_ok());
        assert!(matches!(outcomes[2], Err(Error::TaskPanicked(_))));
    }

    #[tokio::test]
    async fn empty_batch_completes_immediately() {
        let pool: Pool<()> = Pool::new(Vec::new(), 20);
        assert!(pool.is_empty());
        assert!(pool.run().await.is_empty());
    }

    #[tokio::test]
    async fn zero_concurrency_still_runs_everything() {
        let pool = Pool::new(reversed_latency_tasks(3), 0);
        assert_eq!(pool.len(), 3);

        let outcomes = pool.run().await;
        assert!(outcomes.iter().all(Result::is_ok));
    }
}
