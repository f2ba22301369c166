//! Background task dispatch
//!
//! [`Dispatcher::dispatch`] returns as soon as the task is spawned. The spawned task
//! runs the processor and reports the outcome exactly once. Spawned tasks are tracked
//! so shutdown can wait for them with [`Dispatcher::drain`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tracing::Instrument;

use filefacts_core::models::{TaskOutcome, TaskRequest};

use crate::context::OutcomeReporter;
use crate::processor::TaskProcessor;

#[derive(Clone)]
pub struct Dispatcher {
    processor: Arc<TaskProcessor>,
    reporter: Arc<dyn OutcomeReporter>,
    limit: Option<Arc<Semaphore>>,
    tracker: TaskTracker,
}

impl Dispatcher {
    /// `max_concurrent` bounds how many tasks run at once; `None` leaves it unbounded.
    pub fn new(
        processor: Arc<TaskProcessor>,
        reporter: Arc<dyn OutcomeReporter>,
        max_concurrent: Option<usize>,
    ) -> Self {
        Self {
            processor,
            reporter,
            limit: max_concurrent
                .filter(|&n| n > 0)
                .map(|n| Arc::new(Semaphore::new(n))),
            tracker: TaskTracker::new(),
        }
    }

    pub fn processor(&self) -> &Arc<TaskProcessor> {
        &self.processor
    }

    /// Spawn processing and callback delivery for `request`.
    #[tracing::instrument(skip(self, request), fields(task_id = %request.task_id))]
    pub fn dispatch(&self, request: TaskRequest) -> JoinHandle<TaskOutcome> {
        let processor = self.processor.clone();
        let reporter = self.reporter.clone();
        let limit = self.limit.clone();

        tracing::debug!(file_path = %request.file_path, "Task accepted");

        let task = async move {
            // Held until the callback has been sent.
            let _permit = match limit {
                Some(semaphore) => semaphore.acquire_owned().await.ok(),
                None => None,
            };

            let outcome = processor.process(&request).await;
            reporter.report(&request.callback_url, &outcome).await;
            outcome
        };

        self.tracker.spawn(task.in_current_span())
    }

    /// Number of dispatched tasks that have not reported yet.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Wait up to `timeout` for every dispatched task to report its outcome.
    ///
    /// Returns `false` if tasks were still running at the deadline. Tasks dispatched
    /// after this call are still tracked and waited for.
    pub async fn drain(&self, timeout: Duration) -> bool {
        self.tracker.close();
        let in_flight = self.tracker.len();
        if in_flight > 0 {
            tracing::info!(in_flight, "Waiting for in-flight tasks");
        }

        let drained = tokio::time::timeout(timeout, self.tracker.wait())
            .await
            .is_ok();
        if !drained {
            tracing::warn!(
                in_flight = self.tracker.len(),
                "Shutdown deadline reached, abandoning in-flight tasks"
            );
        }
        drained
    }
}
