use std::future::Future;
use std::sync::{Arc, Mutex as SyncMutex};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Single-slot delayed task.
///
/// At most one timer is armed at any time. Scheduling again aborts the armed
/// timer and restarts the quiet period, so only the newest job ever runs. Once
/// the quiet period elapses the job is detached from the slot: a later call
/// cannot cancel work that already started.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
    started: Arc<SyncMutex<Vec<JoinHandle<()>>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: Mutex::new(None),
            started: Arc::new(SyncMutex::new(Vec::new())),
        }
    }

    pub async fn schedule<F>(&self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock().await;
        if let Some(previous) = pending.take() {
            previous.abort();
        }
        let delay = self.delay;
        let started = self.started.clone();
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // no await from here on: an abort cannot land between spawn and push
            let handle = tokio::spawn(job);
            let mut started = started.lock().unwrap_or_else(|e| e.into_inner());
            started.retain(|running| !running.is_finished());
            started.push(handle);
        }));
    }

    /// Drops the armed timer, if any. Returns whether one was still waiting.
    pub async fn cancel(&self) -> bool {
        let mut pending = self.pending.lock().await;
        match pending.take() {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    /// Waits for the armed timer to fire and for every started job to finish.
    pub async fn settle(&self) {
        let armed = self.pending.lock().await.take();
        if let Some(handle) = armed {
            let _ = handle.await;
        }
        let started = std::mem::take(&mut *self.started.lock().unwrap_or_else(|e| e.into_inner()));
        for handle in started {
            let _ = handle.await;
        }
    }

    #[cfg(test)]
    pub async fn is_pending(&self) -> bool {
        let pending = self.pending.lock().await;
        pending.as_ref().map_or(false, |handle| !handle.is_finished())
    }
}
