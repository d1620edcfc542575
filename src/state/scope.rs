use std::future::Future;

use parking_lot::Mutex;
use tokio::task::AbortHandle;

/// Owner of the tasks spawned by one container.
///
/// Dropping the scope aborts whatever is still running, which ties the
/// network calls to the lifetime of the screen that owns the container.
#[derive(Default)]
pub struct TaskScope {
    handles: Mutex<Vec<AbortHandle>>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `future` on the current Tokio runtime.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime, like `tokio::spawn`.
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future);
        let mut handles = self.handles.lock();
        handles.retain(|h| !h.is_finished());
        handles.push(handle.abort_handle());
    }

    /// Tasks spawned through this scope that have not finished yet.
    pub fn pending(&self) -> usize {
        self.handles.lock().iter().filter(|h| !h.is_finished()).count()
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        for handle in self.handles.get_mut().drain(..) {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn drop_aborts_pending_tasks() {
        let finished = Arc::new(AtomicBool::new(false));
        let scope = TaskScope::new();

        let flag = Arc::clone(&finished);
        scope.spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            flag.store(true, Ordering::SeqCst);
        });
        assert_eq!(scope.pending(), 1);

        drop(scope);
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn finished_tasks_are_not_pending() {
        let scope = TaskScope::new();
        scope.spawn(async {});
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(scope.pending(), 0);
    }
}
