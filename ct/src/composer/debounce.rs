//! Debouncer - single-slot delayed invocation
//!
//! Each `schedule` replaces the pending value and restarts the timer, so only
//! the last value scheduled within a quiet period reaches the action.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

type Action<T> = Arc<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;

/// Delays an async action until input settles
///
/// Must be used from within a tokio runtime. Dropping the debouncer cancels
/// any pending timer.
pub struct Debouncer<T> {
    delay: Duration,
    action: Action<T>,
    pending: Option<JoinHandle<()>>,
    /// Bumped on every schedule/cancel; a timer only fires if it still holds the latest value
    generation: Arc<AtomicU64>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F, Fut>(delay: Duration, action: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        debug!(?delay, "Debouncer::new: called");
        Self {
            delay,
            action: Arc::new(move |value| Box::pin(action(value))),
            pending: None,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record `value` and restart the timer
    pub fn schedule(&mut self, value: T) {
        trace!("Debouncer::schedule: called");
        self.abort_pending();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let action = Arc::clone(&self.action);
        let current = Arc::clone(&self.generation);
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) != generation {
                trace!(generation, "Debouncer: superseded before firing");
                return;
            }
            trace!(generation, "Debouncer: firing");
            // Detached: a later schedule or cancel must not abort an action already started
            tokio::spawn(action(value));
        }));
    }

    /// Drop the pending value without invoking the action
    ///
    /// Returns true if a timer was pending.
    pub fn cancel(&mut self) -> bool {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let was_pending = self.is_pending();
        self.abort_pending();
        if was_pending {
            debug!("Debouncer::cancel: cancelled pending timer");
        }
        was_pending
    }

    /// True while a timer is armed and has not fired
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn abort_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording(delay: Duration) -> (Debouncer<String>, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let debouncer = Debouncer::new(delay, move |value: String| {
            let sink = Arc::clone(&sink);
            async move {
                sink.lock().unwrap().push(value);
            }
        });
        (debouncer, calls)
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_after_delay() {
        let (mut debouncer, calls) = recording(Duration::from_millis(1000));

        debouncer.schedule("hello".to_string());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(calls.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(*calls.lock().unwrap(), vec!["hello".to_string()]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_write_wins() {
        let (mut debouncer, calls) = recording(Duration::from_millis(1000));

        debouncer.schedule("a".to_string());
        tokio::time::sleep(Duration::from_millis(500)).await;
        debouncer.schedule("ab".to_string());
        tokio::time::sleep(Duration::from_millis(900)).await;
        debouncer.schedule("abc".to_string());

        // 1400ms since the first schedule, but the window keeps resetting
        assert!(calls.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(*calls.lock().unwrap(), vec!["abc".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_invocation() {
        let (mut debouncer, calls) = recording(Duration::from_millis(1000));

        debouncer.schedule("draft".to_string());
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_windows_fire_separately() {
        let (mut debouncer, calls) = recording(Duration::from_millis(1000));

        debouncer.schedule("first".to_string());
        tokio::time::sleep(Duration::from_millis(1500)).await;
        debouncer.schedule("second".to_string());
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(*calls.lock().unwrap(), vec!["first".to_string(), "second".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_running_action_survives_reschedule() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let mut debouncer = Debouncer::new(Duration::from_millis(100), move |value: String| {
            let sink = Arc::clone(&sink);
            async move {
                // Slow action, e.g. a network call
                tokio::time::sleep(Duration::from_millis(1000)).await;
                sink.lock().unwrap().push(value);
            }
        });

        debouncer.schedule("slow".to_string());
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.schedule("next".to_string());
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(*calls.lock().unwrap(), vec!["slow".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (mut debouncer, calls) = recording(Duration::from_millis(1000));
        debouncer.schedule("gone".to_string());
        drop(debouncer);

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert!(calls.lock().unwrap().is_empty());
    }
}
