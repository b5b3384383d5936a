use std::future::Future;

use tokio::sync::watch;
use tracing::{debug, warn};

/// Observable state of one async load. Data and error are never visible at
/// the same time.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Idle,
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The result was published.
    Applied,
    /// A newer `execute` started while this one was in flight; its result was dropped.
    Superseded,
    /// The request was refused before anything was fetched.
    Rejected,
}

/// What subscribers observe: the state plus the generation that produced it.
#[derive(Debug, Clone)]
pub struct LoaderSnapshot<T> {
    pub generation: u64,
    pub state: LoadState<T>,
}

pub struct AsyncLoader<T> {
    tx: watch::Sender<LoaderSnapshot<T>>,
}

impl<T> AsyncLoader<T>
where
    T: Clone,
{
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(LoaderSnapshot {
            generation: 0,
            state: LoadState::Idle,
        });
        Self { tx }
    }

    /// Runs `producer` as the newest load. The previous snapshot is replaced by
    /// `Loading` before the producer is polled. In-flight older loads are not
    /// aborted; their results are discarded when they land.
    pub async fn execute<F, Fut>(&self, producer: F) -> anyhow::Result<LoadOutcome>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let generation = self.begin();

        match producer().await {
            Ok(data) => Ok(self.finish(generation, LoadState::Ready(data))),
            Err(e) => match self.finish(generation, LoadState::Failed(e.to_string())) {
                LoadOutcome::Applied => {
                    warn!("Load #{} failed: {}", generation, e);
                    Err(e)
                }
                outcome => Ok(outcome),
            },
        }
    }

    fn begin(&self) -> u64 {
        let mut generation = 0;
        self.tx.send_modify(|snapshot| {
            snapshot.generation += 1;
            snapshot.state = LoadState::Loading;
            generation = snapshot.generation;
        });
        generation
    }

    fn finish(&self, generation: u64, state: LoadState<T>) -> LoadOutcome {
        let applied = self.tx.send_if_modified(|snapshot| {
            if snapshot.generation != generation {
                return false;
            }
            snapshot.state = state;
            true
        });

        if applied {
            LoadOutcome::Applied
        } else {
            debug!("Dropping stale result of load #{}", generation);
            LoadOutcome::Superseded
        }
    }

    pub fn state(&self) -> LoadState<T> {
        self.tx.borrow().state.clone()
    }

    pub fn generation(&self) -> u64 {
        self.tx.borrow().generation
    }

    pub fn subscribe(&self) -> watch::Receiver<LoaderSnapshot<T>> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Default for AsyncLoader<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::anyhow;
    use assert_matches::assert_matches;
    use tokio::sync::oneshot;

    use super::*;

    #[tokio::test]
    async fn test_execute_publishes_data() {
        let loader = AsyncLoader::<Vec<u32>>::new();
        assert_eq!(loader.state(), LoadState::Idle);

        let outcome = loader.execute(|| async { Ok(vec![1, 2, 3]) }).await.unwrap();

        assert_eq!(outcome, LoadOutcome::Applied);
        assert_eq!(loader.state().data(), Some(&vec![1, 2, 3]));
        assert_eq!(loader.state().error(), None);
    }

    #[tokio::test]
    async fn test_failure_replaces_data_and_is_returned() {
        let loader = AsyncLoader::<Vec<u32>>::new();
        loader.execute(|| async { Ok(vec![1]) }).await.unwrap();

        let result = loader.execute(|| async { Err(anyhow!("network down")) }).await;

        assert!(result.is_err());
        assert_eq!(loader.state(), LoadState::Failed("network down".to_string()));
        assert_eq!(loader.state().data(), None);
    }

    #[tokio::test]
    async fn test_new_execute_clears_error_and_sets_loading_before_result() {
        let loader = Arc::new(AsyncLoader::<Vec<u32>>::new());
        let _ = loader.execute(|| async { Err(anyhow!("boom")) }).await;
        assert!(loader.state().error().is_some());

        let (tx, rx) = oneshot::channel::<Vec<u32>>();
        let mut watcher = loader.subscribe();
        let task_loader = Arc::clone(&loader);
        let task = tokio::spawn(async move {
            task_loader.execute(|| async move { Ok::<_, anyhow::Error>(rx.await?) }).await
        });

        watcher.wait_for(|snapshot| snapshot.generation == 2).await.unwrap();
        assert!(loader.state().is_loading());
        assert_eq!(loader.state().error(), None);

        tx.send(vec![9]).unwrap();
        assert_matches!(task.await.unwrap(), Ok(LoadOutcome::Applied));
        assert_eq!(loader.state().data(), Some(&vec![9]));
    }

    #[tokio::test]
    async fn test_stale_result_does_not_overwrite_newer_one() {
        let loader = Arc::new(AsyncLoader::<Vec<u32>>::new());
        let (slow_tx, slow_rx) = oneshot::channel::<Vec<u32>>();

        let mut watcher = loader.subscribe();
        let slow_loader = Arc::clone(&loader);
        let slow = tokio::spawn(async move {
            slow_loader.execute(|| async move { Ok::<_, anyhow::Error>(slow_rx.await?) }).await
        });
        watcher.wait_for(|snapshot| snapshot.generation == 1).await.unwrap();

        let fast = loader.execute(|| async { Ok(vec![2]) }).await.unwrap();
        assert_eq!(fast, LoadOutcome::Applied);

        slow_tx.send(vec![1]).unwrap();
        assert_matches!(slow.await.unwrap(), Ok(LoadOutcome::Superseded));
        assert_eq!(loader.state().data(), Some(&vec![2]));
    }

    #[tokio::test]
    async fn test_stale_failure_is_swallowed() {
        let loader = Arc::new(AsyncLoader::<Vec<u32>>::new());
        let (slow_tx, slow_rx) = oneshot::channel::<()>();

        let mut watcher = loader.subscribe();
        let slow_loader = Arc::clone(&loader);
        let slow = tokio::spawn(async move {
            slow_loader
                .execute(|| async move {
                    slow_rx.await?;
                    Err::<Vec<u32>, anyhow::Error>(anyhow!("late failure"))
                })
                .await
        });
        watcher.wait_for(|snapshot| snapshot.generation == 1).await.unwrap();

        loader.execute(|| async { Ok(vec![5]) }).await.unwrap();
        slow_tx.send(()).unwrap();

        assert_matches!(slow.await.unwrap(), Ok(LoadOutcome::Superseded));
        assert_eq!(loader.state().data(), Some(&vec![5]));
    }
}
