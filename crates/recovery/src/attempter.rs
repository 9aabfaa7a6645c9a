use futures::future::{self, BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Synchronous recovery callback, given the chosen option index
pub type SyncAttempter = Arc<dyn Fn(usize) -> bool + Send + Sync>;

/// Asynchronous recovery callback, given the chosen option index
pub type AsyncAttempter = Arc<dyn Fn(usize) -> BoxFuture<'static, bool> + Send + Sync>;

/// Recovery callbacks attached to an error
#[derive(Clone)]
pub enum RecoveryAttempter {
    Sync(SyncAttempter),
    SyncAndAsync(SyncAttempter, AsyncAttempter),
}

impl RecoveryAttempter {
    pub fn sync<F>(attempter: F) -> Self
    where
        F: Fn(usize) -> bool + Send + Sync + 'static,
    {
        RecoveryAttempter::Sync(Arc::new(attempter))
    }

    /// Add an asynchronous attempter, keeping the synchronous one
    pub fn with_async<F, Fut>(self, attempter: F) -> Self
    where
        F: Fn(usize) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let sync = match self {
            RecoveryAttempter::Sync(sync) | RecoveryAttempter::SyncAndAsync(sync, _) => sync,
        };
        let asynchronous: AsyncAttempter = Arc::new(move |index| attempter(index).boxed());

        RecoveryAttempter::SyncAndAsync(sync, asynchronous)
    }

    /// Run the synchronous attempter
    pub fn attempt(&self, option_index: usize) -> bool {
        match self {
            RecoveryAttempter::Sync(sync) | RecoveryAttempter::SyncAndAsync(sync, _) => {
                sync(option_index)
            }
        }
    }

    pub fn async_attempter(&self) -> Option<&AsyncAttempter> {
        match self {
            RecoveryAttempter::Sync(_) => None,
            RecoveryAttempter::SyncAndAsync(_, asynchronous) => Some(asynchronous),
        }
    }

    /// The asynchronous attempter's future, or the synchronous result if there is none
    pub fn attempt_async(&self, option_index: usize) -> BoxFuture<'static, bool> {
        match self {
            RecoveryAttempter::Sync(sync) => future::ready(sync(option_index)).boxed(),
            RecoveryAttempter::SyncAndAsync(_, asynchronous) => asynchronous(option_index),
        }
    }
}

impl fmt::Debug for RecoveryAttempter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryAttempter::Sync(_) => f.write_str("RecoveryAttempter::Sync(..)"),
            RecoveryAttempter::SyncAndAsync(..) => f.write_str("RecoveryAttempter::SyncAndAsync(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_attempt() {
        let attempter = RecoveryAttempter::sync(|index| index == 2);

        assert!(attempter.attempt(2));
        assert!(!attempter.attempt(0));
        assert!(attempter.async_attempter().is_none());
    }

    #[tokio::test]
    async fn test_async_falls_back_to_sync() {
        let attempter = RecoveryAttempter::sync(|index| index == 1);

        assert!(attempter.attempt_async(1).await);
        assert!(!attempter.attempt_async(0).await);
    }

    #[tokio::test]
    async fn test_with_async_keeps_sync() {
        let attempter = RecoveryAttempter::sync(|_| false).with_async(|index| async move {
            tokio::task::yield_now().await;
            index == 0
        });

        assert!(!attempter.attempt(0));
        assert!(attempter.attempt_async(0).await);
        assert!(!attempter.attempt_async(1).await);
        assert!(format!("{attempter:?}").contains("SyncAndAsync"));
    }
}
