// Advisory per-resource locks
//
// At most one permit per key is outstanding. Used to serialize mutating
// pipeline actions that target the same project tree when enabled.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Map from resource key to an exclusive permit
#[derive(Default)]
pub struct ResourceLocks {
    slots: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

/// Held while the resource is in use; released on drop
#[derive(Debug)]
pub struct ResourcePermit {
    _guard: OwnedMutexGuard<()>,
}

impl ResourceLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &str) -> Arc<AsyncMutex<()>> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.entry(key.to_string()).or_default().clone()
    }

    /// Wait until the resource is free, then take it
    pub async fn acquire(&self, key: &str) -> ResourcePermit {
        ResourcePermit {
            _guard: self.slot(key).lock_owned().await,
        }
    }

    /// Take the resource only if nobody holds it
    #[cfg(test)]
    fn try_acquire(&self, key: &str) -> Option<ResourcePermit> {
        let guard = self.slot(key).try_lock_owned().ok()?;
        Some(ResourcePermit { _guard: guard })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio_test::{assert_pending, assert_ready, task};

    #[tokio::test]
    async fn test_same_key_is_exclusive() {
        let locks = ResourceLocks::new();
        let permit = locks.acquire("evolution").await;
        assert!(locks.try_acquire("evolution").is_none());

        drop(permit);
        assert!(locks.try_acquire("evolution").is_some());
    }

    #[tokio::test]
    async fn test_different_keys_do_not_block() {
        let locks = ResourceLocks::new();
        let _a = locks.acquire("a").await;
        assert!(locks.try_acquire("b").is_some());
    }

    #[tokio::test]
    async fn test_waiter_proceeds_after_release() {
        let locks = Arc::new(ResourceLocks::new());
        let permit = locks.acquire("root").await;

        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _permit = locks.acquire("root").await;
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiter.is_finished());

        drop(permit);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should acquire after release")
            .unwrap();
    }

    #[test]
    fn test_acquire_is_pending_while_held() {
        let locks = ResourceLocks::new();
        let held = locks.try_acquire("root").unwrap();

        let mut waiting = task::spawn(locks.acquire("root"));
        assert_pending!(waiting.poll());

        drop(held);
        assert!(waiting.is_woken());
        let _permit = assert_ready!(waiting.poll());
    }
}
