//! Per-key async mutual exclusion

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

struct Slot {
    mutex: Arc<AsyncMutex<()>>,
    /// Current holder plus waiters
    users: usize,
}

/// A lazily created async mutex per key
///
/// A slot lives exactly as long as some caller holds or awaits it. Waiters
/// whose future is dropped before acquiring deregister on drop, so the map
/// only holds keys in flight.
#[derive(Default)]
pub(crate) struct KeyedLocks {
    slots: Mutex<HashMap<String, Slot>>,
}

impl KeyedLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`
    pub(crate) async fn lock(&self, key: &str) -> KeyGuard<'_> {
        let (registration, mutex) = self.register(key);
        // Dropping this future while it waits drops `registration` too.
        let guard = mutex.lock_owned().await;
        KeyGuard {
            _guard: guard,
            _registration: registration,
        }
    }

    /// Number of keys currently held or awaited
    pub(crate) fn active_keys(&self) -> usize {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn register(&self, key: &str) -> (Registration<'_>, Arc<AsyncMutex<()>>) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = slots.entry(key.to_string()).or_insert_with(|| Slot {
            mutex: Arc::default(),
            users: 0,
        });
        slot.users += 1;

        let registration = Registration {
            owner: self,
            key: key.to_string(),
        };
        (registration, slot.mutex.clone())
    }
}

/// One caller's claim on a slot; the slot is removed when the last claim drops
struct Registration<'a> {
    owner: &'a KeyedLocks,
    key: String,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        let mut slots = self.owner.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = slots.get_mut(&self.key) {
            slot.users = slot.users.saturating_sub(1);
            if slot.users == 0 {
                slots.remove(&self.key);
            }
        }
    }
}

/// Exclusive access to one key; released on drop
///
/// Fields drop in declaration order: the mutex is released before the
/// registration, so a slot is never removed while still locked.
pub(crate) struct KeyGuard<'a> {
    _guard: OwnedMutexGuard<()>,
    _registration: Registration<'a>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const KEY: &str = "+15551234567";

    #[tokio::test]
    async fn test_slot_removed_after_release() {
        let locks = KeyedLocks::new();
        {
            let _guard = locks.lock(KEY).await;
            assert_eq!(locks.active_keys(), 1);
        }
        assert_eq!(locks.active_keys(), 0);
    }

    #[tokio::test]
    async fn test_different_keys_do_not_block() {
        let locks = KeyedLocks::new();
        let _a = locks.lock("+15550000001").await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.lock("+15550000002")).await;
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn test_same_key_waits_for_release() {
        let locks = Arc::new(KeyedLocks::new());
        let first = locks.lock(KEY).await;

        let blocked = tokio::time::timeout(Duration::from_millis(50), locks.lock(KEY)).await;
        assert!(blocked.is_err());

        drop(first);
        let acquired = tokio::time::timeout(Duration::from_millis(100), locks.lock(KEY)).await;
        assert!(acquired.is_ok());
    }

    #[tokio::test]
    async fn test_timed_out_waiter_releases_slot() {
        let locks = KeyedLocks::new();
        let holder = locks.lock(KEY).await;

        let waiter = tokio::time::timeout(Duration::from_millis(10), locks.lock(KEY)).await;
        assert!(waiter.is_err());
        assert_eq!(locks.active_keys(), 1);

        drop(holder);
        assert_eq!(locks.active_keys(), 0);
    }

    #[tokio::test]
    async fn test_waiter_dropped_after_holder_releases_slot() {
        let locks = KeyedLocks::new();
        let holder = locks.lock(KEY).await;

        let mut waiter = Box::pin(locks.lock(KEY));
        assert!(tokio::time::timeout(Duration::from_millis(10), &mut waiter)
            .await
            .is_err());

        drop(holder);
        assert_eq!(locks.active_keys(), 1);
        drop(waiter);
        assert_eq!(locks.active_keys(), 0);

        // The key is usable again afterwards
        let _again = locks.lock(KEY).await;
        assert_eq!(locks.active_keys(), 1);
    }
}
