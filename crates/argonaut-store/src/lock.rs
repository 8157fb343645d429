//! Per-key mutual exclusion.
//!
//! A registry of recursive mutexes keyed by string, letting callers
//! serialize work on "the same logical resource" while work on distinct
//! resources proceeds fully in parallel. Keys are never evicted; the
//! registry grows monotonically with the distinct identities touched, which
//! stays bounded by the loaded clinical record set.

use parking_lot::{ReentrantMutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of per-key recursive locks.
pub struct KeyedLockRegistry {
    locks: RwLock<HashMap<String, Arc<ReentrantMutex<()>>>>,
}

impl KeyedLockRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            locks: RwLock::new(HashMap::new()),
        }
    }

    /// Runs `body` with exclusive access scoped to `key`.
    ///
    /// Concurrent calls with the same key are fully serialized; calls with
    /// different keys never block each other. The underlying mutex is
    /// recursive, so the same thread may nest calls for the same key. The
    /// lock is released on every exit path, including unwinds.
    pub fn with_lock<T>(&self, key: &str, body: impl FnOnce() -> T) -> T {
        let mutex = self.mutex_for(key);
        let _guard = mutex.lock();
        body()
    }

    /// Number of distinct keys ever locked.
    pub fn len(&self) -> usize {
        self.locks.read().len()
    }

    /// Whether no key has been locked yet.
    pub fn is_empty(&self) -> bool {
        self.locks.read().is_empty()
    }

    /// Looks up or creates the mutex for `key`.
    ///
    /// Fast path is a shared read of the map. On a miss the map is
    /// re-checked under the write lock, so two callers racing on a fresh
    /// key end up with the same mutex.
    fn mutex_for(&self, key: &str) -> Arc<ReentrantMutex<()>> {
        if let Some(mutex) = self.locks.read().get(key) {
            return Arc::clone(mutex);
        }

        let mut locks = self.locks.write();
        if let Some(mutex) = locks.get(key) {
            return Arc::clone(mutex);
        }
        tracing::trace!(key, "registering lock for new key");
        let mutex = Arc::new(ReentrantMutex::new(()));
        locks.insert(key.to_string(), Arc::clone(&mutex));
        mutex
    }
}

impl Default for KeyedLockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KeyedLockRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedLockRegistry")
            .field("keys", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn test_returns_body_result() {
        let registry = KeyedLockRegistry::new();
        let value = registry.with_lock("k", || 42);
        assert_eq!(value, 42);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_error_propagates_and_lock_is_released() {
        let registry = KeyedLockRegistry::new();
        let result: Result<(), &str> = registry.with_lock("k", || Err("boom"));
        assert_eq!(result, Err("boom"));
        // The key is usable again afterwards.
        assert_eq!(registry.with_lock("k", || 1), 1);
    }

    #[test]
    fn test_same_thread_nesting_does_not_deadlock() {
        let registry = KeyedLockRegistry::new();
        let value = registry.with_lock("k", || registry.with_lock("k", || 7));
        assert_eq!(value, 7);
    }

    #[test]
    fn test_same_key_critical_sections_never_interleave() {
        let registry = Arc::new(KeyedLockRegistry::new());
        let markers: Arc<Mutex<Vec<(&'static str, usize)>>> = Arc::new(Mutex::new(Vec::new()));

        let handles: Vec<_> = (0..2)
            .map(|worker| {
                let registry = Arc::clone(&registry);
                let markers = Arc::clone(&markers);
                thread::spawn(move || {
                    registry.with_lock("shared", || {
                        markers.lock().unwrap().push(("begin", worker));
                        thread::sleep(Duration::from_millis(30));
                        markers.lock().unwrap().push(("end", worker));
                    });
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Each begin must be immediately followed by its own end.
        let markers = markers.lock().unwrap();
        assert_eq!(markers.len(), 4);
        for pair in markers.chunks(2) {
            assert_eq!(pair[0].0, "begin");
            assert_eq!(pair[1].0, "end");
            assert_eq!(pair[0].1, pair[1].1);
        }
    }

    #[test]
    fn test_same_key_serializes_wall_clock() {
        let registry = Arc::new(KeyedLockRegistry::new());
        let started = Instant::now();

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry.with_lock("X", || thread::sleep(Duration::from_millis(50)));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Two 50ms critical sections on one key cannot overlap.
        assert!(started.elapsed() >= Duration::from_millis(100));
    }

    #[test]
    fn test_distinct_keys_do_not_contend() {
        let registry = Arc::new(KeyedLockRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let key = format!("key-{worker}");
                    registry.with_lock(&key, || thread::sleep(Duration::from_millis(10)));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 8);
    }

    #[test]
    fn test_racing_creation_yields_one_lock_per_key() {
        let registry = Arc::new(KeyedLockRegistry::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.with_lock("fresh", || ()))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 1);
    }
}
