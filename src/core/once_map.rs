use std::{
    collections::HashMap,
    hash::Hash,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

/// A map whose values are computed at most once per key.
///
/// The outer lock is only held long enough to find or insert the key's slot;
/// the slot lock is held while the value is computed, so concurrent callers
/// for the same key block until the first one finishes, while callers for
/// other keys proceed. A failed initialization leaves the slot empty.
pub(crate) struct OnceMap<K, V> {
    slots: Mutex<HashMap<K, Arc<Mutex<Option<V>>>>>,
}

impl<K: Eq + Hash, V: Clone> OnceMap<K, V> {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn get_or_try_init<E>(&self, key: K, init: impl FnOnce() -> Result<V, E>) -> Result<V, E> {
        let slot = {
            let mut slots = lock(&self.slots);
            Arc::clone(slots.entry(key).or_default())
        };

        let mut value = lock(&slot);
        if let Some(value) = value.as_ref() {
            return Ok(value.clone());
        }
        let computed = init()?;
        *value = Some(computed.clone());
        Ok(computed)
    }

    /// Snapshot of every initialized value.
    pub fn values(&self) -> Vec<V> {
        let slots: Vec<_> = lock(&self.slots).values().cloned().collect();
        slots
            .iter()
            .filter_map(|slot| lock(slot).as_ref().cloned())
            .collect()
    }
}

/// Values are only ever written whole, so a poisoned lock still guards
/// consistent data.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
