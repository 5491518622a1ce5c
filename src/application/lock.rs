use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// One mutex per household identifier.
///
/// Ledger types do no locking of their own: two accounts open on the same
/// household will overwrite each other's records. Callers that run
/// operations concurrently wrap each read-modify-write in
/// [`HouseholdLocks::with_household`] so at most one writer per household is
/// active at a time.
#[derive(Default)]
pub struct HouseholdLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl HouseholdLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` while holding the lock for `household`. Different households
    /// do not block each other.
    pub fn with_household<T>(&self, household: &str, f: impl FnOnce() -> T) -> T {
        let lock = self.lock_for(household);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        f()
    }

    /// Number of households that have been locked at least once.
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_for(&self, household: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks
            .entry(household.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_lock_per_household() {
        let locks = HouseholdLocks::new();
        assert!(locks.is_empty());

        locks.with_household("smith", || ());
        locks.with_household("smith", || ());
        locks.with_household("jones", || ());

        assert_eq!(locks.len(), 2);
    }

    #[test]
    fn test_returns_closure_value() {
        let locks = HouseholdLocks::new();
        assert_eq!(locks.with_household("smith", || 42), 42);
    }
}
